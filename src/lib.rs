// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Quill - Role-Scoped Publishing Backend
//!
//! Accounts, organizations and posts behind a JSON REST API. Every request
//! runs through a composable pipeline of stages; authorization gates are
//! stages that verify the bearer token and check the caller's role.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers and router (Axum)
//! - `auth` - Tokens, passwords, roles and authorization gates
//! - `pipeline` - Request pipeline composition
//! - `storage` - Embedded redb storage

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod state;
pub mod storage;
