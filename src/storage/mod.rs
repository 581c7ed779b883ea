// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Storage Module
//!
//! Persistent storage in a single embedded redb file.
//!
//! ## Storage Layout
//!
//! ```text
//! $DATA_DIR/
//!   quill.redb    # accounts, organizations, organization accounts, posts
//! ```
//!
//! All operations are synchronous and short. Write transactions are
//! serialized by redb; read transactions see a consistent snapshot.

pub mod database;
pub mod ownership;
pub mod records;

pub use database::{Database, StoreError, StoreResult};
pub use ownership::{OwnedResource, OwnershipCheck, OwnershipEnforcer};
pub use records::{Account, Organization, OrganizationAccount, Post, PostStatus, PostUpdate};

/// File name of the database inside the data directory.
pub const DATABASE_FILE: &str = "quill.redb";
