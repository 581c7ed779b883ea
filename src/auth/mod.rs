// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Bearer-token authentication and role gating for the Quill API.
//!
//! ## Auth Flow
//!
//! 1. Client logs in (`POST /login` or `POST /organizations/login`)
//! 2. Server verifies the bcrypt password hash and issues an HS256 token
//!    carrying `{id, username|email, role, iat, exp}`
//! 3. Client sends `Authorization: Bearer <token>`
//! 4. The route's gate verifies the token, checks the role and attaches
//!    the [`Identity`] to the request
//! 5. Handlers read it with [`CurrentIdentity`] or [`MaybeIdentity`]
//!
//! ## Security
//!
//! - Only HS256 is accepted; the secret comes from `JWT_SECRET` or is
//!   generated at startup
//! - Tokens expire one hour after issuance, with no leeway
//! - While no account exists, account creation is open to anyone so the
//!   first administrator can be created

pub mod bootstrap;
pub mod claims;
pub mod codec;
pub mod error;
pub mod extractor;
pub mod gate;
pub mod password;
pub mod roles;

pub use bootstrap::{AccountCensus, BootstrapPolicy};
pub use claims::{DisplayKey, Identity};
pub use codec::{SigningSecret, TokenCodec, TOKEN_VALIDITY};
pub use error::AuthError;
pub use extractor::{extract_identity, CurrentIdentity, MaybeIdentity};
pub use gate::{RoleRequired, RoleRequiredOrBootstrap, SelfOnly};
pub use password::{validate_password_strength, PasswordError, PasswordHasher, PASSWORD_POLICY_MESSAGE};
pub use roles::Role;
