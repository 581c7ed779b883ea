// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::{
    auth::{BootstrapPolicy, PasswordHasher, TokenCodec},
    storage::Database,
};

/// Shared application state.
///
/// Everything here is read-only after startup or synchronizes internally.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub tokens: Arc<TokenCodec>,
    pub passwords: PasswordHasher,
    pub bootstrap: BootstrapPolicy,
}

impl AppState {
    pub fn new(db: Arc<Database>, tokens: Arc<TokenCodec>, passwords: PasswordHasher) -> Self {
        let bootstrap = BootstrapPolicy::new(db.clone());
        Self {
            db,
            tokens,
            passwords,
            bootstrap,
        }
    }
}
