// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Password hashing and strength policy.

/// Message returned when a password fails [`validate_password_strength`].
pub const PASSWORD_POLICY_MESSAGE: &str = "Password must have 8 or more characters, must include at least one capital letter, one lowercase letter, and either a number or a symbol.";

const MIN_PASSWORD_LEN: usize = 8;

const PASSWORD_SYMBOLS: &str = "!@#$%^&*()_+-=[]{};':\"|,.<>?~";

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Check a candidate password against the strength policy.
pub fn validate_password_strength(password: &str) -> bool {
    password.len() >= MIN_PASSWORD_LEN
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password
            .chars()
            .any(|c| c.is_ascii_digit() || PASSWORD_SYMBOLS.contains(c))
}

/// bcrypt hasher with a fixed work factor.
///
/// Hashing is deliberately slow, so both operations run on the blocking
/// pool instead of a runtime worker.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub async fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let password = password.to_owned();
        let cost = self.cost;
        let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
        Ok(hashed)
    }

    /// Compare a password with a stored hash.
    ///
    /// A stored value that is not a bcrypt hash never matches.
    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await?;
        match outcome {
            Ok(matches) => Ok(matches),
            Err(
                bcrypt::BcryptError::InvalidHash(_)
                | bcrypt::BcryptError::InvalidPrefix(_)
                | bcrypt::BcryptError::InvalidCost(_)
                | bcrypt::BcryptError::InvalidBase64(_),
            ) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
