// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Signed token issuance and verification.
//!
//! Tokens are HS256 JWTs carrying [`Claims`]. They are never stored on the
//! server and expire one hour after issuance; there is no revocation.

use std::time::Duration;

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use ring::rand::{SecureRandom, SystemRandom};

use super::{claims::Claims, AuthError, Identity};

/// How long an issued token stays valid.
pub const TOKEN_VALIDITY: Duration = Duration::from_secs(60 * 60);

/// Length of a generated signing secret, in bytes.
const GENERATED_SECRET_LEN: usize = 32;

const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Symmetric key used to sign and verify tokens.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Generate a random secret from the system CSPRNG.
    ///
    /// Tokens signed with a generated secret do not survive a restart.
    pub fn generate() -> Result<Self, ring::error::Unspecified> {
        let mut bytes = vec![0u8; GENERATED_SECRET_LEN];
        SystemRandom::new().fill(&mut bytes)?;
        Ok(Self(bytes))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SigningSecret(<{} bytes>)", self.0.len())
    }
}

/// Issues and verifies tokens with a single process-wide secret.
///
/// Shared read-only behind an `Arc`; no locking is needed.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    validity: Duration,
}

impl TokenCodec {
    pub fn new(secret: &SigningSecret) -> Self {
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        // Expiry is checked by `decode_at` with a strict comparison.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            validity: TOKEN_VALIDITY,
        }
    }

    /// Override the validity window.
    pub fn with_validity(mut self, validity: Duration) -> Self {
        self.validity = validity;
        self
    }

    pub fn validity(&self) -> Duration {
        self.validity
    }

    /// Issue a token for `identity`, valid from now.
    pub fn issue(&self, identity: &Identity) -> jsonwebtoken::errors::Result<String> {
        self.issue_at(identity, unix_now())
    }

    /// Issue a token as if the current time were `now` (Unix seconds).
    pub fn issue_at(&self, identity: &Identity, now: i64) -> jsonwebtoken::errors::Result<String> {
        let expires_at = now + self.validity.as_secs() as i64;
        let claims = Claims::new(identity, now, expires_at);
        encode(&Header::new(SIGNING_ALGORITHM), &claims, &self.encoding_key)
    }

    /// Verify a token and return the identity it carries.
    pub fn decode(&self, token: &str) -> Result<Identity, AuthError> {
        self.decode_at(token, unix_now())
    }

    /// Verify a token as if the current time were `now` (Unix seconds).
    ///
    /// The signature is checked before the expiry. A token whose `exp`
    /// equals `now` is already expired.
    pub fn decode_at(&self, token: &str, now: i64) -> Result<Identity, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature
                | ErrorKind::InvalidAlgorithm
                | ErrorKind::MissingAlgorithm => AuthError::TokenBadSignature,
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::TokenMalformed,
            }
        })?;

        if data.claims.exp <= now {
            return Err(AuthError::TokenExpired);
        }

        Ok(data.claims.into_identity())
    }
}

fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}
