// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token claims and the verified identity they carry.

use serde::{Deserialize, Serialize};

use super::roles::Role;

/// Human-facing key of an account.
///
/// Top-level accounts sign in with a username, organization accounts with an
/// email. In the token claims the variant name is the JSON field name, so a
/// token carries either `"username"` or `"email"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayKey {
    Username(String),
    Email(String),
}

impl DisplayKey {
    pub fn as_str(&self) -> &str {
        match self {
            DisplayKey::Username(value) | DisplayKey::Email(value) => value,
        }
    }
}

/// Verified caller identity.
///
/// Built fresh from a decoded token on every request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Id of the account the token was issued for
    pub subject_id: i64,
    /// Username or email of that account
    pub display_key: DisplayKey,
    pub role: Role,
}

impl Identity {
    pub fn new(subject_id: i64, display_key: DisplayKey, role: Role) -> Self {
        Self {
            subject_id,
            display_key,
            role,
        }
    }

    /// Check if this identity holds exactly the given role.
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_privileged()
    }
}

/// Claims encoded into a signed token.
///
/// ```json
/// { "id": 1, "username": "alice", "role": 1, "iat": 1700000000, "exp": 1700003600 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account id)
    pub id: i64,

    #[serde(flatten)]
    pub display_key: DisplayKey,

    pub role: Role,

    /// Issued at, Unix seconds
    pub iat: i64,

    /// Expiration, Unix seconds
    pub exp: i64,
}

impl Claims {
    pub fn new(identity: &Identity, issued_at: i64, expires_at: i64) -> Self {
        Self {
            id: identity.subject_id,
            display_key: identity.display_key.clone(),
            role: identity.role,
            iat: issued_at,
            exp: expires_at,
        }
    }

    pub fn into_identity(self) -> Identity {
        Identity {
            subject_id: self.id,
            display_key: self.display_key,
            role: self.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_claims_use_username_field() {
        let identity = Identity::new(3, DisplayKey::Username("alice".into()), Role::User);
        let value = serde_json::to_value(Claims::new(&identity, 10, 20)).unwrap();

        assert_eq!(
            value,
            serde_json::json!({ "id": 3, "username": "alice", "role": 0, "iat": 10, "exp": 20 })
        );
    }

    #[test]
    fn email_claims_round_trip() {
        let raw = r#"{"id":9,"email":"bob@example.com","role":2,"iat":1,"exp":2}"#;
        let claims: Claims = serde_json::from_str(raw).unwrap();

        assert_eq!(claims.display_key, DisplayKey::Email("bob@example.com".into()));
        let identity = claims.into_identity();
        assert_eq!(identity.subject_id, 9);
        assert_eq!(identity.role, Role::OrganizationMember);
    }

    #[test]
    fn claims_without_display_key_are_rejected() {
        let raw = r#"{"id":9,"role":2,"iat":1,"exp":2}"#;
        assert!(serde_json::from_str::<Claims>(raw).is_err());
    }

    #[test]
    fn has_role_is_strict_equality() {
        let admin = Identity::new(1, DisplayKey::Username("root".into()), Role::Admin);
        assert!(admin.has_role(Role::Admin));
        assert!(!admin.has_role(Role::User));
        assert!(admin.is_admin());
    }
}
