// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account roles for authorization.

use serde::{Deserialize, Serialize};

/// Account roles for authorization.
///
/// One variant per account kind. On the wire (token claims, API bodies) a
/// role is its integer code.
///
/// - `User` - Top-level author account, manages its own posts
/// - `Admin` - Full access to every resource
/// - `OrganizationMember` - Account scoped to a single organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum Role {
    User,
    Admin,
    OrganizationMember,
}

impl Role {
    /// Whether this is the privileged role.
    ///
    /// Roles are compared by equality only; this is the single predicate
    /// that singles out administrators.
    pub fn is_privileged(&self) -> bool {
        *self == Role::Admin
    }

    /// Whether this role belongs to a top-level account (as opposed to an
    /// organization account).
    pub fn is_top_level(&self) -> bool {
        matches!(self, Role::User | Role::Admin)
    }

    pub fn code(&self) -> i64 {
        match self {
            Role::User => 0,
            Role::Admin => 1,
            Role::OrganizationMember => 2,
        }
    }

    pub fn from_code(code: i64) -> Option<Role> {
        match code {
            0 => Some(Role::User),
            1 => Some(Role::Admin),
            2 => Some(Role::OrganizationMember),
            _ => None,
        }
    }
}

impl From<Role> for i64 {
    fn from(role: Role) -> Self {
        role.code()
    }
}

impl TryFrom<i64> for Role {
    type Error = String;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Role::from_code(code).ok_or_else(|| format!("unknown role code {code}"))
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
            Role::OrganizationMember => write!(f, "organization member"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_admin_is_privileged() {
        assert!(Role::Admin.is_privileged());
        assert!(!Role::User.is_privileged());
        assert!(!Role::OrganizationMember.is_privileged());
    }

    #[test]
    fn codes_round_trip() {
        for role in [Role::User, Role::Admin, Role::OrganizationMember] {
            assert_eq!(Role::from_code(role.code()), Some(role));
        }
        assert_eq!(Role::from_code(7), None);
    }

    #[test]
    fn serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "1");
        let role: Role = serde_json::from_str("0").unwrap();
        assert_eq!(role, Role::User);
        assert!(serde_json::from_str::<Role>("9").is_err());
    }

    #[test]
    fn top_level_roles() {
        assert!(Role::User.is_top_level());
        assert!(Role::Admin.is_top_level());
        assert!(!Role::OrganizationMember.is_top_level());
    }
}
