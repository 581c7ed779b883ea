// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Persisted record types.
//!
//! Records are stored as JSON values keyed by their integer id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::Role;

/// Top-level account (an author or an administrator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    /// Unique login name
    pub username: String,
    /// bcrypt hash, never returned by the API
    pub password_hash: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: i64,
    pub name: String,
}

/// Account scoped to a single organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationAccount {
    pub id: i64,
    pub organization_id: i64,
    /// Unique login email
    pub email: String,
    pub password_hash: String,
}

impl OrganizationAccount {
    /// Organization accounts always carry the organization member role.
    pub fn role(&self) -> Role {
        Role::OrganizationMember
    }
}

/// Publication state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }
}

impl std::str::FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            other => Err(format!("unknown post status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    /// Author account
    pub account_id: i64,
    pub title: String,
    pub content: String,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }
}

/// Replacement values for an author's post.
#[derive(Debug, Clone)]
pub struct PostUpdate {
    pub title: String,
    pub content: String,
    pub status: PostStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_status_wire_form() {
        assert_eq!(serde_json::to_string(&PostStatus::Published).unwrap(), "\"published\"");
        assert_eq!("draft".parse::<PostStatus>(), Ok(PostStatus::Draft));
        assert!("archived".parse::<PostStatus>().is_err());
    }

    #[test]
    fn account_role_is_stored_as_code() {
        let account = Account {
            id: 1,
            username: "root".into(),
            password_hash: "x".into(),
            role: Role::Admin,
        };
        let value = serde_json::to_value(&account).unwrap();
        assert_eq!(value["role"], 1);
    }
}
