// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies of the REST API. Responses are always
//! wrapped as `{"result": <body>}`; errors are `{"error": "<message>"}`.
//!
//! Request fields default to empty so that a missing field produces the
//! same "... is required" message as an empty one.
//!
//! ## Model Categories
//!
//! - **Auth**: login requests and the issued token
//! - **Accounts**: top-level accounts and password changes
//! - **Organizations**: organizations and their accounts
//! - **Posts**: author posts and their public view

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    auth::Role,
    storage::{Account, Organization, OrganizationAccount, Post},
};

// =============================================================================
// Shared
// =============================================================================

/// Id of a created, changed or deleted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IdView {
    pub id: i64,
}

impl From<i64> for IdView {
    fn from(id: i64) -> Self {
        Self { id }
    }
}

/// Service status.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusView {
    /// Whether the first (admin) account exists
    pub initialized: bool,
    pub version: String,
}

// =============================================================================
// Auth Models
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct OrganizationLoginRequest {
    pub email: String,
    pub password: String,
}

/// Signed bearer token, valid for one hour.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenView {
    pub token: String,
}

// =============================================================================
// Account Models
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateAccountRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct ChangePasswordRequest {
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AccountView {
    pub id: i64,
    pub username: String,
    /// 0 = user, 1 = admin
    #[schema(value_type = i64)]
    pub role: Role,
}

impl From<Account> for AccountView {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            role: account.role,
        }
    }
}

// =============================================================================
// Organization Models
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateOrganizationRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OrganizationView {
    pub id: i64,
    pub name: String,
}

impl From<Organization> for OrganizationView {
    fn from(organization: Organization) -> Self {
        Self {
            id: organization.id,
            name: organization.name,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateOrganizationAccountRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OrganizationAccountView {
    pub id: i64,
    pub email: String,
    /// Always 2 (organization member)
    #[schema(value_type = i64)]
    pub role: Role,
}

impl From<OrganizationAccount> for OrganizationAccountView {
    fn from(member: OrganizationAccount) -> Self {
        Self {
            id: member.id,
            role: member.role(),
            email: member.email,
        }
    }
}

// =============================================================================
// Post Models
// =============================================================================

/// Full replacement of a post's editable fields.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdatePostRequest {
    pub title: String,
    pub content: String,
    /// `draft` or `published`
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PostView {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// `draft` or `published`
    pub status: String,
    /// RFC 3339 creation time
    pub created_at: String,
    /// Username of the author
    pub author: String,
}

impl PostView {
    pub fn new(post: Post, author: String) -> Self {
        Self {
            id: post.id,
            status: post.status.as_str().to_string(),
            created_at: post.created_at.to_rfc3339(),
            title: post.title,
            content: post.content,
            author,
        }
    }
}
