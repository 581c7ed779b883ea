// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Top-level account management.
//!
//! Creation is open to anonymous callers only while no account exists; the
//! first account becomes the admin. Everything else requires the Admin role.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use super::extract::{parse_id, JsonBody};
use crate::{
    auth::{validate_password_strength, MaybeIdentity, Role, PASSWORD_POLICY_MESSAGE},
    error::{respond, ApiError, ApiResult},
    models::{AccountView, ChangePasswordRequest, CreateAccountRequest, IdView},
    state::AppState,
};

pub const DELETE_ADMIN_MESSAGE: &str = "deleting an Admin account is not allowed.";

#[utoipa::path(
    post,
    path = "/api/v1/accounts",
    request_body = CreateAccountRequest,
    tag = "Accounts",
    responses(
        (status = 201, body = IdView),
        (status = 400, description = "Missing field or weak password"),
        (status = 403, description = "Accounts exist and the caller is not an admin"),
        (status = 409, description = "Username taken")
    )
)]
pub async fn create_account(
    State(state): State<AppState>,
    MaybeIdentity(identity): MaybeIdentity,
    JsonBody(request): JsonBody<CreateAccountRequest>,
) -> ApiResult<IdView> {
    if request.username.is_empty() {
        return Err(ApiError::bad_request("Username is required"));
    }
    if request.password.is_empty() {
        return Err(ApiError::bad_request("Password is required"));
    }
    if !validate_password_strength(&request.password) {
        return Err(ApiError::bad_request(PASSWORD_POLICY_MESSAGE));
    }

    let hash = state.passwords.hash(&request.password).await?;

    // Anonymous callers were admitted on an empty store; the write
    // transaction re-checks that so concurrent bootstraps yield one admin.
    let account = match identity {
        None => state.db.create_first_account(&request.username, &hash)?,
        Some(_) => state.db.create_account(&request.username, &hash)?,
    };

    respond(StatusCode::CREATED, IdView::from(account.id))
}

#[utoipa::path(
    get,
    path = "/api/v1/accounts",
    tag = "Accounts",
    responses((status = 200, body = [AccountView]))
)]
pub async fn list_accounts(State(state): State<AppState>) -> ApiResult<Vec<AccountView>> {
    let accounts = state.db.list_accounts()?;
    respond(StatusCode::OK, accounts.into_iter().map(AccountView::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/accounts/{id}",
    params(("id" = i64, Path, description = "Account id")),
    tag = "Accounts",
    responses(
        (status = 200, body = AccountView),
        (status = 404, description = "Account not found")
    )
)]
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<AccountView> {
    let id = parse_id(&id, "Invalid id")?;
    let account = state.db.get_account(id)?;
    respond(StatusCode::OK, AccountView::from(account))
}

#[utoipa::path(
    delete,
    path = "/api/v1/accounts/{id}",
    params(("id" = i64, Path, description = "Account id")),
    tag = "Accounts",
    responses(
        (status = 202, body = IdView),
        (status = 400, description = "Target is an admin account"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn delete_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<IdView> {
    let id = parse_id(&id, "Invalid id")?;
    let account = state.db.get_account(id)?;
    if account.role == Role::Admin {
        return Err(ApiError::bad_request(DELETE_ADMIN_MESSAGE));
    }

    state.db.delete_account(id)?;
    respond(StatusCode::ACCEPTED, IdView::from(id))
}

#[utoipa::path(
    post,
    path = "/api/v1/accounts/{id}/change_password",
    params(("id" = i64, Path, description = "Account id")),
    request_body = ChangePasswordRequest,
    tag = "Accounts",
    responses(
        (status = 200, body = IdView),
        (status = 400, description = "Missing or weak password"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn change_account_password(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<ChangePasswordRequest>,
) -> ApiResult<IdView> {
    let id = parse_id(&id, "Invalid id")?;
    state.db.get_account(id)?;
    set_password(&state, id, &request.password).await
}

/// Validate and store a new password for a top-level account.
pub(crate) async fn set_password(state: &AppState, id: i64, password: &str) -> ApiResult<IdView> {
    if password.is_empty() {
        return Err(ApiError::bad_request("Password is required"));
    }
    if !validate_password_strength(password) {
        return Err(ApiError::bad_request(PASSWORD_POLICY_MESSAGE));
    }

    let hash = state.passwords.hash(password).await?;
    state.db.update_account_password(id, &hash)?;
    tracing::info!(account_id = id, "Password changed");
    respond(StatusCode::OK, IdView::from(id))
}
