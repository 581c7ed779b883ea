// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token issuance for top-level and organization accounts.

use axum::{extract::State, http::StatusCode};

use super::extract::JsonBody;
use crate::{
    auth::{DisplayKey, Identity},
    error::{respond, ApiError, ApiResult},
    models::{LoginRequest, OrganizationLoginRequest, TokenView},
    state::AppState,
};

pub const LOGIN_FAILED_MESSAGE: &str = "The username or password is incorrect. Try again.";

pub const ORGANIZATION_LOGIN_FAILED_MESSAGE: &str = "The email or password is incorrect. Try again.";

fn issue_token(state: &AppState, identity: &Identity) -> ApiResult<TokenView> {
    let token = state.tokens.issue(identity).map_err(|e| {
        tracing::error!(error = %e, "Failed to sign token");
        ApiError::internal()
    })?;
    tracing::info!(subject_id = identity.subject_id, role = %identity.role, "Token issued");
    respond(StatusCode::OK, TokenView { token })
}

#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, body = TokenView),
        (status = 400, description = "Missing username or password"),
        (status = 401, description = "Unknown username or wrong password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> ApiResult<TokenView> {
    if request.username.is_empty() {
        return Err(ApiError::bad_request("Username is required"));
    }
    if request.password.is_empty() {
        return Err(ApiError::bad_request("Password is required"));
    }

    let account = state
        .db
        .get_account_by_username(&request.username)?
        .ok_or_else(|| ApiError::unauthorized(LOGIN_FAILED_MESSAGE))?;

    if !state.passwords.verify(&request.password, &account.password_hash).await? {
        return Err(ApiError::unauthorized(LOGIN_FAILED_MESSAGE));
    }

    let identity = Identity::new(account.id, DisplayKey::Username(account.username), account.role);
    issue_token(&state, &identity)
}

#[utoipa::path(
    post,
    path = "/api/v1/organizations/login",
    request_body = OrganizationLoginRequest,
    tag = "Auth",
    responses(
        (status = 200, body = TokenView),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Unknown email or wrong password")
    )
)]
pub async fn organization_login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<OrganizationLoginRequest>,
) -> ApiResult<TokenView> {
    if request.email.is_empty() {
        return Err(ApiError::bad_request("Email is required"));
    }
    if request.password.is_empty() {
        return Err(ApiError::bad_request("Password is required"));
    }

    let member = state
        .db
        .get_organization_account_by_email(&request.email)?
        .ok_or_else(|| ApiError::unauthorized(ORGANIZATION_LOGIN_FAILED_MESSAGE))?;

    if !state.passwords.verify(&request.password, &member.password_hash).await? {
        return Err(ApiError::unauthorized(ORGANIZATION_LOGIN_FAILED_MESSAGE));
    }

    let identity = Identity::new(member.id, DisplayKey::Email(member.email.clone()), member.role());
    issue_token(&state, &identity)
}
