// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::{
    auth::{AuthError, PasswordError, Role},
    storage::StoreError,
};

/// Message sent for every failure whose detail stays in the logs.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal error";

/// Message sent when a self-service route touches someone else's record.
pub const OWNERSHIP_FORBIDDEN_MESSAGE: &str = "forbidden: admin or user access required";

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Success body: `{"result": ...}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub result: T,
}

pub type ApiResult<T> = Result<(StatusCode, Json<Envelope<T>>), ApiError>;

/// Wrap `value` in the success envelope with the given status.
pub fn respond<T: Serialize>(status: StatusCode, value: T) -> ApiResult<T> {
    Ok((status, Json(Envelope { result: value })))
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound { entity, .. } => Self::not_found(format!("{entity} not found")),
            StoreError::Conflict { entity, .. } => Self::conflict(format!("{entity} already exists")),
            StoreError::PermissionDenied { subject_id, entity, id } => {
                tracing::info!(subject_id, entity, id, "Ownership check failed");
                Self::forbidden(OWNERSHIP_FORBIDDEN_MESSAGE)
            }
            StoreError::AlreadyInitialized => {
                Self::forbidden(AuthError::RoleInsufficient(Role::Admin).to_string())
            }
            other => {
                tracing::error!(error = %other, "Store operation failed");
                Self::internal()
            }
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(error: PasswordError) -> Self {
        tracing::error!(error = %error, "Password hashing failed");
        Self::internal()
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        if let AuthError::StoreUnavailable(detail) = &error {
            tracing::error!(error = %detail, "Authorization check could not reach the store");
        }
        Self::new(error.status_code(), error.public_message())
    }
}
