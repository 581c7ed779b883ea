// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::roles::Role;

/// Authentication and authorization failure.
///
/// Header and token failures all surface as 401 with a readable reason;
/// the client is not told more than that. A wrong role is 403, and a store
/// failure while evaluating the bootstrap rule is 500.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("authorization header not found")]
    HeaderMissing,

    #[error("authorization header couldn't be processed. The expected format is 'Bearer <token>'")]
    HeaderMalformed,

    #[error("token is not valid: token is malformed")]
    TokenMalformed,

    #[error("token is not valid: signature is invalid")]
    TokenBadSignature,

    #[error("token is not valid: token is expired")]
    TokenExpired,

    #[error("forbidden: {0} access required")]
    RoleInsufficient(Role),

    #[error("account store unavailable: {0}")]
    StoreUnavailable(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
}

impl AuthError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::HeaderMissing
            | AuthError::HeaderMalformed
            | AuthError::TokenMalformed
            | AuthError::TokenBadSignature
            | AuthError::TokenExpired => StatusCode::UNAUTHORIZED,
            AuthError::RoleInsufficient(_) => StatusCode::FORBIDDEN,
            AuthError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message written to the client.
    pub fn public_message(&self) -> String {
        match self.status_code() {
            StatusCode::UNAUTHORIZED => format!("auth failed: {self}"),
            StatusCode::FORBIDDEN => self.to_string(),
            _ => "internal error".to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            AuthError::StoreUnavailable(detail) => {
                tracing::error!(error = %detail, "Authorization check could not reach the store");
            }
            AuthError::TokenExpired => tracing::debug!("Rejected expired token"),
            other => tracing::info!(status = status.as_u16(), reason = %other, "Request rejected"),
        }

        let body = Json(AuthErrorBody {
            error: self.public_message(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(error: AuthError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn header_failures_return_401() {
        let (status, body) = body_of(AuthError::HeaderMissing).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "auth failed: authorization header not found");
    }

    #[tokio::test]
    async fn malformed_header_mentions_expected_format() {
        let (status, body) = body_of(AuthError::HeaderMalformed).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["error"].as_str().unwrap().contains("Bearer <token>"));
    }

    #[tokio::test]
    async fn insufficient_role_returns_403() {
        let (status, body) = body_of(AuthError::RoleInsufficient(Role::Admin)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "forbidden: admin access required");
    }

    #[tokio::test]
    async fn store_failure_hides_detail() {
        let (status, body) = body_of(AuthError::StoreUnavailable("disk on fire".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal error");
    }
}
