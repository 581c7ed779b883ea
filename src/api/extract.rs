// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Request body and path helpers with the API's error messages.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON format";

/// JSON request body.
///
/// Unlike `axum::Json` this does not require a `Content-Type` header, and
/// every failure is a 400 `Invalid JSON format`.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::debug!(error = %e, "Could not read request body");
            ApiError::bad_request(INVALID_JSON_MESSAGE)
        })?;

        serde_json::from_slice(&bytes).map(JsonBody).map_err(|e| {
            tracing::debug!(error = %e, "Rejected request body");
            ApiError::bad_request(INVALID_JSON_MESSAGE)
        })
    }
}

/// Parse an integer path segment, rejecting with `message`.
pub fn parse_id(raw: &str, message: &str) -> Result<i64, ApiError> {
    raw.parse().map_err(|_| ApiError::bad_request(message))
}
