// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, http::StatusCode};

use crate::{
    error::{respond, ApiResult},
    models::StatusView,
    state::AppState,
};

/// Service status.
///
/// `initialized` turns true once the first account exists, i.e. once
/// account creation stops being open to anonymous callers.
#[utoipa::path(
    get,
    path = "/api/v1/status",
    tag = "Status",
    responses((status = 200, body = StatusView))
)]
pub async fn get_status(State(state): State<AppState>) -> ApiResult<StatusView> {
    let accounts = state.db.count_accounts()?;
    respond(
        StatusCode::OK,
        StatusView {
            initialized: accounts > 0,
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    )
}
