// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use super::extract::{parse_id, JsonBody};
use crate::{
    error::{respond, ApiError, ApiResult},
    models::{CreateOrganizationRequest, IdView, OrganizationView},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/api/v1/organizations",
    tag = "Organizations",
    responses((status = 200, body = [OrganizationView]))
)]
pub async fn list_organizations(State(state): State<AppState>) -> ApiResult<Vec<OrganizationView>> {
    let organizations = state.db.list_organizations()?;
    respond(
        StatusCode::OK,
        organizations.into_iter().map(OrganizationView::from).collect(),
    )
}

#[utoipa::path(
    post,
    path = "/api/v1/organizations",
    request_body = CreateOrganizationRequest,
    tag = "Organizations",
    responses(
        (status = 201, body = IdView),
        (status = 400, description = "Missing name")
    )
)]
pub async fn create_organization(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateOrganizationRequest>,
) -> ApiResult<IdView> {
    if request.name.is_empty() {
        return Err(ApiError::bad_request("Name is required"));
    }

    let organization = state.db.create_organization(&request.name)?;
    tracing::info!(organization_id = organization.id, "Organization created");
    respond(StatusCode::CREATED, IdView::from(organization.id))
}

#[utoipa::path(
    get,
    path = "/api/v1/organizations/{organization_id}",
    params(("organization_id" = i64, Path, description = "Organization id")),
    tag = "Organizations",
    responses(
        (status = 200, body = OrganizationView),
        (status = 404, description = "Organization not found")
    )
)]
pub async fn get_organization(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<OrganizationView> {
    let id = parse_id(&id, "Invalid organization id")?;
    let organization = state.db.get_organization(id)?;
    respond(StatusCode::OK, OrganizationView::from(organization))
}

/// Deleting an organization also deletes its accounts.
#[utoipa::path(
    delete,
    path = "/api/v1/organizations/{organization_id}",
    params(("organization_id" = i64, Path, description = "Organization id")),
    tag = "Organizations",
    responses(
        (status = 202, body = IdView),
        (status = 404, description = "Organization not found")
    )
)]
pub async fn delete_organization(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<IdView> {
    let id = parse_id(&id, "Invalid organization id")?;
    state.db.delete_organization(id)?;
    tracing::info!(organization_id = id, "Organization deleted");
    respond(StatusCode::ACCEPTED, IdView::from(id))
}
