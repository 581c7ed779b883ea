// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Accounts that belong to an organization.
//!
//! Organization accounts log in by email and carry the organization member
//! role. An account addressed under the wrong organization is not found.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use super::extract::{parse_id, JsonBody};
use crate::{
    auth::{validate_password_strength, PASSWORD_POLICY_MESSAGE},
    error::{respond, ApiError, ApiResult},
    models::{
        ChangePasswordRequest, CreateOrganizationAccountRequest, IdView, OrganizationAccountView,
    },
    state::AppState,
};

const INVALID_ORGANIZATION_ID: &str = "Invalid organization id";

fn parse_path(organization_id: &str, id: &str) -> Result<(i64, i64), ApiError> {
    Ok((
        parse_id(organization_id, INVALID_ORGANIZATION_ID)?,
        parse_id(id, "Invalid id")?,
    ))
}

fn check_password(password: &str) -> Result<(), ApiError> {
    if password.is_empty() {
        return Err(ApiError::bad_request("Password is required"));
    }
    if !validate_password_strength(password) {
        return Err(ApiError::bad_request(PASSWORD_POLICY_MESSAGE));
    }
    Ok(())
}

#[utoipa::path(
    get,
    path = "/api/v1/organizations/{organization_id}/accounts",
    params(("organization_id" = i64, Path, description = "Organization id")),
    tag = "Organizations",
    responses(
        (status = 200, body = [OrganizationAccountView]),
        (status = 404, description = "Organization not found")
    )
)]
pub async fn list_organization_accounts(
    State(state): State<AppState>,
    Path(organization_id): Path<String>,
) -> ApiResult<Vec<OrganizationAccountView>> {
    let organization_id = parse_id(&organization_id, INVALID_ORGANIZATION_ID)?;
    let members = state.db.list_organization_accounts(organization_id)?;
    respond(
        StatusCode::OK,
        members.into_iter().map(OrganizationAccountView::from).collect(),
    )
}

#[utoipa::path(
    post,
    path = "/api/v1/organizations/{organization_id}/accounts",
    params(("organization_id" = i64, Path, description = "Organization id")),
    request_body = CreateOrganizationAccountRequest,
    tag = "Organizations",
    responses(
        (status = 201, body = IdView),
        (status = 400, description = "Missing field or weak password"),
        (status = 404, description = "Organization not found"),
        (status = 409, description = "Email taken")
    )
)]
pub async fn create_organization_account(
    State(state): State<AppState>,
    Path(organization_id): Path<String>,
    JsonBody(request): JsonBody<CreateOrganizationAccountRequest>,
) -> ApiResult<IdView> {
    let organization_id = parse_id(&organization_id, INVALID_ORGANIZATION_ID)?;
    if request.email.is_empty() {
        return Err(ApiError::bad_request("Email is required"));
    }
    check_password(&request.password)?;

    let hash = state.passwords.hash(&request.password).await?;
    let member = state
        .db
        .create_organization_account(organization_id, &request.email, &hash)?;
    tracing::info!(
        organization_id,
        organization_account_id = member.id,
        "Organization account created"
    );
    respond(StatusCode::CREATED, IdView::from(member.id))
}

#[utoipa::path(
    get,
    path = "/api/v1/organizations/{organization_id}/accounts/{id}",
    params(
        ("organization_id" = i64, Path, description = "Organization id"),
        ("id" = i64, Path, description = "Organization account id")
    ),
    tag = "Organizations",
    responses(
        (status = 200, body = OrganizationAccountView),
        (status = 404, description = "Organization account not found")
    )
)]
pub async fn get_organization_account(
    State(state): State<AppState>,
    Path((organization_id, id)): Path<(String, String)>,
) -> ApiResult<OrganizationAccountView> {
    let (organization_id, id) = parse_path(&organization_id, &id)?;
    let member = state.db.get_organization_account(organization_id, id)?;
    respond(StatusCode::OK, OrganizationAccountView::from(member))
}

#[utoipa::path(
    delete,
    path = "/api/v1/organizations/{organization_id}/accounts/{id}",
    params(
        ("organization_id" = i64, Path, description = "Organization id"),
        ("id" = i64, Path, description = "Organization account id")
    ),
    tag = "Organizations",
    responses(
        (status = 202, body = IdView),
        (status = 404, description = "Organization account not found")
    )
)]
pub async fn delete_organization_account(
    State(state): State<AppState>,
    Path((organization_id, id)): Path<(String, String)>,
) -> ApiResult<IdView> {
    let (organization_id, id) = parse_path(&organization_id, &id)?;
    state.db.delete_organization_account(organization_id, id)?;
    tracing::info!(organization_id, organization_account_id = id, "Organization account deleted");
    respond(StatusCode::ACCEPTED, IdView::from(id))
}

#[utoipa::path(
    post,
    path = "/api/v1/organizations/{organization_id}/accounts/{id}/change_password",
    params(
        ("organization_id" = i64, Path, description = "Organization id"),
        ("id" = i64, Path, description = "Organization account id")
    ),
    request_body = ChangePasswordRequest,
    tag = "Organizations",
    responses(
        (status = 200, body = IdView),
        (status = 400, description = "Missing or weak password"),
        (status = 404, description = "Organization account not found")
    )
)]
pub async fn change_organization_account_password(
    State(state): State<AppState>,
    Path((organization_id, id)): Path<(String, String)>,
    JsonBody(request): JsonBody<ChangePasswordRequest>,
) -> ApiResult<IdView> {
    let (organization_id, id) = parse_path(&organization_id, &id)?;
    state.db.get_organization_account(organization_id, id)?;
    check_password(&request.password)?;

    let hash = state.passwords.hash(&request.password).await?;
    state
        .db
        .update_organization_account_password(organization_id, id, &hash)?;
    tracing::info!(organization_id, organization_account_id = id, "Password changed");
    respond(StatusCode::OK, IdView::from(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::test_state;
    use axum::Json;

    fn member(email: &str, password: &str) -> JsonBody<CreateOrganizationAccountRequest> {
        JsonBody(CreateOrganizationAccountRequest {
            email: email.into(),
            password: password.into(),
        })
    }

    #[tokio::test]
    async fn members_are_scoped_to_their_organization() {
        let (_dir, state) = test_state();
        let acme = state.db.create_organization("Acme").unwrap();
        let globex = state.db.create_organization("Globex").unwrap();

        let (status, Json(created)) = create_organization_account(
            State(state.clone()),
            Path(acme.id.to_string()),
            member("ops@acme.test", "Secret123"),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        let id = created.result.id;

        let (_, Json(view)) = get_organization_account(
            State(state.clone()),
            Path((acme.id.to_string(), id.to_string())),
        )
        .await
        .unwrap();
        assert_eq!(view.result.email, "ops@acme.test");

        let error = get_organization_account(
            State(state.clone()),
            Path((globex.id.to_string(), id.to_string())),
        )
        .await
        .unwrap_err();
        assert_eq!(error.status, StatusCode::NOT_FOUND);

        let (_, Json(list)) = list_organization_accounts(State(state), Path(globex.id.to_string()))
            .await
            .unwrap();
        assert!(list.result.is_empty());
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let (_dir, state) = test_state();
        let acme = state.db.create_organization("Acme").unwrap();
        create_organization_account(
            State(state.clone()),
            Path(acme.id.to_string()),
            member("ops@acme.test", "Secret123"),
        )
        .await
        .unwrap();

        let error = create_organization_account(
            State(state),
            Path(acme.id.to_string()),
            member("ops@acme.test", "Secret123"),
        )
        .await
        .unwrap_err();
        assert_eq!(error.status, StatusCode::CONFLICT);
        assert_eq!(error.message, "Account already exists");
    }

    #[tokio::test]
    async fn create_validates_path_and_fields() {
        let (_dir, state) = test_state();
        let acme = state.db.create_organization("Acme").unwrap();

        let error = create_organization_account(
            State(state.clone()),
            Path("acme".into()),
            member("ops@acme.test", "Secret123"),
        )
        .await
        .unwrap_err();
        assert_eq!(error.message, INVALID_ORGANIZATION_ID);

        let error = create_organization_account(State(state.clone()), Path(acme.id.to_string()), member("", ""))
            .await
            .unwrap_err();
        assert_eq!(error.message, "Email is required");

        let error = create_organization_account(
            State(state),
            Path(acme.id.to_string()),
            member("ops@acme.test", "weak"),
        )
        .await
        .unwrap_err();
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert_eq!(error.message, PASSWORD_POLICY_MESSAGE);
    }

    #[tokio::test]
    async fn change_password_and_delete() {
        let (_dir, state) = test_state();
        let acme = state.db.create_organization("Acme").unwrap();
        let created = state
            .db
            .create_organization_account(acme.id, "ops@acme.test", "old-hash")
            .unwrap();
        let path = || Path((acme.id.to_string(), created.id.to_string()));

        let (status, _) = change_organization_account_password(
            State(state.clone()),
            path(),
            JsonBody(ChangePasswordRequest {
                password: "Rotated99".into(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::OK);
        let stored = state.db.get_organization_account(acme.id, created.id).unwrap();
        assert!(state.passwords.verify("Rotated99", &stored.password_hash).await.unwrap());

        let (status, _) = delete_organization_account(State(state.clone()), path())
            .await
            .unwrap();
        assert_eq!(status, StatusCode::ACCEPTED);
        assert!(state.db.get_organization_account_by_email("ops@acme.test").unwrap().is_none());
    }
}
