// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Self-service routes for the authenticated caller.
//!
//! Only top-level accounts (users and admins) own posts and passwords here;
//! organization members are turned away. Post routes additionally check
//! that the addressed post belongs to the caller, admins included.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;

use super::{
    accounts::set_password,
    extract::{parse_id, JsonBody},
};
use crate::{
    auth::{CurrentIdentity, Identity},
    error::{respond, ApiError, ApiResult, OWNERSHIP_FORBIDDEN_MESSAGE},
    models::{AccountView, ChangePasswordRequest, IdView, PostView, UpdatePostRequest},
    state::AppState,
    storage::{OwnershipCheck, PostStatus, PostUpdate},
};

fn require_account_holder(identity: &Identity) -> Result<(), ApiError> {
    if identity.role.is_top_level() {
        Ok(())
    } else {
        Err(ApiError::forbidden(OWNERSHIP_FORBIDDEN_MESSAGE))
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/me",
    tag = "Me",
    responses(
        (status = 200, body = AccountView),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn get_me(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
) -> ApiResult<AccountView> {
    require_account_holder(&identity)?;
    let account = state.db.get_account(identity.subject_id)?;
    respond(StatusCode::OK, AccountView::from(account))
}

#[utoipa::path(
    post,
    path = "/api/v1/me/change_password",
    request_body = ChangePasswordRequest,
    tag = "Me",
    responses(
        (status = 200, body = IdView),
        (status = 400, description = "Missing or weak password")
    )
)]
pub async fn change_my_password(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    JsonBody(request): JsonBody<ChangePasswordRequest>,
) -> ApiResult<IdView> {
    require_account_holder(&identity)?;
    state.db.get_account(identity.subject_id)?;
    set_password(&state, identity.subject_id, &request.password).await
}

#[utoipa::path(
    get,
    path = "/api/v1/me/posts",
    tag = "Me",
    responses((status = 200, body = [i64], description = "Ids of the caller's posts"))
)]
pub async fn list_my_posts(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
) -> ApiResult<Vec<i64>> {
    require_account_holder(&identity)?;
    let posts = state.db.list_posts_by_account(identity.subject_id)?;
    respond(StatusCode::OK, posts.into_iter().map(|post| post.id).collect())
}

/// Start a new empty draft.
#[utoipa::path(
    post,
    path = "/api/v1/me/posts",
    tag = "Me",
    responses((status = 201, body = IdView))
)]
pub async fn create_my_post(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
) -> ApiResult<IdView> {
    require_account_holder(&identity)?;
    let post = state.db.create_post(identity.subject_id, Utc::now())?;
    tracing::info!(post_id = post.id, account_id = identity.subject_id, "Post created");
    respond(StatusCode::CREATED, IdView::from(post.id))
}

#[utoipa::path(
    get,
    path = "/api/v1/me/posts/{id}",
    params(("id" = i64, Path, description = "Post id")),
    tag = "Me",
    responses(
        (status = 200, body = PostView),
        (status = 403, description = "Post belongs to another account"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn get_my_post(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<String>,
) -> ApiResult<PostView> {
    require_account_holder(&identity)?;
    let id = parse_id(&id, "Invalid id")?;
    let post = state.db.get_post(id).verify_owner(&identity)?;
    let author = state.db.get_account(post.account_id)?.username;
    respond(StatusCode::OK, PostView::new(post, author))
}

/// Replace a post's title, content and status.
#[utoipa::path(
    put,
    path = "/api/v1/me/posts/{id}",
    params(("id" = i64, Path, description = "Post id")),
    request_body = UpdatePostRequest,
    tag = "Me",
    responses(
        (status = 200, body = IdView),
        (status = 400, description = "Invalid body or status"),
        (status = 403, description = "Post belongs to another account"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn update_my_post(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdatePostRequest>,
) -> ApiResult<IdView> {
    require_account_holder(&identity)?;
    let id = parse_id(&id, "Invalid id")?;
    state.db.get_post(id).verify_owner(&identity)?;

    let status: PostStatus = request
        .status
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid status"))?;
    state.db.update_post(
        id,
        PostUpdate {
            title: request.title,
            content: request.content,
            status,
        },
    )?;
    respond(StatusCode::OK, IdView::from(id))
}

#[utoipa::path(
    delete,
    path = "/api/v1/me/posts/{id}",
    params(("id" = i64, Path, description = "Post id")),
    tag = "Me",
    responses(
        (status = 202, body = IdView),
        (status = 403, description = "Post belongs to another account"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn delete_my_post(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<String>,
) -> ApiResult<IdView> {
    require_account_holder(&identity)?;
    let id = parse_id(&id, "Invalid id")?;
    state.db.get_post(id).verify_owner(&identity)?;
    state.db.delete_post(id)?;
    tracing::info!(post_id = id, account_id = identity.subject_id, "Post deleted");
    respond(StatusCode::ACCEPTED, IdView::from(id))
}
