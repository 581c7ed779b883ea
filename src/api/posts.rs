// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Post moderation for admins and the public feed of published posts.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use super::extract::parse_id;
use crate::{
    error::{respond, ApiResult},
    models::{IdView, PostView},
    state::AppState,
    storage::Post,
};

fn view(state: &AppState, post: Post) -> ApiResult<PostView> {
    let author = state.db.get_account(post.account_id)?.username;
    respond(StatusCode::OK, PostView::new(post, author))
}

#[utoipa::path(
    get,
    path = "/api/v1/posts",
    tag = "Posts",
    responses((status = 200, body = [i64], description = "Ids of all posts"))
)]
pub async fn list_posts(State(state): State<AppState>) -> ApiResult<Vec<i64>> {
    let posts = state.db.list_posts()?;
    respond(StatusCode::OK, posts.into_iter().map(|post| post.id).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/posts/{id}",
    params(("id" = i64, Path, description = "Post id")),
    tag = "Posts",
    responses(
        (status = 200, body = PostView),
        (status = 404, description = "Post not found")
    )
)]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<PostView> {
    let id = parse_id(&id, "Invalid id")?;
    let post = state.db.get_post(id)?;
    view(&state, post)
}

#[utoipa::path(
    delete,
    path = "/api/v1/posts/{id}",
    params(("id" = i64, Path, description = "Post id")),
    tag = "Posts",
    responses(
        (status = 202, body = IdView),
        (status = 404, description = "Post not found")
    )
)]
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<IdView> {
    let id = parse_id(&id, "Invalid id")?;
    state.db.delete_post(id)?;
    tracing::info!(post_id = id, "Post removed by admin");
    respond(StatusCode::ACCEPTED, IdView::from(id))
}

#[utoipa::path(
    get,
    path = "/api/v1/published_posts",
    tag = "Posts",
    responses((status = 200, body = [i64], description = "Ids of published posts"))
)]
pub async fn list_published_posts(State(state): State<AppState>) -> ApiResult<Vec<i64>> {
    let posts = state.db.list_published_posts()?;
    respond(StatusCode::OK, posts.into_iter().map(|post| post.id).collect())
}

/// Drafts are reported as not found.
#[utoipa::path(
    get,
    path = "/api/v1/published_posts/{id}",
    params(("id" = i64, Path, description = "Post id")),
    tag = "Posts",
    responses(
        (status = 200, body = PostView),
        (status = 404, description = "Post not found or not published")
    )
)]
pub async fn get_published_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<PostView> {
    let id = parse_id(&id, "Invalid id")?;
    let post = state.db.get_published_post(id)?;
    view(&state, post)
}
