// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # REST API
//!
//! Every route under `/api/v1` passes the observability pipeline; gated
//! groups additionally run an authorization pipeline before the handler.
//!
//! | Group | Gate |
//! |-------|------|
//! | status, login, published posts | none |
//! | `POST /accounts` | Admin, or anyone while no account exists |
//! | accounts, posts, organizations | Admin |
//! | `/me/...` | any authenticated caller |

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{Role, RoleRequired, RoleRequiredOrBootstrap, SelfOnly},
    models::{
        AccountView, ChangePasswordRequest, CreateAccountRequest, CreateOrganizationAccountRequest,
        CreateOrganizationRequest, IdView, LoginRequest, OrganizationAccountView,
        OrganizationLoginRequest, OrganizationView, PostView, StatusView, TokenView,
        UpdatePostRequest,
    },
    pipeline::{run_pipeline, AccessLog, Pipeline, Stage},
    state::AppState,
};

pub mod accounts;
pub mod extract;
pub mod login;
pub mod me;
pub mod organization_accounts;
pub mod organizations;
pub mod posts;
pub mod status;

pub fn router(state: AppState) -> Router {
    let observability = Pipeline::compose(vec![Arc::new(AccessLog)]);
    let v1 = v1_routes(&state).layer(middleware::from_fn_with_state(observability, run_pipeline));

    Router::new()
        .route("/status", get(status::get_status))
        .nest("/api/v1", v1)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

fn gate(stage: impl Stage) -> Pipeline {
    let stage: Arc<dyn Stage> = Arc::new(stage);
    Pipeline::compose(vec![stage])
}

fn v1_routes(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/status", get(status::get_status))
        .route("/login", post(login::login))
        .route("/organizations/login", post(login::organization_login))
        .route("/published_posts", get(posts::list_published_posts))
        .route("/published_posts/{id}", get(posts::get_published_post));

    let bootstrap = Router::new()
        .route("/accounts", post(accounts::create_account))
        .route_layer(middleware::from_fn_with_state(
            gate(RoleRequiredOrBootstrap::new(
                state.tokens.clone(),
                Role::Admin,
                state.bootstrap.clone(),
            )),
            run_pipeline,
        ));

    let admin = Router::new()
        .route("/accounts", get(accounts::list_accounts))
        .route(
            "/accounts/{id}",
            get(accounts::get_account).delete(accounts::delete_account),
        )
        .route(
            "/accounts/{id}/change_password",
            post(accounts::change_account_password),
        )
        .route("/posts", get(posts::list_posts))
        .route("/posts/{id}", get(posts::get_post).delete(posts::delete_post))
        .route(
            "/organizations",
            get(organizations::list_organizations).post(organizations::create_organization),
        )
        .route(
            "/organizations/{organization_id}",
            get(organizations::get_organization).delete(organizations::delete_organization),
        )
        .route(
            "/organizations/{organization_id}/accounts",
            get(organization_accounts::list_organization_accounts)
                .post(organization_accounts::create_organization_account),
        )
        .route(
            "/organizations/{organization_id}/accounts/{id}",
            get(organization_accounts::get_organization_account)
                .delete(organization_accounts::delete_organization_account),
        )
        .route(
            "/organizations/{organization_id}/accounts/{id}/change_password",
            post(organization_accounts::change_organization_account_password),
        )
        .route_layer(middleware::from_fn_with_state(
            gate(RoleRequired::new(state.tokens.clone(), Role::Admin)),
            run_pipeline,
        ));

    let me = Router::new()
        .route("/me", get(me::get_me))
        .route("/me/change_password", post(me::change_my_password))
        .route("/me/posts", get(me::list_my_posts).post(me::create_my_post))
        .route(
            "/me/posts/{id}",
            get(me::get_my_post)
                .put(me::update_my_post)
                .delete(me::delete_my_post),
        )
        .route_layer(middleware::from_fn_with_state(
            gate(SelfOnly::new(state.tokens.clone())),
            run_pipeline,
        ));

    public.merge(bootstrap).merge(admin).merge(me)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        status::get_status,
        login::login,
        login::organization_login,
        accounts::create_account,
        accounts::list_accounts,
        accounts::get_account,
        accounts::delete_account,
        accounts::change_account_password,
        me::get_me,
        me::change_my_password,
        me::list_my_posts,
        me::create_my_post,
        me::get_my_post,
        me::update_my_post,
        me::delete_my_post,
        posts::list_posts,
        posts::get_post,
        posts::delete_post,
        posts::list_published_posts,
        posts::get_published_post,
        organizations::list_organizations,
        organizations::create_organization,
        organizations::get_organization,
        organizations::delete_organization,
        organization_accounts::list_organization_accounts,
        organization_accounts::create_organization_account,
        organization_accounts::get_organization_account,
        organization_accounts::delete_organization_account,
        organization_accounts::change_organization_account_password
    ),
    components(
        schemas(
            IdView,
            StatusView,
            LoginRequest,
            OrganizationLoginRequest,
            TokenView,
            CreateAccountRequest,
            ChangePasswordRequest,
            AccountView,
            CreateOrganizationRequest,
            OrganizationView,
            CreateOrganizationAccountRequest,
            OrganizationAccountView,
            UpdatePostRequest,
            PostView
        )
    ),
    tags(
        (name = "Status", description = "Service status"),
        (name = "Auth", description = "Token issuance"),
        (name = "Accounts", description = "Top-level account management"),
        (name = "Me", description = "Self-service for the authenticated account"),
        (name = "Posts", description = "Post moderation and the public feed"),
        (name = "Organizations", description = "Organizations and their accounts")
    ),
    info(title = "Quill API")
)]
struct ApiDoc;
