// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Request Pipeline
//!
//! A pipeline is an ordered list of [`Stage`]s wrapped around an endpoint.
//! The first stage is the outermost: its code before `next.run(..)` runs
//! first and its code after it runs last.
//!
//! ```text
//! compose([Outer, Inner]):
//!   Outer.pre → Inner.pre → endpoint → Inner.post → Outer.post
//! ```
//!
//! A [`Pipeline`] is itself a [`Stage`], so pipelines nest. Mount one on an
//! axum router with [`run_pipeline`]:
//!
//! ```rust,ignore
//! let gate = Pipeline::compose(vec![Arc::new(RoleRequired::new(codec, Role::Admin))]);
//! let admin = Router::new()
//!     .route("/accounts", get(list_accounts))
//!     .route_layer(axum::middleware::from_fn_with_state(gate, run_pipeline));
//! ```

use std::{future::Future, pin::Pin, sync::Arc};

use axum::{
    extract::{Request, State},
    middleware,
    response::Response,
};

pub mod access_log;

pub use access_log::AccessLog;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One cross-cutting step of request handling.
///
/// A stage either short-circuits by returning a response itself, or calls
/// `next.run(request)` and may inspect or alter what comes back.
pub trait Stage: Send + Sync + 'static {
    fn handle<'a>(&'a self, request: Request, next: Next<'a>) -> BoxFuture<'a, Response>;
}

type Endpoint<'a> = Box<dyn FnOnce(Request) -> BoxFuture<'a, Response> + Send + 'a>;

/// The remainder of a pipeline, handed to each stage.
pub struct Next<'a> {
    stages: &'a [Arc<dyn Stage>],
    endpoint: Endpoint<'a>,
}

impl<'a> Next<'a> {
    /// Run the remaining stages and then the endpoint.
    pub fn run(self, request: Request) -> BoxFuture<'a, Response> {
        match self.stages.split_first() {
            Some((stage, rest)) => stage.handle(
                request,
                Next {
                    stages: rest,
                    endpoint: self.endpoint,
                },
            ),
            None => (self.endpoint)(request),
        }
    }
}

/// Ordered composition of stages, outermost first.
#[derive(Clone)]
pub struct Pipeline {
    stages: Arc<[Arc<dyn Stage>]>,
}

impl Pipeline {
    /// Compose stages so that `stages[0]` wraps everything after it.
    ///
    /// Composition never fails; an empty pipeline passes requests straight
    /// to the endpoint.
    pub fn compose(stages: Vec<Arc<dyn Stage>>) -> Self {
        Self {
            stages: stages.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run `request` through every stage, then `endpoint`.
    pub fn run<'a, F, Fut>(&'a self, request: Request, endpoint: F) -> BoxFuture<'a, Response>
    where
        F: FnOnce(Request) -> Fut + Send + 'a,
        Fut: Future<Output = Response> + Send + 'a,
    {
        Next {
            stages: &self.stages,
            endpoint: Box::new(move |request| Box::pin(endpoint(request))),
        }
        .run(request)
    }
}

impl Stage for Pipeline {
    fn handle<'a>(&'a self, request: Request, next: Next<'a>) -> BoxFuture<'a, Response> {
        self.run(request, move |request| next.run(request))
    }
}

/// Axum middleware function running a [`Pipeline`] in front of the router.
pub async fn run_pipeline(
    State(pipeline): State<Pipeline>,
    request: Request,
    next: middleware::Next,
) -> Response {
    pipeline.run(request, move |request| next.run(request)).await
}
