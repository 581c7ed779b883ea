// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authorization gates.
//!
//! Each gate is a pipeline [`Stage`]. On success it inserts the verified
//! [`Identity`] into the request extensions and runs the rest of the
//! pipeline; on failure it answers with the JSON error and the handler
//! never runs.
//!
//! | Gate | No/invalid token | Wrong role | Empty store |
//! |------|------------------|------------|-------------|
//! | [`RoleRequired`] | 401 | 403 | - |
//! | [`SelfOnly`] | 401 | - | - |
//! | [`RoleRequiredOrBootstrap`] | 401 | 403 | admitted anonymously |

use std::sync::Arc;

use axum::{
    extract::Request,
    http::header::AUTHORIZATION,
    response::{IntoResponse, Response},
};

use super::{extract_identity, AuthError, BootstrapPolicy, Identity, Role, TokenCodec};
use crate::pipeline::{BoxFuture, Next, Stage};

fn authenticate(codec: &TokenCodec, request: &Request) -> Result<Identity, AuthError> {
    extract_identity(request.headers().get(AUTHORIZATION), codec)
}

fn authorize(codec: &TokenCodec, request: &Request, role: Role) -> Result<Identity, AuthError> {
    let identity = authenticate(codec, request)?;
    if !identity.has_role(role) {
        return Err(AuthError::RoleInsufficient(role));
    }
    Ok(identity)
}

async fn admit(mut request: Request, identity: Identity, next: Next<'_>) -> Response {
    tracing::debug!(subject_id = identity.subject_id, role = %identity.role, "Request authorized");
    request.extensions_mut().insert(identity);
    next.run(request).await
}

/// Admits callers holding exactly `role`.
pub struct RoleRequired {
    codec: Arc<TokenCodec>,
    role: Role,
}

impl RoleRequired {
    pub fn new(codec: Arc<TokenCodec>, role: Role) -> Self {
        Self { codec, role }
    }
}

impl Stage for RoleRequired {
    fn handle<'a>(&'a self, request: Request, next: Next<'a>) -> BoxFuture<'a, Response> {
        Box::pin(async move {
            match authorize(&self.codec, &request, self.role) {
                Ok(identity) => admit(request, identity, next).await,
                Err(e) => e.into_response(),
            }
        })
    }
}

/// Admits any authenticated caller.
///
/// Handlers behind this gate must check ownership of the records they touch.
pub struct SelfOnly {
    codec: Arc<TokenCodec>,
}

impl SelfOnly {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }
}

impl Stage for SelfOnly {
    fn handle<'a>(&'a self, request: Request, next: Next<'a>) -> BoxFuture<'a, Response> {
        Box::pin(async move {
            match authenticate(&self.codec, &request) {
                Ok(identity) => admit(request, identity, next).await,
                Err(e) => e.into_response(),
            }
        })
    }
}

/// Admits callers holding `role`, or anyone while no account exists.
///
/// Requests admitted through the bootstrap path carry no identity; the
/// handler sees `MaybeIdentity(None)`.
pub struct RoleRequiredOrBootstrap {
    codec: Arc<TokenCodec>,
    role: Role,
    policy: BootstrapPolicy,
}

impl RoleRequiredOrBootstrap {
    pub fn new(codec: Arc<TokenCodec>, role: Role, policy: BootstrapPolicy) -> Self {
        Self { codec, role, policy }
    }
}

impl Stage for RoleRequiredOrBootstrap {
    fn handle<'a>(&'a self, request: Request, next: Next<'a>) -> BoxFuture<'a, Response> {
        Box::pin(async move {
            match self.policy.is_population_empty().await {
                Ok(true) => {
                    tracing::info!("No accounts yet, admitting bootstrap request");
                    next.run(request).await
                }
                Ok(false) => match authorize(&self.codec, &request, self.role) {
                    Ok(identity) => admit(request, identity, next).await,
                    Err(e) => e.into_response(),
                },
                Err(e) => e.into_response(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::bootstrap::tests::{BrokenCensus, FixedCensus};
    use crate::auth::{DisplayKey, SigningSecret};
    use crate::pipeline::Pipeline;
    use axum::{body::Body, http::StatusCode};
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    };

    fn codec() -> Arc<TokenCodec> {
        Arc::new(TokenCodec::new(&SigningSecret::from_bytes("gate-secret".as_bytes())))
    }

    fn identity(id: i64, role: Role) -> Identity {
        Identity::new(id, DisplayKey::Username(format!("user{id}")), role)
    }

    fn bearer(codec: &TokenCodec, identity: &Identity) -> String {
        format!("Bearer {}", codec.issue(identity).unwrap())
    }

    /// Outcome of one request through a gate.
    struct Outcome {
        status: StatusCode,
        body: serde_json::Value,
        calls: usize,
        seen: Option<Identity>,
    }

    async fn call(gate: Arc<dyn Stage>, authorization: Option<String>) -> Outcome {
        let pipeline = Pipeline::compose(vec![gate]);
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(None));

        let mut builder = axum::http::Request::builder().uri("/test");
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        let request = builder.body(Body::empty()).unwrap();

        let (handler_calls, handler_seen) = (calls.clone(), seen.clone());
        let response = pipeline
            .run(request, move |request| async move {
                handler_calls.fetch_add(1, Ordering::SeqCst);
                *handler_seen.lock().unwrap() = request.extensions().get::<Identity>().cloned();
                StatusCode::OK.into_response()
            })
            .await;

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        let seen = seen.lock().unwrap().clone();
        Outcome {
            status,
            body,
            calls: calls.load(Ordering::SeqCst),
            seen,
        }
    }

    #[tokio::test]
    async fn role_required_admits_matching_role_once() {
        let codec = codec();
        let admin = identity(1, Role::Admin);
        let gate = Arc::new(RoleRequired::new(codec.clone(), Role::Admin));

        let outcome = call(gate, Some(bearer(&codec, &admin))).await;

        assert_eq!(outcome.status, StatusCode::OK);
        assert_eq!(outcome.calls, 1);
        assert_eq!(outcome.seen, Some(admin));
    }

    #[tokio::test]
    async fn role_required_rejects_other_role() {
        let codec = codec();
        let gate = Arc::new(RoleRequired::new(codec.clone(), Role::Admin));

        let outcome = call(gate, Some(bearer(&codec, &identity(2, Role::User)))).await;

        assert_eq!(outcome.status, StatusCode::FORBIDDEN);
        assert_eq!(outcome.body["error"], "forbidden: admin access required");
        assert_eq!(outcome.calls, 0);
    }

    #[tokio::test]
    async fn role_required_rejects_missing_header() {
        let gate = Arc::new(RoleRequired::new(codec(), Role::Admin));

        let outcome = call(gate, None).await;

        assert_eq!(outcome.status, StatusCode::UNAUTHORIZED);
        assert_eq!(outcome.body["error"], "auth failed: authorization header not found");
        assert_eq!(outcome.calls, 0);
    }

    #[tokio::test]
    async fn role_required_rejects_token_from_other_secret() {
        let other = TokenCodec::new(&SigningSecret::from_bytes("other".as_bytes()));
        let gate = Arc::new(RoleRequired::new(codec(), Role::Admin));

        let outcome = call(gate, Some(bearer(&other, &identity(1, Role::Admin)))).await;

        assert_eq!(outcome.status, StatusCode::UNAUTHORIZED);
        assert_eq!(outcome.calls, 0);
    }

    #[tokio::test]
    async fn self_only_admits_any_role() {
        let codec = codec();
        for role in [Role::User, Role::Admin, Role::OrganizationMember] {
            let caller = identity(5, role);
            let outcome = call(Arc::new(SelfOnly::new(codec.clone())), Some(bearer(&codec, &caller))).await;

            assert_eq!(outcome.status, StatusCode::OK);
            assert_eq!(outcome.seen, Some(caller));
        }
    }

    #[tokio::test]
    async fn self_only_rejects_wrong_scheme() {
        let outcome = call(Arc::new(SelfOnly::new(codec())), Some("Token abc".into())).await;

        assert_eq!(outcome.status, StatusCode::UNAUTHORIZED);
        assert!(outcome.body["error"].as_str().unwrap().starts_with("auth failed:"));
    }

    fn bootstrap_gate(codec: Arc<TokenCodec>, accounts: u64) -> Arc<dyn Stage> {
        let census = FixedCensus::default();
        census.0.store(accounts, Ordering::SeqCst);
        let policy = BootstrapPolicy::new(Arc::new(census));
        Arc::new(RoleRequiredOrBootstrap::new(codec, Role::Admin, policy))
    }

    #[tokio::test]
    async fn bootstrap_admits_anonymous_on_empty_store() {
        let outcome = call(bootstrap_gate(codec(), 0), None).await;

        assert_eq!(outcome.status, StatusCode::OK);
        assert_eq!(outcome.calls, 1);
        assert_eq!(outcome.seen, None);
    }

    #[tokio::test]
    async fn bootstrap_closed_once_populated() {
        let codec = codec();

        let anonymous = call(bootstrap_gate(codec.clone(), 1), None).await;
        assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

        let user = call(bootstrap_gate(codec.clone(), 1), Some(bearer(&codec, &identity(2, Role::User)))).await;
        assert_eq!(user.status, StatusCode::FORBIDDEN);
        assert_eq!(user.body["error"], "forbidden: admin access required");

        let admin = identity(1, Role::Admin);
        let outcome = call(bootstrap_gate(codec.clone(), 1), Some(bearer(&codec, &admin))).await;
        assert_eq!(outcome.status, StatusCode::OK);
        assert_eq!(outcome.seen, Some(admin));
    }

    #[tokio::test]
    async fn bootstrap_store_failure_is_500() {
        let policy = BootstrapPolicy::new(Arc::new(BrokenCensus));
        let gate = Arc::new(RoleRequiredOrBootstrap::new(codec(), Role::Admin, policy));

        let outcome = call(gate, None).await;

        assert_eq!(outcome.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(outcome.body["error"], "internal error");
        assert_eq!(outcome.calls, 0);
    }
}
