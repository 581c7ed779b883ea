// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Access log stage.

use std::time::Instant;

use axum::{extract::Request, response::Response};

use super::{BoxFuture, Next, Stage};

/// Logs one line per request once the response is ready.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessLog;

impl Stage for AccessLog {
    fn handle<'a>(&'a self, request: Request, next: Next<'a>) -> BoxFuture<'a, Response> {
        Box::pin(async move {
            let method = request.method().clone();
            let path = request.uri().path().to_owned();
            let request_id = request
                .headers()
                .get("x-request-id")
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            let started = Instant::now();

            let response = next.run(request).await;

            let status = response.status();
            let latency_ms = started.elapsed().as_millis() as u64;
            let request_id = request_id.as_deref().unwrap_or("-");
            if status.is_server_error() {
                tracing::warn!(%method, %path, status = status.as_u16(), latency_ms, request_id, "Request failed");
            } else {
                tracing::info!(%method, %path, status = status.as_u16(), latency_ms, request_id, "Request handled");
            }

            response
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Pipeline;
    use axum::{body::Body, http::StatusCode, response::IntoResponse};
    use std::sync::Arc;

    #[tokio::test]
    async fn passes_response_through_unchanged() {
        let pipeline = Pipeline::compose(vec![Arc::new(AccessLog)]);
        let response = pipeline
            .run(Request::new(Body::empty()), |_request| async {
                (StatusCode::ACCEPTED, "done").into_response()
            })
            .await;

        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }
}
