// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer header parsing and axum extractors for the verified identity.
//!
//! Gates verify the token and attach the [`Identity`] to the request
//! extensions. Handlers read it back with an extractor:
//!
//! ```rust,ignore
//! async fn get_me(CurrentIdentity(identity): CurrentIdentity) -> impl IntoResponse {
//!     // identity.subject_id is the caller's account id
//! }
//! ```

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderValue},
};

use super::{AuthError, Identity, TokenCodec};

const BEARER_PREFIX: &str = "Bearer ";

/// Verify an `Authorization` header value and return the identity it carries.
///
/// The header must be exactly `Bearer <token>`: one space, case-sensitive
/// scheme, and a non-empty token without further spaces.
pub fn extract_identity(header: Option<&HeaderValue>, codec: &TokenCodec) -> Result<Identity, AuthError> {
    let header = match header {
        Some(value) if !value.is_empty() => value,
        _ => return Err(AuthError::HeaderMissing),
    };
    let header = header.to_str().map_err(|_| AuthError::HeaderMalformed)?;

    let token = header
        .strip_prefix(BEARER_PREFIX)
        .filter(|token| !token.is_empty() && !token.contains(' '))
        .ok_or(AuthError::HeaderMalformed)?;

    codec.decode(token)
}

/// Extractor for the identity attached by an authorization gate.
///
/// Rejects with 401 when no gate ran for this route.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(CurrentIdentity)
            .ok_or(AuthError::HeaderMissing)
    }
}

/// Optional identity extractor.
///
/// `None` on routes the bootstrap gate opened anonymously.
#[derive(Debug, Clone)]
pub struct MaybeIdentity(pub Option<Identity>);

impl<S> FromRequestParts<S> for MaybeIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeIdentity(parts.extensions.get::<Identity>().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{DisplayKey, Role, SigningSecret};
    use axum::http::Request;

    fn codec() -> TokenCodec {
        TokenCodec::new(&SigningSecret::from_bytes("extractor-secret".as_bytes()))
    }

    fn alice() -> Identity {
        Identity::new(4, DisplayKey::Username("alice".into()), Role::User)
    }

    fn header(value: &str) -> HeaderValue {
        HeaderValue::from_str(value).unwrap()
    }

    #[test]
    fn valid_bearer_header() {
        let codec = codec();
        let token = codec.issue(&alice()).unwrap();
        let value = header(&format!("Bearer {token}"));

        assert_eq!(extract_identity(Some(&value), &codec).unwrap(), alice());
    }

    #[test]
    fn missing_or_empty_header() {
        let codec = codec();
        assert!(matches!(extract_identity(None, &codec), Err(AuthError::HeaderMissing)));
        assert!(matches!(
            extract_identity(Some(&header("")), &codec),
            Err(AuthError::HeaderMissing)
        ));
    }

    #[test]
    fn wrong_scheme_is_malformed() {
        let codec = codec();
        for value in ["Token abc", "bearer abc", "Bearer", "Bearer ", "Bearer  abc", "Bearer a b"] {
            assert!(
                matches!(extract_identity(Some(&header(value)), &codec), Err(AuthError::HeaderMalformed)),
                "{value:?} should be malformed"
            );
        }
    }

    #[test]
    fn codec_errors_pass_through() {
        let codec = codec();
        let result = extract_identity(Some(&header("Bearer not-a-token")), &codec);
        assert!(matches!(result, Err(AuthError::TokenMalformed)));
    }

    fn parts() -> Parts {
        Request::builder().uri("/test").body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn current_identity_reads_extensions() {
        let mut parts = parts();
        parts.extensions.insert(alice());

        let CurrentIdentity(identity) = CurrentIdentity::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(identity, alice());
    }

    #[tokio::test]
    async fn current_identity_rejects_without_gate() {
        let mut parts = parts();
        let result = CurrentIdentity::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AuthError::HeaderMissing)));
    }

    #[tokio::test]
    async fn maybe_identity_is_optional() {
        let mut parts = parts();
        let MaybeIdentity(identity) = MaybeIdentity::from_request_parts(&mut parts, &()).await.unwrap();
        assert!(identity.is_none());

        parts.extensions.insert(alice());
        let MaybeIdentity(identity) = MaybeIdentity::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(identity, Some(alice()));
    }
}
