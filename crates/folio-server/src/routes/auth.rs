//! Login and token verification proxies

use super::proxy_response;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use folio_core::proxy::authorization_header;
use folio_core::{BackendRequest, FolioError, PassthroughPolicy};
use serde_json::Value;

pub const LOGIN_PATH: &str = "/auth/login";
pub const VERIFY_PATH: &str = "/auth/verify";

const NO_AUTHORIZATION_HEADER: &str = "No authorization header";

/// Relays the caller's JSON credentials. A body that is not JSON fails the
/// same way an unreachable backend does.
pub async fn login(State(state): State<AppState>, body: Bytes) -> Response {
    let outcome = match serde_json::from_slice::<Value>(&body) {
        Ok(credentials) => {
            state
                .backend
                .send(BackendRequest::post_json(LOGIN_PATH, credentials))
                .await
        }
        Err(e) => Err(FolioError::from(e)),
    };
    proxy_response(PassthroughPolicy::LOGIN.translate(outcome))
}

pub async fn verify(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let policy = PassthroughPolicy::VERIFY;
    let Some(authorization) = authorization_header(&headers) else {
        return proxy_response(policy.missing_credentials(NO_AUTHORIZATION_HEADER));
    };

    let outcome = state
        .backend
        .send(BackendRequest::get(VERIFY_PATH).with_authorization(authorization))
        .await;
    proxy_response(policy.translate(outcome))
}
