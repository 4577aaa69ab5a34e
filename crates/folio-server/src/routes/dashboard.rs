//! Content administration proxies
//!
//! Reads are public; mutations require an `Authorization` header, which is
//! forwarded untouched together with the caller's body and content type.

use super::proxy_response;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method};
use axum::response::Response;
use folio_core::content::{CERTIFICATES_PATH, PROJECTS_PATH};
use folio_core::proxy::authorization_header;
use folio_core::{BackendRequest, PassthroughPolicy, RequestBody};
use urlencoding::encode;

const AUTHORIZATION_REQUIRED: &str = "Authorization required";

/// Backend collection plus the policy for each operation on it.
struct Resource {
    collection: &'static str,
    list: PassthroughPolicy,
    fetch: PassthroughPolicy,
    create: PassthroughPolicy,
    update: PassthroughPolicy,
    delete: PassthroughPolicy,
}

impl Resource {
    fn item_path(&self, slug: &str) -> String {
        format!("{}/{}", self.collection, encode(slug))
    }
}

const PROJECTS: Resource = Resource {
    collection: PROJECTS_PATH,
    list: PassthroughPolicy::read("list projects", "Failed to fetch projects from backend"),
    fetch: PassthroughPolicy::read("fetch project", "Failed to fetch project from backend"),
    create: PassthroughPolicy::write("create project", "Failed to create project"),
    update: PassthroughPolicy::write("update project", "Failed to update project"),
    delete: PassthroughPolicy::delete("delete project", "Failed to delete project"),
};

const CERTIFICATES: Resource = Resource {
    collection: CERTIFICATES_PATH,
    list: PassthroughPolicy::read(
        "list certificates",
        "Failed to fetch certificates from backend",
    ),
    fetch: PassthroughPolicy::read(
        "fetch certificate",
        "Failed to fetch certificate from backend",
    ),
    create: PassthroughPolicy::write("create certificate", "Failed to create certificate"),
    update: PassthroughPolicy::write("update certificate", "Failed to update certificate"),
    delete: PassthroughPolicy::delete("delete certificate", "Failed to delete certificate"),
};

async fn read(state: &AppState, policy: PassthroughPolicy, path: String) -> Response {
    let outcome = state.backend.send(BackendRequest::get(path)).await;
    proxy_response(policy.translate(outcome))
}

/// Forwards an authorized mutation. Without credentials nothing reaches
/// the backend.
async fn mutate(
    state: &AppState,
    policy: PassthroughPolicy,
    method: Method,
    path: String,
    headers: &HeaderMap,
    body: Option<Bytes>,
) -> Response {
    let Some(authorization) = authorization_header(headers) else {
        log::warn!("Rejected {} without credentials", policy.operation);
        return proxy_response(policy.missing_credentials(AUTHORIZATION_REQUIRED));
    };

    let mut request = BackendRequest::new(method, path).with_authorization(authorization);
    if let Some(bytes) = body {
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        request = request.with_body(RequestBody::Raw {
            content_type,
            bytes,
        });
    }

    let outcome = state.backend.send(request).await;
    proxy_response(policy.translate(outcome))
}

pub async fn list_projects(State(state): State<AppState>) -> Response {
    read(&state, PROJECTS.list, PROJECTS.collection.to_string()).await
}

pub async fn create_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = PROJECTS.collection.to_string();
    mutate(&state, PROJECTS.create, Method::POST, path, &headers, Some(body)).await
}

pub async fn get_project(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    read(&state, PROJECTS.fetch, PROJECTS.item_path(&slug)).await
}

pub async fn update_project(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = PROJECTS.item_path(&slug);
    mutate(&state, PROJECTS.update, Method::PUT, path, &headers, Some(body)).await
}

pub async fn delete_project(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Response {
    let path = PROJECTS.item_path(&slug);
    mutate(&state, PROJECTS.delete, Method::DELETE, path, &headers, None).await
}

pub async fn get_certificate(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    read(&state, CERTIFICATES.fetch, CERTIFICATES.item_path(&slug)).await
}

pub async fn update_certificate(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = CERTIFICATES.item_path(&slug);
    mutate(&state, CERTIFICATES.update, Method::PUT, path, &headers, Some(body)).await
}

pub async fn delete_certificate(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Response {
    let path = CERTIFICATES.item_path(&slug);
    mutate(&state, CERTIFICATES.delete, Method::DELETE, path, &headers, None).await
}

pub async fn list_certificates(State(state): State<AppState>) -> Response {
    read(&state, CERTIFICATES.list, CERTIFICATES.collection.to_string()).await
}

pub async fn create_certificate(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = CERTIFICATES.collection.to_string();
    mutate(&state, CERTIFICATES.create, Method::POST, path, &headers, Some(body)).await
}
