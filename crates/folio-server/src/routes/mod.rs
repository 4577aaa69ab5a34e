//! Route tables for the two surfaces

pub mod auth;
pub mod chat;
pub mod content;
pub mod dashboard;
pub mod site;

use crate::{AppState, ServerError};
use axum::http::Uri;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use folio_core::ProxyReply;

/// Public portfolio API.
pub fn frontend_router() -> Router<AppState> {
    Router::new()
        .route("/api", get(site::api_index))
        .route("/api/test", get(site::api_test))
        .route("/api/seo", get(site::seo))
        .route("/api/chat", post(chat::chat))
        .route("/api/projects", get(content::projects))
        .route("/api/projects/{slug}", get(content::project))
        .route("/api/certificates", get(content::certificates))
        .route("/api/sitemap", get(site::sitemap))
        .route("/sitemap.xml", get(site::sitemap))
        .route("/robots.txt", get(site::robots))
}

/// Admin API. Every route is a proxy to the backend.
pub fn dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/verify", get(auth::verify))
        .route(
            "/api/projects",
            get(dashboard::list_projects).post(dashboard::create_project),
        )
        .route(
            "/api/projects/{slug}",
            get(dashboard::get_project)
                .put(dashboard::update_project)
                .delete(dashboard::delete_project),
        )
        .route(
            "/api/certificates",
            get(dashboard::list_certificates).post(dashboard::create_certificate),
        )
        .route(
            "/api/certificates/{slug}",
            get(dashboard::get_certificate)
                .put(dashboard::update_certificate)
                .delete(dashboard::delete_certificate),
        )
}

pub async fn not_found(uri: Uri) -> ServerError {
    ServerError::not_found(uri.path())
}

pub(crate) fn proxy_response(reply: ProxyReply) -> Response {
    match reply.body {
        Some(body) => (reply.status, Json(body)).into_response(),
        None => reply.status.into_response(),
    }
}
