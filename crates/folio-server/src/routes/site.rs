//! Health, SEO and crawler routes

use crate::AppState;
use axum::extract::{Query, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::{IntoResponse, Json, Response};
use folio_core::sitemap::{render_robots, render_sitemap, sitemap_entries, SITEMAP_CACHE_CONTROL};
use serde_json::{json, Value};

pub async fn api_index() -> Json<Value> {
    Json(json!({
        "message": "Portfolio API is working fine!",
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn api_test() -> Json<Value> {
    Json(json!({
        "message": "API route is working!",
        "timestamp": chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        "service": "certificates-api",
    }))
}

/// The first `route` parameter wins when the key repeats.
pub async fn seo(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Json<Value> {
    let route = params
        .iter()
        .find(|(key, _)| key == "route")
        .map(|(_, value)| value.as_str());
    Json(json!({
        "success": true,
        "data": state.seo.payload(route),
    }))
}

pub async fn sitemap(State(state): State<AppState>) -> Response {
    let projects = state.content.backend_projects().await;
    let today = chrono::Utc::now().date_naive();
    let entries = sitemap_entries(&state.site, &projects, today);
    (
        [
            (CONTENT_TYPE, "application/xml"),
            (CACHE_CONTROL, SITEMAP_CACHE_CONTROL),
        ],
        render_sitemap(&state.site, &entries),
    )
        .into_response()
}

pub async fn robots(State(state): State<AppState>) -> Response {
    (
        [(CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_robots(&state.site),
    )
        .into_response()
}
