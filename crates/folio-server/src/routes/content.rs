//! Public content reads. Always answer, from the backend or the demo catalog.

use crate::AppState;
use axum::extract::{Path, State};
use axum::http::header::{HeaderName, CACHE_CONTROL};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use folio_core::content::{CONTENT_CACHE_CONTROL, DATA_SOURCE_HEADER};
use folio_core::Sourced;
use serde_json::json;

fn sourced_response(sourced: Sourced) -> Response {
    (
        StatusCode::OK,
        [
            (CACHE_CONTROL, CONTENT_CACHE_CONTROL),
            (
                HeaderName::from_static(DATA_SOURCE_HEADER),
                sourced.source.as_str(),
            ),
        ],
        Json(sourced.body),
    )
        .into_response()
}

pub async fn projects(State(state): State<AppState>) -> Response {
    sourced_response(state.content.projects().await)
}

pub async fn certificates(State(state): State<AppState>) -> Response {
    sourced_response(state.content.certificates().await)
}

pub async fn project(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match state.content.project(&slug).await {
        Some(sourced) => sourced_response(sourced),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Project not found" })),
        )
            .into_response(),
    }
}
