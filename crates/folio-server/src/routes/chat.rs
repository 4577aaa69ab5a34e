//! Chat relay for the public assistant page

use crate::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use folio_core::chat::{InboundChat, MISSING_MESSAGE_ERROR, MISSING_MESSAGE_REPLY};
use serde_json::json;

/// Answers 200 with displayable text whatever the backend does. Only a
/// request without a message is rejected.
pub async fn chat(State(state): State<AppState>, body: Bytes) -> Response {
    let request = serde_json::from_slice::<InboundChat>(&body)
        .map_err(|e| log::warn!("Unreadable chat request: {}", e))
        .ok()
        .and_then(InboundChat::into_request);

    let Some(request) = request else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": MISSING_MESSAGE_ERROR,
                "content": MISSING_MESSAGE_REPLY,
            })),
        )
            .into_response();
    };

    Json(state.chat.process_chat(&request).await).into_response()
}
