//! Error types for the folio server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use folio_core::FolioError;
use serde_json::json;
use thiserror::Error;

/// Result type alias for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;

/// Errors raised while configuring or running the server. Route handlers
/// answer backend problems themselves and never surface these.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Core library error
    #[error(transparent)]
    Core(#[from] FolioError),

    /// No route matches the request
    #[error("Not found: {0}")]
    NotFound(String),

    /// Server configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ServerError::NotFound(_) => 404,
            ServerError::Core(_) | ServerError::Config(_) | ServerError::Internal(_) => 500,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            ServerError::Core(_) => "core_error",
            ServerError::NotFound(_) => "not_found",
            ServerError::Config(_) => "config_error",
            ServerError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            log::error!("{}", self);
        }
        let body = json!({
            "error": self.to_string(),
            "type": self.error_type(),
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ServerError::config_error("bad").status_code(), 500);
        assert_eq!(ServerError::internal("boom").status_code(), 500);
        assert_eq!(ServerError::not_found("/nope").status_code(), 404);

        let core = ServerError::from(FolioError::Config("x".into()));
        assert_eq!(core.status_code(), 500);
        assert_eq!(core.error_type(), "core_error");
    }

    #[tokio::test]
    async fn test_into_response_body() {
        let response = ServerError::not_found("/missing").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Not found: /missing");
        assert_eq!(body["type"], "not_found");
    }
}
