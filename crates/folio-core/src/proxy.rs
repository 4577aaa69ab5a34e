//! Status-passthrough translation of backend replies
//!
//! A `PassthroughPolicy` describes how one proxy route turns the outcome of
//! a single backend call into the reply its caller sees. Successes are
//! relayed (optionally wrapped), backend failures keep the backend status
//! with a normalized `{error}` body, and transport failures collapse to 500.

use crate::backend::BackendResponse;
use crate::errors::FolioError;
use reqwest::header::{HeaderMap, AUTHORIZATION};
use reqwest::StatusCode;
use serde_json::{json, Map, Value};

/// What a successful backend reply becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessShape {
    /// Backend JSON body, verbatim.
    Relay,
    /// `{valid: true, ...body}`.
    ValidEnvelope,
    /// `204 No Content`, body ignored.
    NoContent,
}

/// Where the error message for a non-2xx backend reply comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMessage {
    /// `error` field of the backend JSON body, else the default.
    ErrorField { default: &'static str },
    /// Always the same message.
    Fixed(&'static str),
    /// Backend body as text, else the status line.
    BackendText,
    /// `Backend responded with status N`.
    StatusLine,
}

/// Reply produced by a proxy route. `body` is `None` for empty replies.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyReply {
    pub status: StatusCode,
    pub body: Option<Value>,
}

impl ProxyReply {
    pub fn json(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    pub fn empty(status: StatusCode) -> Self {
        Self { status, body: None }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PassthroughPolicy {
    /// Short operation name used in server-side logs.
    pub operation: &'static str,
    pub success: SuccessShape,
    pub failure: FailureMessage,
    /// Message returned with 500 when no backend status is available.
    pub transport_message: &'static str,
    /// Error payloads carry `valid: false` as well.
    pub validity_flag: bool,
}

impl PassthroughPolicy {
    pub const LOGIN: PassthroughPolicy = PassthroughPolicy {
        operation: "login",
        success: SuccessShape::Relay,
        failure: FailureMessage::ErrorField {
            default: "Authentication failed",
        },
        transport_message: "Failed to authenticate",
        validity_flag: false,
    };

    pub const VERIFY: PassthroughPolicy = PassthroughPolicy {
        operation: "token verification",
        success: SuccessShape::ValidEnvelope,
        failure: FailureMessage::Fixed("Token verification failed"),
        transport_message: "Failed to verify token",
        validity_flag: true,
    };

    /// Dashboard read of a content resource.
    pub const fn read(operation: &'static str, transport_message: &'static str) -> Self {
        Self {
            operation,
            success: SuccessShape::Relay,
            failure: FailureMessage::StatusLine,
            transport_message,
            validity_flag: false,
        }
    }

    /// Dashboard create or update of a content resource.
    pub const fn write(operation: &'static str, transport_message: &'static str) -> Self {
        Self {
            operation,
            success: SuccessShape::Relay,
            failure: FailureMessage::BackendText,
            transport_message,
            validity_flag: false,
        }
    }

    /// Dashboard delete of a content resource.
    pub const fn delete(operation: &'static str, transport_message: &'static str) -> Self {
        Self {
            operation,
            success: SuccessShape::NoContent,
            failure: FailureMessage::BackendText,
            transport_message,
            validity_flag: false,
        }
    }

    pub fn translate(&self, outcome: Result<BackendResponse, FolioError>) -> ProxyReply {
        let response = match outcome {
            Ok(response) => response,
            Err(e) => {
                log::error!("{} error: {}", self.operation, e);
                return self.transport_failure();
            }
        };

        if !response.is_success() {
            let message = self.failure_message(&response);
            log::warn!(
                "{} rejected by backend with {}: {}",
                self.operation,
                response.status,
                message
            );
            return ProxyReply::json(response.status, self.error_body(&message));
        }

        match self.success {
            SuccessShape::NoContent => ProxyReply::empty(StatusCode::NO_CONTENT),
            SuccessShape::Relay => match response.json::<Value>() {
                Ok(body) => ProxyReply::json(StatusCode::OK, body),
                Err(e) => {
                    log::error!("{} error: {}", self.operation, e);
                    self.transport_failure()
                }
            },
            SuccessShape::ValidEnvelope => match response.json::<Value>() {
                Ok(body) => ProxyReply::json(StatusCode::OK, valid_envelope(body)),
                Err(e) => {
                    log::error!("{} error: {}", self.operation, e);
                    self.transport_failure()
                }
            },
        }
    }

    /// 401 reply for a request that arrived without credentials.
    pub fn missing_credentials(&self, message: &str) -> ProxyReply {
        ProxyReply::json(StatusCode::UNAUTHORIZED, self.error_body(message))
    }

    fn transport_failure(&self) -> ProxyReply {
        ProxyReply::json(
            StatusCode::INTERNAL_SERVER_ERROR,
            self.error_body(self.transport_message),
        )
    }

    fn failure_message(&self, response: &BackendResponse) -> String {
        match self.failure {
            FailureMessage::ErrorField { default } => response
                .json::<Value>()
                .ok()
                .and_then(|body| error_field(&body))
                .unwrap_or_else(|| default.to_string()),
            FailureMessage::Fixed(message) => message.to_string(),
            FailureMessage::BackendText => {
                let text = response.text();
                if text.trim().is_empty() {
                    status_line(response.status)
                } else {
                    text
                }
            }
            FailureMessage::StatusLine => status_line(response.status),
        }
    }

    fn error_body(&self, message: &str) -> Value {
        if self.validity_flag {
            json!({ "valid": false, "error": message })
        } else {
            json!({ "error": message })
        }
    }
}

/// `Authorization` header value, treating absent, empty and unreadable
/// values the same way.
pub fn authorization_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn status_line(status: StatusCode) -> String {
    format!("Backend responded with status {}", status.as_u16())
}

fn error_field(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Null | Value::Bool(false) => None,
        Value::String(_) => None,
        other => Some(other.to_string()),
    }
}

fn valid_envelope(body: Value) -> Value {
    let mut merged = Map::new();
    merged.insert("valid".to_string(), Value::Bool(true));
    match body {
        Value::Object(fields) => {
            // Backend fields win, as with an object spread.
            merged.extend(fields);
        }
        Value::Null => {}
        other => {
            merged.insert("data".to_string(), other);
        }
    }
    Value::Object(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn reply(status: u16, body: &'static str) -> Result<BackendResponse, FolioError> {
        Ok(BackendResponse::new(StatusCode::from_u16(status).unwrap(), body))
    }

    #[test]
    fn test_login_success_is_relayed_unchanged() {
        let out = PassthroughPolicy::LOGIN.translate(reply(200, r#"{"token":"x"}"#));
        assert_eq!(out.status, StatusCode::OK);
        assert_eq!(out.body, Some(json!({"token": "x"})));
    }

    #[test]
    fn test_login_forbidden_uses_backend_message() {
        let out = PassthroughPolicy::LOGIN.translate(reply(403, r#"{"error":"Bad password"}"#));
        assert_eq!(out.status, StatusCode::FORBIDDEN);
        assert_eq!(out.body, Some(json!({"error": "Bad password"})));
    }

    #[test]
    fn test_login_failure_without_json_uses_default() {
        for body in ["", "<html>oops</html>", r#"{"message":"x"}"#, r#"{"error":""}"#] {
            let out = PassthroughPolicy::LOGIN.translate(reply(403, body));
            assert_eq!(out.status, StatusCode::FORBIDDEN);
            assert_eq!(out.body, Some(json!({"error": "Authentication failed"})));
        }
    }

    #[test]
    fn test_transport_failures_collapse_to_500() {
        let out = PassthroughPolicy::LOGIN
            .translate(Err(FolioError::Transport("connection refused".to_string())));
        assert_eq!(out.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(out.body, Some(json!({"error": "Failed to authenticate"})));

        let out = PassthroughPolicy::VERIFY.translate(Err(FolioError::BackendUnconfigured));
        assert_eq!(out.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            out.body,
            Some(json!({"valid": false, "error": "Failed to verify token"}))
        );
    }

    #[test]
    fn test_unparseable_success_body_is_500() {
        let out = PassthroughPolicy::LOGIN.translate(reply(200, "not json"));
        assert_eq!(out.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_verify_wraps_success() {
        let out = PassthroughPolicy::VERIFY.translate(reply(200, r#"{"user":"admin"}"#));
        assert_eq!(out.status, StatusCode::OK);
        assert_eq!(out.body, Some(json!({"valid": true, "user": "admin"})));
    }

    #[test]
    fn test_verify_failure_keeps_status() {
        let out = PassthroughPolicy::VERIFY.translate(reply(401, r#"{"error":"expired"}"#));
        assert_eq!(out.status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            out.body,
            Some(json!({"valid": false, "error": "Token verification failed"}))
        );
    }

    #[test]
    fn test_write_failure_prefers_backend_text() {
        let policy = PassthroughPolicy::write("project update", "Failed to update project");
        let out = policy.translate(reply(422, "title is required"));
        assert_eq!(out.status.as_u16(), 422);
        assert_eq!(out.body, Some(json!({"error": "title is required"})));

        let out = policy.translate(reply(502, ""));
        assert_eq!(
            out.body,
            Some(json!({"error": "Backend responded with status 502"}))
        );
    }

    #[test]
    fn test_delete_success_is_empty_204() {
        let policy = PassthroughPolicy::delete("project deletion", "Failed to delete project");
        let out = policy.translate(reply(200, ""));
        assert_eq!(out, ProxyReply::empty(StatusCode::NO_CONTENT));
    }

    #[test]
    fn test_read_failure_reports_status_line() {
        let policy = PassthroughPolicy::read("project read", "Failed to fetch project from backend");
        let out = policy.translate(reply(404, r#"{"error":"missing"}"#));
        assert_eq!(out.status, StatusCode::NOT_FOUND);
        assert_eq!(
            out.body,
            Some(json!({"error": "Backend responded with status 404"}))
        );
    }

    #[test]
    fn test_authorization_header_extraction() {
        let mut headers = HeaderMap::new();
        assert_eq!(authorization_header(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static(""));
        assert_eq!(authorization_header(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("   "));
        assert_eq!(authorization_header(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_bytes(b"Bearer \xff").unwrap());
        assert_eq!(authorization_header(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(authorization_header(&headers).as_deref(), Some("Bearer abc"));
    }

    #[test]
    fn test_missing_credentials_reply() {
        let out = PassthroughPolicy::VERIFY.missing_credentials("No authorization header");
        assert_eq!(out.status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            out.body,
            Some(json!({"valid": false, "error": "No authorization header"}))
        );
    }
}
