//! Client side of the external backend
//!
//! `Backend` is the seam every proxy handler talks through. `HttpBackend`
//! is the reqwest implementation; it receives its base URL at construction
//! and performs exactly one attempt per request. Requests carry no timeout
//! unless the caller or the configuration sets one.

use crate::config::BackendSection;
use crate::errors::{FolioError, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// Body forwarded to the backend.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    /// Opaque bytes forwarded with the caller's content type (multipart forms).
    Raw {
        content_type: Option<String>,
        bytes: Bytes,
    },
}

#[derive(Debug, Clone)]
pub struct BackendRequest {
    pub method: Method,
    /// Path appended to the backend base URL, starting with `/`.
    pub path: String,
    pub authorization: Option<String>,
    pub body: RequestBody,
    /// Takes precedence over the client-wide timeout.
    pub timeout: Option<Duration>,
}

impl BackendRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            authorization: None,
            body: RequestBody::Empty,
            timeout: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post_json(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, path).with_body(RequestBody::Json(body))
    }

    pub fn with_authorization(mut self, value: impl Into<String>) -> Self {
        self.authorization = Some(value.into());
        self
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Status and raw body of a completed backend exchange.
#[derive(Debug, Clone)]
pub struct BackendResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl BackendResponse {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Transport to the external backend.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Perform a single request. Non-2xx statuses are not errors here; only
    /// failures that leave no backend status behind are.
    async fn send(&self, request: BackendRequest) -> Result<BackendResponse>;

    /// Whether a backend base URL is available at all.
    fn is_configured(&self) -> bool {
        true
    }
}

/// reqwest-backed implementation of [`Backend`].
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: Option<Url>,
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl HttpBackend {
    pub fn new(base_url: Option<Url>) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn from_config(section: &BackendSection) -> Result<Self> {
        let backend = Self::new(section.base_url()?);
        Ok(match section.timeout() {
            Some(timeout) => backend.with_timeout(timeout),
            None => backend,
        })
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    fn endpoint(&self, path: &str) -> Result<String> {
        let base = self
            .base_url
            .as_ref()
            .ok_or(FolioError::BackendUnconfigured)?;
        Ok(format!(
            "{}/{}",
            base.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        ))
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn send(&self, request: BackendRequest) -> Result<BackendResponse> {
        let url = self.endpoint(&request.path)?;
        log::debug!("Forwarding {} {}", request.method, url);

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .header(ACCEPT, "application/json");

        if let Some(timeout) = request.timeout.or(self.timeout) {
            builder = builder.timeout(timeout);
        }

        if let Some(auth) = &request.authorization {
            builder = builder.header(AUTHORIZATION, auth);
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Raw {
                content_type,
                bytes,
            } => {
                let builder = match content_type {
                    Some(ct) => builder.header(CONTENT_TYPE, ct),
                    None => builder,
                };
                builder.body(bytes)
            }
        };

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        log::debug!("Backend answered {} {} with {}", request.method, url, status);

        Ok(BackendResponse { status, body })
    }

    fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }
}
