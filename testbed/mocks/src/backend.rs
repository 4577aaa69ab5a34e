//! Scriptable stand-in for the portfolio backend

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{HeaderName, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// Canned reply for one method and path.
#[derive(Debug, Clone)]
pub struct MockReply {
    pub status: u16,
    pub body: String,
    pub content_type: Option<&'static str>,
    pub delay: Option<Duration>,
}

impl MockReply {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            content_type: Some("application/json"),
            delay: None,
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            content_type: Some("text/plain"),
            delay: None,
        }
    }

    pub fn empty(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
            content_type: None,
            delay: None,
        }
    }

    /// Hold the reply back, for timeout tests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn json(&self) -> Option<Value> {
        serde_json::from_slice(&self.body).ok()
    }
}

#[derive(Clone, Default)]
struct MockBackendState {
    replies: Arc<Mutex<HashMap<(String, String), MockReply>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

fn header_value(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn handle(
    State(state): State<MockBackendState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let recorded = RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: header_value(&headers, AUTHORIZATION),
        content_type: header_value(&headers, CONTENT_TYPE),
        body: body.to_vec(),
    };
    log::debug!("Mock backend received {} {}", recorded.method, recorded.path);
    state.requests.lock().unwrap().push(recorded);

    let reply = state
        .replies
        .lock()
        .unwrap()
        .get(&(method.to_string(), uri.path().to_string()))
        .cloned();

    let Some(reply) = reply else {
        log::warn!("Mock backend has no reply for {} {}", method, uri.path());
        return (
            StatusCode::NOT_FOUND,
            axum::Json(json!({ "error": format!("no mock reply for {} {}", method, uri.path()) })),
        )
            .into_response();
    };

    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }

    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    match reply.content_type {
        Some(content_type) => (status, [(CONTENT_TYPE, content_type)], reply.body).into_response(),
        None => status.into_response(),
    }
}

/// Backend double bound to an ephemeral localhost port.
pub struct MockBackend {
    addr: SocketAddr,
    shutdown_tx: tokio::sync::oneshot::Sender<()>,
    state: MockBackendState,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = MockBackendState::default();
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap_or_else(|e| {
            panic!("Failed to bind mock backend to 127.0.0.1:0. Error: {}", e);
        });
        let addr = listener.local_addr().unwrap();
        log::info!("Mock backend listening on {}", addr);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap_or_else(|e| log::error!("Mock backend error: {}", e));
        });

        MockBackend {
            addr,
            shutdown_tx,
            state,
        }
    }

    /// Script the reply for `method path`, replacing any earlier one.
    pub fn on(&self, method: &str, path: &str, reply: MockReply) -> &Self {
        self.state
            .replies
            .lock()
            .unwrap()
            .insert((method.to_uppercase(), path.to_string()), reply);
        self
    }

    pub fn address(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.requests.lock().unwrap().len()
    }

    pub async fn shutdown(self) {
        if self.shutdown_tx.send(()).is_err() {
            log::warn!("Mock backend already stopped");
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}

/// Base URL nothing is listening on.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
