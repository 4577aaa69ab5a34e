#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use folio_core::{FolioConfig, Surface};
use folio_server::{AppState, FolioServer, ServerConfig};
use serde_json::Value;
use tower::ServiceExt;

pub fn config(backend_url: Option<String>) -> FolioConfig {
    let mut config = FolioConfig::default();
    config.backend.url = backend_url;
    config.backend.content_timeout_secs = 1;
    config
}

pub fn app(surface: Surface, backend_url: Option<String>) -> Router {
    let state = AppState::from_config(&config(backend_url)).unwrap();
    let server_config = ServerConfig::new()
        .with_surface(surface)
        .with_logging(false);
    FolioServer::with_config(state, server_config).build_router()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn json_body(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = body_bytes(response).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::post(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
