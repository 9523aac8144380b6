//! Tests for the host process.
//!
//! ## Test Modules
//!
//! - **config_tests**: configuration layering and validation
//! - **error_tests**: `AppError` responses
//! - **health_api_tests**: liveness, readiness, metrics and version endpoints
//! - **proxy_tests**: forwarding of `/api/v1/*` against a fake backup server
//!
//! Router tests drive the full application router with `tower::ServiceExt::oneshot`;
//! the fake backup server is a small axum app bound to `127.0.0.1:0`.

pub mod config_tests;
pub mod error_tests;
pub mod health_api_tests;

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};

use crate::config::AppConfig;
use crate::state::AppState;

pub const SLOW_CHUNK_DELAY: std::time::Duration = std::time::Duration::from_millis(600);

/// Echoes what arrived at the backend as JSON.
async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Json<Value> {
    let header_text = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string);
    Json(json!({
        "method": method.as_str(),
        "uri": uri.to_string(),
        "body": String::from_utf8_lossy(&body),
        "authorization": header_text("authorization"),
        "csrf": header_text("x-kopia-csrf-token"),
    }))
}

async fn failing() -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "code": "INTERNAL", "error": "boom" })))
}

/// Three chunks with a pause before each.
async fn slow_download() -> impl IntoResponse {
    let chunks = futures::stream::unfold(0u8, |n| async move {
        if n == 3 {
            return None;
        }
        tokio::time::sleep(SLOW_CHUNK_DELAY).await;
        Some((Ok::<_, std::io::Error>(Bytes::from(format!("chunk{};", n))), n + 1))
    });
    ([(header::CONTENT_TYPE, "application/octet-stream")], Body::from_stream(chunks))
}

async fn download() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/octet-stream")], "file-content")
}

/// Fake backup server; returns its base URL.
pub async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/api/v1/repo/status", get(|| async { Json(json!({ "connected": true })) }))
        .route("/api/v1/fail", get(failing))
        .route("/api/v1/objects/{id}", get(download))
        .route("/api/v1/slow", get(slow_download))
        .fallback(echo);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Base URL of a port nothing listens on.
pub async fn unreachable_backend() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn test_state(backend_url: &str, username: Option<&str>, password: Option<&str>) -> AppState {
    let mut cfg = AppConfig::default();
    cfg.backend.url = backend_url.to_string();
    cfg.backend.username = username.map(str::to_string);
    cfg.backend.password = password.map(str::to_string);
    cfg.backend.request_timeout_secs = 10;
    AppState::new(cfg).unwrap()
}

pub async fn body_bytes(body: Body) -> Bytes {
    body.collect().await.unwrap().to_bytes()
}

pub async fn body_json(body: Body) -> Value {
    serde_json::from_slice(&body_bytes(body).await).unwrap()
}
