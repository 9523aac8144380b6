//! Reverse proxy for `/api/v1/*`.
//!
//! The web UI only ever talks to the host it was loaded from; every API call
//! is forwarded to the configured backup server with method, path, query,
//! body and end-to-end headers preserved. Responses (including error
//! statuses) are relayed unchanged and streamed, so object downloads are not
//! buffered in memory.

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{header, HeaderMap, HeaderName, Uri},
    response::Response,
};

use crate::config::BackendConfig;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Largest request body forwarded to the backend (10 MB).
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(&name.as_str())
}

/// Target URL for a request URI: backend base + original path and query.
pub fn upstream_url(base: &str, uri: &Uri) -> String {
    let path_and_query = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or_else(|| uri.path());
    format!("{}{}", base.trim_end_matches('/'), path_and_query)
}

/// Request headers passed on to the backend. `Host` and `Content-Length` are
/// set by the client again; a configured backend login replaces whatever
/// `Authorization` the browser sent.
pub fn forwarded_request_headers(incoming: &HeaderMap, replace_auth: bool) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(incoming.len());
    for (name, value) in incoming {
        if is_hop_by_hop(name) || name == header::HOST || name == header::CONTENT_LENGTH {
            continue;
        }
        if replace_auth && name == header::AUTHORIZATION {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }
    headers
}

/// Adds Basic auth from `[backend]` when a username is configured.
pub(crate) fn with_backend_auth(builder: reqwest::RequestBuilder, cfg: &BackendConfig) -> reqwest::RequestBuilder {
    match backend_user(cfg) {
        Some(user) => builder.basic_auth(user, cfg.password.as_deref()),
        None => builder,
    }
}

fn backend_user(cfg: &BackendConfig) -> Option<&str> {
    cfg.username.as_deref().filter(|u| !u.is_empty())
}

/// `ANY /api/v1/{*path}`
pub async fn forward(State(state): State<AppState>, req: Request) -> AppResult<Response> {
    let (parts, body) = req.into_parts();
    let backend = &state.config.backend;
    let url = upstream_url(backend.base_url(), &parts.uri);

    let body = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| AppError::PayloadTooLarge(format!("request body rejected: {}", e)))?;

    let headers = forwarded_request_headers(&parts.headers, backend_user(backend).is_some());
    let mut upstream = with_backend_auth(state.client.request(parts.method.clone(), &url).headers(headers), backend);
    if !body.is_empty() {
        upstream = upstream.body(body);
    }

    state.metrics.inc_requests_proxied();
    let resp = match upstream.send().await {
        Ok(resp) => resp,
        Err(e) => {
            state.metrics.inc_upstream_failures();
            tracing::warn!(method = %parts.method, path = %parts.uri.path(), "forwarding failed: {}", e);
            return Err(e.into());
        }
    };

    let status = resp.status();
    if status.is_server_error() {
        state.metrics.inc_upstream_error_responses();
    }
    tracing::debug!(method = %parts.method, path = %parts.uri.path(), status = status.as_u16(), "forwarded");
    if let Some(len) = resp.content_length() {
        state.metrics.add_bytes_forwarded(len);
    }

    let mut builder = Response::builder().status(status);
    if let Some(out) = builder.headers_mut() {
        for (name, value) in resp.headers() {
            if !is_hop_by_hop(name) {
                out.append(name.clone(), value.clone());
            }
        }
    }
    builder
        .body(Body::from_stream(resp.bytes_stream()))
        .map_err(|e| AppError::Internal(anyhow::Error::new(e).context("building proxied response")))
}
