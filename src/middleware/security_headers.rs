//! Security headers and caching policy for every response.
//!
//! Proxied API responses get the same treatment as the host's own: JSON is
//! never cached, so a reload always shows the backup server's current state.

use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE, PRAGMA};
use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::config::{AppConfig, SecurityConfig};

const DEFAULT_HSTS_MAX_AGE: u64 = 31_536_000;

/// Adds the fixed security headers, optional HSTS/CSP from `[security]` and a
/// cache policy by content type:
///
/// - `application/json`: `no-store` (API data)
/// - `text/html`: `no-cache` (the SPA shell must pick up new builds)
/// - CSS, JS, wasm: cacheable for a day
pub async fn security_headers_middleware(
    State(cfg): State<Arc<AppConfig>>,
    req: Request,
    next: Next,
) -> Response {
    let mut res = next.run(req).await;
    let headers = res.headers_mut();

    headers.insert(HeaderName::from_static("x-content-type-options"), HeaderValue::from_static("nosniff"));
    headers.insert(HeaderName::from_static("x-frame-options"), HeaderValue::from_static("SAMEORIGIN"));
    headers.insert(HeaderName::from_static("referrer-policy"), HeaderValue::from_static("no-referrer"));
    headers.insert(
        HeaderName::from_static("permissions-policy"),
        HeaderValue::from_static("geolocation=(), microphone=(), camera=()"),
    );
    headers.insert(
        HeaderName::from_static("cross-origin-opener-policy"),
        HeaderValue::from_static("same-origin"),
    );

    if let Some(sec) = cfg.security.as_ref() {
        apply_optional(headers, sec);
    }
    apply_cache_policy(headers);

    res
}

fn apply_optional(headers: &mut HeaderMap, sec: &SecurityConfig) {
    if sec.enable_hsts.unwrap_or(false) {
        let max_age = sec.hsts_max_age.unwrap_or(DEFAULT_HSTS_MAX_AGE);
        let include_sub = if sec.hsts_include_subdomains.unwrap_or(false) { "; includeSubDomains" } else { "" };
        if let Ok(value) = HeaderValue::from_str(&format!("max-age={}{}", max_age, include_sub)) {
            headers.insert(HeaderName::from_static("strict-transport-security"), value);
        }
    }
    if let Some(csp) = sec.csp.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        match HeaderValue::from_str(csp) {
            Ok(val) => {
                headers.insert(HeaderName::from_static("content-security-policy"), val);
            }
            Err(e) => tracing::warn!("Ignoring invalid security.csp: {}", e),
        }
    }
}

fn apply_cache_policy(headers: &mut HeaderMap) {
    let content_type = match headers.get(CONTENT_TYPE).and_then(|ct| ct.to_str().ok()) {
        Some(ct) => ct.to_ascii_lowercase(),
        None => return,
    };

    if content_type.starts_with("application/json") {
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    } else if content_type.starts_with("text/html") {
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    } else if content_type.starts_with("text/css")
        || content_type.starts_with("application/javascript")
        || content_type.starts_with("text/javascript")
        || content_type.starts_with("application/wasm")
    {
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("public, max-age=86400"));
        headers.remove(PRAGMA);
    }
}
