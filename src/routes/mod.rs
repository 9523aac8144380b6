//! HTTP routes of the host process.
//!
//! - `health`: liveness, readiness (backup server probe), metrics and version
//! - `proxy`: forwarding of `/api/v1/*` to the backup server
//!
//! Everything else is answered from the built web UI with an `index.html`
//! fallback, so client-side routes survive a reload.

pub mod health;
pub mod proxy;

use std::path::PathBuf;

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::{routing::any, routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::middleware;
use crate::state::AppState;

const BUILD_UI_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/webui/dist");

/// Directory of the web UI: `[ui].dir` if configured, else `<exe_dir>/ui`
/// when it holds an `index.html`, else the build output of `webui/`.
pub fn ui_root(cfg: &AppConfig) -> PathBuf {
    if let Some(dir) = &cfg.ui.dir {
        return dir.clone();
    }
    let runtime_ui = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|d| d.join("ui")))
        .unwrap_or_else(|| PathBuf::from("ui"));
    if runtime_ui.join("index.html").is_file() {
        runtime_ui
    } else {
        PathBuf::from(BUILD_UI_DIR)
    }
}

/// Complete application router.
pub fn router(state: AppState) -> Router {
    let ui_dir = ui_root(&state.config);
    tracing::info!("Serving web UI from {}", ui_dir.display());
    let static_ui_service = ServeDir::new(&ui_dir)
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new(ui_dir.join("index.html")));

    let cfg_arc = state.config.clone();

    let app = Router::new()
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .route("/metrics", get(health::metrics))
        .route("/version", get(health::version))
        .route("/api/v1/{*path}", any(proxy::forward))
        .fallback_service(static_ui_service)
        .with_state(state)
        .layer(DefaultBodyLimit::max(proxy::MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(from_fn_with_state(cfg_arc, middleware::security_headers::security_headers_middleware));

    // CORS: in Debug permissiv (UI per `dx serve` auf anderem Port), in Release same-origin
    if cfg!(debug_assertions) {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}
