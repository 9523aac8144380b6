use std::time::Duration;

use crate::routes::proxy::with_backend_auth;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use kopia_console_core::api::API_PREFIX;
use kopia_console_core::types::RepoStatus;

/// Backend endpoint used by the readiness probe, below [`API_PREFIX`].
pub const READY_PROBE_PATH: &str = "/repo/status";
const READY_TIMEOUT: Duration = Duration::from_secs(5);

// Liveness: nur der Prozess selbst
pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

// Readiness: Backup-Server erreichbar (mit Timeout)
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let backend = &state.config.backend;
    let url = format!("{}{}{}", backend.base_url(), API_PREFIX, READY_PROBE_PATH);
    let probe = with_backend_auth(state.client.get(&url).timeout(READY_TIMEOUT), backend);

    match probe.send().await {
        // Ohne Repository ist die Konsole trotzdem bedienbar (Repository-Seite)
        Ok(resp) if resp.status().is_success() => match resp.json::<RepoStatus>().await {
            Ok(status) if !status.connected => (StatusCode::OK, "ready: no repository connected".to_string()),
            _ => (StatusCode::OK, "ready".to_string()),
        },
        Ok(resp) => (StatusCode::SERVICE_UNAVAILABLE, format!("not ready: backend answered {}", resp.status())),
        Err(e) if e.is_timeout() => (StatusCode::SERVICE_UNAVAILABLE, "not ready: timeout".to_string()),
        Err(e) => {
            tracing::debug!("readiness probe failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, format!("not ready: {}", e))
        }
    }
}

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.get_snapshot())
}

// Version/Build info endpoint (JSON)
pub async fn version() -> impl IntoResponse {
    let body = serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "package": {
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "license": env!("CARGO_PKG_LICENSE"),
        },
        "build": {
            "profile": if cfg!(debug_assertions) { "debug" } else { "release" },
            "os": std::env::consts::OS,
            "arch": std::env::consts::ARCH,
        }
    });
    (StatusCode::OK, Json(body))
}
