//! # Kopia Console Host
//!
//! Host process of the Kopia console. It serves the compiled web UI and
//! forwards the UI's `/api/v1/...` calls to a backup server, so the browser
//! only ever talks to one origin.
//!
//! ## Architecture
//!
//! - **Axum**: HTTP server, routing and middleware
//! - **reqwest**: client side of the reverse proxy and the readiness probe
//! - **tower-http**: static files with SPA fallback, compression, tracing
//! - **config**: layered configuration (embedded defaults, files, environment)
//!
//! The console logic itself (wire models, tables, policy editing, task
//! monitoring) lives in `kopia-console-core` and runs in the browser.
//!
//! ## Modules
//!
//! - [`config`]: configuration loading and validation
//! - [`error`]: errors the host answers with itself
//! - [`metrics`]: proxy counters
//! - [`middleware`]: security headers and caching policy
//! - [`routes`]: health endpoints, the proxy and the router
//! - [`state`]: shared state (config, HTTP client, metrics)

pub mod config;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

#[cfg(test)]
mod tests;
