use std::sync::Arc;

use crate::config::AppConfig;
use crate::metrics::Metrics;

/// Shared state of the host process.
///
/// Cloned into every handler; the HTTP client keeps its connection pool to
/// the backup server across requests.
#[derive(Clone)]
pub struct AppState {
    /// Validated configuration.
    pub config: Arc<AppConfig>,
    /// Client used for forwarding and the readiness probe.
    pub client: reqwest::Client,
    pub metrics: Metrics,
}

impl AppState {
    /// Builds the state, including an HTTP client configured from the
    /// `[backend]` section (timeouts, certificate checks).
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.backend.connect_timeout())
            // Leerlauf statt Gesamtzeit: gestreamte Downloads dürfen länger dauern
            .read_timeout(config.backend.request_timeout())
            .danger_accept_invalid_certs(config.backend.accept_invalid_certs)
            // Weiterleitungen gibt der Proxy unverändert an den Browser zurück
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build backend HTTP client: {}", e))?;

        Ok(Self { config: Arc::new(config), client, metrics: Metrics::new() })
    }
}
