use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Environment prefix, e.g. `KOPIA_CONSOLE__BACKEND__URL`.
pub const ENV_PREFIX: &str = "KOPIA_CONSOLE";
/// Names an additional config file.
pub const CONFIG_PATH_ENV: &str = "KOPIA_CONSOLE_CONFIG";

const DEFAULTS: &str = include_str!("../config/default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// The backup server the `/api/v1` calls are forwarded to.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub connect_timeout_secs: u64,
    /// Longest pause while waiting for backend data. Not a total limit, so
    /// long streamed downloads keep going as long as bytes arrive.
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl BackendConfig {
    /// Base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct UiConfig {
    /// Directory with the built web UI (`index.html` + wasm bundle).
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SecurityConfig {
    pub enable_hsts: Option<bool>,
    pub hsts_max_age: Option<u64>,
    pub hsts_include_subdomains: Option<bool>,
    pub csp: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub security: Option<SecurityConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        // Fallback: nur die eingebettete Standard-TOML
        match ::config::Config::builder()
            .add_source(::config::File::from_str(DEFAULTS, ::config::FileFormat::Toml))
            .build()
            .and_then(|cfg| cfg.try_deserialize())
        {
            Ok(app_cfg) => app_cfg,
            Err(e) => {
                eprintln!("FATAL: Failed to load default config: {}", e);
                panic!("Failed to load default config: {}", e);
            }
        }
    }
}

/// Loads the configuration: embedded defaults -> `kopia-console.toml` in the
/// working directory -> file named by `KOPIA_CONSOLE_CONFIG` -> environment.
pub fn load() -> anyhow::Result<AppConfig> {
    // Load .env first (optional)
    let _ = dotenvy::dotenv();
    let custom_path = std::env::var(CONFIG_PATH_ENV).ok();
    load_from(custom_path.as_deref(), None)
}

/// Same layering as [`load`], with an explicit config file and optionally an
/// explicit variable map in place of the process environment.
pub fn load_from(custom_path: Option<&str>, env: Option<::config::Map<String, String>>) -> anyhow::Result<AppConfig> {
    let mut builder = ::config::Config::builder()
        .add_source(::config::File::from_str(DEFAULTS, ::config::FileFormat::Toml))
        .add_source(::config::File::with_name("kopia-console").required(false));

    if let Some(path) = custom_path {
        builder = builder.add_source(::config::File::with_name(path).required(false));
    }
    // Environment variables last to have highest precedence
    builder = builder.add_source(::config::Environment::with_prefix(ENV_PREFIX).separator("__").source(env));

    let cfg = builder.build()?;
    let app_cfg: AppConfig = cfg.try_deserialize()?;
    validate(&app_cfg)?;
    Ok(app_cfg)
}

pub fn validate(cfg: &AppConfig) -> anyhow::Result<()> {
    if cfg.server.port == 0 {
        return Err(anyhow::anyhow!("invalid server.port: {}", cfg.server.port));
    }
    #[cfg(unix)]
    if cfg.server.port < 1024 {
        tracing::warn!("Using privileged port {} - may require elevated permissions", cfg.server.port);
    }

    let url = cfg.backend.url.trim();
    if url.is_empty() {
        return Err(anyhow::anyhow!("backend.url must not be empty"));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(anyhow::anyhow!("backend.url must start with http:// or https://, got {}", url));
    }
    if cfg.backend.connect_timeout_secs == 0 {
        return Err(anyhow::anyhow!("backend.connect_timeout_secs must be > 0"));
    }
    if cfg.backend.request_timeout_secs == 0 {
        return Err(anyhow::anyhow!("backend.request_timeout_secs must be > 0"));
    }
    let has_user = cfg.backend.username.as_deref().is_some_and(|u| !u.is_empty());
    if cfg.backend.password.is_some() && !has_user {
        return Err(anyhow::anyhow!("backend.password is set but backend.username is missing"));
    }
    if cfg.backend.accept_invalid_certs {
        tracing::warn!("TLS certificate verification for the backend is disabled");
    }

    Ok(())
}
