#[cfg(test)]
mod tests {
    use crate::config::{self, AppConfig};
    use std::fs;
    use std::time::Duration;

    fn env(vars: &[(&str, &str)]) -> Option<::config::Map<String, String>> {
        Some(vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect())
    }

    fn write_temp_config(content: &str) -> tempfile::NamedTempFile {
        let temp_file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        fs::write(temp_file.path(), content).unwrap();
        temp_file
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.backend.url, "http://127.0.0.1:51515");
        assert_eq!(config.backend.connect_timeout(), Duration::from_secs(5));
        assert_eq!(config.backend.request_timeout(), Duration::from_secs(300));
        assert!(config.backend.username.is_none());
        assert!(!config.backend.accept_invalid_certs);
        assert!(config.ui.dir.is_none());
    }

    #[test]
    fn test_valid_defaults_load() {
        let config = config::load_from(None, env(&[])).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_config_from_env() {
        let config = config::load_from(
            None,
            env(&[
                ("KOPIA_CONSOLE__SERVER__HOST", "0.0.0.0"),
                ("KOPIA_CONSOLE__SERVER__PORT", "3000"),
                ("KOPIA_CONSOLE__BACKEND__URL", "https://backup.example:51515/"),
                ("KOPIA_CONSOLE__BACKEND__USERNAME", "admin"),
                ("KOPIA_CONSOLE__BACKEND__PASSWORD", "secret"),
                ("KOPIA_CONSOLE__BACKEND__ACCEPT_INVALID_CERTS", "true"),
                ("UNRELATED__SERVER__PORT", "1"),
            ]),
        )
        .unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.backend.base_url(), "https://backup.example:51515");
        assert_eq!(config.backend.username.as_deref(), Some("admin"));
        assert_eq!(config.backend.password.as_deref(), Some("secret"));
        assert!(config.backend.accept_invalid_certs);
    }

    #[test]
    fn test_config_from_file_and_env_precedence() {
        let temp_file = write_temp_config(
            r#"
[server]
port = 9000

[backend]
url = "http://nas.local:51515"
request_timeout_secs = 60

[ui]
dir = "/opt/kopia-console/ui"

[security]
enable_hsts = true
csp = "default-src 'self'"
"#,
        );
        let path = temp_file.path().to_str().unwrap().to_string();

        let config = config::load_from(Some(&path), env(&[("KOPIA_CONSOLE__SERVER__PORT", "9100")])).unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.backend.url, "http://nas.local:51515");
        assert_eq!(config.backend.request_timeout_secs, 60);
        assert_eq!(config.backend.connect_timeout_secs, 5);
        assert_eq!(config.ui.dir.as_deref(), Some(std::path::Path::new("/opt/kopia-console/ui")));
        let security = config.security.unwrap();
        assert_eq!(security.enable_hsts, Some(true));
        assert_eq!(security.csp.as_deref(), Some("default-src 'self'"));
    }

    #[test]
    fn test_invalid_server_port() {
        let result = config::load_from(None, env(&[("KOPIA_CONSOLE__SERVER__PORT", "0")]));
        assert!(result.unwrap_err().to_string().contains("invalid server.port"));
    }

    #[test]
    fn test_backend_url_validation() {
        let mut cfg = AppConfig::default();
        cfg.backend.url = "   ".into();
        assert!(config::validate(&cfg).unwrap_err().to_string().contains("must not be empty"));

        cfg.backend.url = "ftp://backup.local".into();
        assert!(config::validate(&cfg).unwrap_err().to_string().contains("http://"));

        cfg.backend.url = "https://backup.local".into();
        assert!(config::validate(&cfg).is_ok());
    }

    #[test]
    fn test_timeout_validation() {
        let mut cfg = AppConfig::default();
        cfg.backend.connect_timeout_secs = 0;
        assert!(config::validate(&cfg).is_err());

        let mut cfg = AppConfig::default();
        cfg.backend.request_timeout_secs = 0;
        assert!(config::validate(&cfg).unwrap_err().to_string().contains("request_timeout_secs"));
    }

    #[test]
    fn test_password_requires_username() {
        let mut cfg = AppConfig::default();
        cfg.backend.password = Some("secret".into());
        assert!(config::validate(&cfg).unwrap_err().to_string().contains("username"));

        cfg.backend.username = Some(String::new());
        assert!(config::validate(&cfg).is_err());

        cfg.backend.username = Some("admin".into());
        assert!(config::validate(&cfg).is_ok());
    }
}
