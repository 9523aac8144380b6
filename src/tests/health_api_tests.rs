#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::routes;
    use crate::tests::{body_bytes, body_json, spawn_backend, test_state, unreachable_backend};

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_healthz_endpoint() {
        let app = routes::router(test_state("http://127.0.0.1:51515", None, None));

        let response = app.oneshot(get("/healthz")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(&body_bytes(response.into_body()).await[..], b"ok");
    }

    #[tokio::test]
    async fn test_readyz_with_backend_up() {
        let backend = spawn_backend().await;
        let app = routes::router(test_state(&backend, None, None));

        let response = app.oneshot(get("/readyz")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(&body_bytes(response.into_body()).await[..], b"ready");
    }

    #[tokio::test]
    async fn test_readyz_with_backend_down() {
        let backend = unreachable_backend().await;
        let app = routes::router(test_state(&backend, None, None));

        let response = app.oneshot(get("/readyz")).await.unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let text = String::from_utf8(body_bytes(response.into_body()).await.to_vec()).unwrap();
        assert!(text.starts_with("not ready"));
    }

    #[tokio::test]
    async fn test_version_endpoint() {
        let app = routes::router(test_state("http://127.0.0.1:51515", None, None));

        let response = app.oneshot(get("/version")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let v = body_json(response.into_body()).await;
        assert_eq!(v["name"], "kopia-console");
        assert!(!v["version"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_metrics_endpoint_counts_proxied_requests() {
        let backend = spawn_backend().await;
        let app = routes::router(test_state(&backend, None, None));

        let response = app.clone().oneshot(get("/api/v1/tasks")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(get("/metrics")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let m = body_json(response.into_body()).await;
        assert_eq!(m["requests_proxied"], 1);
        assert_eq!(m["upstream_failures"], 0);
        assert!(m["uptime_seconds"].is_u64());
    }

    #[tokio::test]
    async fn test_security_headers_present() {
        let app = routes::router(test_state("http://127.0.0.1:51515", None, None));

        let response = app.oneshot(get("/healthz")).await.unwrap();

        let headers = response.headers();
        assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
        assert_eq!(headers.get("x-frame-options").unwrap(), "SAMEORIGIN");
        assert_eq!(headers.get("referrer-policy").unwrap(), "no-referrer");
        assert!(headers.get("strict-transport-security").is_none());
    }

    #[tokio::test]
    async fn test_hsts_and_csp_from_config() {
        let mut state = test_state("http://127.0.0.1:51515", None, None);
        let mut cfg = (*state.config).clone();
        cfg.security = Some(crate::config::SecurityConfig {
            enable_hsts: Some(true),
            hsts_max_age: Some(600),
            hsts_include_subdomains: Some(true),
            csp: Some("default-src 'self'".into()),
        });
        state.config = std::sync::Arc::new(cfg);
        let app = routes::router(state);

        let response = app.oneshot(get("/healthz")).await.unwrap();

        let headers = response.headers();
        assert_eq!(headers.get("strict-transport-security").unwrap(), "max-age=600; includeSubDomains");
        assert_eq!(headers.get("content-security-policy").unwrap(), "default-src 'self'");
    }
}
