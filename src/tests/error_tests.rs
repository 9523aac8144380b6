#[cfg(test)]
mod tests {
    use crate::error::AppError;
    use crate::tests::body_json;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_app_error_display() {
        let error = AppError::BadRequest("Invalid input".to_string());
        assert_eq!(format!("{}", error), "Bad request: Invalid input");

        let error = AppError::BadGateway("connection refused".to_string());
        assert_eq!(format!("{}", error), "Backend unreachable: connection refused");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(AppError::BadRequest("x".into()).into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("x".into()).into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::PayloadTooLarge("x".into()).into_response().status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(AppError::BadGateway("x".into()).into_response().status(), StatusCode::BAD_GATEWAY);
        assert_eq!(AppError::GatewayTimeout("x".into()).into_response().status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            AppError::ServiceUnavailable("x".into()).into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = AppError::BadGateway("cannot connect to backend".into()).into_response();
        let body = body_json(response.into_body()).await;

        assert_eq!(body["code"], "BACKEND_UNREACHABLE");
        assert_eq!(body["error"], "cannot connect to backend");
        assert_eq!(body["status"], 502);
        assert!(chrono::DateTime::parse_from_rfc3339(body["timestamp"].as_str().unwrap()).is_ok());
        assert!(body.get("error_id").is_none());
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let response = AppError::from(anyhow::anyhow!("secret detail")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response.into_body()).await;
        assert_eq!(body["code"], "INTERNAL_ERROR");
        assert!(!body["error"].as_str().unwrap().contains("secret"));
        let id = body["error_id"].as_str().unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());
    }

    #[test]
    fn test_error_source() {
        use std::error::Error;
        let error = AppError::Internal(anyhow::anyhow!("root cause"));
        assert!(error.source().is_some());
        assert!(AppError::NotFound("x".into()).source().is_none());
    }
}
