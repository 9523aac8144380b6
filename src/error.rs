use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::error::Error;
use std::fmt;

/// Errors the host answers with itself (as opposed to errors relayed from the
/// backup server, which pass through the proxy untouched).
///
/// The JSON body carries `code` and `error` at the top level, the same shape
/// the backup server uses, so the web UI renders both alike.
#[derive(Debug)]
pub enum AppError {
    /// Unexpected failure; the client only sees an error id.
    Internal(anyhow::Error),
    BadRequest(String),
    NotFound(String),
    /// The request body exceeded the forwarding limit.
    PayloadTooLarge(String),
    /// The backup server could not be reached or broke off the exchange.
    BadGateway(String),
    /// The backup server did not answer within the configured timeout.
    GatewayTimeout(String),
    ServiceUnavailable(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(e) => write!(f, "Internal error: {}", e),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::PayloadTooLarge(msg) => write!(f, "Payload too large: {}", msg),
            AppError::BadGateway(msg) => write!(f, "Backend unreachable: {}", msg),
            AppError::GatewayTimeout(msg) => write!(f, "Backend timeout: {}", msg),
            AppError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AppError::Internal(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            AppError::GatewayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Internal(_) => "INTERNAL_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            AppError::BadGateway(_) => "BACKEND_UNREACHABLE",
            AppError::GatewayTimeout(_) => "BACKEND_TIMEOUT",
            AppError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let (message, error_id) = match self {
            AppError::Internal(e) => {
                let error_id = uuid::Uuid::new_v4();
                tracing::error!(%error_id, "Internal error: {:?}", e);
                ("An internal server error occurred".to_string(), Some(error_id.to_string()))
            }
            AppError::BadGateway(msg) | AppError::GatewayTimeout(msg) => {
                tracing::warn!(code, "{}", msg);
                (msg, None)
            }
            AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::PayloadTooLarge(msg)
            | AppError::ServiceUnavailable(msg) => (msg, None),
        };

        let mut body = json!({
            "code": code,
            "error": message,
            "status": status.as_u16(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });
        if let Some(id) = error_id {
            body["error_id"] = json!(id);
        }

        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::GatewayTimeout(format!("backend did not answer in time: {}", err))
        } else if err.is_connect() {
            AppError::BadGateway(format!("cannot connect to backend: {}", err))
        } else if err.is_builder() {
            AppError::Internal(anyhow::Error::new(err).context("invalid backend request"))
        } else {
            AppError::BadGateway(format!("backend request failed: {}", err))
        }
    }
}

/// A type alias for `Result<T, AppError>`, used by the handlers.
pub type AppResult<T> = Result<T, AppError>;
