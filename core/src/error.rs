//! Error types shared by every console screen.
//!
//! The backend reports failures as `{ "code": ..., "error": ... }`. One code is
//! special: `NOT_CONNECTED` means the server runs without a repository, and the
//! UI answers it by navigating to the repository screen instead of showing an
//! alert.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Error code the backend uses when no repository is connected.
pub const NOT_CONNECTED_CODE: &str = "NOT_CONNECTED";

/// Structured error body returned by the backend (and by the console host
/// when the backend itself is unreachable).
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Failure of a single REST call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// The backend has no repository connected.
    #[error("not connected to a repository")]
    NotConnected,
    /// HTTP 404. Some screens treat this as "nothing defined yet".
    #[error("not found: {0}")]
    NotFound(String),
    /// Any other non-success status.
    #[error("HTTP {status}: {message}")]
    Http {
        status: u16,
        code: Option<String>,
        message: String,
        /// Raw response body.
        body: String,
    },
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// The response could not be decoded into the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Classifies a non-success response from its status code and raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<ApiErrorBody>(body).ok();
        let code = parsed.as_ref().and_then(|b| b.code.clone());
        if code.as_deref() == Some(NOT_CONNECTED_CODE) {
            return ApiError::NotConnected;
        }
        let structured = parsed.and_then(|b| b.error).filter(|e| !e.is_empty());
        if status == 404 {
            return ApiError::NotFound(structured.unwrap_or_else(|| body.trim().to_string()));
        }
        let message = structured
            .unwrap_or_else(|| format!("request failed with status code {} ({})", status, generic_status_text(status)));
        ApiError::Http { status, code, message, body: body.to_string() }
    }

    pub fn is_not_connected(&self) -> bool {
        matches!(self, ApiError::NotConnected)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }

    /// Text shown to the operator: the backend's structured message when there
    /// is one, else the generic error text.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http { message, .. } => message.clone(),
            ApiError::NotFound(msg) if !msg.is_empty() => msg.clone(),
            other => other.to_string(),
        }
    }

    /// Raw response body as pretty JSON, for the "details" expander.
    pub fn details(&self) -> Option<String> {
        match self {
            ApiError::Http { body, .. } if !body.is_empty() => Some(
                serde_json::from_str::<JsonValue>(body)
                    .ok()
                    .and_then(|v| serde_json::to_string_pretty(&v).ok())
                    .unwrap_or_else(|| body.clone()),
            ),
            _ => None,
        }
    }
}

impl ApiError {
    /// Pretty JSON of an HTTP error body that parses as JSON but has no
    /// `error` field.
    fn unstructured_json(&self) -> Option<String> {
        let ApiError::Http { body, .. } = self else { return None };
        let value = serde_json::from_str::<JsonValue>(body).ok()?;
        let has_message = value.get("error").and_then(JsonValue::as_str).is_some_and(|e| !e.is_empty());
        if has_message {
            return None;
        }
        serde_json::to_string_pretty(&value).ok()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

fn generic_status_text(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        409 => "Conflict",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Request failed",
    }
}

/// Formats an action failure for a blocking alert dialog: the structured
/// message, else the generic text followed by the JSON body when there is one.
pub fn alert_text(prefix: &str, err: &ApiError) -> String {
    let message = err.user_message();
    match err.unstructured_json() {
        Some(dump) => format!("{}: {}\n{}", prefix, message, dump),
        None => format!("{}: {}", prefix, message),
    }
}

/// Input rejected before it reaches the network layer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field}: value is required")]
    Required { field: String },
    #[error("{field}: '{value}' is not a valid number")]
    InvalidNumber { field: String, value: String },
    #[error("invalid time of day: '{0}'")]
    InvalidTimeOfDay(String),
    #[error("{field}: {message}")]
    Invalid { field: String, message: String },
}

impl ValidationError {
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::Required { field }
            | ValidationError::InvalidNumber { field, .. }
            | ValidationError::Invalid { field, .. } => Some(field),
            ValidationError::InvalidTimeOfDay(_) => Some("scheduling.timeOfDay"),
        }
    }
}
