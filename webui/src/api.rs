use async_trait::async_trait;
use kopia_console_core::api::API_PREFIX;
use kopia_console_core::{ApiClient, ApiError, ApiResult, Backend, Method};
use serde_json::Value as JsonValue;

pub const BASE: &str = ""; // same-origin, der Host leitet /api/v1 weiter

fn url(path: &str) -> String { format!("{}{}{}", BASE, API_PREFIX, path) }

/// Transport über die Fetch-API des Browsers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HttpBackend;

pub type Api = ApiClient<HttpBackend>;

pub fn client() -> Api { ApiClient::new(HttpBackend) }

fn map_net(e: reqwasm::Error) -> ApiError { ApiError::Network(e.to_string()) }

#[async_trait(?Send)]
impl Backend for HttpBackend {
    async fn send(&self, method: Method, path: &str, body: Option<JsonValue>) -> ApiResult<JsonValue> {
        let target = url(path);
        let mut req = match method {
            Method::Get => reqwasm::http::Request::get(&target),
            Method::Post => reqwasm::http::Request::post(&target),
            Method::Put => reqwasm::http::Request::put(&target),
            Method::Delete => reqwasm::http::Request::delete(&target),
        };
        if let Some(body) = body {
            req = req.header("Content-Type", "application/json").body(serde_json::to_string(&body)?);
        }
        let resp = req.send().await.map_err(map_net)?;
        let (ok, status) = (resp.ok(), resp.status());
        let text = resp.text().await.map_err(map_net)?;
        if !ok {
            return Err(ApiError::from_response(status, &text));
        }
        // Leere Antwort (204, "OK") -> Null
        if text.trim().is_empty() {
            return Ok(JsonValue::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}
