//! Unit tests for the console core.
//!
//! Controllers are exercised against [`MockBackend`], an in-memory
//! [`Backend`] that answers from canned responses and records every call.
//!
//! ## Test Modules
//!
//! - **format_tests**: Size, duration and timestamp formatting
//! - **preferences_tests**: Page-size normalization and the preferences store
//! - **table_tests**: Sorting, pagination and the page-number window
//! - **policy_tests**: Time-of-day parsing, sanitizing, drafts and resolve results
//! - **editor_tests**: Policy editor load/save/delete against the mock backend
//! - **tasks_tests**: Status display, task filters and the task monitor
//! - **sources_tests**: Snapshots screen rows and polling
//! - **api_tests**: Error classification, endpoint paths and request builders

pub mod api_tests;
pub mod format_tests;
pub mod preferences_tests;
pub mod sources_tests;
pub mod tasks_tests;

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::api::{Backend, Method};
use crate::error::{ApiError, ApiResult};

/// One request seen by [`MockBackend`].
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub body: Option<JsonValue>,
}

/// Canned-response backend.
///
/// Responses are matched on method and full path first, then on the path
/// without its query. Queued responses are consumed in order; the last one
/// keeps answering. Unknown routes answer 404.
#[derive(Default)]
pub struct MockBackend {
    routes: RefCell<Vec<(Method, String, VecDeque<ApiResult<JsonValue>>)>>,
    calls: RefCell<Vec<Call>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: Method, path: &str, response: ApiResult<JsonValue>) -> &Self {
        let mut routes = self.routes.borrow_mut();
        match routes.iter_mut().find(|(m, p, _)| *m == method && p.as_str() == path) {
            Some((_, _, queue)) => queue.push_back(response),
            None => routes.push((method, path.to_string(), VecDeque::from([response]))),
        }
        self
    }

    pub fn ok(&self, method: Method, path: &str, body: JsonValue) -> &Self {
        self.respond(method, path, Ok(body))
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn calls_to(&self, method: Method, path_prefix: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.method == method && c.path.starts_with(path_prefix))
            .collect()
    }

    fn answer(&self, method: Method, path: &str) -> ApiResult<JsonValue> {
        let bare = path.split('?').next().unwrap_or(path);
        let mut routes = self.routes.borrow_mut();
        let route = routes
            .iter()
            .position(|(m, p, _)| *m == method && p == path)
            .or_else(|| routes.iter().position(|(m, p, _)| *m == method && p == bare));
        match route {
            Some(i) => {
                let queue = &mut routes[i].2;
                if queue.len() > 1 {
                    queue.pop_front().unwrap()
                } else {
                    queue.front().cloned().unwrap()
                }
            }
            None => Err(ApiError::NotFound(format!("no route for {} {}", method.as_str(), path))),
        }
    }
}

#[async_trait(?Send)]
impl Backend for MockBackend {
    async fn send(&self, method: Method, path: &str, body: Option<JsonValue>) -> ApiResult<JsonValue> {
        self.calls.borrow_mut().push(Call { method, path: path.to_string(), body });
        self.answer(method, path)
    }
}

/// Backend error for a `NOT_CONNECTED` response.
pub fn not_connected() -> ApiError {
    ApiError::from_response(400, r#"{"code":"NOT_CONNECTED","error":"not connected"}"#)
}
