//! REST client for the backend API.
//!
//! [`Backend`] is the transport seam: it moves one JSON request and returns
//! the decoded JSON body or an [`ApiError`]. The web UI implements it on top
//! of the browser's fetch API, tests implement it in memory. [`ApiClient`]
//! adds the typed endpoints on top of any transport.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value as JsonValue};

use crate::error::{ApiError, ApiResult};
use crate::policy::ResolvedPolicy;
use crate::preferences::UiPreferences;
use crate::restore::{EstimateRequest, RestoreRequest};
use crate::types::*;

/// Prefix of every backend endpoint.
pub const API_PREFIX: &str = "/api/v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// Moves a single request to the backend.
///
/// `path` is relative to [`API_PREFIX`] and may carry a query string.
/// An empty response body is returned as `JsonValue::Null`.
#[async_trait(?Send)]
pub trait Backend {
    async fn send(&self, method: Method, path: &str, body: Option<JsonValue>) -> ApiResult<JsonValue>;
}

#[async_trait(?Send)]
impl<B: Backend + ?Sized> Backend for std::rc::Rc<B> {
    async fn send(&self, method: Method, path: &str, body: Option<JsonValue>) -> ApiResult<JsonValue> {
        (**self).send(method, path, body).await
    }
}

fn decode<T: DeserializeOwned>(value: JsonValue) -> ApiResult<T> {
    serde_json::from_value(value).map_err(ApiError::from)
}

fn encode<T: Serialize>(value: &T) -> ApiResult<JsonValue> {
    serde_json::to_value(value).map_err(ApiError::from)
}

fn with_query(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}

/// Typed endpoints over a [`Backend`].
#[derive(Debug, Clone, Default)]
pub struct ApiClient<B> {
    backend: B,
}

impl<B: Backend> ApiClient<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        decode(self.backend.send(Method::Get, path, None).await?)
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, body: JsonValue) -> ApiResult<T> {
        decode(self.backend.send(Method::Post, path, Some(body)).await?)
    }

    // Endpoints answering with an empty object or no body at all.
    async fn post_unit(&self, path: &str, body: JsonValue) -> ApiResult<()> {
        self.backend.send(Method::Post, path, Some(body)).await.map(|_| ())
    }

    // ----- preferences -----

    pub async fn get_preferences(&self) -> ApiResult<UiPreferences> {
        let value = self.backend.send(Method::Get, "/ui-preferences", None).await?;
        if value.is_null() {
            return Ok(UiPreferences::default());
        }
        decode(value)
    }

    pub async fn put_preferences(&self, prefs: &UiPreferences) -> ApiResult<()> {
        self.backend.send(Method::Put, "/ui-preferences", Some(encode(prefs)?)).await.map(|_| ())
    }

    // ----- sources -----

    pub async fn sources(&self) -> ApiResult<SourcesResponse> {
        self.get("/sources").await
    }

    pub async fn create_source(&self, req: &CreateSourceRequest) -> ApiResult<CreateSourceResponse> {
        self.post("/sources", encode(req)?).await
    }

    /// Starts a snapshot of the source now.
    pub async fn start_upload(&self, source: &SourceInfo) -> ApiResult<()> {
        self.post_unit(&with_query("/sources/upload", &source.query()), json!({})).await
    }

    pub async fn cancel_upload(&self, source: &SourceInfo) -> ApiResult<()> {
        self.post_unit(&with_query("/sources/cancel", &source.query()), json!({})).await
    }

    // ----- snapshots -----

    pub async fn snapshots(&self, source: &SourceInfo, all: bool) -> ApiResult<SnapshotsResponse> {
        let mut query = source.query();
        if !query.is_empty() {
            query.push('&');
        }
        query.push_str(if all { "all=1" } else { "all=0" });
        self.get(&with_query("/snapshots", &query)).await
    }

    pub async fn edit_snapshots(&self, req: &EditSnapshotsRequest) -> ApiResult<()> {
        self.post_unit("/snapshots/edit", encode(req)?).await
    }

    pub async fn delete_snapshots(&self, req: &DeleteSnapshotsRequest) -> ApiResult<()> {
        self.post_unit("/snapshots/delete", encode(req)?).await
    }

    // ----- objects & mounts -----

    pub async fn directory(&self, object_id: &str) -> ApiResult<DirManifest> {
        self.get(&format!("/objects/{}", urlencoding::encode(object_id))).await
    }

    /// Returns the mount of `root`, or `None` when it is not mounted.
    pub async fn mount_status(&self, root: &str) -> ApiResult<Option<MountedSnapshot>> {
        match self.get(&format!("/mounts/{}", urlencoding::encode(root))).await {
            Ok(m) => Ok(Some(m)),
            Err(ApiError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn mount(&self, root: &str) -> ApiResult<MountedSnapshot> {
        self.post("/mounts", json!({ "root": root })).await
    }

    pub async fn unmount(&self, root: &str) -> ApiResult<()> {
        self.backend
            .send(Method::Delete, &format!("/mounts/{}", urlencoding::encode(root)), None)
            .await
            .map(|_| ())
    }

    // ----- restore & estimate -----

    pub async fn restore(&self, req: &RestoreRequest) -> ApiResult<TaskCreated> {
        self.post("/restore", encode(req)?).await
    }

    pub async fn estimate(&self, req: &EstimateRequest) -> ApiResult<TaskCreated> {
        self.post("/estimate", encode(req)?).await
    }

    // ----- policies -----

    pub async fn policies(&self) -> ApiResult<PoliciesResponse> {
        self.get("/policies").await
    }

    /// Raw policy JSON of `target`; `None` when no policy is defined.
    pub async fn policy(&self, target: &SourceInfo) -> ApiResult<Option<JsonValue>> {
        match self.backend.send(Method::Get, &with_query("/policy", &target.query()), None).await {
            Ok(v) => Ok(Some(v)),
            Err(ApiError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn put_policy(&self, target: &SourceInfo, policy: JsonValue) -> ApiResult<()> {
        self.backend
            .send(Method::Put, &with_query("/policy", &target.query()), Some(policy))
            .await
            .map(|_| ())
    }

    pub async fn delete_policy(&self, target: &SourceInfo) -> ApiResult<()> {
        self.backend
            .send(Method::Delete, &with_query("/policy", &target.query()), None)
            .await
            .map(|_| ())
    }

    pub async fn resolve_policy(
        &self,
        target: &SourceInfo,
        draft: &JsonValue,
        upcoming: usize,
    ) -> ApiResult<ResolvedPolicy> {
        let body = json!({ "updates": draft, "numUpcomingSnapshotTimes": upcoming });
        self.post(&with_query("/policy/resolve", &target.query()), body).await
    }

    // ----- repository -----

    pub async fn algorithms(&self) -> ApiResult<Algorithms> {
        self.get("/repo/algorithms").await
    }

    pub async fn repo_status(&self) -> ApiResult<RepoStatus> {
        self.get("/repo/status").await
    }

    pub async fn sync_repo(&self) -> ApiResult<()> {
        self.post_unit("/repo/sync", json!({})).await
    }

    pub async fn cli(&self) -> ApiResult<CliInfo> {
        self.get("/cli").await
    }

    // ----- tasks -----

    pub async fn tasks(&self) -> ApiResult<TasksResponse> {
        self.get("/tasks").await
    }

    pub async fn task(&self, id: &str) -> ApiResult<Task> {
        self.get(&format!("/tasks/{}", urlencoding::encode(id))).await
    }

    pub async fn task_logs(&self, id: &str) -> ApiResult<TaskLogsResponse> {
        self.get(&format!("/tasks/{}/logs", urlencoding::encode(id))).await
    }

    pub async fn cancel_task(&self, id: &str) -> ApiResult<()> {
        self.post_unit(&format!("/tasks/{}/cancel", urlencoding::encode(id)), json!({})).await
    }
}

/// Download link for a file object, relative to the page origin.
pub fn object_download_url(object_id: &str, file_name: &str) -> String {
    format!(
        "{}/objects/{}?fname={}",
        API_PREFIX,
        urlencoding::encode(object_id),
        urlencoding::encode(file_name)
    )
}
