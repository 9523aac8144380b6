//! Wire types of the backend REST API (`/api/v1/...`).
//!
//! The backend owns all of these; the console only holds transient copies.
//! Field names follow the backend's camelCase JSON. Everything the console
//! does not strictly need is optional so that older or newer servers still
//! decode.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Identifies one backup target. Empty fields act as wildcards when the
/// value is used as a policy target (all empty = global policy).
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct SourceInfo {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub path: String,
}

impl SourceInfo {
    pub fn new(user_name: impl Into<String>, host: impl Into<String>, path: impl Into<String>) -> Self {
        Self { user_name: user_name.into(), host: host.into(), path: path.into() }
    }

    pub fn global() -> Self {
        Self::default()
    }

    pub fn is_global(&self) -> bool {
        self.user_name.is_empty() && self.host.is_empty() && self.path.is_empty()
    }

    /// `user@host`, the owner shown in source listings.
    pub fn owner(&self) -> String {
        format!("{}@{}", self.user_name, self.host)
    }

    /// Parses `user@host:path`, `user@host` or `@host`. Anything else is a
    /// local path and is attributed to the given local user and host.
    pub fn parse(text: &str, local_user: &str, local_host: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if let Some((user, rest)) = text.split_once('@') {
            // Windows paths like C:\ contain ':' but never '@' before it.
            let (host, path) = match rest.split_once(':') {
                Some((h, p)) => (h, p),
                None => (rest, ""),
            };
            if host.is_empty() {
                return None;
            }
            return Some(Self::new(user, host, path));
        }
        Some(Self::new(local_user, local_host, text))
    }

    /// Query string selecting this source (`userName=..&host=..&path=..`),
    /// omitting empty components.
    pub fn query(&self) -> String {
        let mut parts = Vec::new();
        if !self.user_name.is_empty() {
            parts.push(format!("userName={}", urlencoding::encode(&self.user_name)));
        }
        if !self.host.is_empty() {
            parts.push(format!("host={}", urlencoding::encode(&self.host)));
        }
        if !self.path.is_empty() {
            parts.push(format!("path={}", urlencoding::encode(&self.path)));
        }
        parts.join("&")
    }
}

impl fmt::Display for SourceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_global() {
            return write!(f, "(global)");
        }
        if self.user_name.is_empty() && self.path.is_empty() {
            return write!(f, "@{}", self.host);
        }
        if self.path.is_empty() {
            return write!(f, "{}@{}", self.user_name, self.host);
        }
        write!(f, "{}@{}:{}", self.user_name, self.host, self.path)
    }
}

impl PartialOrd for SourceInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SourceInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.host
            .cmp(&other.host)
            .then_with(|| self.user_name.cmp(&other.user_name))
            .then_with(|| self.path.cmp(&other.path))
    }
}

/// Size/count summary attached to snapshots and directory entries.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DirSummary {
    #[serde(default)]
    pub size: i64,
    #[serde(default)]
    pub files: i64,
    #[serde(default)]
    pub symlinks: i64,
    #[serde(default)]
    pub dirs: i64,
    #[serde(default)]
    pub max_time: Option<String>,
    #[serde(default)]
    pub num_failed: i64,
    #[serde(default)]
    pub errors: Vec<JsonValue>,
}

/// One snapshot manifest as listed by `GET /api/v1/snapshots`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub id: String,
    #[serde(rename = "rootID", default)]
    pub root_id: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub incomplete: Option<String>,
    #[serde(default)]
    pub summary: DirSummary,
    #[serde(default)]
    pub retention: Vec<String>,
    #[serde(default)]
    pub pins: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotsResponse {
    #[serde(default)]
    pub snapshots: Vec<Snapshot>,
    #[serde(default)]
    pub unfiltered_count: i64,
    #[serde(default)]
    pub unique_count: i64,
}

/// Live counters of a running upload.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UploadCounters {
    #[serde(default)]
    pub hashed_files: i64,
    #[serde(default)]
    pub hashed_bytes: i64,
    #[serde(default)]
    pub cached_files: i64,
    #[serde(default)]
    pub cached_bytes: i64,
    #[serde(default)]
    pub estimated_files: i64,
    #[serde(default)]
    pub estimated_bytes: i64,
    #[serde(default)]
    pub excluded_files: i64,
    #[serde(default)]
    pub excluded_dirs: i64,
    #[serde(default)]
    pub errors: i64,
    #[serde(default)]
    pub ignored_errors: i64,
    #[serde(default)]
    pub directory: String,
}

/// Last known snapshot of a source, embedded in the sources listing.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LastSnapshot {
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub stats: Option<JsonValue>,
    #[serde(default)]
    pub root_entry: Option<RootEntry>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RootEntry {
    #[serde(default)]
    pub obj: String,
    #[serde(default)]
    pub summ: Option<DirSummary>,
}

/// Snapshot state of one source, as listed by `GET /api/v1/sources`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SourceStatus {
    pub source: SourceInfo,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub schedule: Option<JsonValue>,
    #[serde(default)]
    pub last_snapshot: Option<LastSnapshot>,
    #[serde(default)]
    pub next_snapshot_time: Option<String>,
    #[serde(default)]
    pub upload: Option<UploadCounters>,
    #[serde(default)]
    pub current_task: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SourcesResponse {
    #[serde(default)]
    pub local_username: String,
    #[serde(default)]
    pub local_host: String,
    #[serde(default)]
    pub multi_user: bool,
    #[serde(default)]
    pub sources: Vec<SourceStatus>,
}

/// `POST /api/v1/sources`: register a path and optionally snapshot it now.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateSourceRequest {
    pub path: String,
    pub create_snapshot: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<JsonValue>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateSourceResponse {
    #[serde(default)]
    pub snapshotted: bool,
}

/// `POST /api/v1/snapshots/delete`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSnapshotsRequest {
    pub source: SourceInfo,
    pub snapshot_manifest_ids: Vec<String>,
    #[serde(default)]
    pub delete_source_and_policy: bool,
}

/// `POST /api/v1/snapshots/edit`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EditSnapshotsRequest {
    pub snapshots: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub add_pins: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remove_pins: Vec<String>,
}

/// One counter reported by a task.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct CounterValue {
    #[serde(default)]
    pub value: i64,
    #[serde(default)]
    pub units: String,
    #[serde(default)]
    pub level: String,
}

/// An asynchronous backend job.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub progress_info: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub counters: BTreeMap<String, CounterValue>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct TasksResponse {
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// One line of a task log. `ts` is seconds since the epoch.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct TaskLogEntry {
    #[serde(default)]
    pub ts: f64,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub level: i32,
    #[serde(default, rename = "mod")]
    pub module: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct TaskLogsResponse {
    #[serde(default)]
    pub logs: Vec<TaskLogEntry>,
}

/// Response of endpoints that start a task (restore, estimate, ...).
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct TaskCreated {
    pub id: String,
}

/// One entry of a directory object.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct DirEntry {
    pub name: String,
    #[serde(default, rename = "type")]
    pub entry_type: String,
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub mtime: Option<String>,
    #[serde(default)]
    pub obj: String,
    #[serde(default)]
    pub size: Option<i64>,
    #[serde(default)]
    pub summ: Option<DirSummary>,
}

/// Directory object returned by `GET /api/v1/objects/{id}`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct DirManifest {
    #[serde(default)]
    pub stream: String,
    #[serde(default)]
    pub entries: Vec<DirEntry>,
    #[serde(default)]
    pub summary: Option<DirSummary>,
}

/// A snapshot root mounted as a local directory.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct MountedSnapshot {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub root: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct AlgorithmInfo {
    pub id: String,
    #[serde(default)]
    pub deprecated: bool,
}

/// `GET /api/v1/repo/algorithms`; only compression matters to the console.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Algorithms {
    #[serde(default)]
    pub default_compression: String,
    #[serde(default)]
    pub compression: Vec<AlgorithmInfo>,
}

/// `GET /api/v1/cli`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct CliInfo {
    #[serde(default)]
    pub executable: String,
}

/// `GET /api/v1/repo/status`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RepoStatus {
    #[serde(default)]
    pub connected: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub config_file: String,
    #[serde(default)]
    pub storage: String,
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub encryption: String,
    #[serde(default)]
    pub splitter: String,
    #[serde(default)]
    pub format_version: Option<JsonValue>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub init_task_id: Option<String>,
}

/// Entry of `GET /api/v1/policies`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct PolicyListEntry {
    pub id: SourceInfo,
    #[serde(default)]
    pub policy: JsonValue,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct PoliciesResponse {
    #[serde(default)]
    pub policies: Vec<PolicyListEntry>,
}
