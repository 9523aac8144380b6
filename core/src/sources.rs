//! The snapshots screen: one row per source with its live upload state.

use chrono::{DateTime, Utc};

use crate::api::{ApiClient, Backend};
use crate::error::ApiError;
use crate::format::{format_duration, format_relative, format_timestamp, size_display_name, size_display_opt};
use crate::polling::PollControl;
use crate::tasks::{StatusDisplay, TaskStatus};
use crate::types::{SourceInfo, SourceStatus, SourcesResponse, UploadCounters};

/// Owner selector of the snapshots screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerFilter {
    All,
    /// Sources of the backend's own `user@host`.
    Local,
    /// Sources of one specific `user@host`.
    Owner(String),
}

impl OwnerFilter {
    pub fn matches(&self, source: &SourceInfo, resp: &SourcesResponse) -> bool {
        match self {
            OwnerFilter::All => true,
            OwnerFilter::Local => source.user_name == resp.local_username && source.host == resp.local_host,
            OwnerFilter::Owner(owner) => &source.owner() == owner,
        }
    }
}

/// Distinct `user@host` owners present in the listing, sorted.
pub fn owners(resp: &SourcesResponse) -> Vec<String> {
    let mut owners: Vec<String> = resp.sources.iter().map(|s| s.source.owner()).collect();
    owners.sort();
    owners.dedup();
    owners
}

/// Action offered in a source row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceAction {
    SnapshotNow,
    Cancel,
}

/// Progress of a running upload, e.g. `"1.5 MB / 3 MB (50%)"`.
pub fn upload_progress(u: &UploadCounters, base2: bool) -> String {
    let total = u.hashed_bytes + u.cached_bytes;
    let mut text = size_display_name(total, base2);
    if u.estimated_bytes > 0 {
        let percent = (total as f64 * 1000.0 / u.estimated_bytes as f64).round() / 10.0;
        if percent <= 100.0 {
            text = format!("{} / {} ({}%)", text, size_display_name(u.estimated_bytes, base2), percent);
        }
    }
    if u.hashed_files + u.cached_files > 0 {
        text = format!("{}, {} files", text, u.hashed_files + u.cached_files);
    }
    text
}

/// Display-ready row of the sources table.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRow {
    pub source: SourceInfo,
    pub owner: String,
    pub last_snapshot_time: String,
    pub last_snapshot_size: Option<i64>,
    pub last_snapshot_size_text: String,
    pub next_snapshot_time: String,
    /// `"in 2h 5m 0s"`; shown with the absolute time as tooltip.
    pub next_snapshot_relative: String,
    pub status: StatusDisplay,
    pub actions: Vec<SourceAction>,
    pub current_task: Option<String>,
}

impl SourceRow {
    pub fn build(s: &SourceStatus, base2: bool, now: DateTime<Utc>) -> Self {
        let status = TaskStatus::parse(&s.status);
        let last = s.last_snapshot.as_ref();
        let last_start = last.and_then(|l| l.start_time.as_deref());
        let last_end = last.and_then(|l| l.end_time.as_deref());
        let last_size = last
            .and_then(|l| l.root_entry.as_ref())
            .and_then(|r| r.summ.as_ref())
            .map(|summ| summ.size);

        let display = match &status {
            TaskStatus::Uploading | TaskStatus::Running => StatusDisplay::InProgress {
                label: match &s.upload {
                    Some(u) => format!("Snapshotting {}", upload_progress(u, base2)),
                    None => "Snapshotting".to_string(),
                },
                elapsed: String::new(),
            },
            // Kein laufender Vorgang, dessen Dauer man anzeigen könnte
            TaskStatus::Pending | TaskStatus::Canceling => StatusDisplay::InProgress {
                label: if status == TaskStatus::Pending { "Pending" } else { "Canceling" }.to_string(),
                elapsed: String::new(),
            },
            TaskStatus::Idle | TaskStatus::Success if last_start.is_some() => StatusDisplay::Succeeded {
                elapsed: format_duration(last_start, last_end, now),
            },
            TaskStatus::Idle => StatusDisplay::Plain("Idle".to_string()),
            TaskStatus::Other(s) if s == "REMOTE" => StatusDisplay::Plain("Remote".to_string()),
            other => StatusDisplay::for_status(other, last_start, last_end, None, now),
        };

        let actions = if status.can_cancel() {
            vec![SourceAction::Cancel]
        } else if matches!(status, TaskStatus::Other(ref s) if s == "REMOTE") || status == TaskStatus::Canceling {
            Vec::new()
        } else {
            vec![SourceAction::SnapshotNow]
        };

        Self {
            source: s.source.clone(),
            owner: s.source.owner(),
            last_snapshot_time: format_timestamp(last_start),
            last_snapshot_size: last_size,
            last_snapshot_size_text: size_display_opt(last_size, base2),
            next_snapshot_time: format_timestamp(s.next_snapshot_time.as_deref()),
            next_snapshot_relative: format_relative(s.next_snapshot_time.as_deref(), now),
            status: display,
            actions,
            current_task: s.current_task.clone(),
        }
    }
}

/// Sources listing with its last fetch result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourcesView {
    pub response: Option<SourcesResponse>,
    pub error: Option<ApiError>,
}

impl SourcesView {
    /// One poll step. Stops polling when the backend is not connected.
    pub async fn refresh<B: Backend>(&mut self, api: &ApiClient<B>) -> PollControl {
        match api.sources().await {
            Ok(resp) => {
                self.response = Some(resp);
                self.error = None;
                PollControl::Continue
            }
            Err(e) => {
                let control = if e.is_not_connected() { PollControl::Stop } else { PollControl::Continue };
                self.error = Some(e);
                control
            }
        }
    }

    pub fn rows(&self, filter: &OwnerFilter, base2: bool, now: DateTime<Utc>) -> Vec<SourceRow> {
        let Some(resp) = &self.response else {
            return Vec::new();
        };
        let mut rows: Vec<SourceRow> = resp
            .sources
            .iter()
            .filter(|s| filter.matches(&s.source, resp))
            .map(|s| SourceRow::build(s, base2, now))
            .collect();
        rows.sort_by(|a, b| a.source.cmp(&b.source));
        rows
    }

    /// The local `user@host`, used to resolve bare paths typed by the operator.
    pub fn local_identity(&self) -> (String, String) {
        self.response
            .as_ref()
            .map(|r| (r.local_username.clone(), r.local_host.clone()))
            .unwrap_or_default()
    }
}
