//! Snapshot history of a single source.

use std::collections::BTreeSet;

use crate::format::{format_timestamp, size_display_name};
use crate::types::{DeleteSnapshotsRequest, EditSnapshotsRequest, Snapshot, SnapshotsResponse, SourceInfo};

/// Display-ready row of the history table.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotRow {
    pub id: String,
    pub root_id: String,
    pub start_time: String,
    pub description: String,
    pub retention: String,
    pub pins: Vec<String>,
    pub size: i64,
    pub size_text: String,
    pub files: i64,
    pub dirs: i64,
    pub errors: i64,
    pub incomplete: bool,
}

impl SnapshotRow {
    pub fn build(s: &Snapshot, base2: bool) -> Self {
        Self {
            id: s.id.clone(),
            root_id: s.root_id.clone(),
            start_time: format_timestamp(s.start_time.as_deref()),
            description: s.description.clone(),
            retention: s.retention.join(", "),
            pins: s.pins.clone(),
            size: s.summary.size,
            size_text: size_display_name(s.summary.size, base2),
            files: s.summary.files,
            dirs: s.summary.dirs,
            errors: s.summary.num_failed,
            incomplete: s.incomplete.is_some(),
        }
    }
}

/// Rows newest first.
pub fn history_rows(resp: &SnapshotsResponse, base2: bool) -> Vec<SnapshotRow> {
    let mut snaps: Vec<&Snapshot> = resp.snapshots.iter().collect();
    snaps.sort_by(|a, b| b.start_time.cmp(&a.start_time));
    snaps.into_iter().map(|s| SnapshotRow::build(s, base2)).collect()
}

/// `"Showing 4 unique snapshots out of 10"`-style caption, empty when all are shown.
pub fn hidden_caption(resp: &SnapshotsResponse, show_all: bool) -> String {
    if show_all || resp.unfiltered_count <= resp.unique_count {
        return String::new();
    }
    format!(
        "Showing {} unique snapshots out of {}",
        resp.unique_count, resp.unfiltered_count
    )
}

/// Checkbox selection of the history table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    pub fn toggle(&mut self, id: &str) {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn select_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        self.ids.extend(ids.into_iter().map(str::to_string));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }

    /// Drops ids no longer present after a refresh.
    pub fn retain_existing(&mut self, resp: &SnapshotsResponse) {
        let present: BTreeSet<&str> = resp.snapshots.iter().map(|s| s.id.as_str()).collect();
        self.ids.retain(|id| present.contains(id.as_str()));
    }
}

/// Delete request for the selection. Deleting every snapshot of a source may
/// also drop the source and its policy.
pub fn delete_request(source: &SourceInfo, selection: &Selection, delete_source_and_policy: bool) -> DeleteSnapshotsRequest {
    DeleteSnapshotsRequest {
        source: source.clone(),
        snapshot_manifest_ids: selection.ids(),
        delete_source_and_policy,
    }
}

/// Confirmation prompt for [`delete_request`].
pub fn delete_confirmation(count: usize, delete_source_and_policy: bool) -> String {
    if delete_source_and_policy {
        return "Do you want to delete the source, all its snapshots and the policy?".to_string();
    }
    if count == 1 {
        "Do you want to delete the selected snapshot?".to_string()
    } else {
        format!("Do you want to delete the {} selected snapshots?", count)
    }
}

/// Edit request changing the description of one snapshot.
pub fn description_edit(snapshot_id: &str, description: &str) -> EditSnapshotsRequest {
    EditSnapshotsRequest {
        snapshots: vec![snapshot_id.to_string()],
        description: Some(description.trim().to_string()),
        ..Default::default()
    }
}

/// Edit request replacing pin `old` by `new` on one snapshot. An empty `old`
/// only adds, an empty `new` only removes.
pub fn pin_edit(snapshot_id: &str, old: &str, new: &str) -> Option<EditSnapshotsRequest> {
    let (old, new) = (old.trim(), new.trim());
    if old == new {
        return None;
    }
    let mut req = EditSnapshotsRequest { snapshots: vec![snapshot_id.to_string()], ..Default::default() };
    if !new.is_empty() {
        req.add_pins.push(new.to_string());
    }
    if !old.is_empty() {
        req.remove_pins.push(old.to_string());
    }
    Some(req)
}
