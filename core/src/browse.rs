//! Directory browsing inside a snapshot.
//!
//! Object ids starting with `k` are directory objects that can be listed
//! again; every other id is file content and is offered as a download.

use crate::api::object_download_url;
use crate::format::{format_timestamp, size_display_name};
use crate::types::{DirEntry, DirManifest, MountedSnapshot};

pub fn is_directory_object(object_id: &str) -> bool {
    object_id.starts_with('k')
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirEntryRow {
    pub name: String,
    pub object_id: String,
    pub is_dir: bool,
    pub size: i64,
    pub size_text: String,
    pub mtime: String,
    pub files: Option<i64>,
    pub dirs: Option<i64>,
    pub errors: i64,
}

impl DirEntryRow {
    pub fn from_entry(entry: &DirEntry, base2: bool) -> Self {
        let size = entry
            .size
            .or_else(|| entry.summ.as_ref().map(|s| s.size))
            .unwrap_or(0);
        Self {
            name: entry.name.clone(),
            object_id: entry.obj.clone(),
            is_dir: is_directory_object(&entry.obj),
            size,
            size_text: size_display_name(size, base2),
            mtime: format_timestamp(entry.mtime.as_deref()),
            files: entry.summ.as_ref().map(|s| s.files),
            dirs: entry.summ.as_ref().map(|s| s.dirs),
            errors: entry.summ.as_ref().map(|s| s.num_failed).unwrap_or(0),
        }
    }

    /// Download link for file entries; directories are browsed instead.
    pub fn download_url(&self) -> Option<String> {
        (!self.is_dir).then(|| object_download_url(&self.object_id, &self.name))
    }
}

/// Rows with directories first, each group by name.
pub fn directory_rows(manifest: &DirManifest, base2: bool) -> Vec<DirEntryRow> {
    let mut rows: Vec<DirEntryRow> = manifest.entries.iter().map(|e| DirEntryRow::from_entry(e, base2)).collect();
    rows.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.name.cmp(&b.name)));
    rows
}

/// Breadcrumb trail of a browse session: `(label, object id)` from the
/// snapshot root down to the directory shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Breadcrumbs {
    pub entries: Vec<(String, String)>,
}

impl Breadcrumbs {
    pub fn root(label: &str, object_id: &str) -> Self {
        Self { entries: vec![(label.to_string(), object_id.to_string())] }
    }

    /// Descends into `object_id`, or truncates back to it if it is already on
    /// the trail.
    pub fn enter(&mut self, label: &str, object_id: &str) {
        if let Some(pos) = self.entries.iter().position(|(_, oid)| oid == object_id) {
            self.entries.truncate(pos + 1);
        } else {
            self.entries.push((label.to_string(), object_id.to_string()));
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.last().map(|(_, oid)| oid.as_str())
    }

    /// Path below the snapshot root, e.g. `docs/2024`.
    pub fn relative_path(&self) -> String {
        self.entries.iter().skip(1).map(|(l, _)| l.as_str()).collect::<Vec<_>>().join("/")
    }
}

/// Mount state of the directory being browsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MountState {
    #[default]
    Unmounted,
    Mounted { path: String },
}

impl From<Option<MountedSnapshot>> for MountState {
    fn from(m: Option<MountedSnapshot>) -> Self {
        match m {
            Some(m) if !m.path.is_empty() => MountState::Mounted { path: m.path },
            _ => MountState::Unmounted,
        }
    }
}

impl MountState {
    pub fn path(&self) -> Option<&str> {
        match self {
            MountState::Mounted { path } => Some(path),
            MountState::Unmounted => None,
        }
    }
}
