use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// A scheduled time of day.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay {
    pub hour: u8,
    pub min: u8,
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hour, self.min)
    }
}

/// A time-of-day entry of an edited policy. Text that did not parse is kept
/// verbatim so the operator can fix it; it blocks saving.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum TimeOfDayEntry {
    Parsed(TimeOfDay),
    Raw(String),
}

impl fmt::Display for TimeOfDayEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeOfDayEntry::Parsed(t) => t.fmt(f),
            TimeOfDayEntry::Raw(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RetentionPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_latest: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_hourly: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_daily: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_weekly: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_monthly: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_annual: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_identical_snapshots: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilesPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_parent_ignore: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_dot_files: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_parent_dot_files: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_cache_dirs: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_file_size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_file_system: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorHandlingPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_file_errors: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_directory_errors: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_unknown_types: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_seconds: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<Vec<TimeOfDayEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_parent_time_of_day: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cron: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_missed: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompressionPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compressor_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only_compress: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_parent_only_compress: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub never_compress: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_parent_never_compress: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<i64>,
}

/// A script run around a snapshot or a folder.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ActionCommand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    /// Seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,
    /// `essential`, `optional` or `async`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActionsPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_snapshot_root: Option<ActionCommand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_snapshot_root: Option<ActionCommand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_folder: Option<ActionCommand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_folder: Option<ActionCommand>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct DirLoggingPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshotted: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignored: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntryLoggingPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshotted: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignored: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_hit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_miss: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct LoggingPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directories: Option<DirLoggingPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entries: Option<EntryLoggingPolicy>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UploadPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_parallel_snapshots: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_parallel_file_reads: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel_upload_above_size: Option<i64>,
}

/// A policy attached to a source or to the global target. Every field is
/// optional; an absent field is inherited from the parent policy. Sections
/// the console does not edit are carried through untouched in `other`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention: Option<RetentionPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<FilesPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_handling: Option<ErrorHandlingPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduling: Option<SchedulingPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compression: Option<CompressionPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<ActionsPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload: Option<UploadPolicy>,
    #[serde(flatten)]
    pub other: Map<String, JsonValue>,
}

impl Policy {
    pub fn to_json(&self) -> JsonValue {
        serde_json::to_value(self).unwrap_or(JsonValue::Null)
    }
}
