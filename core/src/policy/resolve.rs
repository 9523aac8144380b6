use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::format::format_timestamp;
use crate::types::SourceInfo;

use super::draft::{display_scalar, lookup};

/// Number of upcoming snapshot times requested with every resolve call.
pub const UPCOMING_SNAPSHOT_TIMES: usize = 5;

/// Response of `POST /api/v1/policy/resolve`.
///
/// `effective` is the merged policy. `definition` has the same shape, with the
/// source whose policy supplied the value at each leaf (or at the action
/// block for snapshot actions).
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPolicy {
    #[serde(default)]
    pub effective: JsonValue,
    #[serde(default)]
    pub definition: JsonValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defined: Option<JsonValue>,
    #[serde(default)]
    pub upcoming_snapshot_times: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduling_error: Option<String>,
}

impl ResolvedPolicy {
    pub fn effective_at(&self, path: &str) -> Option<&JsonValue> {
        lookup(&self.effective, path)
    }

    /// Source that defines the value at `path`.
    pub fn defined_by(&self, path: &str) -> Option<SourceInfo> {
        let mut cur = &self.definition;
        for key in path.split('.') {
            if let Some(src) = as_source(cur) {
                return Some(src);
            }
            cur = cur.get(key)?;
        }
        as_source(cur)
    }

    pub fn effective_value(&self, path: &str) -> EffectiveValue {
        EffectiveValue {
            value: self.effective_at(path).cloned(),
            defined_by: self.defined_by(path),
        }
    }

    /// Upcoming snapshot times as local timestamps.
    pub fn upcoming_times(&self) -> Vec<String> {
        self.upcoming_snapshot_times
            .iter()
            .map(|t| format_timestamp(Some(t)))
            .filter(|t| !t.is_empty())
            .collect()
    }
}

fn as_source(v: &JsonValue) -> Option<SourceInfo> {
    if v.get("host").is_none() {
        return None;
    }
    serde_json::from_value(v.clone()).ok()
}

/// Value shown next to a policy field: what applies after inheritance and
/// where it comes from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectiveValue {
    pub value: Option<JsonValue>,
    pub defined_by: Option<SourceInfo>,
}

impl EffectiveValue {
    pub fn text(&self) -> String {
        match &self.value {
            Some(JsonValue::Array(items)) => items.iter().map(value_text).collect::<Vec<_>>().join(", "),
            Some(v) => value_text(v),
            None => String::new(),
        }
    }

    /// The defining source when it is not the policy being edited; the UI
    /// links to it as "Defined by ...".
    pub fn defined_elsewhere(&self, owner: &SourceInfo) -> Option<&SourceInfo> {
        self.defined_by.as_ref().filter(|src| *src != owner)
    }
}

fn value_text(v: &JsonValue) -> String {
    match v {
        JsonValue::Object(map) if map.contains_key("hour") => {
            let hour = map.get("hour").and_then(JsonValue::as_i64).unwrap_or(0);
            let min = map.get("min").and_then(JsonValue::as_i64).unwrap_or(0);
            format!("{}:{:02}", hour, min)
        }
        other => display_scalar(other),
    }
}
