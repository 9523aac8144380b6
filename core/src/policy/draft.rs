use serde_json::{Map, Value as JsonValue};

use crate::error::ValidationError;

use super::fields::{select_is_numeric, FieldKind, FieldSpec};
use super::model::{Policy, TimeOfDayEntry};
use super::sanitize::sanitize;
use super::time_of_day::{format_list, parse_list};

/// The policy as edited, kept as raw JSON so that half-typed values survive
/// until save.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyDraft(JsonValue);

impl Default for PolicyDraft {
    fn default() -> Self {
        Self(JsonValue::Object(Map::new()))
    }
}

impl PolicyDraft {
    pub fn from_json(value: JsonValue) -> Self {
        match value {
            JsonValue::Object(_) => Self(value),
            _ => Self::default(),
        }
    }

    pub fn from_policy(policy: &Policy) -> Self {
        Self::from_json(policy.to_json())
    }

    pub fn as_json(&self) -> &JsonValue {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.as_object().map_or(true, Map::is_empty)
    }

    pub fn get(&self, path: &str) -> Option<&JsonValue> {
        lookup(&self.0, path)
    }

    /// Sets the value at `path`, creating intermediate objects. `Null` removes
    /// the value and prunes parents left empty.
    pub fn set(&mut self, path: &str, value: JsonValue) {
        if value.is_null() {
            self.remove(path);
            return;
        }
        let mut keys: Vec<&str> = path.split('.').collect();
        let Some(last) = keys.pop() else { return };
        let mut cur = &mut self.0;
        for key in keys {
            if !cur.is_object() {
                *cur = JsonValue::Object(Map::new());
            }
            let Some(obj) = cur.as_object_mut() else { return };
            cur = obj.entry(key.to_string()).or_insert_with(|| JsonValue::Object(Map::new()));
        }
        if !cur.is_object() {
            *cur = JsonValue::Object(Map::new());
        }
        if let Some(obj) = cur.as_object_mut() {
            obj.insert(last.to_string(), value);
        }
    }

    pub fn remove(&mut self, path: &str) {
        let keys: Vec<&str> = path.split('.').collect();
        remove_pruning(&mut self.0, &keys);
    }

    /// Applies form input to a field. Empty input unsets the field so the
    /// value is inherited again.
    pub fn set_from_input(&mut self, field: &FieldSpec, input: &str) -> Result<(), ValidationError> {
        let text = input.trim();
        if text.is_empty() {
            self.remove(field.path);
            return Ok(());
        }
        let value = match field.kind {
            FieldKind::Number | FieldKind::Bytes => JsonValue::from(parse_number(field.path, text)?),
            FieldKind::Bool => match text {
                "true" => JsonValue::Bool(true),
                "false" => JsonValue::Bool(false),
                other => {
                    return Err(ValidationError::Invalid {
                        field: field.path.to_string(),
                        message: format!("'{}' is not true or false", other),
                    })
                }
            },
            FieldKind::StringList => JsonValue::from(input.lines().map(str::trim).map(str::to_string).collect::<Vec<_>>()),
            FieldKind::TimeOfDayList => serde_json::to_value(parse_list(input)).map_err(|e| ValidationError::Invalid {
                field: field.path.to_string(),
                message: e.to_string(),
            })?,
            FieldKind::Select(options) if select_is_numeric(options) => JsonValue::from(parse_number(field.path, text)?),
            FieldKind::Text | FieldKind::Select(_) | FieldKind::Compressor => JsonValue::String(input.to_string()),
        };
        self.set(field.path, value);
        Ok(())
    }

    /// Form text of a field, the inverse of [`PolicyDraft::set_from_input`].
    pub fn display(&self, field: &FieldSpec) -> String {
        let Some(value) = self.get(field.path) else {
            return String::new();
        };
        match field.kind {
            FieldKind::StringList => value
                .as_array()
                .map(|a| a.iter().filter_map(JsonValue::as_str).collect::<Vec<_>>().join("\n"))
                .unwrap_or_default(),
            FieldKind::TimeOfDayList => serde_json::from_value::<Vec<TimeOfDayEntry>>(value.clone())
                .map(|entries| format_list(&entries))
                .unwrap_or_default(),
            _ => display_scalar(value),
        }
    }

    /// Entries of the time-of-day list that did not parse.
    pub fn invalid_times(&self) -> Vec<String> {
        self.get("scheduling.timeOfDay")
            .and_then(|v| serde_json::from_value::<Vec<TimeOfDayEntry>>(v.clone()).ok())
            .unwrap_or_default()
            .into_iter()
            .filter_map(|e| match e {
                TimeOfDayEntry::Raw(s) => Some(s),
                TimeOfDayEntry::Parsed(_) => None,
            })
            .collect()
    }

    pub fn to_policy(&self) -> Result<Policy, ValidationError> {
        serde_json::from_value(self.0.clone()).map_err(|e| ValidationError::Invalid {
            field: "policy".to_string(),
            message: e.to_string(),
        })
    }

    /// The policy as it would be saved.
    pub fn sanitized(&self) -> Result<Policy, ValidationError> {
        sanitize(self.to_policy()?)
    }

    /// Pretty JSON of the sanitized policy, or the validation error text.
    pub fn preview(&self) -> String {
        match self.sanitized() {
            Ok(p) => serde_json::to_string_pretty(&p).unwrap_or_default(),
            Err(e) => e.to_string(),
        }
    }
}

fn parse_number(field: &str, text: &str) -> Result<i64, ValidationError> {
    text.parse::<i64>().map_err(|_| ValidationError::InvalidNumber {
        field: field.to_string(),
        value: text.to_string(),
    })
}

pub(crate) fn display_scalar(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub(crate) fn lookup<'a>(root: &'a JsonValue, path: &str) -> Option<&'a JsonValue> {
    path.split('.')
        .try_fold(root, |cur, key| cur.get(key))
        .filter(|v| !v.is_null())
}

fn remove_pruning(cur: &mut JsonValue, keys: &[&str]) -> bool {
    let Some(obj) = cur.as_object_mut() else {
        return false;
    };
    match keys {
        [] => return false,
        [last] => {
            obj.remove(*last);
        }
        [first, rest @ ..] => {
            if let Some(child) = obj.get_mut(*first) {
                if remove_pruning(child, rest) {
                    obj.remove(*first);
                }
            }
        }
    }
    obj.is_empty()
}
