use serde_json::Value as JsonValue;

use crate::types::{PoliciesResponse, SourceInfo};

/// Inheritance level of a policy target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PolicyLevel {
    Global,
    Host,
    User,
    Path,
}

impl PolicyLevel {
    pub fn of(target: &SourceInfo) -> Self {
        if !target.path.is_empty() {
            PolicyLevel::Path
        } else if !target.user_name.is_empty() {
            PolicyLevel::User
        } else if !target.host.is_empty() {
            PolicyLevel::Host
        } else {
            PolicyLevel::Global
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PolicyLevel::Global => "Global",
            PolicyLevel::Host => "Host",
            PolicyLevel::User => "User",
            PolicyLevel::Path => "Path",
        }
    }
}

/// Selector of the policies screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyFilter {
    All,
    Global,
    /// Policies of the given local `user@host`, plus its host policy.
    Local { user_name: String, host: String },
    /// Policies of one `user@host`.
    Owner(String),
}

impl PolicyFilter {
    pub fn matches(&self, target: &SourceInfo) -> bool {
        match self {
            PolicyFilter::All => true,
            PolicyFilter::Global => target.is_global(),
            PolicyFilter::Local { user_name, host } => {
                &target.host == host && (target.user_name.is_empty() || &target.user_name == user_name)
            }
            PolicyFilter::Owner(owner) => !target.user_name.is_empty() && &target.owner() == owner,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolicyRow {
    pub target: SourceInfo,
    pub level: PolicyLevel,
    pub summary: String,
}

/// Comma-separated names of the sections a policy defines.
pub fn policy_summary(policy: &JsonValue) -> String {
    let Some(obj) = policy.as_object() else {
        return String::new();
    };
    let sections: Vec<&str> = obj
        .iter()
        .filter(|(_, v)| !v.is_null() && v.as_object().map_or(true, |o| !o.is_empty()))
        .map(|(k, _)| k.as_str())
        .collect();
    if sections.is_empty() {
        "(empty)".to_string()
    } else {
        sections.join(", ")
    }
}

/// Rows matching `filter`, global first, then by level and target.
pub fn policy_rows(resp: &PoliciesResponse, filter: &PolicyFilter) -> Vec<PolicyRow> {
    let mut rows: Vec<PolicyRow> = resp
        .policies
        .iter()
        .filter(|p| filter.matches(&p.id))
        .map(|p| PolicyRow {
            target: p.id.clone(),
            level: PolicyLevel::of(&p.id),
            summary: policy_summary(&p.policy),
        })
        .collect();
    rows.sort_by(|a, b| a.level.cmp(&b.level).then_with(|| a.target.cmp(&b.target)));
    rows
}
