use std::collections::BTreeMap;

use thiserror::Error;

use crate::api::{ApiClient, Backend};
use crate::error::{ApiError, ValidationError};
use crate::types::{Algorithms, SourceInfo};

use super::draft::PolicyDraft;
use super::fields::FieldSpec;
use super::resolve::{EffectiveValue, ResolvedPolicy, UPCOMING_SNAPSHOT_TIMES};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum EditorError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("the global policy cannot be deleted")]
    GlobalPolicy,
}

/// State of the policy editor for one target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolicyEditor {
    target: SourceInfo,
    draft: PolicyDraft,
    is_new: bool,
    algorithms: Option<Algorithms>,
    resolved: Option<ResolvedPolicy>,
    field_errors: BTreeMap<String, String>,
}

impl PolicyEditor {
    pub fn new(target: SourceInfo) -> Self {
        Self { target, ..Default::default() }
    }

    pub fn target(&self) -> &SourceInfo {
        &self.target
    }

    pub fn is_global(&self) -> bool {
        self.target.is_global()
    }

    /// True when the target had no policy when loaded.
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn draft(&self) -> &PolicyDraft {
        &self.draft
    }

    pub fn resolved(&self) -> Option<&ResolvedPolicy> {
        self.resolved.as_ref()
    }

    pub fn field_error(&self, path: &str) -> Option<&str> {
        self.field_errors.get(path).map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        !self.field_errors.is_empty()
    }

    /// Fetches the policy and the compression algorithms, then resolves the
    /// draft once. A missing policy starts a blank draft; failing to list
    /// algorithms only leaves the compressor select empty.
    pub async fn load<B: Backend>(&mut self, api: &ApiClient<B>) -> Result<(), ApiError> {
        let (policy, algorithms) = futures::join!(api.policy(&self.target), api.algorithms());

        match policy? {
            Some(value) => {
                self.draft = PolicyDraft::from_json(value);
                self.is_new = false;
            }
            None => {
                tracing::debug!(source = %self.target, "no policy defined, starting blank");
                self.draft = PolicyDraft::default();
                self.is_new = true;
            }
        }
        self.field_errors.clear();

        match algorithms {
            Ok(a) => self.algorithms = Some(a),
            Err(e) => tracing::warn!(error = %e, "failed to list compression algorithms"),
        }

        self.resolve(api).await;
        Ok(())
    }

    /// Applies form input to one field. Invalid input leaves the draft
    /// unchanged and marks the field.
    pub fn update(&mut self, field: &FieldSpec, input: &str) -> Result<(), ValidationError> {
        match self.draft.set_from_input(field, input) {
            Ok(()) => {
                self.field_errors.remove(field.path);
                Ok(())
            }
            Err(e) => {
                self.field_errors.insert(field.path.to_string(), e.to_string());
                Err(e)
            }
        }
    }

    /// Asks the backend to resolve the draft against its parents. Failures
    /// keep the previous result.
    pub async fn resolve<B: Backend>(&mut self, api: &ApiClient<B>) {
        let draft = self.draft.clone();
        if let Some(resolved) = Self::fetch_resolved(api, &self.target, &draft).await {
            self.apply_resolved(&draft, resolved);
        }
    }

    /// Resolve request for a draft snapshot, without touching any editor.
    /// `None` when the backend call failed.
    pub async fn fetch_resolved<B: Backend>(
        api: &ApiClient<B>,
        target: &SourceInfo,
        draft: &PolicyDraft,
    ) -> Option<ResolvedPolicy> {
        match api.resolve_policy(target, draft.as_json(), UPCOMING_SNAPSHOT_TIMES).await {
            Ok(r) => Some(r),
            Err(e) => {
                tracing::debug!(error = %e, "policy resolve failed");
                None
            }
        }
    }

    /// Stores a resolve result computed for `draft`. Results for an older
    /// draft are dropped; nothing else of the editor state changes.
    pub fn apply_resolved(&mut self, draft: &PolicyDraft, resolved: ResolvedPolicy) -> bool {
        if *draft != self.draft {
            return false;
        }
        self.resolved = Some(resolved);
        true
    }

    pub fn effective(&self, path: &str) -> EffectiveValue {
        self.resolved.as_ref().map(|r| r.effective_value(path)).unwrap_or_default()
    }

    /// Compressor select options: `(value, label)`, starting with inherit.
    pub fn compression_options(&self) -> Vec<(String, String)> {
        let mut options = vec![(String::new(), "(inherit)".to_string())];
        if let Some(a) = &self.algorithms {
            for algo in a.compression.iter().filter(|c| !c.deprecated) {
                let label = if algo.id == a.default_compression {
                    format!("{} (default)", algo.id)
                } else {
                    algo.id.clone()
                };
                options.push((algo.id.clone(), label));
            }
        }
        options
    }

    /// Sanitizes the draft and stores it. Nothing is sent when validation fails.
    pub async fn save<B: Backend>(&mut self, api: &ApiClient<B>) -> Result<(), EditorError> {
        if let Some((field, message)) = self.field_errors.iter().next() {
            return Err(ValidationError::Invalid { field: field.clone(), message: message.clone() }.into());
        }
        let policy = self.draft.sanitized()?;
        api.put_policy(&self.target, policy.to_json()).await?;
        tracing::info!(source = %self.target, "policy saved");
        self.is_new = false;
        Ok(())
    }

    /// Deletes the target's policy. The caller confirms first.
    pub async fn delete<B: Backend>(&mut self, api: &ApiClient<B>) -> Result<(), EditorError> {
        if self.is_global() {
            return Err(EditorError::GlobalPolicy);
        }
        api.delete_policy(&self.target).await?;
        tracing::info!(source = %self.target, "policy deleted");
        self.draft = PolicyDraft::default();
        self.is_new = true;
        Ok(())
    }

    pub fn delete_confirmation(&self) -> String {
        format!("Are you sure you want to delete the policy for {}?", self.target)
    }
}
