use crate::error::ValidationError;

use super::model::{ActionCommand, Policy, TimeOfDayEntry};

/// Timeout given to an action script that does not set one, in seconds.
pub const DEFAULT_ACTION_TIMEOUT_SECS: i64 = 300;

/// Prepares an edited policy for saving.
///
/// Fails on the first time-of-day entry that did not parse. Otherwise empty
/// entries are removed from every string list and action blocks without a
/// script are dropped; the remaining ones get the default timeout if unset.
pub fn sanitize(mut policy: Policy) -> Result<Policy, ValidationError> {
    if let Some(scheduling) = policy.scheduling.as_mut() {
        if let Some(times) = &scheduling.time_of_day {
            if let Some(TimeOfDayEntry::Raw(raw)) = times.iter().find(|t| matches!(t, TimeOfDayEntry::Raw(_))) {
                return Err(ValidationError::InvalidTimeOfDay(raw.clone()));
            }
        }
        strip_empty(&mut scheduling.cron);
    }

    if let Some(files) = policy.files.as_mut() {
        strip_empty(&mut files.ignore);
        strip_empty(&mut files.ignore_dot_files);
    }

    if let Some(compression) = policy.compression.as_mut() {
        strip_empty(&mut compression.only_compress);
        strip_empty(&mut compression.never_compress);
    }

    if let Some(actions) = policy.actions.as_mut() {
        for slot in [
            &mut actions.before_snapshot_root,
            &mut actions.after_snapshot_root,
            &mut actions.before_folder,
            &mut actions.after_folder,
        ] {
            *slot = slot.take().and_then(sanitize_action);
        }
    }

    Ok(policy)
}

fn sanitize_action(mut action: ActionCommand) -> Option<ActionCommand> {
    match action.script.as_deref() {
        Some(script) if !script.trim().is_empty() => {
            if action.timeout.is_none() {
                action.timeout = Some(DEFAULT_ACTION_TIMEOUT_SECS);
            }
            Some(action)
        }
        _ => None,
    }
}

fn strip_empty(list: &mut Option<Vec<String>>) {
    if let Some(items) = list.as_mut() {
        items.retain(|s| !s.trim().is_empty());
    }
}
