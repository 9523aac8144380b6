//! Policy editing.
//!
//! The editor keeps the policy as a JSON draft so that half-typed input
//! survives, converts it to the typed [`Policy`] on save and sanitizes it
//! first. Inheritance is never computed here: the backend resolves the draft
//! against its parents and the result is only displayed.

mod draft;
mod editor;
mod fields;
mod list;
mod model;
mod resolve;
mod sanitize;
mod time_of_day;

pub use draft::PolicyDraft;
pub use editor::{EditorError, PolicyEditor};
pub use fields::{find_field, FieldKind, FieldSpec, Section, SECTIONS};
pub use list::{policy_rows, policy_summary, PolicyFilter, PolicyLevel, PolicyRow};
pub use model::{
    ActionCommand, ActionsPolicy, CompressionPolicy, DirLoggingPolicy, EntryLoggingPolicy, ErrorHandlingPolicy,
    FilesPolicy, LoggingPolicy, Policy, RetentionPolicy, SchedulingPolicy, TimeOfDay, TimeOfDayEntry, UploadPolicy,
};
pub use resolve::{EffectiveValue, ResolvedPolicy, UPCOMING_SNAPSHOT_TIMES};
pub use sanitize::{sanitize, DEFAULT_ACTION_TIMEOUT_SECS};
pub use time_of_day::{format_list, parse_entry, parse_list, parse_time_of_day};
