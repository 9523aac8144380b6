//! # Kopia Console Core
//!
//! Logic of the Kopia Console web UI that does not touch the DOM: the REST
//! client, the screen controllers and the formatting helpers. Everything here
//! compiles for `wasm32-unknown-unknown` as well as natively, so the
//! controllers are tested against an in-memory backend.
//!
//! ## Core Components
//!
//! - [`api`]: Typed REST client over a pluggable [`api::Backend`]
//! - [`error`]: API and validation errors
//! - [`types`]: Wire types of the backend API
//! - [`preferences`]: Shared UI preferences and the page-size normalizer
//! - [`table`]: Sorting and pagination state of the data table
//! - [`polling`]: Cancellable periodic re-fetching
//! - [`sources`], [`snapshots`], [`tasks`]: Listing screens
//! - [`policy`]: Policy editor, sanitizing and inheritance display
//! - [`browse`], [`restore`]: Snapshot browsing, mounts, restore and estimation
//! - [`format`]: Sizes, durations and timestamps
//! - [`cli`]: Command-line equivalents of console actions

pub mod api;
pub mod browse;
pub mod cli;
pub mod error;
pub mod format;
pub mod policy;
pub mod polling;
pub mod preferences;
pub mod restore;
pub mod snapshots;
pub mod sources;
pub mod table;
pub mod tasks;
pub mod types;

pub use api::{ApiClient, Backend, Method};
pub use error::{ApiError, ApiResult, ValidationError};

#[cfg(test)]
mod tests;
