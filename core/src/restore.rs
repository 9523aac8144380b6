//! Restore and estimate requests.
//!
//! A restore writes one of three outputs, picked by the destination: a ZIP
//! archive (`.zip`), a TAR archive (`.tar`) or a directory tree.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Options of the restore form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RestoreOptions {
    pub incremental: bool,
    pub continue_on_errors: bool,
    pub restore_ownership: bool,
    pub restore_permissions: bool,
    pub restore_mod_times: bool,
    pub ignore_permission_errors: bool,
    pub overwrite_files: bool,
    pub overwrite_directories: bool,
    pub overwrite_symlinks: bool,
    pub write_files_atomically: bool,
    pub write_sparse_files: bool,
    pub uncompressed_zip: bool,
    /// Directory depth at which shallow placeholders replace real entries; 0 = unlimited.
    pub restore_dir_entry_at_depth: i64,
    pub min_size_for_placeholder: i64,
}

impl Default for RestoreOptions {
    fn default() -> Self {
        Self {
            incremental: true,
            continue_on_errors: false,
            restore_ownership: true,
            restore_permissions: true,
            restore_mod_times: true,
            ignore_permission_errors: true,
            overwrite_files: false,
            overwrite_directories: false,
            overwrite_symlinks: false,
            write_files_atomically: false,
            write_sparse_files: false,
            uncompressed_zip: true,
            restore_dir_entry_at_depth: 1_000_000,
            min_size_for_placeholder: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonRestoreOptions {
    pub incremental: bool,
    pub ignore_errors: bool,
    pub restore_dir_entry_at_depth: i64,
    pub min_size_for_placeholder: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilesystemOutput {
    pub target_path: String,
    pub skip_owners: bool,
    pub skip_permissions: bool,
    pub skip_times: bool,
    pub ignore_permission_errors: bool,
    pub overwrite_files: bool,
    pub overwrite_directories: bool,
    pub overwrite_symlinks: bool,
    pub write_files_atomically: bool,
    pub write_sparse_files: bool,
}

/// Body of `POST /api/v1/restore`; exactly one output is set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreRequest {
    pub root: String,
    pub options: CommonRestoreOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uncompressed_zip: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tar_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fs_output: Option<FilesystemOutput>,
}

/// Kind of output a destination selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreTarget {
    Zip,
    Tar,
    Filesystem,
}

impl RestoreTarget {
    pub fn for_destination(destination: &str) -> Self {
        let lower = destination.trim().to_lowercase();
        if lower.ends_with(".zip") {
            RestoreTarget::Zip
        } else if lower.ends_with(".tar") {
            RestoreTarget::Tar
        } else {
            RestoreTarget::Filesystem
        }
    }
}

impl RestoreRequest {
    pub fn build(root: &str, destination: &str, opts: &RestoreOptions) -> Result<Self, ValidationError> {
        let destination = destination.trim();
        if destination.is_empty() {
            return Err(ValidationError::Required { field: "destination".to_string() });
        }
        if root.is_empty() {
            return Err(ValidationError::Required { field: "root".to_string() });
        }

        let mut req = RestoreRequest {
            root: root.to_string(),
            options: CommonRestoreOptions {
                incremental: opts.incremental,
                ignore_errors: opts.continue_on_errors,
                restore_dir_entry_at_depth: opts.restore_dir_entry_at_depth,
                min_size_for_placeholder: opts.min_size_for_placeholder,
            },
            zip_file: None,
            uncompressed_zip: None,
            tar_file: None,
            fs_output: None,
        };

        match RestoreTarget::for_destination(destination) {
            RestoreTarget::Zip => {
                req.zip_file = Some(destination.to_string());
                req.uncompressed_zip = Some(opts.uncompressed_zip);
            }
            RestoreTarget::Tar => req.tar_file = Some(destination.to_string()),
            RestoreTarget::Filesystem => {
                req.fs_output = Some(FilesystemOutput {
                    target_path: destination.to_string(),
                    skip_owners: !opts.restore_ownership,
                    skip_permissions: !opts.restore_permissions,
                    skip_times: !opts.restore_mod_times,
                    ignore_permission_errors: opts.ignore_permission_errors,
                    overwrite_files: opts.overwrite_files,
                    overwrite_directories: opts.overwrite_directories,
                    overwrite_symlinks: opts.overwrite_symlinks,
                    write_files_atomically: opts.write_files_atomically,
                    write_sparse_files: opts.write_sparse_files,
                });
            }
        }
        Ok(req)
    }
}

pub const DEFAULT_MAX_EXAMPLES_PER_BUCKET: i64 = 10;

/// Body of `POST /api/v1/estimate`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    pub root: String,
    pub max_examples_per_bucket: i64,
}

impl EstimateRequest {
    pub fn new(root: &str) -> Result<Self, ValidationError> {
        let root = root.trim();
        if root.is_empty() {
            return Err(ValidationError::Required { field: "path".to_string() });
        }
        Ok(Self { root: root.to_string(), max_examples_per_bucket: DEFAULT_MAX_EXAMPLES_PER_BUCKET })
    }
}
