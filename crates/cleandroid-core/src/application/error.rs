//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not business
//! rules. Business rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while materializing a plan.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    Filesystem { path: PathBuf, reason: String },

    /// A resource bundle name the blueprint asked for does not exist.
    #[error("Resource bundle '{bundle}' not found")]
    ResourceNotFound { bundle: String },

    /// Some files in the batch could not be written.
    #[error("{failed} of {total} artifacts failed to generate")]
    GenerationIncomplete { failed: usize, total: usize },
}

impl ApplicationError {
    pub fn filesystem(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Filesystem {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Filesystem { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Make sure no regular file sits where a directory is expected".into(),
            ],
            Self::ResourceNotFound { bundle } => vec![
                format!("No bundled resources named '{bundle}'"),
                "If CLEANDROID_RESOURCES_DIR is set, check that it contains this bundle".into(),
            ],
            Self::GenerationIncomplete { .. } => vec![
                "Fix the errors listed above and re-run the same command".into(),
                "Files that were already generated are left untouched".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ResourceNotFound { .. } => ErrorCategory::NotFound,
            Self::Filesystem { .. } | Self::GenerationIncomplete { .. } => ErrorCategory::Internal,
        }
    }
}
