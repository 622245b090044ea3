//! Application layer errors.
//!
//! These are per-file failures during generation. Schema problems are
//! `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while producing output files.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The output file exists and replacing was not requested.
    #[error("{path} already exists and replace is not enabled")]
    OverwriteNotPermitted { path: PathBuf },

    #[error("could not create directory {path}: {reason}")]
    DirectoryCreateFailed { path: PathBuf, reason: String },

    #[error("could not write {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("could not read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    /// Neither the given path nor `<model_dir>/sqlapp/<name>` exists.
    #[error("model '{name}' not found (looked in {searched})")]
    ModelNotFound { name: String, searched: PathBuf },

    #[error("rendering {model} failed: {reason}")]
    RenderingFailed { model: String, reason: String },

    /// Any other filesystem operation.
    #[error("filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Shared adapter state was poisoned.
    #[error("filesystem state lock poisoned")]
    LockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::OverwriteNotPermitted { path } => vec![
                format!("{} was left untouched", path.display()),
                "Pass --replace to overwrite existing files".into(),
                "Or --force to clear the output directory first (destructive)".into(),
            ],
            Self::DirectoryCreateFailed { path, .. } | Self::WriteFailed { path, .. } => vec![
                format!("Failed to write under: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::ModelNotFound { searched, .. } => vec![
                format!("Expected a model at {}", searched.display()),
                "Set --mdldir or GENAPP_MODELS to the directory holding sqlapp/".into(),
            ],
            Self::RenderingFailed { .. } => vec![
                "Check the [[.Key]] markers in the model file".into(),
                "Supply missing keys with --define key=value".into(),
            ],
            Self::LockError => vec!["Try again; another task panicked mid-write".into()],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::OverwriteNotPermitted { .. } => ErrorCategory::Validation,
            Self::ModelNotFound { .. } => ErrorCategory::NotFound,
            Self::RenderingFailed { .. } => ErrorCategory::Validation,
            Self::DirectoryCreateFailed { .. }
            | Self::WriteFailed { .. }
            | Self::ReadFailed { .. }
            | Self::FilesystemError { .. }
            | Self::LockError => ErrorCategory::Internal,
        }
    }

    /// Path the error is about, when there is one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::OverwriteNotPermitted { path }
            | Self::DirectoryCreateFailed { path, .. }
            | Self::WriteFailed { path, .. }
            | Self::ReadFailed { path, .. }
            | Self::FilesystemError { path, .. } => Some(path),
            Self::ModelNotFound { searched, .. } => Some(searched),
            Self::RenderingFailed { .. } | Self::LockError => None,
        }
    }
}
