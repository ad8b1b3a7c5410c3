//! Error types for the structpath library
//!
//! This module provides the error type shared by every library operation:
//! precondition checks, value coercion, document loading, and job
//! configuration.

use crate::core::ValueKind;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for all library operations
#[derive(Error, Debug)]
pub enum StructPathError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing or serialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A caller-supplied argument failed validation before any traversal
    #[error("Failed precondition: {message}")]
    Precondition { message: String },

    /// A leaf could not be interpreted as a number
    #[error("Unable to parse to {target}. Identified value type: {kind} Property value: {value}")]
    NumberFormat {
        target: &'static str,
        kind: ValueKind,
        value: String,
    },

    /// A leaf is structurally incompatible with the requested type
    #[error("Unable to parse to {target}. Identified value type: {kind} Property value: {value}")]
    Parse {
        target: &'static str,
        kind: ValueKind,
        value: String,
    },

    /// File not found or invalid path
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// A document could not be decoded
    #[error("Invalid document in {path}: {reason}")]
    InvalidDocument { path: PathBuf, reason: String },

    /// Job configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    Config { key: String, reason: String },

    /// Generic validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Multiple errors (for batch operations)
    #[error("{} errors occurred: {}", .errors.len(), join_messages(.errors))]
    Multiple { errors: Vec<StructPathError> },
}

fn join_messages(errors: &[StructPathError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, StructPathError>;

impl StructPathError {
    /// Create a new precondition error
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition {
            message: message.into(),
        }
    }

    /// Create a new number format error
    pub fn number_format(target: &'static str, kind: ValueKind, value: impl Into<String>) -> Self {
        Self::NumberFormat {
            target,
            kind,
            value: value.into(),
        }
    }

    /// Create a new parse error
    pub fn parse(target: &'static str, kind: ValueKind, value: impl Into<String>) -> Self {
        Self::Parse {
            target,
            kind,
            value: value.into(),
        }
    }

    /// Create a new file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a new invalid document error
    pub fn invalid_document(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidDocument {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Config {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a multiple errors wrapper
    pub fn multiple(errors: Vec<StructPathError>) -> Self {
        Self::Multiple { errors }
    }

    /// Check if this error only affects a single record
    ///
    /// Recoverable errors let a batch job move on to the next record; the
    /// others abort the run.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(io_err) => !matches!(
                io_err.kind(),
                std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied
            ),
            Self::FileNotFound { .. } | Self::Precondition { .. } | Self::Config { .. } => false,
            Self::NumberFormat { .. }
            | Self::Parse { .. }
            | Self::InvalidDocument { .. }
            | Self::Validation { .. } => true,
            Self::Json(_) | Self::Yaml(_) => true,
            Self::Multiple { errors } => errors.iter().all(|e| e.is_recoverable()),
        }
    }
}
