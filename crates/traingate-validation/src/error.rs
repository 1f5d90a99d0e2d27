//! Error types for the validation gate.
//!
//! All fatal faults are tagged with a category so callers can branch on
//! [`ErrorKind`] instead of inspecting messages. Statistical faults inside
//! the drift test are absorbed locally with a deterministic fallback and
//! never surface here.

use std::path::PathBuf;
use thiserror::Error;

/// Failure category of a [`ValidationError`].
///
/// Configuration errors abort before any dataset is processed; I/O errors
/// abort the orchestration run they occur in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Schema or configuration missing/malformed.
    Configuration,
    /// Dataset file unreadable or output path unwritable.
    Io,
}

/// The main error type for validation-gate operations.
///
/// Every variant carries enough context (which file, which field) to
/// diagnose a failed run without re-running it.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ValidationError {
    /// Invalid configuration provided to a component constructor.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The schema document could not be loaded or parsed.
    ///
    /// Raised at construction time, before any dataset is touched.
    #[error("Failed to load schema '{path}': {reason}")]
    SchemaLoad {
        /// Path of the schema document.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },

    /// Filesystem-level failure on a dataset or report path.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        /// The path the operation failed on.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A dataset file could not be read or written as CSV.
    #[error("Failed to process dataset '{}': {source}", path.display())]
    Dataset {
        /// The CSV file the failure refers to.
        path: PathBuf,
        #[source]
        source: polars::error::PolarsError,
    },

    /// The drift report could not be serialized to its output path.
    #[error("Failed to write drift report '{}': {source}", path.display())]
    Report {
        /// Configured drift-report path.
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl ValidationError {
    /// The failure category, for branch-on-kind handling.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) | Self::SchemaLoad { .. } => ErrorKind::Configuration,
            Self::Io { .. } | Self::Dataset { .. } | Self::Report { .. } => ErrorKind::Io,
        }
    }
}

/// Result type alias for validation-gate operations.
pub type Result<T> = std::result::Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_configuration_kind() {
        assert_eq!(
            ValidationError::Config("bad threshold".into()).kind(),
            ErrorKind::Configuration
        );
        let err = ValidationError::SchemaLoad {
            path: PathBuf::from("schema.yaml"),
            reason: "empty columns list".into(),
        };
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_io_errors_are_io_kind() {
        let err = ValidationError::Io {
            path: PathBuf::from("data/train.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_display_carries_path_context() {
        let err = ValidationError::Io {
            path: PathBuf::from("data/train.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("data/train.csv"));
    }
}
