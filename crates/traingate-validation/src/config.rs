//! Configuration for the validation gate.
//!
//! A [`ValidationConfig`] is constructed once at process start via the
//! builder and passed into [`DataValidator::new`](crate::DataValidator::new).
//! Components never consult ambient/global state.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ValidationError;

/// Default significance threshold for the per-column drift test.
pub const DEFAULT_DRIFT_THRESHOLD: f64 = 0.05;

/// Configuration for one validation run.
///
/// Datasets that pass schema validation are routed to the `valid_*` paths,
/// failing ones to the `invalid_*` paths. Parent directories are created on
/// demand. The drift report is always written to `drift_report_path`, even
/// when drift detection is skipped (an empty document in that case), so
/// downstream readers have a consistent path contract.
///
/// # Example
///
/// ```rust,ignore
/// use traingate_validation::ValidationConfig;
///
/// let config = ValidationConfig::builder()
///     .output_root("artifacts/data_validation")
///     .drift_threshold(0.05)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Destination for a train dataset that passed schema validation.
    pub valid_train_path: PathBuf,

    /// Destination for a test dataset that passed schema validation.
    pub valid_test_path: PathBuf,

    /// Destination for a train dataset that failed schema validation.
    pub invalid_train_path: PathBuf,

    /// Destination for a test dataset that failed schema validation.
    pub invalid_test_path: PathBuf,

    /// Where the per-column drift report is written.
    pub drift_report_path: PathBuf,

    /// Significance threshold for the two-sample drift test.
    /// A column drifts iff its p-value is strictly below this value.
    /// Default: 0.05
    pub drift_threshold: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        let root = PathBuf::from("artifacts/data_validation");
        Self {
            valid_train_path: root.join("validated/train.csv"),
            valid_test_path: root.join("validated/test.csv"),
            invalid_train_path: root.join("invalid/train.csv"),
            invalid_test_path: root.join("invalid/test.csv"),
            drift_report_path: root.join("drift_report/report.yaml"),
            drift_threshold: DEFAULT_DRIFT_THRESHOLD,
        }
    }
}

impl ValidationConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ValidationConfigBuilder {
        ValidationConfigBuilder::default()
    }

    /// Validate the configuration and return an error if invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.drift_threshold > 0.0 && self.drift_threshold < 1.0) {
            return Err(ValidationError::Config(format!(
                "drift_threshold must be in (0.0, 1.0), got {}",
                self.drift_threshold
            )));
        }
        Ok(())
    }
}

/// Builder for [`ValidationConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ValidationConfigBuilder {
    output_root: Option<PathBuf>,
    valid_train_path: Option<PathBuf>,
    valid_test_path: Option<PathBuf>,
    invalid_train_path: Option<PathBuf>,
    invalid_test_path: Option<PathBuf>,
    drift_report_path: Option<PathBuf>,
    drift_threshold: Option<f64>,
}

impl ValidationConfigBuilder {
    /// Derive all five output paths from a single root directory.
    ///
    /// Individual path setters take precedence over the derived layout.
    pub fn output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = Some(root.into());
        self
    }

    /// Set the destination for a schema-valid train dataset.
    pub fn valid_train_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.valid_train_path = Some(path.into());
        self
    }

    /// Set the destination for a schema-valid test dataset.
    pub fn valid_test_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.valid_test_path = Some(path.into());
        self
    }

    /// Set the destination for a schema-invalid train dataset.
    pub fn invalid_train_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.invalid_train_path = Some(path.into());
        self
    }

    /// Set the destination for a schema-invalid test dataset.
    pub fn invalid_test_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.invalid_test_path = Some(path.into());
        self
    }

    /// Set the drift-report output path.
    pub fn drift_report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.drift_report_path = Some(path.into());
        self
    }

    /// Set the drift significance threshold (default: 0.05).
    pub fn drift_threshold(mut self, threshold: f64) -> Self {
        self.drift_threshold = Some(threshold);
        self
    }

    /// Build the configuration, validating all settings.
    pub fn build(self) -> Result<ValidationConfig, ValidationError> {
        let root = self
            .output_root
            .unwrap_or_else(|| PathBuf::from("artifacts/data_validation"));

        let config = ValidationConfig {
            valid_train_path: self
                .valid_train_path
                .unwrap_or_else(|| root.join("validated/train.csv")),
            valid_test_path: self
                .valid_test_path
                .unwrap_or_else(|| root.join("validated/test.csv")),
            invalid_train_path: self
                .invalid_train_path
                .unwrap_or_else(|| root.join("invalid/train.csv")),
            invalid_test_path: self
                .invalid_test_path
                .unwrap_or_else(|| root.join("invalid/test.csv")),
            drift_report_path: self
                .drift_report_path
                .unwrap_or_else(|| root.join("drift_report/report.yaml")),
            drift_threshold: self.drift_threshold.unwrap_or(DEFAULT_DRIFT_THRESHOLD),
        };

        config.validate()?;
        Ok(config)
    }
}
