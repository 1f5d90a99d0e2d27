//! Validation orchestrator.
//!
//! Sequences schema validation and drift detection over a train/test pair,
//! routes each dataset to its valid or invalid location, and emits the
//! [`ValidationArtifact`] that gates downstream training.

use tracing::{info, warn};

use crate::artifacts::{IngestionArtifact, ValidationArtifact};
use crate::config::ValidationConfig;
use crate::dataset::{read_dataset, write_dataset};
use crate::drift::{DriftDetector, DriftReport};
use crate::error::Result;
use crate::schema::Schema;

/// Orchestrates one validation run per training cycle.
///
/// Construction loads the schema and fails fast on a configuration error,
/// before any dataset is processed. Each [`run`](Self::run) is independent;
/// concurrent runs sharing output paths will race on file writes, so
/// callers must serialize runs per output-path namespace.
pub struct DataValidator {
    config: ValidationConfig,
    schema: Schema,
    detector: DriftDetector,
}

impl DataValidator {
    /// Create a validator from a validated config and a schema document.
    pub fn new(config: ValidationConfig, schema_path: impl AsRef<std::path::Path>) -> Result<Self> {
        config.validate()?;
        let schema = Schema::from_path(schema_path)?;
        let detector = DriftDetector::new(config.drift_threshold);
        Ok(Self {
            config,
            schema,
            detector,
        })
    }

    /// The loaded schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Validate one train/test pair.
    ///
    /// Steps, strictly sequential:
    /// 1. load both datasets;
    /// 2. schema-validate each side independently;
    /// 3. route each dataset to its valid or invalid location;
    /// 4. iff BOTH sides passed, run drift detection with train as
    ///    reference and test as candidate; otherwise the overall status
    ///    is `false`, drift is not attempted, and an empty drift report is
    ///    written so the report path contract holds for downstream readers;
    /// 5. return the populated artifact.
    ///
    /// Any I/O failure aborts the whole run; nothing is retried here.
    pub fn run(&self, ingestion: &IngestionArtifact) -> Result<ValidationArtifact> {
        info!(
            "Validating train '{}' / test '{}'",
            ingestion.train_path.display(),
            ingestion.test_path.display()
        );

        let mut train = read_dataset(&ingestion.train_path)?;
        let mut test = read_dataset(&ingestion.test_path)?;

        let train_valid = self.schema.validate_columns(&train);
        let test_valid = self.schema.validate_columns(&test);

        let (valid_train_path, invalid_train_path) = if train_valid {
            write_dataset(&mut train, &self.config.valid_train_path)?;
            (Some(self.config.valid_train_path.clone()), None)
        } else {
            write_dataset(&mut train, &self.config.invalid_train_path)?;
            (None, Some(self.config.invalid_train_path.clone()))
        };

        let (valid_test_path, invalid_test_path) = if test_valid {
            write_dataset(&mut test, &self.config.valid_test_path)?;
            (Some(self.config.valid_test_path.clone()), None)
        } else {
            write_dataset(&mut test, &self.config.invalid_test_path)?;
            (None, Some(self.config.invalid_test_path.clone()))
        };

        let status = if train_valid && test_valid {
            let outcome = self
                .detector
                .run(&train, &test, &self.config.drift_report_path)?;
            outcome.no_drift
        } else {
            warn!("Schema validation failed; drift detection skipped");
            DriftReport::empty().write_yaml(&self.config.drift_report_path)?;
            false
        };

        info!("Validation finished: status = {status}");
        Ok(ValidationArtifact {
            status,
            valid_train_path,
            valid_test_path,
            invalid_train_path,
            invalid_test_path,
            drift_report_path: self.config.drift_report_path.clone(),
        })
    }
}
