//! Pipeline artifacts consumed and produced by the validation gate.
//!
//! Artifacts reference file paths and status flags rather than embedding
//! raw data; each is produced once per run and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output of the upstream ingestion stage: where the split datasets live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionArtifact {
    /// Path of the ingested training dataset (CSV with header).
    pub train_path: PathBuf,
    /// Path of the ingested test dataset (CSV with header).
    pub test_path: PathBuf,
}

impl IngestionArtifact {
    /// Convenience constructor.
    pub fn new(train_path: impl Into<PathBuf>, test_path: impl Into<PathBuf>) -> Self {
        Self {
            train_path: train_path.into(),
            test_path: test_path.into(),
        }
    }
}

/// Result of one validation run, consumed by the training stage as a gate.
///
/// `status` is `true` iff both sides passed schema validation AND no
/// column drifted. For each side, exactly one of the valid/invalid paths
/// is populated, reflecting where the dataset was routed. Training must
/// only proceed on the valid paths; the calling pipeline decides the
/// policy, this record only reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationArtifact {
    /// Overall gate status: schema valid on both sides and drift-free.
    pub status: bool,
    /// Where the train dataset was written if it passed schema validation.
    pub valid_train_path: Option<PathBuf>,
    /// Where the test dataset was written if it passed schema validation.
    pub valid_test_path: Option<PathBuf>,
    /// Where the train dataset was written if it failed schema validation.
    pub invalid_train_path: Option<PathBuf>,
    /// Where the test dataset was written if it failed schema validation.
    pub invalid_test_path: Option<PathBuf>,
    /// Where the drift report was written. Always populated, even when
    /// drift detection was skipped.
    pub drift_report_path: PathBuf,
}
