//! Training-Pipeline Validation Gate
//!
//! Schema validation and distribution-drift detection for tabular
//! datasets entering an ML training pipeline, built with Rust and Polars.
//!
//! # Overview
//!
//! This library provides the data-side gate of a training pipeline:
//!
//! - **Schema Validation**: Column-count check of an ingested dataset
//!   against a declared schema document
//! - **Drift Detection**: Per-column two-sample Kolmogorov–Smirnov tests
//!   between a reference and a candidate dataset, aggregated into an
//!   auditable report
//! - **Orchestration**: Routing of valid/invalid datasets and emission of
//!   a validation artifact that gates downstream training
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use traingate_validation::{DataValidator, IngestionArtifact, ValidationConfig};
//!
//! let config = ValidationConfig::builder()
//!     .output_root("artifacts/data_validation")
//!     .drift_threshold(0.05)
//!     .build()?;
//!
//! let validator = DataValidator::new(config, "schema.yaml")?;
//! let artifact = validator.run(&IngestionArtifact::new(
//!     "ingested/train.csv",
//!     "ingested/test.csv",
//! ))?;
//!
//! if artifact.status {
//!     println!("Gate open: train on {:?}", artifact.valid_train_path);
//! }
//! ```
//!
//! # Error Handling
//!
//! All fatal faults carry a [`ErrorKind`] category (configuration vs I/O)
//! and the offending path, so callers can branch on kind without string
//! inspection. Statistical faults inside the drift test are absorbed with
//! a deterministic no-drift fallback and never surface as errors.

pub mod artifacts;
pub mod config;
pub mod dataset;
pub mod drift;
pub mod error;
pub mod schema;
pub mod validator;

// Re-exports for convenient access
pub use artifacts::{IngestionArtifact, ValidationArtifact};
pub use config::{DEFAULT_DRIFT_THRESHOLD, ValidationConfig, ValidationConfigBuilder};
pub use dataset::{read_dataset, write_dataset};
pub use drift::{ColumnDrift, DriftDetector, DriftOutcome, DriftReport, ks_two_sample};
pub use error::{ErrorKind, Result, ValidationError};
pub use schema::{Schema, SchemaColumn};
pub use validator::DataValidator;
