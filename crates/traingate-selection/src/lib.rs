//! Comparative Model Selection
//!
//! Hyperparameter tuning and held-out scoring for a menu of candidate
//! regression models, the model-side gate of an ML training pipeline.
//!
//! # Overview
//!
//! Given already-featurized train/test matrices, the selector runs, for
//! every candidate in input order:
//!
//! 1. an exhaustive grid search over the candidate's hyperparameter
//!    space, scored by k-fold cross-validation on the training set only;
//! 2. a refit of the best combination on the full training set;
//! 3. a single R² score on the held-out test set.
//!
//! All candidates are always evaluated (no early stopping), and the
//! caller picks the winner from the returned [`SelectionReport`].
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use traingate_selection::{
//!     CandidateSpec, ModelFamily, ModelSelector, ParamGrid, SelectionConfig,
//! };
//!
//! let candidates = vec![
//!     CandidateSpec::new("ols", ModelFamily::Linear, ParamGrid::new()),
//!     CandidateSpec::new(
//!         "ridge",
//!         ModelFamily::Ridge,
//!         ParamGrid::new().add("alpha", vec![0.01, 0.1, 1.0, 10.0]),
//!     ),
//!     CandidateSpec::new(
//!         "knn",
//!         ModelFamily::Knn,
//!         ParamGrid::new().add("n_neighbors", vec![3.0, 5.0, 9.0]),
//!     ),
//! ];
//!
//! let selector = ModelSelector::new(SelectionConfig::default())?;
//! let report = selector.select(&x_train, &y_train, &x_test, &y_test, &candidates)?;
//! println!("winner: {:?}", report.best());
//! ```
//!
//! # Error Handling
//!
//! Failures are tagged by [`ErrorKind`] (configuration vs model fit) and
//! per-candidate failures carry the candidate's name. The default policy
//! fails fast on the first failing candidate;
//! [`ErrorPolicy::Skip`](crate::ErrorPolicy) instead omits it from the
//! report and continues.

pub mod error;
pub mod metrics;
pub mod models;
pub mod search;
pub mod selector;

// Re-exports for convenient access
pub use error::{ErrorKind, Result, SelectionError};
pub use metrics::r2_score;
pub use models::{HyperParams, KnnRegressor, LinearRegression, ModelFamily, Regressor};
pub use search::{GridSearch, GridSearchResult, KFold, ParamGrid};
pub use selector::{
    CandidateScore, CandidateSpec, DEFAULT_CV_FOLDS, ErrorPolicy, ModelSelector, SelectionConfig,
    SelectionConfigBuilder, SelectionReport,
};
