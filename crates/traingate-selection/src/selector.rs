//! Comparative model selection.
//!
//! Every candidate is tuned on the training set, refit with its best
//! hyperparameters, and scored once on the held-out test set with the
//! same metric. The caller picks a winner from the returned report; no
//! early stopping happens here.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, SelectionError};
use crate::metrics::r2_score;
use crate::models::ModelFamily;
use crate::search::{GridSearch, ParamGrid};

/// Default cross-validation fold count for the per-candidate grid search.
pub const DEFAULT_CV_FOLDS: usize = 3;

/// How a per-candidate failure is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ErrorPolicy {
    /// Abort the whole selection on the first failing candidate,
    /// propagating an error attributed to it. The default.
    #[default]
    FailFast,
    /// Log the failure, omit the candidate from the report, and continue
    /// with the remaining candidates.
    Skip,
}

/// Configuration for a [`ModelSelector`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Cross-validation folds used inside each candidate's grid search.
    /// Default: 3
    pub cv_folds: usize,

    /// Per-candidate failure handling. Default: [`ErrorPolicy::FailFast`]
    pub error_policy: ErrorPolicy,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            cv_folds: DEFAULT_CV_FOLDS,
            error_policy: ErrorPolicy::default(),
        }
    }
}

impl SelectionConfig {
    /// Create a new configuration builder.
    pub fn builder() -> SelectionConfigBuilder {
        SelectionConfigBuilder::default()
    }

    /// Validate the configuration and return an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.cv_folds < 2 {
            return Err(SelectionError::InvalidConfig(format!(
                "cv_folds must be at least 2, got {}",
                self.cv_folds
            )));
        }
        Ok(())
    }
}

/// Builder for [`SelectionConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct SelectionConfigBuilder {
    cv_folds: Option<usize>,
    error_policy: Option<ErrorPolicy>,
}

impl SelectionConfigBuilder {
    /// Set the cross-validation fold count (default: 3).
    pub fn cv_folds(mut self, folds: usize) -> Self {
        self.cv_folds = Some(folds);
        self
    }

    /// Set the per-candidate failure policy (default: fail-fast).
    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = Some(policy);
        self
    }

    /// Build the configuration, validating all settings.
    pub fn build(self) -> Result<SelectionConfig> {
        let config = SelectionConfig {
            cv_folds: self.cv_folds.unwrap_or(DEFAULT_CV_FOLDS),
            error_policy: self.error_policy.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }
}

/// One candidate: a model family plus its hyperparameter search space.
#[derive(Debug, Clone)]
pub struct CandidateSpec {
    /// Name the candidate is reported under.
    pub name: String,
    /// Which model family to instantiate.
    pub family: ModelFamily,
    /// Search space for the family's hyperparameters.
    pub grid: ParamGrid,
}

impl CandidateSpec {
    /// Convenience constructor.
    pub fn new(name: impl Into<String>, family: ModelFamily, grid: ParamGrid) -> Self {
        Self {
            name: name.into(),
            family,
            grid,
        }
    }
}

/// Held-out score of one evaluated candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    /// Candidate name, as supplied in its spec.
    pub name: String,
    /// R² on the held-out test set; higher is better.
    pub test_score: f64,
}

/// Scores of all evaluated candidates, in input order.
///
/// Immutable once returned; the caller picks the winner, typically via
/// [`best`](Self::best).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionReport {
    entries: Vec<CandidateScore>,
}

impl SelectionReport {
    /// Evaluated candidates in input order.
    pub fn entries(&self) -> &[CandidateScore] {
        &self.entries
    }

    /// Score of a candidate by name, if it was evaluated.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.test_score)
    }

    /// The highest-scoring candidate. Ties keep the earlier entry.
    pub fn best(&self) -> Option<&CandidateScore> {
        self.entries.iter().reduce(|best, entry| {
            if entry.test_score > best.test_score {
                entry
            } else {
                best
            }
        })
    }

    /// Number of evaluated candidates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no candidate was evaluated.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Tunes and scores a menu of candidates against a train/test split.
#[derive(Debug, Clone)]
pub struct ModelSelector {
    config: SelectionConfig,
}

impl ModelSelector {
    /// Create a selector from a validated configuration.
    pub fn new(config: SelectionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Evaluate every candidate and report its held-out score.
    ///
    /// Per candidate, in input order: exhaustive grid search with k-fold
    /// cross-validation on the training set, refit of the best
    /// combination on the full training set, then a single R² score on
    /// the held-out test set. All candidates are always evaluated; the
    /// report never reorders them.
    ///
    /// Under [`ErrorPolicy::FailFast`] the first failing candidate aborts
    /// the selection with an error naming it; under
    /// [`ErrorPolicy::Skip`] it is logged and omitted from the report.
    pub fn select(
        &self,
        x_train: &Array2<f64>,
        y_train: &Array1<f64>,
        x_test: &Array2<f64>,
        y_test: &Array1<f64>,
        candidates: &[CandidateSpec],
    ) -> Result<SelectionReport> {
        check_shapes(x_train, y_train, x_test, y_test)?;

        let mut entries = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            match self.evaluate(candidate, x_train, y_train, x_test, y_test) {
                Ok(test_score) => {
                    info!("Candidate '{}': test R2 {test_score:.6}", candidate.name);
                    entries.push(CandidateScore {
                        name: candidate.name.clone(),
                        test_score,
                    });
                }
                Err(source) => {
                    let err = SelectionError::for_candidate(&candidate.name, source);
                    match self.config.error_policy {
                        ErrorPolicy::FailFast => return Err(err),
                        ErrorPolicy::Skip => {
                            warn!("Skipping failed candidate: {err}");
                        }
                    }
                }
            }
        }

        Ok(SelectionReport { entries })
    }

    fn evaluate(
        &self,
        candidate: &CandidateSpec,
        x_train: &Array2<f64>,
        y_train: &Array1<f64>,
        x_test: &Array2<f64>,
        y_test: &Array1<f64>,
    ) -> Result<f64> {
        let search = GridSearch::new(self.config.cv_folds);
        let best = search.search(candidate.family, &candidate.grid, x_train, y_train)?;
        info!(
            "Candidate '{}': best params {:?} (CV R2 {:.6})",
            candidate.name, best.params, best.cv_score
        );

        let mut model = candidate.family.build(&best.params)?;
        model.fit(x_train, y_train)?;
        let predictions = model.predict(x_test)?;
        r2_score(y_test, &predictions)
    }
}

fn check_shapes(
    x_train: &Array2<f64>,
    y_train: &Array1<f64>,
    x_test: &Array2<f64>,
    y_test: &Array1<f64>,
) -> Result<()> {
    if x_train.nrows() != y_train.len() {
        return Err(SelectionError::ShapeMismatch(format!(
            "train features have {} rows but {} labels were given",
            x_train.nrows(),
            y_train.len()
        )));
    }
    if x_test.nrows() != y_test.len() {
        return Err(SelectionError::ShapeMismatch(format!(
            "test features have {} rows but {} labels were given",
            x_test.nrows(),
            y_test.len()
        )));
    }
    if x_train.ncols() != x_test.ncols() {
        return Err(SelectionError::ShapeMismatch(format!(
            "train has {} feature columns but test has {}",
            x_train.ncols(),
            x_test.ncols()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn toy_split() -> (Array2<f64>, Array1<f64>, Array2<f64>, Array1<f64>) {
        let x_train = array![[0.0], [1.0], [2.0], [3.0], [4.0], [5.0]];
        let y_train = array![1.0, 3.0, 5.0, 7.0, 9.0, 11.0];
        let x_test = array![[6.0], [7.0]];
        let y_test = array![13.0, 15.0];
        (x_train, y_train, x_test, y_test)
    }

    #[test]
    fn test_report_preserves_input_order() {
        let (x_train, y_train, x_test, y_test) = toy_split();
        let candidates = [
            CandidateSpec::new("knn", ModelFamily::Knn, ParamGrid::new().add("n_neighbors", vec![1.0])),
            CandidateSpec::new("ols", ModelFamily::Linear, ParamGrid::new()),
        ];

        let report = ModelSelector::new(SelectionConfig::default())
            .unwrap()
            .select(&x_train, &y_train, &x_test, &y_test, &candidates)
            .unwrap();

        let names: Vec<&str> = report.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["knn", "ols"]);
    }

    #[test]
    fn test_best_picks_highest_score() {
        let (x_train, y_train, x_test, y_test) = toy_split();
        let candidates = [
            CandidateSpec::new("knn", ModelFamily::Knn, ParamGrid::new().add("n_neighbors", vec![2.0])),
            CandidateSpec::new("ols", ModelFamily::Linear, ParamGrid::new()),
        ];

        let report = ModelSelector::new(SelectionConfig::default())
            .unwrap()
            .select(&x_train, &y_train, &x_test, &y_test, &candidates)
            .unwrap();

        // The data is exactly linear and the test points extrapolate past
        // the training range, so OLS must beat nearest-neighbor averaging.
        assert_eq!(report.best().unwrap().name, "ols");
    }

    #[test]
    fn test_shape_mismatch_detected_before_fitting() {
        let (x_train, _, x_test, y_test) = toy_split();
        let y_train = array![1.0, 2.0];

        let err = ModelSelector::new(SelectionConfig::default())
            .unwrap()
            .select(&x_train, &y_train, &x_test, &y_test, &[])
            .unwrap_err();
        assert!(matches!(err, SelectionError::ShapeMismatch(_)));
    }

    #[test]
    fn test_invalid_cv_folds_rejected() {
        assert!(SelectionConfig::builder().cv_folds(1).build().is_err());
        assert!(ModelSelector::new(SelectionConfig {
            cv_folds: 0,
            error_policy: ErrorPolicy::FailFast,
        })
        .is_err());
    }
}
