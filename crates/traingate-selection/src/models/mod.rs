//! Candidate model families.
//!
//! The selector works against the [`Regressor`] trait; the fixed menu of
//! families lives in [`ModelFamily`], which turns a hyperparameter
//! combination into a ready-to-fit boxed model. Hyperparameter values are
//! plain `f64`s, matching the numerically encoded matrices the selector
//! consumes; integer-valued parameters are validated at build time.

mod linear;
mod knn;

pub use knn::KnnRegressor;
pub use linear::LinearRegression;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Result, SelectionError};

/// One hyperparameter combination: parameter name to value.
pub type HyperParams = BTreeMap<String, f64>;

/// A fittable regression model.
///
/// Implementations must be deterministic: fitting the same data with the
/// same hyperparameters reproduces the same predictions.
pub trait Regressor: std::fmt::Debug {
    /// Fit the model on a feature matrix and its aligned label vector.
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()>;

    /// Predict one value per row. Fails if called before [`fit`](Self::fit).
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>>;
}

/// The fixed menu of candidate model types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelFamily {
    /// Ordinary least squares. No hyperparameters.
    Linear,
    /// L2-penalized least squares. Hyperparameter: `alpha` (default 1.0).
    Ridge,
    /// K-nearest-neighbors regressor. Hyperparameter: `n_neighbors`
    /// (positive integer, default 5).
    Knn,
}

impl ModelFamily {
    /// Stable lowercase name, used in error attribution and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Ridge => "ridge",
            Self::Knn => "knn",
        }
    }

    /// Hyperparameter names this family accepts.
    pub fn accepted_params(&self) -> &'static [&'static str] {
        match self {
            Self::Linear => &[],
            Self::Ridge => &["alpha"],
            Self::Knn => &["n_neighbors"],
        }
    }

    /// Build an unfitted model from a hyperparameter combination.
    ///
    /// Rejects parameters the family does not accept and out-of-domain
    /// values; omitted parameters take their defaults.
    pub fn build(&self, params: &HyperParams) -> Result<Box<dyn Regressor>> {
        self.check_params(params)?;

        match self {
            Self::Linear => Ok(Box::new(LinearRegression::ordinary())),
            Self::Ridge => {
                let alpha = params.get("alpha").copied().unwrap_or(1.0);
                if !(alpha.is_finite() && alpha >= 0.0) {
                    return Err(SelectionError::InvalidConfig(format!(
                        "alpha must be finite and non-negative, got {alpha}"
                    )));
                }
                Ok(Box::new(LinearRegression::ridge(alpha)))
            }
            Self::Knn => {
                let k = params.get("n_neighbors").copied().unwrap_or(5.0);
                if !(k.is_finite() && k >= 1.0 && k.fract() == 0.0) {
                    return Err(SelectionError::InvalidConfig(format!(
                        "n_neighbors must be a positive integer, got {k}"
                    )));
                }
                Ok(Box::new(KnnRegressor::new(k as usize)))
            }
        }
    }

    fn check_params(&self, params: &HyperParams) -> Result<()> {
        let accepted = self.accepted_params();
        for parameter in params.keys() {
            if !accepted.contains(&parameter.as_str()) {
                return Err(SelectionError::UnknownParameter {
                    family: self.name().to_string(),
                    parameter: parameter.clone(),
                });
            }
        }
        Ok(())
    }
}
