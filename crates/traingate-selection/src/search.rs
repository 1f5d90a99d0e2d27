//! Exhaustive hyperparameter search with k-fold cross-validation.
//!
//! A [`ParamGrid`] enumerates the cartesian product of its per-parameter
//! value lists; [`GridSearch`] scores every combination by mean R² over
//! unshuffled contiguous folds of the training set and keeps the best.
//! The held-out test set never enters the search.

use ndarray::{Array1, Array2, Axis};
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::{Result, SelectionError};
use crate::metrics::r2_score;
use crate::models::{HyperParams, ModelFamily};

/// Hyperparameter search space: parameter name to candidate values.
///
/// An empty grid is valid and yields exactly one all-defaults
/// combination; a parameter with an empty value list is a configuration
/// error surfaced by [`combinations`](Self::combinations).
#[derive(Debug, Clone, Default)]
pub struct ParamGrid {
    params: BTreeMap<String, Vec<f64>>,
}

impl ParamGrid {
    /// An empty search space (one all-defaults combination).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add candidate values for one parameter.
    pub fn add(mut self, name: impl Into<String>, values: impl Into<Vec<f64>>) -> Self {
        self.params.insert(name.into(), values.into());
        self
    }

    /// Enumerate the full cartesian product of the grid.
    pub fn combinations(&self) -> Result<Vec<HyperParams>> {
        for (parameter, values) in &self.params {
            if values.is_empty() {
                return Err(SelectionError::EmptyGrid {
                    parameter: parameter.clone(),
                });
            }
        }

        let mut combinations = vec![HyperParams::new()];
        for (name, values) in &self.params {
            let mut expanded = Vec::with_capacity(combinations.len() * values.len());
            for base in &combinations {
                for value in values {
                    let mut combo = base.clone();
                    combo.insert(name.clone(), *value);
                    expanded.push(combo);
                }
            }
            combinations = expanded;
        }
        Ok(combinations)
    }
}

/// Contiguous, unshuffled k-fold splitter.
///
/// The first `n % k` folds receive one extra sample; every fold is
/// non-empty. Deterministic by construction: no randomness enters the
/// split.
#[derive(Debug, Clone, Copy)]
pub struct KFold {
    n_splits: usize,
}

impl KFold {
    /// Create a splitter with `n_splits` folds.
    pub fn new(n_splits: usize) -> Self {
        Self { n_splits }
    }

    /// Produce `(train_indices, validation_indices)` per fold.
    pub fn split(&self, n_samples: usize) -> Result<Vec<(Vec<usize>, Vec<usize>)>> {
        if self.n_splits < 2 {
            return Err(SelectionError::InvalidConfig(format!(
                "cross-validation needs at least 2 folds, got {}",
                self.n_splits
            )));
        }
        if n_samples < self.n_splits {
            return Err(SelectionError::InvalidConfig(format!(
                "cannot split {n_samples} samples into {} folds",
                self.n_splits
            )));
        }

        let base = n_samples / self.n_splits;
        let remainder = n_samples % self.n_splits;
        let mut folds = Vec::with_capacity(self.n_splits);
        let mut start = 0;
        for fold in 0..self.n_splits {
            let size = base + usize::from(fold < remainder);
            let validation: Vec<usize> = (start..start + size).collect();
            let train: Vec<usize> = (0..start).chain(start + size..n_samples).collect();
            folds.push((train, validation));
            start += size;
        }
        Ok(folds)
    }
}

/// Best combination found by a grid search.
#[derive(Debug, Clone)]
pub struct GridSearchResult {
    /// The winning hyperparameter combination.
    pub params: HyperParams,
    /// Its mean cross-validation R².
    pub cv_score: f64,
}

/// Exhaustive search over a [`ParamGrid`].
#[derive(Debug, Clone, Copy)]
pub struct GridSearch {
    cv_folds: usize,
}

impl GridSearch {
    /// Create a search scored with `cv_folds`-fold cross-validation.
    pub fn new(cv_folds: usize) -> Self {
        Self { cv_folds }
    }

    /// Evaluate every combination and return the best by mean CV score.
    ///
    /// Ties keep the first combination seen, making the search
    /// deterministic for a given grid.
    pub fn search(
        &self,
        family: ModelFamily,
        grid: &ParamGrid,
        x: &Array2<f64>,
        y: &Array1<f64>,
    ) -> Result<GridSearchResult> {
        if x.nrows() != y.len() {
            return Err(SelectionError::ShapeMismatch(format!(
                "{} feature rows but {} labels",
                x.nrows(),
                y.len()
            )));
        }

        let combinations = grid.combinations()?;
        let folds = KFold::new(self.cv_folds).split(x.nrows())?;

        let mut best: Option<GridSearchResult> = None;
        for params in combinations {
            let mut fold_scores = Vec::with_capacity(folds.len());
            for (train_idx, val_idx) in &folds {
                let x_fold_train = x.select(Axis(0), train_idx);
                let y_fold_train = y.select(Axis(0), train_idx);
                let x_fold_val = x.select(Axis(0), val_idx);
                let y_fold_val = y.select(Axis(0), val_idx);

                let mut model = family.build(&params)?;
                model.fit(&x_fold_train, &y_fold_train)?;
                let predictions = model.predict(&x_fold_val)?;
                fold_scores.push(r2_score(&y_fold_val, &predictions)?);
            }
            let mean_score = fold_scores.iter().sum::<f64>() / fold_scores.len() as f64;
            debug!("{} {:?}: mean CV R2 {:.6}", family.name(), params, mean_score);

            if best.as_ref().is_none_or(|b| mean_score > b.cv_score) {
                best = Some(GridSearchResult {
                    params,
                    cv_score: mean_score,
                });
            }
        }

        best.ok_or_else(|| {
            SelectionError::InvalidConfig("grid produced no combinations".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, array};

    #[test]
    fn test_empty_grid_yields_single_default_combination() {
        let combos = ParamGrid::new().combinations().unwrap();
        assert_eq!(combos, vec![HyperParams::new()]);
    }

    #[test]
    fn test_cartesian_product_size() {
        let grid = ParamGrid::new()
            .add("alpha", vec![0.1, 1.0, 10.0])
            .add("beta", vec![1.0, 2.0]);
        let combos = grid.combinations().unwrap();
        assert_eq!(combos.len(), 6);
        // Every combination carries both parameters.
        assert!(combos.iter().all(|c| c.len() == 2));
    }

    #[test]
    fn test_parameter_without_values_is_error() {
        let grid = ParamGrid::new().add("alpha", Vec::<f64>::new());
        assert!(matches!(
            grid.combinations().unwrap_err(),
            SelectionError::EmptyGrid { .. }
        ));
    }

    #[test]
    fn test_kfold_partitions_every_sample_once() {
        let folds = KFold::new(3).split(10).unwrap();
        assert_eq!(folds.len(), 3);

        let mut seen: Vec<usize> = folds.iter().flat_map(|(_, val)| val.clone()).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..10).collect::<Vec<_>>());

        // Uneven split: first fold gets the extra sample.
        assert_eq!(folds[0].1.len(), 4);
        assert_eq!(folds[1].1.len(), 3);
        assert_eq!(folds[2].1.len(), 3);

        for (train, val) in &folds {
            assert_eq!(train.len() + val.len(), 10);
            assert!(train.iter().all(|i| !val.contains(i)));
        }
    }

    #[test]
    fn test_kfold_rejects_bad_configurations() {
        assert!(KFold::new(1).split(10).is_err());
        assert!(KFold::new(5).split(3).is_err());
    }

    #[test]
    fn test_search_picks_best_alpha_on_linear_data() {
        // Noiseless linear data: the weakest penalty wins cross-validation.
        let x: Array2<f64> =
            Array2::from_shape_fn((30, 1), |(i, _)| i as f64);
        let y: Array1<f64> = x.column(0).mapv(|v| 2.0 * v + 1.0);

        let grid = ParamGrid::new().add("alpha", vec![0.0, 100.0]);
        let result = GridSearch::new(3)
            .search(ModelFamily::Ridge, &grid, &x, &y)
            .unwrap();

        assert_eq!(result.params.get("alpha"), Some(&0.0));
        assert!(result.cv_score > 0.99);
    }

    #[test]
    fn test_search_propagates_fit_failure() {
        // k exceeds every fold's training size.
        let x = array![[0.0], [1.0], [2.0]];
        let y = array![0.0, 1.0, 2.0];
        let grid = ParamGrid::new().add("n_neighbors", vec![50.0]);

        let err = GridSearch::new(3)
            .search(ModelFamily::Knn, &grid, &x, &y)
            .unwrap_err();
        assert!(matches!(err, SelectionError::FitFailed(_)));
    }
}
