//! K-nearest-neighbors regression.
//!
//! Fitting stores the training data; prediction averages the labels of
//! the `k` training rows closest in Euclidean distance. Ties on distance
//! resolve by training-row order, keeping predictions deterministic.

use ndarray::{Array1, Array2};

use super::Regressor;
use crate::error::{Result, SelectionError};

/// KNN regressor with a fixed neighbor count.
#[derive(Debug, Clone)]
pub struct KnnRegressor {
    k: usize,
    x_train: Option<Array2<f64>>,
    y_train: Option<Array1<f64>>,
}

impl KnnRegressor {
    /// Create a regressor that averages over `k` neighbors.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            x_train: None,
            y_train: None,
        }
    }
}

impl Regressor for KnnRegressor {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        if x.nrows() != y.len() {
            return Err(SelectionError::ShapeMismatch(format!(
                "{} feature rows but {} labels",
                x.nrows(),
                y.len()
            )));
        }
        if self.k == 0 || self.k > x.nrows() {
            return Err(SelectionError::FitFailed(format!(
                "n_neighbors = {} but the training set has {} rows",
                self.k,
                x.nrows()
            )));
        }

        self.x_train = Some(x.clone());
        self.y_train = Some(y.clone());
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let (x_train, y_train) = match (&self.x_train, &self.y_train) {
            (Some(x_train), Some(y_train)) => (x_train, y_train),
            _ => {
                return Err(SelectionError::FitFailed(
                    "predict called before fit".to_string(),
                ));
            }
        };
        if x.ncols() != x_train.ncols() {
            return Err(SelectionError::ShapeMismatch(format!(
                "model was fitted on {} columns but input has {}",
                x_train.ncols(),
                x.ncols()
            )));
        }

        let predictions = x
            .rows()
            .into_iter()
            .map(|row| {
                let mut distances: Vec<(f64, f64)> = x_train
                    .rows()
                    .into_iter()
                    .zip(y_train.iter())
                    .map(|(train_row, &label)| {
                        let dist: f64 = row
                            .iter()
                            .zip(train_row.iter())
                            .map(|(a, b)| (a - b).powi(2))
                            .sum();
                        (dist, label)
                    })
                    .collect();
                // Stable sort keeps row order on distance ties.
                distances.sort_by(|a, b| a.0.total_cmp(&b.0));
                distances.iter().take(self.k).map(|(_, label)| label).sum::<f64>()
                    / self.k as f64
            })
            .collect();

        Ok(predictions)
    }
}
