//! Least-squares regression, ordinary and L2-penalized.
//!
//! Fitting solves the centered normal equations
//! `(Xc' Xc + alpha * I) w = Xc' yc` by Gaussian elimination with partial
//! pivoting, then recovers the intercept from the column means. With
//! `alpha = 0` this is ordinary least squares; a singular system (e.g.
//! duplicated feature columns) fails the fit rather than producing
//! garbage coefficients.

use ndarray::{Array1, Array2, Axis};
use tracing::debug;

use super::Regressor;
use crate::error::{Result, SelectionError};

/// Pivot magnitudes below this are treated as a singular system.
const SINGULARITY_EPS: f64 = 1e-12;

/// Linear regression with an optional ridge penalty.
#[derive(Debug, Clone)]
pub struct LinearRegression {
    alpha: f64,
    coefficients: Option<Array1<f64>>,
    intercept: f64,
}

impl LinearRegression {
    /// Ordinary least squares (no penalty).
    pub fn ordinary() -> Self {
        Self::ridge(0.0)
    }

    /// Ridge regression with penalty strength `alpha`.
    pub fn ridge(alpha: f64) -> Self {
        Self {
            alpha,
            coefficients: None,
            intercept: 0.0,
        }
    }

    /// Fitted coefficients, one per feature column.
    pub fn coefficients(&self) -> Option<&Array1<f64>> {
        self.coefficients.as_ref()
    }

    /// Fitted intercept.
    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl Regressor for LinearRegression {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        let (n, d) = (x.nrows(), x.ncols());
        if n != y.len() {
            return Err(SelectionError::ShapeMismatch(format!(
                "{n} feature rows but {} labels",
                y.len()
            )));
        }
        if n == 0 || d == 0 {
            return Err(SelectionError::FitFailed(
                "cannot fit on an empty feature matrix".to_string(),
            ));
        }

        let x_mean = x.mean_axis(Axis(0)).ok_or_else(|| {
            SelectionError::FitFailed("cannot fit on an empty feature matrix".to_string())
        })?;
        let y_mean = y.mean().unwrap_or(0.0);
        let x_centered = x - &x_mean;
        let y_centered = y.mapv(|v| v - y_mean);

        let mut gram = x_centered.t().dot(&x_centered);
        for i in 0..d {
            gram[[i, i]] += self.alpha;
        }
        let rhs = x_centered.t().dot(&y_centered);

        let coefficients = solve_linear_system(gram, rhs)?;
        self.intercept = y_mean - x_mean.dot(&coefficients);
        debug!(
            "Fitted linear model (alpha {}): intercept {:.6}",
            self.alpha, self.intercept
        );
        self.coefficients = Some(coefficients);
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let coefficients = self.coefficients.as_ref().ok_or_else(|| {
            SelectionError::FitFailed("predict called before fit".to_string())
        })?;
        if x.ncols() != coefficients.len() {
            return Err(SelectionError::ShapeMismatch(format!(
                "model has {} coefficients but input has {} columns",
                coefficients.len(),
                x.ncols()
            )));
        }
        Ok(x.dot(coefficients) + self.intercept)
    }
}

/// Solve `a * x = b` by Gaussian elimination with partial pivoting.
fn solve_linear_system(mut a: Array2<f64>, mut b: Array1<f64>) -> Result<Array1<f64>> {
    let n = a.nrows();

    for col in 0..n {
        let mut pivot_row = col;
        let mut pivot_abs = a[[col, col]].abs();
        for row in (col + 1)..n {
            let candidate = a[[row, col]].abs();
            if candidate > pivot_abs {
                pivot_row = row;
                pivot_abs = candidate;
            }
        }
        if !pivot_abs.is_finite() || pivot_abs < SINGULARITY_EPS {
            return Err(SelectionError::FitFailed(
                "singular normal-equation matrix; add a ridge penalty or drop collinear features"
                    .to_string(),
            ));
        }
        if pivot_row != col {
            for k in 0..n {
                a.swap([col, k], [pivot_row, k]);
            }
            b.swap(col, pivot_row);
        }

        for row in (col + 1)..n {
            let factor = a[[row, col]] / a[[col, col]];
            for k in col..n {
                a[[row, k]] -= factor * a[[col, k]];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = Array1::zeros(n);
    for col in (0..n).rev() {
        let mut sum = b[col];
        for k in (col + 1)..n {
            sum -= a[[col, k]] * x[k];
        }
        x[col] = sum / a[[col, col]];
    }
    Ok(x)
}
