//! Scoring metrics.
//!
//! One fixed metric is applied to every candidate so their held-out
//! scores are comparable. Regression quality is measured with the
//! coefficient of determination (R²); higher is better.

use ndarray::Array1;

use crate::error::{Result, SelectionError};

/// Coefficient of determination, `1 - SS_res / SS_tot`.
///
/// A constant `y_true` (zero total variance) deterministically scores 0.0
/// rather than dividing by zero. Returns an error if the two vectors
/// differ in length.
pub fn r2_score(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<f64> {
    if y_true.len() != y_pred.len() {
        return Err(SelectionError::ShapeMismatch(format!(
            "r2_score got {} true labels but {} predictions",
            y_true.len(),
            y_pred.len()
        )));
    }
    if y_true.is_empty() {
        return Err(SelectionError::ShapeMismatch(
            "r2_score requires at least one observation".to_string(),
        ));
    }

    let mean = y_true.mean().unwrap_or(0.0);
    let ss_tot: f64 = y_true.iter().map(|y| (y - mean).powi(2)).sum();
    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(y, p)| (y - p).powi(2))
        .sum();

    if ss_tot == 0.0 {
        return Ok(0.0);
    }
    Ok(1.0 - ss_res / ss_tot)
}
