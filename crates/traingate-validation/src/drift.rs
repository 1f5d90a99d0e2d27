//! Two-sample distribution-drift detection.
//!
//! For every column of the reference frame, a two-sample
//! Kolmogorov–Smirnov test compares the reference values against the
//! candidate values. The per-column p-values and drift flags are collected
//! into a [`DriftReport`], which is persisted as YAML so drift can be
//! audited even when training proceeds.
//!
//! Degenerate columns (fewer than 2 usable observations on either side, or
//! a non-finite statistic) deterministically report p = 1.0, i.e. no
//! drift: there is no contradicting evidence, and a numerical fault must
//! never escalate into a hard failure.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{Result, ValidationError};

/// Drift verdict for a single column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnDrift {
    /// Probability of observing the two samples under the null hypothesis
    /// of equal distributions. Always in [0, 1].
    pub p_value: f64,
    /// `true` iff `p_value` is strictly below the configured threshold.
    #[serde(rename = "drift_status")]
    pub drift_detected: bool,
}

/// Per-column drift results, keyed by column name.
///
/// Coverage equals the reference frame's column set; columns present only
/// in the candidate are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriftReport {
    columns: BTreeMap<String, ColumnDrift>,
}

impl DriftReport {
    /// An empty report, as written when drift detection is skipped.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Result for a single column, if present.
    pub fn get(&self, column: &str) -> Option<&ColumnDrift> {
        self.columns.get(column)
    }

    /// Number of columns covered.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the report covers no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterate over `(column, verdict)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnDrift)> {
        self.columns.iter().map(|(name, d)| (name.as_str(), d))
    }

    fn insert(&mut self, column: String, drift: ColumnDrift) {
        self.columns.insert(column, drift);
    }

    /// Persist the report as a YAML mapping, one entry per column,
    /// creating parent directories on demand.
    pub fn write_yaml(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ValidationError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let doc = serde_yaml::to_string(self).map_err(|e| ValidationError::Report {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, doc).map_err(|e| ValidationError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        info!("Drift report saved: {}", path.display());
        Ok(())
    }
}

/// Outcome of one drift-detection pass.
#[derive(Debug, Clone)]
pub struct DriftOutcome {
    /// `true` iff no column drifted. A single drifted column flips this.
    pub no_drift: bool,
    /// Per-column results.
    pub report: DriftReport,
}

/// Detects distribution drift between a reference and a candidate frame.
#[derive(Debug, Clone)]
pub struct DriftDetector {
    threshold: f64,
}

impl Default for DriftDetector {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_DRIFT_THRESHOLD)
    }
}

impl DriftDetector {
    /// Create a detector with the given significance threshold.
    ///
    /// A column drifts iff its p-value is strictly below `threshold`.
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Run the per-column test over the reference frame's columns.
    ///
    /// Pure: no I/O. Columns missing from the candidate, or left with
    /// fewer than 2 usable observations after numeric extraction, take the
    /// degenerate no-drift path instead of failing.
    pub fn detect(&self, reference: &DataFrame, candidate: &DataFrame) -> DriftOutcome {
        let mut report = DriftReport::default();
        let mut no_drift = true;

        for column in reference.get_columns() {
            let name = column.name().to_string();

            let reference_values = numeric_values(column.as_materialized_series());
            let candidate_values = match candidate.column(&name) {
                Ok(col) => numeric_values(col.as_materialized_series()),
                Err(_) => {
                    warn!("Column '{name}' missing from candidate; treating as no drift");
                    Vec::new()
                }
            };

            let p_value = ks_two_sample(&reference_values, &candidate_values);
            let drift_detected = p_value < self.threshold;
            if drift_detected {
                no_drift = false;
            }

            debug!("Column '{name}': p-value {p_value:.6}, drift {drift_detected}");
            report.insert(
                name,
                ColumnDrift {
                    p_value,
                    drift_detected,
                },
            );
        }

        info!(
            "Drift detection over {} columns: no_drift = {no_drift}",
            report.len()
        );
        DriftOutcome { no_drift, report }
    }

    /// Run drift detection and persist the report before returning.
    ///
    /// The report is written regardless of the drift outcome so it can be
    /// audited even when training proceeds.
    pub fn run(
        &self,
        reference: &DataFrame,
        candidate: &DataFrame,
        report_path: impl AsRef<Path>,
    ) -> Result<DriftOutcome> {
        let outcome = self.detect(reference, candidate);
        outcome.report.write_yaml(report_path)?;
        Ok(outcome)
    }
}

/// Extract the finite numeric values of a series.
///
/// Non-numeric columns are cast non-strictly; rows that do not cast drop
/// out rather than failing the run.
fn numeric_values(series: &Series) -> Vec<f64> {
    let float = match series.cast(&DataType::Float64) {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };
    match float.f64() {
        Ok(ca) => ca.into_iter().flatten().filter(|v| v.is_finite()).collect(),
        Err(_) => Vec::new(),
    }
}

/// Two-sample Kolmogorov–Smirnov test, returning the asymptotic p-value.
///
/// The statistic is the maximum distance between the two empirical CDFs;
/// the p-value uses the Kolmogorov survival series with the standard
/// small-sample correction. Either side having fewer than 2 observations
/// yields the degenerate p = 1.0.
pub fn ks_two_sample(a: &[f64], b: &[f64]) -> f64 {
    if a.len() < 2 || b.len() < 2 {
        return 1.0;
    }

    let mut a_sorted = a.to_vec();
    let mut b_sorted = b.to_vec();
    a_sorted.sort_by(f64::total_cmp);
    b_sorted.sort_by(f64::total_cmp);

    let n1 = a_sorted.len();
    let n2 = b_sorted.len();
    let (mut i, mut j) = (0usize, 0usize);
    let mut statistic = 0.0f64;

    while i < n1 && j < n2 {
        let value = a_sorted[i].min(b_sorted[j]);
        while i < n1 && a_sorted[i] <= value {
            i += 1;
        }
        while j < n2 && b_sorted[j] <= value {
            j += 1;
        }
        let gap = (i as f64 / n1 as f64 - j as f64 / n2 as f64).abs();
        if gap > statistic {
            statistic = gap;
        }
    }

    let effective_n = ((n1 * n2) as f64 / (n1 + n2) as f64).sqrt();
    let lambda = (effective_n + 0.12 + 0.11 / effective_n) * statistic;
    let p = kolmogorov_survival(lambda);
    if p.is_finite() { p.clamp(0.0, 1.0) } else { 1.0 }
}

/// Survival function of the Kolmogorov distribution,
/// `Q(λ) = 2 Σ_{k≥1} (-1)^{k-1} exp(-2 k² λ²)`.
fn kolmogorov_survival(lambda: f64) -> f64 {
    if lambda <= 0.0 {
        return 1.0;
    }

    let mut sum = 0.0f64;
    let mut sign = 1.0f64;
    for k in 1..=100 {
        let k = k as f64;
        let term = (-2.0 * k * k * lambda * lambda).exp();
        sum += sign * term;
        if term < 1e-10 {
            break;
        }
        sign = -sign;
    }
    (2.0 * sum).clamp(0.0, 1.0)
}
