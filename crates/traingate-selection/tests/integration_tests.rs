//! Integration tests for comparative model selection.

use ndarray::{Array1, Array2, array};
use pretty_assertions::assert_eq;
use traingate_selection::{
    CandidateSpec, ErrorPolicy, ModelFamily, ModelSelector, ParamGrid, Regressor, SelectionConfig,
    SelectionError, r2_score,
};

// ============================================================================
// Helper Functions
// ============================================================================

/// Noisy-free quadratic-ish spread: y = 3x0 - 2x1 + 5.
fn planar_split() -> (Array2<f64>, Array1<f64>, Array2<f64>, Array1<f64>) {
    let x_train = Array2::from_shape_fn((24, 2), |(i, j)| {
        if j == 0 { i as f64 } else { (i % 5) as f64 }
    });
    let y_train = x_train
        .rows()
        .into_iter()
        .map(|row| 3.0 * row[0] - 2.0 * row[1] + 5.0)
        .collect();
    let x_test = array![[30.0, 1.0], [31.0, 4.0], [32.0, 0.0]];
    let y_test = array![93.0, 90.0, 101.0];
    (x_train, y_train, x_test, y_test)
}

fn selector(policy: ErrorPolicy) -> ModelSelector {
    ModelSelector::new(
        SelectionConfig::builder()
            .cv_folds(3)
            .error_policy(policy)
            .build()
            .unwrap(),
    )
    .unwrap()
}

// ============================================================================
// Selection Reports
// ============================================================================

#[test]
fn test_fail_fast_report_has_one_entry_per_candidate() {
    let (x_train, y_train, x_test, y_test) = planar_split();
    let candidates = vec![
        CandidateSpec::new("ols", ModelFamily::Linear, ParamGrid::new()),
        CandidateSpec::new(
            "ridge",
            ModelFamily::Ridge,
            ParamGrid::new().add("alpha", vec![0.001, 0.1, 1.0]),
        ),
        CandidateSpec::new(
            "knn",
            ModelFamily::Knn,
            ParamGrid::new().add("n_neighbors", vec![1.0, 3.0]),
        ),
    ];

    let report = selector(ErrorPolicy::FailFast)
        .select(&x_train, &y_train, &x_test, &y_test, &candidates)
        .unwrap();

    assert_eq!(report.len(), candidates.len());
    let names: Vec<&str> = report.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["ols", "ridge", "knn"]);
}

#[test]
fn test_single_candidate_score_is_reproducible() {
    // Size-1 grid: the selection must equal an independent refit + score
    // of the same hyperparameters, to floating-point tolerance.
    let (x_train, y_train, x_test, y_test) = planar_split();
    let candidates = vec![CandidateSpec::new(
        "ols",
        ModelFamily::Linear,
        ParamGrid::new(),
    )];

    let report = selector(ErrorPolicy::FailFast)
        .select(&x_train, &y_train, &x_test, &y_test, &candidates)
        .unwrap();
    let reported = report.get("ols").unwrap();

    let mut reference = traingate_selection::LinearRegression::ordinary();
    reference.fit(&x_train, &y_train).unwrap();
    let expected = r2_score(&y_test, &reference.predict(&x_test).unwrap()).unwrap();

    assert!(
        (reported - expected).abs() < 1e-9,
        "reported {reported} vs independent {expected}"
    );
    // Exactly linear data: the fit should be essentially perfect too.
    assert!((reported - 1.0).abs() < 1e-9);
}

#[test]
fn test_skip_policy_omits_failing_candidate() {
    let (x_train, y_train, x_test, y_test) = planar_split();
    let candidates = vec![
        CandidateSpec::new("ols", ModelFamily::Linear, ParamGrid::new()),
        // n_neighbors far beyond the training-set size: the fit fails.
        CandidateSpec::new(
            "broken-knn",
            ModelFamily::Knn,
            ParamGrid::new().add("n_neighbors", vec![500.0]),
        ),
        CandidateSpec::new(
            "ridge",
            ModelFamily::Ridge,
            ParamGrid::new().add("alpha", vec![0.1]),
        ),
    ];

    let report = selector(ErrorPolicy::Skip)
        .select(&x_train, &y_train, &x_test, &y_test, &candidates)
        .unwrap();

    let names: Vec<&str> = report.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["ols", "ridge"]);
    assert_eq!(report.get("broken-knn"), None);
}

#[test]
fn test_fail_fast_names_the_failing_candidate() {
    let (x_train, y_train, x_test, y_test) = planar_split();
    let candidates = vec![
        CandidateSpec::new("ols", ModelFamily::Linear, ParamGrid::new()),
        CandidateSpec::new(
            "broken-knn",
            ModelFamily::Knn,
            ParamGrid::new().add("n_neighbors", vec![500.0]),
        ),
    ];

    let err = selector(ErrorPolicy::FailFast)
        .select(&x_train, &y_train, &x_test, &y_test, &candidates)
        .unwrap_err();

    match err {
        SelectionError::Candidate { name, .. } => assert_eq!(name, "broken-knn"),
        other => panic!("expected candidate-scoped error, got {other}"),
    }
}

#[test]
fn test_empty_grid_parameter_is_candidate_scoped_config_error() {
    let (x_train, y_train, x_test, y_test) = planar_split();
    let candidates = vec![CandidateSpec::new(
        "ridge",
        ModelFamily::Ridge,
        ParamGrid::new().add("alpha", Vec::<f64>::new()),
    )];

    let err = selector(ErrorPolicy::FailFast)
        .select(&x_train, &y_train, &x_test, &y_test, &candidates)
        .unwrap_err();

    assert_eq!(err.kind(), traingate_selection::ErrorKind::Configuration);
    assert!(err.to_string().contains("ridge"));
}

#[test]
fn test_report_serializes_as_named_scores() {
    let (x_train, y_train, x_test, y_test) = planar_split();
    let candidates = vec![CandidateSpec::new(
        "ols",
        ModelFamily::Linear,
        ParamGrid::new(),
    )];

    let report = selector(ErrorPolicy::FailFast)
        .select(&x_train, &y_train, &x_test, &y_test, &candidates)
        .unwrap();

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"ols\""));
    assert!(json.contains("test_score"));
}
