//! Error types for model selection.
//!
//! Failures are tagged by category so callers can branch on
//! [`ErrorKind`]: configuration faults (bad config, malformed grid,
//! mismatched input shapes) versus model-fit faults (a candidate's search
//! or fit going wrong). Per-candidate failures are wrapped in
//! [`SelectionError::Candidate`] so a fail-fast abort names the candidate
//! without re-running.

use thiserror::Error;

/// Failure category of a [`SelectionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Configuration or input malformed: invalid settings, empty grid,
    /// unknown hyperparameter, mismatched matrix shapes.
    Configuration,
    /// A model's search/fit/predict failed on otherwise valid inputs.
    ModelFit,
}

/// The main error type for model-selection operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SelectionError {
    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Input matrices/vectors do not line up.
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A grid parameter lists no candidate values, so the grid has no
    /// combinations to search.
    #[error("Hyperparameter '{parameter}' lists no candidate values")]
    EmptyGrid {
        /// The offending grid parameter.
        parameter: String,
    },

    /// A grid names a hyperparameter the model family does not accept.
    #[error("Unknown hyperparameter '{parameter}' for model family '{family}'")]
    UnknownParameter {
        /// Model family name.
        family: String,
        /// The unrecognized parameter.
        parameter: String,
    },

    /// Model fitting or prediction failed.
    #[error("Model fit failed: {0}")]
    FitFailed(String),

    /// A failure scoped to one candidate, carrying its name.
    #[error("Candidate '{name}' failed: {source}")]
    Candidate {
        /// Name of the candidate that failed.
        name: String,
        #[source]
        source: Box<SelectionError>,
    },
}

impl SelectionError {
    /// The failure category, for branch-on-kind handling.
    ///
    /// A [`Candidate`](Self::Candidate) wrapper reports its inner kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidConfig(_)
            | Self::ShapeMismatch(_)
            | Self::EmptyGrid { .. }
            | Self::UnknownParameter { .. } => ErrorKind::Configuration,
            Self::FitFailed(_) => ErrorKind::ModelFit,
            Self::Candidate { source, .. } => source.kind(),
        }
    }

    /// Wrap an error with the candidate it belongs to.
    pub(crate) fn for_candidate(name: impl Into<String>, source: SelectionError) -> Self {
        Self::Candidate {
            name: name.into(),
            source: Box::new(source),
        }
    }
}

/// Result type alias for model-selection operations.
pub type Result<T> = std::result::Result<T, SelectionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_kinds() {
        assert_eq!(
            SelectionError::InvalidConfig("cv_folds".into()).kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            SelectionError::EmptyGrid {
                parameter: "alpha".into()
            }
            .kind(),
            ErrorKind::Configuration
        );
    }

    #[test]
    fn test_candidate_wrapper_reports_inner_kind() {
        let err = SelectionError::for_candidate(
            "ridge",
            SelectionError::FitFailed("singular matrix".into()),
        );
        assert_eq!(err.kind(), ErrorKind::ModelFit);
        assert!(err.to_string().contains("ridge"));
        assert!(err.to_string().contains("singular matrix"));
    }
}
