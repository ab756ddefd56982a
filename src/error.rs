//! Error types for transit-shape

use thiserror::Error;

/// Errors that can occur during feature extraction
///
/// Computational edge cases (sparse bins, short windows, degenerate depth) are
/// never reported here; they resolve to undefined metrics or fallback values.
/// Only structural problems with the input surface as errors.
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("Failed to parse light curve payload: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Phase and flux lengths differ: phase has {phase} samples, flux has {flux}")]
    ShapeMismatch { phase: usize, flux: usize },

    #[error("Non-numeric value in {field} at index {index}")]
    NonNumeric { field: &'static str, index: usize },

    #[error("Light curve contains no samples")]
    EmptyLightCurve,

    #[error("Window width must be finite and positive, got {0}")]
    InvalidWidth(f64),

    #[error("Fold period must be finite and positive, got {0}")]
    InvalidPeriod(f64),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No folded light curve available for target {0}")]
    UpstreamUnavailable(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ComputeError {
    /// Whether the error means the target should be skipped rather than counted as a failure
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ComputeError::UpstreamUnavailable(_))
    }
}
