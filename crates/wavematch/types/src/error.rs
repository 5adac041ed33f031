//! Validation errors for wavematch inputs

use thiserror::Error;

/// Errors raised while constructing or validating scan inputs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Reference X and Y have different lengths
    #[error("reference length mismatch: {x_len} X values vs {y_len} Y values")]
    ReferenceLengthMismatch { x_len: usize, y_len: usize },

    /// Series X and Y columns have different lengths
    #[error("series length mismatch: {x_len} X values vs {y_len} Y values")]
    SeriesLengthMismatch { x_len: usize, y_len: usize },

    /// Reference has no samples
    #[error("reference waveform is empty")]
    EmptyReference,

    /// A bound was NaN
    #[error("bound `{name}` is not a number")]
    NanBound { name: &'static str },

    /// Minimum window is too small to correlate
    #[error("min_window_size must be at least 2, got {0}")]
    WindowTooSmall(usize),

    /// Step size of zero would never advance
    #[error("step_size must be at least 1")]
    ZeroStep,

    /// Threshold outside the correlation range
    #[error("threshold must be a finite value in [-1, 1], got {0}")]
    InvalidThreshold(f64),
}
