//! Error types for the matching engine

use thiserror::Error;
use wavematch_types::ValidationError;

/// Engine-level errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Scan inputs failed validation
    #[error("Invalid scan input: {0}")]
    Validation(#[from] ValidationError),
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
