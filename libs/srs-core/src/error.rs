//! Error types for srs-core.

use thiserror::Error;

/// Result type alias using SrsError.
pub type Result<T> = std::result::Result<T, SrsError>;

/// Errors that can occur in the scheduling core.
#[derive(Debug, Error)]
pub enum SrsError {
    #[error("ladder step 0 must be 0 days, got {0}")]
    LadderLeadingStep(i64),

    #[error("ladder step {step} does not increase ({prev} -> {value})")]
    LadderNotAscending { step: usize, prev: i64, value: i64 },

    #[error("storage backend: {0}")]
    Storage(String),
}
