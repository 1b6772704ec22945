//! Error types for the engine crate.

use thiserror::Error;

/// Errors surfaced by the recommendation engine.
///
/// `BadInput` is the single error kind at the prediction boundary: any
/// unknown user or movie id, detected before computation starts, whether
/// it arrives through `predict_rating`, `predict_ratings`, or `similarity`.
/// It is never retried or recovered internally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// An id passed to the engine is absent from the loaded tables
    #[error("Bad input: unknown {entity} id {id}")]
    BadInput { entity: &'static str, id: u32 },

    /// Correlation requires two sequences of equal length
    #[error("Length mismatch: {predicted} predicted vs {actual} actual values")]
    LengthMismatch { predicted: usize, actual: usize },

    /// Correlation over empty sequences is undefined
    #[error("Cannot correlate empty sequences")]
    EmptySequence,
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, EngineError>;
