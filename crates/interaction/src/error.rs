//! Error types for the interaction crate

use thiserror::Error;

/// Errors raised while building interaction helpers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InteractionError {
    /// Resolver keys must be sorted ascending
    #[error("resolver keys are not sorted ascending at index {index}")]
    UnsortedKeys { index: usize },

    /// A key has no position on the axis (NaN)
    #[error("resolver key at index {index} is not a number")]
    NonFiniteKey { index: usize },

    /// Opacity outside [0, 1]
    #[error("opacity must be within [0, 1], got {0}")]
    InvalidOpacity(f64),
}

/// Result type for interaction operations
pub type InteractionResult<T> = Result<T, InteractionError>;
