//! Error types for the scales crate

use thiserror::Error;

/// Errors raised while building scales or deriving domains
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScaleError {
    /// Threshold scale needs exactly one more output than breakpoints
    #[error("threshold scale has {breakpoints} breakpoints but {outputs} outputs (expected {})", .breakpoints + 1)]
    ThresholdMismatch { breakpoints: usize, outputs: usize },

    /// Continuous domain with min greater than max
    #[error("domain is not ascending: min {min} > max {max}")]
    NonAscendingDomain { min: f64, max: f64 },

    /// Threshold breakpoints out of order
    #[error("threshold breakpoints must be ascending (index {index})")]
    NonAscendingBreakpoints { index: usize },

    /// Band padding outside [0, 1)
    #[error("band padding must be in [0, 1), got {0}")]
    InvalidPadding(f64),

    /// Ordinal scale built without any outputs
    #[error("ordinal scale needs at least one output")]
    EmptyOutputs,

    /// Domain bound is NaN or infinite
    #[error("domain bounds must be finite, got [{min}, {max}]")]
    NonFiniteDomain { min: f64, max: f64 },

    /// Range bound is NaN or infinite
    #[error("range bounds must be finite, got [{start}, {end}]")]
    InvalidRange { start: f64, end: f64 },

    /// Stacked records carry arrays of different lengths
    #[error("stacked record {index} has {found} values, expected {expected}")]
    InconsistentStackLength {
        index: usize,
        expected: usize,
        found: usize,
    },

    /// A record produced NaN or an infinite value
    #[error("record {index} has a non-finite value")]
    NonFiniteValue { index: usize },
}

impl ScaleError {
    /// Whether this error describes a malformed scale configuration
    /// (as opposed to a problem with the data itself).
    pub fn is_configuration(&self) -> bool {
        !matches!(
            self,
            ScaleError::InconsistentStackLength { .. } | ScaleError::NonFiniteValue { .. }
        )
    }
}

/// Result type for scale operations
pub type ScaleResult<T> = Result<T, ScaleError>;
