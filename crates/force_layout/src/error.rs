//! Error types for the force layout crate

use scales::ScaleError;
use thiserror::Error;

/// Errors that can occur while configuring or running a simulation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Node radius is negative or not finite
    #[error("node '{id}' has invalid radius {radius}")]
    InvalidRadius { id: String, radius: f64 },

    /// Radius bounds are not an ascending, non-negative pair
    #[error("radius bounds must satisfy 0 <= min <= max, got ({min}, {max})")]
    InvalidRadiusBounds { min: f64, max: f64 },

    /// Simulation parameter out of range
    #[error("invalid simulation parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// A newer simulation was started before this one finished
    #[error("simulation generation {generation} was superseded")]
    Superseded { generation: u64 },

    /// Scale construction failed
    #[error("scale error: {0}")]
    Scale(#[from] ScaleError),
}

/// Result type for layout operations
pub type LayoutResult<T> = Result<T, LayoutError>;
