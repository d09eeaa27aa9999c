//! Error types for the charts crate

use force_layout::LayoutError;
use interaction::InteractionError;
use scales::ScaleError;
use thiserror::Error;

/// Errors that can occur when configuring or laying out a chart
#[derive(Error, Debug)]
pub enum ChartError {
    /// Scale configuration or data shape rejected
    #[error("Scale error: {0}")]
    Scale(#[from] ScaleError),

    /// Force layout failed or was superseded
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Interaction helper could not be built
    #[error("Interaction error: {0}")]
    Interaction(#[from] InteractionError),

    /// Configuration JSON could not be parsed
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Configuration parsed but is not usable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Dataset does not fit the chart type
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl ChartError {
    /// Whether the chart should refuse to render and show a diagnostic
    pub fn is_configuration(&self) -> bool {
        match self {
            ChartError::Scale(err) => err.is_configuration(),
            ChartError::Layout(LayoutError::Superseded { .. }) => false,
            ChartError::Layout(_) | ChartError::ConfigParse(_) | ChartError::InvalidConfig(_) => true,
            ChartError::Interaction(_) | ChartError::InvalidData(_) => false,
        }
    }
}

/// Result type for chart operations
pub type ChartResult<T> = Result<T, ChartError>;
