//! Display error types.

use thiserror::Error;

use crate::plugin::PluginError;

/// Result type for display operations.
pub type DisplayResult<T> = Result<T, DisplayError>;

/// Errors that can occur while building a display payload.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// Data could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A required plugin is unavailable.
    #[error(transparent)]
    Plugin(#[from] PluginError),

    /// Data does not have the expected shape.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Options are not usable by the visualization.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// Widget selection violates the widget's constraints.
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),
}
