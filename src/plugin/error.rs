//! Plugin system error types.

use thiserror::Error;

use super::ResourceKind;

/// Result type for plugin operations.
pub type PluginResult<T> = Result<T, PluginError>;

/// Errors that can occur during plugin operations.
#[derive(Debug, Error)]
pub enum PluginError {
    /// Declared packaged resources are absent from the static tree.
    #[error("Missing static {kind} resources from {root}: {}", .missing.join(","))]
    MissingResource {
        /// Kind of the missing resources.
        kind: ResourceKind,
        /// Static directory that was searched, relative to the static root.
        root: String,
        /// Missing entries, sorted.
        missing: Vec<String>,
    },

    /// No plugin registered under this name.
    #[error("Unknown plugin: {0}")]
    UnknownPlugin(String),

    /// Plugin declaration cannot produce a usable plugin.
    #[error("Invalid plugin declaration: {0}")]
    InvalidDeclaration(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error while walking the static tree.
    #[error("Failed to walk static resources: {0}")]
    Walk(#[from] walkdir::Error),
}
