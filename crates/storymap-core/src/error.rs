//! Error types for graph and configuration operations.

use thiserror::Error;

/// Errors raised by graph edits made directly or through the controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The operation addressed a node position that does not exist.
    #[error("node index {index} out of range (graph has {len} nodes)")]
    OutOfRange { index: usize, len: usize },
    /// A removal was refused because an active drag holds a reference it would shift.
    #[error("node index {index} is held by an active drag")]
    Busy { index: usize },
    /// There is no open node editor to commit.
    #[error("no node editor is open")]
    EditorClosed,
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
