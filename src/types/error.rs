//! Error types for the kinship-graph library.

use thiserror::Error;

/// All errors that can occur in the kinship-graph library.
#[derive(Error, Debug)]
pub enum GraphError {
    /// A person with this name is already in the graph.
    #[error("Person {0:?} already exists")]
    DuplicateNode(String),

    /// An edge endpoint names a person that is not in the graph.
    #[error("Edge references unknown person {0:?}")]
    UnknownEndpoint(String),

    /// A lookup by name found nothing.
    #[error("{0} not found")]
    NotFound(String),

    /// A `hasChild` cycle was reached while enumerating descendants.
    #[error("Cycle detected: descendants of {start:?} lead back to {revisited:?}")]
    CycleDetected { start: String, revisited: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Line editor failure in the interactive shell.
    #[error("Readline error: {0}")]
    Readline(String),
}

/// Convenience result type for kinship-graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
