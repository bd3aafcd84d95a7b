//! Graph loading error types

use thiserror::Error;

/// Result type alias for graph operations
pub type GraphResult<T> = std::result::Result<T, GraphError>;

/// Graph-specific error types
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Duplicate node: {0}")]
    DuplicateNode(String),

    #[error("Edge references unknown node: {0}")]
    UnknownNode(String),

    #[error("Invalid node selector: {0}")]
    InvalidSelector(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<GraphError> for wayfind_core::Error {
    fn from(err: GraphError) -> Self {
        wayfind_core::Error::Accessor(err.to_string())
    }
}
