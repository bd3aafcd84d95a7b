//! Error types for Wayfind Core

use thiserror::Error;

use crate::graph::NodeRole;

/// Result type alias using Wayfind's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Wayfind error types
///
/// "No path" is never an error: searches report it as an empty
/// [`PathResult`](crate::PathResult).
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Only one {role} node is allowed, got {count} candidates")]
    AmbiguousNode { role: NodeRole, count: usize },

    #[error("No {0} node matched")]
    NodeNotFound(NodeRole),

    #[error("Unknown heuristic formula: {0}")]
    UnknownFormula(String),

    #[error("Unknown direction: {0}")]
    UnknownDirection(String),

    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("Missing capability: no custom heuristic formula registered as '{0}'")]
    MissingCapability(String),

    #[error("Graph access error: {0}")]
    Accessor(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// True for errors raised while validating a request, before any search ran
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_)
                | Self::AmbiguousNode { .. }
                | Self::UnknownFormula(_)
                | Self::UnknownDirection(_)
                | Self::UnknownAlgorithm(_)
                | Self::Serialization(_)
        )
    }
}
