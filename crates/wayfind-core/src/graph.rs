//! Graph accessor trait and traversal primitives
//!
//! The search engine never owns a graph. Host engines expose theirs through
//! [`GraphAccessor`], which the algorithms only ever read from.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;
use std::str::FromStr;

/// Cost used for an edge whose weight field is absent or not a number.
///
/// Effectively zero: such an edge is traversable but almost free.
pub const MISSING_WEIGHT: f64 = 1e-12;

/// Direction for graph traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Outgoing,
    Incoming,
    Both,
}

impl Direction {
    /// The direction that walks the same edges backwards
    pub fn reverse(self) -> Self {
        match self {
            Self::Outgoing => Self::Incoming,
            Self::Incoming => Self::Outgoing,
            Self::Both => Self::Both,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Outgoing => "out",
            Self::Incoming => "in",
            Self::Both => "both",
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "out" | "outgoing" => Ok(Self::Outgoing),
            "in" | "incoming" => Ok(Self::Incoming),
            "both" => Ok(Self::Both),
            _ => Err(Error::UnknownDirection(s.to_string())),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only view of a host graph.
///
/// Implementations must be side-effect free from the search's point of view.
/// Failures are reported as [`Error::Accessor`] and propagated to the caller
/// unchanged.
pub trait GraphAccessor {
    /// Node identity
    type Node: Clone + Eq + Hash + Debug;

    /// Edge handle
    type Edge;

    /// Edges touching `node` in `direction`, restricted to `edge_types`
    /// (empty = all types)
    fn neighbor_edges(
        &self,
        node: &Self::Node,
        direction: Direction,
        edge_types: &[String],
    ) -> Result<Vec<Self::Edge>>;

    /// The endpoint of `edge` that is not `node`
    fn other_endpoint(&self, edge: &Self::Edge, node: &Self::Node) -> Result<Self::Node>;

    /// Numeric value of `field` on `edge`, `None` when absent or not numeric
    fn weight(&self, edge: &Self::Edge, field: &str) -> Result<Option<f64>>;

    /// Numeric value of property `name` on `node`, `None` when absent
    fn property(&self, node: &Self::Node, name: &str) -> Result<Option<f64>>;
}

/// Which end of a search a node selector resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Source,
    Destination,
}

impl std::fmt::Display for NodeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Destination => f.write_str("destination"),
        }
    }
}

/// Reduce a candidate list to exactly one node.
///
/// Host engines often resolve a node reference to a collection. A search
/// needs a single endpoint, so more than one candidate is a configuration
/// error rather than an implicit pick.
pub fn select_single<N>(role: NodeRole, candidates: Vec<N>) -> Result<N> {
    let count = candidates.len();
    let mut iter = candidates.into_iter();
    match (iter.next(), count) {
        (Some(node), 1) => Ok(node),
        (None, _) => Err(Error::NodeNotFound(role)),
        (Some(_), count) => Err(Error::AmbiguousNode { role, count }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parsing() {
        assert_eq!("OUT".parse::<Direction>().unwrap(), Direction::Outgoing);
        assert_eq!("incoming".parse::<Direction>().unwrap(), Direction::Incoming);
        assert_eq!(" Both ".parse::<Direction>().unwrap(), Direction::Both);
        assert!(matches!(
            "sideways".parse::<Direction>(),
            Err(Error::UnknownDirection(_))
        ));
    }

    #[test]
    fn test_direction_reverse() {
        assert_eq!(Direction::Outgoing.reverse(), Direction::Incoming);
        assert_eq!(Direction::Incoming.reverse(), Direction::Outgoing);
        assert_eq!(Direction::Both.reverse(), Direction::Both);
    }

    #[test]
    fn test_select_single() {
        assert_eq!(select_single(NodeRole::Source, vec!["A"]).unwrap(), "A");

        let err = select_single(NodeRole::Source, vec!["A", "B"]).unwrap_err();
        assert!(matches!(err, Error::AmbiguousNode { count: 2, .. }));
        assert!(err.is_configuration());
        assert_eq!(
            err.to_string(),
            "Only one source node is allowed, got 2 candidates"
        );

        let err = select_single::<&str>(NodeRole::Destination, vec![]).unwrap_err();
        assert!(matches!(err, Error::NodeNotFound(NodeRole::Destination)));
    }
}
