//! Search results and path helpers

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

/// How a search ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOutcome {
    /// The destination was reached
    Found,
    /// The reachable space was exhausted without reaching the destination
    Exhausted,
    /// The depth bound stopped the search
    DepthCutoff,
    /// The time budget ran out
    TimedOut,
}

impl SearchOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Found => "found",
            Self::Exhausted => "exhausted",
            Self::DepthCutoff => "depth_cutoff",
            Self::TimedOut => "timed_out",
        }
    }
}

impl std::fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counters collected while searching
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStats {
    /// Nodes whose successors were generated
    pub nodes_expanded: usize,
    /// Edges read from the graph
    pub edges_scanned: usize,
    /// IDA* deepening rounds or LRTA* trials
    pub iterations: usize,
    /// Deepest depth reached
    pub max_depth_reached: u64,
}

/// Result of a path search.
///
/// `nodes` starts at the source and ends at the destination when the outcome
/// is [`SearchOutcome::Found`]. An empty `nodes` means no path was produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathResult<N> {
    pub nodes: Vec<N>,
    /// Sum of edge weights along `nodes`
    pub cost: f64,
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
}

impl<N> PathResult<N> {
    pub fn found(nodes: Vec<N>, cost: f64, stats: SearchStats) -> Self {
        Self {
            nodes,
            cost,
            outcome: SearchOutcome::Found,
            stats,
        }
    }

    /// No path, with the reason in `outcome`
    pub fn empty(outcome: SearchOutcome, stats: SearchStats) -> Self {
        Self {
            nodes: Vec::new(),
            cost: 0.0,
            outcome,
            stats,
        }
    }

    /// A partial path that stopped at the depth bound
    pub fn cutoff(nodes: Vec<N>, cost: f64, stats: SearchStats) -> Self {
        Self {
            nodes,
            cost,
            outcome: SearchOutcome::DepthCutoff,
            stats,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the path reaches the destination
    pub fn is_found(&self) -> bool {
        self.outcome == SearchOutcome::Found
    }

    /// Convert node identities, e.g. to display names
    pub fn map_nodes<M>(self, f: impl FnMut(N) -> M) -> PathResult<M> {
        PathResult {
            nodes: self.nodes.into_iter().map(f).collect(),
            cost: self.cost,
            outcome: self.outcome,
            stats: self.stats,
        }
    }
}

/// Walk a predecessor map back from `end` and return the route source-first
pub fn reconstruct<N>(came_from: &HashMap<N, N>, end: &N) -> Vec<N>
where
    N: Clone + Eq + Hash,
{
    let mut route = vec![end.clone()];
    let mut current = end;
    while let Some(previous) = came_from.get(current) {
        // Guard against a malformed map that loops
        if route.len() > came_from.len() {
            break;
        }
        route.push(previous.clone());
        current = previous;
    }
    route.reverse();
    route
}

/// A route that stays free of cycles while it grows.
///
/// Pushing a node that is already on the route cuts everything after its
/// earlier occurrence, so the last visit survives. The route never holds
/// more nodes than there are distinct nodes pushed.
#[derive(Debug, Clone)]
pub struct CycleFreeRoute<N> {
    nodes: Vec<N>,
    position: HashMap<N, usize>,
}

impl<N: Clone + Eq + Hash> CycleFreeRoute<N> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            position: HashMap::new(),
        }
    }

    pub fn push(&mut self, node: N) {
        if let Some(&at) = self.position.get(&node) {
            for removed in self.nodes.drain(at + 1..) {
                self.position.remove(&removed);
            }
            return;
        }
        self.position.insert(node.clone(), self.nodes.len());
        self.nodes.push(node);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn into_vec(self) -> Vec<N> {
        self.nodes
    }
}

impl<N: Clone + Eq + Hash> Default for CycleFreeRoute<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove cycles from a finished route, keeping the last visit of each node
pub fn remove_cycles<N>(route: Vec<N>) -> Vec<N>
where
    N: Clone + Eq + Hash,
{
    let mut out = CycleFreeRoute::new();
    for node in route {
        out.push(node);
    }
    out.into_vec()
}
