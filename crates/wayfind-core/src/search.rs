//! Common search contract and entry point

use crate::astar::AStarSearch;
use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::graph::{Direction, GraphAccessor, MISSING_WEIGHT};
use crate::heuristic::HeuristicEvaluator;
use crate::idastar::IdaStarSearch;
use crate::lrtastar::LrtaStarSearch;
use crate::path::{PathResult, SearchStats};
use crate::registry::HeuristicRegistry;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Instant;

/// Available search algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Algorithm {
    /// Best-first A*
    #[default]
    #[serde(rename = "astar")]
    AStar,
    /// Iterative-deepening A*
    #[serde(rename = "idastar")]
    IdaStar,
    /// Learning real-time A*
    #[serde(rename = "lrtastar")]
    LrtaStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Self::AStar, Self::IdaStar, Self::LrtaStar];

    pub fn name(&self) -> &'static str {
        match self {
            Self::AStar => "astar",
            Self::IdaStar => "idastar",
            Self::LrtaStar => "lrtastar",
        }
    }

    /// Run this algorithm against a prepared context
    pub fn run<G: GraphAccessor>(&self, ctx: &SearchContext<'_, G>) -> Result<PathResult<G::Node>> {
        match self {
            Self::AStar => AStarSearch.find_path(ctx),
            Self::IdaStar => IdaStarSearch.find_path(ctx),
            Self::LrtaStar => LrtaStarSearch.find_path(ctx),
        }
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '*' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "astar" | "a" => Ok(Self::AStar),
            "idastar" | "ida" => Ok(Self::IdaStar),
            "lrtastar" | "lrta" => Ok(Self::LrtaStar),
            _ => Err(Error::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A path search strategy.
///
/// Implementations keep no state between calls; everything a search needs
/// lives in the [`SearchContext`] or is allocated inside `find_path`.
pub trait PathSearch {
    fn name(&self) -> &'static str;

    fn find_path<G: GraphAccessor>(&self, ctx: &SearchContext<'_, G>) -> Result<PathResult<G::Node>>;
}

/// Everything one search invocation reads
pub struct SearchContext<'a, G: GraphAccessor> {
    pub graph: &'a G,
    pub source: G::Node,
    pub destination: G::Node,
    pub weight_field: &'a str,
    pub config: &'a SearchConfig,
    pub heuristic: HeuristicEvaluator,
}

impl<'a, G: GraphAccessor> SearchContext<'a, G> {
    /// Validate `config`, resolve the heuristic and read endpoint coordinates
    pub fn new(
        graph: &'a G,
        source: G::Node,
        destination: G::Node,
        weight_field: &'a str,
        config: &'a SearchConfig,
        registry: &HeuristicRegistry,
    ) -> Result<Self> {
        config.validate()?;
        let heuristic =
            HeuristicEvaluator::new(config, registry)?.bind(graph, &source, &destination)?;

        Ok(Self {
            graph,
            source,
            destination,
            weight_field,
            config,
            heuristic,
        })
    }

    pub fn is_goal(&self, node: &G::Node) -> bool {
        *node == self.destination
    }

    /// Heuristic estimate for `node`
    pub fn estimate(&self, node: &G::Node, parent: Option<&G::Node>, depth: u64) -> Result<f64> {
        self.heuristic.estimate(self.graph, node, parent, depth)
    }

    /// Successors of `node` with their edge weights
    pub fn neighbors(&self, node: &G::Node, stats: &mut SearchStats) -> Result<Vec<(G::Node, f64)>> {
        self.neighbors_toward(node, self.config.direction, stats)
    }

    /// Like [`neighbors`](Self::neighbors) with an explicit direction
    pub fn neighbors_toward(
        &self,
        node: &G::Node,
        direction: Direction,
        stats: &mut SearchStats,
    ) -> Result<Vec<(G::Node, f64)>> {
        let edges = self
            .graph
            .neighbor_edges(node, direction, &self.config.edge_type_names)?;
        stats.edges_scanned += edges.len();

        let mut out = Vec::with_capacity(edges.len());
        for edge in &edges {
            let next = self.graph.other_endpoint(edge, node)?;
            let weight = match self.graph.weight(edge, self.weight_field)? {
                Some(w) if !w.is_nan() => w,
                _ => MISSING_WEIGHT,
            };
            out.push((next, weight));
        }
        Ok(out)
    }

    /// Total weight of a route, taking the cheapest edge between each pair
    pub fn path_cost(&self, route: &[G::Node]) -> Result<f64> {
        let mut stats = SearchStats::default();
        let mut total = 0.0;
        for pair in route.windows(2) {
            let step = self
                .neighbors(&pair[0], &mut stats)?
                .into_iter()
                .filter(|(next, _)| *next == pair[1])
                .map(|(_, w)| w)
                .fold(f64::INFINITY, f64::min);
            total += step;
        }
        Ok(total)
    }
}

/// Find a path from `source` to `destination` with `algorithm`.
///
/// Configuration and capability problems are reported before any search
/// state exists. "No path" is an empty [`PathResult`], not an error.
pub fn search<G: GraphAccessor>(
    algorithm: Algorithm,
    graph: &G,
    source: G::Node,
    destination: G::Node,
    weight_field: &str,
    config: &SearchConfig,
    registry: &HeuristicRegistry,
) -> Result<PathResult<G::Node>> {
    let ctx = SearchContext::new(graph, source, destination, weight_field, config, registry)?;

    tracing::debug!(
        "Starting {} search: source={:?}, destination={:?}, formula={}, axes={:?}",
        algorithm,
        ctx.source,
        ctx.destination,
        config.heuristic_formula,
        config.vertex_axis_names
    );
    let started = Instant::now();

    let result = algorithm.run(&ctx)?;

    tracing::debug!(
        "{} search finished in {:?}: outcome={}, nodes={}, cost={}, expanded={}",
        algorithm,
        started.elapsed(),
        result.outcome,
        result.nodes.len(),
        result.cost,
        result.stats.nodes_expanded
    );
    Ok(result)
}
