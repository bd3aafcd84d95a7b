//! Wayfind Core - heuristic path search over weighted graphs
//!
//! This crate provides three interchangeable search algorithms (A*, IDA* and
//! LRTA*) over any graph exposed through [`GraphAccessor`], plus the
//! configurable heuristic evaluator they share.
//!
//! ```no_run
//! use wayfind_core::{search, Algorithm, HeuristicRegistry, SearchConfig};
//! # fn demo<G: wayfind_core::GraphAccessor>(graph: &G, from: G::Node, to: G::Node) -> wayfind_core::Result<()> {
//! let config = SearchConfig::new().with_axes(["x", "y"]);
//! let result = search(Algorithm::AStar, graph, from, to, "weight", &config, &HeuristicRegistry::new())?;
//! println!("{} nodes, cost {}", result.len(), result.cost);
//! # Ok(())
//! # }
//! ```

pub mod astar;
pub mod config;
pub mod error;
pub mod graph;
pub mod heuristic;
pub mod idastar;
pub mod lrtastar;
pub mod options;
pub mod path;
pub mod registry;
pub mod search;

#[cfg(test)]
mod test_support;

pub use astar::AStarSearch;
pub use config::{HeuristicFormula, SearchConfig, DEFAULT_HAVERSINE_RADIUS};
pub use error::{Error, Result};
pub use graph::{select_single, Direction, GraphAccessor, NodeRole, MISSING_WEIGHT};
pub use heuristic::HeuristicEvaluator;
pub use idastar::IdaStarSearch;
pub use lrtastar::LrtaStarSearch;
pub use options::{OneOrMany, SearchOptions};
pub use path::{remove_cycles, CycleFreeRoute, PathResult, SearchOutcome, SearchStats};
pub use registry::{CustomHeuristic, HeuristicInput, HeuristicRegistry};
pub use search::{search, Algorithm, PathSearch, SearchContext};
