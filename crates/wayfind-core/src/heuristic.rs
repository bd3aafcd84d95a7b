//! Heuristic cost evaluation
//!
//! The evaluator turns node coordinates (numeric properties named by
//! `vertex_axis_names`) into an estimate of the remaining cost to the goal.
//! The number of configured axes picks the shape of the estimate:
//!
//! - no axes: always 0, the search degenerates to uniform-cost search
//! - one axis: scaled absolute difference
//! - two or more axes: the selected [`HeuristicFormula`]
//!
//! Admissibility is not enforced. Squared distances, a large `d_factor` or a
//! custom formula may overestimate, trading optimality for speed.

use crate::config::{HeuristicFormula, SearchConfig};
use crate::error::Result;
use crate::graph::GraphAccessor;
use crate::registry::{CustomHeuristic, HeuristicInput, HeuristicRegistry};
use std::sync::Arc;

/// Scale of the tie-breaking cross-product term
pub const TIE_BREAK_WEIGHT: f64 = 0.001;

/// Heuristic evaluator for one search invocation
#[derive(Clone)]
pub struct HeuristicEvaluator {
    axes: Vec<String>,
    formula: HeuristicFormula,
    d_factor: f64,
    haversine_radius: f64,
    tie_breaker: bool,
    custom: Option<Arc<dyn CustomHeuristic>>,
    source: Vec<f64>,
    goal: Vec<f64>,
}

impl HeuristicEvaluator {
    /// Build an evaluator, resolving a custom formula against `registry`.
    ///
    /// Source and goal coordinates start at the origin until
    /// [`bind`](Self::bind) reads them from the graph.
    pub fn new(config: &SearchConfig, registry: &HeuristicRegistry) -> Result<Self> {
        let custom = match config.heuristic_formula {
            HeuristicFormula::Custom => Some(registry.resolve(&config.custom_heuristic_formula)?),
            _ => None,
        };
        let dims = config.vertex_axis_names.len();

        Ok(Self {
            axes: config.vertex_axis_names.clone(),
            formula: config.heuristic_formula,
            d_factor: config.d_factor,
            haversine_radius: config.haversine_radius,
            tie_breaker: config.tie_breaker,
            custom,
            source: vec![0.0; dims],
            goal: vec![0.0; dims],
        })
    }

    /// Read source and goal coordinates from the graph
    pub fn bind<G: GraphAccessor>(
        mut self,
        graph: &G,
        source: &G::Node,
        goal: &G::Node,
    ) -> Result<Self> {
        self.source = self.coordinates(graph, source)?;
        self.goal = self.coordinates(graph, goal)?;
        Ok(self)
    }

    pub fn axes(&self) -> &[String] {
        &self.axes
    }

    /// Coordinates of `node`; missing properties read as 0
    pub fn coordinates<G: GraphAccessor>(&self, graph: &G, node: &G::Node) -> Result<Vec<f64>> {
        self.axes
            .iter()
            .map(|axis| Ok(graph.property(node, axis)?.unwrap_or(0.0)))
            .collect()
    }

    /// Estimated remaining cost from `node` to the goal
    pub fn estimate<G: GraphAccessor>(
        &self,
        graph: &G,
        node: &G::Node,
        parent: Option<&G::Node>,
        depth: u64,
    ) -> Result<f64> {
        if self.axes.is_empty() {
            return Ok(0.0);
        }
        let current = self.coordinates(graph, node)?;
        let parent = match (parent, &self.custom) {
            (Some(parent), Some(_)) => Some(self.coordinates(graph, parent)?),
            _ => None,
        };
        Ok(self.estimate_at(&current, parent.as_deref(), depth))
    }

    /// Estimate from already resolved coordinates, never negative or NaN
    pub fn estimate_at(&self, current: &[f64], parent: Option<&[f64]>, depth: u64) -> f64 {
        let h = self.raw_estimate(current, parent, depth);
        if h.is_nan() {
            0.0
        } else {
            h.max(0.0)
        }
    }

    fn raw_estimate(&self, current: &[f64], parent: Option<&[f64]>, depth: u64) -> f64 {
        let goal = self.goal.as_slice();
        let h = match self.axes.len() {
            0 => return 0.0,
            1 => return self.d_factor * (current[0] - goal[0]).abs(),
            _ => match self.formula {
                HeuristicFormula::Manhattan => self.d_factor * manhattan(current, goal),
                HeuristicFormula::MaxAxis => self.d_factor * max_axis(current, goal),
                HeuristicFormula::Diagonal => self.d_factor * diagonal(current, goal),
                HeuristicFormula::Euclidean => self.d_factor * euclidean(current, goal),
                HeuristicFormula::EuclideanNoSqr => {
                    self.d_factor * euclidean_no_sqr(current, goal)
                }
                HeuristicFormula::Haversine => {
                    self.d_factor
                        * haversine(
                            (current[0], current[1]),
                            (goal[0], goal[1]),
                            self.haversine_radius,
                        )
                }
                HeuristicFormula::Custom => match &self.custom {
                    Some(custom) => custom
                        .estimate(&HeuristicInput {
                            axis_names: &self.axes,
                            source: &self.source,
                            current,
                            parent: parent.unwrap_or(current),
                            goal,
                            depth,
                            d_factor: self.d_factor,
                        })
                        .max(0.0),
                    None => 0.0,
                },
            },
        };

        if self.tie_breaker {
            h + TIE_BREAK_WEIGHT * cross_magnitude(current, &self.source, goal)
        } else {
            h
        }
    }
}

impl std::fmt::Debug for HeuristicEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeuristicEvaluator")
            .field("axes", &self.axes)
            .field("formula", &self.formula)
            .field("d_factor", &self.d_factor)
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}

fn deltas<'a>(a: &'a [f64], b: &'a [f64]) -> impl Iterator<Item = f64> + 'a {
    a.iter().zip(b).map(|(x, y)| (x - y).abs())
}

/// Sum of per-axis distances
pub fn manhattan(a: &[f64], b: &[f64]) -> f64 {
    deltas(a, b).sum()
}

/// Largest per-axis distance
pub fn max_axis(a: &[f64], b: &[f64]) -> f64 {
    deltas(a, b).fold(0.0, f64::max)
}

/// Octile distance generalized to any number of axes.
///
/// With deltas sorted descending `d1 >= d2 >= .. >= dn`, moving diagonally
/// through `k` axes at once costs `sqrt(k)` per unit, which sums to
/// `Σ (d_k - d_{k+1}) * sqrt(k)`. For two axes this is the usual
/// `(dx + dy) + (sqrt2 - 2) * min(dx, dy)`.
pub fn diagonal(a: &[f64], b: &[f64]) -> f64 {
    let mut d: Vec<f64> = deltas(a, b).collect();
    d.sort_by(|x, y| y.total_cmp(x));
    d.push(0.0);
    d.windows(2)
        .enumerate()
        .map(|(k, w)| (w[0] - w[1]) * ((k + 1) as f64).sqrt())
        .sum()
}

/// Straight-line distance
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    euclidean_no_sqr(a, b).sqrt()
}

/// Squared straight-line distance
pub fn euclidean_no_sqr(a: &[f64], b: &[f64]) -> f64 {
    deltas(a, b).map(|d| d * d).sum()
}

/// Great-circle distance between two (latitude, longitude) points in degrees
pub fn haversine(from: (f64, f64), to: (f64, f64), radius: f64) -> f64 {
    let (lat1, lon1) = (from.0.to_radians(), from.1.to_radians());
    let (lat2, lon2) = (to.0.to_radians(), to.1.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).max(0.0).sqrt());
    radius * c
}

/// Magnitude of the cross product of (current - goal) and (source - goal).
///
/// Uses `|a|²|b|² - (a·b)²`, which equals `|a × b|²` in any dimension.
/// Zero when `current` lies on the line through source and goal.
pub fn cross_magnitude(current: &[f64], source: &[f64], goal: &[f64]) -> f64 {
    let mut aa = 0.0;
    let mut bb = 0.0;
    let mut ab = 0.0;
    for ((c, s), g) in current.iter().zip(source).zip(goal) {
        let a = c - g;
        let b = s - g;
        aa += a * a;
        bb += b * b;
        ab += a * b;
    }
    (aa * bb - ab * ab).max(0.0).sqrt()
}
