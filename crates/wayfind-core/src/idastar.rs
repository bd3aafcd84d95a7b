//! Iterative-deepening A*
//!
//! Repeated depth-first probes bounded by an `f = g + h` threshold. Memory is
//! proportional to the current path length instead of the explored space.
//! The probe runs on an explicit stack, so deep graphs cannot overflow the
//! call stack.

use crate::error::Result;
use crate::graph::GraphAccessor;
use crate::path::{PathResult, SearchOutcome, SearchStats};
use crate::search::{PathSearch, SearchContext};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Default)]
pub struct IdaStarSearch;

/// One node on the probe's current path
struct Frame<N> {
    node: N,
    g: f64,
    depth: u64,
    children: std::vec::IntoIter<(N, f64)>,
}

/// Result of one bounded probe
#[derive(Debug)]
enum Probe<N> {
    /// Reached the goal
    Goal { route: Vec<N>, cost: f64 },
    /// Hit the depth bound first
    Cutoff { route: Vec<N>, cost: f64 },
    /// Nothing within the threshold; `next` is the smallest f that exceeded it
    Exceeded { next: f64, deepest: u64 },
}

impl PathSearch for IdaStarSearch {
    fn name(&self) -> &'static str {
        "idastar"
    }

    fn find_path<G: GraphAccessor>(&self, ctx: &SearchContext<'_, G>) -> Result<PathResult<G::Node>> {
        let config = ctx.config;
        let mut stats = SearchStats::default();
        let mut threshold = ctx.estimate(&ctx.source, None, 0)?;

        loop {
            stats.iterations += 1;
            tracing::debug!("IDA* iteration {}: threshold={}", stats.iterations, threshold);

            match probe(ctx, threshold, &mut stats)? {
                Probe::Goal { route, cost } => {
                    return Ok(PathResult::found(route, cost, stats));
                }
                Probe::Cutoff { route, cost } => {
                    if config.empty_if_max_depth {
                        return Ok(PathResult::empty(SearchOutcome::DepthCutoff, stats));
                    }
                    return Ok(PathResult::cutoff(route, cost, stats));
                }
                Probe::Exceeded { next, deepest } => {
                    if config.empty_if_max_depth && deepest >= config.max_depth {
                        return Ok(PathResult::empty(SearchOutcome::DepthCutoff, stats));
                    }
                    if !next.is_finite() {
                        tracing::debug!("IDA* found no threshold above {}", threshold);
                        return Ok(PathResult::empty(SearchOutcome::Exhausted, stats));
                    }
                    threshold = next;
                }
            }
        }
    }
}

/// Depth-first search bounded by `threshold`.
///
/// A neighbor already on the current path is skipped, which keeps every
/// route simple without a closed set.
fn probe<G: GraphAccessor>(
    ctx: &SearchContext<'_, G>,
    threshold: f64,
    stats: &mut SearchStats,
) -> Result<Probe<G::Node>> {
    let max_depth = ctx.config.max_depth;
    let mut stack: Vec<Frame<G::Node>> = Vec::new();
    let mut on_path: HashSet<G::Node> = HashSet::new();
    let mut next = f64::INFINITY;
    let mut deepest: u64 = 0;
    let mut pending = Some((ctx.source.clone(), 0.0, 0u64));

    loop {
        if let Some((node, g, depth)) = pending.take() {
            deepest = deepest.max(depth);
            stats.max_depth_reached = stats.max_depth_reached.max(depth);

            let parent = stack.last().map(|frame| &frame.node);
            let f = g + ctx.estimate(&node, parent, depth)?;

            if f > threshold {
                next = next.min(f);
            } else if ctx.is_goal(&node) || depth >= max_depth {
                let reached = ctx.is_goal(&node);
                let mut route: Vec<G::Node> = stack.into_iter().map(|frame| frame.node).collect();
                route.push(node);
                return Ok(if reached {
                    Probe::Goal { route, cost: g }
                } else {
                    Probe::Cutoff { route, cost: g }
                });
            } else {
                stats.nodes_expanded += 1;
                tracing::trace!("IDA* expanding {:?} (g={}, f={})", node, g, f);
                let children = ctx.neighbors(&node, stats)?;
                on_path.insert(node.clone());
                stack.push(Frame {
                    node,
                    g,
                    depth,
                    children: children.into_iter(),
                });
            }
        }

        let Some(frame) = stack.last_mut() else {
            break;
        };
        match frame.children.next() {
            Some((child, weight)) => {
                if !on_path.contains(&child) {
                    pending = Some((child, frame.g + weight, frame.depth + 1));
                }
            }
            None => {
                if let Some(done) = stack.pop() {
                    on_path.remove(&done.node);
                }
            }
        }
    }

    Ok(Probe::Exceeded { next, deepest })
}
