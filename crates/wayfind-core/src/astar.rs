//! Best-first A* search

use crate::error::Result;
use crate::graph::GraphAccessor;
use crate::path::{reconstruct, PathResult, SearchOutcome, SearchStats};
use crate::search::{PathSearch, SearchContext};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

/// Open-set entry. Lower `f` pops first, equal `f` in insertion order.
struct OpenEntry<N> {
    f: f64,
    g: f64,
    seq: u64,
    node: N,
}

impl<N> PartialEq for OpenEntry<N> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N> Eq for OpenEntry<N> {}

impl<N> Ord for OpenEntry<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<N> PartialOrd for OpenEntry<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Classic A*: open heap ordered by `f = g + h`, closed set, predecessor map.
///
/// Optimal when the heuristic is admissible and consistent. `max_depth`
/// bounds the number of expansions.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStarSearch;

impl PathSearch for AStarSearch {
    fn name(&self) -> &'static str {
        "astar"
    }

    fn find_path<G: GraphAccessor>(&self, ctx: &SearchContext<'_, G>) -> Result<PathResult<G::Node>> {
        let config = ctx.config;
        let mut stats = SearchStats {
            iterations: 1,
            ..Default::default()
        };

        let mut open = BinaryHeap::new();
        let mut g_score: HashMap<G::Node, f64> = HashMap::new();
        let mut came_from: HashMap<G::Node, G::Node> = HashMap::new();
        let mut closed: HashSet<G::Node> = HashSet::new();
        let mut seq: u64 = 0;
        let mut depth: u64 = 0;

        let h = ctx.estimate(&ctx.source, None, 0)?;
        g_score.insert(ctx.source.clone(), 0.0);
        open.push(OpenEntry {
            f: h,
            g: 0.0,
            seq,
            node: ctx.source.clone(),
        });

        while let Some(OpenEntry { g, node, .. }) = open.pop() {
            if closed.contains(&node) {
                continue;
            }
            // Skip if we already found a better path
            if g > *g_score.get(&node).unwrap_or(&f64::INFINITY) {
                continue;
            }

            if config.empty_if_max_depth && depth >= config.max_depth {
                tracing::debug!("A* hit depth bound {}, returning empty", config.max_depth);
                return Ok(PathResult::empty(SearchOutcome::DepthCutoff, stats));
            }

            if ctx.is_goal(&node) {
                tracing::debug!("A* reached goal after {} expansions, cost {}", depth, g);
                let route = reconstruct(&came_from, &node);
                return Ok(PathResult::found(route, g, stats));
            }

            if depth >= config.max_depth {
                tracing::debug!("A* stopped at depth bound {}", config.max_depth);
                let route = reconstruct(&came_from, &node);
                return Ok(PathResult::cutoff(route, g, stats));
            }

            closed.insert(node.clone());
            stats.nodes_expanded += 1;
            tracing::trace!("A* expanding {:?} (g={})", node, g);

            for (next, weight) in ctx.neighbors(&node, &mut stats)? {
                if closed.contains(&next) {
                    continue;
                }
                let tentative = g + weight;
                if g_score.get(&next).map_or(true, |&old| tentative < old) {
                    let h = ctx.estimate(&next, Some(&node), depth + 1)?;
                    g_score.insert(next.clone(), tentative);
                    came_from.insert(next.clone(), node.clone());
                    seq += 1;
                    open.push(OpenEntry {
                        f: tentative + h,
                        g: tentative,
                        seq,
                        node: next,
                    });
                }
            }

            depth += 1;
            stats.max_depth_reached = depth;
        }

        tracing::debug!("A* exhausted the open set after {} expansions", depth);
        Ok(PathResult::empty(SearchOutcome::Exhausted, stats))
    }
}
