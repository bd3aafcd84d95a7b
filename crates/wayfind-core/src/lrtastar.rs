//! Learning real-time A*
//!
//! An agent walks from source to goal one greedy step at a time, raising a
//! learned estimate for every node it leaves. Trials repeat until a whole
//! trial leaves the learned table unchanged or the time budget runs out, so
//! an interrupted run still yields the best route seen so far.
//!
//! A node with no usable successor learns an infinite estimate and the next
//! trial starts over, so dead ends are walked into at most once each.
//! Routes drop their cycles as they grow and never hold more nodes than the
//! graph has. Step costs are assumed to be positive: without a timeout, a
//! cycle of near-zero weights raises estimates so slowly that convergence
//! can take practically forever.

use crate::error::Result;
use crate::graph::GraphAccessor;
use crate::path::{CycleFreeRoute, PathResult, SearchOutcome, SearchStats};
use crate::search::{PathSearch, SearchContext};
use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Instant;

#[derive(Debug, Clone, Copy, Default)]
pub struct LrtaStarSearch;

/// How one trial ended
#[derive(Debug)]
enum Trial<N> {
    /// Reached the goal; `changed` tells whether any learned value moved
    Completed { route: Vec<N>, changed: bool },
    /// A node without usable successors, now learned as unreachable
    DeadEnd,
    TimedOut,
}

/// Learned estimates and bookkeeping shared by the trials of one search
struct Learner<'c, 'a, G: GraphAccessor> {
    ctx: &'c SearchContext<'a, G>,
    learned: HashMap<G::Node, f64>,
    /// Nodes from which the goal is reachable, when computed
    allowed: Option<HashSet<G::Node>>,
    started: Instant,
    stats: SearchStats,
}

impl<'c, 'a, G: GraphAccessor> Learner<'c, 'a, G> {
    fn new(ctx: &'c SearchContext<'a, G>) -> Result<Self> {
        let started = Instant::now();
        let mut stats = SearchStats::default();
        let allowed = match ctx.config.timeout {
            Some(_) => None,
            None => Some(goal_reaching(ctx, &mut stats)?),
        };
        Ok(Self {
            ctx,
            learned: HashMap::new(),
            allowed,
            started,
            stats,
        })
    }

    fn timed_out(&self) -> bool {
        self.ctx
            .config
            .timeout
            .map_or(false, |limit| self.started.elapsed() >= limit)
    }

    /// Learned value, falling back to the heuristic
    fn score(&self, node: &G::Node, parent: Option<&G::Node>, depth: u64) -> Result<f64> {
        match self.learned.get(node) {
            Some(&h) => Ok(h),
            None => self.ctx.estimate(node, parent, depth),
        }
    }

    /// Cheapest `weight + score` successor of `current`
    fn lookahead(&mut self, current: &G::Node, depth: u64) -> Result<Option<(G::Node, f64)>> {
        let neighbors = self.ctx.neighbors(current, &mut self.stats)?;
        let mut pick: Option<(G::Node, f64)> = None;
        for (next, weight) in neighbors {
            if let Some(allowed) = &self.allowed {
                if !allowed.contains(&next) {
                    continue;
                }
            }
            let score = weight + self.score(&next, Some(current), depth + 1)?;
            if score.is_infinite() {
                continue;
            }
            if pick.as_ref().map_or(true, |(_, best)| score < *best) {
                pick = Some((next, score));
            }
        }
        Ok(pick)
    }

    /// Walk from source to goal once, updating learned values on the way
    fn trial(&mut self) -> Result<Trial<G::Node>> {
        let ctx = self.ctx;
        let mut current = ctx.source.clone();
        let mut route = CycleFreeRoute::new();
        route.push(current.clone());
        let mut changed = false;
        let mut depth: u64 = 0;

        while !ctx.is_goal(&current) {
            if self.timed_out() {
                return Ok(Trial::TimedOut);
            }

            let Some((next, score)) = self.lookahead(&current, depth)? else {
                tracing::trace!("LRTA* dead end at {:?}", current);
                self.learned.insert(current, f64::INFINITY);
                return Ok(Trial::DeadEnd);
            };
            self.stats.nodes_expanded += 1;

            let previous = self.score(&current, None, depth)?;
            if score > previous {
                tracing::trace!("LRTA* raising h({:?}) {} -> {}", current, previous, score);
                self.learned.insert(current.clone(), score);
                changed = true;
            }

            route.push(next.clone());
            current = next;
            depth += 1;
            self.stats.max_depth_reached = self.stats.max_depth_reached.max(depth);
        }

        Ok(Trial::Completed {
            route: route.into_vec(),
            changed,
        })
    }
}

impl PathSearch for LrtaStarSearch {
    fn name(&self) -> &'static str {
        "lrtastar"
    }

    fn find_path<G: GraphAccessor>(&self, ctx: &SearchContext<'_, G>) -> Result<PathResult<G::Node>> {
        let config = ctx.config;
        let mut learner = Learner::new(ctx)?;

        if let Some(allowed) = &learner.allowed {
            if !allowed.contains(&ctx.source) {
                tracing::debug!("LRTA*: destination unreachable from source");
                return Ok(PathResult::empty(SearchOutcome::Exhausted, learner.stats));
            }
        }

        let mut best: Option<Vec<G::Node>> = None;
        let (route, outcome) = loop {
            learner.stats.iterations += 1;
            match learner.trial()? {
                Trial::Completed { route, changed } => {
                    tracing::debug!(
                        "LRTA* trial {} completed: {} nodes, changed={}",
                        learner.stats.iterations,
                        route.len(),
                        changed
                    );
                    if !changed {
                        break (route, SearchOutcome::Found);
                    }
                    if best.as_ref().map_or(true, |b| route.len() < b.len()) {
                        best = Some(route);
                    }
                }
                Trial::DeadEnd => {
                    tracing::debug!("LRTA* trial {} hit a dead end", learner.stats.iterations);
                    let source_dead = learner
                        .learned
                        .get(&ctx.source)
                        .map_or(false, |h| h.is_infinite());
                    if source_dead {
                        match best.take() {
                            Some(route) => break (route, SearchOutcome::Found),
                            None => {
                                return Ok(PathResult::empty(
                                    SearchOutcome::Exhausted,
                                    learner.stats,
                                ))
                            }
                        }
                    }
                }
                Trial::TimedOut => {
                    tracing::debug!(
                        "LRTA* timed out during trial {} after {:?}",
                        learner.stats.iterations,
                        learner.started.elapsed()
                    );
                    match best.take() {
                        Some(route) => break (route, SearchOutcome::TimedOut),
                        None => {
                            return Ok(PathResult::empty(SearchOutcome::TimedOut, learner.stats))
                        }
                    }
                }
            }
        };

        let stats = learner.stats;
        let steps = route.len().saturating_sub(1) as u64;
        if steps > config.max_depth {
            if config.empty_if_max_depth {
                return Ok(PathResult::empty(SearchOutcome::DepthCutoff, stats));
            }
            let keep = usize::try_from(config.max_depth)
                .map_or(route.len(), |d| d.saturating_add(1));
            let mut route = route;
            route.truncate(keep);
            let cost = ctx.path_cost(&route)?;
            return Ok(PathResult::cutoff(route, cost, stats));
        }

        let cost = ctx.path_cost(&route)?;
        Ok(PathResult {
            nodes: route,
            cost,
            outcome,
            stats,
        })
    }
}

/// Nodes that can reach the destination, found by walking edges backwards
fn goal_reaching<G: GraphAccessor>(
    ctx: &SearchContext<'_, G>,
    stats: &mut SearchStats,
) -> Result<HashSet<G::Node>> {
    let reverse = ctx.config.direction.reverse();
    let mut seen: HashSet<G::Node> = HashSet::new();
    let mut queue: VecDeque<G::Node> = VecDeque::new();
    seen.insert(ctx.destination.clone());
    queue.push_back(ctx.destination.clone());

    while let Some(node) = queue.pop_front() {
        for (prev, _) in ctx.neighbors_toward(&node, reverse, stats)? {
            if seen.insert(prev.clone()) {
                queue.push_back(prev);
            }
        }
    }
    Ok(seen)
}
