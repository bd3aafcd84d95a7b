//! In-memory graphs and reference algorithms for unit tests

use crate::error::{Error, Result};
use crate::graph::{Direction, GraphAccessor};
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

#[derive(Debug, Clone)]
struct TestEdge<N> {
    from: N,
    to: N,
    label: Option<&'static str>,
    weight: Option<f64>,
}

/// Adjacency-free edge list graph, good enough for small fixtures
#[derive(Debug, Clone)]
pub struct TestGraph<N = &'static str> {
    edges: Vec<TestEdge<N>>,
    properties: HashMap<N, HashMap<String, f64>>,
}

impl<N: Clone + Eq + Hash + Debug> TestGraph<N> {
    pub fn new() -> Self {
        Self {
            edges: Vec::new(),
            properties: HashMap::new(),
        }
    }

    pub fn edge(self, from: N, to: N, weight: f64) -> Self {
        self.push(from, to, None, Some(weight))
    }

    pub fn unweighted_edge(self, from: N, to: N) -> Self {
        self.push(from, to, None, None)
    }

    pub fn labeled_edge(self, from: N, to: N, label: &'static str, weight: f64) -> Self {
        self.push(from, to, Some(label), Some(weight))
    }

    /// Edge in both directions with the same weight
    pub fn two_way(self, a: N, b: N, weight: f64) -> Self {
        self.edge(a.clone(), b.clone(), weight).edge(b, a, weight)
    }

    pub fn node(mut self, node: N, props: &[(&str, f64)]) -> Self {
        let entry = self.properties.entry(node).or_default();
        for (name, value) in props {
            entry.insert(name.to_string(), *value);
        }
        self
    }

    fn push(mut self, from: N, to: N, label: Option<&'static str>, weight: Option<f64>) -> Self {
        self.edges.push(TestEdge {
            from,
            to,
            label,
            weight,
        });
        self
    }
}

impl<N: Clone + Eq + Hash + Debug> GraphAccessor for TestGraph<N> {
    type Node = N;
    type Edge = usize;

    fn neighbor_edges(&self, node: &N, direction: Direction, edge_types: &[String]) -> Result<Vec<usize>> {
        Ok(self
            .edges
            .iter()
            .enumerate()
            .filter(|(_, e)| match direction {
                Direction::Outgoing => e.from == *node,
                Direction::Incoming => e.to == *node,
                Direction::Both => e.from == *node || e.to == *node,
            })
            .filter(|(_, e)| {
                edge_types.is_empty()
                    || e.label.map_or(false, |l| edge_types.iter().any(|t| t == l))
            })
            .map(|(i, _)| i)
            .collect())
    }

    fn other_endpoint(&self, edge: &usize, node: &N) -> Result<N> {
        let e = &self.edges[*edge];
        Ok(if e.from == *node { e.to.clone() } else { e.from.clone() })
    }

    fn weight(&self, edge: &usize, field: &str) -> Result<Option<f64>> {
        Ok(match field {
            "weight" => self.edges[*edge].weight,
            _ => None,
        })
    }

    fn property(&self, node: &N, name: &str) -> Result<Option<f64>> {
        Ok(self.properties.get(node).and_then(|p| p.get(name)).copied())
    }
}

/// 4-connected grid of unit two-way edges with `x`/`y` coordinates.
/// Cells listed in `walls` are left out.
pub fn grid(width: i64, height: i64, walls: &[(i64, i64)]) -> TestGraph<(i64, i64)> {
    let open = |c: &(i64, i64)| !walls.contains(c);
    let mut graph = TestGraph::new();
    for x in 0..width {
        for y in 0..height {
            if !open(&(x, y)) {
                continue;
            }
            graph = graph.node((x, y), &[("x", x as f64), ("y", y as f64)]);
            if x + 1 < width && open(&(x + 1, y)) {
                graph = graph.two_way((x, y), (x + 1, y), 1.0);
            }
            if y + 1 < height && open(&(x, y + 1)) {
                graph = graph.two_way((x, y), (x, y + 1), 1.0);
            }
        }
    }
    graph
}

/// Small deterministic pseudo-random generator
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed.wrapping_mul(6364136223846793005).wrapping_add(1))
    }

    pub fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    pub fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }
}

/// Random directed graph over nodes `0..nodes` with integer weights in
/// `1..=max_weight`. With `ring`, a cycle through all nodes keeps it strongly
/// connected.
pub fn random_graph(seed: u64, nodes: usize, edges: usize, max_weight: u64, ring: bool) -> TestGraph<usize> {
    let mut rng = Lcg::new(seed);
    let mut graph = TestGraph::new();
    if ring {
        for i in 0..nodes {
            let w = (1 + rng.below(max_weight)) as f64;
            graph = graph.edge(i, (i + 1) % nodes, w);
        }
    }
    for _ in 0..edges {
        let from = rng.below(nodes as u64) as usize;
        let to = rng.below(nodes as u64) as usize;
        let w = (1 + rng.below(max_weight)) as f64;
        graph = graph.edge(from, to, w);
    }
    graph
}

/// Reference shortest-path cost with plain O(V²) Dijkstra
pub fn dijkstra<G: GraphAccessor>(
    graph: &G,
    source: &G::Node,
    target: &G::Node,
    direction: Direction,
) -> Option<f64> {
    let mut dist: HashMap<G::Node, f64> = HashMap::new();
    let mut done: HashSet<G::Node> = HashSet::new();
    dist.insert(source.clone(), 0.0);

    loop {
        let current = dist
            .iter()
            .filter(|(n, _)| !done.contains(*n))
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(n, d)| (n.clone(), *d));
        let (node, d) = current?;
        if node == *target {
            return Some(d);
        }
        done.insert(node.clone());
        for edge in graph.neighbor_edges(&node, direction, &[]).ok()? {
            let next = graph.other_endpoint(&edge, &node).ok()?;
            let w = graph.weight(&edge, "weight").ok()?.unwrap_or(0.0);
            let candidate = d + w;
            if dist.get(&next).map_or(true, |&old| candidate < old) {
                dist.insert(next, candidate);
            }
        }
    }
}

/// Accessor whose every call fails
pub struct FailingGraph;

impl GraphAccessor for FailingGraph {
    type Node = u32;
    type Edge = ();

    fn neighbor_edges(&self, _: &u32, _: Direction, _: &[String]) -> Result<Vec<()>> {
        Err(Error::Accessor("storage offline".to_string()))
    }

    fn other_endpoint(&self, _: &(), _: &u32) -> Result<u32> {
        Err(Error::Accessor("storage offline".to_string()))
    }

    fn weight(&self, _: &(), _: &str) -> Result<Option<f64>> {
        Err(Error::Accessor("storage offline".to_string()))
    }

    fn property(&self, _: &u32, _: &str) -> Result<Option<f64>> {
        Err(Error::Accessor("storage offline".to_string()))
    }
}
