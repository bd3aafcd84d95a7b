//! In-memory graph backend

use crate::document::{numeric, EdgeRecord, GraphDocument, NodeRecord};
use crate::error::{GraphError, GraphResult};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use wayfind_core::{Direction, GraphAccessor};

/// Index of a node in a [`MemoryGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Index of an edge in a [`MemoryGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

#[derive(Debug, Clone)]
struct NodeData {
    name: String,
    properties: BTreeMap<String, Value>,
}

#[derive(Debug, Clone)]
struct EdgeData {
    from: NodeId,
    to: NodeId,
    label: Option<String>,
    properties: BTreeMap<String, Value>,
}

/// Adjacency-list graph, read-only once built
#[derive(Debug, Clone, Default)]
pub struct MemoryGraph {
    nodes: Vec<NodeData>,
    edges: Vec<EdgeData>,
    by_name: HashMap<String, NodeId>,
    outgoing: Vec<Vec<EdgeId>>,
    incoming: Vec<Vec<EdgeId>>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a graph document from a JSON file
    pub fn load(path: impl AsRef<Path>) -> GraphResult<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading graph from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> GraphResult<Self> {
        let doc = GraphDocument::from_json(text)?;
        Self::from_document(doc)
    }

    /// Build a graph, checking that names are unique and edges resolve
    pub fn from_document(doc: GraphDocument) -> GraphResult<Self> {
        let mut graph = Self::new();
        for node in doc.nodes {
            graph.add_node(node.name, node.properties)?;
        }
        for edge in doc.edges {
            graph.add_edge(&edge.from, &edge.to, edge.label, edge.properties)?;
        }
        tracing::debug!(
            "Built graph with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }

    pub fn to_document(&self) -> GraphDocument {
        GraphDocument {
            nodes: self
                .nodes
                .iter()
                .map(|n| NodeRecord {
                    name: n.name.clone(),
                    properties: n.properties.clone(),
                })
                .collect(),
            edges: self
                .edges
                .iter()
                .map(|e| EdgeRecord {
                    from: self.nodes[e.from.0].name.clone(),
                    to: self.nodes[e.to.0].name.clone(),
                    label: e.label.clone(),
                    properties: e.properties.clone(),
                })
                .collect(),
        }
    }

    pub fn add_node(
        &mut self,
        name: impl Into<String>,
        properties: BTreeMap<String, Value>,
    ) -> GraphResult<NodeId> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(GraphError::DuplicateNode(name));
        }
        let id = NodeId(self.nodes.len());
        self.by_name.insert(name.clone(), id);
        self.nodes.push(NodeData { name, properties });
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        Ok(id)
    }

    pub fn add_edge(
        &mut self,
        from: &str,
        to: &str,
        label: Option<String>,
        properties: BTreeMap<String, Value>,
    ) -> GraphResult<EdgeId> {
        let from = self.require(from)?;
        let to = self.require(to)?;
        let id = EdgeId(self.edges.len());
        self.edges.push(EdgeData {
            from,
            to,
            label,
            properties,
        });
        self.outgoing[from.0].push(id);
        self.incoming[to.0].push(id);
        Ok(id)
    }

    fn require(&self, name: &str) -> GraphResult<NodeId> {
        self.node_id(name)
            .ok_or_else(|| GraphError::UnknownNode(name.to_string()))
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id.0).map(|n| n.name.as_str())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Distinct edge labels, sorted
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.edges.iter().filter_map(|e| e.label.as_deref()).collect();
        labels.sort_unstable();
        labels.dedup();
        labels
    }

    /// Distinct node property names, sorted
    pub fn property_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .nodes
            .iter()
            .flat_map(|n| n.properties.keys().map(String::as_str))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Resolve a node selector.
    ///
    /// A selector is either a node name or `key=value`, matching every node
    /// whose property `key` equals `value`. An exact name always wins.
    pub fn find_nodes(&self, selector: &str) -> GraphResult<Vec<NodeId>> {
        if let Some(id) = self.node_id(selector) {
            return Ok(vec![id]);
        }
        let Some((key, raw)) = selector.split_once('=') else {
            return Ok(Vec::new());
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(GraphError::InvalidSelector(selector.to_string()));
        }
        let raw = raw.trim();
        let wanted: Value =
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));

        Ok(self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.properties.get(key).map_or(false, |v| same_value(v, &wanted)))
            .map(|(i, _)| NodeId(i))
            .collect())
    }
}

fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

impl GraphAccessor for MemoryGraph {
    type Node = NodeId;
    type Edge = EdgeId;

    fn neighbor_edges(
        &self,
        node: &NodeId,
        direction: Direction,
        edge_types: &[String],
    ) -> wayfind_core::Result<Vec<EdgeId>> {
        let (Some(out), Some(inc)) = (self.outgoing.get(node.0), self.incoming.get(node.0)) else {
            return Err(wayfind_core::Error::Accessor(format!("Unknown node id {}", node.0)));
        };
        let candidates: Vec<EdgeId> = match direction {
            Direction::Outgoing => out.clone(),
            Direction::Incoming => inc.clone(),
            Direction::Both => out.iter().chain(inc.iter()).copied().collect(),
        };
        if edge_types.is_empty() {
            return Ok(candidates);
        }
        Ok(candidates
            .into_iter()
            .filter(|id| {
                self.edges[id.0]
                    .label
                    .as_deref()
                    .map_or(false, |label| edge_types.iter().any(|t| t == label))
            })
            .collect())
    }

    fn other_endpoint(&self, edge: &EdgeId, node: &NodeId) -> wayfind_core::Result<NodeId> {
        let data = self
            .edges
            .get(edge.0)
            .ok_or_else(|| wayfind_core::Error::Accessor(format!("Unknown edge id {}", edge.0)))?;
        Ok(if data.from == *node { data.to } else { data.from })
    }

    fn weight(&self, edge: &EdgeId, field: &str) -> wayfind_core::Result<Option<f64>> {
        let data = self
            .edges
            .get(edge.0)
            .ok_or_else(|| wayfind_core::Error::Accessor(format!("Unknown edge id {}", edge.0)))?;
        // Only JSON numbers count as weights
        Ok(data.properties.get(field).and_then(Value::as_f64))
    }

    fn property(&self, node: &NodeId, name: &str) -> wayfind_core::Result<Option<f64>> {
        let data = self
            .nodes
            .get(node.0)
            .ok_or_else(|| wayfind_core::Error::Accessor(format!("Unknown node id {}", node.0)))?;
        Ok(data.properties.get(name).and_then(numeric))
    }
}
