//! Serialized graph format

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A whole graph as stored on disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,

    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Unique node name
    pub name: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from: String,
    pub to: String,

    /// Edge type, matched against `edgeTypeNames`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Value>,
}

impl GraphDocument {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Numeric view of a node property value.
///
/// Numbers are taken as is and numeric strings are parsed. Anything else has
/// no numeric value.
pub fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_document() {
        let doc = GraphDocument::from_json(
            r#"{
                "nodes": [
                    {"name": "A", "properties": {"x": 0, "y": 1.5}},
                    {"name": "B"}
                ],
                "edges": [
                    {"from": "A", "to": "B", "label": "road", "properties": {"weight": 2}}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(doc.nodes.len(), 2);
        assert_eq!(doc.nodes[0].properties["y"], json!(1.5));
        assert!(doc.nodes[1].properties.is_empty());
        assert_eq!(doc.edges[0].label.as_deref(), Some("road"));
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let doc = GraphDocument::from_json("{}").unwrap();
        assert_eq!(doc, GraphDocument::default());
    }

    #[test]
    fn test_numeric_values() {
        assert_eq!(numeric(&json!(3)), Some(3.0));
        assert_eq!(numeric(&json!(" 2.5 ")), Some(2.5));
        assert_eq!(numeric(&json!("heavy")), None);
        assert_eq!(numeric(&json!(true)), None);
        assert_eq!(numeric(&Value::Null), None);
    }
}
