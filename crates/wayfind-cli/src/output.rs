//! Output formatting utilities

use serde::Serialize;
use std::str::FromStr;
use wayfind_core::{PathResult, SearchStats};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" | "table" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("Unknown output format: {} (expected text or json)", other),
        }
    }
}

/// A path with node names, ready to print
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathReport {
    pub algorithm: String,
    pub source: String,
    pub destination: String,
    #[serde(flatten)]
    pub result: PathResult<String>,
}

/// Graph summary printed by `wayfind info`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSummary {
    pub nodes: usize,
    pub edges: usize,
    pub labels: Vec<String>,
    pub properties: Vec<String>,
}

/// Serialize as pretty JSON
pub fn to_json<T: Serialize>(data: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

pub fn format_path(report: &PathReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => to_json(report),
        OutputFormat::Text => {
            let result = &report.result;
            let mut out = String::new();
            if result.is_empty() {
                out.push_str(&format!(
                    "No path from {} to {} ({})\n",
                    report.source, report.destination, result.outcome
                ));
            } else {
                out.push_str(&result.nodes.join(" -> "));
                out.push('\n');
                out.push_str(&format!(
                    "cost: {}  steps: {}  outcome: {}\n",
                    result.cost,
                    result.len() - 1,
                    result.outcome
                ));
            }
            out.push_str(&format_stats(&report.algorithm, &result.stats));
            Ok(out)
        }
    }
}

fn format_stats(algorithm: &str, stats: &SearchStats) -> String {
    format!(
        "{}: expanded {} nodes, scanned {} edges, {} iteration(s)\n",
        algorithm, stats.nodes_expanded, stats.edges_scanned, stats.iterations
    )
}

pub fn format_summary(summary: &GraphSummary, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => to_json(summary),
        OutputFormat::Text => {
            let list = |items: &[String]| {
                if items.is_empty() {
                    "(none)".to_string()
                } else {
                    items.join(", ")
                }
            };
            Ok(format!(
                "nodes: {}\nedges: {}\nedge labels: {}\nnode properties: {}\n",
                summary.nodes,
                summary.edges,
                list(&summary.labels),
                list(&summary.properties)
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfind_core::SearchOutcome;

    fn report(nodes: Vec<&str>, outcome: SearchOutcome) -> PathReport {
        let result = PathResult {
            nodes: nodes.into_iter().map(String::from).collect(),
            cost: 2.0,
            outcome,
            stats: SearchStats::default(),
        };
        PathReport {
            algorithm: "astar".to_string(),
            source: "A".to_string(),
            destination: "C".to_string(),
            result,
        }
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("csv".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_text_path() {
        let text = format_path(&report(vec!["A", "B", "C"], SearchOutcome::Found), OutputFormat::Text)
            .unwrap();
        assert!(text.starts_with("A -> B -> C\n"));
        assert!(text.contains("steps: 2"));
        assert!(text.contains("outcome: found"));

        let text = format_path(&report(vec![], SearchOutcome::Exhausted), OutputFormat::Text).unwrap();
        assert!(text.starts_with("No path from A to C (exhausted)"));
    }

    #[test]
    fn test_json_path_is_flat() {
        let json = format_path(&report(vec!["A", "C"], SearchOutcome::DepthCutoff), OutputFormat::Json)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["algorithm"], "astar");
        assert_eq!(value["nodes"], serde_json::json!(["A", "C"]));
        assert_eq!(value["outcome"], "depth_cutoff");
        assert_eq!(value["stats"]["nodesExpanded"], 0);
    }
}
