//! Graph summary command

use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

use crate::config::Config;
use crate::output::{format_summary, GraphSummary};
use crate::Cli;
use wayfind_graph::MemoryGraph;

#[derive(Args)]
pub struct InfoArgs {
    /// Graph document (JSON)
    pub graph: PathBuf,
}

pub fn summarize(graph: &MemoryGraph) -> GraphSummary {
    GraphSummary {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        labels: graph.labels().into_iter().map(String::from).collect(),
        properties: graph.property_names().into_iter().map(String::from).collect(),
    }
}

pub fn run(args: &InfoArgs, cli: &Cli) -> anyhow::Result<()> {
    let config = Config::load()?;
    let format = cli.output_format(&config)?;
    let graph = MemoryGraph::load(&args.graph)
        .with_context(|| format!("Failed to load graph {}", args.graph.display()))?;
    print!("{}", format_summary(&summarize(&graph), format)?);
    Ok(())
}
