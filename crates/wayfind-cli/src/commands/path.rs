//! Path search command

use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::output::{format_path, PathReport};
use crate::Cli;
use wayfind_core::{
    search, select_single, Algorithm, HeuristicRegistry, NodeRole, SearchConfig, SearchOptions,
};
use wayfind_graph::{MemoryGraph, NodeId};

#[derive(Args)]
pub struct PathArgs {
    /// Graph document (JSON)
    pub graph: PathBuf,

    /// Source node: a name or key=value
    pub from: String,

    /// Destination node: a name or key=value
    pub to: String,

    /// Algorithm: astar, idastar, lrtastar
    #[arg(short, long)]
    pub algorithm: Option<String>,

    /// Edge property holding the weight
    #[arg(short, long)]
    pub weight_field: Option<String>,

    /// Search option map as JSON, e.g. '{"tieBreaker":true}'
    #[arg(short, long)]
    pub options: Option<String>,

    /// Heuristic formula
    #[arg(long)]
    pub formula: Option<String>,

    /// Node property used as a heuristic axis (repeatable or comma separated)
    #[arg(long, value_delimiter = ',')]
    pub axis: Vec<String>,

    /// Traversal direction: out, in, both
    #[arg(long)]
    pub direction: Option<String>,

    /// Only follow edges with this label (repeatable or comma separated)
    #[arg(long, value_delimiter = ',')]
    pub edge_type: Vec<String>,

    /// Prefer routes close to the straight source-destination line
    #[arg(long)]
    pub tie_breaker: bool,

    /// Heuristic scale factor
    #[arg(long)]
    pub d_factor: Option<f64>,

    /// Depth bound
    #[arg(long)]
    pub max_depth: Option<u64>,

    /// Return nothing instead of a truncated path at the depth bound
    #[arg(long)]
    pub empty_if_max_depth: bool,

    /// LRTA* time budget in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Abort the whole search after this many milliseconds
    #[arg(long)]
    pub deadline_ms: Option<u64>,
}

impl PathArgs {
    /// Layer config file options, `--options` and explicit flags, in that order
    pub fn search_config(&self, config: &Config) -> anyhow::Result<SearchConfig> {
        let mut search = config.search_options()?.into_config()?;
        if let Some(json) = &self.options {
            search = SearchOptions::from_json(json)
                .context("Invalid --options")?
                .apply(search)?;
        }
        if let Some(formula) = &self.formula {
            search.heuristic_formula = formula.parse()?;
        }
        if !self.axis.is_empty() {
            search.vertex_axis_names = self.axis.clone();
        }
        if let Some(direction) = &self.direction {
            search.direction = direction.parse()?;
        }
        if !self.edge_type.is_empty() {
            search.edge_type_names = self.edge_type.clone();
        }
        if self.tie_breaker {
            search.tie_breaker = true;
        }
        if let Some(d_factor) = self.d_factor {
            search.d_factor = d_factor;
        }
        if let Some(max_depth) = self.max_depth {
            search.max_depth = max_depth;
        }
        if self.empty_if_max_depth {
            search.empty_if_max_depth = true;
        }
        if let Some(ms) = self.timeout_ms {
            search.timeout = Some(Duration::from_millis(ms));
        }
        search.validate()?;
        Ok(search)
    }
}

/// Run `job` on the blocking pool, giving up after `deadline`.
///
/// The search itself cannot be interrupted. On expiry its result is
/// discarded, and `main` shuts the runtime down without waiting for the
/// abandoned thread.
pub async fn with_deadline<T, F>(deadline: Option<Duration>, job: F) -> anyhow::Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let handle = tokio::task::spawn_blocking(job);
    match deadline {
        Some(limit) => match tokio::time::timeout(limit, handle).await {
            Ok(joined) => Ok(joined?),
            Err(_) => anyhow::bail!("Search exceeded deadline of {} ms", limit.as_millis()),
        },
        None => Ok(handle.await?),
    }
}

fn resolve(graph: &MemoryGraph, role: NodeRole, selector: &str) -> anyhow::Result<NodeId> {
    let candidates = graph.find_nodes(selector)?;
    select_single(role, candidates).with_context(|| format!("Resolving {} '{}'", role, selector))
}

pub async fn run(args: &PathArgs, cli: &Cli) -> anyhow::Result<()> {
    let config = Config::load()?;
    let algorithm: Algorithm = match &args.algorithm {
        Some(name) => name.parse()?,
        None => config.algorithm()?,
    };
    let weight_field = args
        .weight_field
        .clone()
        .unwrap_or_else(|| config.weight_field.clone());
    let search_config = args.search_config(&config)?;
    let format = cli.output_format(&config)?;

    let graph = MemoryGraph::load(&args.graph)
        .with_context(|| format!("Failed to load graph {}", args.graph.display()))?;
    let source = resolve(&graph, NodeRole::Source, &args.from)?;
    let destination = resolve(&graph, NodeRole::Destination, &args.to)?;

    tracing::info!(
        "Searching {} -> {} with {} over {} nodes",
        args.from,
        args.to,
        algorithm,
        graph.node_count()
    );

    let graph = Arc::new(graph);
    let job_graph = Arc::clone(&graph);
    let result = with_deadline(args.deadline_ms.map(Duration::from_millis), move || {
        search(
            algorithm,
            job_graph.as_ref(),
            source,
            destination,
            &weight_field,
            &search_config,
            &HeuristicRegistry::new(),
        )
    })
    .await??;

    let name = |id: NodeId| graph.node_name(id).unwrap_or("?").to_string();
    let report = PathReport {
        algorithm: algorithm.name().to_string(),
        source: name(source),
        destination: name(destination),
        result: result.map_nodes(name),
    };
    print!("{}", format_path(&report, format)?);
    Ok(())
}
