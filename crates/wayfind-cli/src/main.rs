//! Wayfind CLI - Heuristic path search over graph documents

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{completions, config as config_cmd, info, path};
use config::Config;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "wayfind")]
#[command(author, version, about = "Find paths in weighted graphs with A*, IDA* and LRTA*")]
pub struct Cli {
    /// Output format: text, json (defaults to the config file)
    #[arg(short, long, global = true)]
    pub format: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors; results still go to stdout
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Output format from the flag, else from the config file
    pub fn output_format(&self, config: &Config) -> anyhow::Result<OutputFormat> {
        self.format.as_deref().unwrap_or(&config.format).parse()
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find a path between two nodes
    Path(path::PathArgs),
    /// Summarize a graph document
    Info(info::InfoArgs),
    /// Manage search defaults
    Config(config_cmd::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting wayfind CLI");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(dispatch(&cli));
    // A search abandoned at its deadline may still occupy a blocking thread
    runtime.shutdown_background();
    result
}

async fn dispatch(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Path(args) => path::run(args, cli).await?,
        Commands::Info(args) => info::run(args, cli)?,
        Commands::Config(args) => config_cmd::run(args)?,
        Commands::Completions(args) => completions::run(args)?,
    }
    Ok(())
}
