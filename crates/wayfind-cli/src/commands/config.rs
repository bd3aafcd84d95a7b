//! Config command for managing search defaults

use clap::{Args, Subcommand};

use crate::config::{config_file_path, Config};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Get a config value
    Get {
        /// Config key name
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key name
        key: String,
        /// New value
        value: String,
    },
    /// Reset a config value to its default
    Unset {
        /// Config key name
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
    /// Initialize default config file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: &ConfigArgs) -> anyhow::Result<()> {
    match &args.command {
        ConfigCommands::Get { key } => run_get(key),
        ConfigCommands::Set { key, value } => run_set(key, value),
        ConfigCommands::Unset { key } => run_unset(key),
        ConfigCommands::List => run_list(),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Init { force } => run_init(*force),
    }
}

fn run_get(key: &str) -> anyhow::Result<()> {
    let config = Config::load()?;
    match config.get(key) {
        Some(value) => println!("{}", value),
        None => anyhow::bail!(
            "Unknown config key: {} (available: {})",
            key,
            Config::keys().join(", ")
        ),
    }
    Ok(())
}

fn run_set(key: &str, value: &str) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    tracing::debug!("Saving {} to {}", key, config_file_path().display());
    config.save()?;
    println!("Set {} = {}", key, value);
    Ok(())
}

fn run_unset(key: &str) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    let default = Config::default().get(key).unwrap_or_default();
    config.set(key, &default)?;
    config.save()?;
    println!("Reset {}", key);
    Ok(())
}

/// Effective defaults, with changed keys flagged
fn run_list() -> anyhow::Result<()> {
    let config = Config::load()?;
    let builtin = Config::default();
    let width = Config::keys().iter().map(|k| k.len()).max().unwrap_or(0);

    for key in Config::keys() {
        let value = config.get(key).unwrap_or_default();
        let changed = builtin.get(key).unwrap_or_default() != value;
        let shown = if value.is_empty() { "-" } else { value.as_str() };
        println!(
            "{:width$}  {}{}",
            key,
            shown,
            if changed { "  (changed)" } else { "" },
            width = width
        );
    }
    tracing::info!("Defaults read from {}", config_file_path().display());
    Ok(())
}

fn run_path() -> anyhow::Result<()> {
    println!("{}", config_file_path().display());
    Ok(())
}

fn run_init(force: bool) -> anyhow::Result<()> {
    let path = config_file_path();

    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    Config::default().save()?;
    println!("Created config file at {}", path.display());
    Ok(())
}
