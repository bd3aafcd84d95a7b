//! CLI configuration

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use wayfind_core::{Algorithm, SearchOptions};

use crate::output::OutputFormat;

/// Environment variable that overrides the config file location
pub const CONFIG_ENV: &str = "WAYFIND_CONFIG";

/// Get config file path
pub fn config_file_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wayfind")
        .join("config.toml")
}

/// Defaults applied to every `wayfind path` run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_algorithm: String,
    pub weight_field: String,
    pub format: String,

    /// Search option map as JSON, e.g. `{"vertexAxisNames":["x","y"]}`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_algorithm: Algorithm::default().name().to_string(),
            weight_field: "weight".to_string(),
            format: "text".to_string(),
            options: None,
        }
    }
}

impl Config {
    /// Load the config file, or defaults when there is none
    pub fn load() -> anyhow::Result<Self> {
        let path = config_file_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_file_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, toml::to_string_pretty(self)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["default_algorithm", "weight_field", "format", "options"]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "default_algorithm" => Some(self.default_algorithm.clone()),
            "weight_field" => Some(self.weight_field.clone()),
            "format" => Some(self.format.clone()),
            "options" => Some(self.options.clone().unwrap_or_default()),
            _ => None,
        }
    }

    /// Set a value after checking it parses
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "default_algorithm" => {
                let algorithm: Algorithm = value.parse()?;
                self.default_algorithm = algorithm.name().to_string();
            }
            "weight_field" => {
                if value.trim().is_empty() {
                    anyhow::bail!("weight_field must not be empty");
                }
                self.weight_field = value.to_string();
            }
            "format" => {
                let format: OutputFormat = value.parse()?;
                self.format = format.as_str().to_string();
            }
            "options" => {
                if value.trim().is_empty() {
                    self.options = None;
                } else {
                    SearchOptions::from_json(value)?.into_config()?;
                    self.options = Some(value.to_string());
                }
            }
            _ => anyhow::bail!(
                "Unknown config key: {} (available: {})",
                key,
                Self::keys().join(", ")
            ),
        }
        Ok(())
    }

    pub fn algorithm(&self) -> anyhow::Result<Algorithm> {
        Ok(self.default_algorithm.parse()?)
    }

    /// Parsed search options from the config file
    pub fn search_options(&self) -> anyhow::Result<SearchOptions> {
        match &self.options {
            Some(json) => SearchOptions::from_json(json)
                .context("Invalid 'options' in config file"),
            None => Ok(SearchOptions::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.get("default_algorithm").unwrap(), "astar");
        assert_eq!(config.get("weight_field").unwrap(), "weight");
        assert_eq!(config.get("format").unwrap(), "text");
        assert_eq!(config.get("options").unwrap(), "");
        assert!(config.get("nope").is_none());
    }

    #[test]
    fn test_set_validates() {
        let mut config = Config::default();
        config.set("default_algorithm", "IDA*").unwrap();
        assert_eq!(config.default_algorithm, "idastar");

        assert!(config.set("default_algorithm", "bfs").is_err());
        assert!(config.set("format", "yaml").is_err());
        assert!(config.set("options", r#"{"heuristicFormula":"warp"}"#).is_err());
        assert!(config.set("colour", "blue").is_err());

        config.set("options", r#"{"vertexAxisNames":["x","y"]}"#).unwrap();
        let search = config.search_options().unwrap().into_config().unwrap();
        assert_eq!(search.vertex_axis_names, vec!["x", "y"]);
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = Config::default();
        config.set("options", r#"{"maxDepth":5}"#).unwrap();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);

        let partial: Config = toml::from_str("format = \"json\"\n").unwrap();
        assert_eq!(partial.format, "json");
        assert_eq!(partial.weight_field, "weight");
    }
}
