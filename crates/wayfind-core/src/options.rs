//! Binding of host option maps to [`SearchConfig`]
//!
//! Host query engines hand over options as a loosely typed map with
//! camelCase keys (`maxDepth`, `heuristicFormula`, ...). Everything that is
//! wrong with such a map is reported here, before a search starts.

use crate::config::{HeuristicFormula, SearchConfig};
use crate::error::{Error, Result};
use crate::graph::Direction;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// A string list that hosts may also pass as a single string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(s) => vec![s],
            Self::Many(v) => v,
        }
    }
}

/// Raw search options as supplied by a caller
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
    pub direction: Option<String>,
    pub edge_type_names: Option<OneOrMany>,
    pub vertex_axis_names: Option<OneOrMany>,
    pub parallel: Option<bool>,
    pub tie_breaker: Option<bool>,
    pub max_depth: Option<u64>,
    pub empty_if_max_depth: Option<bool>,
    pub d_factor: Option<f64>,
    pub heuristic_formula: Option<String>,
    pub custom_heuristic_formula: Option<String>,
    pub haversine_radius: Option<f64>,

    /// Milliseconds
    pub timeout: Option<f64>,

    #[serde(flatten)]
    pub unknown: BTreeMap<String, serde_json::Value>,
}

impl SearchOptions {
    /// Parse an option map; `null` means "no options"
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value)
            .map_err(|e| Error::Configuration(format!("Invalid search options: {}", e)))
    }

    /// Parse an option map from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Overlay these options on `base`, then validate the result
    pub fn apply(self, base: SearchConfig) -> Result<SearchConfig> {
        for key in self.unknown.keys() {
            tracing::warn!("Ignoring unknown search option: {}", key);
        }

        let mut config = base;
        if let Some(direction) = self.direction {
            config.direction = direction.parse::<Direction>()?;
        }
        if let Some(types) = self.edge_type_names {
            config.edge_type_names = types.into_vec();
        }
        if let Some(axes) = self.vertex_axis_names {
            config.vertex_axis_names = axes.into_vec();
        }
        if let Some(parallel) = self.parallel {
            config.parallel = parallel;
        }
        if let Some(tie_breaker) = self.tie_breaker {
            config.tie_breaker = tie_breaker;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(empty) = self.empty_if_max_depth {
            config.empty_if_max_depth = empty;
        }
        if let Some(d_factor) = self.d_factor {
            config.d_factor = d_factor;
        }
        if let Some(formula) = self.heuristic_formula {
            config.heuristic_formula = formula.parse::<HeuristicFormula>()?;
        }
        if let Some(name) = self.custom_heuristic_formula {
            config.custom_heuristic_formula = name;
        }
        if let Some(radius) = self.haversine_radius {
            config.haversine_radius = radius;
        }
        if let Some(ms) = self.timeout {
            if !ms.is_finite() || ms < 0.0 {
                return Err(Error::Configuration(format!(
                    "timeout must be a non-negative number of milliseconds (got {})",
                    ms
                )));
            }
            // Budgets too large for a Duration mean no budget
            config.timeout = Duration::try_from_secs_f64(ms / 1000.0).ok();
        }

        config.validate()?;
        Ok(config)
    }

    /// Build a configuration from defaults plus these options
    pub fn into_config(self) -> Result<SearchConfig> {
        self.apply(SearchConfig::default())
    }
}
