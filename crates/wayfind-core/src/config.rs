//! Search configuration

use crate::error::{Error, Result};
use crate::graph::Direction;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Default sphere radius for the Haversine formula (mean Earth radius, km)
pub const DEFAULT_HAVERSINE_RADIUS: f64 = 6371.0;

/// Default heuristic scale factor
pub const DEFAULT_D_FACTOR: f64 = 1.0;

/// Default depth bound (effectively unbounded)
pub const DEFAULT_MAX_DEPTH: u64 = u64::MAX;

/// Distance formula used by the heuristic evaluator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeuristicFormula {
    /// Sum of per-axis distances
    #[default]
    Manhattan,
    /// Largest per-axis distance (Chebyshev)
    MaxAxis,
    /// Octile distance
    Diagonal,
    /// Straight-line distance
    Euclidean,
    /// Squared straight-line distance, for relative comparisons only
    EuclideanNoSqr,
    /// Great-circle distance over (latitude, longitude) in degrees
    Haversine,
    /// A formula registered in a [`HeuristicRegistry`](crate::HeuristicRegistry)
    Custom,
}

impl HeuristicFormula {
    pub const ALL: [HeuristicFormula; 7] = [
        Self::Manhattan,
        Self::MaxAxis,
        Self::Diagonal,
        Self::Euclidean,
        Self::EuclideanNoSqr,
        Self::Haversine,
        Self::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manhattan => "manhattan",
            Self::MaxAxis => "maxaxis",
            Self::Diagonal => "diagonal",
            Self::Euclidean => "euclidean",
            Self::EuclideanNoSqr => "euclideannosqr",
            Self::Haversine => "haversine",
            Self::Custom => "custom",
        }
    }
}

impl FromStr for HeuristicFormula {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == normalized)
            .ok_or_else(|| Error::UnknownFormula(s.to_string()))
    }
}

impl std::fmt::Display for HeuristicFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for one search invocation.
///
/// Built once per call and never mutated while a search runs.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Which edges to traverse
    pub direction: Direction,

    /// Restrict traversal to these edge kinds (empty = all)
    pub edge_type_names: Vec<String>,

    /// Ordered node properties used as heuristic coordinates
    pub vertex_axis_names: Vec<String>,

    /// Accepted for compatibility with host option maps, ignored by the
    /// algorithms
    pub parallel: bool,

    /// Prefer paths colinear with the source-goal line among equal costs
    pub tie_breaker: bool,

    /// Expansion bound (A*), recursion bound (IDA*) or step bound (LRTA*)
    pub max_depth: u64,

    /// Return an empty path instead of a truncated one on depth cutoff
    pub empty_if_max_depth: bool,

    /// Heuristic scale factor
    pub d_factor: f64,

    pub heuristic_formula: HeuristicFormula,

    /// Registry name looked up when `heuristic_formula` is `Custom`
    pub custom_heuristic_formula: String,

    pub haversine_radius: f64,

    /// Wall-clock budget, LRTA* only (`None` = unbounded)
    pub timeout: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Outgoing,
            edge_type_names: Vec::new(),
            vertex_axis_names: Vec::new(),
            parallel: false,
            tie_breaker: false,
            max_depth: DEFAULT_MAX_DEPTH,
            empty_if_max_depth: false,
            d_factor: DEFAULT_D_FACTOR,
            heuristic_formula: HeuristicFormula::Manhattan,
            custom_heuristic_formula: String::new(),
            haversine_radius: DEFAULT_HAVERSINE_RADIUS,
            timeout: None,
        }
    }
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set traversal direction
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Only follow edges of these types
    pub fn with_edge_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.edge_type_names = types.into_iter().map(Into::into).collect();
        self
    }

    /// Use these node properties as heuristic coordinates
    pub fn with_axes<I, S>(mut self, axes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vertex_axis_names = axes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_formula(mut self, formula: HeuristicFormula) -> Self {
        self.heuristic_formula = formula;
        self
    }

    /// Select a registered custom formula
    pub fn with_custom_formula(mut self, name: impl Into<String>) -> Self {
        self.heuristic_formula = HeuristicFormula::Custom;
        self.custom_heuristic_formula = name.into();
        self
    }

    pub fn with_tie_breaker(mut self, enabled: bool) -> Self {
        self.tie_breaker = enabled;
        self
    }

    pub fn with_max_depth(mut self, depth: u64) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn empty_if_max_depth(mut self, enabled: bool) -> Self {
        self.empty_if_max_depth = enabled;
        self
    }

    pub fn with_d_factor(mut self, factor: f64) -> Self {
        self.d_factor = factor;
        self
    }

    pub fn with_haversine_radius(mut self, radius: f64) -> Self {
        self.haversine_radius = radius;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Check value ranges that the type system cannot express
    pub fn validate(&self) -> Result<()> {
        if !self.d_factor.is_finite() || self.d_factor < 0.0 {
            return Err(Error::Configuration(format!(
                "dFactor must be a finite, non-negative number (got {})",
                self.d_factor
            )));
        }
        if !self.haversine_radius.is_finite() || self.haversine_radius <= 0.0 {
            return Err(Error::Configuration(format!(
                "haversineRadius must be positive (got {})",
                self.haversine_radius
            )));
        }
        if self.heuristic_formula == HeuristicFormula::Haversine
            && self.vertex_axis_names.len() != 2
        {
            return Err(Error::Configuration(format!(
                "haversine needs exactly two axes (latitude, longitude), got {}",
                self.vertex_axis_names.len()
            )));
        }
        Ok(())
    }
}
