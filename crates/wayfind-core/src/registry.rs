//! Registry of named custom heuristic formulas

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Everything a custom formula gets to see for one estimate.
///
/// Coordinate slices are aligned with `axis_names`.
#[derive(Debug, Clone, Copy)]
pub struct HeuristicInput<'a> {
    pub axis_names: &'a [String],
    pub source: &'a [f64],
    pub current: &'a [f64],
    /// Equal to `current` when the node has no parent yet
    pub parent: &'a [f64],
    pub goal: &'a [f64],
    pub depth: u64,
    pub d_factor: f64,
}

impl<'a> HeuristicInput<'a> {
    fn axis_index(&self, axis: &str) -> Option<usize> {
        self.axis_names.iter().position(|name| name == axis)
    }

    /// Current node's value on `axis`
    pub fn current_value(&self, axis: &str) -> Option<f64> {
        self.axis_index(axis).map(|i| self.current[i])
    }

    /// Goal node's value on `axis`
    pub fn goal_value(&self, axis: &str) -> Option<f64> {
        self.axis_index(axis).map(|i| self.goal[i])
    }
}

/// A caller-supplied heuristic formula
pub trait CustomHeuristic: Send + Sync {
    fn estimate(&self, input: &HeuristicInput<'_>) -> f64;
}

impl<F> CustomHeuristic for F
where
    F: Fn(&HeuristicInput<'_>) -> f64 + Send + Sync,
{
    fn estimate(&self, input: &HeuristicInput<'_>) -> f64 {
        self(input)
    }
}

/// Named custom formulas, resolved once per search
#[derive(Clone, Default)]
pub struct HeuristicRegistry {
    formulas: HashMap<String, Arc<dyn CustomHeuristic>>,
}

impl HeuristicRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `formula` under `name`, replacing any previous one
    pub fn register(&mut self, name: impl Into<String>, formula: impl CustomHeuristic + 'static) {
        let name = name.into();
        tracing::debug!("Registering custom heuristic formula: {}", name);
        self.formulas.insert(name, Arc::new(formula));
    }

    /// Builder form of [`register`](Self::register)
    pub fn with(mut self, name: impl Into<String>, formula: impl CustomHeuristic + 'static) -> Self {
        self.register(name, formula);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.formulas.contains_key(name)
    }

    /// Look up a formula, failing with `MissingCapability` when absent
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn CustomHeuristic>> {
        self.formulas
            .get(name)
            .cloned()
            .ok_or_else(|| Error::MissingCapability(name.to_string()))
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.formulas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for HeuristicRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeuristicRegistry")
            .field("formulas", &self.names())
            .finish()
    }
}
