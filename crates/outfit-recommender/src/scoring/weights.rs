use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const DEFAULT_ATTRIBUTE_WEIGHT: f64 = 1.0;

/// Per-attribute multipliers applied before affinities are summed.
///
/// Attributes without an override use `default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeWeights {
    pub default: f64,
    #[serde(default)]
    pub overrides: HashMap<String, f64>,
}

impl AttributeWeights {
    pub fn new(default: f64) -> Self {
        Self {
            default,
            overrides: HashMap::new(),
        }
    }

    pub fn with_override(mut self, attribute: impl Into<String>, weight: f64) -> Self {
        self.overrides.insert(attribute.into(), weight);
        self
    }

    pub fn weight(&self, attribute: &str) -> f64 {
        self.overrides
            .get(attribute)
            .copied()
            .unwrap_or(self.default)
    }
}

impl Default for AttributeWeights {
    fn default() -> Self {
        Self::new(DEFAULT_ATTRIBUTE_WEIGHT)
    }
}
