use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::Outfit;

/// How requested free-text features influence ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureMatchPolicy {
    /// Matched fraction contributes a small bonus; nothing is dropped.
    #[default]
    PartialCredit,
    /// Outfits must match every requested feature to be considered.
    RequireAll,
}

impl FeatureMatchPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "partial" | "partial_credit" => Some(Self::PartialCredit),
            "require_all" | "all" | "strict" => Some(Self::RequireAll),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FeatureMatchPolicy::PartialCredit => "partial_credit",
            FeatureMatchPolicy::RequireAll => "require_all",
        }
    }
}

/// True when `required` occurs, case-insensitively, inside any attribute value.
pub fn matches(outfit: &Outfit, required: &str) -> bool {
    let needle = required.to_lowercase();
    outfit
        .attributes
        .values()
        .any(|value| value.to_lowercase().contains(&needle))
}

/// Tally of requested features found on one outfit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureMatch {
    pub matched: usize,
    pub requested: usize,
}

impl FeatureMatch {
    pub fn evaluate(outfit: &Outfit, features: &BTreeMap<String, String>) -> Self {
        let matched = features
            .values()
            .filter(|required| matches(outfit, required))
            .count();
        Self {
            matched,
            requested: features.len(),
        }
    }

    pub fn all_matched(&self) -> bool {
        self.matched == self.requested
    }

    /// `matched / requested * weight`, or zero when nothing was requested.
    pub fn bonus(&self, weight: f64) -> f64 {
        if self.requested == 0 {
            return 0.0;
        }
        self.matched as f64 / self.requested as f64 * weight
    }
}
