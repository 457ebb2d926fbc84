use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::rules::{self, AttributeRule};
use crate::domain::Outfit;

const FORMAL_RULES: &[AttributeRule] = &[
    AttributeRule::new("outer", &["Cardigan"], 2.0),
    AttributeRule::new("sleeve_length", &["Long Sleeve"], 1.5),
    AttributeRule::new("neckwear", &["Yes"], 1.0),
    AttributeRule::new("waist_acc", &["Belt", "Clothing"], 1.0),
    AttributeRule::new("fabric_upper", &["leather", "cotton"], 1.0),
    AttributeRule::new("glasses", &["Eyeglasses", "Sunglasses"], 0.5),
];

const CASUAL_RULES: &[AttributeRule] = &[
    AttributeRule::new(
        "sleeve_length",
        &["Sleeveless", "Short Sleeve", "Medium Sleeve"],
        1.5,
    ),
    AttributeRule::new("outer", &["No"], 1.0),
    AttributeRule::new("hat", &["Yes"], 0.5),
    AttributeRule::new("socks", &["No"], 0.5),
];

const SPORT_RULES: &[AttributeRule] = &[
    AttributeRule::new("socks", &["Socks"], 2.0),
    AttributeRule::new("sleeve_length", &["Sleeveless", "Short Sleeve"], 1.5),
    AttributeRule::new("fabric_upper", &["cotton", "other"], 1.0),
    AttributeRule::new("waist_acc", &["Belt"], 0.5),
];

const OFFICE_RULES: &[AttributeRule] = &[
    AttributeRule::new("outer", &["Cardigan", "No"], 1.5),
    AttributeRule::new("sleeve_length", &["Medium Sleeve", "Long Sleeve"], 1.5),
    AttributeRule::new("waist_acc", &["Belt", "Clothing"], 1.0),
    AttributeRule::new("neckwear", &["Yes"], 1.0),
];

const PARTY_RULES: &[AttributeRule] = &[
    AttributeRule::new("pattern_upper", &["Graphic", "Color Block"], 1.5),
    AttributeRule::new("sleeve_length", &["Sleeveless", "Short Sleeve"], 1.0),
    AttributeRule::new("waist_acc", &["Belt"], 0.5),
];

/// Occasion groups, listed in match priority order.
///
/// `Office` and `Party` share keywords with `Formal`; since `Formal` is checked
/// first, their tables are only reachable through configured aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccasionBucket {
    Formal,
    Casual,
    Sport,
    Office,
    Party,
}

impl OccasionBucket {
    pub const PRIORITY: [OccasionBucket; 5] = [
        OccasionBucket::Formal,
        OccasionBucket::Casual,
        OccasionBucket::Sport,
        OccasionBucket::Office,
        OccasionBucket::Party,
    ];

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            OccasionBucket::Formal => &[
                "wedding",
                "party",
                "ceremony",
                "interview",
                "work",
                "office",
                "business",
                "meeting",
                "graduation",
            ],
            OccasionBucket::Casual => &["casual", "holiday", "vacation", "picnic", "date"],
            OccasionBucket::Sport => &["sport", "gym"],
            OccasionBucket::Office => &["office", "business", "work"],
            OccasionBucket::Party => &["party"],
        }
    }

    pub fn rules(&self) -> &'static [AttributeRule] {
        match self {
            OccasionBucket::Formal => FORMAL_RULES,
            OccasionBucket::Casual => CASUAL_RULES,
            OccasionBucket::Sport => SPORT_RULES,
            OccasionBucket::Office => OFFICE_RULES,
            OccasionBucket::Party => PARTY_RULES,
        }
    }

    /// First bucket in priority order whose keyword list contains `occasion`.
    pub fn from_keyword(occasion: &str) -> Option<Self> {
        Self::PRIORITY
            .into_iter()
            .find(|bucket| bucket.keywords().contains(&occasion))
    }

    /// Resolves a bucket by its label, as used in alias configuration.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_ascii_lowercase();
        Self::PRIORITY
            .into_iter()
            .find(|bucket| bucket.label() == label)
    }

    pub fn label(&self) -> &'static str {
        match self {
            OccasionBucket::Formal => "formal",
            OccasionBucket::Casual => "casual",
            OccasionBucket::Sport => "sport",
            OccasionBucket::Office => "office",
            OccasionBucket::Party => "party",
        }
    }
}

/// Occasion bonus lookup with optional configured synonyms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OccasionHeuristic {
    extra_aliases: HashMap<String, OccasionBucket>,
}

impl OccasionHeuristic {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_aliases(extra_aliases: HashMap<String, OccasionBucket>) -> Self {
        let extra_aliases = extra_aliases
            .into_iter()
            .map(|(alias, bucket)| (alias.trim().to_lowercase(), bucket))
            .collect();
        Self { extra_aliases }
    }

    pub fn resolve(&self, occasion: &str) -> Option<OccasionBucket> {
        let normalized = occasion.trim().to_lowercase();
        OccasionBucket::from_keyword(&normalized)
            .or_else(|| self.extra_aliases.get(&normalized).copied())
    }

    pub fn score(&self, outfit: &Outfit, occasion: Option<&str>) -> f64 {
        occasion
            .and_then(|occasion| self.resolve(occasion))
            .map(|bucket| rules::evaluate(bucket.rules(), outfit))
            .unwrap_or(0.0)
    }
}

/// Occasion bonus using only the built-in keyword lists.
pub fn occasion_score(outfit: &Outfit, occasion: Option<&str>) -> f64 {
    OccasionHeuristic::new().score(outfit, occasion)
}
