use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::rules::{self, AttributeRule};
use crate::domain::Outfit;

const LIGHT_FABRICS: &[&str] = &["cotton", "chiffon"];
const WARM_FABRICS: &[&str] = &["leather", "furry", "knitted"];
const FLORAL_OR_PLAIN: &[&str] = &["Floral", "Pure Color"];
const SHORT_SLEEVES: &[&str] = &["Sleeveless", "Short Sleeve"];

const SUMMER_RULES: &[AttributeRule] = &[
    AttributeRule::new("fabric_upper", LIGHT_FABRICS, 2.0),
    AttributeRule::new("fabric_lower", LIGHT_FABRICS, 1.0),
    AttributeRule::new("pattern_upper", FLORAL_OR_PLAIN, 1.5),
    AttributeRule::new("pattern_lower", FLORAL_OR_PLAIN, 0.5),
    AttributeRule::new("sleeve_length", SHORT_SLEEVES, 2.0),
    AttributeRule::new("outer", &["No"], 1.0),
    AttributeRule::new("covers_navel", &["Yes"], 0.5),
];

const WINTER_RULES: &[AttributeRule] = &[
    AttributeRule::new("fabric_upper", WARM_FABRICS, 2.5),
    AttributeRule::new("fabric_outer", WARM_FABRICS, 1.5),
    AttributeRule::new("sleeve_length", &["Long Sleeve"], 2.0),
    AttributeRule::new("outer", &["Cardigan"], 2.0),
    AttributeRule::new("pattern_upper", &["Pure Color"], 1.0),
];

const SPRING_RULES: &[AttributeRule] = &[
    AttributeRule::new("fabric_upper", LIGHT_FABRICS, 1.5),
    AttributeRule::new("pattern_upper", &["Floral"], 2.0),
    AttributeRule::new("sleeve_length", &["Medium Sleeve"], 1.5),
    AttributeRule::new("outer", &["Cardigan", "No"], 1.0),
];

const FALL_RULES: &[AttributeRule] = &[
    AttributeRule::new("fabric_upper", &["cotton", "leather", "knitted"], 2.0),
    AttributeRule::new("outer", &["Cardigan"], 2.0),
    AttributeRule::new("sleeve_length", &["Medium Sleeve", "Long Sleeve"], 1.5),
    AttributeRule::new("pattern_upper", &["Lattice", "Color Block"], 1.0),
];

const RAINY_RULES: &[AttributeRule] = &[
    AttributeRule::new("fabric_upper", &["leather"], 2.0),
    AttributeRule::new("outer", &["No"], 1.0),
];

const DRY_RULES: &[AttributeRule] = &[
    AttributeRule::new("fabric_upper", LIGHT_FABRICS, 1.5),
    AttributeRule::new("outer", &["No"], 1.0),
];

/// Recognized season groups; each owns one rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonBucket {
    Summer,
    Winter,
    Spring,
    Fall,
    Rainy,
    Dry,
}

impl SeasonBucket {
    pub const ALL: [SeasonBucket; 6] = [
        SeasonBucket::Summer,
        SeasonBucket::Winter,
        SeasonBucket::Spring,
        SeasonBucket::Fall,
        SeasonBucket::Rainy,
        SeasonBucket::Dry,
    ];

    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            SeasonBucket::Summer => &["summer", "hot"],
            SeasonBucket::Winter => &["winter", "cold"],
            SeasonBucket::Spring => &["spring"],
            SeasonBucket::Fall => &["fall", "autumn"],
            SeasonBucket::Rainy => &["rainy"],
            SeasonBucket::Dry => &["dry"],
        }
    }

    pub fn rules(&self) -> &'static [AttributeRule] {
        match self {
            SeasonBucket::Summer => SUMMER_RULES,
            SeasonBucket::Winter => WINTER_RULES,
            SeasonBucket::Spring => SPRING_RULES,
            SeasonBucket::Fall => FALL_RULES,
            SeasonBucket::Rainy => RAINY_RULES,
            SeasonBucket::Dry => DRY_RULES,
        }
    }

    /// Resolves a built-in alias (already lower-cased).
    pub fn from_alias(season: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|bucket| bucket.aliases().contains(&season))
    }

    pub fn label(&self) -> &'static str {
        self.aliases()[0]
    }
}

/// Season bonus lookup with optional configured synonyms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeasonHeuristic {
    extra_aliases: HashMap<String, SeasonBucket>,
}

impl SeasonHeuristic {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_aliases(extra_aliases: HashMap<String, SeasonBucket>) -> Self {
        let extra_aliases = extra_aliases
            .into_iter()
            .map(|(alias, bucket)| (alias.trim().to_lowercase(), bucket))
            .collect();
        Self { extra_aliases }
    }

    pub fn resolve(&self, season: &str) -> Option<SeasonBucket> {
        let normalized = season.trim().to_lowercase();
        SeasonBucket::from_alias(&normalized)
            .or_else(|| self.extra_aliases.get(&normalized).copied())
    }

    pub fn score(&self, outfit: &Outfit, season: Option<&str>) -> f64 {
        season
            .and_then(|season| self.resolve(season))
            .map(|bucket| rules::evaluate(bucket.rules(), outfit))
            .unwrap_or(0.0)
    }
}

/// Season bonus using only the built-in aliases.
pub fn season_score(outfit: &Outfit, season: Option<&str>) -> f64 {
    SeasonHeuristic::new().score(outfit, season)
}
