//! Keyword extraction from free-text recommendation prompts.
//!
//! Matching is plain case-insensitive substring search over fixed keyword lists.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{OCCASION_NAMES, SEASON_NAMES, STYLE_NAMES};
use crate::ranking::RankRequest;

pub const DEFAULT_STYLE: &str = "Trendy";
pub const DEFAULT_BODY_SHAPE: &str = "Hourglass";

const FEATURE_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "sleeve",
        &[
            "short sleeve",
            "long sleeve",
            "sleeveless",
            "medium sleeve",
            "not long sleeve",
        ],
    ),
    (
        "fabric",
        &["cotton", "denim", "leather", "chiffon", "knitted", "furry"],
    ),
    (
        "pattern",
        &[
            "floral",
            "graphic",
            "striped",
            "pure color",
            "lattice",
            "color block",
        ],
    ),
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedPrompt {
    pub style: Option<String>,
    pub season: Option<String>,
    pub occasion: Option<String>,
    pub features: BTreeMap<String, String>,
}

fn first_keyword(text: &str, keywords: &[&str]) -> Option<String> {
    keywords
        .iter()
        .find(|keyword| text.contains(&keyword.to_lowercase()))
        .map(|keyword| keyword.to_string())
}

pub fn parse_prompt(prompt: &str) -> ParsedPrompt {
    let text = prompt.to_lowercase();

    let mut features = BTreeMap::new();
    for (kind, values) in FEATURE_KEYWORDS {
        // Later keywords in a list win, so "not long sleeve" overrides "long sleeve".
        for value in values.iter().filter(|value| text.contains(*value)) {
            features.insert(kind.to_string(), value.to_string());
        }
    }

    ParsedPrompt {
        style: first_keyword(&text, STYLE_NAMES),
        season: first_keyword(&text, SEASON_NAMES),
        occasion: first_keyword(&text, OCCASION_NAMES),
        features,
    }
}

/// Explicit request values; anything unset is filled from the prompt or defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOverrides {
    pub style: Option<String>,
    pub body_shape: Option<String>,
    pub season: Option<String>,
    pub occasion: Option<String>,
    #[serde(default)]
    pub features: BTreeMap<String, String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

impl RankRequest {
    pub fn from_prompt(prompt: &str, overrides: RequestOverrides, top_k: usize) -> Self {
        let parsed = parse_prompt(prompt);
        let features = if overrides.features.is_empty() {
            parsed.features
        } else {
            overrides.features
        };

        Self {
            style: non_blank(overrides.style)
                .or(parsed.style)
                .unwrap_or_else(|| DEFAULT_STYLE.to_string()),
            body_shape: non_blank(overrides.body_shape)
                .unwrap_or_else(|| DEFAULT_BODY_SHAPE.to_string()),
            season: non_blank(overrides.season).or(parsed.season),
            occasion: non_blank(overrides.occasion).or(parsed.occasion),
            features,
            top_k,
        }
    }
}
