//! Multi-signal ranking of outfits for one recommendation request.

pub mod features;
mod policy;

#[cfg(test)]
mod tests;

pub use features::{FeatureMatch, FeatureMatchPolicy};
pub use policy::{KeywordFilterPolicy, RankingPolicy, WeightedPolicyParams, WeightedRankingPolicy};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Outfit, RankedResult, ScoreTable};
use crate::heuristics::Heuristics;
use crate::scoring::AttributeWeights;
use policy::ComponentScores;

/// Fully resolved request parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankRequest {
    pub style: String,
    pub body_shape: String,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub occasion: Option<String>,
    #[serde(default)]
    pub features: BTreeMap<String, String>,
    pub top_k: usize,
}

impl RankRequest {
    pub fn new(style: impl Into<String>, body_shape: impl Into<String>, top_k: usize) -> Self {
        Self {
            style: style.into(),
            body_shape: body_shape.into(),
            season: None,
            occasion: None,
            features: BTreeMap::new(),
            top_k,
        }
    }

    pub fn with_season(mut self, season: impl Into<String>) -> Self {
        self.season = Some(season.into());
        self
    }

    pub fn with_occasion(mut self, occasion: impl Into<String>) -> Self {
        self.occasion = Some(occasion.into());
        self
    }

    pub fn with_feature(mut self, kind: impl Into<String>, value: impl Into<String>) -> Self {
        self.features.insert(kind.into(), value.into());
        self
    }

    pub(crate) fn result_for(&self, outfit: &Outfit, scores: ComponentScores) -> RankedResult {
        RankedResult {
            outfit: outfit.clone(),
            combined_score: scores.combined_score,
            style_score: scores.style_score,
            bodyshape_score: scores.bodyshape_score,
            season_score: scores.season_score,
            occasion_score: scores.occasion_score,
            feature_bonus: scores.feature_bonus,
            style: self.style.clone(),
            body_shape: self.body_shape.clone(),
            season: self.season.clone(),
            occasion: self.occasion.clone(),
            features: self.features.clone(),
        }
    }
}

/// Read-only inputs shared by every outfit in a ranking pass.
#[derive(Debug, Clone, Copy)]
pub struct RankingContext<'a> {
    pub style_table: &'a ScoreTable,
    pub body_shape_table: &'a ScoreTable,
    pub weights: &'a AttributeWeights,
    pub heuristics: &'a Heuristics,
}

/// Configuration switch selecting the ranking policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMode {
    #[default]
    Weighted,
    Keyword,
}

impl RankingMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "weighted" | "combined" => Some(Self::Weighted),
            "keyword" | "keyword_filter" | "simple" => Some(Self::Keyword),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RankingMode::Weighted => "weighted",
            RankingMode::Keyword => "keyword",
        }
    }

    pub fn policy(&self, feature_policy: FeatureMatchPolicy) -> Box<dyn RankingPolicy> {
        match self {
            RankingMode::Weighted => Box::new(WeightedRankingPolicy::new(feature_policy)),
            RankingMode::Keyword => Box::new(KeywordFilterPolicy),
        }
    }
}

/// Runs a ranking policy, then orders and truncates its survivors.
pub struct CombinedRanker {
    policy: Box<dyn RankingPolicy>,
}

impl CombinedRanker {
    pub fn new(mode: RankingMode, feature_policy: FeatureMatchPolicy) -> Self {
        Self::with_policy(mode.policy(feature_policy))
    }

    pub fn with_policy(policy: Box<dyn RankingPolicy>) -> Self {
        Self { policy }
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    pub fn rank(
        &self,
        outfits: &[Outfit],
        request: &RankRequest,
        context: &RankingContext<'_>,
    ) -> Vec<RankedResult> {
        if request.top_k == 0 {
            return Vec::new();
        }

        let mut survivors = self.policy.evaluate(outfits, request, context);
        let survivor_count = survivors.len();

        // `sort_by` is stable, so equal scores keep dataset order.
        survivors.sort_by(|a, b| b.combined_score.total_cmp(&a.combined_score));
        survivors.truncate(request.top_k);

        debug!(
            policy = self.policy.name(),
            candidates = outfits.len(),
            survivors = survivor_count,
            returned = survivors.len(),
            "ranked outfits"
        );

        survivors
    }
}

impl Default for CombinedRanker {
    fn default() -> Self {
        Self::new(RankingMode::default(), FeatureMatchPolicy::default())
    }
}

/// Ranks with the canonical weighted policy and partial feature credit.
pub fn rank(
    outfits: &[Outfit],
    request: &RankRequest,
    context: &RankingContext<'_>,
) -> Vec<RankedResult> {
    CombinedRanker::default().rank(outfits, request, context)
}
