use super::features::{FeatureMatch, FeatureMatchPolicy};
use super::{RankRequest, RankingContext};
use crate::domain::{Outfit, RankedResult};
use crate::scoring::score_category;

/// Pluggable ranking strategy. Implementations score and filter; sorting and
/// truncation are applied by [`super::CombinedRanker`].
pub trait RankingPolicy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns the surviving candidates in input order.
    fn evaluate(
        &self,
        outfits: &[Outfit],
        request: &RankRequest,
        context: &RankingContext<'_>,
    ) -> Vec<RankedResult>;
}

/// Thresholds, penalties, and term weights of the weighted multi-signal policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedPolicyParams {
    pub style_gate: f64,
    pub bodyshape_floor: f64,
    pub bodyshape_penalty_factor: f64,
    pub season_floor: f64,
    pub season_mismatch_penalty: f64,
    pub occasion_multiplier: f64,
    pub feature_bonus_weight: f64,
    pub style_weight: f64,
    pub bodyshape_weight: f64,
    pub occasion_weight: f64,
    pub season_weight: f64,
}

impl Default for WeightedPolicyParams {
    fn default() -> Self {
        Self {
            style_gate: 0.3,
            bodyshape_floor: 0.2,
            bodyshape_penalty_factor: 0.5,
            season_floor: 0.1,
            season_mismatch_penalty: 0.1,
            occasion_multiplier: 1.5,
            feature_bonus_weight: 0.2,
            style_weight: 3.0,
            bodyshape_weight: 2.0,
            occasion_weight: 2.5,
            season_weight: 1.5,
        }
    }
}

/// Canonical policy: style gate, soft body-shape and season penalties,
/// heavily weighted occasion, and a small feature bonus.
#[derive(Debug, Clone, Default)]
pub struct WeightedRankingPolicy {
    params: WeightedPolicyParams,
    feature_policy: FeatureMatchPolicy,
}

impl WeightedRankingPolicy {
    pub fn new(feature_policy: FeatureMatchPolicy) -> Self {
        Self {
            params: WeightedPolicyParams::default(),
            feature_policy,
        }
    }

    pub fn params(&self) -> &WeightedPolicyParams {
        &self.params
    }

    fn evaluate_one(
        &self,
        outfit: &Outfit,
        request: &RankRequest,
        context: &RankingContext<'_>,
    ) -> Option<RankedResult> {
        let params = &self.params;

        let style_score = score_category(
            outfit,
            &request.style,
            context.style_table,
            context.weights,
        );
        if style_score < params.style_gate {
            return None;
        }

        let tally = FeatureMatch::evaluate(outfit, &request.features);
        if self.feature_policy == FeatureMatchPolicy::RequireAll && !tally.all_matched() {
            return None;
        }

        let mut bodyshape_score = score_category(
            outfit,
            &request.body_shape,
            context.body_shape_table,
            context.weights,
        );
        if bodyshape_score < params.bodyshape_floor {
            bodyshape_score *= params.bodyshape_penalty_factor;
        }

        let mut season_score = context
            .heuristics
            .season
            .score(outfit, request.season.as_deref());
        if season_score < params.season_floor {
            season_score -= params.season_mismatch_penalty;
        }

        let occasion_score = context
            .heuristics
            .occasion
            .score(outfit, request.occasion.as_deref())
            * params.occasion_multiplier;

        let feature_bonus = tally.bonus(params.feature_bonus_weight);

        let combined_score = style_score * params.style_weight
            + bodyshape_score * params.bodyshape_weight
            + occasion_score * params.occasion_weight
            + season_score * params.season_weight
            + feature_bonus;

        Some(request.result_for(
            outfit,
            ComponentScores {
                combined_score,
                style_score,
                bodyshape_score,
                season_score,
                occasion_score,
                feature_bonus,
            },
        ))
    }
}

impl RankingPolicy for WeightedRankingPolicy {
    fn name(&self) -> &'static str {
        "weighted"
    }

    fn evaluate(
        &self,
        outfits: &[Outfit],
        request: &RankRequest,
        context: &RankingContext<'_>,
    ) -> Vec<RankedResult> {
        outfits
            .iter()
            .filter_map(|outfit| self.evaluate_one(outfit, request, context))
            .collect()
    }
}

/// Simple policy: style plus body-shape score, keeping only outfits that
/// match every requested feature. No gate, penalties, or heuristics.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordFilterPolicy;

impl RankingPolicy for KeywordFilterPolicy {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn evaluate(
        &self,
        outfits: &[Outfit],
        request: &RankRequest,
        context: &RankingContext<'_>,
    ) -> Vec<RankedResult> {
        outfits
            .iter()
            .filter(|outfit| FeatureMatch::evaluate(outfit, &request.features).all_matched())
            .map(|outfit| {
                let style_score = score_category(
                    outfit,
                    &request.style,
                    context.style_table,
                    context.weights,
                );
                let bodyshape_score = score_category(
                    outfit,
                    &request.body_shape,
                    context.body_shape_table,
                    context.weights,
                );

                request.result_for(
                    outfit,
                    ComponentScores {
                        combined_score: style_score + bodyshape_score,
                        style_score,
                        bodyshape_score,
                        ..ComponentScores::default()
                    },
                )
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ComponentScores {
    pub combined_score: f64,
    pub style_score: f64,
    pub bodyshape_score: f64,
    pub season_score: f64,
    pub occasion_score: f64,
    pub feature_bonus: f64,
}
