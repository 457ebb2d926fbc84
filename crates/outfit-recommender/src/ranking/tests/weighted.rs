use super::common::*;
use crate::ranking::{
    rank, CombinedRanker, FeatureMatchPolicy, RankRequest, RankingMode, WeightedPolicyParams,
};

#[test]
fn style_gate_excludes_zero_affinity_outfits() {
    let fixture = Fixture::new();
    let request = RankRequest::new("Formal", "Hourglass", 10);

    let results = rank(&catalog(), &request, &fixture.context());

    assert_eq!(
        labels(&results),
        vec!["MEN-leather-long", "WOMEN-cardigan-cotton"]
    );
    assert!(results.iter().all(|result| result.style_score >= 0.3));
}

#[test]
fn combined_score_follows_weighted_formula() {
    let fixture = Fixture::new();
    let request = RankRequest::new("Formal", "Hourglass", 3);

    let results = rank(&catalog(), &request, &fixture.context());

    let leather = &results[0];
    assert_close(leather.style_score, 4.0);
    assert_close(leather.bodyshape_score, 0.6);
    // No season requested: the heuristic returns 0 and the mismatch penalty applies.
    assert_close(leather.season_score, -0.1);
    assert_close(leather.occasion_score, 0.0);
    assert_close(leather.feature_bonus, 0.0);
    assert_close(leather.combined_score, 4.0 * 3.0 + 0.6 * 2.0 - 0.1 * 1.5);

    let cardigan = &results[1];
    assert_close(cardigan.combined_score, 3.0 * 3.0 + 1.0 * 2.0 - 0.1 * 1.5);
}

#[test]
fn occasion_is_scaled_and_weighted_heavily() {
    let fixture = Fixture::new();
    let request = RankRequest::new("Formal", "Hourglass", 3).with_occasion("wedding");

    let results = rank(&catalog(), &request, &fixture.context());

    // Cardigan, long sleeve, neckwear and cotton all earn formal bonuses (5.5 raw).
    assert_eq!(labels(&results)[0], "WOMEN-cardigan-cotton");
    let cardigan = &results[0];
    assert_close(cardigan.occasion_score, 5.5 * 1.5);
    assert_close(
        cardigan.combined_score,
        3.0 * 3.0 + 1.0 * 2.0 + 8.25 * 2.5 - 0.1 * 1.5,
    );
    assert_sorted(&results);
}

#[test]
fn low_body_shape_score_is_halved_not_dropped() {
    let fixture = Fixture::new();
    let outfits = vec![outfit(
        "WOMEN-leather-na",
        &[
            ("fabric_upper", "leather"),
            ("sleeve_length", "Long Sleeve"),
            ("outer", "NA"),
        ],
    )];
    let request = RankRequest::new("Formal", "Hourglass", 3);

    let results = rank(&outfits, &request, &fixture.context());

    assert_eq!(results.len(), 1);
    assert_close(results[0].bodyshape_score, 0.05);
}

#[test]
fn matching_season_avoids_mismatch_penalty() {
    let fixture = Fixture::new();
    let request = RankRequest::new("Formal", "Hourglass", 3).with_season("winter");

    let results = rank(&catalog(), &request, &fixture.context());

    let cardigan = results
        .iter()
        .find(|result| result.outfit.image_label == "WOMEN-cardigan-cotton")
        .expect("cardigan survives");
    // Long sleeve (+2.0) and cardigan (+2.0).
    assert_close(cardigan.season_score, 4.0);
    assert_eq!(cardigan.season.as_deref(), Some("winter"));
}

#[test]
fn partial_feature_credit_adds_bonus() {
    let fixture = Fixture::new();
    let request = RankRequest::new("Formal", "Hourglass", 3).with_feature("fabric", "cotton");

    let results = rank(&catalog(), &request, &fixture.context());

    assert_eq!(results.len(), 2);
    for result in &results {
        let expected = if result.outfit.image_label == "WOMEN-cardigan-cotton" {
            0.2
        } else {
            0.0
        };
        assert_close(result.feature_bonus, expected);
        assert_eq!(result.features.get("fabric").map(String::as_str), Some("cotton"));
    }
}

#[test]
fn require_all_feature_policy_drops_partial_matches() {
    let fixture = Fixture::new();
    let ranker = CombinedRanker::new(RankingMode::Weighted, FeatureMatchPolicy::RequireAll);
    let request = RankRequest::new("Formal", "Hourglass", 3).with_feature("fabric", "cotton");

    let results = ranker.rank(&catalog(), &request, &fixture.context());

    assert_eq!(labels(&results), vec!["WOMEN-cardigan-cotton"]);
    assert_close(results[0].feature_bonus, 0.2);
}

#[test]
fn ties_preserve_dataset_order() {
    let fixture = Fixture::new();
    let pairs = [
        ("fabric_upper", "leather"),
        ("sleeve_length", "Long Sleeve"),
        ("outer", "No"),
    ];
    let outfits = vec![
        outfit("first", &pairs),
        outfit("second", &pairs),
        outfit("third", &pairs),
    ];
    let request = RankRequest::new("Formal", "Hourglass", 2);

    let results = rank(&outfits, &request, &fixture.context());

    assert_eq!(labels(&results), vec!["first", "second"]);
}

#[test]
fn top_k_bounds_output_length() {
    let fixture = Fixture::new();

    let none = rank(
        &catalog(),
        &RankRequest::new("Formal", "Hourglass", 0),
        &fixture.context(),
    );
    assert!(none.is_empty());

    let one = rank(
        &catalog(),
        &RankRequest::new("Formal", "Hourglass", 1),
        &fixture.context(),
    );
    assert_eq!(one.len(), 1);

    let all = rank(
        &catalog(),
        &RankRequest::new("Formal", "Hourglass", 50),
        &fixture.context(),
    );
    assert_eq!(all.len(), 2);
}

#[test]
fn unknown_style_filters_everything() {
    let fixture = Fixture::new();
    let results = rank(
        &catalog(),
        &RankRequest::new("Gothic", "Hourglass", 5),
        &fixture.context(),
    );
    assert!(results.is_empty());
}

#[test]
fn attribute_weights_raise_style_scores() {
    let mut fixture = Fixture::new();
    fixture.weights = fixture.weights.clone().with_override("fabric_upper", 2.0);
    let request = RankRequest::new("Formal", "Hourglass", 3);

    let results = rank(&catalog(), &request, &fixture.context());

    let leather = &results[0];
    assert_close(leather.style_score, 2.0 * 2.0 + 2.0);
    assert_close(leather.bodyshape_score, 0.5 + 0.1 * 2.0);
}

#[test]
fn default_params_match_documented_constants() {
    let params = WeightedPolicyParams::default();
    assert_eq!(params.style_gate, 0.3);
    assert_eq!(params.bodyshape_floor, 0.2);
    assert_eq!(params.occasion_multiplier, 1.5);
    assert_eq!(
        (
            params.style_weight,
            params.bodyshape_weight,
            params.occasion_weight,
            params.season_weight
        ),
        (3.0, 2.0, 2.5, 1.5)
    );
}
