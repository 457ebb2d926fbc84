use crate::domain::{Outfit, RankedResult, ScoreTable};
use crate::heuristics::Heuristics;
use crate::ranking::RankingContext;
use crate::scoring::AttributeWeights;

pub(super) fn style_table() -> ScoreTable {
    ScoreTable::new()
        .with("fabric_upper", "cotton", "Formal", 1.0)
        .with("fabric_upper", "leather", "Formal", 2.0)
        .with("fabric_upper", "denim", "Formal", 0.0)
        .with("sleeve_length", "Long Sleeve", "Formal", 2.0)
        .with("sleeve_length", "Short Sleeve", "Formal", 0.0)
        .with("fabric_upper", "denim", "Casual", 3.0)
        .with("fabric_upper", "cotton", "Casual", 2.0)
        .with("sleeve_length", "Short Sleeve", "Casual", 2.0)
}

pub(super) fn body_shape_table() -> ScoreTable {
    ScoreTable::new()
        .with("outer", "Cardigan", "Hourglass", 1.0)
        .with("outer", "No", "Hourglass", 0.5)
        .with("fabric_upper", "leather", "Hourglass", 0.1)
}

pub(super) fn outfit(label: &str, pairs: &[(&str, &str)]) -> Outfit {
    let attributes = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    Outfit::new(attributes, label, format!("https://images.example/{label}.jpg"))
}

/// Formal 3.0, Hourglass 1.0.
pub(super) fn cardigan_cotton() -> Outfit {
    outfit(
        "WOMEN-cardigan-cotton",
        &[
            ("fabric_upper", "cotton"),
            ("sleeve_length", "Long Sleeve"),
            ("outer", "Cardigan"),
            ("neckwear", "Yes"),
        ],
    )
}

/// Formal 0.0, Hourglass 0.5.
pub(super) fn denim_tee() -> Outfit {
    outfit(
        "MEN-denim-tee",
        &[
            ("fabric_upper", "denim"),
            ("sleeve_length", "Short Sleeve"),
            ("outer", "No"),
            ("neckwear", "No"),
        ],
    )
}

/// Formal 4.0, Hourglass 0.6.
pub(super) fn leather_long() -> Outfit {
    outfit(
        "MEN-leather-long",
        &[
            ("fabric_upper", "leather"),
            ("sleeve_length", "Long Sleeve"),
            ("outer", "No"),
            ("neckwear", "No"),
        ],
    )
}

pub(super) fn catalog() -> Vec<Outfit> {
    vec![cardigan_cotton(), denim_tee(), leather_long()]
}

pub(super) struct Fixture {
    pub style_table: ScoreTable,
    pub body_shape_table: ScoreTable,
    pub weights: AttributeWeights,
    pub heuristics: Heuristics,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            style_table: style_table(),
            body_shape_table: body_shape_table(),
            weights: AttributeWeights::default(),
            heuristics: Heuristics::default(),
        }
    }

    pub fn context(&self) -> RankingContext<'_> {
        RankingContext {
            style_table: &self.style_table,
            body_shape_table: &self.body_shape_table,
            weights: &self.weights,
            heuristics: &self.heuristics,
        }
    }
}

pub(super) fn labels(results: &[RankedResult]) -> Vec<&str> {
    results
        .iter()
        .map(|result| result.outfit.image_label.as_str())
        .collect()
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

pub(super) fn assert_sorted(results: &[RankedResult]) {
    assert!(results
        .windows(2)
        .all(|pair| pair[0].combined_score >= pair[1].combined_score));
}
