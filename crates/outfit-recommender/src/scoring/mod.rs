//! Attribute affinity scoring of a single outfit against target categories.

mod weights;

pub use weights::{AttributeWeights, DEFAULT_ATTRIBUTE_WEIGHT};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{round2, Outfit, ScoreBreakdown, ScoreTable};

/// Totals and explainability breakdowns keyed by category name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub totals: BTreeMap<String, f64>,
    pub breakdowns: BTreeMap<String, ScoreBreakdown>,
}

impl ScoreReport {
    pub fn total(&self, category: &str) -> f64 {
        self.totals.get(category).copied().unwrap_or(0.0)
    }
}

/// Weighted sum of per-attribute affinities for every requested category.
///
/// Attributes the table does not know are skipped. Iteration follows the outfit's
/// sorted attribute order, so identical inputs produce bit-identical totals.
pub fn score<S: AsRef<str>>(
    outfit: &Outfit,
    categories: &[S],
    table: &ScoreTable,
    weights: &AttributeWeights,
) -> ScoreReport {
    let mut report = ScoreReport::default();

    for category in categories {
        let category = category.as_ref();
        let mut total = 0.0;
        let mut breakdown = ScoreBreakdown::new();

        for (attribute, value) in &outfit.attributes {
            if !table.knows_attribute(attribute) {
                continue;
            }

            let contribution =
                table.affinity(attribute, value, category) * weights.weight(attribute);
            breakdown.insert(attribute.clone(), round2(contribution));
            total += contribution;
        }

        report.totals.insert(category.to_string(), total);
        report.breakdowns.insert(category.to_string(), breakdown);
    }

    report
}

/// Convenience wrapper for the single-category case used by the rankers.
pub fn score_category(
    outfit: &Outfit,
    category: &str,
    table: &ScoreTable,
    weights: &AttributeWeights,
) -> f64 {
    score(outfit, &[category], table, weights).total(category)
}
