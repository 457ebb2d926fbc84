//! Rule-table bonuses for requested seasons and occasions.

mod occasion;
pub mod rules;
mod season;

pub use occasion::{occasion_score, OccasionBucket, OccasionHeuristic};
pub use rules::AttributeRule;
pub use season::{season_score, SeasonBucket, SeasonHeuristic};

/// Both heuristics, configured once and shared by every ranking pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Heuristics {
    pub season: SeasonHeuristic,
    pub occasion: OccasionHeuristic,
}
