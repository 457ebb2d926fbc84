pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod heuristics;
pub mod prompt;
pub mod ranking;
pub mod scoring;
pub mod telemetry;

pub use catalog::{Catalog, CatalogError, CatalogSummary, DataSource};
pub use domain::{Gender, Outfit, RankedResult, ScoreTable};
pub use prompt::{parse_prompt, ParsedPrompt, RequestOverrides};
pub use ranking::{rank, CombinedRanker, RankRequest, RankingContext, RankingMode};
pub use scoring::{score, AttributeWeights, ScoreReport};
