//! Loading of score tables and the outfit dataset from CSV exports.

pub mod codes;
mod parser;
mod source;

pub use codes::{BODY_SHAPE_NAMES, OCCASION_NAMES, SEASON_NAMES, STYLE_NAMES};
pub use source::DataSource;

use std::io::Read;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::config::DataConfig;
use crate::domain::{Gender, Outfit, ScoreTable};
use crate::heuristics::Heuristics;
use crate::ranking::RankingContext;
use crate::scoring::AttributeWeights;

/// Data-availability failures; the scoring core itself never errors.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("catalog CSV is missing required column '{0}'")]
    MissingColumn(String),
    #[error("failed to fetch catalog export: {0}")]
    Http(#[from] reqwest::Error),
    #[error("catalog export {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Reads a `Classification` / `Attribute Name` scoring sheet for the given categories.
pub fn load_score_table<R, S>(reader: R, categories: &[S]) -> Result<ScoreTable, CatalogError>
where
    R: Read,
    S: AsRef<str>,
{
    parser::parse_score_table(reader, categories)
}

/// Reads the coded outfit dataset, decoding every known attribute column.
pub fn load_outfits<R: Read>(reader: R) -> Result<Vec<Outfit>, CatalogError> {
    parser::parse_outfits(reader)
}

/// Outfits for the requested gender plus unisex ones, in dataset order.
pub fn filter_by_gender(outfits: &[Outfit], gender: Gender) -> Vec<Outfit> {
    outfits
        .iter()
        .filter(|outfit| outfit.gender == gender || outfit.gender == Gender::Unisex)
        .cloned()
        .collect()
}

/// Score tables and outfits loaded together; immutable once built.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub style_table: ScoreTable,
    pub body_shape_table: ScoreTable,
    pub outfits: Vec<Outfit>,
    pub loaded_at: DateTime<Utc>,
}

/// Counts reported after a load or reload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogSummary {
    pub outfits: usize,
    pub style_rows: usize,
    pub body_shape_rows: usize,
    pub loaded_at: DateTime<Utc>,
}

impl Catalog {
    pub fn new(style_table: ScoreTable, body_shape_table: ScoreTable, outfits: Vec<Outfit>) -> Self {
        Self {
            style_table,
            body_shape_table,
            outfits,
            loaded_at: Utc::now(),
        }
    }

    pub fn from_readers<A: Read, B: Read, C: Read>(
        style: A,
        body_shape: B,
        outfits: C,
    ) -> Result<Self, CatalogError> {
        Ok(Self::new(
            load_score_table(style, STYLE_NAMES)?,
            load_score_table(body_shape, BODY_SHAPE_NAMES)?,
            load_outfits(outfits)?,
        ))
    }

    pub async fn load(config: &DataConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::new();
        let style = config.style_table.fetch(&client).await?;
        let body_shape = config.body_shape_table.fetch(&client).await?;
        let outfits = config.outfits.fetch(&client).await?;

        let catalog = Self::from_readers(&style[..], &body_shape[..], &outfits[..])?;
        let summary = catalog.summary();
        info!(
            outfits = summary.outfits,
            style_rows = summary.style_rows,
            body_shape_rows = summary.body_shape_rows,
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            outfits: self.outfits.len(),
            style_rows: self.style_table.row_count(),
            body_shape_rows: self.body_shape_table.row_count(),
            loaded_at: self.loaded_at,
        }
    }

    pub fn outfits_for(&self, gender: Option<Gender>) -> Vec<Outfit> {
        match gender {
            Some(gender) => filter_by_gender(&self.outfits, gender),
            None => self.outfits.clone(),
        }
    }

    pub fn context<'a>(
        &'a self,
        weights: &'a AttributeWeights,
        heuristics: &'a Heuristics,
    ) -> RankingContext<'a> {
        RankingContext {
            style_table: &self.style_table,
            body_shape_table: &self.body_shape_table,
            weights,
            heuristics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outfit(label: &str) -> Outfit {
        Outfit::new(Default::default(), label, "")
    }

    #[test]
    fn gender_filter_keeps_unisex_and_order() {
        let outfits = vec![
            outfit("MEN-a"),
            outfit("WOMEN-b"),
            outfit("accessory-c"),
            outfit("MEN-d"),
        ];

        let labels: Vec<String> = filter_by_gender(&outfits, Gender::Male)
            .into_iter()
            .map(|outfit| outfit.image_label)
            .collect();

        assert_eq!(labels, vec!["MEN-a", "accessory-c", "MEN-d"]);
    }

    #[test]
    fn from_readers_builds_summary() {
        let style = "Classification,Attribute Name,Formal\nouter,Cardigan,4\n";
        let body = "Classification,Attribute Name,Hourglass\nouter,Cardigan,2\nouter,No,1\n";
        let outfits = "image_label,image_url,outer\nWOMEN-x,u,0\n";

        let catalog = Catalog::from_readers(style.as_bytes(), body.as_bytes(), outfits.as_bytes())
            .expect("catalog builds");
        let summary = catalog.summary();

        assert_eq!(summary.outfits, 1);
        assert_eq!(summary.style_rows, 1);
        assert_eq!(summary.body_shape_rows, 2);
        assert_eq!(catalog.outfits_for(Some(Gender::Male)).len(), 0);
        assert_eq!(catalog.outfits_for(None).len(), 1);
    }
}
