use metrics_exporter_prometheus::PrometheusHandle;
use outfit_recommender::catalog::Catalog;
use outfit_recommender::config::{DataConfig, RankingConfig};
use outfit_recommender::domain::Gender;
use outfit_recommender::ranking::CombinedRanker;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) catalog: CatalogCache,
    pub(crate) data: Arc<DataConfig>,
    pub(crate) ranking: Arc<RankingConfig>,
    pub(crate) ranker: Arc<CombinedRanker>,
}

impl AppState {
    pub(crate) fn new(
        metrics: PrometheusHandle,
        catalog: Catalog,
        data: DataConfig,
        ranking: RankingConfig,
    ) -> Self {
        let ranker = ranking.ranker();
        Self {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(metrics),
            catalog: CatalogCache::new(catalog),
            data: Arc::new(data),
            ranking: Arc::new(ranking),
            ranker: Arc::new(ranker),
        }
    }
}

/// Shared handle to the loaded catalog; readers clone the inner `Arc` and release the lock.
#[derive(Clone)]
pub(crate) struct CatalogCache {
    inner: Arc<RwLock<Arc<Catalog>>>,
}

impl CatalogCache {
    pub(crate) fn new(catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(catalog))),
        }
    }

    pub(crate) fn current(&self) -> Arc<Catalog> {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    pub(crate) fn replace(&self, catalog: Catalog) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(catalog);
    }
}

pub(crate) fn parse_gender(raw: &str) -> Result<Gender, String> {
    Gender::parse(raw).ok_or_else(|| format!("unknown gender '{raw}' (expected male, female or unisex)"))
}

pub(crate) fn parse_attribute(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        .filter(|(name, value)| !name.is_empty() && !value.is_empty())
        .ok_or_else(|| format!("failed to parse '{raw}' as attribute=value"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use outfit_recommender::domain::ScoreTable;

    #[test]
    fn replace_swaps_catalog_for_new_readers_only() {
        let cache = CatalogCache::new(Catalog::new(ScoreTable::new(), ScoreTable::new(), Vec::new()));
        let before = cache.current();

        let table = ScoreTable::new().with("outer", "Cardigan", "Formal", 3.0);
        cache.replace(Catalog::new(table, ScoreTable::new(), Vec::new()));

        assert_eq!(before.style_table.row_count(), 0);
        assert_eq!(cache.current().style_table.row_count(), 1);
    }

    #[test]
    fn attribute_pairs_require_both_sides() {
        assert_eq!(
            parse_attribute("outer = Cardigan"),
            Ok(("outer".to_string(), "Cardigan".to_string()))
        );
        assert!(parse_attribute("outer").is_err());
        assert!(parse_attribute("=Cardigan").is_err());
    }

    #[test]
    fn gender_parser_reports_unknown_values() {
        assert_eq!(parse_gender("Women"), Ok(Gender::Female));
        assert!(parse_gender("other").is_err());
    }
}
