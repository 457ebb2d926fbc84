use std::collections::HashMap;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::catalog::DataSource;
use crate::heuristics::{Heuristics, OccasionBucket, OccasionHeuristic, SeasonBucket, SeasonHeuristic};
use crate::ranking::{CombinedRanker, FeatureMatchPolicy, RankingMode};
use crate::scoring::AttributeWeights;

pub const DEFAULT_STYLE_TABLE_URL: &str = "https://docs.google.com/spreadsheets/d/1Zx66-QAVjLJjUdP3rVfE2nbCWVQwkVv0IKaLRO7EH9M/export?format=csv&gid=0";
pub const DEFAULT_BODY_SHAPE_TABLE_URL: &str = "https://docs.google.com/spreadsheets/d/1Zx66-QAVjLJjUdP3rVfE2nbCWVQwkVv0IKaLRO7EH9M/export?format=csv&gid=28283272";
pub const DEFAULT_OUTFIT_DATASET_URL: &str = "https://docs.google.com/spreadsheets/d/1Uj88haHGZCsSQW5c27SDcJyvcBPlLJGP8WKZvw2dWqg/export?format=csv&gid=1320449891";
pub const DEFAULT_TOP_K: usize = 3;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub data: DataConfig,
    pub ranking: RankingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            data: DataConfig::from_env(),
            ranking: RankingConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the score tables and outfit dataset are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataConfig {
    pub style_table: DataSource,
    pub body_shape_table: DataSource,
    pub outfits: DataSource,
}

impl DataConfig {
    fn from_env() -> Self {
        let source = |key: &str, default: &str| {
            DataSource::parse(&env::var(key).unwrap_or_else(|_| default.to_string()))
        };

        Self {
            style_table: source("OUTFIT_STYLE_TABLE", DEFAULT_STYLE_TABLE_URL),
            body_shape_table: source("OUTFIT_BODY_SHAPE_TABLE", DEFAULT_BODY_SHAPE_TABLE_URL),
            outfits: source("OUTFIT_DATASET", DEFAULT_OUTFIT_DATASET_URL),
        }
    }
}

/// Ranking policy selection, attribute weights, and heuristic synonyms.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingConfig {
    pub mode: RankingMode,
    pub feature_policy: FeatureMatchPolicy,
    pub default_top_k: usize,
    pub weights: AttributeWeights,
    pub heuristics: Heuristics,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            mode: RankingMode::default(),
            feature_policy: FeatureMatchPolicy::default(),
            default_top_k: DEFAULT_TOP_K,
            weights: AttributeWeights::default(),
            heuristics: Heuristics::default(),
        }
    }
}

impl RankingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(raw) = env::var("OUTFIT_RANKING_MODE") {
            config.mode =
                RankingMode::parse(&raw).ok_or(ConfigError::InvalidRankingMode(raw))?;
        }

        if let Ok(raw) = env::var("OUTFIT_FEATURE_POLICY") {
            config.feature_policy =
                FeatureMatchPolicy::parse(&raw).ok_or(ConfigError::InvalidFeaturePolicy(raw))?;
        }

        if let Ok(raw) = env::var("OUTFIT_TOP_K") {
            config.default_top_k = raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidTopK)?;
        }

        if let Ok(raw) = env::var("OUTFIT_ATTRIBUTE_WEIGHTS") {
            config.weights = parse_weights(&raw)?;
        }

        if let Ok(raw) = env::var("OUTFIT_SEASON_ALIASES") {
            let aliases = parse_aliases(&raw, "OUTFIT_SEASON_ALIASES", |bucket| {
                SeasonBucket::from_alias(&bucket.to_ascii_lowercase())
            })?;
            config.heuristics.season = SeasonHeuristic::with_aliases(aliases);
        }

        if let Ok(raw) = env::var("OUTFIT_OCCASION_ALIASES") {
            let aliases =
                parse_aliases(&raw, "OUTFIT_OCCASION_ALIASES", OccasionBucket::from_label)?;
            config.heuristics.occasion = OccasionHeuristic::with_aliases(aliases);
        }

        Ok(config)
    }

    pub fn ranker(&self) -> CombinedRanker {
        CombinedRanker::new(self.mode, self.feature_policy)
    }
}

/// Splits `key=value,key=value`, ignoring blank entries.
fn split_pairs(raw: &str) -> impl Iterator<Item = Option<(&str, &str)>> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .split_once('=')
                .map(|(key, value)| (key.trim(), value.trim()))
                .filter(|(key, value)| !key.is_empty() && !value.is_empty())
        })
}

fn parse_weights(raw: &str) -> Result<AttributeWeights, ConfigError> {
    let mut weights = AttributeWeights::default();
    for pair in split_pairs(raw) {
        let (attribute, value) =
            pair.ok_or_else(|| ConfigError::InvalidAttributeWeights(raw.to_string()))?;
        let weight = value
            .parse::<f64>()
            .ok()
            .filter(|weight| weight.is_finite())
            .ok_or_else(|| ConfigError::InvalidAttributeWeights(raw.to_string()))?;
        weights.overrides.insert(attribute.to_string(), weight);
    }
    Ok(weights)
}

fn parse_aliases<B>(
    raw: &str,
    variable: &'static str,
    resolve: impl Fn(&str) -> Option<B>,
) -> Result<HashMap<String, B>, ConfigError> {
    let mut aliases = HashMap::new();
    for pair in split_pairs(raw) {
        let invalid = || ConfigError::InvalidAlias {
            variable,
            entry: raw.to_string(),
        };
        let (alias, bucket) = pair.ok_or_else(invalid)?;
        let bucket = resolve(bucket).ok_or_else(invalid)?;
        aliases.insert(alias.to_lowercase(), bucket);
    }
    Ok(aliases)
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTopK,
    InvalidRankingMode(String),
    InvalidFeaturePolicy(String),
    InvalidAttributeWeights(String),
    InvalidAlias { variable: &'static str, entry: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTopK => write!(f, "OUTFIT_TOP_K must be a non-negative integer"),
            ConfigError::InvalidRankingMode(value) => write!(
                f,
                "OUTFIT_RANKING_MODE must be 'weighted' or 'keyword' (found '{}')",
                value
            ),
            ConfigError::InvalidFeaturePolicy(value) => write!(
                f,
                "OUTFIT_FEATURE_POLICY must be 'partial' or 'require_all' (found '{}')",
                value
            ),
            ConfigError::InvalidAttributeWeights(value) => write!(
                f,
                "OUTFIT_ATTRIBUTE_WEIGHTS must be 'attribute=weight' pairs (found '{}')",
                value
            ),
            ConfigError::InvalidAlias { variable, entry } => write!(
                f,
                "{} must be 'alias=bucket' pairs naming a known bucket (found '{}')",
                variable, entry
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Outfit;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "OUTFIT_STYLE_TABLE",
            "OUTFIT_BODY_SHAPE_TABLE",
            "OUTFIT_DATASET",
            "OUTFIT_RANKING_MODE",
            "OUTFIT_FEATURE_POLICY",
            "OUTFIT_TOP_K",
            "OUTFIT_ATTRIBUTE_WEIGHTS",
            "OUTFIT_SEASON_ALIASES",
            "OUTFIT_OCCASION_ALIASES",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(
            config.data.outfits,
            DataSource::Remote(DEFAULT_OUTFIT_DATASET_URL.to_string())
        );
        assert_eq!(config.ranking, RankingConfig::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_ranking_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("OUTFIT_RANKING_MODE", "keyword");
        env::set_var("OUTFIT_FEATURE_POLICY", "require_all");
        env::set_var("OUTFIT_TOP_K", "5");
        env::set_var("OUTFIT_ATTRIBUTE_WEIGHTS", "fabric_upper=1.5, sleeve_length=0.5");
        env::set_var("OUTFIT_SEASON_ALIASES", "monsoon=rainy");
        env::set_var("OUTFIT_OCCASION_ALIASES", "rave=party");
        env::set_var("OUTFIT_DATASET", "fixtures/outfits.csv");

        let config = AppConfig::load().expect("config loads");
        reset_env();

        let ranking = &config.ranking;
        assert_eq!(ranking.mode, RankingMode::Keyword);
        assert_eq!(ranking.feature_policy, FeatureMatchPolicy::RequireAll);
        assert_eq!(ranking.default_top_k, 5);
        assert_eq!(ranking.weights.weight("fabric_upper"), 1.5);
        assert_eq!(ranking.weights.weight("sleeve_length"), 0.5);
        assert_eq!(ranking.weights.weight("hat"), 1.0);
        assert_eq!(ranking.ranker().policy_name(), "keyword");
        assert_eq!(
            config.data.outfits,
            DataSource::File("fixtures/outfits.csv".into())
        );

        let outfit = Outfit::from_attributes([("fabric_upper", "leather")]);
        assert_eq!(ranking.heuristics.season.score(&outfit, Some("Monsoon")), 2.0);
        assert_eq!(
            ranking.heuristics.occasion.resolve("rave"),
            Some(OccasionBucket::Party)
        );
    }

    #[test]
    fn rejects_malformed_ranking_values() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();

        env::set_var("OUTFIT_ATTRIBUTE_WEIGHTS", "fabric_upper=heavy");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidAttributeWeights(_))
        ));
        reset_env();

        env::set_var("OUTFIT_SEASON_ALIASES", "monsoon=tropical");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidAlias {
                variable: "OUTFIT_SEASON_ALIASES",
                ..
            })
        ));
        reset_env();

        env::set_var("OUTFIT_RANKING_MODE", "random");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidRankingMode(_))
        ));
        reset_env();
    }
}
