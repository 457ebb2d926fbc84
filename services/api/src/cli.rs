use crate::render::{render_recommendations, render_score_report};
use crate::server;
use clap::{Args, Parser, Subcommand};
use outfit_recommender::catalog::{self, Catalog, STYLE_NAMES};
use outfit_recommender::config::AppConfig;
use outfit_recommender::domain::{Gender, Outfit};
use outfit_recommender::error::AppError;
use outfit_recommender::prompt::RequestOverrides;
use outfit_recommender::ranking::{CombinedRanker, RankRequest, RankingMode};
use outfit_recommender::scoring;
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Outfit Recommender",
    about = "Score and rank outfits by style, body shape, season and occasion",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rank the configured catalog for a free-text prompt
    Recommend(RecommendArgs),
    /// Score one ad-hoc outfit against a style table
    Score(ScoreArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// Free-text request, e.g. "formal outfit for a summer wedding"
    #[arg(long, default_value = "")]
    pub(crate) prompt: String,
    /// Restrict candidates to this gender (unisex outfits always qualify)
    #[arg(long, value_parser = crate::infra::parse_gender)]
    pub(crate) gender: Option<Gender>,
    #[arg(long)]
    pub(crate) body_shape: Option<String>,
    /// Style category; overrides any style found in the prompt
    #[arg(long)]
    pub(crate) style: Option<String>,
    #[arg(long)]
    pub(crate) season: Option<String>,
    #[arg(long)]
    pub(crate) occasion: Option<String>,
    /// Required attribute value as kind=value (repeatable)
    #[arg(long = "feature", value_parser = crate::infra::parse_attribute)]
    pub(crate) features: Vec<(String, String)>,
    /// Number of results (defaults to OUTFIT_TOP_K)
    #[arg(long)]
    pub(crate) top_k: Option<usize>,
    /// Ranking policy: weighted or keyword (defaults to OUTFIT_RANKING_MODE)
    #[arg(long, value_parser = parse_mode)]
    pub(crate) mode: Option<RankingMode>,
    /// Print the results as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Path to a style scoring sheet exported as CSV
    #[arg(long)]
    pub(crate) style_csv: PathBuf,
    /// Decoded attribute value as attribute=value (repeatable)
    #[arg(long = "attribute", value_parser = crate::infra::parse_attribute, required = true)]
    pub(crate) attributes: Vec<(String, String)>,
    /// Category to score (repeatable); defaults to every style
    #[arg(long = "category")]
    pub(crate) categories: Vec<String>,
}

fn parse_mode(raw: &str) -> Result<RankingMode, String> {
    RankingMode::parse(raw).ok_or_else(|| format!("unknown ranking mode '{raw}' (expected weighted or keyword)"))
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Recommend(args) => run_recommend(args).await,
        Command::Score(args) => run_score(args),
    }
}

async fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let RecommendArgs {
        prompt,
        gender,
        body_shape,
        style,
        season,
        occasion,
        features,
        top_k,
        mode,
        json,
    } = args;

    let config = AppConfig::load()?;
    let ranking = config.ranking;
    let ranker = match mode {
        Some(mode) => CombinedRanker::new(mode, ranking.feature_policy),
        None => ranking.ranker(),
    };

    let overrides = RequestOverrides {
        style,
        body_shape,
        season,
        occasion,
        features: features.into_iter().collect(),
    };
    let request = RankRequest::from_prompt(
        &prompt,
        overrides,
        top_k.unwrap_or(ranking.default_top_k),
    );

    let catalog = Catalog::load(&config.data).await?;
    let outfits = catalog.outfits_for(gender);
    let context = catalog.context(&ranking.weights, &ranking.heuristics);
    let results = ranker.rank(&outfits, &request, &context);

    if json {
        match serde_json::to_string_pretty(&results) {
            Ok(payload) => println!("{payload}"),
            Err(err) => println!("Recommendations unavailable as JSON: {err}"),
        }
    } else {
        render_recommendations(&request, ranker.policy_name(), outfits.len(), &results);
    }

    Ok(())
}

fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        style_csv,
        attributes,
        categories,
    } = args;

    let categories = if categories.is_empty() {
        STYLE_NAMES.iter().map(|name| name.to_string()).collect()
    } else {
        categories
    };

    let table = catalog::load_score_table(File::open(&style_csv)?, &categories)?;
    let outfit = Outfit::from_attributes(attributes);
    let config = AppConfig::load()?;
    let report = scoring::score(&outfit, &categories, &table, &config.ranking.weights);

    render_score_report(&outfit, &report);
    Ok(())
}
