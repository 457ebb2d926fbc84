use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use outfit_recommender::catalog::{Catalog, CatalogSummary, BODY_SHAPE_NAMES, STYLE_NAMES};
use outfit_recommender::domain::{Gender, Outfit, RankedResult};
use outfit_recommender::error::AppError;
use outfit_recommender::prompt::RequestOverrides;
use outfit_recommender::ranking::RankRequest;
use outfit_recommender::scoring::{self, ScoreReport};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use tracing::info;

const MAX_TOP_K: usize = 10;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RecommendationRequest {
    #[serde(default)]
    pub(crate) gender: Option<String>,
    #[serde(default)]
    pub(crate) body_shape: Option<String>,
    #[serde(default)]
    pub(crate) prompt: String,
    #[serde(default)]
    pub(crate) top_k: Option<usize>,
    #[serde(default)]
    pub(crate) style: Option<String>,
    #[serde(default)]
    pub(crate) season: Option<String>,
    #[serde(default)]
    pub(crate) occasion: Option<String>,
    #[serde(default)]
    pub(crate) features: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RecommendationResponse {
    pub(crate) policy: &'static str,
    pub(crate) recommendations: Vec<RankedResult>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ScoreTableKind {
    #[default]
    Style,
    BodyShape,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreRequest {
    pub(crate) attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub(crate) categories: Vec<String>,
    #[serde(default)]
    pub(crate) table: ScoreTableKind,
}

pub(crate) fn router() -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/recommendations",
            axum::routing::post(recommendations_endpoint),
        )
        .route("/api/v1/score", axum::routing::post(score_endpoint))
        .route(
            "/api/v1/catalog/reload",
            axum::routing::post(catalog_reload_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn recommendations_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<RecommendationRequest>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let RecommendationRequest {
        gender,
        body_shape,
        prompt,
        top_k,
        style,
        season,
        occasion,
        features,
    } = payload;

    let gender = gender
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| {
            Gender::parse(&raw)
                .ok_or_else(|| AppError::InvalidRequest(format!("unknown gender '{raw}'")))
        })
        .transpose()?;

    let top_k = match top_k {
        Some(value) if (1..=MAX_TOP_K).contains(&value) => value,
        Some(value) => {
            return Err(AppError::InvalidRequest(format!(
                "top_k must be between 1 and {MAX_TOP_K}, got {value}"
            )))
        }
        None => state.ranking.default_top_k,
    };

    let overrides = RequestOverrides {
        style,
        body_shape,
        season,
        occasion,
        features,
    };
    let request = RankRequest::from_prompt(&prompt, overrides, top_k);

    let catalog = state.catalog.current();
    let outfits = catalog.outfits_for(gender);
    let context = catalog.context(&state.ranking.weights, &state.ranking.heuristics);
    let recommendations = state.ranker.rank(&outfits, &request, &context);

    Ok(Json(RecommendationResponse {
        policy: state.ranker.policy_name(),
        recommendations,
    }))
}

pub(crate) async fn score_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ScoreRequest>,
) -> Result<Json<ScoreReport>, AppError> {
    let ScoreRequest {
        attributes,
        categories,
        table,
    } = payload;

    let catalog = state.catalog.current();
    let (table, known) = match table {
        ScoreTableKind::Style => (&catalog.style_table, STYLE_NAMES),
        ScoreTableKind::BodyShape => (&catalog.body_shape_table, BODY_SHAPE_NAMES),
    };

    let categories = if categories.is_empty() {
        known.iter().map(|name| name.to_string()).collect()
    } else {
        categories
    };

    let outfit = Outfit::from_attributes(attributes);
    let report = scoring::score(&outfit, &categories, table, &state.ranking.weights);
    Ok(Json(report))
}

pub(crate) async fn catalog_reload_endpoint(
    Extension(state): Extension<AppState>,
) -> Result<Json<CatalogSummary>, AppError> {
    let catalog = Catalog::load(&state.data).await?;
    let summary = catalog.summary();
    state.catalog.replace(catalog);

    info!(
        outfits = summary.outfits,
        style_rows = summary.style_rows,
        body_shape_rows = summary.body_shape_rows,
        "catalog reloaded"
    );

    Ok(Json(summary))
}
