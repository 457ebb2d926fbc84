use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use outfit_recommender::catalog::Catalog;
use outfit_recommender::config::AppConfig;
use outfit_recommender::error::AppError;
use outfit_recommender::telemetry;
use std::sync::atomic::Ordering;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let catalog = Catalog::load(&config.data).await?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let app_state = AppState::new(
        prometheus_handle,
        catalog,
        config.data.clone(),
        config.ranking.clone(),
    );
    let readiness_flag = app_state.readiness.clone();

    let app = router()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        mode = config.ranking.mode.label(),
        "outfit recommender ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
