use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryRiskRepository};
use crate::routes::with_scoring_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use workforce_risk::config::AppConfig;
use workforce_risk::error::AppError;
use workforce_risk::health::HealthEvaluator;
use workforce_risk::risk::RiskScoringService;
use workforce_risk::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryRiskRepository::default());
    let scoring_service = Arc::new(RiskScoringService::new(repository, config.scoring));
    let evaluator = Arc::new(HealthEvaluator::default());

    let app = with_scoring_routes(scoring_service, evaluator)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "workforce risk service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
