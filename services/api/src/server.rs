use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryCareerRepository};
use crate::routes::with_career_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use careeriq::config::AppConfig;
use careeriq::error::AppError;
use careeriq::telemetry;
use careeriq::workflows::career::{BenchmarkEngine, CareerService, SystemClock};
use std::sync::atomic::Ordering;
use std::sync::Arc;
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        engine: Arc::new(BenchmarkEngine::new(config.engine.scoring.clone())),
    };

    let repository = Arc::new(InMemoryCareerRepository::default());
    let career_service = Arc::new(CareerService::new(
        repository,
        Arc::new(SystemClock),
        config.engine.scoring.clone(),
        config.engine.regeneration,
    ));

    let app = with_career_routes(career_service)
        .layer(Extension(app_state.engine.clone()))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        regeneration = ?config.engine.regeneration,
        "careeriq service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
