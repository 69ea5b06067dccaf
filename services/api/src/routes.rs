use crate::infra::{benchmark_preview, AppState, BenchmarkPreview};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use careeriq::error::AppError;
use careeriq::workflows::career::{
    career_router, BenchmarkEngine, CareerRepository, CareerService, Clock, ProfileSubmission,
};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct BenchmarkPreviewRequest {
    pub(crate) profile: ProfileSubmission,
    #[serde(default)]
    pub(crate) current_year: Option<i32>,
}

pub(crate) fn with_career_routes<R, C>(service: Arc<CareerService<R, C>>) -> axum::Router
where
    R: CareerRepository + 'static,
    C: Clock + 'static,
{
    career_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/benchmarks/preview",
            axum::routing::post(benchmark_preview_endpoint),
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

/// Score a profile without storing it.
pub(crate) async fn benchmark_preview_endpoint(
    Extension(engine): Extension<Arc<BenchmarkEngine>>,
    Json(payload): Json<BenchmarkPreviewRequest>,
) -> Result<Json<BenchmarkPreview>, AppError> {
    let BenchmarkPreviewRequest {
        profile,
        current_year,
    } = payload;

    let now = Utc::now();
    let current_year = current_year.unwrap_or_else(|| now.year());
    let preview = benchmark_preview(&engine, profile, now, current_year)?;
    Ok(Json(preview))
}
