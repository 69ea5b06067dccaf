use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Router,
};
use serde_json::json;

use super::clock::Clock;
use super::domain::{ProfileSubmission, RecommendationId, UserId};
use super::plan::RecommendationUpdate;
use super::repository::CareerRepository;
use super::service::{CareerService, CareerServiceError};

/// Header carrying the caller's identity, set by the upstream auth layer.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Router builder exposing profile, benchmark, plan and dashboard endpoints.
pub fn career_router<R, C>(service: Arc<CareerService<R, C>>) -> Router
where
    R: CareerRepository + 'static,
    C: Clock + 'static,
{
    Router::new()
        .route(
            "/api/v1/profile",
            get(profile_handler::<R, C>).put(upsert_profile_handler::<R, C>),
        )
        .route(
            "/api/v1/benchmarks/generate",
            post(generate_benchmark_handler::<R, C>),
        )
        .route(
            "/api/v1/benchmarks/latest",
            get(latest_benchmark_handler::<R, C>),
        )
        .route(
            "/api/v1/benchmarks/history",
            get(benchmark_history_handler::<R, C>),
        )
        .route("/api/v1/plan", get(plan_handler::<R, C>))
        .route("/api/v1/plan/generate", post(generate_plan_handler::<R, C>))
        .route(
            "/api/v1/plan/recommendations/:recommendation_id",
            patch(update_recommendation_handler::<R, C>),
        )
        .route("/api/v1/plan/export", get(export_plan_handler::<R, C>))
        .route(
            "/api/v1/dashboard/summary",
            get(dashboard_handler::<R, C>),
        )
        .with_state(service)
}

fn caller(headers: &HeaderMap) -> Result<UserId, Response> {
    headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| UserId(value.to_string()))
        .ok_or_else(|| {
            let payload = json!({
                "error": format!("missing {USER_ID_HEADER} header"),
            });
            (StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response()
        })
}

fn error_response(error: CareerServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (error.status_code(), axum::Json(payload)).into_response()
}

pub(crate) async fn profile_handler<R, C>(
    State(service): State<Arc<CareerService<R, C>>>,
    headers: HeaderMap,
) -> Response
where
    R: CareerRepository + 'static,
    C: Clock + 'static,
{
    let user_id = match caller(&headers) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };
    match service.profile(&user_id) {
        Ok(profile) => (StatusCode::OK, axum::Json(profile.view())).into_response(),
        Err(CareerServiceError::MissingProfile) => {
            let payload = json!({
                "error": "profile not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => error_response(other),
    }
}

pub(crate) async fn upsert_profile_handler<R, C>(
    State(service): State<Arc<CareerService<R, C>>>,
    headers: HeaderMap,
    axum::Json(submission): axum::Json<ProfileSubmission>,
) -> Response
where
    R: CareerRepository + 'static,
    C: Clock + 'static,
{
    let user_id = match caller(&headers) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };
    match service.upsert_profile(&user_id, submission) {
        Ok(profile) => (StatusCode::OK, axum::Json(profile.view())).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn generate_benchmark_handler<R, C>(
    State(service): State<Arc<CareerService<R, C>>>,
    headers: HeaderMap,
) -> Response
where
    R: CareerRepository + 'static,
    C: Clock + 'static,
{
    let user_id = match caller(&headers) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };
    match service.generate_benchmark(&user_id) {
        Ok(report) => (StatusCode::CREATED, axum::Json(report)).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn latest_benchmark_handler<R, C>(
    State(service): State<Arc<CareerService<R, C>>>,
    headers: HeaderMap,
) -> Response
where
    R: CareerRepository + 'static,
    C: Clock + 'static,
{
    let user_id = match caller(&headers) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };
    match service.current_benchmark(&user_id) {
        Ok(Some(report)) => (StatusCode::OK, axum::Json(report)).into_response(),
        Ok(None) => {
            let payload = json!({
                "error": "no benchmark report has been generated",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => error_response(other),
    }
}

pub(crate) async fn benchmark_history_handler<R, C>(
    State(service): State<Arc<CareerService<R, C>>>,
    headers: HeaderMap,
) -> Response
where
    R: CareerRepository + 'static,
    C: Clock + 'static,
{
    let user_id = match caller(&headers) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };
    match service.benchmark_history(&user_id) {
        Ok(reports) => (StatusCode::OK, axum::Json(reports)).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn generate_plan_handler<R, C>(
    State(service): State<Arc<CareerService<R, C>>>,
    headers: HeaderMap,
) -> Response
where
    R: CareerRepository + 'static,
    C: Clock + 'static,
{
    let user_id = match caller(&headers) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };
    match service.generate_plan(&user_id) {
        Ok(plan) => (StatusCode::CREATED, axum::Json(plan.view())).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn plan_handler<R, C>(
    State(service): State<Arc<CareerService<R, C>>>,
    headers: HeaderMap,
) -> Response
where
    R: CareerRepository + 'static,
    C: Clock + 'static,
{
    let user_id = match caller(&headers) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };
    match service.plan(&user_id) {
        Ok(plan) => (StatusCode::OK, axum::Json(plan.view())).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn update_recommendation_handler<R, C>(
    State(service): State<Arc<CareerService<R, C>>>,
    headers: HeaderMap,
    Path(recommendation_id): Path<String>,
    axum::Json(update): axum::Json<RecommendationUpdate>,
) -> Response
where
    R: CareerRepository + 'static,
    C: Clock + 'static,
{
    let user_id = match caller(&headers) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };
    let id = RecommendationId(recommendation_id);
    match service.update_recommendation(&user_id, &id, update) {
        Ok(recommendation) => (StatusCode::OK, axum::Json(recommendation)).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn export_plan_handler<R, C>(
    State(service): State<Arc<CareerService<R, C>>>,
    headers: HeaderMap,
) -> Response
where
    R: CareerRepository + 'static,
    C: Clock + 'static,
{
    let user_id = match caller(&headers) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };
    match service.export_plan(&user_id) {
        Ok(csv) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"career-plan.csv\"",
                ),
            ],
            csv,
        )
            .into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn dashboard_handler<R, C>(
    State(service): State<Arc<CareerService<R, C>>>,
    headers: HeaderMap,
) -> Response
where
    R: CareerRepository + 'static,
    C: Clock + 'static,
{
    let user_id = match caller(&headers) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };
    match service.dashboard(&user_id) {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(other) => error_response(other),
    }
}
