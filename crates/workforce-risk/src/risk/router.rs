use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::repository::RiskProfileRepository;
use super::service::{RiskScoringService, RiskServiceError};
use super::signals::EmployeeId;
use crate::datasets::SignalRow;

/// Batch submission body: either JSON rows or an inline CSV document.
#[derive(Debug, Default, Deserialize)]
pub struct BatchRequest {
    #[serde(default)]
    pub records: Option<Vec<SignalRow>>,
    #[serde(default)]
    pub csv: Option<String>,
}

/// Router builder exposing batch scoring and lookups.
pub fn risk_router<R>(service: Arc<RiskScoringService<R>>) -> Router
where
    R: RiskProfileRepository + 'static,
{
    Router::new()
        .route("/api/v1/risk/batches", post(batch_handler::<R>))
        .route(
            "/api/v1/risk/employees/:employee_id",
            get(employee_handler::<R>),
        )
        .route("/api/v1/risk/summary", get(summary_handler::<R>))
        .with_state(service)
}

fn error_response(status: StatusCode, message: impl ToString) -> Response {
    let payload = json!({
        "error": message.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

fn service_error(error: RiskServiceError) -> Response {
    let status = match &error {
        RiskServiceError::Signal(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RiskServiceError::Import(_) => StatusCode::BAD_REQUEST,
        RiskServiceError::UnknownEmployee(_) | RiskServiceError::NoBatch => StatusCode::NOT_FOUND,
        RiskServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, error)
}

pub(crate) async fn batch_handler<R>(
    State(service): State<Arc<RiskScoringService<R>>>,
    axum::Json(request): axum::Json<BatchRequest>,
) -> Response
where
    R: RiskProfileRepository + 'static,
{
    let outcome = match (request.records, request.csv) {
        (Some(records), None) => service.score_rows(records),
        (None, Some(csv)) => service.score_csv(&csv),
        (Some(_), Some(_)) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "provide either `records` or `csv`, not both",
            )
        }
        (None, None) => {
            return error_response(StatusCode::BAD_REQUEST, "batch body needs `records` or `csv`")
        }
    };

    match outcome {
        Ok(receipt) => (StatusCode::OK, axum::Json(receipt)).into_response(),
        Err(error) => service_error(error),
    }
}

pub(crate) async fn employee_handler<R>(
    State(service): State<Arc<RiskScoringService<R>>>,
    Path(employee_id): Path<String>,
) -> Response
where
    R: RiskProfileRepository + 'static,
{
    match service.profile(&EmployeeId(employee_id)) {
        Ok(profile) => (StatusCode::OK, axum::Json(profile)).into_response(),
        Err(error) => service_error(error),
    }
}

pub(crate) async fn summary_handler<R>(
    State(service): State<Arc<RiskScoringService<R>>>,
) -> Response
where
    R: RiskProfileRepository + 'static,
{
    match service.overview() {
        Ok(overview) => (StatusCode::OK, axum::Json(overview)).into_response(),
        Err(error) => service_error(error),
    }
}
