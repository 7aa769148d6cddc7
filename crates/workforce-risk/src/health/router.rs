use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::assessment::{HealthAssessment, HealthEvaluator};
use crate::datasets::EmployeeHistory;

#[derive(Debug, Deserialize)]
pub struct AssessmentRequest {
    pub history: EmployeeHistory,
    /// Defaults to the server's local date.
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
struct AssessmentView {
    #[serde(flatten)]
    assessment: HealthAssessment,
    intervention_note: Option<String>,
}

/// Router exposing the single-employee health assessment.
pub fn health_router(evaluator: Arc<HealthEvaluator>) -> Router {
    Router::new()
        .route("/api/v1/health/assessments", post(assessment_handler))
        .with_state(evaluator)
}

pub(crate) async fn assessment_handler(
    State(evaluator): State<Arc<HealthEvaluator>>,
    axum::Json(request): axum::Json<AssessmentRequest>,
) -> Response {
    let today = request.today.unwrap_or_else(|| Local::now().date_naive());
    let assessment = evaluator.assess(&request.history, today);
    let view = AssessmentView {
        intervention_note: assessment.intervention_note(),
        assessment,
    };
    (StatusCode::OK, axum::Json(view)).into_response()
}
