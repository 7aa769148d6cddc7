use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use workforce_risk::health::{health_router, HealthEvaluator};
use workforce_risk::risk::{
    risk_router, RiskProfileRepository, RiskScoringService, RiskServiceError,
};

pub(crate) fn with_scoring_routes<R>(
    service: Arc<RiskScoringService<R>>,
    evaluator: Arc<HealthEvaluator>,
) -> axum::Router
where
    R: RiskProfileRepository + 'static,
{
    risk_router(service.clone())
        .merge(health_router(evaluator))
        .route("/health", get(liveness))
        .route("/ready", get(readiness::<R>))
        .route("/metrics", get(metrics_endpoint))
        .layer(Extension(service))
}

pub(crate) async fn liveness() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Ready once the listener is bound; also reports the batch currently held.
pub(crate) async fn readiness<R>(
    Extension(state): Extension<AppState>,
    Extension(service): Extension<Arc<RiskScoringService<R>>>,
) -> Response
where
    R: RiskProfileRepository + 'static,
{
    if !state.readiness.load(Ordering::Relaxed) {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "initializing" })),
        )
            .into_response();
    }

    let batch = match service.overview() {
        Ok(overview) => json!({
            "employees": overview.summary.total_employees,
            "flagged": overview.summary.flagged_employees,
        }),
        Err(RiskServiceError::NoBatch) => serde_json::Value::Null,
        Err(error) => {
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "error": error.to_string() })),
            )
                .into_response()
        }
    };

    Json(json!({ "status": "ready", "batch": batch })).into_response()
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryRiskRepository;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;
    use workforce_risk::risk::ScoringConfig;

    fn app(ready: bool) -> axum::Router {
        let service = Arc::new(RiskScoringService::new(
            Arc::new(InMemoryRiskRepository::default()),
            ScoringConfig::standard(),
        ));
        let recorder = PrometheusBuilder::new().build_recorder();
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(recorder.handle()),
        };
        with_scoring_routes(service, Arc::new(HealthEvaluator::default())).layer(Extension(state))
    }

    async fn read_json(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    fn get(uri: &str) -> axum::http::Request<axum::body::Body> {
        axum::http::Request::get(uri)
            .body(axum::body::Body::empty())
            .expect("request builds")
    }

    fn post_json(uri: &str, payload: &serde_json::Value) -> axum::http::Request<axum::body::Body> {
        axum::http::Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from(
                serde_json::to_vec(payload).expect("payload serializes"),
            ))
            .expect("request builds")
    }

    #[tokio::test]
    async fn readiness_reflects_the_flag_and_the_stored_batch() {
        let response = app(false).oneshot(get("/ready")).await.expect("responds");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(read_json(response).await["status"], "initializing");

        let router = app(true);
        let response = router.clone().oneshot(get("/ready")).await.expect("responds");
        assert_eq!(response.status(), StatusCode::OK);
        let json = read_json(response).await;
        assert_eq!(json["status"], "ready");
        assert!(json["batch"].is_null());

        let batch = json!({ "csv": "Employee_ID,Avg_Vibe_Score\nEMP1,1\nEMP2,5\n" });
        let response = router
            .clone()
            .oneshot(post_json("/api/v1/risk/batches", &batch))
            .await
            .expect("responds");
        assert_eq!(response.status(), StatusCode::OK);

        let response = router.oneshot(get("/ready")).await.expect("responds");
        let json = read_json(response).await;
        assert_eq!(json["batch"]["employees"], 2);
        assert_eq!(json["batch"]["flagged"], 1);
    }

    #[tokio::test]
    async fn liveness_and_metrics_respond() {
        let router = app(true);
        let response = router.clone().oneshot(get("/health")).await.expect("responds");
        assert_eq!(response.status(), StatusCode::OK);
        let json = read_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "workforce-risk-api");

        let response = router.oneshot(get("/metrics")).await.expect("responds");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("text/plain; version=0.0.4")
        );
    }

    #[tokio::test]
    async fn risk_and_health_routes_share_one_app() {
        let router = app(true);
        let batch = json!({
            "csv": "Employee_ID,Avg_Vibe_Score\nEMP1,1\nEMP2,5\n"
        });
        let response = router
            .clone()
            .oneshot(post_json("/api/v1/risk/batches", &batch))
            .await
            .expect("responds");
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .clone()
            .oneshot(get("/api/v1/risk/summary"))
            .await
            .expect("responds");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await["summary"]["flagged_employees"], 1);

        let assessment = json!({
            "history": { "employee_id": "EMP1" },
            "today": "2024-06-30",
        });
        let response = router
            .oneshot(post_json("/api/v1/health/assessments", &assessment))
            .await
            .expect("responds");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await["level"], "Medium");
    }
}
