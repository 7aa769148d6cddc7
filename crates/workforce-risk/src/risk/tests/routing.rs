use super::common::*;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::risk::router::{batch_handler, BatchRequest};
use crate::risk::{RiskScoringService, ScoringConfig};

fn json_request(uri: &str, payload: &Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(payload).expect("payload serializes"),
        ))
        .expect("request builds")
}

fn get_request(uri: &str) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::get(uri)
        .body(axum::body::Body::empty())
        .expect("request builds")
}

fn two_vibe_rows() -> Value {
    json!({
        "records": [
            { "Employee_ID": "EMP1", "Avg_Vibe_Score": 1 },
            { "Employee_ID": "EMP2", "Avg_Vibe_Score": 5 },
        ]
    })
}

#[tokio::test]
async fn batch_route_scores_json_rows() {
    let (service, repository) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request("/api/v1/risk/batches", &two_vibe_rows()))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["summary"]["total_employees"], 2);
    assert_eq!(payload["summary"]["flagged_employees"], 1);
    let missing = payload["missing_columns"]
        .as_array()
        .expect("missing columns listed");
    assert_eq!(missing.len(), 7);
    assert!(missing.contains(&json!("performance_rating")));
    assert!(!missing.contains(&json!("avg_vibe_score")));
    assert_eq!(repository.stored_employees(), 2);
}

#[tokio::test]
async fn batch_route_accepts_inline_csv() {
    let (service, repository) = build_service();
    let router = router_with_service(service);
    let csv = "Employee_ID,Performance_Rating,Avg_Vibe_Score\nEMP1,2,1\nEMP2,4,5\nEMP3,,3\n";

    let response = router
        .oneshot(json_request("/api/v1/risk/batches", &json!({ "csv": csv })))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["summary"]["total_employees"], 3);
    assert_eq!(repository.stored_employees(), 3);
}

#[tokio::test]
async fn batch_route_rejects_ambiguous_or_empty_bodies() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let both = json!({ "records": [], "csv": "Employee_ID\n" });
    let response = router
        .clone()
        .oneshot(json_request("/api/v1/risk/batches", &both))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = router
        .oneshot(json_request("/api/v1/risk/batches", &json!({})))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert!(payload.get("error").is_some());
}

#[tokio::test]
async fn batch_route_returns_unprocessable_for_duplicate_ids() {
    let (service, repository) = build_service();
    let router = router_with_service(service);
    let payload = json!({
        "records": [
            { "employee_id": "EMP1", "avg_vibe_score": 2 },
            { "employee_id": "EMP1", "avg_vibe_score": 4 },
        ]
    });

    let response = router
        .oneshot(json_request("/api/v1/risk/batches", &payload))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(repository.stored_employees(), 0);
}

#[tokio::test]
async fn batch_route_returns_bad_request_for_rows_without_ids() {
    let (service, _) = build_service();
    let router = router_with_service(service);
    let payload = json!({
        "records": [
            { "employee_id": "EMP1", "avg_vibe_score": 2 },
            { "avg_vibe_score": 4 },
        ]
    });

    let response = router
        .oneshot(json_request("/api/v1/risk/batches", &payload))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains('2'));
}

#[tokio::test]
async fn employee_route_returns_profile_after_batch() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .clone()
        .oneshot(json_request("/api/v1/risk/batches", &two_vibe_rows()))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(get_request("/api/v1/risk/employees/EMP1"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let payload = read_json_body(response).await;
    assert_eq!(payload["employee_id"], "EMP1");
    assert_eq!(payload["flagged"], true);
    assert_eq!(payload["scenarios"], json!(["low_vibe"]));
    let crr = payload["crr"].as_f64().expect("crr present");
    assert!(approx(crr, 0.2));
}

#[tokio::test]
async fn employee_route_returns_not_found_for_unknown_ids() {
    let (service, _) = build_service();
    service
        .score_batch(mixed_population())
        .expect("batch scores");
    let router = router_with_service(service);

    let response = router
        .oneshot(get_request("/api/v1/risk/employees/EMP999"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("EMP999"));
}

#[tokio::test]
async fn summary_route_requires_a_batch() {
    let (service, _) = build_service();
    let service = Arc::new(service);
    let router = crate::risk::risk_router(service.clone());

    let response = router
        .clone()
        .oneshot(get_request("/api/v1/risk/summary"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    service
        .score_batch(mixed_population())
        .expect("batch scores");
    let response = router
        .oneshot(get_request("/api/v1/risk/summary"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let payload = read_json_body(response).await;
    assert_eq!(payload["summary"]["total_employees"], 8);
    let p25 = payload["thresholds"]["performance"]["p25"].as_f64();
    let p75 = payload["thresholds"]["performance"]["p75"].as_f64();
    assert!(matches!((p25, p75), (Some(low), Some(high)) if low <= high));
}

#[tokio::test]
async fn batch_handler_returns_internal_error_on_repository_failure() {
    let service = Arc::new(RiskScoringService::new(
        Arc::new(UnavailableRepository),
        ScoringConfig::standard(),
    ));
    let request: BatchRequest =
        serde_json::from_value(two_vibe_rows()).expect("request deserializes");

    let response = batch_handler::<UnavailableRepository>(State(service), axum::Json(request)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("database offline"));
}
