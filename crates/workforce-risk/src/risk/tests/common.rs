use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::risk::engine::{EmployeeRiskProfile, PopulationReport};
use crate::risk::repository::{BatchOverview, RepositoryError, RiskProfileRepository};
use crate::risk::signals::{EmployeeId, EmployeeSignalRecord};
use crate::risk::{risk_router, RiskScoringService, ScoringConfig};

pub(super) const EPSILON: f64 = 1e-9;

pub(super) fn approx(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < EPSILON
}

pub(super) fn employee(id: &str) -> EmployeeSignalRecord {
    EmployeeSignalRecord::empty(EmployeeId(id.to_string()))
}

/// Every signal at its best possible value.
pub(super) fn exemplary(id: &str) -> EmployeeSignalRecord {
    EmployeeSignalRecord {
        performance_rating: Some(4.0),
        reward_points: Some(1516.0),
        total_leave_days: Some(0.0),
        onboarding_concern_flag: Some(false),
        mentor_assigned: Some(true),
        initial_training_completed: Some(true),
        avg_work_hours: Some(10.0),
        avg_vibe_score: Some(5.0),
        ..employee(id)
    }
}

pub(super) fn with_vibe(id: &str, vibe: f64) -> EmployeeSignalRecord {
    EmployeeSignalRecord {
        avg_vibe_score: Some(vibe),
        ..employee(id)
    }
}

/// Eight employees spread across every signal so each component has a real distribution.
pub(super) fn mixed_population() -> Vec<EmployeeSignalRecord> {
    let rows: [(&str, f64, f64, f64, bool, bool, bool, f64, f64); 8] = [
        ("EMP001", 1.0, 0.0, 20.0, true, false, false, 11.0, 1.0),
        ("EMP002", 2.0, 200.0, 12.0, false, true, false, 9.0, 2.0),
        ("EMP003", 3.0, 600.0, 5.0, false, true, true, 8.0, 3.0),
        ("EMP004", 4.0, 1516.0, 0.0, false, true, true, 6.0, 5.0),
        ("EMP005", 3.0, 400.0, 8.0, false, false, true, 7.5, 3.5),
        ("EMP006", 2.0, 100.0, 15.0, true, false, false, 10.5, 2.5),
        ("EMP007", 4.0, 1200.0, 2.0, false, true, true, 7.0, 4.5),
        ("EMP008", 3.0, 800.0, 4.0, false, true, false, 8.5, 4.0),
    ];

    rows.iter()
        .map(
            |(id, rating, points, leave, concern, mentor, training, hours, vibe)| {
                EmployeeSignalRecord {
                    performance_rating: Some(*rating),
                    reward_points: Some(*points),
                    total_leave_days: Some(*leave),
                    onboarding_concern_flag: Some(*concern),
                    mentor_assigned: Some(*mentor),
                    initial_training_completed: Some(*training),
                    avg_work_hours: Some(*hours),
                    avg_vibe_score: Some(*vibe),
                    ..employee(id)
                }
            },
        )
        .collect()
}

pub(super) fn build_service() -> (RiskScoringService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = RiskScoringService::new(repository.clone(), ScoringConfig::standard());
    (service, repository)
}

pub(super) fn router_with_service(service: RiskScoringService<MemoryRepository>) -> axum::Router {
    risk_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) report: Arc<Mutex<Option<PopulationReport>>>,
}

impl MemoryRepository {
    pub(super) fn stored_employees(&self) -> usize {
        self.report
            .lock()
            .expect("repository mutex poisoned")
            .as_ref()
            .map(|report| report.employees.len())
            .unwrap_or(0)
    }
}

impl RiskProfileRepository for MemoryRepository {
    fn replace(&self, report: PopulationReport) -> Result<(), RepositoryError> {
        *self.report.lock().expect("repository mutex poisoned") = Some(report);
        Ok(())
    }

    fn fetch(&self, id: &EmployeeId) -> Result<Option<EmployeeRiskProfile>, RepositoryError> {
        let guard = self.report.lock().expect("repository mutex poisoned");
        Ok(guard
            .as_ref()
            .and_then(|report| report.employee(id.as_str()))
            .cloned())
    }

    fn overview(&self) -> Result<Option<BatchOverview>, RepositoryError> {
        let guard = self.report.lock().expect("repository mutex poisoned");
        Ok(guard.as_ref().map(BatchOverview::from))
    }
}

pub(super) struct UnavailableRepository;

impl RiskProfileRepository for UnavailableRepository {
    fn replace(&self, _report: PopulationReport) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &EmployeeId) -> Result<Option<EmployeeRiskProfile>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn overview(&self) -> Result<Option<BatchOverview>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
