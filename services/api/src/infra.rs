use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, RwLock};
use workforce_risk::risk::{
    BatchOverview, EmployeeId, EmployeeRiskProfile, PopulationReport, RepositoryError,
    RiskProfileRepository,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Holds the latest scored batch in process memory.
#[derive(Default, Clone)]
pub(crate) struct InMemoryRiskRepository {
    report: Arc<RwLock<Option<PopulationReport>>>,
}

impl InMemoryRiskRepository {
    fn poisoned() -> RepositoryError {
        RepositoryError::Unavailable("batch store lock poisoned".to_string())
    }
}

impl RiskProfileRepository for InMemoryRiskRepository {
    fn replace(&self, report: PopulationReport) -> Result<(), RepositoryError> {
        let mut guard = self.report.write().map_err(|_| Self::poisoned())?;
        *guard = Some(report);
        Ok(())
    }

    fn fetch(&self, id: &EmployeeId) -> Result<Option<EmployeeRiskProfile>, RepositoryError> {
        let guard = self.report.read().map_err(|_| Self::poisoned())?;
        Ok(guard
            .as_ref()
            .and_then(|report| report.employee(id.as_str()))
            .cloned())
    }

    fn overview(&self) -> Result<Option<BatchOverview>, RepositoryError> {
        let guard = self.report.read().map_err(|_| Self::poisoned())?;
        Ok(guard.as_ref().map(BatchOverview::from))
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    workforce_risk::datasets::parse_date(raw)
        .ok_or_else(|| format!("failed to parse '{raw}' as a date (expected YYYY-MM-DD)"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use workforce_risk::risk::{EmployeeSignalRecord, RiskEngine};

    fn report(ids: &[&str]) -> PopulationReport {
        let records: Vec<EmployeeSignalRecord> = ids
            .iter()
            .map(|id| EmployeeSignalRecord::empty(EmployeeId(id.to_string())))
            .collect();
        RiskEngine::standard()
            .score_population(&records)
            .expect("unique ids")
    }

    #[test]
    fn replace_swaps_the_whole_batch() {
        let repository = InMemoryRiskRepository::default();
        assert!(repository.overview().expect("readable").is_none());

        repository.replace(report(&["EMP1", "EMP2"])).expect("stored");
        repository.replace(report(&["EMP3"])).expect("stored");

        let overview = repository.overview().expect("readable").expect("batch");
        assert_eq!(overview.summary.total_employees, 1);
        assert!(repository
            .fetch(&EmployeeId("EMP1".to_string()))
            .expect("readable")
            .is_none());
        assert!(repository
            .fetch(&EmployeeId("EMP3".to_string()))
            .expect("readable")
            .is_some());
    }

    #[test]
    fn parse_date_reports_the_raw_value() {
        assert_eq!(
            parse_date("2024-06-30"),
            Ok(NaiveDate::from_ymd_opt(2024, 6, 30).expect("valid date"))
        );
        let error = parse_date("soon").expect_err("not a date");
        assert!(error.contains("soon"));
    }
}
