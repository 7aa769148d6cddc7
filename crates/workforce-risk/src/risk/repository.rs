use serde::Serialize;

use super::binning::PopulationThresholds;
use super::engine::{EmployeeRiskProfile, PopulationReport};
use super::signals::EmployeeId;
use super::summary::PopulationSummary;

/// Storage abstraction for the latest scored batch.
///
/// `replace` swaps the whole batch: thresholds and tiers are only meaningful
/// for the population they were computed from.
pub trait RiskProfileRepository: Send + Sync {
    fn replace(&self, report: PopulationReport) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &EmployeeId) -> Result<Option<EmployeeRiskProfile>, RepositoryError>;
    fn overview(&self) -> Result<Option<BatchOverview>, RepositoryError>;
}

/// Population-level view of the stored batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchOverview {
    pub summary: PopulationSummary,
    pub thresholds: PopulationThresholds,
}

impl From<&PopulationReport> for BatchOverview {
    fn from(report: &PopulationReport) -> Self {
        Self {
            summary: report.summary.clone(),
            thresholds: report.thresholds,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
