use std::io::Cursor;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::engine::{EmployeeRiskProfile, RiskEngine};
use super::repository::{BatchOverview, RepositoryError, RiskProfileRepository};
use super::signals::{EmployeeId, EmployeeSignalRecord, SignalError};
use super::weights::ScoringConfig;
use crate::datasets::{DatasetImportError, SignalField, SignalImport, SignalImporter, SignalRow};

/// Service composing the scoring engine, the record loader, and batch storage.
pub struct RiskScoringService<R> {
    repository: Arc<R>,
    engine: Arc<RiskEngine>,
    importer: SignalImporter,
}

/// Acknowledgement returned after a batch has been scored and stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReceipt {
    #[serde(flatten)]
    pub overview: BatchOverview,
    pub missing_columns: Vec<SignalField>,
}

impl<R> RiskScoringService<R>
where
    R: RiskProfileRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: ScoringConfig) -> Self {
        Self {
            repository,
            engine: Arc::new(RiskEngine::new(config)),
            importer: SignalImporter::default(),
        }
    }

    pub fn engine(&self) -> &RiskEngine {
        &self.engine
    }

    /// Score an already-normalized population and replace the stored batch.
    pub fn score_batch(
        &self,
        records: Vec<EmployeeSignalRecord>,
    ) -> Result<BatchReceipt, RiskServiceError> {
        self.store(SignalImport {
            records,
            missing_columns: Vec::new(),
        })
    }

    /// Score loosely-named JSON rows.
    pub fn score_rows(&self, rows: Vec<SignalRow>) -> Result<BatchReceipt, RiskServiceError> {
        let import = self.importer.import_rows(rows)?;
        self.store(import)
    }

    /// Score a CSV document held in memory.
    pub fn score_csv(&self, csv: &str) -> Result<BatchReceipt, RiskServiceError> {
        let import = self.importer.import_reader(Cursor::new(csv.as_bytes()))?;
        self.store(import)
    }

    fn store(&self, import: SignalImport) -> Result<BatchReceipt, RiskServiceError> {
        let report = self.engine.score_population(&import.records)?;
        let overview = BatchOverview::from(&report);
        self.repository.replace(report)?;
        info!(
            employees = overview.summary.total_employees,
            flagged = overview.summary.flagged_employees,
            "stored scored batch"
        );

        Ok(BatchReceipt {
            overview,
            missing_columns: import.missing_columns,
        })
    }

    pub fn profile(&self, id: &EmployeeId) -> Result<EmployeeRiskProfile, RiskServiceError> {
        self.repository
            .fetch(id)?
            .ok_or_else(|| RiskServiceError::UnknownEmployee(id.clone()))
    }

    pub fn overview(&self) -> Result<BatchOverview, RiskServiceError> {
        self.repository.overview()?.ok_or(RiskServiceError::NoBatch)
    }
}

/// Error raised by the risk scoring service.
#[derive(Debug, thiserror::Error)]
pub enum RiskServiceError {
    #[error(transparent)]
    Signal(#[from] SignalError),
    #[error(transparent)]
    Import(#[from] DatasetImportError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("employee '{0}' is not part of the current batch")]
    UnknownEmployee(EmployeeId),
    #[error("no batch has been scored yet")]
    NoBatch,
}
