//! Ingestion of HR exports: the lenient signal-table loader used by the scoring
//! engine and the raw dataset merge that builds per-employee histories.

pub mod columns;
pub mod dates;
pub mod history;
pub mod import;
pub mod merge;
pub mod rows;
pub(crate) mod table;

pub use columns::{SignalColumns, SignalField};
pub use dates::parse_date;
pub use history::{
    ActivityEntry, EmployeeHistory, LeaveEntry, OnboardingEntry, PerformanceReview, RewardEntry,
    TaskEntry, VibeEntry,
};
pub use import::{SignalImport, SignalImporter};
pub use merge::{write_signal_csv, DatasetKind, HistoryBook, IngestStats};
pub use rows::{RawValue, SignalRow};
pub use table::{is_null_token, normalize_header};

use crate::risk::SignalError;

/// Failure while reading a dataset export.
#[derive(Debug, thiserror::Error)]
pub enum DatasetImportError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: SignalError,
    },
}
