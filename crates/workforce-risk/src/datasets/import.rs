use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info, warn};

use super::columns::{SignalColumns, SignalField};
use super::rows::{RawValue, SignalRow};
use super::table::Table;
use super::DatasetImportError;
use crate::risk::{EmployeeId, EmployeeSignalRecord, SignalError};

/// Records extracted from one source plus the field groups it lacked entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalImport {
    pub records: Vec<EmployeeSignalRecord>,
    pub missing_columns: Vec<SignalField>,
}

/// Adapts heterogeneous exports into [`EmployeeSignalRecord`]s.
#[derive(Debug, Clone, Default)]
pub struct SignalImporter {
    columns: SignalColumns,
}

impl SignalImporter {
    pub fn new(columns: SignalColumns) -> Self {
        Self { columns }
    }

    pub fn import_path(&self, path: impl AsRef<Path>) -> Result<SignalImport, DatasetImportError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        info!(path = %path.display(), "importing signal table");
        self.import_reader(file)
    }

    pub fn import_reader<R: Read>(&self, reader: R) -> Result<SignalImport, DatasetImportError> {
        let table = Table::read(reader)?;
        let present = |column: &str| table.has_column(column);
        let missing_columns = self.missing_columns(present);
        let rows = table.rows().map(SignalRow::from_table_row).collect();
        self.convert(rows, missing_columns)
    }

    pub fn import_rows(&self, rows: Vec<SignalRow>) -> Result<SignalImport, DatasetImportError> {
        let seen: BTreeSet<&str> = rows.iter().flat_map(SignalRow::columns).collect();
        let missing_columns = self.missing_columns(|column| seen.contains(column));
        self.convert(rows, missing_columns)
    }

    fn missing_columns(&self, present: impl Fn(&str) -> bool) -> Vec<SignalField> {
        SignalField::ALL
            .iter()
            .copied()
            .filter(|field| {
                !self
                    .columns
                    .aliases(*field)
                    .iter()
                    .any(|alias| present(alias))
            })
            .collect()
    }

    fn convert(
        &self,
        rows: Vec<SignalRow>,
        missing_columns: Vec<SignalField>,
    ) -> Result<SignalImport, DatasetImportError> {
        if !missing_columns.is_empty() {
            let names: Vec<&str> = missing_columns
                .iter()
                .map(|field| field.canonical())
                .collect();
            warn!(
                missing = %names.join(", "),
                "signal column groups absent; those fields stay empty"
            );
        }

        let records = rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                self.record(row)
                    .map_err(|source| DatasetImportError::Row {
                        row: index + 1,
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SignalImport {
            records,
            missing_columns,
        })
    }

    /// Converts one row; only a missing identifier is an error.
    pub fn record(&self, row: &SignalRow) -> Result<EmployeeSignalRecord, SignalError> {
        let raw_id = self
            .columns
            .employee_id()
            .iter()
            .find_map(|column| row.get(column).and_then(RawValue::text))
            .ok_or(SignalError::MissingEmployeeId)?;
        let employee_id = EmployeeId::parse(&raw_id)?;

        let number = |field| self.first_value(row, field, RawValue::number);
        let flag = |field| self.first_value(row, field, RawValue::flag);

        Ok(EmployeeSignalRecord {
            performance_rating: number(SignalField::PerformanceRating),
            reward_points: number(SignalField::RewardPoints),
            total_leave_days: number(SignalField::TotalLeaveDays),
            onboarding_concern_flag: flag(SignalField::OnboardingConcernFlag),
            mentor_assigned: flag(SignalField::MentorAssigned),
            initial_training_completed: flag(SignalField::InitialTrainingCompleted),
            avg_work_hours: number(SignalField::AvgWorkHours),
            avg_vibe_score: number(SignalField::AvgVibeScore),
            employee_id,
        })
    }

    fn first_value<T>(
        &self,
        row: &SignalRow,
        field: SignalField,
        convert: fn(&RawValue) -> Option<T>,
    ) -> Option<T> {
        for alias in self.columns.aliases(field) {
            let Some(raw) = row.get(alias) else {
                continue;
            };
            match convert(raw) {
                Some(value) => return Some(value),
                None => debug!(
                    column = alias.as_str(),
                    value = ?raw,
                    "ignoring unparseable signal value"
                ),
            }
        }
        None
    }
}
