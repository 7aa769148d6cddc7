use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::columns::SignalField;
use super::dates::parse_date;
use super::history::{
    ActivityEntry, EmployeeHistory, LeaveEntry, OnboardingEntry, PerformanceReview, RewardEntry,
    TaskEntry, VibeEntry,
};
use super::table::{Table, TableRow};
use super::DatasetImportError;
use crate::risk::{coerce_flag, EmployeeId, EmployeeSignalRecord};

/// The HR exports that feed an [`EmployeeHistory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    Activity,
    Leave,
    Onboarding,
    Performance,
    Rewards,
    Vibe,
    Tasks,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 7] = [
        DatasetKind::Activity,
        DatasetKind::Leave,
        DatasetKind::Onboarding,
        DatasetKind::Performance,
        DatasetKind::Rewards,
        DatasetKind::Vibe,
        DatasetKind::Tasks,
    ];

    fn file_marker(self) -> &'static str {
        match self {
            DatasetKind::Activity => "activity",
            DatasetKind::Leave => "leave",
            DatasetKind::Onboarding => "onboarding",
            DatasetKind::Performance => "performance",
            DatasetKind::Rewards => "reward",
            DatasetKind::Vibe => "vibe",
            DatasetKind::Tasks => "task",
        }
    }

    /// Guesses the dataset from an export file name such as `leave_dataset_cleaned.csv`.
    pub fn detect(file_name: &str) -> Option<Self> {
        let lowered = file_name.to_ascii_lowercase();
        if !lowered.ends_with(".csv") {
            return None;
        }
        Self::ALL
            .iter()
            .copied()
            .find(|kind| lowered.contains(kind.file_marker()))
    }
}

/// Row counts for one ingested export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    pub rows: usize,
    pub accepted: usize,
    pub skipped: usize,
}

/// Raw histories keyed by employee, merged across every ingested export.
#[derive(Debug, Clone, Default)]
pub struct HistoryBook {
    histories: BTreeMap<EmployeeId, EmployeeHistory>,
}

impl HistoryBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.histories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histories.is_empty()
    }

    pub fn history(&self, employee_id: &str) -> Option<&EmployeeHistory> {
        self.histories.get(&EmployeeId(employee_id.to_string()))
    }

    pub fn histories(&self) -> impl Iterator<Item = &EmployeeHistory> {
        self.histories.values()
    }

    /// One signal record per known employee, ordered by id.
    pub fn signal_records(&self) -> Vec<EmployeeSignalRecord> {
        self.histories
            .values()
            .map(EmployeeHistory::signal_record)
            .collect()
    }

    /// Adds every row of one export. Rows without an id or with unusable required
    /// fields are skipped and counted.
    pub fn ingest<R: Read>(
        &mut self,
        kind: DatasetKind,
        reader: R,
    ) -> Result<IngestStats, DatasetImportError> {
        let table = Table::read(reader)?;
        let mut stats = IngestStats {
            rows: table.len(),
            ..IngestStats::default()
        };

        if !table.has_column("employee_id") {
            warn!(dataset = ?kind, "export has no Employee_ID column; skipped");
            stats.skipped = stats.rows;
            return Ok(stats);
        }

        for (index, row) in table.rows().enumerate() {
            let Some(employee_id) = row.get("employee_id").and_then(|raw| EmployeeId::parse(raw).ok())
            else {
                debug!(dataset = ?kind, row = index + 1, "row without employee id skipped");
                stats.skipped += 1;
                continue;
            };

            let history = self
                .histories
                .entry(employee_id.clone())
                .or_insert_with(|| EmployeeHistory::new(employee_id));
            if push_entry(kind, row, history) {
                stats.accepted += 1;
            } else {
                debug!(dataset = ?kind, row = index + 1, "row with unusable fields skipped");
                stats.skipped += 1;
            }
        }

        info!(
            dataset = ?kind,
            rows = stats.rows,
            skipped = stats.skipped,
            "ingested HR export"
        );
        Ok(stats)
    }

    pub fn ingest_path(
        &mut self,
        kind: DatasetKind,
        path: impl AsRef<Path>,
    ) -> Result<IngestStats, DatasetImportError> {
        let file = File::open(path.as_ref())?;
        self.ingest(kind, file)
    }

    /// Ingests every recognisable `.csv` export in a directory.
    pub fn ingest_dir(
        &mut self,
        dir: impl AsRef<Path>,
    ) -> Result<BTreeMap<DatasetKind, IngestStats>, DatasetImportError> {
        let mut entries: Vec<_> = fs::read_dir(dir.as_ref())?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|entry| entry.path())
            .collect();
        entries.sort();

        let mut summary: BTreeMap<DatasetKind, IngestStats> = BTreeMap::new();
        for path in entries {
            let Some(kind) = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(DatasetKind::detect)
            else {
                debug!(path = %path.display(), "not a known HR export; ignored");
                continue;
            };

            let stats = self.ingest_path(kind, &path)?;
            let total = summary.entry(kind).or_default();
            total.rows += stats.rows;
            total.accepted += stats.accepted;
            total.skipped += stats.skipped;
        }
        Ok(summary)
    }
}

fn count(row: &TableRow<'_>, column: &str) -> Option<u32> {
    row.number(column)
        .filter(|value| *value >= 0.0)
        .map(|value| value.round() as u32)
}

fn flag(row: &TableRow<'_>, column: &str) -> Option<bool> {
    row.get(column).map(coerce_flag)
}

fn date_cell(row: &TableRow<'_>, column: &str) -> Option<chrono::NaiveDate> {
    row.get(column).and_then(parse_date)
}

fn text(row: &TableRow<'_>, column: &str) -> Option<String> {
    row.get(column).map(str::to_string)
}

/// Returns false when the row lacks a field the entry cannot exist without.
fn push_entry(kind: DatasetKind, row: TableRow<'_>, history: &mut EmployeeHistory) -> bool {
    match kind {
        DatasetKind::Activity => {
            let (Some(date), Some(work_hours)) = (date_cell(&row, "date"), row.number("work_hours"))
            else {
                return false;
            };
            history.activity.push(ActivityEntry {
                date,
                teams_messages: count(&row, "teams_messages_sent").unwrap_or(0),
                emails: count(&row, "emails_sent").unwrap_or(0),
                meetings: count(&row, "meetings_attended").unwrap_or(0),
                work_hours,
            });
        }
        DatasetKind::Leave => {
            let (Some(days), Some(start)) =
                (row.number("leave_days"), date_cell(&row, "leave_start_date"))
            else {
                return false;
            };
            history.leaves.push(LeaveEntry {
                leave_type: text(&row, "leave_type").unwrap_or_default(),
                days,
                start,
                end: date_cell(&row, "leave_end_date"),
            });
        }
        DatasetKind::Onboarding => {
            history.onboarding.push(OnboardingEntry {
                joining_date: date_cell(&row, "joining_date"),
                feedback: text(&row, "onboarding_feedback"),
                mentor_assigned: flag(&row, "mentor_assigned").unwrap_or(false),
                training_completed: flag(&row, "initial_training_completed").unwrap_or(false),
                concern_flag: flag(&row, "onboarding_concern_flag"),
            });
        }
        DatasetKind::Performance => {
            let Some(rating) = row.number("performance_rating") else {
                return false;
            };
            history.reviews.push(PerformanceReview {
                review_period: text(&row, "review_period").unwrap_or_default(),
                rating,
                promotion_consideration: flag(&row, "promotion_consideration").unwrap_or(false),
            });
        }
        DatasetKind::Rewards => {
            let (Some(points), Some(date)) = (row.number("reward_points"), date_cell(&row, "award_date"))
            else {
                return false;
            };
            history.rewards.push(RewardEntry {
                award_type: text(&row, "award_type").unwrap_or_default(),
                date,
                points,
            });
        }
        DatasetKind::Vibe => {
            let (Some(score), Some(date)) = (row.number("vibe_score"), date_cell(&row, "response_date"))
            else {
                return false;
            };
            history.vibes.push(VibeEntry {
                date,
                score,
                emotion_zone: text(&row, "emotion_zone"),
            });
        }
        DatasetKind::Tasks => {
            history.tasks.push(TaskEntry {
                title: text(&row, "title").unwrap_or_default(),
                due_date: date_cell(&row, "due_date"),
                completed: flag(&row, "is_completed").unwrap_or(false),
            });
        }
    }
    true
}

fn optional_cell<T: ToString>(value: Option<T>) -> String {
    value.map(|value| value.to_string()).unwrap_or_default()
}

fn flag_cell(value: Option<bool>) -> String {
    match value {
        Some(true) => "True".to_string(),
        Some(false) => "False".to_string(),
        None => String::new(),
    }
}

/// Writes merged signal records with the canonical column names.
pub fn write_signal_csv<W: Write>(
    records: &[EmployeeSignalRecord],
    writer: W,
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);

    let mut header = vec!["Employee_ID"];
    header.extend(SignalField::ALL.iter().map(|field| field.canonical()));
    writer.write_record(&header)?;

    for record in records {
        writer.write_record([
            record.employee_id.to_string(),
            optional_cell(record.performance_rating),
            optional_cell(record.reward_points),
            optional_cell(record.total_leave_days),
            flag_cell(record.onboarding_concern_flag),
            flag_cell(record.mentor_assigned),
            flag_cell(record.initial_training_completed),
            optional_cell(record.avg_work_hours),
            optional_cell(record.avg_vibe_score),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
