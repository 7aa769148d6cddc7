use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper shared by every HR dataset.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub String);

impl EmployeeId {
    /// Trims the raw identifier; blank identifiers are a caller contract violation.
    pub fn parse(raw: &str) -> Result<Self, SignalError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SignalError::MissingEmployeeId);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalized per-employee inputs consumed by the component scorer.
///
/// Every signal is optional; a missing value excludes the related component from
/// weighting instead of counting as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeSignalRecord {
    pub employee_id: EmployeeId,
    #[serde(default)]
    pub performance_rating: Option<f64>,
    #[serde(default)]
    pub reward_points: Option<f64>,
    #[serde(default)]
    pub total_leave_days: Option<f64>,
    #[serde(default)]
    pub onboarding_concern_flag: Option<bool>,
    #[serde(default)]
    pub mentor_assigned: Option<bool>,
    #[serde(default)]
    pub initial_training_completed: Option<bool>,
    #[serde(default)]
    pub avg_work_hours: Option<f64>,
    #[serde(default)]
    pub avg_vibe_score: Option<f64>,
}

impl EmployeeSignalRecord {
    pub fn empty(employee_id: EmployeeId) -> Self {
        Self {
            employee_id,
            performance_rating: None,
            reward_points: None,
            total_leave_days: None,
            onboarding_concern_flag: None,
            mentor_assigned: None,
            initial_training_completed: None,
            avg_work_hours: None,
            avg_vibe_score: None,
        }
    }

    pub fn has_any_signal(&self) -> bool {
        self.performance_rating.is_some()
            || self.reward_points.is_some()
            || self.total_leave_days.is_some()
            || self.onboarding_concern_flag.is_some()
            || self.mentor_assigned.is_some()
            || self.initial_training_completed.is_some()
            || self.avg_work_hours.is_some()
            || self.avg_vibe_score.is_some()
    }
}

/// Contract violations raised while building or batching signal records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignalError {
    #[error("employee record is missing an employee_id")]
    MissingEmployeeId,
    #[error("employee_id '{0}' appears more than once in the population")]
    DuplicateEmployee(EmployeeId),
}

/// Boolean-like text coercion: `yes`, `true` and `1` (any case) are true, anything else false.
pub fn coerce_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "yes" | "true" | "1"
    )
}
