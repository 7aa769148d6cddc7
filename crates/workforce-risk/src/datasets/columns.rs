use std::collections::BTreeMap;

use serde::Serialize;

use super::table::normalize_header;

/// The eight signal inputs the loader extracts from a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalField {
    PerformanceRating,
    RewardPoints,
    TotalLeaveDays,
    OnboardingConcernFlag,
    MentorAssigned,
    InitialTrainingCompleted,
    AvgWorkHours,
    AvgVibeScore,
}

impl SignalField {
    pub const ALL: [SignalField; 8] = [
        SignalField::PerformanceRating,
        SignalField::RewardPoints,
        SignalField::TotalLeaveDays,
        SignalField::OnboardingConcernFlag,
        SignalField::MentorAssigned,
        SignalField::InitialTrainingCompleted,
        SignalField::AvgWorkHours,
        SignalField::AvgVibeScore,
    ];

    /// Column name used when writing merged signal tables.
    pub fn canonical(self) -> &'static str {
        match self {
            SignalField::PerformanceRating => "Performance_Rating",
            SignalField::RewardPoints => "Reward_Points",
            SignalField::TotalLeaveDays => "Total_Leave_Days",
            SignalField::OnboardingConcernFlag => "Onboarding_Concern_Flag",
            SignalField::MentorAssigned => "Mentor_Assigned",
            SignalField::InitialTrainingCompleted => "Initial_Training_Completed",
            SignalField::AvgWorkHours => "Avg_Work_Hours",
            SignalField::AvgVibeScore => "Avg_Vibe_Score",
        }
    }

    fn default_aliases(self) -> &'static [&'static str] {
        match self {
            SignalField::PerformanceRating => &["performance_rating"],
            SignalField::RewardPoints => &["reward_points"],
            SignalField::TotalLeaveDays => &["total_leave_days"],
            SignalField::OnboardingConcernFlag => &["onboarding_concern_flag"],
            SignalField::MentorAssigned => &["mentor_assigned"],
            SignalField::InitialTrainingCompleted => &["initial_training_completed"],
            SignalField::AvgWorkHours => &["avg_work_hours", "work_hours"],
            SignalField::AvgVibeScore => &["avg_vibe_score", "vibe_score"],
        }
    }
}

/// Column names accepted for each field, in priority order. The first alias holding a
/// usable value wins for each row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalColumns {
    employee_id: Vec<String>,
    fields: BTreeMap<SignalField, Vec<String>>,
}

impl SignalColumns {
    pub fn standard() -> Self {
        let fields = SignalField::ALL
            .iter()
            .map(|field| {
                let aliases = field
                    .default_aliases()
                    .iter()
                    .map(|alias| alias.to_string())
                    .collect();
                (*field, aliases)
            })
            .collect();

        Self {
            employee_id: vec!["employee_id".to_string(), "emp_id".to_string()],
            fields,
        }
    }

    /// Replaces the accepted names for one field; names are header-normalized.
    pub fn with_priority(mut self, field: SignalField, aliases: &[&str]) -> Self {
        self.fields.insert(
            field,
            aliases.iter().map(|alias| normalize_header(alias)).collect(),
        );
        self
    }

    /// Replaces the identifier column names; names are header-normalized.
    pub fn with_employee_id(mut self, aliases: &[&str]) -> Self {
        self.employee_id = aliases.iter().map(|alias| normalize_header(alias)).collect();
        self
    }

    pub fn employee_id(&self) -> &[String] {
        &self.employee_id
    }

    pub fn aliases(&self, field: SignalField) -> &[String] {
        self.fields.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Default for SignalColumns {
    fn default() -> Self {
        Self::standard()
    }
}
