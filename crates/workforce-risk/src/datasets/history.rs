//! Per-employee raw HR history grouped from the individual dataset exports.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::risk::{EmployeeId, EmployeeSignalRecord};

/// One day of collaboration-tool activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub date: NaiveDate,
    #[serde(default)]
    pub teams_messages: u32,
    #[serde(default)]
    pub emails: u32,
    #[serde(default)]
    pub meetings: u32,
    pub work_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveEntry {
    #[serde(default)]
    pub leave_type: String,
    pub days: f64,
    pub start: NaiveDate,
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingEntry {
    #[serde(default)]
    pub joining_date: Option<NaiveDate>,
    #[serde(default)]
    pub feedback: Option<String>,
    pub mentor_assigned: bool,
    pub training_completed: bool,
    #[serde(default)]
    pub concern_flag: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReview {
    /// Free-form period label such as `Annual 2023` or `H2 2023`.
    pub review_period: String,
    pub rating: f64,
    #[serde(default)]
    pub promotion_consideration: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardEntry {
    #[serde(default)]
    pub award_type: String,
    pub date: NaiveDate,
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VibeEntry {
    pub date: NaiveDate,
    pub score: f64,
    #[serde(default)]
    pub emotion_zone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
}

/// Everything known about one employee across the HR datasets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeHistory {
    pub employee_id: EmployeeId,
    #[serde(default)]
    pub activity: Vec<ActivityEntry>,
    #[serde(default)]
    pub leaves: Vec<LeaveEntry>,
    #[serde(default)]
    pub onboarding: Vec<OnboardingEntry>,
    #[serde(default)]
    pub reviews: Vec<PerformanceReview>,
    #[serde(default)]
    pub rewards: Vec<RewardEntry>,
    #[serde(default)]
    pub vibes: Vec<VibeEntry>,
    #[serde(default)]
    pub tasks: Vec<TaskEntry>,
}

impl EmployeeHistory {
    pub fn new(employee_id: EmployeeId) -> Self {
        Self {
            employee_id,
            activity: Vec::new(),
            leaves: Vec::new(),
            onboarding: Vec::new(),
            reviews: Vec::new(),
            rewards: Vec::new(),
            vibes: Vec::new(),
            tasks: Vec::new(),
        }
    }

    /// Review with the greatest period label; later rows win ties.
    pub fn latest_review(&self) -> Option<&PerformanceReview> {
        self.reviews
            .iter()
            .enumerate()
            .max_by(|(left_index, left), (right_index, right)| {
                left.review_period
                    .cmp(&right.review_period)
                    .then(left_index.cmp(right_index))
            })
            .map(|(_, review)| review)
    }

    /// Aggregates the raw history into the scorer's input record. Datasets with no
    /// rows for this employee leave their fields empty.
    pub fn signal_record(&self) -> EmployeeSignalRecord {
        let onboarding = self.onboarding.first();

        EmployeeSignalRecord {
            performance_rating: self.latest_review().map(|review| review.rating),
            reward_points: sum(self.rewards.iter().map(|reward| reward.points)),
            total_leave_days: sum(self.leaves.iter().map(|leave| leave.days)),
            onboarding_concern_flag: onboarding.and_then(|entry| entry.concern_flag),
            mentor_assigned: onboarding.map(|entry| entry.mentor_assigned),
            initial_training_completed: onboarding.map(|entry| entry.training_completed),
            avg_work_hours: mean(self.activity.iter().map(|entry| entry.work_hours)),
            avg_vibe_score: mean(self.vibes.iter().map(|entry| entry.score)),
            ..EmployeeSignalRecord::empty(self.employee_id.clone())
        }
    }
}

fn sum(values: impl Iterator<Item = f64>) -> Option<f64> {
    values.fold(None, |total, value| Some(total.unwrap_or(0.0) + value))
}

pub(crate) fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (total, count) = values.fold((0.0, 0usize), |(total, count), value| {
        (total + value, count + 1)
    });
    (count > 0).then(|| total / count as f64)
}
