use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Windows, sample minimums, and level thresholds for the single-employee assessment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthConfig {
    /// Morality and engagement look back this many days.
    pub recent_window_days: i64,
    pub retention_window_days: i64,
    pub culture_window_days: i64,
    pub min_hours_for_consistency: usize,
    pub min_vibes_for_trend: usize,
    pub min_reviews_for_trend: usize,
    pub min_hours_for_trend: usize,
    /// Health below this is a High intervention level.
    pub high_below: f64,
    /// Health below this (and not High) is Medium.
    pub medium_below: f64,
}

impl HealthConfig {
    pub fn standard() -> Self {
        Self {
            recent_window_days: 30,
            retention_window_days: 180,
            culture_window_days: 90,
            min_hours_for_consistency: 5,
            min_vibes_for_trend: 3,
            min_reviews_for_trend: 2,
            min_hours_for_trend: 10,
            high_below: 40.0,
            medium_below: 65.0,
        }
    }

    /// Start of a look-back window; saturates at the earliest representable date.
    pub(crate) fn cutoff(today: NaiveDate, days: i64) -> NaiveDate {
        today
            .checked_sub_signed(Duration::days(days))
            .unwrap_or(NaiveDate::MIN)
    }
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self::standard()
    }
}
