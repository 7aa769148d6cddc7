use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::config::HealthConfig;
use super::scores::{culture, engagement, morality, retention_risk, SubScore};
use crate::datasets::EmployeeHistory;
use crate::risk::EmployeeId;

pub const STALE_AFTER_DAYS: i64 = 7;

/// HR intervention level derived from the combined health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InterventionLevel {
    Low,
    Medium,
    High,
}

impl InterventionLevel {
    pub fn label(self) -> &'static str {
        match self {
            InterventionLevel::Low => "Low",
            InterventionLevel::Medium => "Medium",
            InterventionLevel::High => "High",
        }
    }

    pub fn from_health(health_score: f64, config: &HealthConfig) -> Self {
        if health_score < config.high_below {
            InterventionLevel::High
        } else if health_score < config.medium_below {
            InterventionLevel::Medium
        } else {
            InterventionLevel::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthAssessment {
    pub employee_id: EmployeeId,
    pub assessed_on: NaiveDate,
    pub morality: SubScore,
    pub engagement: SubScore,
    pub retention_risk: SubScore,
    pub culture: SubScore,
    pub health_score: f64,
    pub level: InterventionLevel,
}

impl HealthAssessment {
    /// Note recorded alongside a Medium or High intervention.
    pub fn intervention_note(&self) -> Option<String> {
        if self.level == InterventionLevel::Low {
            return None;
        }
        Some(format!(
            "Auto-generated based on metrics: Morality={}, Engagement={}, Retention Risk={}, Culture={}",
            self.morality.total, self.engagement.total, self.retention_risk.total, self.culture.total
        ))
    }

    /// Assessments older than a week should be recomputed before use.
    pub fn is_stale(&self, today: NaiveDate) -> bool {
        (today - self.assessed_on).num_days() > STALE_AFTER_DAYS
    }
}

/// Population-independent single-employee assessment.
#[derive(Debug, Clone, Default)]
pub struct HealthEvaluator {
    config: HealthConfig,
}

impl HealthEvaluator {
    pub fn new(config: HealthConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HealthConfig {
        &self.config
    }

    /// Never fails: sparse history falls back to each part's default.
    pub fn assess(&self, history: &EmployeeHistory, today: NaiveDate) -> HealthAssessment {
        let morality = morality(history, today, &self.config);
        let engagement = engagement(history, today, &self.config);
        let retention_risk = retention_risk(history, today, &self.config);
        let culture = culture(history, today, &self.config);

        let health_score = 0.25 * f64::from(morality.total)
            + 0.25 * f64::from(engagement.total)
            + 0.25 * (100.0 - f64::from(retention_risk.total))
            + 0.25 * f64::from(culture.total);
        let level = InterventionLevel::from_health(health_score, &self.config);

        let defaulted = morality.defaulted_parts()
            + engagement.defaulted_parts()
            + retention_risk.defaulted_parts()
            + culture.defaulted_parts();
        debug!(
            employee_id = %history.employee_id,
            health_score,
            level = level.label(),
            defaulted_parts = defaulted,
            "assessed employee health"
        );

        HealthAssessment {
            employee_id: history.employee_id.clone(),
            assessed_on: today,
            morality,
            engagement,
            retention_risk,
            culture,
            health_score,
            level,
        }
    }
}
