use super::signals::EmployeeSignalRecord;
use super::weights::ScoringConfig;
use serde::{Deserialize, Serialize};

/// The five signal groups scored independently for every employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Component {
    #[serde(rename = "P")]
    Performance,
    #[serde(rename = "B")]
    Behavioral,
    #[serde(rename = "E")]
    Engagement,
    #[serde(rename = "W")]
    WorkHours,
    #[serde(rename = "V")]
    Vibe,
}

impl Component {
    pub const ALL: [Component; 5] = [
        Component::Performance,
        Component::Behavioral,
        Component::Engagement,
        Component::WorkHours,
        Component::Vibe,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Component::Performance => "P",
            Component::Behavioral => "B",
            Component::Engagement => "E",
            Component::WorkHours => "W",
            Component::Vibe => "V",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Component::Performance => "Performance",
            Component::Behavioral => "Behavioral",
            Component::Engagement => "Engagement",
            Component::WorkHours => "Work Hours",
            Component::Vibe => "Vibe Score",
        }
    }
}

/// Normalized component value; `None` means no underlying data, which is distinct from 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentScore {
    value: Option<f64>,
    available: bool,
}

impl ComponentScore {
    pub fn measured(value: f64) -> Self {
        Self {
            value: Some(value),
            available: true,
        }
    }

    pub fn missing() -> Self {
        Self {
            value: None,
            available: false,
        }
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn is_available(&self) -> bool {
        self.available
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentScores {
    pub performance: ComponentScore,
    pub behavioral: ComponentScore,
    pub engagement: ComponentScore,
    pub work_hours: ComponentScore,
    pub vibe: ComponentScore,
}

impl ComponentScores {
    pub fn get(&self, component: Component) -> ComponentScore {
        match component {
            Component::Performance => self.performance,
            Component::Behavioral => self.behavioral,
            Component::Engagement => self.engagement,
            Component::WorkHours => self.work_hours,
            Component::Vibe => self.vibe,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Component, ComponentScore)> + '_ {
        Component::ALL
            .iter()
            .map(move |component| (*component, self.get(*component)))
    }
}

/// Sum of sub-weighted fractions for one component. Sub-inputs that are absent
/// contribute nothing and the remaining ones are not rescaled.
#[derive(Default)]
struct WeightedParts {
    value: f64,
    available: bool,
}

impl WeightedParts {
    fn add(&mut self, weight: f64, normalized: Option<f64>) {
        if let Some(normalized) = normalized {
            self.value += weight * normalized;
            self.available = true;
        }
    }

    fn finish(self) -> ComponentScore {
        if self.available {
            ComponentScore::measured(self.value)
        } else {
            ComponentScore::missing()
        }
    }
}

fn flag_value(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

pub fn score_components(record: &EmployeeSignalRecord, config: &ScoringConfig) -> ComponentScores {
    ComponentScores {
        performance: performance(record, config),
        behavioral: behavioral(record, config),
        engagement: engagement(record, config),
        work_hours: capped_ratio(record.avg_work_hours, config.scales().work_hours_scale),
        vibe: capped_ratio(record.avg_vibe_score, config.scales().vibe_scale),
    }
}

fn performance(record: &EmployeeSignalRecord, config: &ScoringConfig) -> ComponentScore {
    let mut parts = WeightedParts::default();
    parts.add(
        config.weights().rating_in_performance,
        record
            .performance_rating
            .map(|rating| rating / config.scales().rating_scale),
    );
    parts.add(
        config.weights().awards_in_performance,
        record
            .reward_points
            .map(|points| points / config.scales().reward_points_scale),
    );
    parts.finish()
}

fn behavioral(record: &EmployeeSignalRecord, config: &ScoringConfig) -> ComponentScore {
    let cap = config.scales().leave_day_cap;
    let mut parts = WeightedParts::default();
    // fewer leave days and no onboarding concern both score higher
    parts.add(
        config.weights().leave_in_behavioral,
        record
            .total_leave_days
            .map(|days| 1.0 - days.min(cap) / cap),
    );
    parts.add(
        config.weights().concern_in_behavioral,
        record
            .onboarding_concern_flag
            .map(|concern| 1.0 - flag_value(concern)),
    );
    parts.finish()
}

fn engagement(record: &EmployeeSignalRecord, config: &ScoringConfig) -> ComponentScore {
    let mut parts = WeightedParts::default();
    parts.add(
        config.weights().mentor_in_engagement,
        record.mentor_assigned.map(flag_value),
    );
    parts.add(
        config.weights().training_in_engagement,
        record.initial_training_completed.map(flag_value),
    );
    parts.finish()
}

fn capped_ratio(value: Option<f64>, scale: f64) -> ComponentScore {
    match value {
        Some(value) => ComponentScore::measured((value / scale).min(1.0)),
        None => ComponentScore::missing(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::signals::EmployeeId;

    const EPSILON: f64 = 1e-12;

    fn record() -> EmployeeSignalRecord {
        EmployeeSignalRecord::empty(EmployeeId("EMP0001".to_string()))
    }

    fn value(score: ComponentScore) -> f64 {
        score.value().expect("component has data")
    }

    #[test]
    fn perfect_inputs_score_one_everywhere() {
        let mut record = record();
        record.performance_rating = Some(4.0);
        record.reward_points = Some(1516.0);
        record.total_leave_days = Some(0.0);
        record.onboarding_concern_flag = Some(false);
        record.mentor_assigned = Some(true);
        record.initial_training_completed = Some(true);
        record.avg_work_hours = Some(10.0);
        record.avg_vibe_score = Some(5.0);

        let scores = score_components(&record, &ScoringConfig::standard());
        for (component, score) in scores.iter() {
            assert!(
                (value(score) - 1.0).abs() < EPSILON,
                "{} should be 1.0",
                component.label()
            );
        }
    }

    #[test]
    fn missing_inputs_are_not_zero() {
        let scores = score_components(&record(), &ScoringConfig::standard());
        for (_, score) in scores.iter() {
            assert!(!score.is_available());
            assert!(score.value().is_none());
        }
    }

    #[test]
    fn partial_performance_data_is_not_renormalized() {
        let mut record = record();
        record.performance_rating = Some(4.0);

        let scores = score_components(&record, &ScoringConfig::standard());
        // awards absent: the rating share alone caps the component at 0.6
        assert!((value(scores.performance) - 0.6).abs() < EPSILON);
    }

    #[test]
    fn leave_days_are_capped_and_inverted() {
        let mut record = record();
        record.total_leave_days = Some(62.0);
        let scores = score_components(&record, &ScoringConfig::standard());
        assert!(value(scores.behavioral).abs() < EPSILON);

        record.total_leave_days = Some(15.5);
        record.onboarding_concern_flag = Some(true);
        let scores = score_components(&record, &ScoringConfig::standard());
        assert!((value(scores.behavioral) - 0.35).abs() < EPSILON);
    }

    #[test]
    fn concern_flag_alone_makes_behavioral_available() {
        let mut record = record();
        record.onboarding_concern_flag = Some(true);
        let scores = score_components(&record, &ScoringConfig::standard());
        assert!(scores.behavioral.is_available());
        assert!(value(scores.behavioral).abs() < EPSILON);
    }

    #[test]
    fn engagement_counts_mentor_and_training_directly() {
        let mut record = record();
        record.mentor_assigned = Some(true);
        record.initial_training_completed = Some(false);
        let scores = score_components(&record, &ScoringConfig::standard());
        assert!((value(scores.engagement) - 0.5).abs() < EPSILON);
    }

    #[test]
    fn work_hours_and_vibe_are_capped_at_one() {
        let mut record = record();
        record.avg_work_hours = Some(14.0);
        record.avg_vibe_score = Some(2.5);
        let scores = score_components(&record, &ScoringConfig::standard());
        assert!((value(scores.work_hours) - 1.0).abs() < EPSILON);
        assert!((value(scores.vibe) - 0.5).abs() < EPSILON);
    }

    #[test]
    fn over_scale_awards_can_exceed_one() {
        let mut record = record();
        record.performance_rating = Some(4.0);
        record.reward_points = Some(3032.0);
        let scores = score_components(&record, &ScoringConfig::standard());
        // sub-fractions are not clamped, only the single-input components are
        assert!((value(scores.performance) - 1.4).abs() < EPSILON);
    }
}
