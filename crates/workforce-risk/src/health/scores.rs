//! The four bounded sub-scores. Each sub-score is a sum of named parts; a part that
//! lacked enough history reports the fallback it used through `defaulted`.

use chrono::NaiveDate;
use serde::Serialize;

use super::config::HealthConfig;
use crate::datasets::history::mean;
use crate::datasets::{ActivityEntry, EmployeeHistory, PerformanceReview, VibeEntry};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScorePart {
    pub name: &'static str,
    pub points: u32,
    pub max: u32,
    /// History was missing or too short; `points` is the fallback value.
    pub defaulted: bool,
}

impl ScorePart {
    fn measured(name: &'static str, points: u32, max: u32) -> Self {
        Self {
            name,
            points: points.min(max),
            max,
            defaulted: false,
        }
    }

    fn fallback(name: &'static str, points: u32, max: u32) -> Self {
        Self {
            name,
            points,
            max,
            defaulted: true,
        }
    }
}

/// A 0–100 score and the parts it was summed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubScore {
    pub total: u32,
    pub parts: Vec<ScorePart>,
}

impl SubScore {
    fn from_parts(parts: Vec<ScorePart>) -> Self {
        Self {
            total: parts.iter().map(|part| part.points).sum(),
            parts,
        }
    }

    pub fn part(&self, name: &str) -> Option<&ScorePart> {
        self.parts.iter().find(|part| part.name == name)
    }

    pub fn defaulted_parts(&self) -> usize {
        self.parts.iter().filter(|part| part.defaulted).count()
    }
}

/// Truncates toward zero and clamps negatives to zero.
fn whole(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.trunc() as u32
    } else {
        0
    }
}

fn activity_since(history: &EmployeeHistory, cutoff: NaiveDate) -> Vec<&ActivityEntry> {
    history
        .activity
        .iter()
        .filter(|entry| entry.date >= cutoff)
        .collect()
}

fn vibes_since(history: &EmployeeHistory, cutoff: NaiveDate) -> Vec<&VibeEntry> {
    history
        .vibes
        .iter()
        .filter(|entry| entry.date >= cutoff)
        .collect()
}

/// Newest first; later rows win ties on the same date.
fn newest_first<T>(mut entries: Vec<(usize, &T)>, date: impl Fn(&T) -> NaiveDate) -> Vec<&T> {
    entries.sort_by(|(left_index, left), (right_index, right)| {
        date(*right)
            .cmp(&date(*left))
            .then(right_index.cmp(left_index))
    });
    entries.into_iter().map(|(_, entry)| entry).collect()
}

pub(crate) fn morality(history: &EmployeeHistory, today: NaiveDate, config: &HealthConfig) -> SubScore {
    let cutoff = HealthConfig::cutoff(today, config.recent_window_days);

    let performance = match mean(history.reviews.iter().map(|review| review.rating)) {
        Some(average) => ScorePart::measured("performance", whole(average * 8.0), 40),
        None => ScorePart::fallback("performance", 0, 40),
    };

    let hours: Vec<f64> = activity_since(history, cutoff)
        .iter()
        .map(|entry| entry.work_hours)
        .collect();
    let consistency = if hours.len() >= config.min_hours_for_consistency {
        let average = hours.iter().sum::<f64>() / hours.len() as f64;
        let variance = hours
            .iter()
            .map(|value| (value - average).powi(2))
            .sum::<f64>()
            / hours.len() as f64;
        ScorePart::measured(
            "work_hour_consistency",
            whole(30.0 - (variance * 3.0).trunc()),
            30,
        )
    } else {
        ScorePart::fallback("work_hour_consistency", 30, 30)
    };

    let vibes = vibes_since(history, cutoff);
    let stability = if vibes.len() >= config.min_vibes_for_trend {
        let average = vibes.iter().map(|entry| entry.score).sum::<f64>() / vibes.len() as f64;
        ScorePart::measured("emotional_stability", whole(average * 3.0), 30)
    } else {
        ScorePart::fallback("emotional_stability", 15, 30)
    };

    SubScore::from_parts(vec![performance, consistency, stability])
}

pub(crate) fn engagement(
    history: &EmployeeHistory,
    today: NaiveDate,
    config: &HealthConfig,
) -> SubScore {
    let cutoff = HealthConfig::cutoff(today, config.recent_window_days);
    let activity = activity_since(history, cutoff);

    let communication = match (
        mean(activity.iter().map(|entry| f64::from(entry.teams_messages))),
        mean(activity.iter().map(|entry| f64::from(entry.emails))),
    ) {
        (Some(messages), Some(emails)) => {
            ScorePart::measured("communication", whole((messages + emails) * 1.5), 30)
        }
        _ => ScorePart::fallback("communication", 15, 30),
    };

    let meetings = match mean(activity.iter().map(|entry| f64::from(entry.meetings))) {
        Some(average) => ScorePart::measured("meetings", whole(average * 10.0), 20),
        None => ScorePart::fallback("meetings", 0, 20),
    };

    let tasks = if history.tasks.is_empty() {
        ScorePart::fallback("task_completion", 15, 30)
    } else {
        let completed = history.tasks.iter().filter(|task| task.completed).count();
        let rate = completed as f64 / history.tasks.len() as f64;
        ScorePart::measured("task_completion", whole(rate * 30.0), 30)
    };

    let recent_rewards = history
        .rewards
        .iter()
        .filter(|reward| reward.date >= cutoff)
        .count() as u32;
    let rewards = ScorePart::measured("rewards", recent_rewards.saturating_mul(10), 20);

    SubScore::from_parts(vec![communication, meetings, tasks, rewards])
}

/// Higher is worse.
pub(crate) fn retention_risk(
    history: &EmployeeHistory,
    today: NaiveDate,
    config: &HealthConfig,
) -> SubScore {
    let cutoff = HealthConfig::cutoff(today, config.retention_window_days);

    let leave_days: f64 = history
        .leaves
        .iter()
        .filter(|leave| leave.start >= cutoff)
        .map(|leave| leave.days)
        .sum();
    let leave = ScorePart::measured("leave_pattern", whole(leave_days * 1.5), 25);

    let mut reviews: Vec<(usize, &PerformanceReview)> = history.reviews.iter().enumerate().collect();
    reviews.sort_by(|(left_index, left), (right_index, right)| {
        right
            .review_period
            .cmp(&left.review_period)
            .then(right_index.cmp(left_index))
    });
    let performance = if reviews.len() >= config.min_reviews_for_trend.max(1) {
        // declining and improving reviews both reduce to the latest rating
        let current = reviews[0].1.rating;
        ScorePart::measured(
            "performance_trend",
            whole(25.0 - (current * 5.0).min(25.0)),
            25,
        )
    } else {
        ScorePart::fallback("performance_trend", 12, 25)
    };

    let vibes = newest_first(
        history
            .vibes
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.date >= cutoff)
            .collect(),
        |entry: &VibeEntry| entry.date,
    );
    let vibe = if vibes.len() >= config.min_vibes_for_trend.max(3) {
        let (newest, middle, oldest) = (vibes[0].score, vibes[1].score, vibes[2].score);
        let points = if newest < middle && middle < oldest {
            25
        } else if newest > middle && middle > oldest {
            5
        } else if (newest + middle + oldest) / 3.0 < 5.0 {
            20
        } else {
            12
        };
        ScorePart::measured("vibe_trend", points, 25)
    } else {
        ScorePart::fallback("vibe_trend", 12, 25)
    };

    let hours = newest_first(
        history
            .activity
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.date >= cutoff)
            .collect(),
        |entry: &ActivityEntry| entry.date,
    );
    let window = config.min_hours_for_trend.max(1);
    let work_hours = if hours.len() >= window {
        let recent = &hours[..window];
        let average = recent.iter().map(|entry| entry.work_hours).sum::<f64>() / recent.len() as f64;
        let points = if average < 7.0 {
            20
        } else if average > 10.0 {
            15
        } else {
            5
        };
        ScorePart::measured("work_hour_trend", points, 25)
    } else {
        ScorePart::fallback("work_hour_trend", 12, 25)
    };

    SubScore::from_parts(vec![leave, performance, vibe, work_hours])
}

pub(crate) fn culture(history: &EmployeeHistory, today: NaiveDate, config: &HealthConfig) -> SubScore {
    let cutoff = HealthConfig::cutoff(today, config.culture_window_days);
    let activity = activity_since(history, cutoff);

    let interaction = match (
        mean(activity.iter().map(|entry| f64::from(entry.teams_messages))),
        mean(activity.iter().map(|entry| f64::from(entry.meetings))),
    ) {
        (Some(messages), Some(meetings)) => ScorePart::measured(
            "team_interaction",
            whole(messages * 0.5 + meetings * 5.0),
            30,
        ),
        _ => ScorePart::fallback("team_interaction", 15, 30),
    };

    let vibe = match mean(vibes_since(history, cutoff).iter().map(|entry| entry.score)) {
        Some(average) => ScorePart::measured("vibe", whole(average * 4.0), 40),
        None => ScorePart::fallback("vibe", 0, 40),
    };

    let onboarding = match history.onboarding.first() {
        Some(entry) => {
            let mut points = 0;
            if entry.mentor_assigned {
                points += 15;
            }
            if entry.training_completed {
                points += 15;
            }
            ScorePart::measured("onboarding", points, 30)
        }
        None => ScorePart::fallback("onboarding", 15, 30),
    };

    SubScore::from_parts(vec![interaction, vibe, onboarding])
}
