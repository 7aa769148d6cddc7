//! Population-wide percentile thresholds and per-component risk tiers.
//!
//! Thresholds depend on every employee in the batch, so they must be computed
//! from the full population before any single employee is classified.

use super::components::{Component, ComponentScores};
use serde::{Deserialize, Serialize};

/// Tier of a component value relative to the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Moderate,
    High,
    /// No data for this component.
    #[default]
    #[serde(rename = "")]
    Unknown,
}

impl RiskTier {
    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Moderate => "Moderate",
            RiskTier::High => "High",
            RiskTier::Unknown => "",
        }
    }

    pub fn is_known(self) -> bool {
        self != RiskTier::Unknown
    }
}

/// Linear-interpolation percentile over an ascending slice, `pct` in `[0, 100]`.
pub fn percentile(sorted: &[f64], pct: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }

    let rank = (pct.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// The 0th, 25th, 75th and 100th percentiles of one component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub p0: f64,
    pub p25: f64,
    pub p75: f64,
    pub p100: f64,
}

impl Thresholds {
    /// Returns `None` when no value is present; NaN values are ignored.
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted: Vec<f64> = values.into_iter().filter(|value| !value.is_nan()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        Some(Self {
            p0: percentile(&sorted, 0.0)?,
            p25: percentile(&sorted, 25.0)?,
            p75: percentile(&sorted, 75.0)?,
            p100: percentile(&sorted, 100.0)?,
        })
    }

    /// `value <= p25` is Low, `p25 < value <= p75` is Moderate, above is High.
    pub fn classify(&self, value: Option<f64>) -> RiskTier {
        match value {
            None => RiskTier::Unknown,
            Some(value) if value.is_nan() => RiskTier::Unknown,
            Some(value) if value <= self.p25 => RiskTier::Low,
            Some(value) if value <= self.p75 => RiskTier::Moderate,
            Some(_) => RiskTier::High,
        }
    }
}

/// Per-component thresholds for one population snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PopulationThresholds {
    pub performance: Option<Thresholds>,
    pub behavioral: Option<Thresholds>,
    pub engagement: Option<Thresholds>,
    pub work_hours: Option<Thresholds>,
    pub vibe: Option<Thresholds>,
}

impl PopulationThresholds {
    pub fn from_scores<'a, I>(scores: I) -> Self
    where
        I: IntoIterator<Item = &'a ComponentScores>,
    {
        let scores: Vec<&ComponentScores> = scores.into_iter().collect();
        let component = |component: Component| {
            Thresholds::from_values(
                scores
                    .iter()
                    .filter_map(|score| score.get(component).value()),
            )
        };

        Self {
            performance: component(Component::Performance),
            behavioral: component(Component::Behavioral),
            engagement: component(Component::Engagement),
            work_hours: component(Component::WorkHours),
            vibe: component(Component::Vibe),
        }
    }

    pub fn get(&self, component: Component) -> Option<Thresholds> {
        match component {
            Component::Performance => self.performance,
            Component::Behavioral => self.behavioral,
            Component::Engagement => self.engagement,
            Component::WorkHours => self.work_hours,
            Component::Vibe => self.vibe,
        }
    }

    /// Components with no data anywhere in the population yield Unknown for everyone.
    pub fn classify(&self, scores: &ComponentScores) -> TierProfile {
        let tier = |component: Component| match self.get(component) {
            Some(thresholds) => thresholds.classify(scores.get(component).value()),
            None => RiskTier::Unknown,
        };

        TierProfile {
            performance: tier(Component::Performance),
            behavioral: tier(Component::Behavioral),
            engagement: tier(Component::Engagement),
            work_hours: tier(Component::WorkHours),
            vibe: tier(Component::Vibe),
        }
    }
}

/// One employee's five tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TierProfile {
    pub performance: RiskTier,
    pub behavioral: RiskTier,
    pub engagement: RiskTier,
    pub work_hours: RiskTier,
    pub vibe: RiskTier,
}

impl TierProfile {
    pub fn get(&self, component: Component) -> RiskTier {
        match component {
            Component::Performance => self.performance,
            Component::Behavioral => self.behavioral,
            Component::Engagement => self.engagement,
            Component::WorkHours => self.work_hours,
            Component::Vibe => self.vibe,
        }
    }
}
