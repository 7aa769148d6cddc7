//! Immutable scoring configuration passed explicitly into the engine.

use super::components::Component;
use serde::{Deserialize, Serialize};

/// Tolerance used when checking that weight groups sum to one.
pub const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Global component weights plus the sub-weights that split each composite component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub performance: f64,
    pub behavioral: f64,
    pub engagement: f64,
    pub work_hours: f64,
    pub vibe: f64,
    pub rating_in_performance: f64,
    pub awards_in_performance: f64,
    pub leave_in_behavioral: f64,
    pub concern_in_behavioral: f64,
    pub mentor_in_engagement: f64,
    pub training_in_engagement: f64,
}

impl ScoringWeights {
    pub fn standard() -> Self {
        Self {
            performance: 0.20,
            behavioral: 0.25,
            engagement: 0.15,
            work_hours: 0.10,
            vibe: 0.30,
            rating_in_performance: 0.6,
            awards_in_performance: 0.4,
            leave_in_behavioral: 0.7,
            concern_in_behavioral: 0.3,
            mentor_in_engagement: 0.5,
            training_in_engagement: 0.5,
        }
    }

    /// Replaces the global weights, given in P, B, E, W, V order.
    pub fn with_component_weights(mut self, weights: [f64; 5]) -> Self {
        let [performance, behavioral, engagement, work_hours, vibe] = weights;
        self.performance = performance;
        self.behavioral = behavioral;
        self.engagement = engagement;
        self.work_hours = work_hours;
        self.vibe = vibe;
        self
    }

    pub fn global(&self, component: Component) -> f64 {
        match component {
            Component::Performance => self.performance,
            Component::Behavioral => self.behavioral,
            Component::Engagement => self.engagement,
            Component::WorkHours => self.work_hours,
            Component::Vibe => self.vibe,
        }
    }

    pub fn global_sum(&self) -> f64 {
        Component::ALL
            .iter()
            .map(|component| self.global(*component))
            .sum()
    }

    pub fn validate(&self) -> Result<(), WeightsError> {
        let named = [
            ("performance", self.performance),
            ("behavioral", self.behavioral),
            ("engagement", self.engagement),
            ("work_hours", self.work_hours),
            ("vibe", self.vibe),
            ("rating_in_performance", self.rating_in_performance),
            ("awards_in_performance", self.awards_in_performance),
            ("leave_in_behavioral", self.leave_in_behavioral),
            ("concern_in_behavioral", self.concern_in_behavioral),
            ("mentor_in_engagement", self.mentor_in_engagement),
            ("training_in_engagement", self.training_in_engagement),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(WeightsError::InvalidWeight { name, value });
            }
        }

        let sum = self.global_sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(WeightsError::ComponentSum { sum });
        }

        let pairs = [
            (
                Component::Performance,
                self.rating_in_performance + self.awards_in_performance,
            ),
            (
                Component::Behavioral,
                self.leave_in_behavioral + self.concern_in_behavioral,
            ),
            (
                Component::Engagement,
                self.mentor_in_engagement + self.training_in_engagement,
            ),
        ];
        for (component, sum) in pairs {
            if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
                return Err(WeightsError::SubWeightSum {
                    component: component.code(),
                    sum,
                });
            }
        }

        Ok(())
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::standard()
    }
}

/// Divisors and caps that map raw signals onto `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizationScales {
    pub rating_scale: f64,
    pub reward_points_scale: f64,
    pub leave_day_cap: f64,
    pub work_hours_scale: f64,
    pub vibe_scale: f64,
}

impl NormalizationScales {
    pub fn standard() -> Self {
        Self {
            rating_scale: 4.0,
            reward_points_scale: 1516.0,
            leave_day_cap: 31.0,
            work_hours_scale: 10.0,
            vibe_scale: 5.0,
        }
    }

    pub fn validate(&self) -> Result<(), WeightsError> {
        let named = [
            ("rating_scale", self.rating_scale),
            ("reward_points_scale", self.reward_points_scale),
            ("leave_day_cap", self.leave_day_cap),
            ("work_hours_scale", self.work_hours_scale),
            ("vibe_scale", self.vibe_scale),
        ];
        for (name, value) in named {
            if !value.is_finite() || value <= 0.0 {
                return Err(WeightsError::InvalidScale { name, value });
            }
        }
        Ok(())
    }
}

impl Default for NormalizationScales {
    fn default() -> Self {
        Self::standard()
    }
}

/// Everything the component scorer needs besides the record itself. Only built
/// through [`ScoringConfig::standard`] or the validating [`ScoringConfig::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct ScoringConfig {
    weights: ScoringWeights,
    scales: NormalizationScales,
}

impl ScoringConfig {
    pub fn standard() -> Self {
        Self {
            weights: ScoringWeights::standard(),
            scales: NormalizationScales::standard(),
        }
    }

    pub fn new(
        weights: ScoringWeights,
        scales: NormalizationScales,
    ) -> Result<Self, WeightsError> {
        let config = Self { weights, scales };
        config.validate()?;
        Ok(config)
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn scales(&self) -> &NormalizationScales {
        &self.scales
    }

    pub fn validate(&self) -> Result<(), WeightsError> {
        self.weights.validate()?;
        self.scales.validate()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightsError {
    #[error("weight '{name}' must be a finite, non-negative number (got {value})")]
    InvalidWeight { name: &'static str, value: f64 },
    #[error("component weights must sum to 1.0 (got {sum})")]
    ComponentSum { sum: f64 },
    #[error("sub-weights of component {component} must sum to 1.0 (got {sum})")]
    SubWeightSum { component: &'static str, sum: f64 },
    #[error("scale '{name}' must be a finite, positive number (got {value})")]
    InvalidScale { name: &'static str, value: f64 },
    #[error("expected 5 comma separated weights (P,B,E,W,V), got {0}")]
    WrongArity(usize),
    #[error("weight '{0}' is not a number")]
    Unparseable(String),
}

/// Parses `"0.2,0.25,0.15,0.1,0.3"` style overrides in P, B, E, W, V order.
pub fn parse_component_weights(raw: &str) -> Result<[f64; 5], WeightsError> {
    let parts: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();
    if parts.len() != 5 {
        return Err(WeightsError::WrongArity(parts.len()));
    }

    let mut weights = [0.0; 5];
    for (slot, part) in weights.iter_mut().zip(parts) {
        *slot = part
            .parse::<f64>()
            .map_err(|_| WeightsError::Unparseable(part.to_string()))?;
    }
    Ok(weights)
}
