use super::components::ComponentScores;
use super::weights::ScoringWeights;
use serde::Serialize;

/// Counseling Risk Score and Ratio for one employee.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompositeScore {
    pub crs: f64,
    pub crr: f64,
    /// Sum of the global weights of components that had data.
    pub available_weight: f64,
}

pub fn composite_score(scores: &ComponentScores, weights: &ScoringWeights) -> CompositeScore {
    let mut crs = 0.0;
    let mut available_weight = 0.0;

    for (component, score) in scores.iter() {
        if let Some(value) = score.value() {
            let weight = weights.global(component);
            crs += weight * value;
            available_weight += weight;
        }
    }

    let crr = if available_weight > 0.0 {
        crs / available_weight
    } else {
        0.0
    };

    CompositeScore {
        crs,
        crr,
        available_weight,
    }
}
