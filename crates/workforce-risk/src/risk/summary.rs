use super::binning::RiskTier;
use super::components::Component;
use super::engine::EmployeeRiskProfile;
use super::scenarios::Scenario;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioCount {
    pub scenario_id: u8,
    pub title: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierDistribution {
    pub component: Component,
    pub low: usize,
    pub moderate: usize,
    pub high: usize,
    pub unknown: usize,
}

/// Headline statistics for one scored population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationSummary {
    pub total_employees: usize,
    pub flagged_employees: usize,
    pub flagged_pct: f64,
    pub scenario_counts: Vec<ScenarioCount>,
    pub tier_distribution: Vec<TierDistribution>,
}

impl PopulationSummary {
    pub fn from_profiles(profiles: &[EmployeeRiskProfile]) -> Self {
        let total_employees = profiles.len();
        let flagged_employees = profiles.iter().filter(|profile| profile.flagged).count();
        let flagged_pct = if total_employees > 0 {
            flagged_employees as f64 / total_employees as f64 * 100.0
        } else {
            0.0
        };

        let scenario_counts = Scenario::ALL
            .iter()
            .map(|scenario| ScenarioCount {
                scenario_id: scenario.id(),
                title: scenario.title().to_string(),
                count: profiles
                    .iter()
                    .filter(|profile| profile.scenarios.contains(scenario))
                    .count(),
            })
            .collect();

        let tier_distribution = Component::ALL
            .iter()
            .map(|component| {
                let mut distribution = TierDistribution {
                    component: *component,
                    low: 0,
                    moderate: 0,
                    high: 0,
                    unknown: 0,
                };
                for profile in profiles {
                    match profile.tier(*component) {
                        RiskTier::Low => distribution.low += 1,
                        RiskTier::Moderate => distribution.moderate += 1,
                        RiskTier::High => distribution.high += 1,
                        RiskTier::Unknown => distribution.unknown += 1,
                    }
                }
                distribution
            })
            .collect();

        Self {
            total_employees,
            flagged_employees,
            flagged_pct,
            scenario_counts,
            tier_distribution,
        }
    }

    pub fn scenario_count(&self, scenario: Scenario) -> usize {
        self.scenario_counts
            .iter()
            .find(|entry| entry.scenario_id == scenario.id())
            .map(|entry| entry.count)
            .unwrap_or(0)
    }
}
