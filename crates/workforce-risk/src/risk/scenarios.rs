use super::binning::{RiskTier, TierProfile};
use super::components::Component;
use serde::Serialize;

/// Separator used when joining matched concerns into one string.
pub const CONCERN_SEPARATOR: &str = "; ";

/// Named intervention scenarios, in catalogue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    LowVibe,
    PoorPerformance,
    BehavioralRedFlags,
    LowEngagement,
    HighWorkHours,
    ModerateIssues,
    TopTalent,
}

impl Scenario {
    pub const ALL: [Scenario; 7] = [
        Scenario::LowVibe,
        Scenario::PoorPerformance,
        Scenario::BehavioralRedFlags,
        Scenario::LowEngagement,
        Scenario::HighWorkHours,
        Scenario::ModerateIssues,
        Scenario::TopTalent,
    ];

    pub fn id(self) -> u8 {
        match self {
            Scenario::LowVibe => 1,
            Scenario::PoorPerformance => 2,
            Scenario::BehavioralRedFlags => 3,
            Scenario::LowEngagement => 4,
            Scenario::HighWorkHours => 5,
            Scenario::ModerateIssues => 6,
            Scenario::TopTalent => 7,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Scenario::LowVibe => "Low Vibe Score",
            Scenario::PoorPerformance => "Poor Performance",
            Scenario::BehavioralRedFlags => "Behavioral Red Flags",
            Scenario::LowEngagement => "Low Engagement",
            Scenario::HighWorkHours => "High Work Hours",
            Scenario::ModerateIssues => "Moderate Issues",
            Scenario::TopTalent => "Happy Employee",
        }
    }

    pub fn concern(self) -> &'static str {
        match self {
            Scenario::LowVibe => "Retaining talent and addressing dissatisfaction early",
            Scenario::PoorPerformance => {
                "Maintaining productivity and ensuring employees meet goals"
            }
            Scenario::BehavioralRedFlags => {
                "Reducing absenteeism and ensuring smooth onboarding processes"
            }
            Scenario::LowEngagement => "Building a culture of support and reducing turnover risk",
            Scenario::HighWorkHours => {
                "Preventing burnout to maintain long-term productivity and well-being"
            }
            Scenario::ModerateIssues => "Preventing moderate risks from turning into high risks",
            Scenario::TopTalent => {
                "Retaining top talent and fostering resilience in high performers"
            }
        }
    }

    /// Conjunction of tier equalities that triggers the scenario.
    pub fn conditions(self) -> &'static [(Component, RiskTier)] {
        use Component::*;
        use RiskTier::*;

        match self {
            Scenario::LowVibe => &[(Vibe, Low)],
            Scenario::PoorPerformance => &[(Performance, Low)],
            Scenario::BehavioralRedFlags => &[(Behavioral, High)],
            Scenario::LowEngagement => &[(Engagement, Low), (Performance, Low)],
            Scenario::HighWorkHours => &[(WorkHours, High), (Performance, Low)],
            Scenario::ModerateIssues => &[
                (Performance, Moderate),
                (Vibe, Moderate),
                (Engagement, Moderate),
                (WorkHours, Moderate),
            ],
            Scenario::TopTalent => &[
                (Performance, High),
                (Engagement, High),
                (Vibe, High),
                (Behavioral, Low),
            ],
        }
    }

    /// Never matches when any referenced tier is unknown.
    pub fn matches(self, tiers: &TierProfile) -> bool {
        let conditions = self.conditions();
        if conditions
            .iter()
            .any(|(component, _)| !tiers.get(*component).is_known())
        {
            return false;
        }

        conditions
            .iter()
            .all(|(component, tier)| tiers.get(*component) == *tier)
    }
}

/// Scenarios an employee matched, kept in catalogue order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ScenarioMatch {
    pub scenarios: Vec<Scenario>,
}

impl ScenarioMatch {
    pub fn flagged(&self) -> bool {
        !self.scenarios.is_empty()
    }

    pub fn concern_text(&self) -> String {
        self.scenarios
            .iter()
            .map(|scenario| scenario.concern())
            .collect::<Vec<_>>()
            .join(CONCERN_SEPARATOR)
    }

    pub fn contains(&self, scenario: Scenario) -> bool {
        self.scenarios.contains(&scenario)
    }
}

pub fn evaluate_scenarios(tiers: &TierProfile) -> ScenarioMatch {
    ScenarioMatch {
        scenarios: Scenario::ALL
            .iter()
            .copied()
            .filter(|scenario| scenario.matches(tiers))
            .collect(),
    }
}
