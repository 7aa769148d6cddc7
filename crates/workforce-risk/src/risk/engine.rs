use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info};

use super::binning::{PopulationThresholds, RiskTier, TierProfile};
use super::components::{score_components, Component, ComponentScores};
use super::composite::{composite_score, CompositeScore};
use super::scenarios::{evaluate_scenarios, Scenario};
use super::signals::{EmployeeId, EmployeeSignalRecord, SignalError};
use super::summary::PopulationSummary;
use super::weights::ScoringConfig;

/// Stateless engine applying one scoring configuration to population snapshots.
#[derive(Debug, Clone)]
pub struct RiskEngine {
    config: ScoringConfig,
}

/// Population-independent part of an employee's score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSignals {
    pub employee_id: EmployeeId,
    pub components: ComponentScores,
    pub composite: CompositeScore,
}

/// Value and tier of one component for one employee.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentAssessment {
    pub component: Component,
    pub value: Option<f64>,
    pub tier: RiskTier,
}

/// Everything the engine derives for one employee in a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeRiskProfile {
    pub employee_id: EmployeeId,
    pub components: Vec<ComponentAssessment>,
    pub crs: f64,
    pub crr: f64,
    pub scenarios: Vec<Scenario>,
    pub concern: String,
    pub flagged: bool,
}

impl EmployeeRiskProfile {
    fn assessment(&self, component: Component) -> Option<&ComponentAssessment> {
        self.components
            .iter()
            .find(|assessment| assessment.component == component)
    }

    pub fn tier(&self, component: Component) -> RiskTier {
        self.assessment(component)
            .map(|assessment| assessment.tier)
            .unwrap_or_default()
    }

    pub fn value(&self, component: Component) -> Option<f64> {
        self.assessment(component)
            .and_then(|assessment| assessment.value)
    }

    pub fn tiers(&self) -> TierProfile {
        TierProfile {
            performance: self.tier(Component::Performance),
            behavioral: self.tier(Component::Behavioral),
            engagement: self.tier(Component::Engagement),
            work_hours: self.tier(Component::WorkHours),
            vibe: self.tier(Component::Vibe),
        }
    }
}

/// Result of one full-population scoring pass. Replaces any earlier report wholesale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationReport {
    pub employees: Vec<EmployeeRiskProfile>,
    pub thresholds: PopulationThresholds,
    pub summary: PopulationSummary,
}

impl PopulationReport {
    pub fn employee(&self, employee_id: &str) -> Option<&EmployeeRiskProfile> {
        self.employees
            .iter()
            .find(|profile| profile.employee_id.as_str() == employee_id)
    }
}

impl RiskEngine {
    /// `ScoringConfig` can only be built validated, so the engine takes it as is.
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn standard() -> Self {
        Self::new(ScoringConfig::standard())
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Component values and composite for one employee; needs no population context.
    pub fn score_record(&self, record: &EmployeeSignalRecord) -> ScoredSignals {
        let components = score_components(record, &self.config);
        let composite = composite_score(&components, self.config.weights());

        ScoredSignals {
            employee_id: record.employee_id.clone(),
            components,
            composite,
        }
    }

    /// Scores every employee, then derives thresholds from the whole population,
    /// then classifies. Classification never starts before all values are known.
    pub fn score_population(
        &self,
        records: &[EmployeeSignalRecord],
    ) -> Result<PopulationReport, SignalError> {
        ensure_unique_ids(records)?;
        info!(population = records.len(), "scoring population snapshot");

        let scored: Vec<ScoredSignals> = records
            .iter()
            .map(|record| self.score_record(record))
            .collect();

        let thresholds =
            PopulationThresholds::from_scores(scored.iter().map(|entry| &entry.components));
        for component in Component::ALL {
            if thresholds.get(component).is_none() {
                debug!(
                    component = component.code(),
                    "no employee has data for component; tiers left unknown"
                );
            }
        }

        let employees: Vec<EmployeeRiskProfile> = scored
            .into_iter()
            .map(|entry| classify(entry, &thresholds))
            .collect();
        let summary = PopulationSummary::from_profiles(&employees);

        info!(
            population = summary.total_employees,
            flagged = summary.flagged_employees,
            "population scoring complete"
        );

        Ok(PopulationReport {
            employees,
            thresholds,
            summary,
        })
    }
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self::standard()
    }
}

fn ensure_unique_ids(records: &[EmployeeSignalRecord]) -> Result<(), SignalError> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if record.employee_id.as_str().trim().is_empty() {
            return Err(SignalError::MissingEmployeeId);
        }
        if !seen.insert(record.employee_id.as_str()) {
            return Err(SignalError::DuplicateEmployee(record.employee_id.clone()));
        }
    }
    Ok(())
}

fn classify(entry: ScoredSignals, thresholds: &PopulationThresholds) -> EmployeeRiskProfile {
    let tiers = thresholds.classify(&entry.components);
    let matched = evaluate_scenarios(&tiers);

    let components = entry
        .components
        .iter()
        .map(|(component, score)| ComponentAssessment {
            component,
            value: score.value(),
            tier: tiers.get(component),
        })
        .collect();

    EmployeeRiskProfile {
        employee_id: entry.employee_id,
        components,
        crs: entry.composite.crs,
        crr: entry.composite.crr,
        concern: matched.concern_text(),
        flagged: matched.flagged(),
        scenarios: matched.scenarios,
    }
}
