//! Population risk scoring: component scorer, composite calculator, percentile
//! binner, and scenario evaluator, plus the batch storage seam and HTTP router.

pub(crate) mod binning;
pub(crate) mod components;
pub(crate) mod composite;
pub mod engine;
pub mod export;
pub mod repository;
pub mod router;
pub(crate) mod scenarios;
pub mod service;
pub(crate) mod signals;
pub(crate) mod summary;
pub mod weights;

#[cfg(test)]
mod tests;

pub use binning::{percentile, PopulationThresholds, RiskTier, Thresholds, TierProfile};
pub use components::{score_components, Component, ComponentScore, ComponentScores};
pub use composite::{composite_score, CompositeScore};
pub use engine::{
    ComponentAssessment, EmployeeRiskProfile, PopulationReport, RiskEngine, ScoredSignals,
};
pub use export::write_results_csv;
pub use repository::{BatchOverview, RepositoryError, RiskProfileRepository};
pub use router::{risk_router, BatchRequest};
pub use scenarios::{evaluate_scenarios, Scenario, ScenarioMatch, CONCERN_SEPARATOR};
pub use service::{BatchReceipt, RiskScoringService, RiskServiceError};
pub use signals::{coerce_flag, EmployeeId, EmployeeSignalRecord, SignalError};
pub use summary::{PopulationSummary, ScenarioCount, TierDistribution};
pub use weights::{
    parse_component_weights, NormalizationScales, ScoringConfig, ScoringWeights, WeightsError,
};
