//! Single-employee health assessment: morality, engagement, retention risk and
//! culture sub-scores combined into an HR intervention level. Needs no population
//! context and never fails; sparse history falls back to per-part defaults.

pub mod assessment;
pub mod config;
pub mod router;
pub(crate) mod scores;


pub use assessment::{HealthAssessment, HealthEvaluator, InterventionLevel, STALE_AFTER_DAYS};
pub use config::HealthConfig;
pub use router::{health_router, AssessmentRequest};
pub use scores::{ScorePart, SubScore};
