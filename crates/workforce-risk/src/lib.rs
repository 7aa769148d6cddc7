//! Employee risk scoring.
//!
//! Two independent paths live here:
//!
//! * [`risk`] scores a whole population snapshot: five weighted components per
//!   employee, a composite risk score/ratio, percentile tiers computed across the
//!   population, and rule-based intervention scenarios.
//! * [`health`] assesses a single employee on demand from raw history and yields
//!   an HR intervention level without any population context.
//!
//! [`datasets`] adapts CSV/JSON exports into the engine's input records.

pub mod config;
pub mod datasets;
pub mod error;
pub mod health;
pub mod risk;
pub mod telemetry;
