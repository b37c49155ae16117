pub mod data_integrity;
pub mod driver_compliance;
pub mod engine;
pub mod maintenance;
pub mod ranking;

pub use engine::AlertEngine;
pub use ranking::{rank_maintenance_risk, MaintenanceEntry, MaintenanceRanking};

use crate::logic::policy::ScoringPolicy;
use crate::models::{FleetAlert, FleetSnapshot};
use chrono::NaiveDate;

/// Inputs shared by every rule during one evaluation.
pub struct AlertContext<'a> {
    pub policy: &'a ScoringPolicy,
    pub today: NaiveDate,
    /// Computed once per evaluation and shared by the vehicle rules.
    pub maintenance: MaintenanceRanking,
}

impl<'a> AlertContext<'a> {
    pub fn new(snapshot: &FleetSnapshot, policy: &'a ScoringPolicy, today: NaiveDate) -> Self {
        Self {
            policy,
            today,
            maintenance: rank_maintenance_risk(snapshot, policy),
        }
    }
}

/// Trait for fleet alert rules
pub trait AlertRule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule and return one alert per flagged subject
    fn evaluate(&self, snapshot: &FleetSnapshot, ctx: &AlertContext<'_>) -> Vec<FleetAlert>;
}
