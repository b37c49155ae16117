use super::{
    data_integrity::DataIntegrityRule,
    driver_compliance::DriverComplianceRule,
    maintenance::{MaintenanceRiskRule, ServiceDueRule},
    AlertContext, AlertRule,
};
use crate::logic::policy::ScoringPolicy;
use crate::models::{FleetAlert, FleetSnapshot};
use chrono::NaiveDate;

pub struct AlertEngine {
    policy: ScoringPolicy,
    rules: Vec<Box<dyn AlertRule>>,
}

impl AlertEngine {
    pub fn new(policy: ScoringPolicy) -> Self {
        let rules: Vec<Box<dyn AlertRule>> = vec![
            Box::new(ServiceDueRule),
            Box::new(MaintenanceRiskRule),
            Box::new(DriverComplianceRule),
            Box::new(DataIntegrityRule),
        ];

        Self { policy, rules }
    }

    /// Run every rule; most severe alerts first.
    pub fn evaluate(&self, snapshot: &FleetSnapshot, today: NaiveDate) -> Vec<FleetAlert> {
        let ctx = AlertContext::new(snapshot, &self.policy, today);

        let mut alerts: Vec<FleetAlert> = self
            .rules
            .iter()
            .flat_map(|rule| {
                let alerts = rule.evaluate(snapshot, &ctx);
                tracing::debug!(rule = rule.id(), count = alerts.len(), "Evaluated alert rule");
                alerts
            })
            .collect();

        // stable: rule order is kept within a severity
        alerts.sort_by(|a, b| b.severity.cmp(&a.severity));
        alerts
    }

    pub fn evaluate_rule(
        &self,
        rule_id: &str,
        snapshot: &FleetSnapshot,
        today: NaiveDate,
    ) -> Option<Vec<FleetAlert>> {
        let rule = self.rules.iter().find(|r| r.id() == rule_id)?;
        let ctx = AlertContext::new(snapshot, &self.policy, today);
        Some(rule.evaluate(snapshot, &ctx))
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for AlertEngine {
    fn default() -> Self {
        Self::new(ScoringPolicy::default())
    }
}
