use super::{AlertContext, AlertRule};
use crate::models::{AlertCategory, FleetAlert, FleetSnapshot, Severity, SnapshotIssueKind};

/// Surfaces snapshot records that the calculators refuse to score.
pub struct DataIntegrityRule;

impl AlertRule for DataIntegrityRule {
    fn id(&self) -> &'static str {
        "data_integrity"
    }

    fn name(&self) -> &'static str {
        "Data Integrity"
    }

    fn evaluate(&self, snapshot: &FleetSnapshot, _ctx: &AlertContext<'_>) -> Vec<FleetAlert> {
        snapshot
            .validate()
            .into_iter()
            .enumerate()
            .map(|(i, issue)| {
                let title = match issue.kind {
                    SnapshotIssueKind::Integrity => "Invalid record",
                    SnapshotIssueKind::DanglingReference => "Unresolved reference",
                };
                let mut alert = FleetAlert::new(
                    AlertCategory::DataIntegrity,
                    Severity::Critical,
                    &issue.record_id,
                    format!("{}: {}", title, issue.record_id),
                    issue.detail.clone(),
                )
                .with_action("Correct the record in the fleet data source.");
                alert.id = format!("{}:{}", alert.id, i);
                alert
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{date, demo_snapshot};
    use crate::logic::policy::ScoringPolicy;

    #[test]
    fn clean_snapshot_raises_nothing() {
        let snapshot = demo_snapshot();
        let policy = ScoringPolicy::default();
        let ctx = AlertContext::new(&snapshot, &policy, date(2026, 2, 21));
        assert!(DataIntegrityRule.evaluate(&snapshot, &ctx).is_empty());
    }

    #[test]
    fn broken_records_raise_critical_alerts() {
        let mut snapshot = demo_snapshot();
        snapshot.vehicles[2].acquisition_cost = 0.0;
        snapshot.maintenance_logs[0].vehicle_id = "VH-404".into();

        let policy = ScoringPolicy::default();
        let ctx = AlertContext::new(&snapshot, &policy, date(2026, 2, 21));
        let alerts = DataIntegrityRule.evaluate(&snapshot, &ctx);

        assert_eq!(alerts.len(), 2);
        assert!(alerts.iter().all(|a| a.severity == Severity::Critical));
        assert_eq!(alerts[0].subject_id, "VH-003");
        assert_eq!(alerts[1].subject_id, "MT-001");
        assert!(alerts[1].description.contains("VH-404"));
    }
}
