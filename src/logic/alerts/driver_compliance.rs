use super::{AlertContext, AlertRule};
use crate::models::{AlertCategory, DriverStatus, FleetAlert, FleetSnapshot, Severity};

/// Driver license and suspension rule
///
/// - License already expired: Critical, the driver cannot be dispatched
/// - License expiring within the warning window: Advisory
/// - Suspended driver: Warning
pub struct DriverComplianceRule;

impl AlertRule for DriverComplianceRule {
    fn id(&self) -> &'static str {
        "driver_compliance"
    }

    fn name(&self) -> &'static str {
        "Driver Compliance"
    }

    fn evaluate(&self, snapshot: &FleetSnapshot, ctx: &AlertContext<'_>) -> Vec<FleetAlert> {
        let mut alerts = Vec::new();

        for driver in &snapshot.drivers {
            let days_left = driver.days_until_expiry(ctx.today);

            if driver.license_expired(ctx.today) {
                alerts.push(
                    FleetAlert::new(
                        AlertCategory::DriverCompliance,
                        Severity::Critical,
                        &driver.id,
                        format!("{}: license expired", driver.name),
                        format!(
                            "{} license expired on {} ({} days ago)",
                            driver.license_category, driver.license_expiry, -days_left
                        ),
                    )
                    .with_data_point("License Expiry", driver.license_expiry)
                    .with_data_point("Status", driver.status)
                    .with_action("Block dispatch until the license is renewed."),
                );
            } else if days_left < ctx.policy.license_warning_days {
                alerts.push(
                    FleetAlert::new(
                        AlertCategory::DriverCompliance,
                        Severity::Advisory,
                        &driver.id,
                        format!("{}: license expiring soon", driver.name),
                        format!(
                            "{} license expires on {} ({} days left)",
                            driver.license_category, driver.license_expiry, days_left
                        ),
                    )
                    .with_data_point("License Expiry", driver.license_expiry)
                    .with_data_point("Days Left", days_left)
                    .with_action("Start the renewal process."),
                );
            }

            if driver.status == DriverStatus::Suspended {
                let mut alert = FleetAlert::new(
                    AlertCategory::DriverCompliance,
                    Severity::Warning,
                    &driver.id,
                    format!("{}: suspended", driver.name),
                    "Driver is suspended and cannot be assigned to trips",
                )
                .with_data_point("Safety Score", driver.safety_score);
                // one id per alert even when the same driver is also flagged for the license
                alert.id = format!("{}:suspended", alert.id);
                alerts.push(alert);
            }
        }

        alerts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{date, demo_snapshot};
    use crate::logic::policy::ScoringPolicy;

    fn alerts_on(day: chrono::NaiveDate) -> Vec<FleetAlert> {
        let snapshot = demo_snapshot();
        let policy = ScoringPolicy::default();
        let ctx = AlertContext::new(&snapshot, &policy, day);
        DriverComplianceRule.evaluate(&snapshot, &ctx)
    }

    #[test]
    fn flags_expired_and_suspended_drivers() {
        let alerts = alerts_on(date(2026, 2, 21));

        let expired: Vec<&str> = alerts
            .iter()
            .filter(|a| a.severity == Severity::Critical)
            .map(|a| a.subject_id.as_str())
            .collect();
        assert_eq!(expired, vec!["DR-002", "DR-004"]);

        let suspended: Vec<&str> = alerts
            .iter()
            .filter(|a| a.severity == Severity::Warning)
            .map(|a| a.subject_id.as_str())
            .collect();
        assert_eq!(suspended, vec!["DR-004"]);

        assert!(alerts.iter().all(|a| a.severity != Severity::Advisory));
    }

    #[test]
    fn flags_license_expiring_within_window() {
        let alerts = alerts_on(date(2026, 6, 1));

        let expiring: Vec<&FleetAlert> = alerts
            .iter()
            .filter(|a| a.severity == Severity::Advisory)
            .collect();
        assert_eq!(expiring.len(), 1);
        assert_eq!(expiring[0].subject_id, "DR-001");
        assert!(expiring[0].description.contains("75 days left"));
    }

    #[test]
    fn license_is_critical_on_its_expiry_date() {
        let on_expiry = alerts_on(date(2026, 8, 15));
        let dr1 = on_expiry.iter().find(|a| a.subject_id == "DR-001").unwrap();
        assert_eq!(dr1.severity, Severity::Critical);
        assert!(dr1.description.contains("(0 days ago)"));

        let day_before = alerts_on(date(2026, 8, 14));
        let dr1 = day_before
            .iter()
            .find(|a| a.subject_id == "DR-001")
            .unwrap();
        assert_eq!(dr1.severity, Severity::Advisory);
        assert!(dr1.description.contains("1 days left"));
    }

    #[test]
    fn alert_ids_are_unique() {
        let alerts = alerts_on(date(2026, 2, 21));
        let mut ids: Vec<&str> = alerts.iter().map(|a| a.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), alerts.len());
    }
}
