use super::{AlertContext, AlertRule, MaintenanceEntry};
use crate::models::{AlertCategory, FleetAlert, FleetSnapshot, RiskBand, Severity};

/// Service interval rule
///
/// Flags every operational vehicle whose distance since the last service
/// exceeds the policy threshold. Escalates to Critical when the vehicle is
/// also in the high maintenance-risk band.
pub struct ServiceDueRule;

impl AlertRule for ServiceDueRule {
    fn id(&self) -> &'static str {
        "service_due"
    }

    fn name(&self) -> &'static str {
        "Service Due Soon"
    }

    fn evaluate(&self, _snapshot: &FleetSnapshot, ctx: &AlertContext<'_>) -> Vec<FleetAlert> {
        ctx.maintenance
            .service_due()
            .map(|entry| {
                let severity = if entry.band == RiskBand::High {
                    Severity::Critical
                } else {
                    Severity::Warning
                };

                with_maintenance_data(
                    FleetAlert::new(
                        AlertCategory::ServiceDue,
                        severity,
                        &entry.vehicle_id,
                        format!("{} due for service", entry.model),
                        format!(
                            "{:.0} km since last service (threshold {:.0} km)",
                            entry.distance_since_service_km, ctx.policy.service_due_threshold_km
                        ),
                    ),
                    entry,
                )
                .with_action("Schedule preventive maintenance before the next dispatch.")
            })
            .collect()
    }
}

/// High maintenance-risk rule
///
/// Covers vehicles in the high risk band that are not yet past the service
/// threshold: heavy use or poor fuel efficiency can push risk up before
/// the odometer does.
pub struct MaintenanceRiskRule;

impl AlertRule for MaintenanceRiskRule {
    fn id(&self) -> &'static str {
        "maintenance_risk"
    }

    fn name(&self) -> &'static str {
        "High Maintenance Risk"
    }

    fn evaluate(&self, _snapshot: &FleetSnapshot, ctx: &AlertContext<'_>) -> Vec<FleetAlert> {
        ctx.maintenance
            .entries
            .iter()
            .filter(|e| e.band == RiskBand::High && !e.service_due)
            .map(|entry| {
                with_maintenance_data(
                    FleetAlert::new(
                        AlertCategory::MaintenanceRisk,
                        Severity::Warning,
                        &entry.vehicle_id,
                        format!("{} at high maintenance risk", entry.model),
                        format!(
                            "Risk score {:.2} exceeds {:.2}",
                            entry.risk_score, ctx.policy.risk_bands.high_above
                        ),
                    ),
                    entry,
                )
                .with_action("Inspect the vehicle and review its recent trip load.")
            })
            .collect()
    }
}

fn with_maintenance_data(alert: FleetAlert, entry: &MaintenanceEntry) -> FleetAlert {
    alert
        .with_data_point(
            "Since Service",
            format!("{:.0} km", entry.distance_since_service_km),
        )
        .with_data_point("Risk Score", format!("{:.2}", entry.risk_score))
        .with_data_point("Risk Band", entry.band)
        .with_data_point("Status", entry.status)
}
