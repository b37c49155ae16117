//! Plain-text rendering of engine results for the terminal.
//!
//! JSON output bypasses this module and serializes the values directly.

use crate::logic::alerts::MaintenanceRanking;
use crate::logic::reports::{
    DriverStanding, EmissionReport, FleetKpis, FuelExpenseReport, LicenseState, RoiRanking,
    VehicleProfile,
};
use crate::models::{FleetAlert, RecommendationReport, SkippedRecord, SnapshotIssue};
use std::fmt::Write;

pub fn recommendation(report: &RecommendationReport) -> String {
    let mut out = String::new();
    let _ = write!(out, "Recommendation for {:.0} kg", report.cargo_weight_kg);
    if let Some(vehicle_type) = &report.vehicle_type {
        let _ = write!(out, " ({})", vehicle_type);
    }
    out.push('\n');

    match report.empty_reason() {
        Some(reason) => {
            let _ = writeln!(out, "No recommendation: {}", reason.summary());
        }
        None => {
            let _ = writeln!(
                out,
                "{:<4} {:<8} {:<18} {:<14} {:>9} {:>6}  {:>5} {:>5} {:>5} {:>5}",
                "#", "ID", "Model", "Type", "Max kg", "Score", "Cap", "Fuel", "Mnt", "ROI"
            );
            for (i, v) in report.ranked().iter().enumerate() {
                let b = &v.score.breakdown;
                let _ = writeln!(
                    out,
                    "{:<4} {:<8} {:<18} {:<14} {:>9.0} {:>6.2}  {:>5.2} {:>5.2} {:>5.2} {:>5.2}",
                    i + 1,
                    v.vehicle_id,
                    v.model,
                    v.vehicle_type,
                    v.max_load_kg,
                    v.score.score,
                    b.capacity,
                    b.fuel,
                    b.maintenance,
                    b.roi
                );
            }
        }
    }

    push_skipped(&mut out, &report.skipped);
    out
}

pub fn maintenance(ranking: &MaintenanceRanking) -> String {
    let mut out = String::from("Maintenance risk\n");
    let _ = writeln!(
        out,
        "{:<8} {:<18} {:<10} {:>12} {:>6} {:<7} {}",
        "ID", "Model", "Status", "Since svc km", "Risk", "Band", "Due"
    );
    for e in &ranking.entries {
        let _ = writeln!(
            out,
            "{:<8} {:<18} {:<10} {:>12.0} {:>6.2} {:<7} {}",
            e.vehicle_id,
            e.model,
            e.status.as_str(),
            e.distance_since_service_km,
            e.risk_score,
            e.band.as_str(),
            if e.service_due { "yes" } else { "" }
        );
    }
    push_skipped(&mut out, &ranking.skipped);
    out
}

pub fn alerts(alerts: &[FleetAlert]) -> String {
    if alerts.is_empty() {
        return "No alerts\n".to_string();
    }

    let mut out = String::new();
    for alert in alerts {
        let _ = writeln!(
            out,
            "{} [{}] {} ({})",
            alert.severity.symbol(),
            alert.severity,
            alert.title,
            alert.category
        );
        let _ = writeln!(out, "    {}", alert.description);
        for dp in &alert.data_points {
            let _ = writeln!(out, "    {}: {}", dp.label, dp.value);
        }
        if let Some(action) = &alert.suggested_action {
            let _ = writeln!(out, "    -> {}", action);
        }
    }
    out
}

pub fn roi(ranking: &RoiRanking, fleet_roi_percent: Option<f64>, currency: &str) -> String {
    let mut out = String::from("Vehicle ROI\n");
    let _ = writeln!(
        out,
        "{:<8} {:<18} {:>7} {:>12} {:>12}",
        "ID",
        "Model",
        "ROI",
        format!("Fuel {}", currency),
        format!("Maint {}", currency)
    );
    for e in &ranking.entries {
        let _ = writeln!(
            out,
            "{:<8} {:<18} {:>7.2} {:>12.2} {:>12.2}",
            e.vehicle_id, e.model, e.roi, e.fuel_cost, e.maintenance_cost
        );
    }
    match fleet_roi_percent {
        Some(pct) => {
            let _ = writeln!(out, "Fleet ROI: {:.1}%", pct);
        }
        None => out.push_str("Fleet ROI: unavailable\n"),
    }
    push_skipped(&mut out, &ranking.skipped);
    out
}

pub fn emissions(report: &EmissionReport) -> String {
    let mut out = String::from("CO2 emissions\n");
    let _ = writeln!(
        out,
        "{:<8} {:<8} {:>10} {:>8} {:>10}",
        "Log", "Vehicle", "Fuel l", "kg/l", "CO2 kg"
    );
    for e in &report.entries {
        let _ = writeln!(
            out,
            "{:<8} {:<8} {:>10.1} {:>8.2} {:>10.1}",
            e.fuel_log_id, e.vehicle_id, e.fuel_used, e.emission_factor, e.co2_kg
        );
    }
    let _ = writeln!(out, "Total: {:.1} kg CO2", report.total_co2_kg);
    push_skipped(&mut out, &report.skipped);
    out
}

pub fn fuel(report: &FuelExpenseReport, currency: &str) -> String {
    let mut out = String::from("Fuel & expenses\n");
    for e in &report.entries {
        let _ = writeln!(
            out,
            "{:<8} {:<8} {}",
            e.fuel_log_id,
            e.trip_id,
            e.route.as_deref().unwrap_or("(unknown trip)")
        );
        let _ = writeln!(
            out,
            "    {} / {}",
            e.vehicle_model.as_deref().unwrap_or("(unknown vehicle)"),
            e.driver_name.as_deref().unwrap_or("(unknown driver)")
        );
        let per_km = e
            .cost_per_km
            .map(|c| format!("{:.2} {}/km", c, currency))
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "    {:.1} l, fuel {:.2}, maintenance {:.2}, total {:.2} {} ({})",
            e.fuel_used, e.fuel_cost, e.maintenance_cost, e.total_cost, currency, per_km
        );
    }
    let _ = writeln!(
        out,
        "Totals: fuel {:.2}, maintenance {:.2}, operating {:.2} {}; {:.1} l used",
        report.total_fuel_cost,
        report.total_maintenance_cost,
        report.total_operating_cost,
        currency,
        report.total_fuel_used
    );
    out
}

pub fn drivers(roster: &[DriverStanding]) -> String {
    let mut out = String::from("Drivers\n");
    let _ = writeln!(
        out,
        "{:<8} {:<16} {:<10} {:<22} {:>6} {:>6} {}",
        "ID", "Name", "Status", "License", "Compl", "Safety", "Dispatch"
    );
    for d in roster {
        let license = match d.license {
            LicenseState::Valid => "valid".to_string(),
            LicenseState::ExpiringSoon { days_left } => format!("expires in {} days", days_left),
            LicenseState::Expired { days_ago } => format!("expired {} days ago", days_ago),
        };
        let _ = writeln!(
            out,
            "{:<8} {:<16} {:<10} {:<22} {:>5.0}% {:>6.0} {}",
            d.driver_id,
            d.name,
            d.status.as_str(),
            license,
            d.completion_rate,
            d.safety_score,
            if d.dispatchable { "yes" } else { "no" }
        );
        for warning in &d.warnings {
            let _ = writeln!(out, "    ! {}", warning);
        }
    }
    out
}

pub fn dashboard(fleet_name: &str, kpis: &FleetKpis) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", fleet_name);
    let _ = writeln!(out, "{}", "=".repeat(fleet_name.chars().count()));
    let _ = writeln!(out, "Active fleet:      {} on trip", kpis.on_trip);
    let _ = writeln!(out, "In shop:           {}", kpis.in_shop);
    let _ = writeln!(out, "Available:         {}", kpis.available);
    let _ = writeln!(
        out,
        "Utilization:       {:.0}% of {} operational",
        kpis.utilization_percent, kpis.operational
    );
    let _ = writeln!(out, "Pending cargo:     {}", kpis.pending_cargo);
    let _ = writeln!(out, "Service due:       {}", kpis.service_due);
    let _ = writeln!(out, "Total CO2:         {:.1} kg", kpis.total_co2_kg);
    if kpis.unresolved_fuel_logs > 0 {
        let _ = writeln!(
            out,
            "                   ({} fuel logs without a vehicle)",
            kpis.unresolved_fuel_logs
        );
    }
    let _ = writeln!(out, "Dispatchable:      {} drivers", kpis.dispatchable_drivers);
    out
}

pub fn vehicle(profile: &VehicleProfile, currency: &str) -> String {
    let m = &profile.maintenance;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} ({})",
        profile.vehicle_id, profile.model, profile.vehicle_type
    );
    if !profile.plate.is_empty() {
        let _ = writeln!(out, "Plate:             {}", profile.plate);
    }
    let _ = writeln!(out, "Status:            {}", profile.status);
    let _ = writeln!(out, "Max load:          {:.0} kg", profile.max_load_kg);
    let _ = writeln!(out, "Odometer:          {:.0} km", profile.odometer_km);
    let _ = writeln!(
        out,
        "Since service:     {:.0} km{}",
        m.distance_since_service_km,
        if m.service_due { " (service due)" } else { "" }
    );
    let _ = writeln!(out, "Maintenance risk:  {:.2} ({})", m.risk_score, m.band);
    let _ = writeln!(out, "Completed trips:   {}", profile.completed_trips);
    let _ = writeln!(
        out,
        "Costs:             fuel {:.2}, maintenance {:.2} {}",
        profile.fuel_cost, profile.maintenance_cost, currency
    );
    let _ = writeln!(out, "ROI:               {:.2}", profile.roi);
    let _ = writeln!(out, "CO2:               {:.1} kg", profile.co2_kg);
    out
}

pub fn issues(issues: &[SnapshotIssue]) -> String {
    if issues.is_empty() {
        return "Snapshot OK\n".to_string();
    }
    let mut out = format!("{} issue(s) found\n", issues.len());
    for issue in issues {
        let _ = writeln!(out, "  - {}", issue);
    }
    out
}

fn push_skipped(out: &mut String, skipped: &[SkippedRecord]) {
    if skipped.is_empty() {
        return;
    }
    let _ = writeln!(out, "Skipped {} record(s):", skipped.len());
    for s in skipped {
        let _ = writeln!(out, "  - {}: {}", s.record_id, s.reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{date, demo_snapshot};
    use crate::logic::reports::{driver_roster, fleet_kpis};
    use crate::logic::{RecommendationEngine, ScoringPolicy};

    #[test]
    fn recommendation_lists_ranked_vehicles() {
        let report = RecommendationEngine::default().recommend(&demo_snapshot(), 4000.0, None);
        let text = recommendation(&report);

        assert!(text.starts_with("Recommendation for 4000 kg\n"));
        let first_row = text.lines().nth(2).unwrap();
        assert!(first_row.contains("VH-005"));
        assert!(first_row.contains("0.83"));
    }

    #[test]
    fn recommendation_explains_empty_result() {
        let report =
            RecommendationEngine::default().recommend(&demo_snapshot(), 30000.0, None);
        let text = recommendation(&report);
        assert!(text.contains("no vehicle can carry 30000 kg"));
        assert!(text.contains("26000"));
    }

    #[test]
    fn dashboard_shows_kpis() {
        let kpis = fleet_kpis(&demo_snapshot(), &ScoringPolicy::default(), date(2026, 2, 21));
        let text = dashboard("Main Fleet", &kpis);

        assert!(text.starts_with("Main Fleet\n==========\n"));
        assert!(text.contains("29% of 7 operational"));
        assert!(text.contains("1403.5 kg"));
        assert!(!text.contains("without a vehicle"));
    }

    #[test]
    fn drivers_print_warnings() {
        let roster = driver_roster(&demo_snapshot(), &ScoringPolicy::default(), date(2026, 2, 21));
        let text = drivers(&roster);
        assert!(text.contains("! Driver is suspended"));
        assert_eq!(text.matches("! License expired").count(), 2);
    }

    #[test]
    fn issues_summary() {
        assert_eq!(issues(&[]), "Snapshot OK\n");

        let mut snapshot = demo_snapshot();
        snapshot.fuel_logs[0].trip_id = "TR-404".into();
        let text = issues(&snapshot.validate());
        assert!(text.starts_with("1 issue(s) found"));
        assert!(text.contains("TR-404"));
    }

    #[test]
    fn empty_alert_list() {
        assert_eq!(alerts(&[]), "No alerts\n");
    }
}
