//! Fleet-level summaries built from the per-vehicle calculators.

use super::alerts::{rank_maintenance_risk, MaintenanceEntry};
use super::calculations::{carbon_emission, fuel_cost, maintenance_cost, roi, round_to};
use super::lookup::{find_driver, find_trip, find_vehicle, require_vehicle};
use super::policy::ScoringPolicy;
use crate::error::{IntegrityError, Result};
use crate::models::{
    Driver, DriverStatus, FleetSnapshot, SkippedRecord, TripStatus, VehicleStatus,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetKpis {
    pub on_trip: usize,
    pub in_shop: usize,
    pub available: usize,
    pub retired: usize,
    /// Non-retired vehicles.
    pub operational: usize,
    /// Share of operational vehicles on a trip, whole percent.
    pub utilization_percent: f64,
    pub pending_cargo: usize,
    pub service_due: usize,
    pub total_co2_kg: f64,
    /// Fuel logs whose vehicle did not resolve, left out of the CO2 total.
    pub unresolved_fuel_logs: usize,
    pub dispatchable_drivers: usize,
}

pub fn fleet_kpis(snapshot: &FleetSnapshot, policy: &ScoringPolicy, today: NaiveDate) -> FleetKpis {
    let count_status = |status: VehicleStatus| {
        snapshot
            .vehicles
            .iter()
            .filter(|v| v.status == status)
            .count()
    };

    let on_trip = count_status(VehicleStatus::OnTrip);
    let operational = snapshot
        .vehicles
        .iter()
        .filter(|v| v.status.is_operational())
        .count();
    let utilization_percent = if operational == 0 {
        0.0
    } else {
        round_to(on_trip as f64 / operational as f64 * 100.0, 0)
    };

    let emissions = emission_report(snapshot);

    FleetKpis {
        on_trip,
        in_shop: count_status(VehicleStatus::InShop),
        available: count_status(VehicleStatus::Available),
        retired: count_status(VehicleStatus::Retired),
        operational,
        utilization_percent,
        pending_cargo: snapshot
            .trips
            .iter()
            .filter(|t| t.status == TripStatus::Draft)
            .count(),
        service_due: rank_maintenance_risk(snapshot, policy).service_due().count(),
        total_co2_kg: emissions.total_co2_kg,
        unresolved_fuel_logs: emissions.skipped.len(),
        dispatchable_drivers: snapshot
            .drivers
            .iter()
            .filter(|d| driver_dispatchable(d, today))
            .count(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionEntry {
    pub fuel_log_id: String,
    pub vehicle_id: String,
    pub fuel_used: f64,
    pub emission_factor: f64,
    pub co2_kg: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmissionReport {
    pub entries: Vec<EmissionEntry>,
    pub total_co2_kg: f64,
    pub skipped: Vec<SkippedRecord>,
}

/// CO2 per fuel log, using the emission factor of the logged vehicle.
pub fn emission_report(snapshot: &FleetSnapshot) -> EmissionReport {
    let mut report = EmissionReport::default();

    for log in &snapshot.fuel_logs {
        let Some(vehicle) = find_vehicle(&snapshot.vehicles, &log.vehicle_id) else {
            tracing::warn!(
                "Fuel log {} references unknown vehicle {}",
                log.id,
                log.vehicle_id
            );
            report.skipped.push(SkippedRecord::new(
                &log.id,
                format!("vehicle {} not found", log.vehicle_id),
            ));
            continue;
        };

        report.entries.push(EmissionEntry {
            fuel_log_id: log.id.clone(),
            vehicle_id: vehicle.id.clone(),
            fuel_used: log.fuel_used,
            emission_factor: vehicle.emission_factor,
            co2_kg: carbon_emission(log.fuel_used, vehicle.emission_factor),
        });
    }

    report.total_co2_kg = round_to(report.entries.iter().map(|e| e.co2_kg).sum(), 1);
    report
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRoi {
    pub vehicle_id: String,
    pub model: String,
    pub roi: f64,
    pub fuel_cost: f64,
    pub maintenance_cost: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoiRanking {
    pub entries: Vec<VehicleRoi>,
    pub skipped: Vec<SkippedRecord>,
}

/// Non-retired vehicles by descending ROI, ties by id.
pub fn vehicle_roi_ranking(snapshot: &FleetSnapshot, policy: &ScoringPolicy) -> RoiRanking {
    let mut ranking = RoiRanking::default();

    for vehicle in snapshot.vehicles.iter().filter(|v| v.status.is_operational()) {
        let value = roi(
            vehicle,
            &snapshot.trips,
            &snapshot.fuel_logs,
            &snapshot.maintenance_logs,
            policy,
        );
        match value {
            Ok(roi) => ranking.entries.push(VehicleRoi {
                vehicle_id: vehicle.id.clone(),
                model: vehicle.model.clone(),
                roi,
                fuel_cost: fuel_cost(&snapshot.fuel_logs, &vehicle.id),
                maintenance_cost: maintenance_cost(&snapshot.maintenance_logs, &vehicle.id),
            }),
            Err(e) => {
                tracing::warn!("Skipping vehicle {} from ROI ranking: {}", vehicle.id, e);
                ranking.skipped.push(SkippedRecord::new(&vehicle.id, e));
            }
        }
    }

    ranking.entries.sort_by(|a, b| {
        b.roi
            .partial_cmp(&a.roi)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.vehicle_id.cmp(&b.vehicle_id))
    });

    ranking
}

/// Whole-fleet ROI as a percentage, rounded to one decimal.
///
/// Counts every vehicle's acquisition cost, retired ones included.
pub fn fleet_roi_percent(snapshot: &FleetSnapshot, policy: &ScoringPolicy) -> Result<f64> {
    let completed = snapshot.trips.iter().filter(|t| t.is_completed()).count();
    let revenue = completed as f64 * policy.revenue_per_trip;
    let fuel: f64 = snapshot.fuel_logs.iter().map(|f| f.fuel_cost).sum();
    let maintenance: f64 = snapshot.maintenance_logs.iter().map(|m| m.cost).sum();
    let acquisition: f64 = snapshot.vehicles.iter().map(|v| v.acquisition_cost).sum();

    if acquisition <= 0.0 {
        return Err(IntegrityError::NonPositiveFleetCost { total: acquisition }.into());
    }

    Ok(round_to(
        (revenue - fuel - maintenance) / acquisition * 100.0,
        1,
    ))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelExpenseEntry {
    pub fuel_log_id: String,
    pub trip_id: String,
    /// `None` when the referenced record is not in the snapshot.
    pub route: Option<String>,
    pub vehicle_model: Option<String>,
    pub driver_name: Option<String>,
    pub fuel_used: f64,
    pub fuel_cost: f64,
    pub maintenance_cost: f64,
    pub total_cost: f64,
    /// `None` without a resolvable trip of positive distance.
    pub cost_per_km: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FuelExpenseReport {
    pub entries: Vec<FuelExpenseEntry>,
    pub total_fuel_cost: f64,
    pub total_maintenance_cost: f64,
    pub total_operating_cost: f64,
    pub total_fuel_used: f64,
}

pub fn fuel_expense_report(snapshot: &FleetSnapshot) -> FuelExpenseReport {
    let mut report = FuelExpenseReport::default();

    for log in &snapshot.fuel_logs {
        let trip = find_trip(&snapshot.trips, &log.trip_id);
        let total_cost = log.total_cost();

        report.entries.push(FuelExpenseEntry {
            fuel_log_id: log.id.clone(),
            trip_id: log.trip_id.clone(),
            route: trip.map(|t| format!("{} → {}", t.origin, t.destination)),
            vehicle_model: find_vehicle(&snapshot.vehicles, &log.vehicle_id)
                .map(|v| v.model.clone()),
            driver_name: find_driver(&snapshot.drivers, &log.driver_id).map(|d| d.name.clone()),
            fuel_used: log.fuel_used,
            fuel_cost: log.fuel_cost,
            maintenance_cost: log.maintenance_cost,
            total_cost,
            cost_per_km: trip
                .filter(|t| t.distance_km > 0.0)
                .map(|t| round_to(total_cost / t.distance_km, 2)),
        });

        report.total_fuel_cost += log.fuel_cost;
        report.total_maintenance_cost += log.maintenance_cost;
        report.total_fuel_used += log.fuel_used;
    }

    report.total_operating_cost = report.total_fuel_cost + report.total_maintenance_cost;
    report
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LicenseState {
    Valid,
    ExpiringSoon { days_left: i64 },
    Expired { days_ago: i64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverStanding {
    pub driver_id: String,
    pub name: String,
    pub status: DriverStatus,
    pub license: LicenseState,
    pub dispatchable: bool,
    pub completion_rate: f64,
    pub safety_score: f64,
    pub warnings: Vec<String>,
}

pub fn license_state(driver: &Driver, today: NaiveDate, warning_days: i64) -> LicenseState {
    let days_left = driver.days_until_expiry(today);
    if driver.license_expired(today) {
        LicenseState::Expired {
            days_ago: -days_left,
        }
    } else if days_left < warning_days {
        LicenseState::ExpiringSoon { days_left }
    } else {
        LicenseState::Valid
    }
}

/// A driver can take a trip unless suspended or unlicensed.
pub fn driver_dispatchable(driver: &Driver, today: NaiveDate) -> bool {
    driver.status != DriverStatus::Suspended && !driver.license_expired(today)
}

pub fn driver_roster(
    snapshot: &FleetSnapshot,
    policy: &ScoringPolicy,
    today: NaiveDate,
) -> Vec<DriverStanding> {
    snapshot
        .drivers
        .iter()
        .map(|driver| {
            let mut warnings = Vec::new();
            if driver.license_expired(today) {
                warnings.push("License expired".to_string());
            }
            if driver.status == DriverStatus::Suspended {
                warnings.push("Driver is suspended".to_string());
            }

            DriverStanding {
                driver_id: driver.id.clone(),
                name: driver.name.clone(),
                status: driver.status,
                license: license_state(driver, today, policy.license_warning_days),
                dispatchable: driver_dispatchable(driver, today),
                completion_rate: driver.completion_rate,
                safety_score: driver.safety_score,
                warnings,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleProfile {
    pub vehicle_id: String,
    pub model: String,
    pub plate: String,
    pub vehicle_type: String,
    pub status: VehicleStatus,
    pub max_load_kg: f64,
    pub odometer_km: f64,
    pub maintenance: MaintenanceEntry,
    pub roi: f64,
    pub completed_trips: usize,
    pub fuel_cost: f64,
    pub maintenance_cost: f64,
    pub co2_kg: f64,
}

/// Every per-vehicle metric for one id. Unknown ids are `NotFound`.
pub fn vehicle_profile(
    snapshot: &FleetSnapshot,
    policy: &ScoringPolicy,
    vehicle_id: &str,
) -> Result<VehicleProfile> {
    let vehicle = require_vehicle(&snapshot.vehicles, vehicle_id)?;
    let maintenance = MaintenanceEntry::for_vehicle(vehicle, &snapshot.trips, policy)?;
    let roi = roi(
        vehicle,
        &snapshot.trips,
        &snapshot.fuel_logs,
        &snapshot.maintenance_logs,
        policy,
    )?;

    let co2: f64 = snapshot
        .fuel_logs
        .iter()
        .filter(|f| f.vehicle_id == vehicle.id)
        .map(|f| carbon_emission(f.fuel_used, vehicle.emission_factor))
        .sum();

    Ok(VehicleProfile {
        vehicle_id: vehicle.id.clone(),
        model: vehicle.model.clone(),
        plate: vehicle.plate.clone(),
        vehicle_type: vehicle.vehicle_type.clone(),
        status: vehicle.status,
        max_load_kg: vehicle.max_load_kg,
        odometer_km: vehicle.odometer_km,
        maintenance,
        roi,
        completed_trips: snapshot
            .trips
            .iter()
            .filter(|t| t.vehicle_id == vehicle.id && t.is_completed())
            .count(),
        fuel_cost: fuel_cost(&snapshot.fuel_logs, &vehicle.id),
        maintenance_cost: maintenance_cost(&snapshot.maintenance_logs, &vehicle.id),
        co2_kg: round_to(co2, 1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FleetOpsError;
    use crate::fixtures::{date, demo_snapshot};

    #[test]
    fn kpis_for_demo_fleet() {
        let kpis = fleet_kpis(&demo_snapshot(), &ScoringPolicy::default(), date(2026, 2, 21));

        assert_eq!(kpis.on_trip, 2);
        assert_eq!(kpis.in_shop, 1);
        assert_eq!(kpis.available, 4);
        assert_eq!(kpis.retired, 1);
        assert_eq!(kpis.operational, 7);
        // 2 / 7
        assert_eq!(kpis.utilization_percent, 29.0);
        assert_eq!(kpis.pending_cargo, 1);
        assert_eq!(kpis.service_due, 3);
        assert_eq!(kpis.total_co2_kg, 1403.5);
        assert_eq!(kpis.unresolved_fuel_logs, 0);
        assert_eq!(kpis.dispatchable_drivers, 4);
    }

    #[test]
    fn kpis_for_empty_fleet() {
        let kpis = fleet_kpis(
            &FleetSnapshot::default(),
            &ScoringPolicy::default(),
            date(2026, 2, 21),
        );
        assert_eq!(kpis.utilization_percent, 0.0);
        assert_eq!(kpis.total_co2_kg, 0.0);
    }

    #[test]
    fn emissions_skip_unresolved_vehicles() {
        let mut snapshot = demo_snapshot();
        snapshot.fuel_logs[4].vehicle_id = "VH-404".into();

        let report = emission_report(&snapshot);
        assert_eq!(report.entries.len(), 4);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].record_id, "FL-005");
        // 1403.5 - 89.0
        assert_eq!(report.total_co2_kg, 1314.5);
        assert_eq!(report.entries[0].co2_kg, 335.0);
    }

    #[test]
    fn roi_ranking_excludes_retired_and_sorts_descending() {
        let ranking = vehicle_roi_ranking(&demo_snapshot(), &ScoringPolicy::default());

        assert_eq!(ranking.entries.len(), 7);
        assert!(ranking.entries.iter().all(|e| e.vehicle_id != "VH-008"));
        assert!(ranking.entries.windows(2).all(|w| w[0].roi >= w[1].roi));

        let top = &ranking.entries[0];
        assert_eq!(top.vehicle_id, "VH-001");
        assert_eq!(top.roi, 0.01);
        assert_eq!(top.fuel_cost, 275.0);
        assert_eq!(top.maintenance_cost, 250.0);

        assert_eq!(ranking.entries.last().unwrap().vehicle_id, "VH-004");
    }

    #[test]
    fn roi_ranking_skips_zero_cost_vehicle() {
        let mut snapshot = demo_snapshot();
        snapshot.vehicles[0].acquisition_cost = 0.0;

        let ranking = vehicle_roi_ranking(&snapshot, &ScoringPolicy::default());
        assert_eq!(ranking.entries.len(), 6);
        assert_eq!(ranking.skipped[0].record_id, "VH-001");
    }

    #[test]
    fn fleet_roi_for_demo_fleet() {
        // (4500 - 1213 - 9330) / 498000 * 100
        let value = fleet_roi_percent(&demo_snapshot(), &ScoringPolicy::default()).unwrap();
        assert_eq!(value, -1.2);
    }

    #[test]
    fn fleet_roi_rejects_empty_fleet() {
        let err = fleet_roi_percent(&FleetSnapshot::default(), &ScoringPolicy::default())
            .unwrap_err();
        assert!(matches!(
            err,
            FleetOpsError::Integrity(IntegrityError::NonPositiveFleetCost { .. })
        ));
    }

    #[test]
    fn fuel_expense_totals_and_cost_per_km() {
        let report = fuel_expense_report(&demo_snapshot());

        assert_eq!(report.entries.len(), 5);
        assert_eq!(report.total_fuel_cost, 1213.0);
        assert_eq!(report.total_maintenance_cost, 50.0);
        assert_eq!(report.total_operating_cost, 1263.0);
        assert_eq!(report.total_fuel_used, 540.0);

        let first = &report.entries[0];
        assert_eq!(first.route.as_deref(), Some("Atlanta, GA → Nashville, TN"));
        assert_eq!(first.vehicle_model.as_deref(), Some("Volvo FH16"));
        assert_eq!(first.driver_name.as_deref(), Some("Carlos Rivera"));
        // 275 / 400
        assert_eq!(first.cost_per_km, Some(0.69));

        // (279 + 50) / 380
        assert_eq!(report.entries[2].cost_per_km, Some(0.87));
    }

    #[test]
    fn fuel_expense_with_missing_trip() {
        let mut snapshot = demo_snapshot();
        snapshot.fuel_logs[0].trip_id = "TR-404".into();
        snapshot.fuel_logs[0].driver_id = "DR-404".into();

        let report = fuel_expense_report(&snapshot);
        let entry = &report.entries[0];
        assert_eq!(entry.route, None);
        assert_eq!(entry.cost_per_km, None);
        assert_eq!(entry.driver_name, None);
        assert_eq!(entry.total_cost, 275.0);
    }

    #[test]
    fn driver_roster_states() {
        let roster = driver_roster(&demo_snapshot(), &ScoringPolicy::default(), date(2026, 6, 1));

        let by_id = |id: &str| roster.iter().find(|d| d.driver_id == id).unwrap();

        assert_eq!(
            by_id("DR-001").license,
            LicenseState::ExpiringSoon { days_left: 75 }
        );
        assert!(by_id("DR-001").dispatchable);

        let sarah = by_id("DR-002");
        assert!(matches!(sarah.license, LicenseState::Expired { .. }));
        assert!(!sarah.dispatchable);
        assert_eq!(sarah.warnings, vec!["License expired".to_string()]);

        let lisa = by_id("DR-004");
        assert_eq!(
            lisa.warnings,
            vec!["License expired".to_string(), "Driver is suspended".to_string()]
        );

        assert_eq!(by_id("DR-005").license, LicenseState::Valid);
        assert!(by_id("DR-003").dispatchable);
    }

    #[test]
    fn license_is_expired_on_its_expiry_date() {
        let driver = Driver::new("DR-9", "Test", date(2026, 3, 1));
        assert!(driver_dispatchable(&driver, date(2026, 2, 28)));
        assert_eq!(
            license_state(&driver, date(2026, 2, 28), 90),
            LicenseState::ExpiringSoon { days_left: 1 }
        );

        assert!(!driver_dispatchable(&driver, date(2026, 3, 1)));
        assert_eq!(
            license_state(&driver, date(2026, 3, 1), 90),
            LicenseState::Expired { days_ago: 0 }
        );
        assert_eq!(
            license_state(&driver, date(2026, 3, 2), 90),
            LicenseState::Expired { days_ago: 1 }
        );
    }

    #[test]
    fn roster_marks_expiry_day_as_not_dispatchable() {
        let mut snapshot = demo_snapshot();
        let roster = driver_roster(&snapshot, &ScoringPolicy::default(), date(2026, 8, 15));
        let dr1 = roster.iter().find(|d| d.driver_id == "DR-001").unwrap();
        assert_eq!(dr1.license, LicenseState::Expired { days_ago: 0 });
        assert!(!dr1.dispatchable);

        snapshot.drivers.retain(|d| d.id == "DR-001");
        let roster = driver_roster(&snapshot, &ScoringPolicy::default(), date(2026, 8, 14));
        assert_eq!(roster[0].license, LicenseState::ExpiringSoon { days_left: 1 });
        assert!(roster[0].dispatchable);
    }

    #[test]
    fn vehicle_profile_for_demo_truck() {
        let profile =
            vehicle_profile(&demo_snapshot(), &ScoringPolicy::default(), "VH-007").unwrap();

        assert_eq!(profile.model, "MAN TGX");
        assert_eq!(profile.maintenance.distance_since_service_km, 8900.0);
        assert!(profile.maintenance.service_due);
        assert_eq!(profile.completed_trips, 1);
        assert_eq!(profile.fuel_cost, 279.0);
        assert_eq!(profile.maintenance_cost, 2800.0);
        // 127 * 2.70
        assert_eq!(profile.co2_kg, 342.9);
        assert_eq!(profile.roi, -0.02);
    }

    #[test]
    fn vehicle_profile_unknown_id() {
        let err = vehicle_profile(&demo_snapshot(), &ScoringPolicy::default(), "VH-404")
            .unwrap_err();
        assert!(matches!(err, FleetOpsError::NotFound(_)));
    }

    #[test]
    fn vehicle_profile_surfaces_integrity_errors() {
        let mut snapshot = demo_snapshot();
        snapshot.vehicles[0].last_service_odometer_km = 200000.0;

        let err = vehicle_profile(&snapshot, &ScoringPolicy::default(), "VH-001").unwrap_err();
        assert!(matches!(
            err,
            FleetOpsError::Integrity(IntegrityError::OdometerBelowLastService { .. })
        ));
    }
}
