use super::{Driver, FuelLog, MaintenanceLog, Trip, Vehicle};
use crate::error::{FleetOpsError, IntegrityError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

const DEMO_FLEET: &str = include_str!("../../data/demo_fleet.yaml");

/// Read-only bundle of every fleet collection used by one computation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSnapshot {
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
    #[serde(default)]
    pub drivers: Vec<Driver>,
    #[serde(default)]
    pub trips: Vec<Trip>,
    #[serde(default)]
    pub maintenance_logs: Vec<MaintenanceLog>,
    #[serde(default)]
    pub fuel_logs: Vec<FuelLog>,
}

impl FleetSnapshot {
    /// Load a snapshot from a `.yaml`/`.yml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let snapshot = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content)?,
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content)?,
            other => {
                return Err(FleetOpsError::InvalidData(format!(
                    "unsupported snapshot format {:?} for {}",
                    other,
                    path.display()
                )))
            }
        };

        tracing::info!(
            vehicles = snapshot.vehicles.len(),
            drivers = snapshot.drivers.len(),
            trips = snapshot.trips.len(),
            maintenance_logs = snapshot.maintenance_logs.len(),
            fuel_logs = snapshot.fuel_logs.len(),
            "Loaded fleet snapshot from {}",
            path.display()
        );

        Ok(snapshot)
    }

    /// The demo fleet compiled into the binary.
    pub fn demo() -> Result<Self> {
        let snapshot = Self::from_yaml_str(DEMO_FLEET)?;
        tracing::info!(
            vehicles = snapshot.vehicles.len(),
            drivers = snapshot.drivers.len(),
            "Using the built-in demo fleet"
        );
        Ok(snapshot)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
            && self.drivers.is_empty()
            && self.trips.is_empty()
            && self.maintenance_logs.is_empty()
            && self.fuel_logs.is_empty()
    }

    /// Audit the snapshot for invariant violations and dangling references.
    ///
    /// Every issue is reported; nothing is corrected.
    pub fn validate(&self) -> Vec<SnapshotIssue> {
        let mut issues = Vec::new();

        for vehicle in &self.vehicles {
            for violation in vehicle_violations(vehicle) {
                issues.push(SnapshotIssue::integrity(&vehicle.id, violation));
            }
        }

        let vehicle_ids: HashSet<&str> = self.vehicles.iter().map(|v| v.id.as_str()).collect();
        let driver_ids: HashSet<&str> = self.drivers.iter().map(|d| d.id.as_str()).collect();
        let trip_ids: HashSet<&str> = self.trips.iter().map(|t| t.id.as_str()).collect();

        for trip in &self.trips {
            check_ref(&mut issues, &trip.id, "vehicleId", &trip.vehicle_id, &vehicle_ids);
            check_ref(&mut issues, &trip.id, "driverId", &trip.driver_id, &driver_ids);
        }
        for log in &self.maintenance_logs {
            check_ref(&mut issues, &log.id, "vehicleId", &log.vehicle_id, &vehicle_ids);
        }
        for log in &self.fuel_logs {
            check_ref(&mut issues, &log.id, "tripId", &log.trip_id, &trip_ids);
            check_ref(&mut issues, &log.id, "vehicleId", &log.vehicle_id, &vehicle_ids);
            check_ref(&mut issues, &log.id, "driverId", &log.driver_id, &driver_ids);
        }

        issues
    }
}

fn check_ref(
    issues: &mut Vec<SnapshotIssue>,
    record_id: &str,
    field: &str,
    target: &str,
    known: &HashSet<&str>,
) {
    if !known.contains(target) {
        issues.push(SnapshotIssue::dangling(record_id, field, target));
    }
}

fn vehicle_violations(vehicle: &Vehicle) -> Vec<IntegrityError> {
    let mut violations = Vec::new();

    if vehicle.last_service_odometer_km > vehicle.odometer_km {
        violations.push(IntegrityError::OdometerBelowLastService {
            vehicle_id: vehicle.id.clone(),
            odometer_km: vehicle.odometer_km,
            last_service_odometer_km: vehicle.last_service_odometer_km,
        });
    }
    if vehicle.acquisition_cost <= 0.0 {
        violations.push(IntegrityError::NonPositiveAcquisitionCost {
            vehicle_id: vehicle.id.clone(),
            acquisition_cost: vehicle.acquisition_cost,
        });
    }
    if vehicle.max_load_kg <= 0.0 {
        violations.push(IntegrityError::NonPositiveMaxLoad {
            vehicle_id: vehicle.id.clone(),
            max_load_kg: vehicle.max_load_kg,
        });
    }

    violations
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapshotIssueKind {
    Integrity,
    DanglingReference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotIssue {
    pub record_id: String,
    pub kind: SnapshotIssueKind,
    pub detail: String,
}

impl SnapshotIssue {
    fn integrity(record_id: &str, violation: IntegrityError) -> Self {
        Self {
            record_id: record_id.to_string(),
            kind: SnapshotIssueKind::Integrity,
            detail: violation.to_string(),
        }
    }

    fn dangling(record_id: &str, field: &str, target: &str) -> Self {
        Self {
            record_id: record_id.to_string(),
            kind: SnapshotIssueKind::DanglingReference,
            detail: format!("{} '{}' does not resolve", field, target),
        }
    }
}

impl std::fmt::Display for SnapshotIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.record_id, self.detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::demo_snapshot;
    use crate::models::{TripStatus, VehicleStatus};

    #[test]
    fn demo_snapshot_loads_every_collection() {
        let snapshot = FleetSnapshot::demo().unwrap();
        assert_eq!(snapshot.vehicles.len(), 8);
        assert_eq!(snapshot.drivers.len(), 6);
        assert_eq!(snapshot.trips.len(), 6);
        assert_eq!(snapshot.maintenance_logs.len(), 6);
        assert_eq!(snapshot.fuel_logs.len(), 5);
        assert_eq!(snapshot.vehicles[1].status, VehicleStatus::OnTrip);
        assert_eq!(snapshot.trips[2].status, TripStatus::Completed);
    }

    #[test]
    fn demo_snapshot_is_clean() {
        assert!(demo_snapshot().validate().is_empty());
    }

    #[test]
    fn validate_reports_odometer_violation() {
        let mut snapshot = demo_snapshot();
        snapshot.vehicles[0].last_service_odometer_km = snapshot.vehicles[0].odometer_km + 1.0;

        let issues = snapshot.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].record_id, "VH-001");
        assert_eq!(issues[0].kind, SnapshotIssueKind::Integrity);
    }

    #[test]
    fn validate_reports_dangling_references() {
        let mut snapshot = demo_snapshot();
        snapshot.fuel_logs[0].trip_id = "TR-404".into();
        snapshot.trips[0].driver_id = "DR-404".into();

        let issues = snapshot.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues
            .iter()
            .all(|i| i.kind == SnapshotIssueKind::DanglingReference));
        assert!(issues.iter().any(|i| i.record_id == "FL-001"));
        assert!(issues.iter().any(|i| i.record_id == "TR-001"));
    }

    #[test]
    fn json_snapshot_with_missing_collections() {
        let snapshot = FleetSnapshot::from_json_str(r#"{"vehicles": []}"#).unwrap();
        assert!(snapshot.is_empty());
    }
}
