//! Identifier lookups over snapshot collections.
//!
//! Absence is an ordinary outcome here (a fuel log may reference a trip
//! that was purged), so every lookup returns an `Option` and the caller
//! chooses the fallback.

use crate::error::{FleetOpsError, Result};
use crate::models::{Driver, Trip, Vehicle};

pub fn find_vehicle<'a>(vehicles: &'a [Vehicle], id: &str) -> Option<&'a Vehicle> {
    vehicles.iter().find(|v| v.id == id)
}

pub fn find_driver<'a>(drivers: &'a [Driver], id: &str) -> Option<&'a Driver> {
    drivers.iter().find(|d| d.id == id)
}

pub fn find_trip<'a>(trips: &'a [Trip], id: &str) -> Option<&'a Trip> {
    trips.iter().find(|t| t.id == id)
}

/// Like [`find_vehicle`], for callers where a missing vehicle is fatal.
pub fn require_vehicle<'a>(vehicles: &'a [Vehicle], id: &str) -> Result<&'a Vehicle> {
    find_vehicle(vehicles, id).ok_or_else(|| FleetOpsError::NotFound(format!("vehicle {}", id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::demo_snapshot;

    #[test]
    fn finds_known_entities() {
        let snapshot = demo_snapshot();
        assert_eq!(
            find_vehicle(&snapshot.vehicles, "VH-004").map(|v| v.model.as_str()),
            Some("DAF XF")
        );
        assert_eq!(
            find_driver(&snapshot.drivers, "DR-002").map(|d| d.name.as_str()),
            Some("Sarah Chen")
        );
        assert_eq!(
            find_trip(&snapshot.trips, "TR-006").map(|t| t.distance_km),
            Some(380.0)
        );
    }

    #[test]
    fn unknown_ids_are_absent() {
        let snapshot = demo_snapshot();
        assert!(find_vehicle(&snapshot.vehicles, "VH-999").is_none());
        assert!(find_driver(&snapshot.drivers, "").is_none());
        assert!(find_trip(&[], "TR-001").is_none());
    }

    #[test]
    fn require_vehicle_reports_not_found() {
        let snapshot = demo_snapshot();
        assert!(require_vehicle(&snapshot.vehicles, "VH-001").is_ok());
        match require_vehicle(&snapshot.vehicles, "VH-999") {
            Err(FleetOpsError::NotFound(what)) => assert_eq!(what, "vehicle VH-999"),
            other => panic!("expected not found, got {other:?}"),
        }
    }
}
