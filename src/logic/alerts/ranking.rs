use crate::error::Result;
use crate::logic::calculations::{
    distance_since_service, is_service_due_soon, maintenance_risk_score,
};
use crate::logic::policy::ScoringPolicy;
use crate::models::{FleetSnapshot, RiskBand, SkippedRecord, Trip, Vehicle, VehicleStatus};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceEntry {
    pub vehicle_id: String,
    pub model: String,
    pub status: VehicleStatus,
    pub distance_since_service_km: f64,
    pub risk_score: f64,
    pub band: RiskBand,
    pub service_due: bool,
}

impl MaintenanceEntry {
    pub fn for_vehicle(vehicle: &Vehicle, trips: &[Trip], policy: &ScoringPolicy) -> Result<Self> {
        let distance = distance_since_service(vehicle)?;
        let risk_score = maintenance_risk_score(vehicle, trips, policy)?;

        Ok(Self {
            vehicle_id: vehicle.id.clone(),
            model: vehicle.model.clone(),
            status: vehicle.status,
            distance_since_service_km: distance,
            risk_score,
            band: policy.risk_bands.classify(risk_score),
            service_due: is_service_due_soon(vehicle, policy)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRanking {
    pub entries: Vec<MaintenanceEntry>,
    pub skipped: Vec<SkippedRecord>,
}

impl MaintenanceRanking {
    pub fn service_due(&self) -> impl Iterator<Item = &MaintenanceEntry> {
        self.entries.iter().filter(|e| e.service_due)
    }

    /// The `n` riskiest vehicles.
    pub fn top(&self, n: usize) -> &[MaintenanceEntry] {
        &self.entries[..n.min(self.entries.len())]
    }
}

/// Non-retired vehicles ordered by descending maintenance risk, ties by id.
pub fn rank_maintenance_risk(snapshot: &FleetSnapshot, policy: &ScoringPolicy) -> MaintenanceRanking {
    let mut ranking = MaintenanceRanking::default();

    for vehicle in snapshot.vehicles.iter().filter(|v| v.status.is_operational()) {
        match MaintenanceEntry::for_vehicle(vehicle, &snapshot.trips, policy) {
            Ok(entry) => ranking.entries.push(entry),
            Err(e) => {
                tracing::warn!("Skipping vehicle {} from maintenance ranking: {}", vehicle.id, e);
                ranking.skipped.push(SkippedRecord::new(&vehicle.id, e));
            }
        }
    }

    ranking.entries.sort_by(|a, b| {
        b.risk_score
            .partial_cmp(&a.risk_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.vehicle_id.cmp(&b.vehicle_id))
    });

    ranking
}
