use super::calculations::{
    ensure_positive_acquisition_cost, fuel_efficiency_factor, maintenance_risk_score, round_to,
    unit,
};
use super::policy::ScoringPolicy;
use crate::error::{FleetOpsError, IntegrityError, Result};
use crate::models::{
    EmptyReason, FleetSnapshot, RankedVehicle, RecommendationOutcome, RecommendationReport,
    ScoreBreakdown, SkippedRecord, Trip, Vehicle, VehicleScore,
};
use std::cmp::Ordering;

/// Stateless scorer that ranks vehicles for a cargo assignment.
pub struct RecommendationEngine {
    policy: ScoringPolicy,
}

impl RecommendationEngine {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    /// Weighted capacity, fuel, maintenance and ROI score for one vehicle.
    ///
    /// A vehicle that cannot carry the load scores 0 regardless of its other
    /// criteria; the breakdown is still reported. The cargo weight must be
    /// finite and positive.
    pub fn score_vehicle_for_cargo(
        &self,
        vehicle: &Vehicle,
        trips: &[Trip],
        cargo_weight_kg: f64,
    ) -> Result<VehicleScore> {
        if !cargo_weight_kg.is_finite() || cargo_weight_kg <= 0.0 {
            return Err(FleetOpsError::InvalidData(format!(
                "cargo weight must be a positive number of kg, got {}",
                cargo_weight_kg
            )));
        }
        if vehicle.max_load_kg <= 0.0 {
            return Err(IntegrityError::NonPositiveMaxLoad {
                vehicle_id: vehicle.id.clone(),
                max_load_kg: vehicle.max_load_kg,
            }
            .into());
        }
        ensure_positive_acquisition_cost(vehicle)?;

        let fits = cargo_weight_kg <= vehicle.max_load_kg;
        let capacity = if fits {
            1.0 - (vehicle.max_load_kg - cargo_weight_kg) / vehicle.max_load_kg
                * self.policy.oversize_penalty
        } else {
            0.0
        };
        let fuel = fuel_efficiency_factor(vehicle, &self.policy);
        let maintenance = 1.0 - maintenance_risk_score(vehicle, trips, &self.policy)?;
        let roi = unit(
            vehicle.fuel_efficiency / (vehicle.acquisition_cost / self.policy.roi_cost_normalizer),
        );

        let weights = &self.policy.score_weights;
        let composite = if fits {
            weights.capacity * capacity
                + weights.fuel * fuel
                + weights.maintenance * maintenance
                + weights.roi * roi
        } else {
            0.0
        };

        tracing::debug!(
            vehicle = %vehicle.id,
            cargo_weight_kg,
            capacity,
            fuel,
            maintenance,
            roi,
            composite,
            "Scored vehicle"
        );

        Ok(VehicleScore {
            score: round_to(composite, 2),
            breakdown: ScoreBreakdown {
                capacity: round_to(capacity, 2),
                fuel: round_to(fuel, 2),
                maintenance: round_to(maintenance, 2),
                roi: round_to(roi, 2),
            },
        })
    }

    /// Rank available vehicles able to carry `cargo_weight_kg`.
    ///
    /// Best score first; equal scores are ordered by vehicle id. Vehicles
    /// failing an integrity check are skipped and listed in the report.
    pub fn recommend(
        &self,
        snapshot: &FleetSnapshot,
        cargo_weight_kg: f64,
        vehicle_type: Option<&str>,
    ) -> RecommendationReport {
        let vehicle_type = vehicle_type
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        let mut report = RecommendationReport {
            cargo_weight_kg,
            vehicle_type: vehicle_type.clone(),
            outcome: RecommendationOutcome::Ranked {
                vehicles: Vec::new(),
            },
            skipped: Vec::new(),
        };

        if !cargo_weight_kg.is_finite() || cargo_weight_kg <= 0.0 {
            report.outcome =
                RecommendationOutcome::Empty(EmptyReason::InvalidCargoWeight { cargo_weight_kg });
            return report;
        }

        let candidates: Vec<&Vehicle> = snapshot
            .vehicles
            .iter()
            .filter(|v| v.is_available())
            .filter(|v| vehicle_type.as_deref().map_or(true, |t| v.matches_type(t)))
            .collect();

        if candidates.is_empty() {
            report.outcome = RecommendationOutcome::Empty(EmptyReason::NoCandidates);
            return report;
        }

        let eligible: Vec<&Vehicle> = candidates
            .iter()
            .copied()
            .filter(|v| v.max_load_kg >= cargo_weight_kg)
            .collect();

        if eligible.is_empty() {
            let largest_capacity_kg = candidates
                .iter()
                .map(|v| v.max_load_kg)
                .fold(0.0, f64::max);
            tracing::info!(
                cargo_weight_kg,
                largest_capacity_kg,
                "No available vehicle can carry the cargo"
            );
            report.outcome = RecommendationOutcome::Empty(EmptyReason::NoEligibleVehicle {
                cargo_weight_kg,
                largest_capacity_kg,
            });
            return report;
        }

        let mut ranked = Vec::with_capacity(eligible.len());
        for vehicle in eligible {
            match self.score_vehicle_for_cargo(vehicle, &snapshot.trips, cargo_weight_kg) {
                Ok(score) => ranked.push(RankedVehicle {
                    vehicle_id: vehicle.id.clone(),
                    model: vehicle.model.clone(),
                    vehicle_type: vehicle.vehicle_type.clone(),
                    max_load_kg: vehicle.max_load_kg,
                    score,
                }),
                Err(e) => {
                    tracing::warn!("Skipping vehicle {} from recommendation: {}", vehicle.id, e);
                    report.skipped.push(SkippedRecord::new(&vehicle.id, e));
                }
            }
        }

        if ranked.is_empty() {
            report.outcome = RecommendationOutcome::Empty(EmptyReason::AllCandidatesInvalid);
            return report;
        }

        ranked.sort_by(|a, b| {
            b.score
                .score
                .partial_cmp(&a.score.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.vehicle_id.cmp(&b.vehicle_id))
        });

        report.outcome = RecommendationOutcome::Ranked { vehicles: ranked };
        report
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(ScoringPolicy::default())
    }
}
