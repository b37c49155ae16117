use super::policy::ScoringPolicy;
use crate::error::{IntegrityError, Result};
use crate::models::{FuelLog, MaintenanceLog, Trip, Vehicle};

/// Extra digits printed past the rounding position to detect an exact tie.
const TIE_DIGITS: usize = 30;

/// Round to a fixed number of decimal places, as a decimal display does.
///
/// The exact stored value is rounded, so `0.075` (stored just below it)
/// becomes `0.07`. Exact ties such as `0.125` go away from zero.
pub fn round_to(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let places = places as usize;
    let magnitude = value.abs();

    // a value merely close to a tie differs from it well within these digits
    let expanded = format!("{:.*}", places + TIE_DIGITS, magnitude);
    let (kept, tail) = expanded.split_at(expanded.len() - TIE_DIGITS);
    let exact_tie = tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0');

    let rounded = if exact_tie {
        let truncated: f64 = kept.trim_end_matches('.').parse().unwrap_or(magnitude);
        let step = 10f64.powi(-(places as i32));
        format!("{:.*}", places, truncated + step)
    } else {
        format!("{:.*}", places, magnitude)
    };

    rounded.parse::<f64>().unwrap_or(magnitude).copysign(value)
}

/// Kilometres driven since the last recorded service.
///
/// Fails when the last service reading is ahead of the odometer.
pub fn distance_since_service(vehicle: &Vehicle) -> Result<f64> {
    let distance = vehicle.odometer_km - vehicle.last_service_odometer_km;
    if distance < 0.0 {
        return Err(IntegrityError::OdometerBelowLastService {
            vehicle_id: vehicle.id.clone(),
            odometer_km: vehicle.odometer_km,
            last_service_odometer_km: vehicle.last_service_odometer_km,
        }
        .into());
    }
    Ok(distance)
}

pub fn is_service_due_soon(vehicle: &Vehicle, policy: &ScoringPolicy) -> Result<bool> {
    Ok(distance_since_service(vehicle)? > policy.service_due_threshold_km)
}

/// Blend of mileage since service, trip frequency and fuel inefficiency.
///
/// `trips` may hold the whole fleet's trips; only the ones referencing this
/// vehicle are counted. Result is in [0, 1], rounded to two decimals.
pub fn maintenance_risk_score(
    vehicle: &Vehicle,
    trips: &[Trip],
    policy: &ScoringPolicy,
) -> Result<f64> {
    let distance = distance_since_service(vehicle)?;
    let trip_count = trips_for_vehicle(trips, &vehicle.id).count();

    let mileage = unit(distance / policy.risk_mileage_normalizer_km);
    let frequency = unit(trip_count as f64 / policy.risk_trip_normalizer);
    let inefficiency = 1.0 - fuel_efficiency_factor(vehicle, policy);

    let weights = &policy.risk_weights;
    let risk = weights.mileage * mileage
        + weights.trip_frequency * frequency
        + weights.fuel_inefficiency * inefficiency;

    Ok(round_to(risk, 2))
}

/// Kilograms of CO2 for the fuel burned, rounded to one decimal.
pub fn carbon_emission(fuel_used: f64, emission_factor: f64) -> f64 {
    round_to(fuel_used * emission_factor, 1)
}

/// Net trip revenue over acquisition cost, rounded to two decimals.
///
/// Revenue counts completed trips of the vehicle; cost is its fuel spend
/// plus its maintenance log costs. Collections may be fleet-wide.
pub fn roi(
    vehicle: &Vehicle,
    trips: &[Trip],
    fuel_logs: &[FuelLog],
    maintenance_logs: &[MaintenanceLog],
    policy: &ScoringPolicy,
) -> Result<f64> {
    ensure_positive_acquisition_cost(vehicle)?;

    let completed = trips_for_vehicle(trips, &vehicle.id)
        .filter(|t| t.is_completed())
        .count();
    let revenue = completed as f64 * policy.revenue_per_trip;
    let cost = fuel_cost(fuel_logs, &vehicle.id) + maintenance_cost(maintenance_logs, &vehicle.id);

    Ok(round_to((revenue - cost) / vehicle.acquisition_cost, 2))
}

pub fn fuel_cost(fuel_logs: &[FuelLog], vehicle_id: &str) -> f64 {
    fuel_logs
        .iter()
        .filter(|f| f.vehicle_id == vehicle_id)
        .map(|f| f.fuel_cost)
        .sum()
}

pub fn maintenance_cost(maintenance_logs: &[MaintenanceLog], vehicle_id: &str) -> f64 {
    maintenance_logs
        .iter()
        .filter(|m| m.vehicle_id == vehicle_id)
        .map(|m| m.cost)
        .sum()
}

pub(crate) fn trips_for_vehicle<'a>(
    trips: &'a [Trip],
    vehicle_id: &'a str,
) -> impl Iterator<Item = &'a Trip> + 'a {
    trips.iter().filter(move |t| t.vehicle_id == vehicle_id)
}

pub(crate) fn fuel_efficiency_factor(vehicle: &Vehicle, policy: &ScoringPolicy) -> f64 {
    unit(vehicle.fuel_efficiency / policy.fuel_efficiency_normalizer)
}

pub(crate) fn ensure_positive_acquisition_cost(vehicle: &Vehicle) -> Result<()> {
    if vehicle.acquisition_cost <= 0.0 {
        return Err(IntegrityError::NonPositiveAcquisitionCost {
            vehicle_id: vehicle.id.clone(),
            acquisition_cost: vehicle.acquisition_cost,
        }
        .into());
    }
    Ok(())
}

/// Clamp to [0, 1].
pub(crate) fn unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
