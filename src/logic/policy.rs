use crate::error::{FleetOpsError, Result};
use crate::models::RiskBand;
use serde::{Deserialize, Serialize};

/// Weights and thresholds used by every calculator, the recommendation
/// engine and the alert rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    /// Distance since last service above which a vehicle is flagged.
    pub service_due_threshold_km: f64,
    /// Distance since service at which the mileage factor saturates.
    pub risk_mileage_normalizer_km: f64,
    /// Trip count at which the trip-frequency factor saturates.
    pub risk_trip_normalizer: f64,
    /// Fuel efficiency (km/l) treated as perfect.
    pub fuel_efficiency_normalizer: f64,
    pub risk_weights: RiskWeights,
    pub score_weights: ScoreWeights,
    /// Share of the capacity score lost by a vehicle twice as large as the cargo.
    pub oversize_penalty: f64,
    /// Acquisition cost unit for the ROI sub-score.
    pub roi_cost_normalizer: f64,
    pub revenue_per_trip: f64,
    pub risk_bands: RiskBands,
    pub license_warning_days: i64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            service_due_threshold_km: 5000.0,
            risk_mileage_normalizer_km: 10000.0,
            risk_trip_normalizer: 10.0,
            fuel_efficiency_normalizer: 10.0,
            risk_weights: RiskWeights::default(),
            score_weights: ScoreWeights::default(),
            oversize_penalty: 0.5,
            roi_cost_normalizer: 100000.0,
            revenue_per_trip: 1500.0,
            risk_bands: RiskBands::default(),
            license_warning_days: 90,
        }
    }
}

impl ScoringPolicy {
    pub fn validate(&self) -> Result<()> {
        let positives = [
            ("service_due_threshold_km", self.service_due_threshold_km),
            ("risk_mileage_normalizer_km", self.risk_mileage_normalizer_km),
            ("risk_trip_normalizer", self.risk_trip_normalizer),
            ("fuel_efficiency_normalizer", self.fuel_efficiency_normalizer),
            ("roi_cost_normalizer", self.roi_cost_normalizer),
        ];
        for (name, value) in positives {
            if !(value.is_finite() && value > 0.0) {
                return Err(FleetOpsError::Config(format!(
                    "policy.{} must be positive, got {}",
                    name, value
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.oversize_penalty) {
            return Err(FleetOpsError::Config(format!(
                "policy.oversize_penalty must be within [0, 1], got {}",
                self.oversize_penalty
            )));
        }
        if self.revenue_per_trip < 0.0 {
            return Err(FleetOpsError::Config(format!(
                "policy.revenue_per_trip must not be negative, got {}",
                self.revenue_per_trip
            )));
        }
        if self.license_warning_days < 0 {
            return Err(FleetOpsError::Config(
                "policy.license_warning_days must not be negative".into(),
            ));
        }

        check_weights(
            "risk_weights",
            &[
                self.risk_weights.mileage,
                self.risk_weights.trip_frequency,
                self.risk_weights.fuel_inefficiency,
            ],
        )?;
        check_weights(
            "score_weights",
            &[
                self.score_weights.capacity,
                self.score_weights.fuel,
                self.score_weights.maintenance,
                self.score_weights.roi,
            ],
        )?;

        self.risk_bands.validate()
    }
}

fn check_weights(name: &str, weights: &[f64]) -> Result<()> {
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(FleetOpsError::Config(format!(
            "policy.{} must be non-negative",
            name
        )));
    }
    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > 1e-6 {
        return Err(FleetOpsError::Config(format!(
            "policy.{} must sum to 1, got {}",
            name, sum
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskWeights {
    pub mileage: f64,
    pub trip_frequency: f64,
    pub fuel_inefficiency: f64,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            mileage: 0.4,
            trip_frequency: 0.3,
            fuel_inefficiency: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub capacity: f64,
    pub fuel: f64,
    pub maintenance: f64,
    pub roi: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            capacity: 0.4,
            fuel: 0.3,
            maintenance: 0.2,
            roi: 0.1,
        }
    }
}

/// Risk score boundaries: above `high_above` is High, from `medium_from`
/// up to and including `high_above` is Medium, anything lower is Low.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskBands {
    pub high_above: f64,
    pub medium_from: f64,
}

impl Default for RiskBands {
    fn default() -> Self {
        Self {
            high_above: 0.6,
            medium_from: 0.3,
        }
    }
}

impl RiskBands {
    pub fn classify(&self, risk_score: f64) -> RiskBand {
        if risk_score > self.high_above {
            RiskBand::High
        } else if risk_score >= self.medium_from {
            RiskBand::Medium
        } else {
            RiskBand::Low
        }
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.medium_from)
            || !(0.0..=1.0).contains(&self.high_above)
            || self.medium_from > self.high_above
        {
            return Err(FleetOpsError::Config(format!(
                "policy.risk_bands must satisfy 0 <= medium_from ({}) <= high_above ({}) <= 1",
                self.medium_from, self.high_above
            )));
        }
        Ok(())
    }
}
