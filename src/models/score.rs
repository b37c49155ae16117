use serde::{Deserialize, Serialize};

/// Per-criterion sub-scores behind a composite vehicle score, each rounded
/// to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub capacity: f64,
    pub fuel: f64,
    pub maintenance: f64,
    pub roi: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleScore {
    /// Composite score in [0, 1], rounded to two decimals.
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedVehicle {
    pub vehicle_id: String,
    pub model: String,
    pub vehicle_type: String,
    pub max_load_kg: f64,
    #[serde(flatten)]
    pub score: VehicleScore,
}

/// Why a recommendation query produced no ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum EmptyReason {
    /// Cargo weight was zero, negative or not a number.
    InvalidCargoWeight { cargo_weight_kg: f64 },
    /// No available vehicle (of the requested type) exists.
    NoCandidates,
    /// Candidates exist but none can carry the load.
    NoEligibleVehicle {
        cargo_weight_kg: f64,
        largest_capacity_kg: f64,
    },
    /// Every vehicle able to carry the load failed an integrity check.
    AllCandidatesInvalid,
}

impl EmptyReason {
    pub fn summary(&self) -> String {
        match self {
            EmptyReason::InvalidCargoWeight { cargo_weight_kg } => {
                format!("cargo weight must be positive, got {}", cargo_weight_kg)
            }
            EmptyReason::NoCandidates => "no available vehicles match the request".to_string(),
            EmptyReason::NoEligibleVehicle {
                cargo_weight_kg,
                largest_capacity_kg,
            } => format!(
                "no vehicle can carry {:.0} kg (largest available capacity {:.0} kg)",
                cargo_weight_kg, largest_capacity_kg
            ),
            EmptyReason::AllCandidatesInvalid => {
                "every eligible vehicle failed a data integrity check".to_string()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecommendationOutcome {
    Ranked { vehicles: Vec<RankedVehicle> },
    Empty(EmptyReason),
}

/// A record left out of a batch computation, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedRecord {
    pub record_id: String,
    pub reason: String,
}

impl SkippedRecord {
    pub fn new(record_id: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self {
            record_id: record_id.into(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub cargo_weight_kg: f64,
    pub vehicle_type: Option<String>,
    pub outcome: RecommendationOutcome,
    pub skipped: Vec<SkippedRecord>,
}

impl RecommendationReport {
    pub fn ranked(&self) -> &[RankedVehicle] {
        match &self.outcome {
            RecommendationOutcome::Ranked { vehicles } => vehicles,
            RecommendationOutcome::Empty(_) => &[],
        }
    }

    pub fn empty_reason(&self) -> Option<&EmptyReason> {
        match &self.outcome {
            RecommendationOutcome::Empty(reason) => Some(reason),
            RecommendationOutcome::Ranked { .. } => None,
        }
    }

    pub fn best(&self) -> Option<&RankedVehicle> {
        self.ranked().first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_reason_serializes_tagged() {
        let reason = EmptyReason::NoEligibleVehicle {
            cargo_weight_kg: 30000.0,
            largest_capacity_kg: 26000.0,
        };
        let json = serde_json::to_value(&reason).unwrap();
        assert_eq!(json["reason"], "no_eligible_vehicle");
        assert_eq!(json["largest_capacity_kg"], 26000.0);
    }

    #[test]
    fn empty_report_has_no_ranking() {
        let report = RecommendationReport {
            cargo_weight_kg: 1.0,
            vehicle_type: None,
            outcome: RecommendationOutcome::Empty(EmptyReason::NoCandidates),
            skipped: Vec::new(),
        };
        assert!(report.ranked().is_empty());
        assert!(report.best().is_none());
        assert_eq!(report.empty_reason(), Some(&EmptyReason::NoCandidates));
    }
}
