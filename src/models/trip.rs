use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TripStatus {
    Draft,
    Dispatched,
    Completed,
    Cancelled,
}

impl TripStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Draft => "Draft",
            TripStatus::Dispatched => "Dispatched",
            TripStatus::Completed => "Completed",
            TripStatus::Cancelled => "Cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(TripStatus::Draft),
            "dispatched" => Some(TripStatus::Dispatched),
            "completed" => Some(TripStatus::Completed),
            "cancelled" | "canceled" => Some(TripStatus::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for TripStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    pub vehicle_id: String,
    pub driver_id: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    #[serde(rename = "distance")]
    pub distance_km: f64,
    #[serde(rename = "cargoWeight")]
    pub cargo_weight_kg: f64,
    #[serde(default)]
    pub vehicle_type: String,
    pub estimated_fuel_cost: f64,
    pub status: TripStatus,
    #[serde(default)]
    pub created_at: Option<NaiveDate>,
    #[serde(rename = "carbonEmission", default)]
    pub carbon_emission_kg: Option<f64>,
}

impl Trip {
    pub fn new(
        id: impl Into<String>,
        vehicle_id: impl Into<String>,
        driver_id: impl Into<String>,
        status: TripStatus,
    ) -> Self {
        Self {
            id: id.into(),
            vehicle_id: vehicle_id.into(),
            driver_id: driver_id.into(),
            origin: String::new(),
            destination: String::new(),
            distance_km: 0.0,
            cargo_weight_kg: 0.0,
            vehicle_type: String::new(),
            estimated_fuel_cost: 0.0,
            status,
            created_at: None,
            carbon_emission_kg: None,
        }
    }

    pub fn with_route(mut self, origin: impl Into<String>, destination: impl Into<String>) -> Self {
        self.origin = origin.into();
        self.destination = destination.into();
        self
    }

    pub fn with_distance(mut self, distance_km: f64) -> Self {
        self.distance_km = distance_km;
        self
    }

    pub fn with_cargo(mut self, cargo_weight_kg: f64) -> Self {
        self.cargo_weight_kg = cargo_weight_kg;
        self
    }

    pub fn is_completed(&self) -> bool {
        self.status == TripStatus::Completed
    }
}
