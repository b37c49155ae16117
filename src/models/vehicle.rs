use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleStatus {
    Available,
    #[serde(rename = "On Trip", alias = "OnTrip")]
    OnTrip,
    #[serde(rename = "In Shop", alias = "InShop")]
    InShop,
    Retired,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "Available",
            VehicleStatus::OnTrip => "On Trip",
            VehicleStatus::InShop => "In Shop",
            VehicleStatus::Retired => "Retired",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', ' ', '_'], "").as_str() {
            "available" => Some(VehicleStatus::Available),
            "ontrip" => Some(VehicleStatus::OnTrip),
            "inshop" => Some(VehicleStatus::InShop),
            "retired" => Some(VehicleStatus::Retired),
            _ => None,
        }
    }

    pub fn all() -> &'static [VehicleStatus] {
        &[
            VehicleStatus::Available,
            VehicleStatus::OnTrip,
            VehicleStatus::InShop,
            VehicleStatus::Retired,
        ]
    }

    /// Retired vehicles drop out of every operational view.
    pub fn is_operational(&self) -> bool {
        !matches!(self, VehicleStatus::Retired)
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub model: String,
    #[serde(default)]
    pub plate: String,
    #[serde(rename = "type")]
    pub vehicle_type: String,
    #[serde(rename = "maxLoad")]
    pub max_load_kg: f64,
    #[serde(rename = "odometer")]
    pub odometer_km: f64,
    /// Kilometres per litre.
    pub fuel_efficiency: f64,
    pub acquisition_cost: f64,
    /// Kilograms of CO2 per litre of fuel burned.
    pub emission_factor: f64,
    #[serde(rename = "lastServiceOdometer")]
    pub last_service_odometer_km: f64,
    pub status: VehicleStatus,
}

impl Vehicle {
    pub fn new(
        id: impl Into<String>,
        model: impl Into<String>,
        vehicle_type: impl Into<String>,
        max_load_kg: f64,
    ) -> Self {
        Self {
            id: id.into(),
            model: model.into(),
            plate: String::new(),
            vehicle_type: vehicle_type.into(),
            max_load_kg,
            odometer_km: 0.0,
            fuel_efficiency: 0.0,
            acquisition_cost: 0.0,
            emission_factor: 0.0,
            last_service_odometer_km: 0.0,
            status: VehicleStatus::Available,
        }
    }

    pub fn with_plate(mut self, plate: impl Into<String>) -> Self {
        self.plate = plate.into();
        self
    }

    pub fn with_odometer(mut self, odometer_km: f64, last_service_odometer_km: f64) -> Self {
        self.odometer_km = odometer_km;
        self.last_service_odometer_km = last_service_odometer_km;
        self
    }

    pub fn with_fuel_efficiency(mut self, km_per_litre: f64) -> Self {
        self.fuel_efficiency = km_per_litre;
        self
    }

    pub fn with_acquisition_cost(mut self, cost: f64) -> Self {
        self.acquisition_cost = cost;
        self
    }

    pub fn with_emission_factor(mut self, kg_per_litre: f64) -> Self {
        self.emission_factor = kg_per_litre;
        self
    }

    pub fn with_status(mut self, status: VehicleStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_available(&self) -> bool {
        self.status == VehicleStatus::Available
    }

    pub fn matches_type(&self, vehicle_type: &str) -> bool {
        self.vehicle_type.eq_ignore_ascii_case(vehicle_type.trim())
    }
}
