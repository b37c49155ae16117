use thiserror::Error;

#[derive(Error, Debug)]
pub enum FleetOpsError {
    #[error("Data integrity error: {0}")]
    Integrity(#[from] IntegrityError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Invariant violations found in a snapshot record.
///
/// These are never clamped or coerced; the record is reported back to the
/// caller, which decides whether to skip it or abort.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntegrityError {
    #[error(
        "vehicle {vehicle_id}: odometer {odometer_km} km is below last service reading {last_service_odometer_km} km"
    )]
    OdometerBelowLastService {
        vehicle_id: String,
        odometer_km: f64,
        last_service_odometer_km: f64,
    },

    #[error("vehicle {vehicle_id}: acquisition cost must be positive, got {acquisition_cost}")]
    NonPositiveAcquisitionCost {
        vehicle_id: String,
        acquisition_cost: f64,
    },

    #[error("vehicle {vehicle_id}: max load must be positive, got {max_load_kg} kg")]
    NonPositiveMaxLoad {
        vehicle_id: String,
        max_load_kg: f64,
    },

    #[error("fleet acquisition cost must be positive, got {total}")]
    NonPositiveFleetCost { total: f64 },
}

pub type Result<T> = std::result::Result<T, FleetOpsError>;
