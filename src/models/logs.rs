use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceLog {
    pub id: String,
    pub vehicle_id: String,
    #[serde(default)]
    pub service_type: String,
    pub cost: f64,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl MaintenanceLog {
    pub fn new(
        id: impl Into<String>,
        vehicle_id: impl Into<String>,
        cost: f64,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            vehicle_id: vehicle_id.into(),
            service_type: String::new(),
            cost,
            date,
            notes: None,
        }
    }

    pub fn with_service_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = service_type.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelLog {
    pub id: String,
    pub trip_id: String,
    pub vehicle_id: String,
    pub driver_id: String,
    /// Litres.
    pub fuel_used: f64,
    pub fuel_cost: f64,
    #[serde(default)]
    pub maintenance_cost: f64,
}

impl FuelLog {
    pub fn new(
        id: impl Into<String>,
        trip_id: impl Into<String>,
        vehicle_id: impl Into<String>,
        driver_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            trip_id: trip_id.into(),
            vehicle_id: vehicle_id.into(),
            driver_id: driver_id.into(),
            fuel_used: 0.0,
            fuel_cost: 0.0,
            maintenance_cost: 0.0,
        }
    }

    pub fn with_fuel(mut self, fuel_used: f64, fuel_cost: f64) -> Self {
        self.fuel_used = fuel_used;
        self.fuel_cost = fuel_cost;
        self
    }

    pub fn with_maintenance_cost(mut self, cost: f64) -> Self {
        self.maintenance_cost = cost;
        self
    }

    pub fn total_cost(&self) -> f64 {
        self.fuel_cost + self.maintenance_cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maintenance_log_notes_are_optional() {
        let json = r#"{"id":"MT-002","vehicleId":"VH-001","serviceType":"Oil Change","cost":250,"date":"2026-02-10"}"#;
        let log: MaintenanceLog = serde_json::from_str(json).unwrap();
        assert_eq!(log.notes, None);
        assert_eq!(log.date, NaiveDate::from_ymd_opt(2026, 2, 10).unwrap());
    }

    #[test]
    fn fuel_log_total_cost() {
        let log = FuelLog::new("FL-003", "TR-006", "VH-007", "DR-001")
            .with_fuel(127.0, 279.0)
            .with_maintenance_cost(50.0);
        assert_eq!(log.total_cost(), 329.0);
    }
}
