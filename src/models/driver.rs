use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriverStatus {
    #[serde(rename = "On Duty", alias = "OnDuty")]
    OnDuty,
    #[serde(rename = "Off Duty", alias = "OffDuty")]
    OffDuty,
    Suspended,
}

impl DriverStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverStatus::OnDuty => "On Duty",
            DriverStatus::OffDuty => "Off Duty",
            DriverStatus::Suspended => "Suspended",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', ' ', '_'], "").as_str() {
            "onduty" => Some(DriverStatus::OnDuty),
            "offduty" => Some(DriverStatus::OffDuty),
            "suspended" => Some(DriverStatus::Suspended),
            _ => None,
        }
    }

    pub fn all() -> &'static [DriverStatus] {
        &[
            DriverStatus::OnDuty,
            DriverStatus::OffDuty,
            DriverStatus::Suspended,
        ]
    }
}

impl std::fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: String,
    pub name: String,
    pub license_category: String,
    pub license_expiry: NaiveDate,
    /// Percentage of assigned trips completed, 0-100.
    pub completion_rate: f64,
    /// 0-100.
    pub safety_score: f64,
    pub status: DriverStatus,
    pub total_trips: u32,
}

impl Driver {
    pub fn new(id: impl Into<String>, name: impl Into<String>, license_expiry: NaiveDate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            license_category: String::new(),
            license_expiry,
            completion_rate: 0.0,
            safety_score: 0.0,
            status: DriverStatus::OffDuty,
            total_trips: 0,
        }
    }

    pub fn with_status(mut self, status: DriverStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_license_category(mut self, category: impl Into<String>) -> Self {
        self.license_category = category.into();
        self
    }

    /// A license is no longer valid from its expiry date onwards.
    pub fn license_expired(&self, today: NaiveDate) -> bool {
        self.license_expiry <= today
    }

    /// Whole days until the license expires; negative once expired.
    pub fn days_until_expiry(&self, today: NaiveDate) -> i64 {
        (self.license_expiry - today).num_days()
    }
}
