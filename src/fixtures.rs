use crate::models::FleetSnapshot;
use chrono::NaiveDate;

pub fn demo_snapshot() -> FleetSnapshot {
    FleetSnapshot::demo().expect("demo fleet parses")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}
