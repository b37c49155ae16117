//! Fleet operations decision support.
//!
//! Ranks vehicles for a cargo load, scores maintenance risk, and computes
//! ROI, emissions and fleet KPIs over an immutable [`models::FleetSnapshot`].

pub mod cli;
pub mod config;
pub mod error;
pub mod logic;
pub mod models;
pub mod output;

#[cfg(test)]
mod fixtures;
