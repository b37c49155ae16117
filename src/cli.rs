use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "fleetops",
    version,
    about = "Fleet operations decision support"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Fleet snapshot file (.yaml, .yml or .json)
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank available vehicles for a cargo load
    Recommend {
        /// Cargo weight in kg
        #[arg(long)]
        cargo: f64,

        /// Restrict to one vehicle type, e.g. "Heavy Truck"
        #[arg(long = "type")]
        vehicle_type: Option<String>,
    },
    /// Maintenance risk ranking
    Maintenance,
    /// Evaluate alert rules
    Alerts {
        /// Evaluation date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
    /// Vehicle ROI ranking and fleet ROI
    Roi,
    /// CO2 per fuel log
    Emissions,
    /// Fuel and operating expense report
    Fuel,
    /// Driver license and dispatch eligibility
    Drivers {
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
    /// Fleet KPIs
    Dashboard {
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
    /// Metrics for a single vehicle
    Vehicle {
        /// Vehicle id, e.g. VH-001
        id: String,
    },
    /// Validate config and snapshot
    Check,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_recommend_with_global_flags() {
        let cli = Cli::try_parse_from([
            "fleetops", "recommend", "--cargo", "4000", "--type", "Heavy Truck", "--json", "-vv",
        ])
        .unwrap();

        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Recommend {
                cargo,
                vehicle_type,
            } => {
                assert_eq!(cargo, 4000.0);
                assert_eq!(vehicle_type.as_deref(), Some("Heavy Truck"));
            }
            _ => panic!("expected recommend"),
        }
    }

    #[test]
    fn parses_as_of_date() {
        let cli = Cli::try_parse_from(["fleetops", "alerts", "--as-of", "2026-02-21"]).unwrap();
        match cli.command {
            Commands::Alerts { as_of } => {
                assert_eq!(as_of, NaiveDate::from_ymd_opt(2026, 2, 21));
            }
            _ => panic!("expected alerts"),
        }
    }

    #[test]
    fn rejects_malformed_date() {
        assert!(Cli::try_parse_from(["fleetops", "drivers", "--as-of", "21/02/2026"]).is_err());
    }
}
