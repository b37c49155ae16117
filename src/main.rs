use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use fleetops::cli::{Cli, Commands};
use fleetops::config::Config;
use fleetops::logic::{alerts, reports, AlertEngine, RecommendationEngine};
use fleetops::models::FleetSnapshot;
use fleetops::output;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Commands::Init { force } = &cli.command {
        let path = match &cli.config {
            Some(p) => p.clone(),
            None => Config::default_config_path()?,
        };
        Config::default()
            .write_to(&path, *force)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Configuration saved to {}", path.display());
        return Ok(());
    }

    let config = Config::load(cli.config.clone()).context("loading configuration")?;
    let data_path = config.dataset_path(cli.data.as_deref());
    let snapshot = match &data_path {
        Some(path) => FleetSnapshot::load(path)
            .with_context(|| format!("loading fleet snapshot {}", path.display()))?,
        None => FleetSnapshot::demo().context("loading the built-in demo fleet")?,
    };

    let policy = config.policy.clone();
    let currency = config.fleet.currency.as_str();

    match cli.command {
        Commands::Recommend {
            cargo,
            vehicle_type,
        } => {
            let report = RecommendationEngine::new(policy).recommend(
                &snapshot,
                cargo,
                vehicle_type.as_deref(),
            );
            emit(cli.json, &report, || output::recommendation(&report))?;
        }
        Commands::Maintenance => {
            let ranking = alerts::rank_maintenance_risk(&snapshot, &policy);
            emit(cli.json, &ranking, || output::maintenance(&ranking))?;
        }
        Commands::Alerts { as_of } => {
            let fleet_alerts = AlertEngine::new(policy).evaluate(&snapshot, today_or(as_of));
            emit(cli.json, &fleet_alerts, || output::alerts(&fleet_alerts))?;
        }
        Commands::Roi => {
            let ranking = reports::vehicle_roi_ranking(&snapshot, &policy);
            let fleet_roi = match reports::fleet_roi_percent(&snapshot, &policy) {
                Ok(pct) => Some(pct),
                Err(e) => {
                    tracing::warn!("Fleet ROI unavailable: {}", e);
                    None
                }
            };
            let value = serde_json::json!({
                "vehicles": ranking,
                "fleet_roi_percent": fleet_roi,
            });
            emit(cli.json, &value, || output::roi(&ranking, fleet_roi, currency))?;
        }
        Commands::Emissions => {
            let report = reports::emission_report(&snapshot);
            emit(cli.json, &report, || output::emissions(&report))?;
        }
        Commands::Fuel => {
            let report = reports::fuel_expense_report(&snapshot);
            emit(cli.json, &report, || output::fuel(&report, currency))?;
        }
        Commands::Drivers { as_of } => {
            let roster = reports::driver_roster(&snapshot, &policy, today_or(as_of));
            emit(cli.json, &roster, || output::drivers(&roster))?;
        }
        Commands::Dashboard { as_of } => {
            let kpis = reports::fleet_kpis(&snapshot, &policy, today_or(as_of));
            emit(cli.json, &kpis, || output::dashboard(&config.fleet.name, &kpis))?;
        }
        Commands::Vehicle { id } => {
            let profile = reports::vehicle_profile(&snapshot, &policy, &id)?;
            emit(cli.json, &profile, || output::vehicle(&profile, currency))?;
        }
        Commands::Check => {
            let issues = snapshot.validate();
            emit(cli.json, &issues, || output::issues(&issues))?;
            if !issues.is_empty() {
                let source = data_path
                    .as_ref()
                    .map_or_else(|| "the demo fleet".to_string(), |p| p.display().to_string());
                bail!("{} issue(s) found in {}", issues.len(), source);
            }
        }
        Commands::Init { .. } => unreachable!("handled before loading the snapshot"),
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise `warn`, raised by each `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn today_or(as_of: Option<NaiveDate>) -> NaiveDate {
    as_of.unwrap_or_else(|| Local::now().date_naive())
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", text());
    }
    Ok(())
}
