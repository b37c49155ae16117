use crate::error::{FleetOpsError, Result};
use crate::logic::policy::ScoringPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "fleetops";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub fleet: FleetConfig,
    #[serde(default)]
    pub policy: ScoringPolicy,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FleetConfig {
    pub name: String,
    /// Snapshot file used when `--data` is not given; unset means the demo fleet.
    pub dataset: Option<PathBuf>,
    /// Label printed next to money amounts.
    pub currency: String,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            name: "Main Fleet".into(),
            dataset: None,
            currency: "USD".into(),
        }
    }
}

impl Config {
    /// Load from an explicit path, or from the first standard location found.
    ///
    /// Without an explicit path and with no file on disk, the built-in
    /// defaults are used.
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(FleetOpsError::Config(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                p
            }
            None => match Self::find_config_path() {
                Some(p) => p,
                None => {
                    tracing::debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| FleetOpsError::Config(format!("Failed to read config: {}", e)))?;

        let config = Self::from_yaml_str(&config_str)?;
        tracing::info!("Loaded config from {}", config_path.display());
        Ok(config)
    }

    /// Parse YAML after `${VAR}` substitution, then validate.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let content = substitute_env_vars(content)?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| FleetOpsError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fleet.name.trim().is_empty() {
            return Err(FleetOpsError::Config("fleet.name must not be empty".into()));
        }
        self.policy.validate()
    }

    /// Snapshot path: CLI override, then the configured dataset.
    ///
    /// `None` selects the built-in demo fleet.
    pub fn dataset_path(&self, data_override: Option<&Path>) -> Option<PathBuf> {
        data_override
            .map(Path::to_path_buf)
            .or_else(|| self.fleet.dataset.clone())
    }

    /// Search for config.yaml in the working directory, then the XDG config dir.
    fn find_config_path() -> Option<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join("config.yaml"))
            .filter(|p| p.exists())
    }

    /// Default path for writing new config files (~/.config/fleetops/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| FleetOpsError::Config("Cannot determine config directory".into()))?
            .join(APP_DIR);
        Ok(config_dir.join("config.yaml"))
    }

    /// Write this config as YAML; refuses to overwrite unless `force`.
    pub fn write_to(&self, path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            return Err(FleetOpsError::Config(format!(
                "Config file already exists at {:?}",
                path
            )));
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)
            .map_err(|e| FleetOpsError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# FleetOps Configuration\n# Generated by `fleetops init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Replace `${VAR_NAME}` with the environment value; unknown variables stay as-is.
fn substitute_env_vars(content: &str) -> Result<String> {
    let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| FleetOpsError::Config(format!("Invalid substitution pattern: {}", e)))?;

    let mut result = content.to_string();
    for cap in re.captures_iter(content) {
        let var_name = &cap[1];
        let placeholder = &cap[0];
        if let Ok(value) = std::env::var(var_name) {
            result = result.replace(placeholder, &value);
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_yaml_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.policy.revenue_per_trip, 1500.0);
    }

    #[test]
    fn partial_policy_keeps_other_defaults() {
        let yaml = r#"
fleet:
  name: "Southeast Region"
  dataset: "fleet/current.json"
policy:
  revenue_per_trip: 2000
  service_due_threshold_km: 8000
"#;
        let config = Config::from_yaml_str(yaml).unwrap();

        assert_eq!(config.fleet.name, "Southeast Region");
        assert_eq!(config.fleet.currency, "USD");
        assert_eq!(config.policy.revenue_per_trip, 2000.0);
        assert_eq!(config.policy.service_due_threshold_km, 8000.0);
        assert_eq!(config.policy.risk_trip_normalizer, 10.0);
        assert_eq!(
            config.dataset_path(None),
            Some(PathBuf::from("fleet/current.json"))
        );
    }

    #[test]
    fn rejects_weights_not_summing_to_one() {
        let yaml = r#"
policy:
  score_weights:
    capacity: 0.5
    fuel: 0.3
    maintenance: 0.2
    roi: 0.1
"#;
        let err = Config::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, FleetOpsError::Config(_)));
    }

    #[test]
    fn rejects_blank_fleet_name() {
        let err = Config::from_yaml_str("fleet:\n  name: \"  \"\n").unwrap_err();
        assert!(err.to_string().contains("fleet.name"));
    }

    #[test]
    fn substitutes_environment_variables() {
        std::env::set_var("FLEETOPS_TEST_DATASET", "/srv/fleet.yaml");
        let config =
            Config::from_yaml_str("fleet:\n  dataset: \"${FLEETOPS_TEST_DATASET}\"\n").unwrap();
        assert_eq!(config.fleet.dataset, Some(PathBuf::from("/srv/fleet.yaml")));
    }

    #[test]
    fn unknown_variables_are_left_in_place() {
        let out = substitute_env_vars("name: ${FLEETOPS_SURELY_UNSET_VAR}").unwrap();
        assert_eq!(out, "name: ${FLEETOPS_SURELY_UNSET_VAR}");
    }

    #[test]
    fn dataset_override_wins() {
        let mut config = Config::default();
        assert_eq!(
            config.dataset_path(Some(Path::new("other.json"))),
            Some(PathBuf::from("other.json"))
        );

        config.fleet.dataset = Some(PathBuf::from("fleet/current.json"));
        assert_eq!(
            config.dataset_path(Some(Path::new("other.json"))),
            Some(PathBuf::from("other.json"))
        );
    }

    #[test]
    fn no_dataset_selects_the_demo_fleet() {
        assert_eq!(Config::default().dataset_path(None), None);
    }

    #[test]
    fn serialized_default_parses_back() {
        let yaml = serde_yaml::to_string(&Config::default()).unwrap();
        assert_eq!(Config::from_yaml_str(&yaml).unwrap(), Config::default());
    }
}
