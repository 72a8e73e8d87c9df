use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::store::StoreConfig;
use crate::path_policy::{PathPolicy, PathPolicyDocument};

const LOCAL_CONFIG_PATH: &str = "ferrous-pathstore.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/ferrous-pathstore/config.toml";

/// Main configuration structure for Ferrous PathStore
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Worker and maintenance configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Path policy applied to every destination store
    pub policy: PathPolicyDocument,
}

impl Config {
    /// Load configuration from file
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-pathstore.toml in current directory
    /// 3. /etc/ferrous-pathstore/config.toml
    ///
    /// There is no built-in fallback: a path policy has no safe default.
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            return Err(ConfigError::NotFound(format!(
                "{}, {}",
                LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH
            )));
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(interval) = overrides.expiry_sweep_interval_secs {
            self.store.expiry_sweep_interval_secs = interval;
        }
    }

    /// Builds the validated path policy from the `[policy]` table.
    pub fn path_policy(&self) -> Result<PathPolicy, ConfigError> {
        PathPolicy::from_document(&self.policy)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.worker_queue_depth == 0 {
            return Err(ConfigError::Validation(
                "worker_queue_depth cannot be 0".to_string(),
            ));
        }
        if self.store.expiry_sweep_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "expiry_sweep_interval_secs cannot be 0".to_string(),
            ));
        }
        let policy = self.path_policy()?;
        if !policy.valid_ranges() {
            return Err(ConfigError::Validation(
                "PropertyRanges must define PeerLinks, HopsLength, DelayTime, \
                 GuaranteedBandwidth, AvailableBandwidth and TotalBandwidth"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub expiry_sweep_interval_secs: Option<u64>,
}
