//! Layered configuration loading and validation.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::{Config, Setting};

/// Optional config file bundled next to the function binary.
pub const CONFIG_FILE: &str = "rds-bootstrap.yaml";

/// Prefix for overrides of nested settings, e.g. `RDS_BOOTSTRAP_LOGGING__LEVEL`.
pub const ENV_PREFIX: &str = "RDS_BOOTSTRAP_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A variable the handler needs is absent or empty.
    #[error("missing required setting {0}")]
    MissingSetting(&'static str),

    /// Unknown `logging.level`.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Unknown `logging.format`.
    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    /// figment failed to read or extract a layer.
    #[error("Configuration could not be loaded: {0}")]
    LoadFailed(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. `rds-bootstrap.yaml` in the working directory (optional)
    /// 3. The raw ambient variables (`DB_HOST`, `DB_NAME`, ...)
    /// 4. `RDS_BOOTSTRAP_*` variables (highest priority)
    pub fn load() -> Result<Config> {
        Self::load_from(CONFIG_FILE)
    }

    /// Same layering as [`ConfigLoader::load`] with an explicit file path.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Self::figment(path.as_ref())
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn figment(path: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Serialized::defaults(Self::ambient_values()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// The raw ambient variables, taken verbatim.
    ///
    /// `Env` parses values, which turns `AWS_ACCOUNT=012345678901` into an
    /// integer and drops the leading zero; these stay text.
    fn ambient_values() -> BTreeMap<String, String> {
        let ambient: Vec<&'static str> = Setting::ALL.iter().map(Setting::env_var).collect();
        Env::raw()
            .only(&ambient)
            .iter()
            .map(|(key, value)| (key.as_str().to_lowercase(), value))
            .collect()
    }

    /// Validate configuration after loading
    ///
    /// Ambient values are not checked here; each handler requires only the
    /// ones it uses.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}
