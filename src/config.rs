use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use validator::Validate;

use crate::models::DEFAULT_GROUND_BUFFER;

/// Default values for configuration
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_ENV: &str = "development";
const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;
const CONFIG_DIR: &str = "config";

/// Staging engine configuration with validation.
///
/// Everything has a sensible default; deployments override through
/// `config/{environment}.toml` files or `APP__`-prefixed environment
/// variables (e.g. `APP__GROUND_BUFFER_LOCATION=FLOOR`).
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct StagingConfig {
    /// Storage location exempt from the one-SKU-per-location rule.
    #[serde(default = "default_ground_buffer")]
    #[validate(length(min = 1))]
    pub ground_buffer_location: String,

    /// Capacity of the domain-event channel.
    #[serde(default = "default_event_buffer_size")]
    pub event_buffer_size: usize,

    /// Default tracing filter when RUST_LOG is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_ground_buffer() -> String {
    DEFAULT_GROUND_BUFFER.to_string()
}

fn default_event_buffer_size() -> usize {
    DEFAULT_EVENT_BUFFER_SIZE
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            ground_buffer_location: default_ground_buffer(),
            event_buffer_size: default_event_buffer_size(),
            log_level: default_log_level(),
        }
    }
}

impl StagingConfig {
    /// Loads configuration from the optional per-environment file and the
    /// environment, then validates it.
    pub fn load() -> Result<Self, ConfigError> {
        let environment = env::var("APP_ENV").unwrap_or_else(|_| DEFAULT_ENV.to_string());
        let config: Self = Config::builder()
            .add_source(File::with_name(&format!("{}/{}", CONFIG_DIR, environment)).required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()?;
        config
            .validate()
            .map_err(|e| ConfigError::Message(format!("invalid configuration: {}", e)))?;
        Ok(config)
    }

    pub fn ground_buffer(&self) -> &str {
        &self.ground_buffer_location
    }
}
