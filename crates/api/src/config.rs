//! Server configuration
//!
//! Layered as built-in defaults, then an optional TOML file, then
//! `FORECAST_*` environment variables.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::Level;

/// Environment variable prefix for overrides (`FORECAST_PORT=8080`)
pub const ENV_PREFIX: &str = "FORECAST";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Max tracing level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Batch size for generate requests without a count
    pub default_generate_count: u32,
    /// Largest batch a generate request may ask for
    pub max_generate_count: u32,
    /// Reject creating a second forecast for an existing date
    pub unique_dates: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            log_level: "info".to_string(),
            default_generate_count: forecast_generator::DEFAULT_COUNT,
            max_generate_count: forecast_service::DEFAULT_MAX_GENERATE_COUNT,
            unique_dates: false,
        }
    }
}

impl ServerConfig {
    /// Load configuration from defaults, an optional file and the environment
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Self::defaults()?;
        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path));
        }
        builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let defaults = Self::default();
        Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("log_level", defaults.log_level)?
            .set_default("default_generate_count", i64::from(defaults.default_generate_count))?
            .set_default("max_generate_count", i64::from(defaults.max_generate_count))?
            .set_default("unique_dates", defaults.unique_dates)
    }

    /// Parsed tracing level
    pub fn level(&self) -> Result<Level, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::Message(format!("invalid log_level '{}'", self.log_level)))
    }
}
