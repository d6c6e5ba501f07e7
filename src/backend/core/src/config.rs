//! Configuration management.

use serde::Deserialize;
use std::path::Path;

use crate::error::Result;
use crate::telemetry::TelemetryConfig;

const ENV_PREFIX: &str = "RIVALS_ACCESS";
const ENV_SEPARATOR: &str = "__";

/// Main library configuration.
///
/// The role registry is compiled in; what remains configurable is how the
/// process reports on itself.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging configuration and service identity
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl Config {
    /// Load configuration from `.env` and `RIVALS_ACCESS__*` environment variables.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR))
            .build()?;

        let cfg: Config = config.try_deserialize()?;
        Ok(cfg)
    }

    /// Load from a specific file path, with environment variables layered on top.
    ///
    /// The format is taken from the file extension (`toml`, `yaml`, `json`).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR))
            .build()?;

        let cfg: Config = config.try_deserialize()?;
        Ok(cfg)
    }
}
