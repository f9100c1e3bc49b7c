//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration is loaded from a TOML file with environment variable
//! overrides for the account credentials (`PADDOCK_USERNAME`,
//! `PADDOCK_PASSWORD`).
//!
//! # Example
//!
//! ```no_run
//! use paddock::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::logging::LoggingConfig;
use super::retry::RetryConfig;
use crate::adapter::outbound::betfair::AccountConfig;
use crate::adapter::outbound::results::ResultsConfig;
use crate::application::racing::RacingConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Attempt budget and backoff for every exchange call.
    #[serde(default)]
    pub retry: RetryConfig,

    /// Exchange login. Credentials usually come from the environment.
    #[serde(default)]
    pub account: AccountConfig,

    /// Published results feed.
    #[serde(default)]
    pub results: ResultsConfig,

    /// Event and market selection for horse racing.
    #[serde(default)]
    pub racing: RacingConfig,
}

impl Config {
    /// Parse configuration from TOML content and apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        if let Ok(username) = std::env::var("PADDOCK_USERNAME") {
            config.account.username = Some(username);
        }
        if let Ok(password) = std::env::var("PADDOCK_PASSWORD") {
            config.account.password = Some(password);
        }

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.retry.max_retries == 0 {
            return Err(ConfigError::InvalidValue {
                field: "retry.max_retries",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.results.feed_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "results.feed_url",
            }
            .into());
        }
        if self.results.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "results.timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        self.racing.filters()?;
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
