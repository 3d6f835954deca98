//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `QUESTIONNAIRE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use questionnaire_engine::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Serving questionnaire from {}", config.source.location);
//! ```

mod error;
mod report;
mod server;
mod site;
mod source;

pub use error::{ConfigError, ValidationError};
pub use report::ReportConfig;
pub use server::{Environment, ServerConfig};
pub use site::SiteConfig;
pub use source::{SourceConfig, SourceLocation};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Question graph source (file path or URL)
    #[serde(default)]
    pub source: SourceConfig,

    /// Report export settings
    #[serde(default)]
    pub report: ReportConfig,

    /// Presentation values for the view layer
    #[serde(default)]
    pub site: SiteConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `QUESTIONNAIRE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `QUESTIONNAIRE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `QUESTIONNAIRE__SOURCE__LOCATION=./questions.json` -> `source.location = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("QUESTIONNAIRE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.source.validate()?;
        self.report.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
