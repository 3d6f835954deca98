//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid source fetch timeout")]
    InvalidFetchTimeout,

    #[error("Invalid questionnaire source URL: {0}")]
    InvalidSourceUrl(String),

    #[error("At least one report format must be enabled")]
    NoReportFormatEnabled,

    #[error("Report filename must not be empty or contain path separators")]
    InvalidReportFilename,
}
