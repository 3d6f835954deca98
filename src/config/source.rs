//! Questionnaire source configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Where the question graph definition is fetched from
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// File path or http(s) URL of the graph document
    #[serde(default)]
    pub location: String,

    /// Fetch timeout in seconds (remote sources only)
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

/// Resolved kind of source location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Url(String),
    File(String),
}

impl SourceConfig {
    /// Get fetch timeout as Duration
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Classify the location as URL or file path
    pub fn resolve(&self) -> SourceLocation {
        let location = self.location.trim();
        if is_remote(location) {
            SourceLocation::Url(location.to_string())
        } else {
            SourceLocation::File(location.to_string())
        }
    }

    /// Validate source configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let location = self.location.trim();
        if location.is_empty() {
            return Err(ValidationError::MissingRequired("SOURCE__LOCATION"));
        }
        if is_remote(location) {
            reqwest::Url::parse(location)
                .map_err(|e| ValidationError::InvalidSourceUrl(e.to_string()))?;
        }
        if self.fetch_timeout_secs == 0 || self.fetch_timeout_secs > 120 {
            return Err(ValidationError::InvalidFetchTimeout);
        }
        Ok(())
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: String::new(),
            fetch_timeout_secs: default_fetch_timeout(),
        }
    }
}

fn is_remote(location: &str) -> bool {
    let lower = location.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn default_fetch_timeout() -> u64 {
    10
}
