//! Report export configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Which report renderers are registered and how downloads are named
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Register the PDF renderer
    #[serde(default = "default_true")]
    pub enable_pdf: bool,

    /// Register the plain-text renderer
    #[serde(default = "default_true")]
    pub enable_text: bool,

    /// Download filename without extension
    #[serde(default = "default_filename")]
    pub filename: String,
}

impl ReportConfig {
    /// Validate report configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.enable_pdf && !self.enable_text {
            return Err(ValidationError::NoReportFormatEnabled);
        }
        let name = self.filename.trim();
        if name.is_empty() || name.contains('/') || name.contains('\\') {
            return Err(ValidationError::InvalidReportFilename);
        }
        Ok(())
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            enable_pdf: true,
            enable_text: true,
            filename: default_filename(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_filename() -> String {
    "questionnaire-result".to_string()
}
