//! Site presentation configuration

use serde::Deserialize;

/// Presentation values handed to the view layer
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Title shown above the questionnaire
    #[serde(default = "default_app_title")]
    pub app_title: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            app_title: default_app_title(),
        }
    }
}

fn default_app_title() -> String {
    "Questionnaire".to_string()
}
