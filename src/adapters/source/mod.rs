//! Graph source adapters - Implementations of the GraphSource port.
//!
//! - `FileGraphSource` - JSON or YAML document on the local filesystem
//! - `HttpGraphSource` - JSON or YAML document fetched over HTTP(S)
//! - `InMemoryGraphSource` - Fixed definitions, for tests and embedding

mod file_graph_source;
mod http_graph_source;
mod in_memory_graph_source;

pub use file_graph_source::FileGraphSource;
pub use http_graph_source::HttpGraphSource;
pub use in_memory_graph_source::InMemoryGraphSource;

use crate::domain::questionnaire::QuestionDefinition;
use crate::ports::GraphSourceError;

/// Serialization of a graph document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Guesses the format from a path or URL suffix. Defaults to JSON.
    pub(crate) fn from_location(location: &str) -> Self {
        let path = location.split(['?', '#']).next().unwrap_or(location);
        let lower = path.to_ascii_lowercase();
        if lower.ends_with(".yaml") || lower.ends_with(".yml") {
            DocumentFormat::Yaml
        } else {
            DocumentFormat::Json
        }
    }

    /// Picks the format from an HTTP content type, if it names one.
    pub(crate) fn from_content_type(content_type: &str) -> Option<Self> {
        let lower = content_type.to_ascii_lowercase();
        if lower.contains("yaml") {
            Some(DocumentFormat::Yaml)
        } else if lower.contains("json") {
            Some(DocumentFormat::Json)
        } else {
            None
        }
    }
}

/// Decodes a graph document: a flat array of question objects.
pub(crate) fn parse_definitions(
    text: &str,
    format: DocumentFormat,
) -> Result<Vec<QuestionDefinition>, GraphSourceError> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str(text).map_err(|e| GraphSourceError::Parse(e.to_string()))
        }
        DocumentFormat::Yaml => {
            serde_yaml::from_str(text).map_err(|e| GraphSourceError::Parse(e.to_string()))
        }
    }
}
