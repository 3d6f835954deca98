//! GraphSource port for fetching the questionnaire definition.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::questionnaire::QuestionDefinition;

/// Errors that can occur while fetching or decoding a definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphSourceError {
    /// The definition could not be found at the configured location.
    #[error("Questionnaire definition not found: {0}")]
    NotFound(String),

    /// Reading from the source failed.
    #[error("Failed to read questionnaire definition: {0}")]
    Io(String),

    /// The remote source answered with a non-success status.
    #[error("Questionnaire source returned HTTP {status}")]
    Status { status: u16 },

    /// Fetching took longer than the configured timeout.
    #[error("Fetching questionnaire definition timed out after {0} seconds")]
    Timeout(u64),

    /// The payload is not a valid definition document.
    #[error("Invalid questionnaire definition: {0}")]
    Parse(String),
}

/// Source of the declarative question graph.
///
/// Loading is the only suspending step in the engine; once definitions are
/// returned everything else is synchronous.
#[async_trait]
pub trait GraphSource: Send + Sync {
    /// Fetch and decode the definition.
    async fn load(&self) -> Result<Vec<QuestionDefinition>, GraphSourceError>;

    /// Human readable location, used in logs.
    fn describe(&self) -> String;
}
