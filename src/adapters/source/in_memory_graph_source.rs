//! In-memory graph source.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::questionnaire::QuestionDefinition;
use crate::ports::{GraphSource, GraphSourceError};

/// Serves definitions held in memory.
///
/// The outcome can be swapped at runtime, which lets tests simulate a
/// source that fails first and recovers on reload.
#[derive(Debug, Clone)]
pub struct InMemoryGraphSource {
    outcome: Arc<RwLock<Result<Vec<QuestionDefinition>, GraphSourceError>>>,
}

impl InMemoryGraphSource {
    pub fn new(definitions: Vec<QuestionDefinition>) -> Self {
        Self {
            outcome: Arc::new(RwLock::new(Ok(definitions))),
        }
    }

    /// A source whose every load fails with `error`.
    pub fn failing(error: GraphSourceError) -> Self {
        Self {
            outcome: Arc::new(RwLock::new(Err(error))),
        }
    }

    /// Decodes a JSON document up front.
    pub fn from_json(json: &str) -> Result<Self, GraphSourceError> {
        let definitions =
            serde_json::from_str(json).map_err(|e| GraphSourceError::Parse(e.to_string()))?;
        Ok(Self::new(definitions))
    }

    pub async fn set_definitions(&self, definitions: Vec<QuestionDefinition>) {
        *self.outcome.write().await = Ok(definitions);
    }

    pub async fn set_error(&self, error: GraphSourceError) {
        *self.outcome.write().await = Err(error);
    }
}

#[async_trait]
impl GraphSource for InMemoryGraphSource {
    async fn load(&self) -> Result<Vec<QuestionDefinition>, GraphSourceError> {
        self.outcome.read().await.clone()
    }

    fn describe(&self) -> String {
        "in-memory definitions".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_configured_outcome() {
        let source = InMemoryGraphSource::failing(GraphSourceError::Timeout(10));
        assert_eq!(source.load().await.unwrap_err(), GraphSourceError::Timeout(10));

        source.set_definitions(vec![]).await;
        assert!(source.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn decodes_json_up_front() {
        let source = InMemoryGraphSource::from_json(
            r#"[{"id": "a", "type": "text", "question": "?", "next": "END_SUMMARY"}]"#,
        )
        .unwrap();
        assert_eq!(source.load().await.unwrap().len(), 1);
    }
}
