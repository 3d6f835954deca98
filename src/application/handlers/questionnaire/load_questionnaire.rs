//! LoadQuestionnaireHandler - Fetches, validates and installs the graph.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, SessionId};
use crate::domain::questionnaire::{GraphValidationError, QuestionGraph};
use crate::ports::{GraphSource, GraphSourceError};

use super::active_session::ActiveSession;

/// Errors that can occur while loading a questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadQuestionnaireError {
    #[error(transparent)]
    Source(#[from] GraphSourceError),

    #[error(transparent)]
    Invalid(#[from] GraphValidationError),
}

impl LoadQuestionnaireError {
    pub fn code(&self) -> ErrorCode {
        match self {
            LoadQuestionnaireError::Source(_) => ErrorCode::SourceUnavailable,
            LoadQuestionnaireError::Invalid(e) => e.code(),
        }
    }
}

/// Result of a successful load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadQuestionnaireResult {
    pub session_id: SessionId,
    pub question_count: usize,
}

/// Handler for (re)loading the questionnaire.
///
/// A successful load replaces the active session; a failed one leaves the
/// respondent with the failure message until the next reload.
pub struct LoadQuestionnaireHandler {
    source: Arc<dyn GraphSource>,
    session: ActiveSession,
}

impl LoadQuestionnaireHandler {
    pub fn new(source: Arc<dyn GraphSource>, session: ActiveSession) -> Self {
        Self { source, session }
    }

    pub async fn handle(&self) -> Result<LoadQuestionnaireResult, LoadQuestionnaireError> {
        let location = self.source.describe();

        match self.load_graph().await {
            Ok(graph) => {
                let question_count = graph.len();
                let session = self.session.install(Arc::new(graph)).await;
                tracing::info!(%location, question_count, "Questionnaire loaded");
                Ok(LoadQuestionnaireResult {
                    session_id: session.id(),
                    question_count,
                })
            }
            Err(e) => {
                tracing::warn!(%location, error = %e, code = %e.code(), "Questionnaire load failed");
                self.session.fail(e.to_string()).await;
                Err(e)
            }
        }
    }

    async fn load_graph(&self) -> Result<QuestionGraph, LoadQuestionnaireError> {
        let definitions = self.source.load().await?;
        Ok(QuestionGraph::from_definitions(definitions)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::source::InMemoryGraphSource;
    use crate::application::handlers::questionnaire::SessionUnavailable;

    const DOCUMENT: &str = r#"[
        {"id": 1, "type": "yesno", "question": "Provider?",
         "yes": {"next": 2}, "no": {"next": "END_NONE"}},
        {"id": 2, "type": "text", "question": "Describe", "next": "END_SUMMARY"}
    ]"#;

    #[tokio::test]
    async fn loads_and_installs_session() {
        let source = Arc::new(InMemoryGraphSource::from_json(DOCUMENT).unwrap());
        let active = ActiveSession::new();
        let handler = LoadQuestionnaireHandler::new(source, active.clone());

        let result = handler.handle().await.unwrap();

        assert_eq!(result.question_count, 2);
        assert_eq!(active.with_session(|s| s.id()).await.unwrap(), result.session_id);
    }

    #[tokio::test]
    async fn source_failure_is_recorded_for_the_respondent() {
        let source = Arc::new(InMemoryGraphSource::failing(GraphSourceError::Timeout(10)));
        let active = ActiveSession::new();
        let handler = LoadQuestionnaireHandler::new(source, active.clone());

        let err = handler.handle().await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::SourceUnavailable);
        assert!(matches!(
            active.with_session(|_| ()).await,
            Err(SessionUnavailable::LoadFailed(message)) if message.contains("timed out")
        ));
    }

    #[tokio::test]
    async fn dangling_reference_fails_validation() {
        let source = Arc::new(
            InMemoryGraphSource::from_json(
                r#"[{"id": "a", "type": "select", "question": "?",
                     "options": [{"value": "x", "next": "missing"}]}]"#,
            )
            .unwrap(),
        );
        let handler = LoadQuestionnaireHandler::new(source, ActiveSession::new());

        let err = handler.handle().await.unwrap_err();

        assert!(matches!(
            err,
            LoadQuestionnaireError::Invalid(GraphValidationError::DanglingReference { .. })
        ));
        assert_eq!(err.code(), ErrorCode::GraphInvalid);
    }

    #[tokio::test]
    async fn reload_recovers_after_failure() {
        let source = Arc::new(InMemoryGraphSource::failing(GraphSourceError::Status { status: 503 }));
        let active = ActiveSession::new();
        let handler = LoadQuestionnaireHandler::new(source.clone(), active.clone());
        assert!(handler.handle().await.is_err());

        let definitions = InMemoryGraphSource::from_json(DOCUMENT).unwrap().load().await.unwrap();
        source.set_definitions(definitions).await;

        assert!(handler.handle().await.is_ok());
        assert!(active.with_session(|_| ()).await.is_ok());
    }
}
