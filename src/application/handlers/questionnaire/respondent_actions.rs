//! RespondentActionHandler - Applies one respondent action to the session.
//!
//! Also hosts the current-view query, since both read the same session and
//! every action answers with the view that results from it.

use thiserror::Error;

use crate::domain::foundation::ErrorCode;
use crate::domain::questionnaire::{QuestionnaireError, Response, SessionView};

use super::active_session::{ActiveSession, SessionUnavailable};

/// Discrete actions a respondent can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RespondentAction {
    Answer(Response),
    Back,
    Restart,
}

impl RespondentAction {
    fn name(&self) -> &'static str {
        match self {
            RespondentAction::Answer(_) => "answer",
            RespondentAction::Back => "back",
            RespondentAction::Restart => "restart",
        }
    }
}

/// Errors from applying an action or reading the view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RespondentActionError {
    #[error(transparent)]
    Unavailable(#[from] SessionUnavailable),

    #[error(transparent)]
    Questionnaire(#[from] QuestionnaireError),
}

impl RespondentActionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RespondentActionError::Unavailable(e) => e.code(),
            RespondentActionError::Questionnaire(e) => e.code(),
        }
    }
}

/// Handler for respondent actions and the current-view query.
#[derive(Debug, Clone)]
pub struct RespondentActionHandler {
    session: ActiveSession,
}

impl RespondentActionHandler {
    pub fn new(session: ActiveSession) -> Self {
        Self { session }
    }

    /// Applies `action` and returns the view of the resulting state.
    ///
    /// A rejected action leaves the session exactly as it was.
    pub async fn handle(
        &self,
        action: RespondentAction,
    ) -> Result<SessionView, RespondentActionError> {
        let name = action.name();
        let outcome = self
            .session
            .with_session(|session| {
                match action {
                    RespondentAction::Answer(response) => {
                        session.respond(response)?;
                    }
                    RespondentAction::Back => {
                        session.back()?;
                    }
                    RespondentAction::Restart => {
                        session.restart();
                    }
                }
                session.view()
            })
            .await?;

        outcome.map_err(|e| {
            match &e {
                QuestionnaireError::UnknownQuestion(id) => {
                    tracing::error!(question_id = %id, action = name, "Session references unknown question")
                }
                other => tracing::warn!(action = name, error = %other, "Respondent action rejected"),
            }
            RespondentActionError::from(e)
        })
    }

    /// What the view layer should render right now.
    pub async fn current_view(&self) -> Result<SessionView, RespondentActionError> {
        Ok(self.session.with_session(|session| session.view()).await??)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::questionnaire::{QuestionDefinition, QuestionGraph};
    use std::sync::Arc;

    async fn ready_handler() -> RespondentActionHandler {
        let definitions: Vec<QuestionDefinition> = serde_json::from_str(
            r#"[
                {"id": 1, "type": "yesno", "question": "Do you provide services?",
                 "yes": {"next": 2}, "no": {"next": "END_NONE"}, "roleAddIfYes": ["Provider"]},
                {"id": 2, "type": "text", "question": "Describe your service",
                 "required": true, "next": "END_SUMMARY"}
            ]"#,
        )
        .unwrap();
        let active = ActiveSession::new();
        active
            .install(Arc::new(QuestionGraph::from_definitions(definitions).unwrap()))
            .await;
        RespondentActionHandler::new(active)
    }

    #[tokio::test]
    async fn answering_returns_next_question_view() {
        let handler = ready_handler().await;

        let view = handler
            .handle(RespondentAction::Answer(Response::YesNo(true)))
            .await
            .unwrap();

        match view {
            SessionView::Question(q) => {
                assert_eq!(q.id.as_str(), "2");
                assert_eq!(q.progress.step, 2);
                assert!(q.can_go_back);
            }
            other => panic!("expected question view, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn finishing_returns_result_view() {
        let handler = ready_handler().await;
        handler.handle(RespondentAction::Answer(Response::YesNo(true))).await.unwrap();

        let view = handler
            .handle(RespondentAction::Answer(Response::Text("Consulting".to_string())))
            .await
            .unwrap();

        match view {
            SessionView::Result(r) => {
                assert_eq!(r.title, "Summary");
                assert!(r.result.roles.contains("Provider"));
            }
            other => panic!("expected result view, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn rejected_answer_keeps_view() {
        let handler = ready_handler().await;
        let before = handler.current_view().await.unwrap();

        let err = handler
            .handle(RespondentAction::Answer(Response::Text("wrong kind".to_string())))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        assert_eq!(handler.current_view().await.unwrap(), before);
    }

    #[tokio::test]
    async fn back_on_first_question_reports_no_history() {
        let handler = ready_handler().await;

        let err = handler.handle(RespondentAction::Back).await.unwrap_err();

        assert_eq!(err, RespondentActionError::Questionnaire(QuestionnaireError::NoHistory));
    }

    #[tokio::test]
    async fn restart_returns_first_question() {
        let handler = ready_handler().await;
        handler.handle(RespondentAction::Answer(Response::YesNo(false))).await.unwrap();

        let view = handler.handle(RespondentAction::Restart).await.unwrap();

        assert!(matches!(view, SessionView::Question(q) if q.id.as_str() == "1"));
    }

    #[tokio::test]
    async fn actions_before_load_are_unavailable() {
        let handler = RespondentActionHandler::new(ActiveSession::new());

        let err = handler.handle(RespondentAction::Restart).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::NotLoaded);
    }
}
