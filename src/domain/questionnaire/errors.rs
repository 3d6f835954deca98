//! Per-action errors of a questionnaire session.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, QuestionId, ValidationError};

/// Errors raised while a respondent interacts with a session.
///
/// Every variant leaves the session exactly as it was before the action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionnaireError {
    /// Lookup of an identity that is not part of the graph.
    #[error("Question not found: {0}")]
    UnknownQuestion(QuestionId),

    /// The requested target is neither a known question nor a terminal tag,
    /// or the session is not in a state that accepts a forward move.
    #[error("Transition rejected: {reason}")]
    BadTransition { target: Option<String>, reason: String },

    /// The answer itself is unacceptable (e.g. required text left empty).
    #[error("Invalid answer: {0}")]
    Validation(#[from] ValidationError),

    /// `back()` with an empty history.
    #[error("There is no earlier question to go back to")]
    NoHistory,

    /// A result was requested before a terminal state was reached.
    #[error("The questionnaire has not reached a result yet")]
    NotFinished,
}

impl QuestionnaireError {
    pub fn bad_transition(target: Option<&str>, reason: impl Into<String>) -> Self {
        QuestionnaireError::BadTransition {
            target: target.map(str::to_string),
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            QuestionnaireError::UnknownQuestion(_) => ErrorCode::QuestionNotFound,
            QuestionnaireError::BadTransition { .. } => ErrorCode::InvalidStateTransition,
            QuestionnaireError::Validation(_) => ErrorCode::ValidationFailed,
            QuestionnaireError::NoHistory => ErrorCode::NoHistory,
            QuestionnaireError::NotFinished => ErrorCode::NotFinished,
        }
    }

    /// Message suitable for showing to the respondent.
    ///
    /// An unknown question means the session is corrupted, so the respondent
    /// only gets a generic hint to restart.
    pub fn user_message(&self) -> String {
        match self {
            QuestionnaireError::UnknownQuestion(_) => {
                "Something went wrong, please restart the questionnaire.".to_string()
            }
            other => other.to_string(),
        }
    }
}
