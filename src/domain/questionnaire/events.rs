//! Questionnaire session events.

use serde::Serialize;

use crate::domain::foundation::{QuestionId, SessionId, Timestamp};

use super::terminal::TerminalTag;

/// Events that occur during a respondent session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A session was created over a loaded graph.
    Started {
        session_id: SessionId,
        question_count: usize,
        started_at: Timestamp,
    },

    /// An answer was recorded. `first_time` is false on re-answers.
    Answered {
        question_id: QuestionId,
        first_time: bool,
    },

    /// Moved forward to another question.
    Advanced { from: QuestionId, to: QuestionId },

    /// Moved forward into an end state.
    ReachedTerminal { from: QuestionId, tag: TerminalTag },

    /// Moved back to a previously visited question.
    WentBack { to: QuestionId },

    /// History and answers were cleared.
    Restarted,
}
