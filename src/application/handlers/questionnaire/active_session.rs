//! The single in-memory respondent session shared by all handlers.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};

use crate::domain::foundation::ErrorCode;
use crate::domain::questionnaire::{QuestionGraph, QuestionnaireSession, SessionEvent};

/// Lifecycle of the questionnaire behind the view channel.
#[derive(Debug)]
pub enum LoadState {
    /// No load has been attempted yet.
    NotLoaded,
    /// The last load failed; the message is shown to the respondent.
    Failed(String),
    Ready(QuestionnaireSession),
}

/// Why no session is available.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionUnavailable {
    #[error("Questionnaire has not been loaded")]
    NotLoaded,

    #[error("Questionnaire could not be loaded: {0}")]
    LoadFailed(String),
}

impl SessionUnavailable {
    pub fn code(&self) -> ErrorCode {
        match self {
            SessionUnavailable::NotLoaded => ErrorCode::NotLoaded,
            SessionUnavailable::LoadFailed(_) => ErrorCode::SourceUnavailable,
        }
    }
}

/// Shared handle to the one active session.
///
/// The mutex serializes respondent actions, so each action completes before
/// the next one is looked at.
#[derive(Debug, Clone)]
pub struct ActiveSession {
    state: Arc<Mutex<LoadState>>,
}

impl Default for ActiveSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ActiveSession {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(LoadState::NotLoaded)),
        }
    }

    /// Replaces whatever was there with a fresh session over `graph`.
    pub async fn install(&self, graph: Arc<QuestionGraph>) -> QuestionnaireSession {
        let mut session = QuestionnaireSession::new(graph);
        log_events(session.take_events());
        let snapshot = session.clone();
        *self.state.lock().await = LoadState::Ready(session);
        snapshot
    }

    /// Records a failed load. Any previous session is dropped.
    pub async fn fail(&self, message: impl Into<String>) {
        *self.state.lock().await = LoadState::Failed(message.into());
    }

    pub async fn lock(&self) -> MutexGuard<'_, LoadState> {
        self.state.lock().await
    }

    /// Runs `f` against the ready session and logs the events it produced.
    pub async fn with_session<T>(
        &self,
        f: impl FnOnce(&mut QuestionnaireSession) -> T,
    ) -> Result<T, SessionUnavailable> {
        let mut guard = self.state.lock().await;
        match &mut *guard {
            LoadState::Ready(session) => {
                let output = f(session);
                log_events(session.take_events());
                Ok(output)
            }
            LoadState::NotLoaded => Err(SessionUnavailable::NotLoaded),
            LoadState::Failed(message) => Err(SessionUnavailable::LoadFailed(message.clone())),
        }
    }
}

/// Emits drained session events as structured logs.
pub(crate) fn log_events(events: Vec<SessionEvent>) {
    for event in events {
        match event {
            SessionEvent::Started {
                session_id,
                question_count,
                ..
            } => tracing::info!(%session_id, question_count, "Questionnaire session started"),
            SessionEvent::Answered {
                question_id,
                first_time,
            } => tracing::debug!(%question_id, first_time, "Answer recorded"),
            SessionEvent::Advanced { from, to } => {
                tracing::debug!(%from, %to, "Advanced to next question")
            }
            SessionEvent::ReachedTerminal { from, tag } => {
                tracing::info!(%from, %tag, "Questionnaire finished")
            }
            SessionEvent::WentBack { to } => tracing::debug!(%to, "Went back"),
            SessionEvent::Restarted => tracing::info!("Questionnaire restarted"),
        }
    }
}
