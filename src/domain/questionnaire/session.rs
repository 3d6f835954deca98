//! Questionnaire session - the root entity of a respondent's walk.
//!
//! Owns the navigator and the answer store over a shared, immutable graph.
//! Each respondent action is applied completely or rejected without any
//! mutation, so no caller can observe a half-applied step.

use std::sync::Arc;

use crate::domain::foundation::{QuestionId, SessionId, Timestamp};

use super::answer::{Answer, AnswerStore, Response};
use super::errors::QuestionnaireError;
use super::events::SessionEvent;
use super::graph::{QuestionGraph, Transition};
use super::navigator::{NavigationState, Navigator};
use super::question::{NextRef, Question};
use super::result::QuestionnaireResult;
use super::view::{Progress, QuestionView, ResultView, SessionView};

/// A single respondent's session.
#[derive(Debug, Clone)]
pub struct QuestionnaireSession {
    id: SessionId,
    graph: Arc<QuestionGraph>,
    navigator: Navigator,
    answers: AnswerStore,
    started_at: Timestamp,
    domain_events: Vec<SessionEvent>,
}

impl QuestionnaireSession {
    /// Starts a session at the graph's first question.
    pub fn new(graph: Arc<QuestionGraph>) -> Self {
        let id = SessionId::new();
        let started_at = Timestamp::now();
        let navigator = Navigator::new(&graph);

        let mut session = Self {
            id,
            navigator,
            answers: AnswerStore::new(),
            started_at,
            domain_events: Vec::new(),
            graph,
        };

        session.record_event(SessionEvent::Started {
            session_id: id,
            question_count: session.graph.len(),
            started_at,
        });

        session
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn graph(&self) -> &QuestionGraph {
        &self.graph
    }

    pub fn state(&self) -> &NavigationState {
        self.navigator.state()
    }

    pub fn history(&self) -> &[QuestionId] {
        self.navigator.history()
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    pub fn can_go_back(&self) -> bool {
        self.navigator.can_go_back()
    }

    /// Takes accumulated domain events, clearing the internal buffer.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.domain_events)
    }

    /// The question currently awaiting an answer, if any.
    pub fn current_question(&self) -> Result<Option<&Question>, QuestionnaireError> {
        match self.navigator.current_question_id() {
            Some(id) => self.graph.get(id).map(Some),
            None => Ok(None),
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Respondent actions
    // ───────────────────────────────────────────────────────────────

    /// Answers the current question and moves along the selected branch.
    ///
    /// Order: validate the answer, resolve the next-reference, then record
    /// and move. Any failure before recording leaves the session unchanged.
    pub fn respond(&mut self, response: Response) -> Result<&NavigationState, QuestionnaireError> {
        let graph = Arc::clone(&self.graph);
        let current = self.navigator.current_question_id().cloned().ok_or_else(|| {
            QuestionnaireError::bad_transition(None, "no question is awaiting an answer")
        })?;
        let question = graph.get(&current)?;

        let (answer, next) = Answer::from_response(question, response)?;
        let transition = Self::resolve(&graph, &next)?;

        let first_time = self.answers.record(answer);
        self.record_event(SessionEvent::Answered {
            question_id: current.clone(),
            first_time,
        });
        self.move_to(current, transition)?;

        Ok(self.navigator.state())
    }

    /// Moves along a raw next-reference without recording an answer.
    pub fn advance(&mut self, next: &NextRef) -> Result<&NavigationState, QuestionnaireError> {
        let current = self.navigator.current_question_id().cloned().ok_or_else(|| {
            QuestionnaireError::bad_transition(Some(next.as_str()), "not positioned at a question")
        })?;
        let transition = Self::resolve(&self.graph, next)?;
        self.move_to(current, transition)?;
        Ok(self.navigator.state())
    }

    /// Returns to the previous question. Recorded answers are kept.
    pub fn back(&mut self) -> Result<&NavigationState, QuestionnaireError> {
        let to = self.navigator.back()?;
        self.record_event(SessionEvent::WentBack { to });
        Ok(self.navigator.state())
    }

    /// Clears history and answers and returns to the first question.
    pub fn restart(&mut self) -> &NavigationState {
        self.navigator.restart();
        self.answers.clear();
        self.record_event(SessionEvent::Restarted);
        self.navigator.state()
    }

    // ───────────────────────────────────────────────────────────────
    // Queries
    // ───────────────────────────────────────────────────────────────

    /// Aggregated result; only available in a terminal state.
    pub fn result(&self) -> Result<QuestionnaireResult, QuestionnaireError> {
        match self.navigator.state() {
            NavigationState::Terminal(tag) => Ok(QuestionnaireResult::aggregate(tag, &self.answers)),
            _ => Err(QuestionnaireError::NotFinished),
        }
    }

    /// What a view layer should render for the current state.
    pub fn view(&self) -> Result<SessionView, QuestionnaireError> {
        let can_go_back = self.navigator.can_go_back();
        match self.navigator.state() {
            NavigationState::Empty => Ok(SessionView::Empty),
            NavigationState::AtQuestion(id) => {
                let question = self.graph.get(id)?;
                let previous = self.answers.get(id).map(|a| a.value.clone());
                let progress = Progress::new(self.navigator.history().len(), self.graph.len());
                Ok(SessionView::Question(QuestionView::new(
                    question,
                    previous,
                    progress,
                    can_go_back,
                )))
            }
            NavigationState::Terminal(_) => {
                Ok(SessionView::Result(ResultView::new(self.result()?, can_go_back)))
            }
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Internals
    // ───────────────────────────────────────────────────────────────

    fn resolve(graph: &QuestionGraph, next: &NextRef) -> Result<Transition, QuestionnaireError> {
        graph.resolve(next).ok_or_else(|| {
            QuestionnaireError::bad_transition(
                Some(next.as_str()),
                format!("'{}' is neither a question nor a terminal tag", next),
            )
        })
    }

    fn move_to(
        &mut self,
        from: QuestionId,
        transition: Transition,
    ) -> Result<(), QuestionnaireError> {
        let event = match &transition {
            Transition::Question(to) => SessionEvent::Advanced {
                from,
                to: to.clone(),
            },
            Transition::Terminal(tag) => SessionEvent::ReachedTerminal {
                from,
                tag: tag.clone(),
            },
        };
        self.navigator.apply(transition)?;
        self.record_event(event);
        Ok(())
    }

    fn record_event(&mut self, event: SessionEvent) {
        self.domain_events.push(event);
    }
}
