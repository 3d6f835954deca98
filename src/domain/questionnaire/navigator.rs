//! Navigation state machine.
//!
//! Holds the current position and a back-history of visited question
//! identities. Forward moves push, back moves pop, so graph cycles only grow
//! the history as far as the respondent keeps going round them.

use serde::Serialize;

use crate::domain::foundation::QuestionId;

use super::errors::QuestionnaireError;
use super::graph::{QuestionGraph, Transition};
use super::question::NextRef;
use super::terminal::TerminalTag;

/// Position of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "at", rename_all = "snake_case")]
pub enum NavigationState {
    /// The graph has no questions; nothing can be shown.
    Empty,
    AtQuestion(QuestionId),
    Terminal(TerminalTag),
}

impl NavigationState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, NavigationState::Terminal(_))
    }
}

/// Current position plus history stack.
#[derive(Debug, Clone)]
pub struct Navigator {
    initial: Option<QuestionId>,
    state: NavigationState,
    history: Vec<QuestionId>,
}

impl Navigator {
    /// Starts at the graph's first question, or in `Empty` for an empty graph.
    pub fn new(graph: &QuestionGraph) -> Self {
        let initial = graph.first_id().cloned();
        Self {
            state: Self::initial_state(&initial),
            initial,
            history: Vec::new(),
        }
    }

    fn initial_state(initial: &Option<QuestionId>) -> NavigationState {
        match initial {
            Some(id) => NavigationState::AtQuestion(id.clone()),
            None => NavigationState::Empty,
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Previously visited identities, oldest first.
    pub fn history(&self) -> &[QuestionId] {
        &self.history
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn current_question_id(&self) -> Option<&QuestionId> {
        match &self.state {
            NavigationState::AtQuestion(id) => Some(id),
            _ => None,
        }
    }

    /// Resolves `next` against the graph and moves there.
    ///
    /// Rejected transitions leave position and history untouched.
    pub fn advance(
        &mut self,
        graph: &QuestionGraph,
        next: &NextRef,
    ) -> Result<Transition, QuestionnaireError> {
        let transition = graph.resolve(next).ok_or_else(|| {
            QuestionnaireError::bad_transition(
                Some(next.as_str()),
                format!("'{}' is neither a question nor a terminal tag", next),
            )
        })?;
        self.apply(transition.clone())?;
        Ok(transition)
    }

    /// Applies an already resolved transition.
    ///
    /// Only valid while positioned at a question.
    pub(crate) fn apply(&mut self, transition: Transition) -> Result<(), QuestionnaireError> {
        let current = match &self.state {
            NavigationState::AtQuestion(id) => id.clone(),
            NavigationState::Terminal(tag) => {
                return Err(QuestionnaireError::bad_transition(
                    None,
                    format!("questionnaire already finished with '{}'", tag),
                ))
            }
            NavigationState::Empty => {
                return Err(QuestionnaireError::bad_transition(None, "questionnaire is empty"))
            }
        };

        match transition {
            Transition::Question(id) => {
                self.history.push(current);
                self.state = NavigationState::AtQuestion(id);
            }
            // History stays as is so back() can re-enter the questionnaire.
            Transition::Terminal(tag) => {
                self.state = NavigationState::Terminal(tag);
            }
        }
        Ok(())
    }

    /// Returns to the most recently pushed question.
    ///
    /// Also leaves a terminal state.
    pub fn back(&mut self) -> Result<QuestionId, QuestionnaireError> {
        let previous = self.history.pop().ok_or(QuestionnaireError::NoHistory)?;
        self.state = NavigationState::AtQuestion(previous.clone());
        Ok(previous)
    }

    /// Clears history and returns to the initial question.
    pub fn restart(&mut self) {
        self.history.clear();
        self.state = Self::initial_state(&self.initial);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::questionnaire::question::{BranchSpec, Question, QuestionKind, Tags};
    use proptest::prelude::*;

    fn qid(s: &str) -> QuestionId {
        QuestionId::new(s).unwrap()
    }

    fn yes_no(id: &str, yes: &str, no: &str) -> Question {
        Question::new(
            qid(id),
            format!("Question {}", id),
            QuestionKind::YesNo {
                yes: BranchSpec::new(NextRef::new(yes), Tags::none()),
                no: BranchSpec::new(NextRef::new(no), Tags::none()),
            },
        )
    }

    /// 1 -> 2 -> 3 -> 1 ... with END_SUMMARY exits.
    fn cyclic_graph() -> QuestionGraph {
        QuestionGraph::new(vec![
            yes_no("1", "2", "END_NONE"),
            yes_no("2", "3", "END_SUMMARY"),
            yes_no("3", "1", "END_SUMMARY"),
        ])
        .unwrap()
    }

    mod initial_state {
        use super::*;

        #[test]
        fn starts_at_first_question() {
            let nav = Navigator::new(&cyclic_graph());
            assert_eq!(nav.state(), &NavigationState::AtQuestion(qid("1")));
            assert!(!nav.can_go_back());
        }

        #[test]
        fn empty_graph_starts_empty() {
            let graph = QuestionGraph::new(vec![]).unwrap();
            let nav = Navigator::new(&graph);
            assert_eq!(nav.state(), &NavigationState::Empty);
            assert!(nav.current_question_id().is_none());
        }
    }

    mod advance {
        use super::*;

        #[test]
        fn question_target_pushes_history() {
            let graph = cyclic_graph();
            let mut nav = Navigator::new(&graph);

            nav.advance(&graph, &NextRef::new("2")).unwrap();

            assert_eq!(nav.state(), &NavigationState::AtQuestion(qid("2")));
            assert_eq!(nav.history(), &[qid("1")]);
        }

        #[test]
        fn terminal_target_keeps_history() {
            let graph = cyclic_graph();
            let mut nav = Navigator::new(&graph);
            nav.advance(&graph, &NextRef::new("2")).unwrap();

            let transition = nav.advance(&graph, &NextRef::new("END_SUMMARY")).unwrap();

            assert!(matches!(transition, Transition::Terminal(_)));
            assert!(nav.state().is_terminal());
            assert_eq!(nav.history(), &[qid("1")]);
        }

        #[test]
        fn malformed_target_is_rejected_without_mutation() {
            let graph = cyclic_graph();
            let mut nav = Navigator::new(&graph);
            nav.advance(&graph, &NextRef::new("2")).unwrap();

            let err = nav.advance(&graph, &NextRef::new("does-not-exist")).unwrap_err();

            assert!(matches!(err, QuestionnaireError::BadTransition { .. }));
            assert_eq!(nav.state(), &NavigationState::AtQuestion(qid("2")));
            assert_eq!(nav.history(), &[qid("1")]);
        }

        #[test]
        fn advancing_from_terminal_is_rejected() {
            let graph = cyclic_graph();
            let mut nav = Navigator::new(&graph);
            nav.advance(&graph, &NextRef::new("END_NONE")).unwrap();

            let err = nav.advance(&graph, &NextRef::new("2")).unwrap_err();

            assert!(matches!(err, QuestionnaireError::BadTransition { .. }));
            assert!(nav.state().is_terminal());
        }

        #[test]
        fn cycles_grow_history_without_limit() {
            let graph = cyclic_graph();
            let mut nav = Navigator::new(&graph);
            for step in 0..300 {
                let next = ["2", "3", "1"][step % 3];
                nav.advance(&graph, &NextRef::new(next)).unwrap();
            }
            assert_eq!(nav.history().len(), 300);
            assert_eq!(nav.state(), &NavigationState::AtQuestion(qid("1")));
        }
    }

    mod back_and_restart {
        use super::*;

        #[test]
        fn back_with_empty_history_fails() {
            let mut nav = Navigator::new(&cyclic_graph());
            assert_eq!(nav.back().unwrap_err(), QuestionnaireError::NoHistory);
            assert_eq!(nav.state(), &NavigationState::AtQuestion(qid("1")));
        }

        #[test]
        fn back_pops_history() {
            let graph = cyclic_graph();
            let mut nav = Navigator::new(&graph);
            nav.advance(&graph, &NextRef::new("2")).unwrap();

            assert_eq!(nav.back().unwrap(), qid("1"));
            assert!(nav.history().is_empty());
        }

        #[test]
        fn back_leaves_terminal_state() {
            let graph = cyclic_graph();
            let mut nav = Navigator::new(&graph);
            nav.advance(&graph, &NextRef::new("2")).unwrap();
            nav.advance(&graph, &NextRef::new("END_SUMMARY")).unwrap();

            nav.back().unwrap();

            assert_eq!(nav.state(), &NavigationState::AtQuestion(qid("1")));
        }

        #[test]
        fn restart_is_idempotent() {
            let graph = cyclic_graph();
            let mut nav = Navigator::new(&graph);
            nav.advance(&graph, &NextRef::new("2")).unwrap();
            nav.advance(&graph, &NextRef::new("END_SUMMARY")).unwrap();

            nav.restart();
            let once = (nav.state().clone(), nav.history().to_vec());
            nav.restart();

            assert_eq!((nav.state().clone(), nav.history().to_vec()), once);
            assert_eq!(nav.state(), &NavigationState::AtQuestion(qid("1")));
            assert!(nav.history().is_empty());
        }
    }

    proptest! {
        #[test]
        fn advancing_then_backing_returns_to_start(choices in proptest::collection::vec(any::<bool>(), 0..40)) {
            let graph = cyclic_graph();
            let mut nav = Navigator::new(&graph);
            let mut moves = 0;
            for yes in choices {
                let current = nav.current_question_id().cloned().unwrap();
                let next = match (current.as_str(), yes) {
                    ("1", true) => "2",
                    ("2", true) => "3",
                    ("3", true) => "1",
                    // Stay inside the questionnaire for this property.
                    ("1", false) => "1",
                    ("2", false) => "2",
                    _ => "3",
                };
                nav.advance(&graph, &NextRef::new(next)).unwrap();
                moves += 1;
            }
            for _ in 0..moves {
                nav.back().unwrap();
            }
            prop_assert_eq!(nav.state(), &NavigationState::AtQuestion(qid("1")));
            prop_assert!(nav.history().is_empty());
        }
    }
}
