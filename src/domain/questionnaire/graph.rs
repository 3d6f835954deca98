//! Question graph - the validated, immutable set of questions.
//!
//! A graph is only ever observable in a valid state: construction checks
//! identities, options and every next-reference, and fails with a
//! [`GraphValidationError`] naming the first defect found.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, QuestionId};

use super::definition::QuestionDefinition;
use super::errors::QuestionnaireError;
use super::question::{NextRef, Question, QuestionKind};
use super::terminal::{TerminalTag, TERMINAL_PREFIX};

/// Load-time defects of a question graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphValidationError {
    #[error("Duplicate question identity '{0}'")]
    DuplicateQuestion(QuestionId),

    #[error("Question identity '{0}' starts with the reserved terminal prefix")]
    ReservedIdentity(QuestionId),

    #[error("Question '{question}' references unknown question '{reference}'")]
    DanglingReference {
        question: QuestionId,
        reference: NextRef,
    },

    #[error("Select question '{0}' has no options")]
    EmptyOptions(QuestionId),

    #[error("Select question '{question}' repeats option value '{value}'")]
    DuplicateOption { question: QuestionId, value: String },

    #[error("Question '{question}' has no next reference for {branch}")]
    MissingNext { question: QuestionId, branch: String },
}

impl GraphValidationError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::GraphInvalid
    }
}

/// Where a next-reference leads once resolved against a graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Question(QuestionId),
    Terminal(TerminalTag),
}

/// The validated question set, in construction order.
#[derive(Debug, Clone)]
pub struct QuestionGraph {
    questions: Vec<Question>,
    index: HashMap<QuestionId, usize>,
}

impl QuestionGraph {
    /// Builds and validates a graph.
    ///
    /// The first question in `questions` becomes the entry point.
    pub fn new(questions: Vec<Question>) -> Result<Self, GraphValidationError> {
        let mut index = HashMap::with_capacity(questions.len());
        for (position, question) in questions.iter().enumerate() {
            if question.id.as_str().starts_with(TERMINAL_PREFIX) {
                return Err(GraphValidationError::ReservedIdentity(question.id.clone()));
            }
            if index.insert(question.id.clone(), position).is_some() {
                return Err(GraphValidationError::DuplicateQuestion(question.id.clone()));
            }
        }

        for question in &questions {
            if let QuestionKind::Select { options } = &question.kind {
                if options.is_empty() {
                    return Err(GraphValidationError::EmptyOptions(question.id.clone()));
                }
                let mut seen = HashSet::new();
                for option in options {
                    if !seen.insert(option.value.as_str()) {
                        return Err(GraphValidationError::DuplicateOption {
                            question: question.id.clone(),
                            value: option.value.clone(),
                        });
                    }
                }
            }

            for reference in question.next_refs() {
                if reference.as_terminal().is_some() {
                    continue;
                }
                let known = QuestionId::new(reference.as_str())
                    .map(|id| index.contains_key(&id))
                    .unwrap_or(false);
                if !known {
                    return Err(GraphValidationError::DanglingReference {
                        question: question.id.clone(),
                        reference: reference.clone(),
                    });
                }
            }
        }

        Ok(Self { questions, index })
    }

    /// Builds a graph from a parsed graph document.
    pub fn from_definitions(
        definitions: Vec<QuestionDefinition>,
    ) -> Result<Self, GraphValidationError> {
        let questions = definitions
            .into_iter()
            .map(QuestionDefinition::into_question)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(questions)
    }

    /// Looks up a question by identity.
    pub fn get(&self, id: &QuestionId) -> Result<&Question, QuestionnaireError> {
        self.index
            .get(id)
            .map(|&position| &self.questions[position])
            .ok_or_else(|| QuestionnaireError::UnknownQuestion(id.clone()))
    }

    /// Identity of the entry question, `None` for an empty graph.
    pub fn first_id(&self) -> Option<&QuestionId> {
        self.questions.first().map(|q| &q.id)
    }

    pub fn contains(&self, id: &QuestionId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Questions in construction order.
    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    /// Resolves a next-reference; `None` when it is malformed for this graph.
    pub fn resolve(&self, reference: &NextRef) -> Option<Transition> {
        if let Some(tag) = reference.as_terminal() {
            return Some(Transition::Terminal(tag));
        }
        let id = QuestionId::new(reference.as_str()).ok()?;
        self.contains(&id).then_some(Transition::Question(id))
    }
}
