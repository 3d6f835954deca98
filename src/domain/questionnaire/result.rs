//! Result aggregation.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::foundation::QuestionId;

use super::answer::AnswerStore;
use super::terminal::{TerminalKind, TerminalTag};

/// One line of the answer listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnsweredQuestion {
    pub question_id: QuestionId,
    pub prompt: String,
    pub label: String,
}

/// Final report of a finished questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionnaireResult {
    pub tag: TerminalTag,
    pub roles: BTreeSet<String>,
    pub attributes: BTreeSet<String>,
    /// Every recorded answer, in first-write order.
    pub answers: Vec<AnsweredQuestion>,
}

impl QuestionnaireResult {
    /// Derives the result from the recorded answers. Pure and deterministic.
    pub fn aggregate(tag: &TerminalTag, answers: &AnswerStore) -> Self {
        let tags = answers.tags_union();
        Self {
            tag: tag.clone(),
            roles: tags.roles,
            attributes: tags.attributes,
            answers: answers
                .iter()
                .map(|a| AnsweredQuestion {
                    question_id: a.question_id.clone(),
                    prompt: a.prompt.clone(),
                    label: a.label.clone(),
                })
                .collect(),
        }
    }

    pub fn kind(&self) -> TerminalKind {
        self.tag.kind()
    }

    pub fn title(&self) -> &'static str {
        self.kind().title()
    }

    pub fn badge(&self) -> &'static str {
        self.kind().badge()
    }
}
