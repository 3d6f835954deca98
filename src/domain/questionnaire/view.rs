//! Read models handed to a view layer.
//!
//! A view layer only needs "render this question" or "render this result";
//! these types carry exactly what such a renderer needs.

use serde::Serialize;

use crate::domain::foundation::QuestionId;

use super::answer::{AnswerValue, NO_LABEL, YES_LABEL};
use super::question::{Question, QuestionKind};
use super::result::QuestionnaireResult;

/// Position indicator ("question N of M").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub step: usize,
    pub total: usize,
}

impl Progress {
    /// `step` is the history depth plus one.
    pub fn new(history_depth: usize, total: usize) -> Self {
        Self {
            step: history_depth + 1,
            total,
        }
    }

    /// Completion in percent. Capped at 100 since cycles can push `step`
    /// past `total`.
    pub fn percent(&self) -> u8 {
        let total = self.total.max(1);
        ((self.step * 100 / total).min(100)) as u8
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub value: String,
    pub label: String,
}

/// Input widget description per question kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Widget {
    YesNo {
        yes_label: &'static str,
        no_label: &'static str,
    },
    Select {
        options: Vec<OptionView>,
    },
    Text {
        required: bool,
        multiline: bool,
        placeholder: Option<String>,
    },
}

impl Widget {
    fn for_question(question: &Question) -> Self {
        match &question.kind {
            QuestionKind::YesNo { .. } => Widget::YesNo {
                yes_label: YES_LABEL,
                no_label: NO_LABEL,
            },
            QuestionKind::Select { options } => Widget::Select {
                options: options
                    .iter()
                    .map(|o| OptionView {
                        value: o.value.clone(),
                        label: o.label.clone(),
                    })
                    .collect(),
            },
            QuestionKind::Text {
                required,
                multiline,
                placeholder,
                ..
            } => Widget::Text {
                required: *required,
                multiline: *multiline,
                placeholder: placeholder.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub id: QuestionId,
    pub prompt: String,
    pub description: Option<String>,
    pub widget: Widget,
    /// Answer recorded on an earlier visit, if any.
    pub previous_answer: Option<AnswerValue>,
    pub progress: Progress,
    pub can_go_back: bool,
}

impl QuestionView {
    pub fn new(
        question: &Question,
        previous_answer: Option<AnswerValue>,
        progress: Progress,
        can_go_back: bool,
    ) -> Self {
        Self {
            id: question.id.clone(),
            prompt: question.prompt.clone(),
            description: question.description.clone(),
            widget: Widget::for_question(question),
            previous_answer,
            progress,
            can_go_back,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultView {
    pub title: &'static str,
    pub badge: &'static str,
    pub result: QuestionnaireResult,
    pub can_go_back: bool,
}

impl ResultView {
    pub fn new(result: QuestionnaireResult, can_go_back: bool) -> Self {
        Self {
            title: result.title(),
            badge: result.badge(),
            result,
            can_go_back,
        }
    }
}

/// What the view layer should show right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum SessionView {
    Empty,
    Question(QuestionView),
    Result(ResultView),
}
