//! Question definitions.
//!
//! A question is identified by a [`QuestionId`] and carries one of three
//! closed shapes ([`QuestionKind`]). Each shape owns only the fields it needs,
//! including the next-reference(s) to follow once answered.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::domain::foundation::{NumberOrString, QuestionId};

use super::terminal::TerminalTag;

/// Unresolved reference to what comes after an answer.
///
/// Either names another question or is a terminal tag. Resolution against a
/// graph happens in [`QuestionGraph::resolve`](super::QuestionGraph::resolve).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NextRef(String);

impl NextRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the terminal tag this reference denotes, if any.
    pub fn as_terminal(&self) -> Option<TerminalTag> {
        TerminalTag::parse(&self.0)
    }
}

impl From<&QuestionId> for NextRef {
    fn from(id: &QuestionId) -> Self {
        Self(id.as_str().to_string())
    }
}

impl fmt::Display for NextRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for NextRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self(NumberOrString::deserialize(deserializer)?.into_string()))
    }
}

/// Roles and attributes contributed by a choice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tags {
    pub roles: Vec<String>,
    pub attributes: Vec<String>,
}

impl Tags {
    pub fn new(roles: Vec<String>, attributes: Vec<String>) -> Self {
        Self { roles, attributes }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty() && self.attributes.is_empty()
    }
}

/// Per-choice bundle of next-reference and tags to add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchSpec {
    pub next: NextRef,
    pub tags: Tags,
}

impl BranchSpec {
    pub fn new(next: NextRef, tags: Tags) -> Self {
        Self { next, tags }
    }
}

/// One entry of a select question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub branch: BranchSpec,
}

/// The closed set of question shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    YesNo {
        yes: BranchSpec,
        no: BranchSpec,
    },
    Select {
        options: Vec<SelectOption>,
    },
    Text {
        required: bool,
        multiline: bool,
        placeholder: Option<String>,
        next: NextRef,
    },
}

impl QuestionKind {
    /// Short name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            QuestionKind::YesNo { .. } => "yes/no",
            QuestionKind::Select { .. } => "select",
            QuestionKind::Text { .. } => "text",
        }
    }
}

/// A single question of the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: QuestionId,
    pub prompt: String,
    pub description: Option<String>,
    pub kind: QuestionKind,
}

impl Question {
    pub fn new(id: QuestionId, prompt: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            description: None,
            kind,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Every next-reference this question can lead to, in declaration order.
    pub fn next_refs(&self) -> Vec<&NextRef> {
        match &self.kind {
            QuestionKind::YesNo { yes, no } => vec![&yes.next, &no.next],
            QuestionKind::Select { options } => options.iter().map(|o| &o.branch.next).collect(),
            QuestionKind::Text { next, .. } => vec![next],
        }
    }

    /// Looks up a select option by value.
    pub fn option(&self, value: &str) -> Option<&SelectOption> {
        match &self.kind {
            QuestionKind::Select { options } => options.iter().find(|o| o.value == value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qid(s: &str) -> QuestionId {
        QuestionId::new(s).unwrap()
    }

    fn select_question() -> Question {
        Question::new(
            qid("2"),
            "Which sector?",
            QuestionKind::Select {
                options: vec![
                    SelectOption {
                        value: "health".to_string(),
                        label: "Health".to_string(),
                        branch: BranchSpec::new(NextRef::new("3"), Tags::none()),
                    },
                    SelectOption {
                        value: "energy".to_string(),
                        label: "Energy".to_string(),
                        branch: BranchSpec::new(NextRef::new("END_SUMMARY"), Tags::none()),
                    },
                ],
            },
        )
    }

    #[test]
    fn next_ref_deserializes_from_number_and_string() {
        let n: NextRef = serde_json::from_str("4").unwrap();
        let s: NextRef = serde_json::from_str("\"END_NONE\"").unwrap();
        assert_eq!(n.as_str(), "4");
        assert_eq!(s.as_terminal().unwrap().as_str(), "END_NONE");
    }

    #[test]
    fn next_refs_lists_every_option_in_order() {
        let q = select_question();
        let refs: Vec<&str> = q.next_refs().into_iter().map(|r| r.as_str()).collect();
        assert_eq!(refs, vec!["3", "END_SUMMARY"]);
    }

    #[test]
    fn option_lookup_by_value() {
        let q = select_question();
        assert_eq!(q.option("energy").unwrap().label, "Energy");
        assert!(q.option("water").is_none());
    }

    #[test]
    fn tags_report_emptiness() {
        assert!(Tags::none().is_empty());
        assert!(!Tags::new(vec!["Provider".to_string()], vec![]).is_empty());
    }
}
