//! Answers and the answer store.
//!
//! The store keeps one answer per question in first-write order. Re-answering
//! a question overwrites its value, label and tags in place; the entry never
//! moves. The result listing depends on this ordering.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{QuestionId, ValidationError};

use super::question::{NextRef, Question, QuestionKind, Tags};

pub const YES_LABEL: &str = "Yes";
pub const NO_LABEL: &str = "No";

/// What a respondent submits for the current question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Response {
    YesNo(bool),
    Select(String),
    Text(String),
}

/// The recorded value of an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AnswerValue {
    YesNo(bool),
    Select(String),
    Text(String),
}

/// A recorded answer together with the tags it contributed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub question_id: QuestionId,
    pub prompt: String,
    pub value: AnswerValue,
    pub label: String,
    pub tags: Tags,
}

impl Answer {
    /// Validates a response against a question and derives the answer plus
    /// the next-reference it selects.
    ///
    /// Tags come from the chosen yes/no branch or select option; text answers
    /// never carry tags.
    pub fn from_response(
        question: &Question,
        response: Response,
    ) -> Result<(Answer, NextRef), ValidationError> {
        let (value, label, tags, next) = match (&question.kind, response) {
            (QuestionKind::YesNo { yes, no }, Response::YesNo(choice)) => {
                let (branch, label) = if choice { (yes, YES_LABEL) } else { (no, NO_LABEL) };
                (
                    AnswerValue::YesNo(choice),
                    label.to_string(),
                    branch.tags.clone(),
                    branch.next.clone(),
                )
            }
            (QuestionKind::Select { .. }, Response::Select(value)) => {
                let option = question.option(&value).ok_or_else(|| {
                    ValidationError::invalid_format(
                        "answer",
                        format!("'{}' is not an option of this question", value),
                    )
                })?;
                (
                    AnswerValue::Select(option.value.clone()),
                    option.label.clone(),
                    option.branch.tags.clone(),
                    option.branch.next.clone(),
                )
            }
            (QuestionKind::Text { required, next, .. }, Response::Text(text)) => {
                let text = text.trim().to_string();
                if *required && text.is_empty() {
                    return Err(ValidationError::empty_field("answer"));
                }
                (AnswerValue::Text(text.clone()), text, Tags::none(), next.clone())
            }
            (kind, _) => {
                return Err(ValidationError::invalid_format(
                    "answer",
                    format!("expected a {} answer", kind.name()),
                ))
            }
        };

        let answer = Answer {
            question_id: question.id.clone(),
            prompt: question.prompt.clone(),
            value,
            label,
            tags,
        };
        Ok((answer, next))
    }
}

/// Union of all tags across recorded answers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagUnion {
    pub roles: BTreeSet<String>,
    pub attributes: BTreeSet<String>,
}

/// One answer per question, in first-write order.
#[derive(Debug, Clone, Default)]
pub struct AnswerStore {
    answers: Vec<Answer>,
    positions: HashMap<QuestionId, usize>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an answer. Returns `true` on the first write for that question.
    ///
    /// A later write overwrites value, label and tags but keeps the original
    /// position.
    pub fn record(&mut self, answer: Answer) -> bool {
        match self.positions.get(&answer.question_id) {
            Some(&position) => {
                self.answers[position] = answer;
                false
            }
            None => {
                self.positions
                    .insert(answer.question_id.clone(), self.answers.len());
                self.answers.push(answer);
                true
            }
        }
    }

    pub fn get(&self, question_id: &QuestionId) -> Option<&Answer> {
        self.positions
            .get(question_id)
            .map(|&position| &self.answers[position])
    }

    /// Answers in first-write order.
    pub fn iter(&self) -> impl Iterator<Item = &Answer> {
        self.answers.iter()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn clear(&mut self) {
        self.answers.clear();
        self.positions.clear();
    }

    /// Deduplicated roles and attributes over every recorded answer.
    pub fn tags_union(&self) -> TagUnion {
        let mut union = TagUnion::default();
        for answer in &self.answers {
            union.roles.extend(answer.tags.roles.iter().cloned());
            union.attributes.extend(answer.tags.attributes.iter().cloned());
        }
        union
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::questionnaire::question::{BranchSpec, SelectOption};

    fn qid(s: &str) -> QuestionId {
        QuestionId::new(s).unwrap()
    }

    fn yes_no_question() -> Question {
        Question::new(
            qid("1"),
            "Do you provide services?",
            QuestionKind::YesNo {
                yes: BranchSpec::new(
                    NextRef::new("2"),
                    Tags::new(vec!["Provider".to_string()], vec![]),
                ),
                no: BranchSpec::new(
                    NextRef::new("END_NONE"),
                    Tags::new(vec!["X".to_string()], vec![]),
                ),
            },
        )
    }

    fn select_question() -> Question {
        Question::new(
            qid("2"),
            "Sector?",
            QuestionKind::Select {
                options: vec![SelectOption {
                    value: "energy".to_string(),
                    label: "Energy".to_string(),
                    branch: BranchSpec::new(
                        NextRef::new("END_SUMMARY"),
                        Tags::new(vec![], vec!["Y".to_string()]),
                    ),
                }],
            },
        )
    }

    fn text_question(required: bool) -> Question {
        Question::new(
            qid("3"),
            "Anything else?",
            QuestionKind::Text {
                required,
                multiline: false,
                placeholder: None,
                next: NextRef::new("END_SUMMARY"),
            },
        )
    }

    fn answer(id: &str, label: &str, roles: &[&str]) -> Answer {
        Answer {
            question_id: qid(id),
            prompt: format!("Prompt {}", id),
            value: AnswerValue::Text(label.to_string()),
            label: label.to_string(),
            tags: Tags::new(roles.iter().map(|r| r.to_string()).collect(), vec![]),
        }
    }

    mod derivation {
        use super::*;

        #[test]
        fn yes_no_takes_tags_from_matching_branch() {
            let (yes, next) = Answer::from_response(&yes_no_question(), Response::YesNo(true)).unwrap();
            assert_eq!(yes.label, "Yes");
            assert_eq!(yes.tags.roles, vec!["Provider"]);
            assert_eq!(next.as_str(), "2");

            let (no, next) = Answer::from_response(&yes_no_question(), Response::YesNo(false)).unwrap();
            assert_eq!(no.label, "No");
            assert_eq!(no.tags.roles, vec!["X"]);
            assert_eq!(next.as_str(), "END_NONE");
        }

        #[test]
        fn select_takes_tags_from_chosen_option() {
            let (answer, next) =
                Answer::from_response(&select_question(), Response::Select("energy".to_string())).unwrap();
            assert_eq!(answer.label, "Energy");
            assert_eq!(answer.tags.attributes, vec!["Y"]);
            assert_eq!(next.as_str(), "END_SUMMARY");
        }

        #[test]
        fn select_rejects_unknown_value() {
            let err = Answer::from_response(&select_question(), Response::Select("water".to_string()))
                .unwrap_err();
            assert_eq!(err.field(), "answer");
        }

        #[test]
        fn text_is_trimmed_and_carries_no_tags() {
            let (answer, _) =
                Answer::from_response(&text_question(true), Response::Text("  hello ".to_string())).unwrap();
            assert_eq!(answer.label, "hello");
            assert_eq!(answer.value, AnswerValue::Text("hello".to_string()));
            assert!(answer.tags.is_empty());
        }

        #[test]
        fn required_text_rejects_blank_input() {
            let err = Answer::from_response(&text_question(true), Response::Text("   ".to_string()))
                .unwrap_err();
            assert_eq!(err, ValidationError::empty_field("answer"));
        }

        #[test]
        fn optional_text_accepts_blank_input() {
            let (answer, _) =
                Answer::from_response(&text_question(false), Response::Text(String::new())).unwrap();
            assert_eq!(answer.label, "");
        }

        #[test]
        fn mismatched_response_shape_is_rejected() {
            let err = Answer::from_response(&yes_no_question(), Response::Text("yes".to_string()))
                .unwrap_err();
            assert_eq!(
                err,
                ValidationError::invalid_format("answer", "expected a yes/no answer")
            );
        }

        #[test]
        fn response_deserializes_from_tagged_json() {
            let r: Response = serde_json::from_str(r#"{"kind":"yes_no","value":true}"#).unwrap();
            assert_eq!(r, Response::YesNo(true));
            let r: Response = serde_json::from_str(r#"{"kind":"select","value":"a"}"#).unwrap();
            assert_eq!(r, Response::Select("a".to_string()));
        }
    }

    mod store {
        use super::*;

        #[test]
        fn record_reports_first_write() {
            let mut store = AnswerStore::new();
            assert!(store.record(answer("1", "a", &[])));
            assert!(!store.record(answer("1", "b", &[])));
            assert_eq!(store.len(), 1);
            assert_eq!(store.get(&qid("1")).unwrap().label, "b");
        }

        #[test]
        fn rewrite_keeps_first_write_position() {
            let mut store = AnswerStore::new();
            store.record(answer("1", "a", &[]));
            store.record(answer("2", "b", &[]));
            store.record(answer("3", "c", &[]));
            store.record(answer("1", "changed", &[]));

            let order: Vec<&str> = store.iter().map(|a| a.question_id.as_str()).collect();
            assert_eq!(order, vec!["1", "2", "3"]);
            assert_eq!(store.iter().next().unwrap().label, "changed");
        }

        #[test]
        fn rewrite_replaces_tags() {
            let mut store = AnswerStore::new();
            store.record(answer("1", "a", &["Old"]));
            store.record(answer("1", "a", &["New"]));
            let union = store.tags_union();
            assert_eq!(union.roles.into_iter().collect::<Vec<_>>(), vec!["New"]);
        }

        #[test]
        fn tags_union_removes_duplicates() {
            let mut store = AnswerStore::new();
            store.record(answer("1", "a", &["Provider", "Operator"]));
            store.record(answer("2", "b", &["Provider"]));
            let union = store.tags_union();
            assert_eq!(union.roles.len(), 2);
            assert!(union.attributes.is_empty());
        }

        #[test]
        fn clear_empties_the_store() {
            let mut store = AnswerStore::new();
            store.record(answer("1", "a", &[]));
            store.clear();
            assert!(store.is_empty());
            assert!(store.get(&qid("1")).is_none());
        }
    }
}
