//! Wire shape of a graph document.
//!
//! Graph documents describe questions in a flat layout (`roleAddIfYes`,
//! `attributesAddIfSelected`, ...). These types only exist to be deserialized
//! and converted into [`Question`]s.

use serde::Deserialize;

use crate::domain::foundation::{NumberOrString, QuestionId};

use super::graph::GraphValidationError;
use super::question::{BranchSpec, NextRef, Question, QuestionKind, SelectOption, Tags};

/// A single question as written in a graph document.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum QuestionDefinition {
    #[serde(rename = "yesno", alias = "yes_no")]
    YesNo {
        id: QuestionId,
        question: String,
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        yes: Option<BranchDefinition>,
        #[serde(default)]
        no: Option<BranchDefinition>,
        #[serde(default, rename = "roleAddIfYes")]
        role_add_if_yes: Vec<String>,
        #[serde(default, rename = "attributesAddIfYes")]
        attributes_add_if_yes: Vec<String>,
        #[serde(default, rename = "roleAddIfNo")]
        role_add_if_no: Vec<String>,
        #[serde(default, rename = "attributesAddIfNo")]
        attributes_add_if_no: Vec<String>,
    },

    #[serde(rename = "select")]
    Select {
        id: QuestionId,
        question: String,
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        options: Vec<OptionDefinition>,
    },

    #[serde(rename = "text")]
    Text {
        id: QuestionId,
        question: String,
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        required: bool,
        #[serde(default)]
        multiline: bool,
        #[serde(default)]
        placeholder: Option<String>,
        #[serde(default)]
        next: Option<NextRef>,
    },
}

/// A `yes` / `no` branch object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BranchDefinition {
    #[serde(default)]
    pub next: Option<NextRef>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub attributes: Vec<String>,
}

/// One option of a select question.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionDefinition {
    value: NumberOrString,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    next: Option<NextRef>,
    #[serde(default, rename = "roleAddIfSelected")]
    role_add_if_selected: Vec<String>,
    #[serde(default, rename = "attributesAddIfSelected")]
    attributes_add_if_selected: Vec<String>,
}

impl QuestionDefinition {
    /// Returns the declared identity.
    pub fn id(&self) -> &QuestionId {
        match self {
            QuestionDefinition::YesNo { id, .. }
            | QuestionDefinition::Select { id, .. }
            | QuestionDefinition::Text { id, .. } => id,
        }
    }

    /// Converts the wire shape into a domain question.
    ///
    /// Only structural completeness is checked here; reference resolution
    /// belongs to [`QuestionGraph::new`](super::QuestionGraph::new).
    pub fn into_question(self) -> Result<Question, GraphValidationError> {
        match self {
            QuestionDefinition::YesNo {
                id,
                question,
                description,
                yes,
                no,
                role_add_if_yes,
                attributes_add_if_yes,
                role_add_if_no,
                attributes_add_if_no,
            } => {
                let yes = branch(&id, "yes", yes, role_add_if_yes, attributes_add_if_yes)?;
                let no = branch(&id, "no", no, role_add_if_no, attributes_add_if_no)?;
                Ok(build(id, question, description, QuestionKind::YesNo { yes, no }))
            }
            QuestionDefinition::Select {
                id,
                question,
                description,
                options,
            } => {
                let options = options
                    .into_iter()
                    .map(|opt| {
                        let value = opt.value.into_string();
                        let next = opt.next.ok_or_else(|| GraphValidationError::MissingNext {
                            question: id.clone(),
                            branch: format!("option '{}'", value),
                        })?;
                        Ok(SelectOption {
                            label: opt.label.unwrap_or_else(|| value.clone()),
                            value,
                            branch: BranchSpec::new(
                                next,
                                Tags::new(opt.role_add_if_selected, opt.attributes_add_if_selected),
                            ),
                        })
                    })
                    .collect::<Result<Vec<_>, GraphValidationError>>()?;
                Ok(build(id, question, description, QuestionKind::Select { options }))
            }
            QuestionDefinition::Text {
                id,
                question,
                description,
                required,
                multiline,
                placeholder,
                next,
            } => {
                let next = next.ok_or_else(|| GraphValidationError::MissingNext {
                    question: id.clone(),
                    branch: "text".to_string(),
                })?;
                let kind = QuestionKind::Text {
                    required,
                    multiline,
                    placeholder,
                    next,
                };
                Ok(build(id, question, description, kind))
            }
        }
    }
}

fn build(
    id: QuestionId,
    prompt: String,
    description: Option<String>,
    kind: QuestionKind,
) -> Question {
    let question = Question::new(id, prompt, kind);
    match description.filter(|d| !d.trim().is_empty()) {
        Some(d) => question.with_description(d),
        None => question,
    }
}

fn branch(
    id: &QuestionId,
    name: &str,
    definition: Option<BranchDefinition>,
    mut roles: Vec<String>,
    mut attributes: Vec<String>,
) -> Result<BranchSpec, GraphValidationError> {
    let definition = definition.unwrap_or_default();
    let next = definition.next.ok_or_else(|| GraphValidationError::MissingNext {
        question: id.clone(),
        branch: name.to_string(),
    })?;
    roles.extend(definition.roles);
    attributes.extend(definition.attributes);
    Ok(BranchSpec::new(next, Tags::new(roles, attributes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> QuestionDefinition {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn yes_no_merges_flat_and_branch_tags() {
        let def = parse(
            r#"{
                "id": 1, "type": "yesno", "question": "Do you provide services?",
                "yes": { "next": 2, "roles": ["Operator"] },
                "no": { "next": "END_NONE" },
                "roleAddIfYes": ["Provider"],
                "attributesAddIfNo": ["Passive"]
            }"#,
        );
        let q = def.into_question().unwrap();
        match q.kind {
            QuestionKind::YesNo { yes, no } => {
                assert_eq!(yes.next.as_str(), "2");
                assert_eq!(yes.tags.roles, vec!["Provider", "Operator"]);
                assert_eq!(no.next.as_str(), "END_NONE");
                assert_eq!(no.tags.attributes, vec!["Passive"]);
            }
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn select_option_label_defaults_to_value() {
        let def = parse(
            r#"{
                "id": "s", "type": "select", "question": "Pick",
                "options": [ { "value": "a", "next": "END_SUMMARY", "attributesAddIfSelected": ["Y"] } ]
            }"#,
        );
        let q = def.into_question().unwrap();
        let opt = q.option("a").unwrap();
        assert_eq!(opt.label, "a");
        assert_eq!(opt.branch.tags.attributes, vec!["Y"]);
    }

    #[test]
    fn text_definition_keeps_widget_flags() {
        let def = parse(
            r#"{
                "id": 3, "type": "text", "question": "Comments?", "description": "  ",
                "required": true, "multiline": true, "placeholder": "Type here", "next": "END_SUMMARY"
            }"#,
        );
        let q = def.into_question().unwrap();
        assert!(q.description.is_none());
        assert_eq!(
            q.kind,
            QuestionKind::Text {
                required: true,
                multiline: true,
                placeholder: Some("Type here".to_string()),
                next: NextRef::new("END_SUMMARY"),
            }
        );
    }

    #[test]
    fn missing_branch_next_is_a_validation_error() {
        let def = parse(r#"{ "id": 1, "type": "yesno", "question": "?", "yes": { "next": 2 } }"#);
        match def.into_question() {
            Err(GraphValidationError::MissingNext { question, branch }) => {
                assert_eq!(question.as_str(), "1");
                assert_eq!(branch, "no");
            }
            other => panic!("expected MissingNext, got {:?}", other),
        }
    }

    #[test]
    fn unknown_question_type_fails_to_parse() {
        let result: Result<QuestionDefinition, _> =
            serde_json::from_str(r#"{ "id": 1, "type": "slider", "question": "?" }"#);
        assert!(result.is_err());
    }
}
