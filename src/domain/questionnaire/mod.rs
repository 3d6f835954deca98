//! Questionnaire domain module.
//!
//! A questionnaire is a directed graph of questions. Each answer selects the
//! next question or an end state (a terminal tag such as `END_SUMMARY`), and
//! may add roles and attributes that are unioned into the final result.
//!
//! # Events
//!
//! - `Started` - A session was created over a loaded graph
//! - `Answered` - An answer was recorded (first time or overwrite)
//! - `Advanced` - Moved forward to another question
//! - `ReachedTerminal` - Moved forward into an end state
//! - `WentBack` - Popped one step of history
//! - `Restarted` - History and answers were cleared

mod answer;
mod definition;
mod errors;
mod events;
mod graph;
mod navigator;
mod question;
mod result;
mod session;
mod terminal;
mod view;

pub use answer::{
    Answer, AnswerStore, AnswerValue, Response, TagUnion, NO_LABEL, YES_LABEL,
};
pub use definition::{BranchDefinition, OptionDefinition, QuestionDefinition};
pub use errors::QuestionnaireError;
pub use events::SessionEvent;
pub use graph::{GraphValidationError, QuestionGraph, Transition};
pub use navigator::{NavigationState, Navigator};
pub use question::{BranchSpec, NextRef, Question, QuestionKind, SelectOption, Tags};
pub use result::{AnsweredQuestion, QuestionnaireResult};
pub use session::QuestionnaireSession;
pub use terminal::{TerminalKind, TerminalTag, TERMINAL_PREFIX};
pub use view::{OptionView, Progress, QuestionView, ResultView, SessionView, Widget};
