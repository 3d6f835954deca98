//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types
//! that form the vocabulary of the questionnaire domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::{ErrorCode, ValidationError};
pub(crate) use ids::NumberOrString;
pub use ids::{QuestionId, SessionId};
pub use timestamp::Timestamp;
