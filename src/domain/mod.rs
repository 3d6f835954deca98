//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `questionnaire` - Question graph, navigation, answers and results
//! - `report` - Report content and page layout

pub mod foundation;
pub mod questionnaire;
pub mod report;
