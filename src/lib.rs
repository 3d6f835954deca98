//! Questionnaire Engine - Branching questionnaire with navigable history
//!
//! This crate walks a respondent through a declarative question graph,
//! accumulates role and attribute tags from the answers, and exports the
//! aggregated result as a paginated report.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
