//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    ActiveSession, ExportReportCommand, ExportReportError, ExportReportHandler,
    LoadQuestionnaireError, LoadQuestionnaireHandler, LoadQuestionnaireResult, LoadState,
    RespondentAction, RespondentActionError, RespondentActionHandler, SessionUnavailable,
    DEFAULT_REPORT_FILENAME,
};
