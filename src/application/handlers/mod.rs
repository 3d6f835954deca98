//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod questionnaire;

pub use questionnaire::{
    ActiveSession, ExportReportCommand, ExportReportError, ExportReportHandler,
    LoadQuestionnaireError, LoadQuestionnaireHandler, LoadQuestionnaireResult, LoadState,
    RespondentAction, RespondentActionError, RespondentActionHandler, SessionUnavailable,
    DEFAULT_REPORT_FILENAME,
};
