//! Questionnaire handlers - Load, respondent actions, view query and export.

mod active_session;
mod export_report;
mod load_questionnaire;
mod respondent_actions;

pub use active_session::{ActiveSession, LoadState, SessionUnavailable};
pub use export_report::{
    ExportReportCommand, ExportReportError, ExportReportHandler, DEFAULT_REPORT_FILENAME,
};
pub use load_questionnaire::{
    LoadQuestionnaireError, LoadQuestionnaireHandler, LoadQuestionnaireResult,
};
pub use respondent_actions::{RespondentAction, RespondentActionError, RespondentActionHandler};
