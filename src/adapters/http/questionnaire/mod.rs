//! HTTP adapter for the questionnaire view channel.

mod dto;
mod handlers;
mod routes;

pub use dto::{AnswerRequest, ErrorResponse, ReloadResponse, ReportQuery, ViewResponse};
pub use handlers::QuestionnaireHandlers;
pub use routes::questionnaire_routes;
