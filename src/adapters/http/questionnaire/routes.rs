//! HTTP routes for questionnaire endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{answer, back, get_view, reload, report, restart, QuestionnaireHandlers};

/// Creates the questionnaire router with all endpoints.
pub fn questionnaire_routes(handlers: QuestionnaireHandlers) -> Router {
    Router::new()
        .route("/", get(get_view))
        .route("/answer", post(answer))
        .route("/back", post(back))
        .route("/restart", post(restart))
        .route("/reload", post(reload))
        .route("/report", get(report))
        .with_state(handlers)
}
