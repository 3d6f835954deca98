//! HTTP handlers for questionnaire endpoints.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::questionnaire::{
    ExportReportCommand, ExportReportError, ExportReportHandler, LoadQuestionnaireError,
    LoadQuestionnaireHandler, RespondentAction, RespondentActionError, RespondentActionHandler,
};
use crate::domain::foundation::ErrorCode;
use crate::domain::questionnaire::{QuestionnaireError, SessionView};
use crate::ports::{ExportFormat, RenderError};

use super::dto::{AnswerRequest, ErrorResponse, ReloadResponse, ReportQuery, ViewResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct QuestionnaireHandlers {
    actions: Arc<RespondentActionHandler>,
    loader: Arc<LoadQuestionnaireHandler>,
    export: Arc<ExportReportHandler>,
    app_title: Arc<str>,
}

impl QuestionnaireHandlers {
    pub fn new(
        actions: Arc<RespondentActionHandler>,
        loader: Arc<LoadQuestionnaireHandler>,
        export: Arc<ExportReportHandler>,
        app_title: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            actions,
            loader,
            export,
            app_title: app_title.into(),
        }
    }

    fn view_response(&self, view: SessionView) -> Response {
        let response = ViewResponse {
            app_title: self.app_title.to_string(),
            report_formats: self.export.formats().iter().map(|f| f.to_string()).collect(),
            view,
        };
        (StatusCode::OK, Json(response)).into_response()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/questionnaire - Current view
pub async fn get_view(State(handlers): State<QuestionnaireHandlers>) -> Response {
    match handlers.actions.current_view().await {
        Ok(view) => handlers.view_response(view),
        Err(e) => handle_action_error(e),
    }
}

/// POST /api/questionnaire/answer - Answer the current question
pub async fn answer(
    State(handlers): State<QuestionnaireHandlers>,
    Json(req): Json<AnswerRequest>,
) -> Response {
    match handlers.actions.handle(RespondentAction::Answer(req.into())).await {
        Ok(view) => handlers.view_response(view),
        Err(e) => handle_action_error(e),
    }
}

/// POST /api/questionnaire/back - Go back one step
///
/// Going back with an empty history leaves the view unchanged.
pub async fn back(State(handlers): State<QuestionnaireHandlers>) -> Response {
    match handlers.actions.handle(RespondentAction::Back).await {
        Ok(view) => handlers.view_response(view),
        Err(RespondentActionError::Questionnaire(QuestionnaireError::NoHistory)) => {
            get_view(State(handlers)).await
        }
        Err(e) => handle_action_error(e),
    }
}

/// POST /api/questionnaire/restart - Start over
pub async fn restart(State(handlers): State<QuestionnaireHandlers>) -> Response {
    match handlers.actions.handle(RespondentAction::Restart).await {
        Ok(view) => handlers.view_response(view),
        Err(e) => handle_action_error(e),
    }
}

/// POST /api/questionnaire/reload - Re-fetch the graph and start a new session
pub async fn reload(State(handlers): State<QuestionnaireHandlers>) -> Response {
    match handlers.loader.handle().await {
        Ok(result) => {
            let response = ReloadResponse {
                session_id: result.session_id.to_string(),
                question_count: result.question_count,
                message: "Questionnaire loaded".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_load_error(e),
    }
}

/// GET /api/questionnaire/report?format=pdf|text - Download the report
pub async fn report(
    State(handlers): State<QuestionnaireHandlers>,
    Query(query): Query<ReportQuery>,
) -> Response {
    let format = match query.format.as_deref().map(str::parse::<ExportFormat>) {
        None => ExportFormat::Pdf,
        Some(Ok(format)) => format,
        Some(Err(e)) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(e.to_string())))
                .into_response()
        }
    };

    match handlers.export.handle(ExportReportCommand { format }).await {
        Ok(document) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, document.content_type),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", document.filename),
                ),
            ],
            document.content,
        )
            .into_response(),
        Err(e) => handle_export_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn questionnaire_error_status(error: &QuestionnaireError) -> StatusCode {
    match error {
        QuestionnaireError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        QuestionnaireError::BadTransition { .. }
        | QuestionnaireError::NotFinished
        | QuestionnaireError::NoHistory => StatusCode::CONFLICT,
        QuestionnaireError::UnknownQuestion(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn handle_action_error(error: RespondentActionError) -> Response {
    match error {
        RespondentActionError::Unavailable(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse::new(e.code(), e.to_string())),
        )
            .into_response(),
        RespondentActionError::Questionnaire(e) => {
            let mut body = ErrorResponse::new(e.code(), e.user_message());
            if let QuestionnaireError::Validation(v) = &e {
                body = body.with_details(serde_json::json!({ "field": v.field() }));
            }
            (questionnaire_error_status(&e), Json(body)).into_response()
        }
    }
}

fn handle_load_error(error: LoadQuestionnaireError) -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ErrorResponse::new(error.code(), error.to_string())),
    )
        .into_response()
}

fn handle_export_error(error: ExportReportError) -> Response {
    let code = error.code();
    match error {
        ExportReportError::Unavailable(_)
        | ExportReportError::Session(_)
        | ExportReportError::Render(RenderError::Unavailable(_)) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse::new(code, error.to_string())),
        )
            .into_response(),
        ExportReportError::Questionnaire(e) => (
            questionnaire_error_status(&e),
            Json(ErrorResponse::new(code, e.user_message())),
        )
            .into_response(),
        ExportReportError::Render(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(ErrorCode::ExportFailed, e.to_string())),
        )
            .into_response(),
    }
}
