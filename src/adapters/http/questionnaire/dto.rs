//! Request and response DTOs for the questionnaire endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ErrorCode;
use crate::domain::questionnaire::{Response, SessionView};

// ════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════

/// Body of `POST /answer`.
///
/// `{"kind":"yes_no","value":true}`, `{"kind":"select","value":"a"}` or
/// `{"kind":"text","value":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AnswerRequest {
    YesNo(bool),
    Select(String),
    Text(String),
}

impl From<AnswerRequest> for Response {
    fn from(req: AnswerRequest) -> Self {
        match req {
            AnswerRequest::YesNo(choice) => Response::YesNo(choice),
            AnswerRequest::Select(value) => Response::Select(value),
            AnswerRequest::Text(text) => Response::Text(text),
        }
    }
}

/// Query of `GET /report`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportQuery {
    /// `pdf` or `text`; PDF when omitted.
    pub format: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════

/// Current view plus presentation values.
#[derive(Debug, Clone, Serialize)]
pub struct ViewResponse {
    pub app_title: String,
    /// Formats the report endpoint can currently produce.
    pub report_formats: Vec<String>,
    #[serde(flatten)]
    pub view: SessionView,
}

/// Result of `POST /reload`.
#[derive(Debug, Clone, Serialize)]
pub struct ReloadResponse {
    pub session_id: String,
    pub question_count: usize,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_request_deserializes_each_kind() {
        let yes: AnswerRequest = serde_json::from_str(r#"{"kind":"yes_no","value":true}"#).unwrap();
        let select: AnswerRequest = serde_json::from_str(r#"{"kind":"select","value":"a"}"#).unwrap();
        let text: AnswerRequest = serde_json::from_str(r#"{"kind":"text","value":"hi"}"#).unwrap();

        assert_eq!(Response::from(yes), Response::YesNo(true));
        assert_eq!(Response::from(select), Response::Select("a".to_string()));
        assert_eq!(Response::from(text), Response::Text("hi".to_string()));
    }

    #[test]
    fn answer_request_rejects_unknown_kind() {
        let result: Result<AnswerRequest, _> = serde_json::from_str(r#"{"kind":"slider","value":3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn view_response_flattens_view_tag() {
        let response = ViewResponse {
            app_title: "Questionnaire".to_string(),
            report_formats: vec!["pdf".to_string()],
            view: SessionView::Empty,
        };

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["view"], "empty");
        assert_eq!(json["app_title"], "Questionnaire");
    }

    #[test]
    fn error_response_uses_error_code() {
        let error = ErrorResponse::new(ErrorCode::ValidationFailed, "Field cannot be empty");
        assert_eq!(error.code, "VALIDATION_FAILED");
        assert_eq!(error.message, "Field cannot be empty");
    }
}
