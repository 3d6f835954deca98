//! ExportReportHandler - Renders the finished questionnaire as a document.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, Timestamp};
use crate::domain::questionnaire::QuestionnaireError;
use crate::domain::report::{layout, LayoutConfig, ReportContent};
use crate::ports::{DocumentRenderer, ExportFormat, ExportedDocument, RenderError};

use super::active_session::{ActiveSession, SessionUnavailable};

/// Default download name, without extension.
pub const DEFAULT_REPORT_FILENAME: &str = "questionnaire-result";

/// Command to export the current result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportReportCommand {
    pub format: ExportFormat,
}

/// Errors that can occur during export.
#[derive(Debug, Clone, Error)]
pub enum ExportReportError {
    /// No renderer for the format is registered or it reports itself as
    /// unavailable. Session state is unaffected.
    #[error("Report export to {0} is not available")]
    Unavailable(ExportFormat),

    #[error(transparent)]
    Session(#[from] SessionUnavailable),

    #[error(transparent)]
    Questionnaire(#[from] QuestionnaireError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl ExportReportError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ExportReportError::Unavailable(_) => ErrorCode::ExportUnavailable,
            ExportReportError::Session(e) => e.code(),
            ExportReportError::Questionnaire(e) => e.code(),
            ExportReportError::Render(RenderError::Unavailable(_)) => ErrorCode::ExportUnavailable,
            ExportReportError::Render(_) => ErrorCode::ExportFailed,
        }
    }
}

/// Handler for report export.
pub struct ExportReportHandler {
    session: ActiveSession,
    renderers: HashMap<ExportFormat, Arc<dyn DocumentRenderer>>,
    layout: LayoutConfig,
    base_filename: String,
}

impl ExportReportHandler {
    pub fn new(session: ActiveSession, layout: LayoutConfig) -> Self {
        Self {
            session,
            renderers: HashMap::new(),
            layout,
            base_filename: DEFAULT_REPORT_FILENAME.to_string(),
        }
    }

    /// Registers a renderer under the format it reports.
    pub fn with_renderer(mut self, renderer: Arc<dyn DocumentRenderer>) -> Self {
        self.renderers.insert(renderer.format(), renderer);
        self
    }

    pub fn with_base_filename(mut self, base_filename: impl Into<String>) -> Self {
        self.base_filename = base_filename.into();
        self
    }

    /// Formats with a registered renderer, in a stable order.
    pub fn formats(&self) -> Vec<ExportFormat> {
        let mut formats: Vec<ExportFormat> = self.renderers.keys().copied().collect();
        formats.sort_by_key(|f| f.to_string());
        formats
    }

    pub async fn handle(
        &self,
        cmd: ExportReportCommand,
    ) -> Result<ExportedDocument, ExportReportError> {
        let renderer = match self.renderers.get(&cmd.format) {
            Some(renderer) if renderer.is_available().await => Arc::clone(renderer),
            _ => {
                tracing::warn!(format = %cmd.format, "Report renderer unavailable");
                return Err(ExportReportError::Unavailable(cmd.format));
            }
        };

        // Snapshot the result; rendering happens outside the session lock.
        let result = self.session.with_session(|session| session.result()).await??;

        let content = ReportContent::from_result(&result, Timestamp::now());
        let document = layout(&content, &self.layout);
        let bytes = renderer.render(&document).await.map_err(|e| {
            tracing::error!(format = %cmd.format, error = %e, "Report rendering failed");
            e
        })?;

        tracing::info!(
            format = %cmd.format,
            pages = document.page_count(),
            bytes = bytes.len(),
            "Report exported"
        );
        Ok(ExportedDocument::new(bytes, cmd.format, &self.base_filename))
    }
}
