//! Document Renderer Port - Turns a laid-out report into a file.
//!
//! The domain decides what goes on which page and where; a renderer only
//! encodes the placed lines into a concrete format (plain text, PDF).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::report::LaidOutDocument;

/// Port for rendering paginated report documents.
///
/// # Contract
///
/// Implementations must:
/// - Emit pages in order, one output page per laid-out page
/// - Place every line's text exactly once
/// - Report `is_available() == false` instead of failing silently when a
///   required backend is missing
///
/// # Usage
///
/// ```rust,ignore
/// let renderer: &dyn DocumentRenderer = get_renderer();
/// let bytes = renderer.render(&document).await?;
/// ```
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    /// The format this renderer produces.
    fn format(&self) -> ExportFormat;

    /// Check if the renderer can currently produce output.
    async fn is_available(&self) -> bool;

    /// Render all pages of `document` into bytes.
    ///
    /// # Errors
    ///
    /// Returns `RenderError` if encoding fails.
    async fn render(&self, document: &LaidOutDocument) -> Result<Vec<u8>, RenderError>;
}

/// Export formats a report can be rendered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Plain UTF-8 text, pages separated by form feed.
    Text,
    /// PDF document.
    Pdf,
}

impl ExportFormat {
    /// Get the MIME content type for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Text => "text/plain; charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
        }
    }

    /// Get the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Pdf => "pdf",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Text => write!(f, "text"),
            ExportFormat::Pdf => write!(f, "pdf"),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(RenderError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Rendered document with content and download metadata.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    /// The rendered content as bytes.
    pub content: Vec<u8>,
    /// The MIME content type.
    pub content_type: String,
    /// Suggested filename for download.
    pub filename: String,
    /// The format that was used.
    pub format: ExportFormat,
}

impl ExportedDocument {
    /// Create a new exported document.
    pub fn new(content: Vec<u8>, format: ExportFormat, base_filename: &str) -> Self {
        Self {
            content,
            content_type: format.content_type().to_string(),
            filename: format!("{}.{}", base_filename, format.extension()),
            format,
        }
    }
}

/// Errors that can occur while rendering.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    /// Unsupported export format requested.
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// The rendering backend is not available.
    #[error("Renderer unavailable: {0}")]
    Unavailable(String),

    /// Encoding the document failed.
    #[error("Rendering failed: {0}")]
    Failed(String),
}

impl RenderError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_format_content_types_are_correct() {
        assert_eq!(ExportFormat::Text.content_type(), "text/plain; charset=utf-8");
        assert_eq!(ExportFormat::Pdf.content_type(), "application/pdf");
    }

    #[test]
    fn export_format_parses_from_string() {
        assert_eq!("pdf".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert_eq!("PDF".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert_eq!("text".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert_eq!("txt".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
    }

    #[test]
    fn export_format_parse_rejects_unknown_format() {
        let result = "docx".parse::<ExportFormat>();
        assert!(matches!(result, Err(RenderError::UnsupportedFormat(f)) if f == "docx"));
    }

    #[test]
    fn exported_document_builds_filename_from_extension() {
        let doc = ExportedDocument::new(vec![1, 2, 3], ExportFormat::Pdf, "questionnaire-result");
        assert_eq!(doc.filename, "questionnaire-result.pdf");
        assert_eq!(doc.content_type, "application/pdf");
    }
}
