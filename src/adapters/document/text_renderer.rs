//! Plain-text report renderer.

use async_trait::async_trait;

use crate::domain::report::LaidOutDocument;
use crate::ports::{DocumentRenderer, ExportFormat, RenderError};

/// Page separator between rendered pages.
pub const FORM_FEED: char = '\u{000C}';

/// Spacing beyond a plain line advance that still counts as the same section.
const SECTION_SPACING_MM: f64 = 2.5;

/// Renders each laid-out line on its own text line.
///
/// A vertical advance noticeably larger than one line becomes a blank line,
/// so sections stay visually separated. Pages are separated by a form feed.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    blank_line_after_mm: f64,
}

impl TextRenderer {
    pub fn new(line_height_mm: f64) -> Self {
        Self {
            blank_line_after_mm: line_height_mm + SECTION_SPACING_MM,
        }
    }

    fn render_text(&self, document: &LaidOutDocument) -> String {
        let mut out = String::new();

        for (index, page) in document.pages.iter().enumerate() {
            if index > 0 {
                out.push(FORM_FEED);
                out.push('\n');
            }
            let mut previous_y: Option<f64> = None;
            for line in &page.lines {
                if let Some(y) = previous_y {
                    if line.y_mm - y > self.blank_line_after_mm {
                        out.push('\n');
                    }
                }
                out.push_str(&line.text);
                out.push('\n');
                previous_y = Some(line.y_mm);
            }
        }

        out
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(7.0)
    }
}

#[async_trait]
impl DocumentRenderer for TextRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Text
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn render(&self, document: &LaidOutDocument) -> Result<Vec<u8>, RenderError> {
        Ok(self.render_text(document).into_bytes())
    }
}
