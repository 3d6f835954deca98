//! Page layout for report content.
//!
//! Lines are placed with a running vertical cursor. Before a line is placed
//! the cursor is checked against the page-bottom threshold; if it is past the
//! threshold a new page starts at the top margin. Gaps and block spacing move
//! the cursor without checking, so a break always happens right before text.

use serde::Serialize;

use super::content::{ReportContent, ReportElement, TextStyle};
use super::metrics::glyph_width;

/// Millimetres per typographic point.
pub const MM_PER_PT: f64 = 0.3528;

/// Page geometry, all lengths in millimetres.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutConfig {
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    pub margin_left_mm: f64,
    pub margin_top_mm: f64,
    pub line_height_mm: f64,
    pub max_line_width_mm: f64,
    /// A line whose cursor is strictly greater than this starts a new page.
    pub page_bottom_mm: f64,
}

impl Default for LayoutConfig {
    /// A4 portrait.
    fn default() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_left_mm: 15.0,
            margin_top_mm: 15.0,
            line_height_mm: 7.0,
            max_line_width_mm: 180.0,
            page_bottom_mm: 280.0,
        }
    }
}

impl LayoutConfig {
    /// Rendered width of `text` in millimetres, from Helvetica metrics.
    pub fn text_width_mm(&self, text: &str, style: TextStyle) -> f64 {
        text.chars().map(|c| self.char_width_mm(c, style)).sum()
    }

    fn char_width_mm(&self, c: char, style: TextStyle) -> f64 {
        f64::from(glyph_width(c, style.bold)) / 1000.0 * style.size_pt * MM_PER_PT
    }

    /// Splits `text` into lines no wider than the maximum line width.
    ///
    /// Explicit newlines are kept. Words are packed greedily; a word that
    /// does not fit on a line by itself is split where it reaches the edge.
    /// A line always takes at least one character.
    pub fn wrap(&self, text: &str, style: TextStyle) -> Vec<String> {
        let limit = self.max_line_width_mm;
        let mut lines = Vec::new();

        for paragraph in text.split('\n') {
            let mut current = String::new();

            for word in paragraph.split_whitespace() {
                let candidate = if current.is_empty() {
                    word.to_string()
                } else {
                    format!("{} {}", current, word)
                };
                if self.text_width_mm(&candidate, style) <= limit {
                    current = candidate;
                    continue;
                }

                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let mut current_width = 0.0;
                for c in word.chars() {
                    let width = self.char_width_mm(c, style);
                    if !current.is_empty() && current_width + width > limit {
                        lines.push(std::mem::take(&mut current));
                        current_width = 0.0;
                    }
                    current.push(c);
                    current_width += width;
                }
            }

            lines.push(current);
        }

        lines
    }
}

/// A line of text at a fixed position on its page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedLine {
    pub x_mm: f64,
    /// Baseline position measured from the top edge.
    pub y_mm: f64,
    pub text: String,
    pub style: TextStyle,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

/// Paginated report ready for a document renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaidOutDocument {
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    pub pages: Vec<Page>,
}

impl LaidOutDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All lines in reading order.
    pub fn lines(&self) -> impl Iterator<Item = &PlacedLine> {
        self.pages.iter().flat_map(|p| p.lines.iter())
    }
}

/// Lays out content. Always yields at least one page.
pub fn layout(content: &ReportContent, config: &LayoutConfig) -> LaidOutDocument {
    let mut pages = vec![Page::default()];
    let mut cursor = config.margin_top_mm;

    for element in content.elements() {
        match element {
            ReportElement::Text(block) => {
                for line in config.wrap(&block.text, block.style) {
                    if cursor > config.page_bottom_mm {
                        pages.push(Page::default());
                        cursor = config.margin_top_mm;
                    }
                    if let Some(page) = pages.last_mut() {
                        page.lines.push(PlacedLine {
                            x_mm: config.margin_left_mm,
                            y_mm: cursor,
                            text: line,
                            style: block.style,
                        });
                    }
                    cursor += config.line_height_mm;
                }
                cursor += block.space_after_mm;
            }
            ReportElement::Gap { mm } => cursor += mm,
        }
    }

    LaidOutDocument {
        page_width_mm: config.page_width_mm,
        page_height_mm: config.page_height_mm,
        pages,
    }
}
