//! Report content: the ordered, styled blocks derived from a result.

use serde::Serialize;

use crate::domain::foundation::Timestamp;
use crate::domain::questionnaire::QuestionnaireResult;

/// Font size in points plus weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    pub size_pt: f64,
    pub bold: bool,
}

impl TextStyle {
    pub const fn regular(size_pt: f64) -> Self {
        Self {
            size_pt,
            bold: false,
        }
    }

    pub const fn bold(size_pt: f64) -> Self {
        Self {
            size_pt,
            bold: true,
        }
    }
}

/// A paragraph of text, wrapped as a unit, followed by extra spacing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBlock {
    pub text: String,
    pub style: TextStyle,
    pub space_after_mm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReportElement {
    Text(TextBlock),
    /// Vertical spacing in millimetres. Never triggers a page break.
    Gap { mm: f64 },
}

const TITLE: TextStyle = TextStyle::bold(16.0);
const TIMESTAMP: TextStyle = TextStyle::regular(9.0);
const HEADING: TextStyle = TextStyle::bold(12.0);
const BODY: TextStyle = TextStyle::regular(11.0);
const BODY_BOLD: TextStyle = TextStyle::bold(11.0);

/// Ordered report content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportContent {
    elements: Vec<ReportElement>,
}

impl ReportContent {
    /// Title, generation time, roles, attributes, then every answer.
    pub fn from_result(result: &QuestionnaireResult, generated_at: Timestamp) -> Self {
        let mut content = Self {
            elements: Vec::new(),
        };

        content.text(result.title(), TITLE, 4.0);
        content.text(
            format!("Generated: {}", generated_at.to_local_display()),
            TIMESTAMP,
            6.0,
        );

        content.text("Roles:", HEADING, 2.0);
        content.bullets(&result.roles, "No roles");
        content.gap(4.0);

        content.text("Attributes:", HEADING, 2.0);
        content.bullets(&result.attributes, "No attributes");
        content.gap(6.0);

        content.text("Answers:", HEADING, 3.0);
        for answer in &result.answers {
            content.text(format!("Question: {}", answer.prompt), BODY_BOLD, 0.0);
            content.text(format!("Answer: {}", answer.label), BODY, 0.0);
            content.gap(3.0);
        }

        content
    }

    pub fn elements(&self) -> &[ReportElement] {
        &self.elements
    }

    fn text(&mut self, text: impl Into<String>, style: TextStyle, space_after_mm: f64) {
        self.elements.push(ReportElement::Text(TextBlock {
            text: text.into(),
            style,
            space_after_mm,
        }));
    }

    fn gap(&mut self, mm: f64) {
        self.elements.push(ReportElement::Gap { mm });
    }

    fn bullets<'a>(&mut self, items: impl IntoIterator<Item = &'a String>, placeholder: &str) {
        let mut any = false;
        for item in items {
            any = true;
            self.text(format!("• {}", item), BODY, 0.0);
        }
        if !any {
            self.text(format!("• {}", placeholder), BODY, 0.0);
        }
    }
}
