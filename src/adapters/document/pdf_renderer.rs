//! PDF report renderer built on `lopdf`.
//!
//! Uses the standard Type1 fonts Helvetica and Helvetica-Bold with
//! WinAnsi encoding, so no font files are embedded.

use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::domain::report::{encode_win_ansi, LaidOutDocument, Page, MM_PER_PT};
use crate::ports::{DocumentRenderer, ExportFormat, RenderError};

const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

/// Renders a laid-out report as a PDF document.
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer;

impl PdfRenderer {
    pub fn new() -> Self {
        Self
    }

    fn build(&self, document: &LaidOutDocument) -> Result<Vec<u8>, RenderError> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let bold_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                REGULAR_FONT => regular_id,
                BOLD_FONT => bold_id,
            },
        });

        let page_height_pt = mm_to_pt(document.page_height_mm);
        let mut kids: Vec<Object> = Vec::with_capacity(document.pages.len());
        for page in &document.pages {
            let content = page_content(page, document.page_height_mm);
            let encoded = content
                .encode()
                .map_err(|e| RenderError::failed(format!("Failed to encode page content: {}", e)))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => document.pages.len() as i64,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                mm_to_pt(document.page_width_mm).into(),
                page_height_pt.into(),
            ],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| RenderError::failed(format!("Failed to write PDF: {}", e)))?;
        Ok(buffer)
    }
}

#[async_trait]
impl DocumentRenderer for PdfRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn render(&self, document: &LaidOutDocument) -> Result<Vec<u8>, RenderError> {
        self.build(document)
    }
}

/// Whole points; PDF user space is fine with integer coordinates here.
fn mm_to_pt(mm: f64) -> i64 {
    (mm / MM_PER_PT).round() as i64
}

fn page_content(page: &Page, page_height_mm: f64) -> Content {
    let mut operations = Vec::with_capacity(page.lines.len() * 5);
    for line in &page.lines {
        let font = if line.style.bold {
            BOLD_FONT
        } else {
            REGULAR_FONT
        };
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![font.into(), (line.style.size_pt.round() as i64).into()],
        ));
        // PDF measures from the bottom edge.
        operations.push(Operation::new(
            "Td",
            vec![
                mm_to_pt(line.x_mm).into(),
                mm_to_pt(page_height_mm - line.y_mm).into(),
            ],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(&line.text), StringFormat::Literal)],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    Content { operations }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::{PlacedLine, TextStyle};

    fn document(page_count: usize) -> LaidOutDocument {
        LaidOutDocument {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            pages: (0..page_count)
                .map(|i| Page {
                    lines: vec![
                        PlacedLine {
                            x_mm: 15.0,
                            y_mm: 15.0,
                            text: format!("Summary {}", i),
                            style: TextStyle::bold(16.0),
                        },
                        PlacedLine {
                            x_mm: 15.0,
                            y_mm: 22.0,
                            text: "• Provider (main)".to_string(),
                            style: TextStyle::regular(11.0),
                        },
                    ],
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn renders_loadable_pdf_with_one_page_per_layout_page() {
        let bytes = PdfRenderer::new().render(&document(3)).await.unwrap();

        assert!(bytes.starts_with(b"%PDF-1.5"));
        let loaded = Document::load_mem(&bytes).unwrap();
        assert_eq!(loaded.get_pages().len(), 3);
    }

    #[tokio::test]
    async fn renders_text_with_both_fonts() {
        let bytes = PdfRenderer::new().render(&document(1)).await.unwrap();
        let loaded = Document::load_mem(&bytes).unwrap();

        let text = loaded.extract_text(&[1]).unwrap();

        assert!(text.contains("Summary 0"));
        assert_eq!(PdfRenderer::new().format(), ExportFormat::Pdf);
    }

    #[test]
    fn a4_width_converts_to_points() {
        assert_eq!(mm_to_pt(210.0), 595);
        assert_eq!(mm_to_pt(297.0), 842);
    }

    #[tokio::test]
    async fn cp1252_letters_survive_encoding() {
        let mut doc = document(1);
        doc.pages[0].lines[1].text = "Škoda Œuvre Ÿ".to_string();

        let bytes = PdfRenderer::new().render(&doc).await.unwrap();
        let loaded = Document::load_mem(&bytes).unwrap();
        let page_id = loaded.get_pages()[&1];
        let content = Content::decode(&loaded.get_page_content(page_id).unwrap()).unwrap();

        let shown: Vec<Vec<u8>> = content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(Object::String(bytes, _)) => Some(bytes.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(shown[1], b"\x8Akoda \x8Cuvre \x9F".to_vec());
    }
}
