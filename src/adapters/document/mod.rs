//! Document adapters - Implementations of the DocumentRenderer port.
//!
//! - `TextRenderer` - Plain text, pages separated by form feed
//! - `PdfRenderer` - PDF via `lopdf` with built-in Helvetica fonts

mod pdf_renderer;
mod text_renderer;

pub use pdf_renderer::PdfRenderer;
pub use text_renderer::{TextRenderer, FORM_FEED};
