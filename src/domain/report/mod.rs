//! Report domain module.
//!
//! Turns a finished questionnaire result into styled content blocks and lays
//! them out on pages. Rendering the pages into a file format is left to a
//! `DocumentRenderer` port implementation.

mod content;
mod layout;
mod metrics;

pub use content::{ReportContent, ReportElement, TextBlock, TextStyle};
pub use layout::{layout, LaidOutDocument, LayoutConfig, Page, PlacedLine, MM_PER_PT};
pub use metrics::{encode_win_ansi, glyph_width, win_ansi_byte};
