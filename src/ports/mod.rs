//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `GraphSource` - Fetches the declarative questionnaire definition
//! - `DocumentRenderer` - Encodes a laid-out report into a file format

mod document_renderer;
mod graph_source;

pub use document_renderer::{DocumentRenderer, ExportFormat, ExportedDocument, RenderError};
pub use graph_source::{GraphSource, GraphSourceError};
