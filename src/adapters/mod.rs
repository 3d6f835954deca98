//! Adapters - Implementations of port interfaces.
//!
//! - `source` - Graph sources (file, HTTP, in-memory)
//! - `document` - Report renderers (plain text, PDF)
//! - `http` - axum view channel

pub mod document;
pub mod http;
pub mod source;
