//! Core error type, document types, and plain-text assembly
//! for DOCX text extraction.

pub mod error;
pub mod text;
pub mod types;

pub use error::{Error, Result};
pub use text::PlainTextWriter;
pub use types::{ExtractedDocument, Paragraph};
