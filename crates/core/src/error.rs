//! Error types for DOCX text extraction.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during DOCX text extraction.
#[derive(Error, Debug)]
pub enum Error {
    /// The package does not contain its primary content entry.
    #[error("{0} not found in the provided docx file.")]
    MissingContentEntry(String),

    /// ZIP archive error, message passed through from the decompressor.
    #[error("{0}")]
    ZipError(String),

    /// XML parsing error, message passed through from the tokenizer.
    #[error("{0}")]
    XmlError(String),
}
