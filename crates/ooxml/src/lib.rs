//! DOCX (Office Open XML) backend for plain-text extraction.
//!
//! A .docx file is a ZIP archive; its text lives in `word/document.xml`.

pub mod archive;
pub mod parser;
pub mod tree;

#[cfg(test)]
pub(crate) mod test_support;

pub use archive::{looks_like_zip, ArchiveFiles};
pub use parser::{DocxParser, ExtractOptions, DOCUMENT_PART};
pub use tree::{Field, ParseOptions, XmlNode};

use docx_core::Result;

/// Extract the plain text of a DOCX package with default options.
///
/// Accepts any byte container (`Vec<u8>`, `&[u8]`, arrays, ...).
pub fn parse_docx(buffer: impl AsRef<[u8]>) -> Result<String> {
    DocxParser::new().extract_text(buffer.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::build_docx;

    #[test]
    fn test_parse_docx_accepts_owned_and_borrowed_bytes() {
        let bytes = build_docx("<w:p><w:r><w:t>Hello</w:t></w:r><w:r><w:t>world</w:t></w:r></w:p>");

        let from_slice = parse_docx(bytes.as_slice()).unwrap();
        let from_vec = parse_docx(bytes.clone()).unwrap();
        let from_ref = parse_docx(&bytes).unwrap();

        assert_eq!(from_slice, "Hello world");
        assert_eq!(from_slice, from_vec);
        assert_eq!(from_vec, from_ref);
    }
}
