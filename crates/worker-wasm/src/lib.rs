//! WASM-compatible wrapper for DOCX text extraction.
//!
//! This crate exposes the text extraction functionality to JavaScript
//! for use in Cloudflare Workers.

use docx_ooxml::DocxParser;
use js_sys::{ArrayBuffer, Promise, Uint8Array};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Result of extracting a document.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Original filename.
    pub filename: String,
    /// Number of paragraphs that contained runs.
    pub paragraph_count: usize,
    /// Run texts of each paragraph.
    pub paragraphs: Vec<Vec<String>>,
    /// The assembled plain text.
    pub text: String,
}

/// Extract the plain text of a DOCX file.
///
/// # Arguments
/// * `buffer` - An `ArrayBuffer` or `Uint8Array` holding the file
///
/// # Returns
/// A promise resolving to the text, or rejecting with an error message.
#[wasm_bindgen(js_name = parseDocx)]
pub fn parse_docx(buffer: JsValue) -> Promise {
    let bytes = match to_bytes(&buffer) {
        Ok(bytes) => bytes,
        Err(e) => return Promise::reject(&JsValue::from_str(&e)),
    };

    match parse_docx_impl(&bytes) {
        Ok(text) => Promise::resolve(&JsValue::from_str(&text)),
        Err(e) => Promise::reject(&JsValue::from_str(&e)),
    }
}

/// Extract a DOCX file into its paragraphs and text.
///
/// # Arguments
/// * `data` - The raw bytes of the DOCX file
/// * `filename` - The original filename
///
/// # Returns
/// A JavaScript object with the extraction result, or throws on error.
#[wasm_bindgen(js_name = extractDocument)]
pub fn extract_document(data: &[u8], filename: &str) -> Result<JsValue, JsValue> {
    let result = extract_document_impl(data, filename).map_err(|e| JsValue::from_str(&e))?;

    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Copy an `ArrayBuffer` or `Uint8Array` into Rust-owned bytes.
fn to_bytes(buffer: &JsValue) -> Result<Vec<u8>, String> {
    if let Some(array) = buffer.dyn_ref::<Uint8Array>() {
        Ok(array.to_vec())
    } else if buffer.is_instance_of::<ArrayBuffer>() {
        Ok(Uint8Array::new(buffer).to_vec())
    } else {
        Err("Expected an ArrayBuffer or Uint8Array".to_string())
    }
}

fn parse_docx_impl(data: &[u8]) -> Result<String, String> {
    docx_ooxml::parse_docx(data).map_err(|e| e.to_string())
}

fn extract_document_impl(data: &[u8], filename: &str) -> Result<ExtractionResult, String> {
    let parser = DocxParser::new();
    let document = parser.parse(data, filename).map_err(|e| e.to_string())?;
    let text = parser.writer().render(&document.paragraphs);

    Ok(ExtractionResult {
        filename: document.filename,
        paragraph_count: document.paragraphs.len(),
        paragraphs: document.paragraphs.into_iter().map(|p| p.runs).collect(),
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::FileOptions;
    use zip::ZipWriter;

    fn build_archive(files: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (path, content) in files {
            writer.start_file(*path, FileOptions::default()).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    const DOCUMENT: &str = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t>Hello</w:t></w:r><w:r><w:t>world</w:t></w:r></w:p><w:p><w:r><w:t>Bye</w:t></w:r></w:p></w:body></w:document>"#;

    #[test]
    fn test_parse_docx_impl() {
        let bytes = build_archive(&[("word/document.xml", DOCUMENT)]);
        assert_eq!(parse_docx_impl(&bytes).unwrap(), "Hello world \nBye");
    }

    #[test]
    fn test_parse_docx_impl_missing_entry() {
        let bytes = build_archive(&[("word/other.xml", DOCUMENT)]);
        let err = parse_docx_impl(&bytes).unwrap_err();
        assert_eq!(err, "word/document.xml not found in the provided docx file.");
    }

    #[test]
    fn test_extract_document_impl() {
        let bytes = build_archive(&[("word/document.xml", DOCUMENT)]);
        let result = extract_document_impl(&bytes, "greeting.docx").unwrap();

        assert_eq!(result.filename, "greeting.docx");
        assert_eq!(result.paragraph_count, 2);
        assert_eq!(result.paragraphs[0], vec!["Hello", "world"]);
        assert_eq!(result.text, "Hello world \nBye");
    }
}
