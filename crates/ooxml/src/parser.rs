//! DOCX text extractor.

use crate::archive::ArchiveFiles;
use crate::tree::{self, Field, ParseOptions, XmlNode};
use docx_core::text::DEFAULT_RUN_SEPARATOR;
use docx_core::{Error, ExtractedDocument, Paragraph, PlainTextWriter, Result};

/// Archive path of the main document part.
pub const DOCUMENT_PART: &str = "word/document.xml";

const DOCUMENT: &str = "w:document";
const BODY: &str = "w:body";
const PARAGRAPH: &str = "w:p";
const RUN: &str = "w:r";
const TEXT: &str = "w:t";

/// Options for a [`DocxParser`].
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Options for building the XML tree.
    pub parse: ParseOptions,
    /// Text appended after every run.
    pub run_separator: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            parse: ParseOptions::default(),
            run_separator: DEFAULT_RUN_SEPARATOR.to_string(),
        }
    }
}

impl ExtractOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }

    pub fn with_run_separator(mut self, separator: impl Into<String>) -> Self {
        self.run_separator = separator.into();
        self
    }
}

/// Parser for DOCX (Office Open XML) files.
#[derive(Debug, Clone, Default)]
pub struct DocxParser {
    options: ExtractOptions,
}

impl DocxParser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom options.
    pub fn with_options(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Parse a DOCX package into its paragraphs.
    pub fn parse(&self, bytes: &[u8], filename: &str) -> Result<ExtractedDocument> {
        let files = ArchiveFiles::from_bytes(bytes)?;
        log::debug!("Unpacked {} entries from '{}'", files.len(), filename);

        let xml = read_document_part(&files)?;
        let root = tree::parse(&xml, &self.options.parse)?;

        let mut document = ExtractedDocument::new(filename);
        let paragraphs: &[XmlNode] = match root.path(&[DOCUMENT, BODY]) {
            Some(body) => body.children(PARAGRAPH),
            None => {
                log::warn!("'{}' has no {}/{} element", filename, DOCUMENT, BODY);
                &[]
            }
        };

        for paragraph in paragraphs {
            if let Some(paragraph) = collect_paragraph(paragraph) {
                document.add_paragraph(paragraph);
            }
        }

        log::debug!(
            "Found {} paragraphs ({} with runs) in '{}'",
            paragraphs.len(),
            document.paragraph_count(),
            filename
        );

        Ok(document)
    }

    /// Extract the plain text of a DOCX package.
    pub fn extract_text(&self, bytes: &[u8]) -> Result<String> {
        let document = self.parse(bytes, "")?;
        Ok(self.writer().render(&document.paragraphs))
    }

    /// The writer matching this parser's separator settings.
    pub fn writer(&self) -> PlainTextWriter {
        PlainTextWriter::new().with_run_separator(self.options.run_separator.as_str())
    }
}

/// Look up and decode the main document part.
fn read_document_part(files: &ArchiveFiles) -> Result<String> {
    let bytes = files
        .get(DOCUMENT_PART)
        .ok_or_else(|| Error::MissingContentEntry(DOCUMENT_PART.to_string()))?;
    Ok(decode_utf8(bytes))
}

/// Decode UTF-8, replacing invalid sequences and dropping a leading BOM.
fn decode_utf8(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text.into_owned(),
    }
}

/// Collect a `w:p` element.
///
/// Paragraphs without any `w:r`, or whose only `w:r` is an empty element,
/// yield nothing.
fn collect_paragraph(paragraph: &XmlNode) -> Option<Paragraph> {
    let runs = match paragraph.field(RUN)? {
        Field::Single(run) if is_empty_element(run) => return None,
        field => field.as_slice(),
    };

    let mut collected = Paragraph::new();
    for text in runs.iter().filter_map(run_text) {
        collected.add_run(text);
    }
    Some(collected)
}

fn is_empty_element(node: &XmlNode) -> bool {
    node.text.is_empty() && node.children.is_empty() && node.attributes.is_empty()
}

/// Text of a `w:r` element; `None` when it has no non-empty `w:t`.
fn run_text(run: &XmlNode) -> Option<String> {
    let text: String = run
        .children(TEXT)
        .iter()
        .map(|t| t.text.as_str())
        .collect();
    (!text.is_empty()).then_some(text)
}
