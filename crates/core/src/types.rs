//! Domain types for representing extracted document content.

use crate::text::PlainTextWriter;
use serde::{Deserialize, Serialize};

/// Text extracted from a whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    /// Original filename (without path).
    pub filename: String,

    /// Paragraphs in document order. Paragraphs without any run are not recorded.
    pub paragraphs: Vec<Paragraph>,
}

impl ExtractedDocument {
    /// Create an empty document with the given filename.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            paragraphs: Vec::new(),
        }
    }

    /// Add a paragraph to the document.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Render the document as plain text with the default separators.
    pub fn text(&self) -> String {
        PlainTextWriter::new().render(&self.paragraphs)
    }
}

/// A single paragraph: the texts of its runs, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub runs: Vec<String>,
}

impl Paragraph {
    /// Create a paragraph with no runs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the text of one run.
    pub fn add_run(&mut self, text: impl Into<String>) {
        self.runs.push(text.into());
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Paragraph {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            runs: iter.into_iter().map(Into::into).collect(),
        }
    }
}
