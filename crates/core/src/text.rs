//! Plain-text output.
//!
//! Each run's text is followed by the run separator, each paragraph by a
//! newline, and the assembled buffer is trimmed once at the end.

use crate::types::Paragraph;

/// Default text appended after every run.
pub const DEFAULT_RUN_SEPARATOR: &str = " ";

/// Assembles extracted paragraphs into a newline-delimited string.
#[derive(Debug, Clone)]
pub struct PlainTextWriter {
    run_separator: String,
}

impl Default for PlainTextWriter {
    fn default() -> Self {
        Self {
            run_separator: DEFAULT_RUN_SEPARATOR.to_string(),
        }
    }
}

impl PlainTextWriter {
    /// Create a writer with a single space between runs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom separator after each run.
    pub fn with_run_separator(mut self, separator: impl Into<String>) -> Self {
        self.run_separator = separator.into();
        self
    }

    pub fn run_separator(&self) -> &str {
        &self.run_separator
    }

    /// Render paragraphs into plain text.
    ///
    /// Only the ends of the whole buffer are trimmed, so a separator left
    /// after the last run of an inner paragraph survives.
    ///
    /// # Example output
    /// ```text
    /// Dear Sir 
    /// Thank you for your letter
    /// ```
    pub fn render(&self, paragraphs: &[Paragraph]) -> String {
        let mut buffer = String::new();
        for paragraph in paragraphs {
            for run in &paragraph.runs {
                buffer.push_str(run);
                buffer.push_str(&self.run_separator);
            }
            buffer.push('\n');
        }
        buffer.trim().to_string()
    }
}
