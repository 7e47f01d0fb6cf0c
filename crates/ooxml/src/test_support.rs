//! In-memory package builders for unit tests.

use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Build a ZIP archive from `(path, content)` pairs.
pub fn build_archive(files: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (path, content) in files {
        writer.start_file(*path, FileOptions::default()).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Build a ZIP archive whose entries are stored without compression.
pub fn build_stored_archive(files: &[(&str, &str)]) -> Vec<u8> {
    let options = FileOptions::default().compression_method(CompressionMethod::Stored);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (path, content) in files {
        writer.start_file(*path, options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Build a ZIP archive that starts with a directory entry.
pub fn build_archive_with_dir(dir: &str, files: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer.add_directory(dir, FileOptions::default()).unwrap();
    for (path, content) in files {
        writer.start_file(*path, FileOptions::default()).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Wrap body markup in a `w:document` root.
pub fn document_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    {}
  </w:body>
</w:document>"#,
        body
    )
}

/// Build a minimal package whose main document has the given body markup.
pub fn build_docx(body: &str) -> Vec<u8> {
    build_archive(&[
        ("[Content_Types].xml", "<Types/>"),
        ("word/document.xml", &document_xml(body)),
    ])
}
