//! ZIP container decompression.

use docx_core::{Error, Result};
use std::collections::HashMap;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Upper bound on the buffer preallocated from an entry's declared size.
const MAX_SIZE_HINT: u64 = 1 << 20;

/// ZIP local file header signature (PK\x03\x04).
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Check whether the bytes start with a ZIP local file header.
pub fn looks_like_zip(bytes: &[u8]) -> bool {
    bytes.starts_with(&ZIP_MAGIC)
}

/// Every file entry of an archive, inflated into memory and keyed by entry path.
#[derive(Debug, Default)]
pub struct ArchiveFiles {
    entries: HashMap<String, Vec<u8>>,
}

impl ArchiveFiles {
    /// Decompress all file entries of a ZIP archive.
    ///
    /// Directory entries are skipped. Errors from the decompressor are passed
    /// through with their original message.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut archive =
            ZipArchive::new(Cursor::new(bytes)).map_err(|e| Error::ZipError(e.to_string()))?;

        let mut entries = HashMap::with_capacity(archive.len());
        for index in 0..archive.len() {
            let mut file = archive
                .by_index(index)
                .map_err(|e| Error::ZipError(e.to_string()))?;
            if file.is_dir() {
                continue;
            }

            let name = file.name().to_string();
            // The declared size comes from the archive header and is not trusted.
            let mut data = Vec::with_capacity(file.size().min(MAX_SIZE_HINT) as usize);
            file.read_to_end(&mut data)
                .map_err(|e| Error::ZipError(e.to_string()))?;

            if entries.insert(name.clone(), data).is_some() {
                log::warn!("Duplicate archive entry '{}', keeping the last one", name);
            }
        }

        Ok(Self { entries })
    }

    /// Bytes of the entry at `path`, if present.
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.entries.get(path).map(Vec::as_slice)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry paths in sorted order.
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::build_archive;

    #[test]
    fn test_from_bytes_reads_all_files() {
        let bytes = build_archive(&[
            ("[Content_Types].xml", "<Types/>"),
            ("word/document.xml", "<w:document/>"),
        ]);

        let files = ArchiveFiles::from_bytes(&bytes).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.contains("word/document.xml"));
        assert_eq!(files.get("word/document.xml"), Some(&b"<w:document/>"[..]));
        assert_eq!(files.get("word/styles.xml"), None);
        assert_eq!(files.paths(), vec!["[Content_Types].xml", "word/document.xml"]);
    }

    #[test]
    fn test_from_bytes_skips_directories() {
        let bytes = crate::test_support::build_archive_with_dir("word/", &[("word/a.xml", "<a/>")]);

        let files = ArchiveFiles::from_bytes(&bytes).unwrap();
        assert_eq!(files.paths(), vec!["word/a.xml"]);
    }

    #[test]
    fn test_from_bytes_rejects_non_zip() {
        let err = ArchiveFiles::from_bytes(b"definitely not a zip file").unwrap_err();
        assert!(matches!(err, Error::ZipError(_)));
    }

    #[test]
    fn test_from_bytes_ignores_oversized_declared_size() {
        let mut bytes = crate::test_support::build_stored_archive(&[("word/a.xml", "<a/>")]);

        // Declare a ~4 GB uncompressed size in the central directory entry.
        let central = bytes
            .windows(4)
            .position(|w| w == [0x50, 0x4B, 0x01, 0x02])
            .unwrap();
        bytes[central + 24..central + 28].copy_from_slice(&0xFFFF_FFF0u32.to_le_bytes());

        let files = ArchiveFiles::from_bytes(&bytes).unwrap();
        assert_eq!(files.get("word/a.xml"), Some(&b"<a/>"[..]));
    }

    #[test]
    fn test_empty_archive() {
        let files = ArchiveFiles::from_bytes(&build_archive(&[])).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_looks_like_zip() {
        assert!(looks_like_zip(&build_archive(&[("a", "b")])));
        assert!(!looks_like_zip(b"<?xml"));
        assert!(!looks_like_zip(b"PK"));
    }
}
