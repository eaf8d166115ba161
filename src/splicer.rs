//! Contains the logic for splicing a listing into the marker block of a document.

use crate::error::SpliceError;
use crate::locator::{locate_markers, MarkerPair};
use crate::manifest::ScanResult;
use std::fs;
use std::path::Path;

/// The raw lines of a document, each keeping its own line terminator.
///
/// Lines are bytes, not text: a document in any encoding round-trips, and
/// joining the lines gives back the original byte for byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentLines {
    lines: Vec<Vec<u8>>,
}

impl DocumentLines {
    pub fn parse(bytes: &[u8]) -> Self {
        Self {
            lines: bytes
                .split_inclusive(|&b| b == b'\n')
                .map(<[u8]>::to_vec)
                .collect(),
        }
    }

    pub fn lines(&self) -> &[Vec<u8>] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Concatenates the lines back into a single buffer.
    pub fn render(&self) -> Vec<u8> {
        self.lines.concat()
    }
}

impl From<Vec<Vec<u8>>> for DocumentLines {
    fn from(lines: Vec<Vec<u8>>) -> Self {
        Self { lines }
    }
}

/// Reads the target document.
///
/// A missing file is a [`SpliceError::TargetRead`]; the document is never created here.
pub fn read_document(path: &Path) -> Result<DocumentLines, SpliceError> {
    let bytes = fs::read(path).map_err(|source| SpliceError::TargetRead {
        path: path.to_path_buf(),
        source,
    })?;
    let document = DocumentLines::parse(&bytes);
    log::info!("Read {} line(s) from {}", document.len(), path.display());
    Ok(document)
}

/// Builds a new document whose marker block holds `entries`.
///
/// Everything up to and including the begin marker line, and everything from
/// the end marker line on, is kept verbatim. Only the lines strictly between
/// the two markers are replaced.
pub fn merge(
    document: &DocumentLines,
    entries: &ScanResult,
    markers: &MarkerPair,
) -> Result<DocumentLines, SpliceError> {
    if document.is_empty() {
        return Err(SpliceError::EmptyDocument);
    }

    let (begin, end) = locate_markers(document.lines(), markers).resolve(markers)?;
    log::debug!("Markers found on lines {} and {}", begin + 1, end + 1);

    let lines = &document.lines;
    let mut merged = Vec::with_capacity(begin + 1 + entries.len() + lines.len() - end);
    merged.extend_from_slice(&lines[..=begin]);
    merged.extend(entries.entries().iter().map(|e| e.as_line().as_bytes().to_vec()));
    merged.extend_from_slice(&lines[end..]);

    Ok(DocumentLines::from(merged))
}
