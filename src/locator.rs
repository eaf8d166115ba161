//! Contains the logic for finding the marker lines within a document.

use crate::error::SpliceError;
use crate::manifest::ENTRY_PREFIX;

/// Begin marker recognized by default.
pub const DEFAULT_BEGIN_MARKER: &str = "## <<assets begin>>";
/// End marker recognized by default.
pub const DEFAULT_END_MARKER: &str = "## <<assets end>>";

/// The two literal markers bounding the generated block.
///
/// A line matches a marker when it contains the marker text anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPair {
    pub begin: String,
    pub end: String,
}

impl Default for MarkerPair {
    fn default() -> Self {
        Self {
            begin: DEFAULT_BEGIN_MARKER.to_string(),
            end: DEFAULT_END_MARKER.to_string(),
        }
    }
}

/// Indices of the marker lines, `None` when a marker was not seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerSpan {
    pub begin: Option<usize>,
    pub end: Option<usize>,
}

impl MarkerSpan {
    /// Returns `(begin, end)` when both markers were found and the end marker
    /// comes strictly after the begin marker.
    pub fn resolve(self, markers: &MarkerPair) -> Result<(usize, usize), SpliceError> {
        let begin = self.begin.ok_or_else(|| SpliceError::MarkerNotFound {
            marker: markers.begin.clone(),
        })?;
        let end = self.end.ok_or_else(|| SpliceError::MarkerNotFound {
            marker: markers.end.clone(),
        })?;

        if end <= begin {
            return Err(SpliceError::MarkersOutOfOrder { begin, end });
        }
        Ok((begin, end))
    }
}

/// Scans `lines` once, recording the last line containing each marker.
///
/// Lines shaped like generated entries are never treated as markers, so an
/// asset whose path contains marker text cannot move the block boundary.
pub fn locate_markers<S: AsRef<[u8]>>(lines: &[S], markers: &MarkerPair) -> MarkerSpan {
    let mut span = MarkerSpan::default();
    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        if line.starts_with(ENTRY_PREFIX.as_bytes()) {
            continue;
        }
        if contains(line, markers.begin.as_bytes()) {
            span.begin = Some(index);
        }
        if contains(line, markers.end.as_bytes()) {
            span.end = Some(index);
        }
    }
    span
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|window| window == needle)
}
