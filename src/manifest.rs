//! The formatted lines that make up an asset listing.

use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Indentation placed in front of every entry.
pub const ENTRY_INDENT: &str = "    ";
/// Bullet that follows the indentation.
pub const ENTRY_BULLET: &str = "- ";
/// `ENTRY_INDENT` followed by `ENTRY_BULLET`; every generated line starts with it.
pub const ENTRY_PREFIX: &str = "    - ";

/// One discovered asset, rendered as a line of the listing.
///
/// The line is `ENTRY_INDENT`, `ENTRY_BULLET`, the relative path and a
/// trailing `\n`. Entries are immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    line: String,
}

impl ManifestEntry {
    /// Builds an entry from a path that is already relative to the working directory.
    pub fn new(relative_path: &str) -> Self {
        Self {
            line: format!("{ENTRY_PREFIX}{relative_path}\n"),
        }
    }

    /// Builds an entry from a filesystem path, joining its components with `/`.
    pub fn from_path(relative_path: &Path) -> Self {
        Self::new(&to_slash(relative_path))
    }

    /// The full line, including indentation and line break.
    pub fn as_line(&self) -> &str {
        &self.line
    }

    /// The relative path this entry was built from.
    pub fn relative_path(&self) -> &str {
        self.line
            .strip_prefix(ENTRY_PREFIX)
            .and_then(|rest| rest.strip_suffix('\n'))
            .unwrap_or(&self.line)
    }
}

impl fmt::Display for ManifestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}

/// Ordered entries in directory-traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    entries: Vec<ManifestEntry>,
    skipped: Vec<PathBuf>,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: ManifestEntry) {
        self.entries.push(entry);
    }

    pub(crate) fn skip(&mut self, dir: PathBuf) {
        self.skipped.push(dir);
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Nested directories that could not be listed and were left out.
    pub fn skipped(&self) -> &[PathBuf] {
        &self.skipped
    }

    /// Iterates over the relative paths, in order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(ManifestEntry::relative_path)
    }
}

impl FromIterator<ManifestEntry> for ScanResult {
    fn from_iter<I: IntoIterator<Item = ManifestEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
            skipped: Vec::new(),
        }
    }
}

/// Computes `path` relative to `base`, both absolute.
///
/// Walks up with `..` when `path` is not below `base`.
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix(base) {
        return stripped.to_path_buf();
    }

    let path_parts: Vec<Component<'_>> = path.components().collect();
    let base_parts: Vec<Component<'_>> = base.components().collect();
    let common = path_parts
        .iter()
        .zip(base_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base_parts.len() {
        relative.push("..");
    }
    for part in &path_parts[common..] {
        relative.push(part.as_os_str());
    }
    relative
}

fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
