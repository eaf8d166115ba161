//! Per-run state: where assets are read from and which document is rewritten.

use std::path::{Path, PathBuf};

/// Asset directory used when none is given, relative to the working directory.
pub const DEFAULT_INPUT_DIR: &str = "assets";
/// Target document used when none is given, relative to the working directory.
pub const DEFAULT_OUTPUT_FILE: &str = "pubspec.yaml";

/// Resolved paths for a single run.
///
/// Built once at startup and passed by reference to the scanner and splicer.
/// All three paths are absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    /// Entries in the listing are rendered relative to this directory.
    pub working_dir: PathBuf,
    /// Scan root.
    pub input_dir: PathBuf,
    /// Document whose marker block is regenerated.
    pub output_file: PathBuf,
}

impl RunContext {
    /// Resolves optional input/output paths against `working_dir`.
    ///
    /// Relative paths are joined onto `working_dir`; absolute paths are kept.
    pub fn resolve(
        working_dir: impl Into<PathBuf>,
        input: Option<&Path>,
        output: Option<&Path>,
    ) -> Self {
        let working_dir = working_dir.into();
        let input_dir = working_dir.join(input.unwrap_or_else(|| Path::new(DEFAULT_INPUT_DIR)));
        let output_file =
            working_dir.join(output.unwrap_or_else(|| Path::new(DEFAULT_OUTPUT_FILE)));

        Self {
            working_dir,
            input_dir,
            output_file,
        }
    }
}
