//! Core library for asset-splice: scans an asset directory and rewrites the
//! listing held between two marker lines of a configuration document.

pub mod cli;
pub mod context;
pub mod error;
pub mod locator;
pub mod manifest;
pub mod scanner;
pub mod splicer;

use crate::cli::Cli;
use crate::context::RunContext;
use crate::error::SpliceError;
use crate::locator::MarkerPair;
use crate::scanner::{scan, ScanOptions};
use crate::splicer::{merge, read_document};
use anyhow::Context;
use clap::Parser;
use similar::TextDiff;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

enum OutputMode {
    Write,
    DryRun,
    Diff,
}

/// The target document before and after splicing in a fresh listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Regeneration {
    pub original: Vec<u8>,
    pub updated: Vec<u8>,
    pub entry_count: usize,
}

impl Regeneration {
    pub fn is_changed(&self) -> bool {
        self.original != self.updated
    }
}

/// Scans `ctx.input_dir`, reads `ctx.output_file` and computes the merged document.
///
/// Nothing is written; see [`write_document`].
pub fn regenerate(
    ctx: &RunContext,
    options: &ScanOptions,
    markers: &MarkerPair,
) -> Result<Regeneration, SpliceError> {
    let entries = scan(ctx, options)?;
    let document = read_document(&ctx.output_file)?;
    let merged = merge(&document, &entries, markers)?;

    Ok(Regeneration {
        original: document.render(),
        updated: merged.render(),
        entry_count: entries.len(),
    })
}

/// Replaces the file at `path` with `content`.
///
/// The content goes to a temporary file in the same directory first, which is
/// then renamed over the target, so a failed write leaves the original intact.
/// When `path` is a symlink, the file it points to is replaced and the link
/// is kept.
pub fn write_document(path: &Path, content: &[u8]) -> Result<(), SpliceError> {
    let write_error = |source: io::Error| SpliceError::TargetWrite {
        path: path.to_path_buf(),
        source,
    };

    let target = if fs::symlink_metadata(path).is_ok() {
        fs::canonicalize(path).map_err(write_error)?
    } else {
        path.to_path_buf()
    };

    let parent_dir = match target.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut temp_file = tempfile::Builder::new()
        .prefix(".asset-splice-")
        .suffix(".tmp")
        .tempfile_in(parent_dir)
        .map_err(write_error)?;

    // Keep the target's permissions instead of the temporary file's 0600.
    if let Ok(metadata) = fs::metadata(&target) {
        temp_file
            .as_file()
            .set_permissions(metadata.permissions())
            .map_err(write_error)?;
    }

    temp_file.write_all(content).map_err(write_error)?;

    temp_file
        .persist(&target)
        .map_err(|err| write_error(err.error))?;

    Ok(())
}

fn finalize_output(
    mode: OutputMode,
    path: &Path,
    regeneration: &Regeneration,
) -> anyhow::Result<()> {
    match mode {
        OutputMode::DryRun => {
            io::stdout().write_all(&regeneration.updated)?;
        }
        OutputMode::Diff => {
            let original = String::from_utf8_lossy(&regeneration.original);
            let updated = String::from_utf8_lossy(&regeneration.updated);
            let diff_output = TextDiff::from_lines(original.as_ref(), updated.as_ref())
                .unified_diff()
                .header("original", "modified")
                .to_string();

            io::stdout().write_all(diff_output.as_bytes())?;
        }
        OutputMode::Write if !regeneration.is_changed() => {
            log::info!("{} is already up to date", path.display());
        }
        OutputMode::Write => {
            write_document(path, &regeneration.updated)?;
            log::info!(
                "Wrote {} asset(s) to {}",
                regeneration.entry_count,
                path.display()
            );
        }
    }
    Ok(())
}

/// The main entry point for the application logic.
pub fn run() -> anyhow::Result<()> {
    // Initialize the logger. This will be configured by the RUST_LOG environment variable.
    env_logger::init();

    let Cli {
        input,
        output,
        dry_run,
        diff,
    } = Cli::parse();

    let mode = if dry_run {
        OutputMode::DryRun
    } else if diff {
        OutputMode::Diff
    } else {
        OutputMode::Write
    };

    let working_dir =
        std::env::current_dir().context("Failed to determine the working directory")?;
    let ctx = RunContext::resolve(working_dir, input.as_deref(), output.as_deref());
    log::info!(
        "Listing assets under {} into {}",
        ctx.input_dir.display(),
        ctx.output_file.display()
    );

    let regeneration = regenerate(&ctx, &ScanOptions::default(), &MarkerPair::default())
        .with_context(|| format!("Failed to update {}", ctx.output_file.display()))?;

    finalize_output(mode, &ctx.output_file, &regeneration)
}
