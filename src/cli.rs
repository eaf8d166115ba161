//! Defines the command-line interface for the application.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "asset-splice",
    version,
    about = "Regenerate the asset listing between the marker lines of a configuration file."
)]
pub struct Cli {
    /// Directory to scan, relative to the working directory. [default: assets]
    #[arg(value_name = "INPUT_DIR")]
    pub input: Option<PathBuf>,

    /// Document to update, relative to the working directory. [default: pubspec.yaml]
    #[arg(value_name = "OUTPUT_FILE")]
    pub output: Option<PathBuf>,

    /// Print the updated document to stdout instead of writing it.
    #[arg(long, conflicts_with = "diff")]
    pub dry_run: bool,

    /// Print a unified diff of the changes instead of writing them.
    #[arg(long)]
    pub diff: bool,
}
