//! Defines custom error types for the application.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpliceError {
    #[error("Could not list asset directory {}: {source}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not read target document {}: {source}", path.display())]
    TargetRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("The target document is empty, there is nothing to splice into.")]
    EmptyDocument,

    #[error("Marker '{marker}' was not found in the target document.")]
    MarkerNotFound { marker: String },

    #[error("The end marker (line {}) must come after the begin marker (line {}).", end + 1, begin + 1)]
    MarkersOutOfOrder { begin: usize, end: usize },

    #[error("Could not write target document {}: {source}", path.display())]
    TargetWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
