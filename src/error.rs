//! Error types for process table access.
//!
//! Only failures that abort a whole scan are errors. A single process that
//! vanishes or cannot be read is reported as [`crate::process::Attribute::Skip`].

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ProcError {
    #[error("Cannot open process table {path}: {source}")]
    ProcRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
