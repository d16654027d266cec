//! Process table access and matching.
//!
//! This module provides:
//! - `scanner`: Process discovery in /proc
//! - `reader`: Name and command line extraction per process
//! - `matcher`: Exact / regex comparison and counting

pub mod matcher;
pub mod reader;
pub mod scanner;

// Re-export commonly used types
pub use matcher::{count, summarize, MatchMode, MatchQuery, Matcher, ScanSummary};
pub use reader::{
    read_attribute, read_command_line, read_name, Attribute, MatchField, ProcessRecord,
    SkipReason,
};
pub use scanner::{Exclusions, ProcFs, ProcessId, DEFAULT_PROC_ROOT};

use crate::error::ProcError;
use tracing::debug;

/// One enumeration-and-match pass over the process table.
pub fn scan(
    procfs: &ProcFs,
    query: &MatchQuery,
    exclude: &Exclusions,
) -> Result<ScanSummary, ProcError> {
    let records = procfs.collect(query.field, exclude)?;
    let summary = summarize(&records, &Matcher::new(query));
    debug!(
        target_process = %query.target,
        matched = summary.matched,
        scanned = summary.scanned,
        skipped = summary.skipped,
        "Process scan finished"
    );
    Ok(summary)
}
