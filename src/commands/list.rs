//! List command implementation.
//!
//! Runs the same scan as the check modes and prints each matching process,
//! so a query can be debugged before it goes into a monitoring config.

use herakles_check_procs::process::{
    summarize, Attribute, Exclusions, MatchQuery, Matcher, ProcFs, ProcessRecord, ScanSummary,
};
use std::io::Write;

/// Prints `pid<TAB>attribute` per match and a summary line.
pub fn command_list(
    procfs: &ProcFs,
    query: &MatchQuery,
    exclude: &Exclusions,
    out: &mut dyn Write,
) -> Result<ScanSummary, Box<dyn std::error::Error>> {
    let records = procfs.collect(query.field, exclude)?;
    let matcher = Matcher::new(query);

    for ProcessRecord { pid, attribute } in &records {
        if let Attribute::Found(value) = attribute {
            if matcher.is_match(value) {
                writeln!(out, "{}\t{}", pid, value)?;
            }
        }
    }

    let summary = summarize(&records, &matcher);
    writeln!(
        out,
        "# matched={} scanned={} skipped={}",
        summary.matched, summary.scanned, summary.skipped
    )?;
    Ok(summary)
}
