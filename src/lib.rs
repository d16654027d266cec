//! Herakles Process Count Check Library
//!
//! Counts running processes by name or command line and reports the count
//! as a Nagios-style check, a Graphite metric line, or a boolean exit code.
//!
//! # Features
//!
//! - **Process Enumeration**: Numeric entries of /proc, minus the caller and its parent
//! - **Attribute Reading**: Short name from `status` or command line from `cmdline`
//! - **Matching**: Exact equality or unanchored regex, invalid patterns never match
//! - **Reporting**: Threshold check with perfdata, metric line, or existence exit code
//!
//! # Usage
//!
//! ```rust,no_run
//! use herakles_check_procs::{dispatch, Exclusions, Invocation, MatchField, MatchMode,
//!     MatchQuery, Mode, ProcFs, Thresholds};
//!
//! let inv = Invocation {
//!     procfs: ProcFs::default(),
//!     query: MatchQuery::new("sshd", MatchField::Name, MatchMode::Exact),
//!     thresholds: Thresholds::default(),
//!     scheme: String::new(),
//!     exclude: Exclusions::current(),
//! };
//!
//! let outcome = dispatch(Mode::Check, &inv);
//! if let Some(line) = &outcome.stdout {
//!     println!("{}", line);
//! }
//! std::process::exit(outcome.exit_code);
//! ```

pub mod error;
pub mod modes;
pub mod process;

// Re-export main types for convenience
pub use error::ProcError;
pub use modes::{dispatch, Invocation, Mode, Outcome, Severity, Thresholds};
pub use process::{
    scan, Attribute, Exclusions, MatchField, MatchMode, MatchQuery, ProcFs, ProcessId,
    ScanSummary,
};
