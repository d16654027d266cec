//! Nagios-style check results with thresholds and performance data.
//!
//! A [`Check`] collects results and perfdata, then [`Check::finish`] picks
//! the worst severity and renders the plugin output line:
//!
//! ```text
//! CRITICAL: Found 0 sshd processes. Expecting 1 | sshd=0;0:50;1:100;0;
//! ```

use crate::error::ProcError;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

pub const DEFAULT_WARN_MIN: i64 = 0;
pub const DEFAULT_WARN_MAX: i64 = 50;
pub const DEFAULT_CRIT_MIN: i64 = 1;
pub const DEFAULT_CRIT_MAX: i64 = 100;

const OK_MESSAGE: &str = "Everything looks shiny from here, cap'n";

/// Check severity, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Severity {
    /// Plugin exit code: 0 OK, 1 WARNING, 2 CRITICAL, 3 UNKNOWN.
    pub fn exit_code(self) -> i32 {
        match self {
            Severity::Ok => 0,
            Severity::Warning => 1,
            Severity::Critical => 2,
            Severity::Unknown => 3,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Ok => "OK",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
            Severity::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// Inclusive process count bounds.
///
/// `crit_min <= warn_min` and `warn_max <= crit_max` are expected but not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub warn_min: i64,
    pub warn_max: i64,
    pub crit_min: i64,
    pub crit_max: i64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            warn_min: DEFAULT_WARN_MIN,
            warn_max: DEFAULT_WARN_MAX,
            crit_min: DEFAULT_CRIT_MIN,
            crit_max: DEFAULT_CRIT_MAX,
        }
    }
}

impl Thresholds {
    /// True when the critical range encloses the warning range.
    pub fn is_nested(&self) -> bool {
        self.crit_min <= self.warn_min && self.warn_max <= self.crit_max
    }
}

/// One performance data entry, rendered as
/// `label=value;warn_min:warn_max;crit_min:crit_max;min;max`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerfDatum {
    pub label: String,
    pub value: i64,
    pub thresholds: Thresholds,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl fmt::Display for PerfDatum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = &self.thresholds;
        write!(
            f,
            "{}={};{}:{};{}:{};{};{}",
            quote_label(&self.label),
            self.value,
            t.warn_min,
            t.warn_max,
            t.crit_min,
            t.crit_max,
            self.min.map(|v| v.to_string()).unwrap_or_default(),
            self.max.map(|v| v.to_string()).unwrap_or_default(),
        )
    }
}

/// Labels containing spaces, `=` or quotes must be single-quoted, with
/// embedded quotes doubled.
fn quote_label(label: &str) -> String {
    if label.contains(&[' ', '=', '\''][..]) {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.to_string()
    }
}

/// Final rendered state of a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutput {
    pub severity: Severity,
    pub line: String,
}

/// Accumulates results; the worst one wins on [`Check::finish`].
#[derive(Debug, Default)]
pub struct Check {
    results: Vec<(Severity, String)>,
    perfdata: Vec<PerfDatum>,
}

impl Check {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_result(&mut self, severity: Severity, message: impl Into<String>) {
        self.results.push((severity, message.into()));
    }

    pub fn add_perf_datum(&mut self, datum: PerfDatum) {
        self.perfdata.push(datum);
    }

    /// Worst severity so far, `None` before any result was added.
    pub fn severity(&self) -> Option<Severity> {
        self.results.iter().map(|(s, _)| *s).max()
    }

    /// Renders `<SEVERITY>: <messages> | <perfdata>`.
    ///
    /// Messages of every result at the worst severity are joined with `", "`.
    /// A check without results is UNKNOWN.
    pub fn finish(self) -> CheckOutput {
        let severity = match self.severity() {
            Some(s) => s,
            None => {
                return CheckOutput {
                    severity: Severity::Unknown,
                    line: "UNKNOWN: No check result specified".to_string(),
                }
            }
        };

        let message = self
            .results
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, m)| m.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let mut line = format!("{}: {}", severity, message);
        if !self.perfdata.is_empty() {
            let perf = self
                .perfdata
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            line.push_str(" | ");
            line.push_str(&perf);
        }

        CheckOutput { severity, line }
    }
}

/// Evaluates a process count against the thresholds.
///
/// The minimum side and the maximum side are checked independently; when
/// both fire, the more severe result wins.
pub fn evaluate(count: usize, process: &str, thresholds: &Thresholds) -> CheckOutput {
    let mut check = Check::new();
    let n = count as i64;

    check.add_perf_datum(PerfDatum {
        label: process.to_string(),
        value: n,
        thresholds: *thresholds,
        min: Some(0),
        max: None,
    });

    if n < thresholds.crit_min {
        check.add_result(
            Severity::Critical,
            format!(
                "Found {} {} processes. Expecting {}",
                n, process, thresholds.crit_min
            ),
        );
    } else if n < thresholds.warn_min {
        check.add_result(
            Severity::Warning,
            format!(
                "Found {} {} processes. Expecting {}",
                n, process, thresholds.warn_min
            ),
        );
    }

    if n > thresholds.crit_max {
        check.add_result(
            Severity::Critical,
            format!(
                "Found {} {} processes. Max threshold: {}",
                n, process, thresholds.crit_max
            ),
        );
    } else if n > thresholds.warn_max {
        check.add_result(
            Severity::Warning,
            format!(
                "Found {} {} processes. Warn threshold: {}",
                n, process, thresholds.warn_max
            ),
        );
    }

    check.add_result(Severity::Ok, OK_MESSAGE);
    check.finish()
}

/// Runs `scan` and evaluates its count. Always returns an output: a scan
/// error or panic becomes an UNKNOWN result.
pub fn run_check<F>(process: &str, thresholds: &Thresholds, scan: F) -> CheckOutput
where
    F: FnOnce() -> Result<usize, ProcError>,
{
    match panic::catch_unwind(AssertUnwindSafe(scan)) {
        Ok(Ok(count)) => evaluate(count, process, thresholds),
        Ok(Err(e)) => {
            let mut check = Check::new();
            check.add_result(Severity::Unknown, e.to_string());
            check.finish()
        }
        Err(_) => {
            let mut check = Check::new();
            check.add_result(Severity::Unknown, "Process scan aborted unexpectedly");
            check.finish()
        }
    }
}
