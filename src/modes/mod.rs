//! Output strategies for a process count.
//!
//! This module provides:
//! - `check`: Nagios-style severity with thresholds and perfdata
//! - `metric`: Graphite metric line
//! - `boolean`: existence as exit code

pub mod boolean;
pub mod check;
pub mod metric;

pub use check::{evaluate, run_check, Check, CheckOutput, PerfDatum, Severity, Thresholds};

use crate::process::{scan, Exclusions, MatchQuery, ProcFs};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Selects how the count is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    #[serde(alias = "c")]
    #[value(alias = "c")]
    Check,
    #[serde(alias = "m")]
    #[value(alias = "m")]
    Metric,
    #[serde(alias = "b")]
    #[value(alias = "b")]
    Boolean,
}

/// Everything one pass needs, resolved before any scanning.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub procfs: ProcFs,
    pub query: MatchQuery,
    pub thresholds: Thresholds,
    /// Metric scheme prefix; empty means host name.
    pub scheme: String,
    pub exclude: Exclusions,
}

/// What the process should print to stdout and exit with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub exit_code: i32,
    pub stdout: Option<String>,
}

impl Invocation {
    fn count(&self) -> Result<usize, crate::error::ProcError> {
        scan(&self.procfs, &self.query, &self.exclude).map(|s| s.matched)
    }
}

/// Runs one enumeration-and-match pass and reports it in `mode`.
pub fn dispatch(mode: Mode, inv: &Invocation) -> Outcome {
    match mode {
        Mode::Check => {
            let out = run_check(&inv.query.target, &inv.thresholds, || inv.count());
            Outcome {
                exit_code: out.severity.exit_code(),
                stdout: Some(out.line),
            }
        }
        Mode::Metric => match inv.count() {
            Ok(count) => {
                let host = metric::hostname();
                let scheme = metric::scheme_path(&inv.scheme, &host, &inv.query.target);
                let now = chrono::Utc::now().timestamp();
                Outcome {
                    exit_code: 0,
                    stdout: Some(metric::format_line(&scheme, count, now)),
                }
            }
            Err(e) => {
                error!("Metric collection failed: {}", e);
                Outcome {
                    exit_code: 1,
                    stdout: None,
                }
            }
        },
        Mode::Boolean => match inv.count() {
            Ok(count) => Outcome {
                exit_code: boolean::exit_code(count),
                stdout: None,
            },
            Err(e) => {
                error!("Process scan failed: {}", e);
                Outcome {
                    exit_code: 1,
                    stdout: None,
                }
            }
        },
    }
}
