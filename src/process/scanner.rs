//! Process scanning utilities for discovering process entries in /proc.
//!
//! The scanner only lists process identifiers. Reading per-process records
//! lives in [`crate::process::reader`].

use crate::error::ProcError;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Default process table root.
pub const DEFAULT_PROC_ROOT: &str = "/proc";

/// Identifier of a running process as listed in the process table.
///
/// Only valid at the instant it was observed; the kernel may recycle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProcessId(pub u32);

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Processes that must never be counted: the caller and its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exclusions {
    pub own: ProcessId,
    pub parent: ProcessId,
}

impl Exclusions {
    /// Exclusions for the running process (own pid and parent pid).
    pub fn current() -> Self {
        Self {
            own: ProcessId(nix::unistd::getpid().as_raw() as u32),
            parent: ProcessId(nix::unistd::getppid().as_raw() as u32),
        }
    }

    pub fn contains(&self, pid: ProcessId) -> bool {
        pid == self.own || pid == self.parent
    }
}

/// Handle on a process table root (normally `/proc`).
#[derive(Debug, Clone)]
pub struct ProcFs {
    root: PathBuf,
}

impl Default for ProcFs {
    fn default() -> Self {
        Self::new(DEFAULT_PROC_ROOT)
    }
}

impl ProcFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a per-process record, e.g. `/proc/42/status`.
    pub fn record_path(&self, pid: ProcessId, record: &str) -> PathBuf {
        self.root.join(pid.to_string()).join(record)
    }

    /// Lists numeric entries of the process table, minus `exclude`.
    ///
    /// Fails only if the root itself cannot be opened; unreadable entries
    /// are skipped. The result is sorted ascending.
    pub fn list_process_ids(&self, exclude: &Exclusions) -> Result<Vec<ProcessId>, ProcError> {
        let entries = fs::read_dir(&self.root).map_err(|source| ProcError::ProcRoot {
            path: self.root.clone(),
            source,
        })?;

        let mut out = Vec::new();
        for entry in entries.flatten() {
            let file_name = entry.file_name();
            let name = match file_name.to_str() {
                Some(v) => v,
                None => continue,
            };
            let pid = match parse_pid(name) {
                Some(v) => v,
                None => continue,
            };
            if exclude.contains(pid) {
                continue;
            }
            out.push(pid);
        }
        out.sort_unstable();
        Ok(out)
    }
}

/// Parses a process table entry name into a pid. Non-numeric names
/// (`self`, `net`, `sys`, ...) are not processes.
fn parse_pid(name: &str) -> Option<ProcessId> {
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    name.parse().ok().map(ProcessId)
}
