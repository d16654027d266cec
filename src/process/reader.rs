//! Per-process attribute reading from /proc/<pid>/status and /proc/<pid>/cmdline.
//!
//! Reads are best effort. A process that exits between listing and reading,
//! or whose records cannot be read, yields [`Attribute::Skip`] instead of an
//! error, so one racy process never fails a whole scan.

use crate::error::ProcError;
use crate::process::scanner::{Exclusions, ProcFs, ProcessId};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use tracing::trace;

/// Which process attribute a query compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    /// Short name from the first line of `status`.
    Name,
    /// Reconstructed command line from `cmdline`.
    CommandLine,
}

/// Why a process contributed no attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The record no longer exists (process exited).
    Vanished,
    /// The record exists but could not be read.
    Unreadable(String),
    /// The status line had no tab-separated value.
    Malformed,
}

/// Outcome of reading one attribute of one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribute {
    Found(String),
    Skip(SkipReason),
}

impl Attribute {
    pub fn as_found(&self) -> Option<&str> {
        match self {
            Attribute::Found(s) => Some(s),
            Attribute::Skip(_) => None,
        }
    }
}

/// A process identifier paired with its read outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    pub pid: ProcessId,
    pub attribute: Attribute,
}

fn skip_for(err: io::Error) -> Attribute {
    match err.kind() {
        io::ErrorKind::NotFound => Attribute::Skip(SkipReason::Vanished),
        _ => Attribute::Skip(SkipReason::Unreadable(err.to_string())),
    }
}

/// Reads the short process name: the value of the first `status` line.
pub fn read_name(procfs: &ProcFs, pid: ProcessId) -> Attribute {
    let path = procfs.record_path(pid, "status");
    let file = match File::open(&path) {
        Ok(f) => f,
        Err(e) => return skip_for(e),
    };

    let mut first_line = String::new();
    if let Err(e) = BufReader::new(file).read_line(&mut first_line) {
        return skip_for(e);
    }

    parse_status_name(&first_line)
}

/// Extracts the value of a `Name:\t<value>` status line.
pub fn parse_status_name(line: &str) -> Attribute {
    match line.split_once('\t') {
        Some((_, value)) => Attribute::Found(value.trim().to_string()),
        None => Attribute::Skip(SkipReason::Malformed),
    }
}

/// Reads the command line, each argument followed by a single space.
pub fn read_command_line(procfs: &ProcFs, pid: ProcessId) -> Attribute {
    let path = procfs.record_path(pid, "cmdline");
    match fs::read(&path) {
        Ok(content) => Attribute::Found(join_cmdline(&content)),
        Err(e) => skip_for(e),
    }
}

/// Rebuilds NUL-separated cmdline tokens as `"arg0 arg1 ... argN "`.
///
/// An empty record (kernel threads) gives an empty string. A last token
/// without a NUL terminator is kept.
pub fn join_cmdline(content: &[u8]) -> String {
    let body = content.strip_suffix(&[0u8]).unwrap_or(content);
    if body.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(content.len() + 1);
    for token in body.split(|&b| b == 0u8) {
        out.push_str(&String::from_utf8_lossy(token));
        out.push(' ');
    }
    out
}

/// Reads the attribute selected by `field`.
pub fn read_attribute(procfs: &ProcFs, pid: ProcessId, field: MatchField) -> Attribute {
    match field {
        MatchField::Name => read_name(procfs, pid),
        MatchField::CommandLine => read_command_line(procfs, pid),
    }
}

impl ProcFs {
    /// Lists processes and reads one attribute of each.
    pub fn collect(
        &self,
        field: MatchField,
        exclude: &Exclusions,
    ) -> Result<Vec<ProcessRecord>, ProcError> {
        let pids = self.list_process_ids(exclude)?;
        let records = pids
            .into_iter()
            .map(|pid| {
                let attribute = read_attribute(self, pid, field);
                if let Attribute::Skip(reason) = &attribute {
                    trace!(pid = pid.0, ?reason, "Skipping process");
                }
                ProcessRecord { pid, attribute }
            })
            .collect();
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_status_name() {
        assert_eq!(
            parse_status_name("Name:\tsshd\n"),
            Attribute::Found("sshd".into())
        );
        assert_eq!(
            parse_status_name("Name:\t  kworker/0:1  \n"),
            Attribute::Found("kworker/0:1".into())
        );
        // Only the first tab splits
        assert_eq!(
            parse_status_name("Name:\tweird\tname\n"),
            Attribute::Found("weird\tname".into())
        );
        assert_eq!(
            parse_status_name("Name: notab\n"),
            Attribute::Skip(SkipReason::Malformed)
        );
        assert_eq!(parse_status_name(""), Attribute::Skip(SkipReason::Malformed));
    }

    #[test]
    fn test_join_cmdline() {
        assert_eq!(join_cmdline(b"/usr/sbin/sshd\0-D\0"), "/usr/sbin/sshd -D ");
        assert_eq!(join_cmdline(b"bash\0"), "bash ");
        assert_eq!(join_cmdline(b""), "");
        // Unterminated last token is kept
        assert_eq!(join_cmdline(b"nginx: worker process"), "nginx: worker process ");
        // Empty arguments are preserved as empty tokens
        assert_eq!(join_cmdline(b"prog\0\0x\0"), "prog  x ");
    }

    #[test]
    fn test_read_name_only_reads_first_line() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("10")).unwrap();
        fs::write(
            dir.path().join("10/status"),
            "Name:\tpostgres\nUmask:\t0077\nState:\tS (sleeping)\n",
        )
        .unwrap();

        let procfs = ProcFs::new(dir.path());
        assert_eq!(
            read_name(&procfs, ProcessId(10)),
            Attribute::Found("postgres".into())
        );
    }

    #[test]
    fn test_read_missing_process_is_vanished() {
        let dir = tempdir().unwrap();
        let procfs = ProcFs::new(dir.path());
        assert_eq!(
            read_name(&procfs, ProcessId(77)),
            Attribute::Skip(SkipReason::Vanished)
        );
        assert_eq!(
            read_command_line(&procfs, ProcessId(77)),
            Attribute::Skip(SkipReason::Vanished)
        );
    }

    #[test]
    fn test_collect_pairs_pids_with_attributes() {
        let dir = tempdir().unwrap();
        for (pid, cmdline) in [("5", &b"cron\0-f\0"[..]), ("6", &b""[..])] {
            fs::create_dir(dir.path().join(pid)).unwrap();
            fs::write(dir.path().join(pid).join("cmdline"), cmdline).unwrap();
        }
        // Listed but without records
        fs::create_dir(dir.path().join("7")).unwrap();

        let procfs = ProcFs::new(dir.path());
        let ex = Exclusions {
            own: ProcessId(0),
            parent: ProcessId(0),
        };
        let records = procfs.collect(MatchField::CommandLine, &ex).unwrap();
        assert_eq!(
            records,
            vec![
                ProcessRecord {
                    pid: ProcessId(5),
                    attribute: Attribute::Found("cron -f ".into()),
                },
                ProcessRecord {
                    pid: ProcessId(6),
                    attribute: Attribute::Found(String::new()),
                },
                ProcessRecord {
                    pid: ProcessId(7),
                    attribute: Attribute::Skip(SkipReason::Vanished),
                },
            ]
        );
    }
}
