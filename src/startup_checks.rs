//! Runtime requirement validation for herakles-check-procs.
//!
//! Verifies the process table can be listed and that status records parse
//! before the plugin is wired into a monitoring agent.

use herakles_check_procs::process::{read_name, Attribute, Exclusions, ProcFs, ProcessId};
use nix::unistd::geteuid;
use std::fs;
use tracing::{debug, info, warn};

/// Summary of a successful requirements check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementsReport {
    pub visible_processes: usize,
    pub own_name: String,
}

/// Validate all runtime requirements
pub fn validate_requirements(procfs: &ProcFs) -> Result<RequirementsReport, ValidationError> {
    info!("Validating runtime requirements...");

    check_user_privileges();
    let visible_processes = check_proc_root(procfs)?;
    let own_name = check_own_status(procfs)?;

    info!("All runtime requirements validated");
    Ok(RequirementsReport {
        visible_processes,
        own_name,
    })
}

/// Non-root users may not see every process (hidepid), so only warn.
fn check_user_privileges() {
    if !geteuid().is_root() {
        warn!("Not running as root - processes hidden by hidepid will not be counted");
    } else {
        debug!("Running as root (uid=0)");
    }
}

/// The process table must be listable and contain at least one process.
fn check_proc_root(procfs: &ProcFs) -> Result<usize, ValidationError> {
    let root = procfs.root();
    if let Err(e) = fs::read_dir(root) {
        return Err(ValidationError::ProcRootUnreadable(format!(
            "{}: {}",
            root.display(),
            e
        )));
    }

    // Nothing excluded: we want to see ourselves here
    let none = Exclusions {
        own: ProcessId(0),
        parent: ProcessId(0),
    };
    let pids = procfs
        .list_process_ids(&none)
        .map_err(|e| ValidationError::ProcRootUnreadable(e.to_string()))?;

    if pids.is_empty() {
        return Err(ValidationError::NoProcesses(root.display().to_string()));
    }
    debug!("{} processes visible under {}", pids.len(), root.display());
    Ok(pids.len())
}

/// Our own status record must parse, otherwise name matching cannot work.
fn check_own_status(procfs: &ProcFs) -> Result<String, ValidationError> {
    let own = ProcessId(std::process::id());
    match read_name(procfs, own) {
        Attribute::Found(name) => Ok(name),
        Attribute::Skip(reason) => Err(ValidationError::StatusUnreadable(format!(
            "{}: {:?}",
            procfs.record_path(own, "status").display(),
            reason
        ))),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Process table not readable: {0}")]
    ProcRootUnreadable(String),

    #[error("No processes visible under {0}")]
    NoProcesses(String),

    #[error("Own status record not usable: {0}")]
    StatusUnreadable(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_fake_proc_with_own_status_passes() {
        let dir = tempdir().unwrap();
        let own = dir.path().join(std::process::id().to_string());
        fs::create_dir(&own).unwrap();
        fs::write(own.join("status"), "Name:\tcheck-procs\nState:\tR\n").unwrap();

        let report = validate_requirements(&ProcFs::new(dir.path())).unwrap();
        assert_eq!(report.visible_processes, 1);
        assert_eq!(report.own_name, "check-procs");
    }

    #[test]
    fn test_empty_proc_fails() {
        let dir = tempdir().unwrap();
        let err = validate_requirements(&ProcFs::new(dir.path())).unwrap_err();
        assert!(matches!(err, ValidationError::NoProcesses(_)));
    }

    #[test]
    fn test_missing_root_fails() {
        let dir = tempdir().unwrap();
        let err = validate_requirements(&ProcFs::new(dir.path().join("gone"))).unwrap_err();
        assert!(matches!(err, ValidationError::ProcRootUnreadable(_)));
    }

    #[test]
    fn test_malformed_own_status_fails() {
        let dir = tempdir().unwrap();
        let own = dir.path().join(std::process::id().to_string());
        fs::create_dir(&own).unwrap();
        fs::write(own.join("status"), "garbage\n").unwrap();

        let err = validate_requirements(&ProcFs::new(dir.path())).unwrap_err();
        assert!(matches!(err, ValidationError::StatusUnreadable(_)));
    }
}
