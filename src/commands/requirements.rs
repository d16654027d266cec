//! Check-requirements command implementation.
//!
//! Validates process table access and reports the result.

use crate::startup_checks::validate_requirements;
use herakles_check_procs::process::ProcFs;

/// Returns `true` when every requirement is met.
pub fn command_check_requirements(procfs: &ProcFs) -> bool {
    println!("🔍 Checking Runtime Requirements");
    println!("================================\n");

    match validate_requirements(procfs) {
        Ok(report) => {
            println!(
                "   ✅ {} processes visible under {}",
                report.visible_processes,
                procfs.root().display()
            );
            println!("   ✅ Own status record parsed (name: {})", report.own_name);
            println!("\n✅ All requirements met");
            true
        }
        Err(e) => {
            println!("   ❌ {}", e);
            println!("\n❌ Requirements not met");
            false
        }
    }
}
