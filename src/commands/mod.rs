//! CLI command implementations for herakles-check-procs.
//!
//! This module provides implementations for all CLI subcommands:
//! - `list`: Show which processes a query matches
//! - `requirements`: Process table access validation

pub mod list;
pub mod requirements;

// Re-export command functions
pub use list::command_list;
pub use requirements::command_check_requirements;
