//! CLI arguments and subcommands for herakles-check-procs.
//!
//! The short options follow the classic check_procs plugin flags
//! (`-m -p -W -w -C -c -s -n -r`); everything else is long-only.

use clap::{Parser, Subcommand, ValueEnum};
use herakles_check_procs::Mode;
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (git ",
    env!("VERGEN_GIT_SHA"),
    ", built ",
    env!("VERGEN_BUILD_TIMESTAMP"),
    ")"
);

/// Log level options for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Configuration format options for output
#[derive(Debug, Clone, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

/// Main CLI arguments structure
#[derive(Parser, Debug)]
#[command(
    name = "herakles-check-procs",
    about = "Count running processes by name or command line",
    long_about = "Count running processes by name or command line.\n\n\
                  Reports the count as a Nagios-compatible check result with warn/crit \
                  min/max thresholds, as a Graphite metric line, or as a boolean exit code.",
    author = "Michael Moll <exporter@herakles.now> - Herakles",
    version,
    long_version = LONG_VERSION,
    allow_negative_numbers = true,
    after_help = "Exit codes (check): 0 OK, 1 WARNING, 2 CRITICAL, 3 UNKNOWN. \
                  Exit codes (boolean): 0 found, 1 not found."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output mode: check, metric or boolean
    #[arg(short = 'm', long, value_enum)]
    pub mode: Option<Mode>,

    /// The process name (or command line pattern) to look for
    #[arg(short = 'p', long, allow_hyphen_values = true)]
    pub process: Option<String>,

    /// Warn MIN: fewer running processes trigger a WARNING
    #[arg(short = 'W', long)]
    pub warn_min: Option<i64>,

    /// Warn MAX: more running processes trigger a WARNING
    #[arg(short = 'w', long)]
    pub warn_max: Option<i64>,

    /// Crit MIN: fewer running processes trigger a CRITICAL
    #[arg(short = 'C', long)]
    pub crit_min: Option<i64>,

    /// Crit MAX: more running processes trigger a CRITICAL
    #[arg(short = 'c', long)]
    pub crit_max: Option<i64>,

    /// Metric scheme prefix (defaults to the host name)
    #[arg(short = 's', long)]
    pub scheme: Option<String>,

    /// Match the process name; -n=false matches the command line instead
    #[arg(
        short = 'n',
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub search_name: Option<bool>,

    /// Regex match instead of exact string comparison
    #[arg(
        short = 'r',
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub regex: Option<bool>,

    /// Process table root
    #[arg(long)]
    pub proc_root: Option<PathBuf>,

    /// Log level (logs go to stderr)
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Config file (YAML/JSON/TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable all config file loading
    #[arg(long)]
    pub no_config: bool,

    /// Print effective merged config and exit
    #[arg(long)]
    pub show_config: bool,

    /// Output format for --show-config
    #[arg(long, value_enum, default_value = "yaml")]
    pub config_format: ConfigFormat,

    /// Validate config and exit (return code 3 on error)
    #[arg(long)]
    pub check_config: bool,
}

/// Subcommands for additional functionality
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print matching processes and scan statistics
    List,

    /// Check that the process table is readable
    CheckRequirements,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_go_style_flags() {
        let args = Args::try_parse_from([
            "herakles-check-procs",
            "-m",
            "m",
            "-p",
            "sshd",
            "-W",
            "2",
            "-w",
            "10",
            "-C",
            "1",
            "-c",
            "20",
            "-s",
            "myhost",
            "-n=false",
            "-r",
        ])
        .unwrap();

        assert_eq!(args.mode, Some(Mode::Metric));
        assert_eq!(args.process.as_deref(), Some("sshd"));
        assert_eq!(args.warn_min, Some(2));
        assert_eq!(args.warn_max, Some(10));
        assert_eq!(args.crit_min, Some(1));
        assert_eq!(args.crit_max, Some(20));
        assert_eq!(args.scheme.as_deref(), Some("myhost"));
        assert_eq!(args.search_name, Some(false));
        assert_eq!(args.regex, Some(true));
    }

    #[test]
    fn test_unset_flags_are_none() {
        let args = Args::try_parse_from(["herakles-check-procs", "-p", "cron"]).unwrap();
        assert_eq!(args.mode, None);
        assert_eq!(args.search_name, None);
        assert_eq!(args.regex, None);
        assert!(args.command.is_none());
    }

    #[test]
    fn test_mode_aliases() {
        for (given, expected) in [
            ("c", Mode::Check),
            ("check", Mode::Check),
            ("b", Mode::Boolean),
            ("boolean", Mode::Boolean),
            ("metric", Mode::Metric),
        ] {
            let args = Args::try_parse_from(["herakles-check-procs", "-m", given]).unwrap();
            assert_eq!(args.mode, Some(expected));
        }
    }

    #[test]
    fn test_invalid_mode_rejected() {
        assert!(Args::try_parse_from(["herakles-check-procs", "-m", "graph"]).is_err());
    }

    #[test]
    fn test_hyphen_values_are_accepted() {
        let args = Args::try_parse_from([
            "herakles-check-procs",
            "-p",
            "-bash ",
            "-W",
            "-1",
            "-C",
            "-5",
        ])
        .unwrap();
        assert_eq!(args.process.as_deref(), Some("-bash "));
        assert_eq!(args.warn_min, Some(-1));
        assert_eq!(args.crit_min, Some(-5));
    }

    #[test]
    fn test_subcommand() {
        let args =
            Args::try_parse_from(["herakles-check-procs", "-p", "cron", "list"]).unwrap();
        assert!(matches!(args.command, Some(Commands::List)));
    }
}
