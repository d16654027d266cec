//! herakles-check-procs - version 0.1.0
//!
//! Process count check with tracing logging.
//! This is the main entry point that resolves configuration, handles
//! subcommands and runs one scan in the selected output mode.

mod cli;
mod commands;
mod config;
mod startup_checks;

use clap::Parser;
use herakles_check_procs::{dispatch, Exclusions, Severity};
use std::process;
use tracing::{debug, info, level_filters::LevelFilter};

use cli::{Args, Commands, LogLevel};
use commands::{command_check_requirements, command_list};
use config::{resolve_config, show_config, validate_effective_config, Config};

/// Reports a fatal configuration error and exits UNKNOWN before any scan.
fn fatal(message: impl std::fmt::Display) -> ! {
    eprintln!("UNKNOWN: {}", message);
    process::exit(Severity::Unknown.exit_code());
}

/// Initializes tracing logging subsystem with configured log level.
///
/// Logs go to stderr; stdout is reserved for the plugin output line.
fn setup_logging(level: LogLevel) {
    let filter = match level {
        LogLevel::Off => LevelFilter::OFF,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Trace => LevelFilter::TRACE,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    debug!("Logging initialized with level: {:?}", level);
}

/// Helper function to resolve configuration, install logging and validate.
/// Exits UNKNOWN if loading or validation fails.
///
/// Logging is set up before validation so its warnings reach stderr.
fn load_validated_config(args: &Args) -> Config {
    let config = match resolve_config(args) {
        Ok(c) => c,
        Err(e) => fatal(format!("Configuration invalid: {}", e)),
    };

    // An invalid level is reported by validation below
    setup_logging(config.log_level().unwrap_or(LogLevel::Warn));
    if let Some(path) = &config.source {
        info!("Loaded configuration from: {}", path.display());
    }

    let require_target =
        !args.show_config && !matches!(args.command, Some(Commands::CheckRequirements));
    if let Err(e) = validate_effective_config(&config, require_target) {
        fatal(format!("Configuration invalid: {}", e));
    }
    config
}

/// Main application entry point.
fn main() {
    let args = match Args::try_parse() {
        Ok(a) => a,
        Err(e) => {
            // --help / --version print to stdout and succeed
            let code = if e.use_stderr() {
                Severity::Unknown.exit_code()
            } else {
                0
            };
            let _ = e.print();
            process::exit(code);
        }
    };

    let config = load_validated_config(&args);

    if args.check_config {
        println!("✅ Configuration is valid");
        return;
    }

    if args.show_config {
        if let Err(e) = show_config(&config, args.config_format) {
            fatal(e);
        }
        return;
    }

    // Handle subcommands
    if let Some(command) = &args.command {
        match command {
            Commands::CheckRequirements => {
                let ok = command_check_requirements(&config.procfs());
                process::exit(if ok { 0 } else { 1 });
            }
            Commands::List => {
                let query = match config.query() {
                    Ok(q) => q,
                    Err(e) => fatal(e),
                };
                let mut stdout = std::io::stdout().lock();
                let result = command_list(
                    &config.procfs(),
                    &query,
                    &Exclusions::current(),
                    &mut stdout,
                );
                if let Err(e) = result {
                    eprintln!("❌ {}", e);
                    process::exit(1);
                }
                return;
            }
        }
    }

    let (mode, invocation) = match config.invocation() {
        Ok(v) => v,
        Err(e) => fatal(e),
    };
    debug!(?mode, query = ?invocation.query, "Running process count");

    let outcome = dispatch(mode, &invocation);
    if let Some(line) = &outcome.stdout {
        println!("{}", line);
    }
    process::exit(outcome.exit_code);
}
