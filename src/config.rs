//! Configuration management for herakles-check-procs.
//!
//! This module handles loading, merging, and validating configuration from files
//! and CLI arguments. It supports YAML, JSON, and TOML formats.

use crate::cli::{Args, ConfigFormat, LogLevel};
use clap::ValueEnum;
use herakles_check_procs::modes::check::{
    DEFAULT_CRIT_MAX, DEFAULT_CRIT_MIN, DEFAULT_WARN_MAX, DEFAULT_WARN_MIN,
};
use herakles_check_procs::{
    Exclusions, Invocation, MatchField, MatchMode, MatchQuery, Mode, ProcFs, Thresholds,
};
use herakles_check_procs::process::DEFAULT_PROC_ROOT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Placeholder the classic plugin used for "no process given".
pub const UNDEFINED_PROCESS: &str = "undefined";

pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Effective configuration; every field may come from CLI, file or default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub mode: Option<Mode>,
    pub process: Option<String>,

    // Thresholds
    #[serde(alias = "warn-min")]
    pub warn_min: Option<i64>,
    #[serde(alias = "warn-max")]
    pub warn_max: Option<i64>,
    #[serde(alias = "crit-min")]
    pub crit_min: Option<i64>,
    #[serde(alias = "crit-max")]
    pub crit_max: Option<i64>,

    // Metric output
    pub scheme: Option<String>,

    // Matching
    #[serde(alias = "search-name")]
    pub search_name: Option<bool>,
    pub regex: Option<bool>,

    #[serde(alias = "proc-root")]
    pub proc_root: Option<PathBuf>,

    // Logging
    #[serde(alias = "log-level")]
    pub log_level: Option<String>,

    /// File the configuration was loaded from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Some(Mode::Check),
            process: None,
            warn_min: Some(DEFAULT_WARN_MIN),
            warn_max: Some(DEFAULT_WARN_MAX),
            crit_min: Some(DEFAULT_CRIT_MIN),
            crit_max: Some(DEFAULT_CRIT_MAX),
            scheme: Some(String::new()),
            search_name: Some(true),
            regex: Some(false),
            proc_root: Some(PathBuf::from(DEFAULT_PROC_ROOT)),
            log_level: Some(DEFAULT_LOG_LEVEL.into()),
            source: None,
        }
    }
}

impl Config {
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            warn_min: self.warn_min.unwrap_or(DEFAULT_WARN_MIN),
            warn_max: self.warn_max.unwrap_or(DEFAULT_WARN_MAX),
            crit_min: self.crit_min.unwrap_or(DEFAULT_CRIT_MIN),
            crit_max: self.crit_max.unwrap_or(DEFAULT_CRIT_MAX),
        }
    }

    pub fn procfs(&self) -> ProcFs {
        match &self.proc_root {
            Some(root) => ProcFs::new(root),
            None => ProcFs::default(),
        }
    }

    pub fn log_level(&self) -> Result<LogLevel, String> {
        let raw = self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL);
        LogLevel::from_str(raw, true).map_err(|_| {
            format!(
                "Invalid log_level '{}', expected one of off, error, warn, info, debug, trace",
                raw
            )
        })
    }

    /// The match query; fails when no process target was given.
    pub fn query(&self) -> Result<MatchQuery, Box<dyn std::error::Error>> {
        let target = match self.process.as_deref() {
            None | Some(UNDEFINED_PROCESS) | Some("") => {
                return Err("Must provide a process to check (-p)".into())
            }
            Some(p) => p,
        };

        let field = if self.search_name.unwrap_or(true) {
            MatchField::Name
        } else {
            MatchField::CommandLine
        };
        let mode = if self.regex.unwrap_or(false) {
            MatchMode::Regex
        } else {
            MatchMode::Exact
        };

        Ok(MatchQuery::new(target, field, mode))
    }

    /// Resolves everything a single pass needs.
    pub fn invocation(&self) -> Result<(Mode, Invocation), Box<dyn std::error::Error>> {
        let query = self.query()?;
        let inv = Invocation {
            procfs: self.procfs(),
            query,
            thresholds: self.thresholds(),
            scheme: self.scheme.clone().unwrap_or_default(),
            exclude: Exclusions::current(),
        };
        Ok((self.mode.unwrap_or_default(), inv))
    }
}

/// Validate effective config (used by --check-config and at startup).
///
/// `require_target` is false only for paths that never scan for a target
/// (`--show-config`, `check-requirements`).
pub fn validate_effective_config(
    cfg: &Config,
    require_target: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    cfg.log_level()?;

    if require_target {
        cfg.query()?;
    }

    if let Some(root) = &cfg.proc_root {
        if root.as_os_str().is_empty() {
            return Err("proc_root must not be empty".into());
        }
    }

    let thresholds = cfg.thresholds();
    if !thresholds.is_nested() {
        warn!(
            "Thresholds are not nested \
             (expected crit_min <= warn_min and warn_max <= crit_max): {:?}",
            thresholds
        );
    }

    Ok(())
}

/// Resolves configuration from CLI args, config file, and defaults.
/// This enforces precedence: CLI (if provided) > config file > default.
pub fn resolve_config(args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if args.no_config {
        Config::default()
    } else {
        load_config(args.config.as_deref())?
    };

    if args.mode.is_some() {
        config.mode = args.mode;
    }
    if let Some(process) = &args.process {
        config.process = Some(process.clone());
    }

    // Thresholds: CLI wins if provided
    if args.warn_min.is_some() {
        config.warn_min = args.warn_min;
    }
    if args.warn_max.is_some() {
        config.warn_max = args.warn_max;
    }
    if args.crit_min.is_some() {
        config.crit_min = args.crit_min;
    }
    if args.crit_max.is_some() {
        config.crit_max = args.crit_max;
    }

    if let Some(scheme) = &args.scheme {
        config.scheme = Some(scheme.clone());
    }
    if args.search_name.is_some() {
        config.search_name = args.search_name;
    }
    if args.regex.is_some() {
        config.regex = args.regex;
    }
    if let Some(root) = &args.proc_root {
        config.proc_root = Some(root.clone());
    }
    if let Some(level) = args.log_level {
        config.log_level = level
            .to_possible_value()
            .map(|v| v.get_name().to_string());
    }

    Ok(config)
}

/// Enhanced configuration loading with multiple format support.
///
/// Keys missing from the file keep their defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(format!("Config file not found: {}", p.display()).into());
            }
            p.to_path_buf()
        }
        None => {
            // Try default locations
            let defaults = [
                "/etc/herakles/check-procs.yaml",
                "/etc/herakles/check-procs.yml",
                "/etc/herakles/check-procs.json",
                "./herakles-check-procs.yaml",
                "./herakles-check-procs.yml",
                "./herakles-check-procs.json",
            ];

            match defaults.iter().find(|p| Path::new(p).exists()) {
                Some(p) => PathBuf::from(p),
                None => return Ok(Config::default()),
            }
        }
    };

    let content = fs::read_to_string(&path)?;
    let file_config: Config = match path.extension().and_then(|s| s.to_str()) {
        Some("json") => serde_json::from_str(&content)?,
        Some("toml") => toml::from_str(&content)?,
        // Default to YAML
        _ => serde_yaml::from_str(&content)?,
    };

    let mut config = merge_over_defaults(file_config);
    config.source = Some(path);
    Ok(config)
}

fn merge_over_defaults(file: Config) -> Config {
    let d = Config::default();
    Config {
        mode: file.mode.or(d.mode),
        process: file.process.or(d.process),
        warn_min: file.warn_min.or(d.warn_min),
        warn_max: file.warn_max.or(d.warn_max),
        crit_min: file.crit_min.or(d.crit_min),
        crit_max: file.crit_max.or(d.crit_max),
        scheme: file.scheme.or(d.scheme),
        search_name: file.search_name.or(d.search_name),
        regex: file.regex.or(d.regex),
        proc_root: file.proc_root.or(d.proc_root),
        log_level: file.log_level.or(d.log_level),
        source: None,
    }
}

/// Shows configuration in requested format
pub fn show_config(
    config: &Config,
    format: ConfigFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };

    println!("{output}");
    Ok(())
}
