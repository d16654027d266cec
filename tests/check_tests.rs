//! Integration tests for check-mode threshold evaluation.
//!
//! These tests verify severity selection, messages and perfdata produced by
//! `evaluate()` for counts on both sides of the threshold ranges.

use herakles_check_procs::modes::{evaluate, Severity, Thresholds};

/// Helper function to create thresholds.
fn thresholds(warn_min: i64, warn_max: i64, crit_min: i64, crit_max: i64) -> Thresholds {
    Thresholds {
        warn_min,
        warn_max,
        crit_min,
        crit_max,
    }
}

#[test]
fn test_zero_processes_below_crit_min() {
    let out = evaluate(0, "sshd", &Thresholds::default());
    assert_eq!(out.severity, Severity::Critical);
    assert_eq!(
        out.line,
        "CRITICAL: Found 0 sshd processes. Expecting 1 | sshd=0;0:50;1:100;0;"
    );
}

#[test]
fn test_count_in_range_is_ok() {
    let out = evaluate(5, "sshd", &thresholds(0, 50, 1, 100));
    assert_eq!(out.severity, Severity::Ok);
    assert_eq!(
        out.line,
        "OK: Everything looks shiny from here, cap'n | sshd=5;0:50;1:100;0;"
    );
}

#[test]
fn test_crit_max_overrides_warn_max() {
    let out = evaluate(150, "sshd", &thresholds(0, 50, 1, 100));
    assert_eq!(out.severity, Severity::Critical);
    assert!(out
        .line
        .starts_with("CRITICAL: Found 150 sshd processes. Max threshold: 100 |"));
    assert!(!out.line.contains("Warn threshold"));
}

#[test]
fn test_warn_min() {
    let out = evaluate(2, "nginx", &thresholds(3, 50, 1, 100));
    assert_eq!(out.severity, Severity::Warning);
    assert!(out
        .line
        .starts_with("WARNING: Found 2 nginx processes. Expecting 3 |"));
}

#[test]
fn test_warn_max() {
    let out = evaluate(51, "nginx", &Thresholds::default());
    assert_eq!(out.severity, Severity::Warning);
    assert!(out
        .line
        .starts_with("WARNING: Found 51 nginx processes. Warn threshold: 50 |"));
}

#[test]
fn test_bounds_are_inclusive() {
    let t = thresholds(2, 10, 1, 20);
    assert_eq!(evaluate(2, "p", &t).severity, Severity::Ok);
    assert_eq!(evaluate(10, "p", &t).severity, Severity::Ok);
    assert_eq!(evaluate(1, "p", &t).severity, Severity::Warning);
    assert_eq!(evaluate(20, "p", &t).severity, Severity::Warning);
    assert_eq!(evaluate(21, "p", &t).severity, Severity::Critical);
}

#[test]
fn test_min_and_max_both_fire_worst_wins() {
    // Inverted ranges: every count breaches something
    let t = thresholds(10, 2, 1, 5);

    // count 7: warn (below warn_min 10) and critical (above crit_max 5)
    let out = evaluate(7, "java", &t);
    assert_eq!(out.severity, Severity::Critical);
    assert!(out.line.contains("Max threshold: 5"));
    assert!(!out.line.contains("Expecting"));

    // count 3: warn on both sides, both messages reported
    let out = evaluate(3, "java", &t);
    assert_eq!(out.severity, Severity::Warning);
    assert!(out.line.starts_with(concat!(
        "WARNING: Found 3 java processes. Expecting 10, ",
        "Found 3 java processes. Warn threshold: 2 |"
    )));
}

#[test]
fn test_negative_thresholds() {
    // crit_min below zero can never fire
    let out = evaluate(0, "cron", &thresholds(-5, 50, -10, 100));
    assert_eq!(out.severity, Severity::Ok);
    assert!(out.line.ends_with("| cron=0;-5:50;-10:100;0;"));
}

#[test]
fn test_label_with_spaces_is_quoted() {
    let out = evaluate(1, "nginx: worker", &Thresholds::default());
    assert!(out.line.ends_with("| 'nginx: worker'=1;0:50;1:100;0;"));
}
