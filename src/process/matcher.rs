//! Matching process attributes against a query and counting the hits.

use crate::process::reader::{Attribute, MatchField, ProcessRecord};
use regex::Regex;
use tracing::warn;

/// How the query target is compared to an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Full, case-sensitive string equality.
    Exact,
    /// Regular expression matching anywhere in the attribute.
    Regex,
}

/// What to look for and how. Fixed for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchQuery {
    pub target: String,
    pub field: MatchField,
    pub mode: MatchMode,
}

impl MatchQuery {
    pub fn new(target: impl Into<String>, field: MatchField, mode: MatchMode) -> Self {
        Self {
            target: target.into(),
            field,
            mode,
        }
    }
}

/// A query prepared for repeated comparisons.
///
/// An invalid regex produces a matcher that never matches.
#[derive(Debug, Clone)]
pub enum Matcher {
    Exact(String),
    Regex(Regex),
    Invalid,
}

impl Matcher {
    pub fn new(query: &MatchQuery) -> Self {
        match query.mode {
            MatchMode::Exact => Matcher::Exact(query.target.clone()),
            MatchMode::Regex => match Regex::new(&query.target) {
                Ok(re) => Matcher::Regex(re),
                Err(e) => {
                    warn!(
                        "Invalid regex '{}', treating every process as non-matching: {}",
                        query.target, e
                    );
                    Matcher::Invalid
                }
            },
        }
    }

    pub fn is_match(&self, attribute: &str) -> bool {
        match self {
            Matcher::Exact(target) => attribute == target,
            Matcher::Regex(re) => re.is_match(attribute),
            Matcher::Invalid => false,
        }
    }
}

/// Counts attributes matching `query`; each attribute counts at most once.
pub fn count<'a, I>(attributes: I, query: &MatchQuery) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    let matcher = Matcher::new(query);
    attributes
        .into_iter()
        .filter(|a| matcher.is_match(a))
        .count()
}

/// Result of matching one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Processes whose attribute matched.
    pub matched: usize,
    /// Processes whose attribute could be read.
    pub scanned: usize,
    /// Processes skipped because their record was gone or unreadable.
    pub skipped: usize,
}

/// Matches every readable record and tallies skips separately.
pub fn summarize(records: &[ProcessRecord], matcher: &Matcher) -> ScanSummary {
    let mut summary = ScanSummary::default();
    for record in records {
        match &record.attribute {
            Attribute::Found(value) => {
                summary.scanned += 1;
                if matcher.is_match(value) {
                    summary.matched += 1;
                }
            }
            Attribute::Skip(_) => summary.skipped += 1,
        }
    }
    summary
}
