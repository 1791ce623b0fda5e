//! Suppression ranges recorded by filter rules
//!
//! Filter rules mark byte ranges of the document as exempt from reporting,
//! either for every rule or for one rule id. After all rules have run,
//! [`filter_errors`] drops the diagnostics that start inside such a range.

use crate::linter::LintError;
use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// Which rules a suppression applies to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum RuleScope {
    /// Every rule (`"*"`)
    All,
    /// A single rule id
    Rule(String),
}

impl RuleScope {
    pub fn matches(&self, rule: &str) -> bool {
        match self {
            RuleScope::All => true,
            RuleScope::Rule(id) => id == rule,
        }
    }
}

impl fmt::Display for RuleScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleScope::All => f.write_str("*"),
            RuleScope::Rule(id) => f.write_str(id),
        }
    }
}

impl From<RuleScope> for String {
    fn from(scope: RuleScope) -> Self {
        scope.to_string()
    }
}

/// A half-open byte range in which diagnostics of `scope` are suppressed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IgnoreRange {
    pub start: usize,
    pub end: usize,
    pub scope: RuleScope,
}

impl IgnoreRange {
    pub fn new(range: Range<usize>, scope: RuleScope) -> Self {
        Self {
            start: range.start,
            end: range.end,
            scope,
        }
    }

    /// Check if a diagnostic of `rule` starting at `offset` falls in this range
    pub fn covers(&self, rule: &str, offset: usize) -> bool {
        self.start <= offset && offset < self.end && self.scope.matches(rule)
    }
}

/// Collects the ignore ranges for one document
#[derive(Debug, Default)]
pub struct IgnoreTracker {
    ranges: Vec<IgnoreRange>,
}

impl IgnoreTracker {
    /// Create a new empty ignore tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a suppression
    pub fn add(&mut self, range: IgnoreRange) {
        self.ranges.push(range);
    }

    /// Check if a rule is ignored at a byte offset
    pub fn is_ignored(&self, rule: &str, offset: usize) -> bool {
        self.ranges.iter().any(|range| range.covers(rule, offset))
    }

    /// All recorded ranges, in the order they were added
    pub fn ranges(&self) -> &[IgnoreRange] {
        &self.ranges
    }
}

/// Result of filtering errors with ignore tracker
#[derive(Debug)]
pub struct FilterResult {
    /// Errors that were not ignored
    pub errors: Vec<LintError>,
    /// Number of errors that were ignored
    pub ignored_count: usize,
}

/// Filter errors using an ignore tracker, returning remaining errors and ignored count
///
/// Errors without an offset are never ignored.
pub fn filter_errors(errors: Vec<LintError>, tracker: &IgnoreTracker) -> FilterResult {
    let mut remaining = Vec::new();
    let mut ignored_count = 0;

    for error in errors {
        if let Some(offset) = error.offset
            && tracker.is_ignored(&error.rule, offset)
        {
            ignored_count += 1;
            continue;
        }
        remaining.push(error);
    }

    FilterResult {
        errors: remaining,
        ignored_count,
    }
}
