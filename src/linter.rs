use crate::config::LintConfig;
use crate::filter::{FilterContext, FilterRule};
use crate::ignore::{IgnoreTracker, filter_errors};
use crate::parser::ast::{Position, TxtNode};
#[cfg(feature = "cli")]
use rayon::prelude::*;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LintError {
    pub rule: String,
    pub category: String,
    pub message: String,
    pub severity: Severity,
    pub line: Option<usize>,
    pub column: Option<usize>,
    /// Byte offset of the reported location, used to match suppression ranges
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

impl LintError {
    pub fn new(rule: &str, category: &str, message: &str, severity: Severity) -> Self {
        Self {
            rule: rule.to_string(),
            category: category.to_string(),
            message: message.to_string(),
            severity,
            line: None,
            column: None,
            offset: None,
        }
    }

    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set line, column and offset from a source position
    pub fn at(self, position: Position) -> Self {
        self.with_location(position.line, position.column)
            .with_offset(position.offset)
    }
}

pub trait LintRule: Send + Sync {
    /// Rule id, used in reports and matched by `disable-next-line` rule lists
    fn name(&self) -> &str;
    fn category(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn check(&self, document: &TxtNode, source: &str) -> Vec<LintError>;
}

pub struct Linter {
    rules: Vec<Box<dyn LintRule>>,
    filters: Vec<Box<dyn FilterRule>>,
}

impl Linter {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            filters: Vec::new(),
        }
    }

    pub fn with_default_rules() -> Self {
        Self::with_config(None)
    }

    pub fn with_config(config: Option<&LintConfig>) -> Self {
        use crate::filter::{DisableNextLine, DisableNextLineOptions};
        use crate::rules::{NoTodo, ReportNodeTypes};

        let default_config = LintConfig::default();
        let config = config.unwrap_or(&default_config);

        let mut linter = Self::new();

        if config.is_rule_enabled(NoTodo::NAME) {
            linter.add_rule(Box::new(NoTodo));
        }
        if config.is_rule_enabled(ReportNodeTypes::NAME) {
            let node_types = config
                .get_rule_config(ReportNodeTypes::NAME)
                .map(|cfg| cfg.node_types.clone())
                .unwrap_or_default();
            linter.add_rule(Box::new(ReportNodeTypes::new(
                ReportNodeTypes::NAME,
                node_types,
            )));
        }

        if config.is_filter_enabled(DisableNextLine::NAME) {
            let options = config
                .disabling_next_line_comment()
                .map(DisableNextLineOptions::with_keyword)
                .unwrap_or_default();
            linter.add_filter(Box::new(DisableNextLine::new(options)));
        }

        linter
    }

    pub fn add_rule(&mut self, rule: Box<dyn LintRule>) {
        self.rules.push(rule);
    }

    pub fn add_filter(&mut self, filter: Box<dyn FilterRule>) {
        self.filters.push(filter);
    }

    /// Get a reference to all rules
    pub fn rules(&self) -> &[Box<dyn LintRule>] {
        &self.rules
    }

    /// Get a reference to all filter rules
    pub fn filters(&self) -> &[Box<dyn FilterRule>] {
        &self.filters
    }

    /// Run all lint rules and collect errors
    ///
    /// Uses parallel iteration when the cli feature is enabled (via rayon)
    #[cfg(feature = "cli")]
    pub fn lint(&self, document: &TxtNode, source: &str) -> Vec<LintError> {
        self.rules
            .par_iter()
            .map(|rule| rule.check(document, source))
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect()
    }

    /// Run all lint rules and collect errors (sequential version)
    #[cfg(not(feature = "cli"))]
    pub fn lint(&self, document: &TxtNode, source: &str) -> Vec<LintError> {
        self.rules
            .iter()
            .flat_map(|rule| rule.check(document, source))
            .collect()
    }

    /// Run every filter rule over the document and collect the ranges they
    /// mark as ignored
    ///
    /// Each filter gets a fresh context; no state is shared between calls.
    pub fn collect_ignores(&self, document: &TxtNode, source: &str) -> IgnoreTracker {
        let mut tracker = IgnoreTracker::new();
        for filter in &self.filters {
            filter.filter(document, FilterContext::new(source, &mut tracker));
        }
        tracker
    }

    /// Run all lint rules, then all filter rules, and drop suppressed errors
    ///
    /// Returns a tuple of (errors, ignored_count).
    pub fn lint_with_filters(&self, document: &TxtNode, source: &str) -> (Vec<LintError>, usize) {
        let errors = self.lint(document, source);
        let tracker = self.collect_ignores(document, source);
        log::debug!(
            "{} error(s) before filtering, {} ignore range(s)",
            errors.len(),
            tracker.ranges().len()
        );
        let result = filter_errors(errors, &tracker);
        (result.errors, result.ignored_count)
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::with_default_rules()
    }
}
