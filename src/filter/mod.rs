//! Filter rules
//!
//! A filter rule does not report anything itself. It walks the document after
//! the lint rules have run and marks ranges whose diagnostics must be dropped
//! from the final report.

mod disable_next_line;

pub use disable_next_line::{
    DEFAULT_DISABLING_NEXT_LINE_COMMENT, DisableNextLine, DisableNextLineOptions, NextLineSuppressor,
    NodeRole, PendingSuppression, node_role,
};

use crate::ignore::{IgnoreRange, IgnoreTracker, RuleScope};
use crate::parser::ast::{Span, TxtNode};

/// What a filter rule may do with the document it is given
///
/// Built fresh for every document and every filter rule.
pub struct FilterContext<'a> {
    source: &'a str,
    ignores: &'a mut IgnoreTracker,
}

impl<'a> FilterContext<'a> {
    pub fn new(source: &'a str, ignores: &'a mut IgnoreTracker) -> Self {
        Self { source, ignores }
    }

    /// The full document text, or the raw text of `node`
    pub fn get_source(&self, node: Option<&TxtNode>) -> &'a str {
        match node {
            Some(node) => node.raw(self.source),
            None => self.source,
        }
    }

    /// Suppress diagnostics of `scope` that start inside `span`
    pub fn should_ignore(&mut self, span: Span, scope: RuleScope) {
        self.ignores.add(IgnoreRange::new(span.range(), scope));
    }
}

pub trait FilterRule: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    /// Walk `document` and record suppressions through `context`
    fn filter(&self, document: &TxtNode, context: FilterContext<'_>);
}
