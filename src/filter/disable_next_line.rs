//! `disable-next-line` directive support
//!
//! ```markdown
//! <!-- disable-next-line -->
//! This paragraph is ignored by every rule.
//!
//! <!-- disable-next-line no-todo -->
//! TODO: this is ignored by no-todo only.
//! ```
//!
//! "Next line" means the next node visited in document order, not the next
//! physical line: blank lines between the directive and the content do not
//! matter, and the whole node (paragraph, list, table, code block, ...) is
//! suppressed.

use super::{FilterContext, FilterRule};
use crate::directive::{Directive, comment_bodies, is_comment};
use crate::ignore::RuleScope;
use crate::parser::ast::{NodeType, TxtNode};
use std::collections::BTreeSet;

/// Keyword recognized when no other is configured.
///
/// Matched as a substring, so `textlint-disable-next-line` works too.
pub const DEFAULT_DISABLING_NEXT_LINE_COMMENT: &str = "disable-next-line";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisableNextLineOptions {
    pub disabling_next_line_comment: String,
}

impl DisableNextLineOptions {
    /// Use a custom directive keyword. An empty keyword falls back to the default.
    pub fn with_keyword(keyword: impl Into<String>) -> Self {
        let keyword = keyword.into();
        if keyword.is_empty() {
            return Self::default();
        }
        Self {
            disabling_next_line_comment: keyword,
        }
    }
}

impl Default for DisableNextLineOptions {
    fn default() -> Self {
        Self {
            disabling_next_line_comment: DEFAULT_DISABLING_NEXT_LINE_COMMENT.to_string(),
        }
    }
}

/// How the suppressor treats a node kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    /// Renderable content; can be the "next line"
    Content,
    /// Raw markup; may carry `<!-- -->` comments, otherwise content
    Markup,
    /// A native comment node; its value is scanned for the keyword
    Comment,
    /// Not visited
    Skipped,
}

pub fn node_role(node_type: NodeType) -> NodeRole {
    match node_type {
        NodeType::Html => NodeRole::Markup,
        NodeType::Comment => NodeRole::Comment,
        // Always preceded by its TableRow, which takes the suppression.
        NodeType::TableCell => NodeRole::Skipped,
        NodeType::Document
        | NodeType::Paragraph
        | NodeType::BlockQuote
        | NodeType::List
        | NodeType::ListItem
        | NodeType::Header
        | NodeType::CodeBlock
        | NodeType::HorizontalRule
        | NodeType::Str
        | NodeType::Break
        | NodeType::Emphasis
        | NodeType::Strong
        | NodeType::Link
        | NodeType::LinkReference
        | NodeType::Image
        | NodeType::ImageReference
        | NodeType::Definition
        | NodeType::Code
        | NodeType::Delete
        | NodeType::Table
        | NodeType::TableRow => NodeRole::Content,
    }
}

/// A directive waiting for the next visited node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingSuppression {
    active: bool,
    rule_ids: BTreeSet<String>,
}

impl PendingSuppression {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Rules the pending directive is limited to; empty means every rule
    pub fn rule_ids(&self) -> &BTreeSet<String> {
        &self.rule_ids
    }

    fn arm(&mut self, directive: Directive) {
        self.active = true;
        self.rule_ids = directive.rule_ids;
    }

    /// Disarm, returning the rule ids if a directive was pending
    fn take(&mut self) -> Option<BTreeSet<String>> {
        if !self.active {
            return None;
        }
        self.active = false;
        Some(std::mem::take(&mut self.rule_ids))
    }
}

/// The per-document state machine behind [`DisableNextLine`]
///
/// Feed it every node in document order with [`visit`](Self::visit). It must
/// not be shared between documents.
pub struct NextLineSuppressor<'a> {
    context: FilterContext<'a>,
    keyword: String,
    pending: PendingSuppression,
}

impl<'a> NextLineSuppressor<'a> {
    pub fn new(context: FilterContext<'a>, options: &DisableNextLineOptions) -> Self {
        Self {
            context,
            keyword: options.disabling_next_line_comment.clone(),
            pending: PendingSuppression::default(),
        }
    }

    pub fn pending(&self) -> &PendingSuppression {
        &self.pending
    }

    pub fn visit(&mut self, node: &TxtNode) {
        let role = node_role(node.node_type);
        if role == NodeRole::Skipped {
            return;
        }

        // Comment-bearing nodes consume a pending directive too, before
        // arming their own.
        self.consume(node);

        match role {
            NodeRole::Markup => self.scan_markup(node),
            NodeRole::Comment => {
                let value = node.value.as_deref().unwrap_or("");
                self.arm_from(value, node);
            }
            NodeRole::Content | NodeRole::Skipped => {}
        }
    }

    /// End of document. A directive still pending here has nothing to apply to.
    pub fn finish(self) {
        let pending = self.pending();
        if pending.is_active() {
            log::debug!(
                "discarding {} directive at end of document ({} rule id(s))",
                self.keyword,
                pending.rule_ids().len()
            );
        }
    }

    fn consume(&mut self, node: &TxtNode) {
        let Some(rule_ids) = self.pending.take() else {
            return;
        };

        log::debug!(
            "suppressing {} at {} for {}",
            node.node_type,
            node.span.start,
            if rule_ids.is_empty() {
                "all rules".to_string()
            } else {
                rule_ids.iter().cloned().collect::<Vec<_>>().join(", ")
            }
        );

        if rule_ids.is_empty() {
            self.context.should_ignore(node.span, RuleScope::All);
        } else {
            for rule_id in rule_ids {
                self.context.should_ignore(node.span, RuleScope::Rule(rule_id));
            }
        }
    }

    fn scan_markup(&mut self, node: &TxtNode) {
        let mut raw = self.context.get_source(Some(node));
        if raw.is_empty() {
            raw = node.value.as_deref().unwrap_or("");
        }
        if !is_comment(raw) {
            return;
        }
        // Later comments in the same node overwrite earlier ones.
        for body in comment_bodies(raw) {
            self.arm_from(body, node);
        }
    }

    fn arm_from(&mut self, body: &str, node: &TxtNode) {
        if let Some(directive) = Directive::parse(body, &self.keyword) {
            log::debug!("{} directive at {}", self.keyword, node.span.start);
            self.pending.arm(directive);
        }
    }
}

/// Filter rule that applies `disable-next-line` directives
#[derive(Debug, Clone, Default)]
pub struct DisableNextLine {
    options: DisableNextLineOptions,
}

impl DisableNextLine {
    pub const NAME: &'static str = "disable-next-line";

    pub fn new(options: DisableNextLineOptions) -> Self {
        Self { options }
    }
}

impl FilterRule for DisableNextLine {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Ignore diagnostics on the node following a disable-next-line comment"
    }

    fn filter(&self, document: &TxtNode, context: FilterContext<'_>) {
        let mut suppressor = NextLineSuppressor::new(context, &self.options);
        for node in document.descendants() {
            suppressor.visit(node);
        }
        suppressor.finish();
    }
}
