use crate::linter::{LintError, LintRule, Severity};
use crate::parser::ast::{NodeType, TxtNode};

/// Report every node whose kind is in a configured list
///
/// Useful for checking filter rules: every reported node shows up as one
/// diagnostic at the node's start.
pub struct ReportNodeTypes {
    id: String,
    node_types: Vec<NodeType>,
}

impl ReportNodeTypes {
    pub const NAME: &'static str = "report-node-types";

    /// Register the rule under `id`, so several instances can coexist
    pub fn new(id: impl Into<String>, node_types: Vec<NodeType>) -> Self {
        Self {
            id: id.into(),
            node_types,
        }
    }
}

impl LintRule for ReportNodeTypes {
    fn name(&self) -> &str {
        &self.id
    }

    fn category(&self) -> &'static str {
        "debug"
    }

    fn description(&self) -> &'static str {
        "Report nodes of the configured types"
    }

    fn check(&self, document: &TxtNode, _source: &str) -> Vec<LintError> {
        document
            .descendants()
            .filter(|node| self.node_types.contains(&node.node_type))
            .map(|node| {
                LintError::new(
                    self.name(),
                    self.category(),
                    &format!("found {} node", node.node_type),
                    Severity::Error,
                )
                .at(node.span.start)
            })
            .collect()
    }
}
