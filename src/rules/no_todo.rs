use crate::linter::{LintError, LintRule, Severity};
use crate::parser::ast::{NodeType, Position, TxtNode};
use regex::Regex;
use std::sync::LazyLock;

static TODO_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\btodo:").expect("TODO pattern is valid"));

/// Report `TODO:` markers left in prose
pub struct NoTodo;

impl NoTodo {
    pub const NAME: &'static str = "no-todo";
}

impl LintRule for NoTodo {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn category(&self) -> &'static str {
        "content"
    }

    fn description(&self) -> &'static str {
        "Disallow TODO: markers in text"
    }

    fn check(&self, document: &TxtNode, source: &str) -> Vec<LintError> {
        let mut errors = Vec::new();

        for node in document.descendants().filter(|n| n.is(NodeType::Str)) {
            let raw = node.raw(source);
            for found in TODO_MARKER.find_iter(raw) {
                errors.push(
                    LintError::new(
                        self.name(),
                        self.category(),
                        &format!("Found TODO: '{}'", raw[found.start()..].trim_end()),
                        Severity::Warning,
                    )
                    .at(advance(node.span.start, &raw[..found.start()])),
                );
            }
        }

        errors
    }
}

/// Position reached after reading `prefix` from `start`
fn advance(start: Position, prefix: &str) -> Position {
    let offset = start.offset + prefix.len();
    match prefix.rfind('\n') {
        Some(newline) => Position::new(
            start.line + prefix.matches('\n').count(),
            prefix[newline + 1..].chars().count() + 1,
            offset,
        ),
        None => Position::new(start.line, start.column + prefix.chars().count(), offset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_markdown, parse_text};

    fn check(source: &str) -> Vec<LintError> {
        let document = parse_markdown(source).unwrap();
        NoTodo.check(&document, source)
    }

    #[test]
    fn test_no_todo() {
        assert!(check("Everything is done.\n").is_empty());
    }

    #[test]
    fn test_todo_marker() {
        let errors = check("Intro\n\nSome text TODO: fix this\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule, "no-todo");
        assert_eq!(errors[0].line, Some(3));
        assert_eq!(errors[0].column, Some(11));
        assert_eq!(errors[0].message, "Found TODO: 'TODO: fix this'");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(check("todo: lower case\n").len(), 1);
    }

    #[test]
    fn test_word_boundary() {
        assert!(check("mastodo: not a marker\n").is_empty());
    }

    #[test]
    fn test_marker_on_continuation_line() {
        let source = "first line\nTODO: second line\n";
        let document = parse_text(source);
        let errors = NoTodo.check(&document, source);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, Some(2));
        assert_eq!(errors[0].column, Some(1));
        assert_eq!(errors[0].offset, Some(11));
    }

    #[test]
    fn test_marker_in_inline_code_is_ignored() {
        assert!(check("Use `TODO:` markers sparingly.\n").is_empty());
    }

    #[test]
    fn test_advance_across_newline() {
        let position = advance(Position::new(2, 5, 10), "ab\ncd");
        assert_eq!(position, Position::new(3, 3, 15));
    }
}
