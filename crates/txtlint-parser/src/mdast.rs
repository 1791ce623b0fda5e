//! Markdown host parser.
//!
//! Parses GitHub Flavored Markdown with the `markdown` crate and lowers its
//! mdast into the textlint-shaped [`TxtNode`] tree.

use crate::ast::{NodeType, Position, Span, TxtNode};
use crate::error::{ParseError, ParseResult};
use markdown::ParseOptions;
use markdown::mdast::Node;

/// Parse a Markdown document into a tree rooted at a `Document` node.
pub fn parse_markdown(source: &str) -> ParseResult<TxtNode> {
    let mut options = ParseOptions::gfm();
    options.constructs.frontmatter = true;

    let tree =
        markdown::to_mdast(source, &options).map_err(|e| ParseError::Markdown(e.to_string()))?;

    let mut children = Vec::new();
    if let Some(nodes) = tree.children() {
        for node in nodes {
            lower(node, &mut children);
        }
    }

    Ok(TxtNode::parent(
        NodeType::Document,
        crate::document_span(source),
        children,
    ))
}

/// Lower one mdast node into `out`.
///
/// Kinds without a textlint counterpart are dropped and their children are
/// spliced into the parent in place.
fn lower(node: &Node, out: &mut Vec<TxtNode>) {
    let mut children = Vec::new();
    if let Some(nodes) = node.children() {
        for child in nodes {
            lower(child, &mut children);
        }
    }

    match node_type_of(node) {
        Some(node_type) => out.push(TxtNode {
            node_type,
            span: span_of(node),
            value: value_of(node),
            children,
        }),
        None => out.extend(children),
    }
}

fn node_type_of(node: &Node) -> Option<NodeType> {
    let node_type = match node {
        Node::Root(_) => NodeType::Document,
        Node::Paragraph(_) => NodeType::Paragraph,
        Node::Text(_) => NodeType::Str,
        Node::Heading(_) => NodeType::Header,
        Node::Blockquote(_) => NodeType::BlockQuote,
        Node::List(_) => NodeType::List,
        Node::ListItem(_) => NodeType::ListItem,
        Node::Code(_) | Node::Math(_) => NodeType::CodeBlock,
        Node::InlineCode(_) | Node::InlineMath(_) => NodeType::Code,
        Node::Html(_) => NodeType::Html,
        Node::ThematicBreak(_) => NodeType::HorizontalRule,
        Node::Break(_) => NodeType::Break,
        Node::Emphasis(_) => NodeType::Emphasis,
        Node::Strong(_) => NodeType::Strong,
        Node::Delete(_) => NodeType::Delete,
        Node::Link(_) => NodeType::Link,
        Node::LinkReference(_) => NodeType::LinkReference,
        Node::Image(_) => NodeType::Image,
        Node::ImageReference(_) => NodeType::ImageReference,
        Node::Definition(_) => NodeType::Definition,
        Node::Table(_) => NodeType::Table,
        Node::TableRow(_) => NodeType::TableRow,
        Node::TableCell(_) => NodeType::TableCell,
        _ => return None,
    };
    Some(node_type)
}

fn value_of(node: &Node) -> Option<String> {
    match node {
        Node::Text(text) => Some(text.value.clone()),
        Node::InlineCode(code) => Some(code.value.clone()),
        Node::InlineMath(math) => Some(math.value.clone()),
        Node::Code(code) => Some(code.value.clone()),
        Node::Math(math) => Some(math.value.clone()),
        Node::Html(html) => Some(html.value.clone()),
        _ => None,
    }
}

fn span_of(node: &Node) -> Span {
    node.position()
        .map(|position| {
            Span::new(
                Position::new(
                    position.start.line,
                    position.start.column,
                    position.start.offset,
                ),
                Position::new(position.end.line, position.end.column, position.end.offset),
            )
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(document: &TxtNode) -> Vec<NodeType> {
        document.descendants().map(|n| n.node_type).collect()
    }

    #[test]
    fn test_paragraph_and_str() {
        let source = "This is Error.";
        let document = parse_markdown(source).unwrap();
        assert_eq!(
            kinds(&document),
            vec![NodeType::Document, NodeType::Paragraph, NodeType::Str]
        );

        let text = &document.children[0].children[0];
        assert_eq!(text.value.as_deref(), Some("This is Error."));
        assert_eq!(text.raw(source), "This is Error.");
        assert_eq!(text.span.start.line, 1);
        assert_eq!(text.span.start.column, 1);
    }

    #[test]
    fn test_comment_line_is_html_block() {
        let source = "<!-- disable-next-line -->\nIgnored.\n";
        let document = parse_markdown(source).unwrap();

        let html = &document.children[0];
        assert_eq!(html.node_type, NodeType::Html);
        assert_eq!(html.raw(source), "<!-- disable-next-line -->");

        let paragraph = &document.children[1];
        assert_eq!(paragraph.node_type, NodeType::Paragraph);
        assert_eq!(paragraph.span.start.line, 2);
    }

    #[test]
    fn test_inline_nodes() {
        let source = "A *b* **c** `d` [e](https://example.com) ~~f~~";
        let document = parse_markdown(source).unwrap();
        let found = kinds(&document);

        for expected in [
            NodeType::Emphasis,
            NodeType::Strong,
            NodeType::Code,
            NodeType::Link,
            NodeType::Delete,
        ] {
            assert!(found.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn test_block_nodes() {
        let source = "# Title\n\n> quote\n\n- item\n\n---\n\n```\ncode\n```\n";
        let document = parse_markdown(source).unwrap();
        let top: Vec<NodeType> = document.children.iter().map(|n| n.node_type).collect();
        assert_eq!(
            top,
            vec![
                NodeType::Header,
                NodeType::BlockQuote,
                NodeType::List,
                NodeType::HorizontalRule,
                NodeType::CodeBlock,
            ]
        );
        assert_eq!(document.children[4].value.as_deref(), Some("code"));
    }

    #[test]
    fn test_gfm_table() {
        let source = "| a | b |\n| - | - |\n| c | d |\n";
        let document = parse_markdown(source).unwrap();
        let found = kinds(&document);
        assert_eq!(found[1], NodeType::Table);
        assert_eq!(found[2], NodeType::TableRow);
        assert_eq!(found[3], NodeType::TableCell);
    }

    #[test]
    fn test_document_span_covers_source() {
        let source = "first\n\nsecond\n";
        let document = parse_markdown(source).unwrap();
        assert_eq!(document.span.start.offset, 0);
        assert_eq!(document.span.end.offset, source.len());
        assert_eq!(document.raw(source), source);
    }

    #[test]
    fn test_front_matter_is_dropped() {
        let document = parse_markdown("---\ntitle: x\n---\n\nBody\n").unwrap();
        assert!(
            document
                .descendants()
                .all(|n| n.node_type != NodeType::HorizontalRule)
        );
    }
}
