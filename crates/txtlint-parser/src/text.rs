//! Plain text host parser.
//!
//! Blank lines separate paragraphs. Inside a paragraph every line becomes a
//! `Str` node and the line endings between them become `Break` nodes.

use crate::ast::{NodeType, Position, Span, TxtNode};

struct Line<'a> {
    number: usize,
    offset: usize,
    text: &'a str,
}

impl Line<'_> {
    fn start(&self) -> Position {
        Position::new(self.number, 1, self.offset)
    }

    fn end(&self) -> Position {
        Position::new(
            self.number,
            self.text.chars().count() + 1,
            self.offset + self.text.len(),
        )
    }
}

/// Parse a plain text document. Never fails.
pub fn parse_text(source: &str) -> TxtNode {
    let mut paragraphs = Vec::new();
    let mut pending: Vec<Line<'_>> = Vec::new();
    let mut offset = 0;

    for (index, raw_line) in source.split_inclusive('\n').enumerate() {
        let text = raw_line.trim_end_matches(['\n', '\r']);
        if text.trim().is_empty() {
            if !pending.is_empty() {
                paragraphs.push(paragraph(&pending));
                pending.clear();
            }
        } else {
            pending.push(Line {
                number: index + 1,
                offset,
                text,
            });
        }
        offset += raw_line.len();
    }

    if !pending.is_empty() {
        paragraphs.push(paragraph(&pending));
    }

    TxtNode::parent(NodeType::Document, crate::document_span(source), paragraphs)
}

fn paragraph(lines: &[Line<'_>]) -> TxtNode {
    let mut children = Vec::with_capacity(lines.len() * 2);

    for (index, line) in lines.iter().enumerate() {
        if index > 0 {
            let previous = &lines[index - 1];
            children.push(TxtNode::leaf(
                NodeType::Break,
                Span::new(previous.end(), line.start()),
                "\n",
            ));
        }
        children.push(TxtNode::leaf(
            NodeType::Str,
            Span::new(line.start(), line.end()),
            line.text,
        ));
    }

    // `lines` is never empty here.
    let start = lines.first().map(Line::start).unwrap_or_default();
    let end = lines.last().map(Line::end).unwrap_or_default();

    TxtNode::parent(NodeType::Paragraph, Span::new(start, end), children)
}
