//! Document parsers for txtlint
//!
//! This crate turns Markdown and plain text documents into a textlint-style
//! tree ([`ast::TxtNode`]) that lint rules and filter rules walk in document
//! order.
//!
//! # Quick Start
//!
//! ```
//! use txtlint_parser::parse_markdown;
//! use txtlint_parser::ast::NodeType;
//!
//! let document = parse_markdown("# Title\n\nSome *text*.").unwrap();
//!
//! for node in document.descendants().filter(|n| n.is(NodeType::Str)) {
//!     println!("{:?} at line {}", node.value, node.span.start.line);
//! }
//! ```
//!
//! To parse from a file on disk (the parser is chosen by extension):
//!
//! ```no_run
//! use std::path::Path;
//! use txtlint_parser::parse_file;
//!
//! let document = parse_file(Path::new("README.md")).unwrap();
//! ```
//!
//! # Modules
//!
//! - [`ast`] — tree types: [`ast::TxtNode`], [`ast::NodeType`], [`ast::Span`],
//!   [`ast::Position`]
//! - [`error`] — [`error::ParseError`]

pub mod ast;
pub mod error;
mod mdast;
mod text;

pub use crate::mdast::parse_markdown;
pub use crate::text::parse_text;

use ast::{Position, Span, TxtNode};
use error::{ParseError, ParseResult};
use std::fs;
use std::path::Path;

/// Which host parser handles a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentKind {
    #[default]
    Markdown,
    Text,
}

impl DocumentKind {
    /// `.md` and `.markdown` are Markdown, everything else is text.
    ///
    /// MDX is not listed: its `{/* */}` comments and JSX need an MDX parser.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("md" | "markdown") => DocumentKind::Markdown,
            _ => DocumentKind::Text,
        }
    }
}

/// Parse a document from disk
pub fn parse_file(path: &Path) -> ParseResult<TxtNode> {
    let content = fs::read_to_string(path).map_err(|e| ParseError::IoError(e.to_string()))?;
    parse_string(&content, DocumentKind::from_path(path))
}

/// Parse a document from a string
pub fn parse_string(source: &str, kind: DocumentKind) -> ParseResult<TxtNode> {
    match kind {
        DocumentKind::Markdown => parse_markdown(source),
        DocumentKind::Text => Ok(parse_text(source)),
    }
}

/// Span covering the whole of `source`.
pub(crate) fn document_span(source: &str) -> Span {
    let line = source.matches('\n').count() + 1;
    let last_line = source.rsplit('\n').next().unwrap_or("");
    Span::new(
        Position::new(1, 1, 0),
        Position::new(line, last_line.chars().count() + 1, source.len()),
    )
}
