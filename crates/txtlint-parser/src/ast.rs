//! Document tree types shared by every txtlint host parser.
//!
//! The tree follows the textlint TxtAST shape: one [`TxtNode`] per structural
//! construct, tagged with a [`NodeType`], carrying its source [`Span`] and,
//! for leaf kinds, the literal text value.
//!
//! # Tree Structure
//!
//! ```text
//! Document
//!  ├─ Paragraph
//!  │    ├─ Str          ("This is ")
//!  │    ├─ Emphasis
//!  │    │    └─ Str     ("text")
//!  │    └─ Html         ("<!-- disable-next-line -->")
//!  ├─ Html              (block markup, e.g. a comment line)
//!  └─ CodeBlock         (value = fenced content)
//! ```
//!
//! # Example
//!
//! ```
//! use txtlint_parser::parse_markdown;
//! use txtlint_parser::ast::NodeType;
//!
//! let document = parse_markdown("Hello *world*").unwrap();
//! let kinds: Vec<NodeType> = document.descendants().map(|n| n.node_type).collect();
//!
//! assert_eq!(
//!     kinds,
//!     vec![
//!         NodeType::Document,
//!         NodeType::Paragraph,
//!         NodeType::Str,
//!         NodeType::Emphasis,
//!         NodeType::Str,
//!     ]
//! );
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A position (line, column, byte offset) in the source text.
///
/// Lines and columns are 1-based; `offset` is a 0-based byte offset suitable
/// for slicing the original source string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number.
    pub column: usize,
    /// 0-based byte offset in the source string.
    pub offset: usize,
}

impl Position {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open source range defined by a start and end [`Position`].
///
/// `start` is inclusive, `end` is exclusive (one past the last character).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    /// Inclusive start position.
    pub start: Position,
    /// Exclusive end position.
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Byte range of this span, usable for slicing the source.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start.offset..self.end.offset
    }
}

/// The kind of a [`TxtNode`].
///
/// Names match the textlint `ASTNodeTypes` so configuration files can refer to
/// kinds the way textlint users already do (`"Str"`, `"Header"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    Document,
    Paragraph,
    BlockQuote,
    List,
    ListItem,
    Header,
    CodeBlock,
    /// Raw markup, both block-level and inline.
    Html,
    HorizontalRule,
    Str,
    Break,
    Emphasis,
    Strong,
    Link,
    LinkReference,
    Image,
    ImageReference,
    Definition,
    /// Inline code span.
    Code,
    Delete,
    Table,
    TableRow,
    TableCell,
    /// A comment native to the host syntax (not markup). Its `value` is the
    /// comment text without delimiters.
    Comment,
}

impl NodeType {
    /// Every node kind, in declaration order.
    pub const ALL: &'static [NodeType] = &[
        NodeType::Document,
        NodeType::Paragraph,
        NodeType::BlockQuote,
        NodeType::List,
        NodeType::ListItem,
        NodeType::Header,
        NodeType::CodeBlock,
        NodeType::Html,
        NodeType::HorizontalRule,
        NodeType::Str,
        NodeType::Break,
        NodeType::Emphasis,
        NodeType::Strong,
        NodeType::Link,
        NodeType::LinkReference,
        NodeType::Image,
        NodeType::ImageReference,
        NodeType::Definition,
        NodeType::Code,
        NodeType::Delete,
        NodeType::Table,
        NodeType::TableRow,
        NodeType::TableCell,
        NodeType::Comment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Document => "Document",
            NodeType::Paragraph => "Paragraph",
            NodeType::BlockQuote => "BlockQuote",
            NodeType::List => "List",
            NodeType::ListItem => "ListItem",
            NodeType::Header => "Header",
            NodeType::CodeBlock => "CodeBlock",
            NodeType::Html => "Html",
            NodeType::HorizontalRule => "HorizontalRule",
            NodeType::Str => "Str",
            NodeType::Break => "Break",
            NodeType::Emphasis => "Emphasis",
            NodeType::Strong => "Strong",
            NodeType::Link => "Link",
            NodeType::LinkReference => "LinkReference",
            NodeType::Image => "Image",
            NodeType::ImageReference => "ImageReference",
            NodeType::Definition => "Definition",
            NodeType::Code => "Code",
            NodeType::Delete => "Delete",
            NodeType::Table => "Table",
            NodeType::TableRow => "TableRow",
            NodeType::TableCell => "TableCell",
            NodeType::Comment => "Comment",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`NodeType`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown node type '{0}'")]
pub struct UnknownNodeType(pub String);

impl FromStr for NodeType {
    type Err = UnknownNodeType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeType::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownNodeType(s.to_string()))
    }
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxtNode {
    pub node_type: NodeType,
    pub span: Span,
    /// Literal text for leaf kinds (`Str`, `Code`, `CodeBlock`, `Html`, `Comment`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TxtNode>,
}

impl TxtNode {
    /// Create a node without children or value.
    pub fn new(node_type: NodeType, span: Span) -> Self {
        Self {
            node_type,
            span,
            value: None,
            children: Vec::new(),
        }
    }

    /// Create a leaf node carrying a text value.
    pub fn leaf(node_type: NodeType, span: Span, value: impl Into<String>) -> Self {
        Self {
            node_type,
            span,
            value: Some(value.into()),
            children: Vec::new(),
        }
    }

    /// Create a parent node.
    pub fn parent(node_type: NodeType, span: Span, children: Vec<TxtNode>) -> Self {
        Self {
            node_type,
            span,
            value: None,
            children,
        }
    }

    pub fn is(&self, node_type: NodeType) -> bool {
        self.node_type == node_type
    }

    /// The raw source text covered by this node.
    ///
    /// Returns an empty string if the span does not fall on valid boundaries
    /// of `source` (e.g. a node built for a different document).
    pub fn raw<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.span.range()).unwrap_or("")
    }

    /// Depth-first pre-order iterator over this node and all of its
    /// descendants, in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants::new(self)
    }
}

/// Depth-first iterator over a subtree, yielding parents before children.
///
/// Obtained via [`TxtNode::descendants`].
pub struct Descendants<'a> {
    root: Option<&'a TxtNode>,
    stack: Vec<std::slice::Iter<'a, TxtNode>>,
}

impl<'a> Descendants<'a> {
    fn new(root: &'a TxtNode) -> Self {
        Self {
            root: Some(root),
            stack: Vec::new(),
        }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a TxtNode;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.root.take() {
            self.stack.push(root.children.iter());
            return Some(root);
        }

        while let Some(iter) = self.stack.last_mut() {
            if let Some(node) = iter.next() {
                self.stack.push(node.children.iter());
                return Some(node);
            }
            self.stack.pop();
        }
        None
    }
}
