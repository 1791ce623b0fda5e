//! txtlint: lint Markdown and plain text documents.
//!
//! Documents are parsed into a [`parser::ast::TxtNode`] tree, lint rules
//! report [`LintError`]s against it, and filter rules such as
//! [`filter::DisableNextLine`] mark ranges whose diagnostics are dropped.
//!
//! ```
//! use txtlint::lint_source;
//! use txtlint::parser::DocumentKind;
//! use txtlint::Linter;
//!
//! let source = "<!-- disable-next-line -->\nTODO: skipped\n\nTODO: reported\n";
//! let result = lint_source(&Linter::with_default_rules(), source, DocumentKind::Markdown).unwrap();
//! assert_eq!(result.errors.len(), 1);
//! assert_eq!(result.ignored_count, 1);
//! ```

pub mod config;
pub mod directive;
pub mod filter;
pub mod ignore;
pub mod linter;
pub mod reporter;
pub mod rules;

pub use txtlint_parser as parser;

pub use config::{Color, ColorConfig, ColorMode, ConfigError, LintConfig};
pub use filter::{DisableNextLine, DisableNextLineOptions, FilterContext, FilterRule};
pub use ignore::{FilterResult, IgnoreRange, IgnoreTracker, RuleScope};
pub use linter::{LintError, LintRule, Linter, Severity};
pub use parser::{DocumentKind, parse_file, parse_markdown, parse_string, parse_text};
pub use reporter::{OutputFormat, Reporter};

use parser::error::ParseResult;

/// Parse `source` as `kind` and lint it, applying every registered filter
pub fn lint_source(linter: &Linter, source: &str, kind: DocumentKind) -> ParseResult<FilterResult> {
    let document = parse_string(source, kind)?;
    let (errors, ignored_count) = linter.lint_with_filters(&document, source);
    Ok(FilterResult {
        errors,
        ignored_count,
    })
}
