//! Error types for the txtlint document parsers.

use thiserror::Error;

/// An error that occurs while producing a document tree.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// The Markdown parser rejected the input.
    #[error("Failed to parse markdown: {0}")]
    Markdown(String),

    /// A file could not be read from disk.
    #[error("Failed to read file: {0}")]
    IoError(String),
}

/// Result type alias for parser operations
pub type ParseResult<T> = Result<T, ParseError>;
