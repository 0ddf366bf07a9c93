//! Error types for demo-manual-rs.

use thiserror::Error;

/// The main error type for demo-manual-rs operations.
///
/// Only loading and configuration can fail. Browsing itself never returns an
/// error: malformed markers become [`ParseWarning`]s and unresolvable lines
/// fall back to the root of the table of contents.
#[derive(Error, Debug)]
pub enum BrowserError {
    /// The marker name is empty.
    #[error("invalid marker '{0}': marker name must not be empty")]
    InvalidMarker(String),

    /// The options failed validation.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// The marker regex could not be built.
    #[error("marker pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for demo-manual-rs operations.
pub type Result<T> = std::result::Result<T, BrowserError>;

/// A recoverable problem found while indexing a source file.
///
/// Warnings are recorded and logged, the offending tag is skipped, and
/// indexing carries on with the rest of the file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A marker whose string literal is not closed on its line.
    #[error("line {line}: unterminated marker tag")]
    UnterminatedTag { line: usize },

    /// A marker whose tag is empty or has no path segment.
    #[error("line {line}: empty marker tag")]
    EmptyTag { line: usize },

    /// A tag path that already names a section.
    #[error("line {line}: duplicate section '{path}'")]
    DuplicatePath { line: usize, path: String },
}

impl ParseWarning {
    /// Returns the 1-based line the warning refers to.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::UnterminatedTag { line }
            | Self::EmptyTag { line }
            | Self::DuplicatePath { line, .. } => *line,
        }
    }
}
