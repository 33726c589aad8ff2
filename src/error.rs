//! Error types for statement conversion.
//!
//! Every failure is terminal: the converter never writes a partial
//! statement, so each variant carries enough context for the operator
//! to act on it.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for conversion operations.
pub type StatementResult<T> = Result<T, StatementError>;

/// Error type for all extraction and rendering operations.
#[derive(Debug, Error)]
pub enum StatementError {
    /// The input bill does not exist.
    #[error("Input file does not exist: {}", path.display())]
    InputNotFound { path: PathBuf },

    /// Error occurred while reading a file
    #[error("IO error for path '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The PDF backend could not produce page text
    #[error("Text extraction failed for '{}': {reason}", path.display())]
    TextExtraction { path: PathBuf, reason: String },

    /// Nothing in the bill matched the call record layout
    #[error("No call records found in '{}'", path.display())]
    NoRecordsExtracted { path: PathBuf },

    /// The finished statement could not be written
    #[error("Failed to write statement to '{}': {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// printpdf refused to build the document
    #[error("PDF rendering error: {message}")]
    Render { message: String },

    /// Configuration file could not be read or parsed
    #[error("Invalid configuration in '{}': {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    /// Invalid parameters
    #[error("Invalid input for '{parameter}': {reason}")]
    InvalidInput { parameter: String, reason: String },
}

impl StatementError {
    /// Returns true for the "nothing to render" condition, which callers
    /// report rather than treat as a crash.
    pub fn is_no_records(&self) -> bool {
        matches!(self, Self::NoRecordsExtracted { .. })
    }
}

impl From<printpdf::Error> for StatementError {
    fn from(err: printpdf::Error) -> Self {
        Self::Render {
            message: err.to_string(),
        }
    }
}
