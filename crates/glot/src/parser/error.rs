//! Parse error types.

use thiserror::Error;

/// An error that occurred during parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A syntax error with location information.
    #[error("syntax error in {construct} at {line}:{column}: {message}")]
    Syntax {
        /// The grammar construct being parsed (`parameter`, `switch`, ...).
        construct: String,
        /// Byte offset into the pattern.
        offset: usize,
        line: usize,
        column: usize,
        message: String,
    },
}

impl ParseError {
    /// Byte offset of the error in the pattern text.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::Syntax { offset, .. } => *offset,
        }
    }

    pub fn construct(&self) -> &str {
        match self {
            ParseError::Syntax { construct, .. } => construct,
        }
    }
}
