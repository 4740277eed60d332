use alloc::string::String;

use thiserror::Error;

/// Errors surfaced by a parse.
///
/// Syntax errors carry the line and column of the offending character (or
/// one past it, for end-of-input conditions). Shape errors (required fields,
/// incompatible scalars, list sizes) are raised at the scope boundary where
/// they are detected and carry no location.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The caller-supplied expected type cannot drive a parse (for example a
    /// union with map-like members).
    #[error("unsupported expected type '{0}'")]
    UnsupportedType(String),

    /// The underlying reader failed; carries the upstream message.
    #[error("error reading JSON document: {0}")]
    ReaderFailure(String),

    /// A lexical or structural error in the input.
    #[error("{message} at line: {line} column: {column}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },

    /// A required field of the expected record was absent when its scope
    /// closed.
    #[error("required field '{0}' not present in JSON")]
    RequiredFieldNotPresent(String),

    /// A lexeme could not be coerced to the expected scalar type.
    #[error("incompatible value '{value}' for type '{expected}'")]
    IncompatibleValue { value: String, expected: String },

    /// A closed array or tuple received the wrong number of elements.
    #[error("size mismatch between expected list size {expected} and JSON list size {actual}")]
    ListSizeMismatch { expected: usize, actual: usize },

    /// The document ended in a state that does not form a complete value.
    #[error("invalid JSON document")]
    InvalidDocument,
}

impl ParseError {
    /// Returns the `(line, column)` of a syntax error, if this is one.
    #[must_use]
    pub fn location(&self) -> Option<(usize, usize)> {
        match self {
            ParseError::Syntax { line, column, .. } => Some((*line, *column)),
            _ => None,
        }
    }
}
