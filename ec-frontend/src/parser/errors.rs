//! Parse error types
//!
//! A `Syntax` error is recorded as a diagnostic and parsing resumes at the
//! next synchronizing token. An `Internal` error means the parser broke one
//! of its own invariants; it aborts the whole parse.

use ec_common::{CompilerError, SourceLocation};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("{message}")]
    Syntax {
        message: String,
        location: SourceLocation,
    },

    #[error("compiler implementation error at {location}: {message}")]
    Internal {
        message: String,
        location: SourceLocation,
    },
}

impl ParseError {
    pub fn syntax(message: impl Into<String>, location: SourceLocation) -> Self {
        ParseError::Syntax {
            message: message.into(),
            location,
        }
    }

    pub fn location(&self) -> &SourceLocation {
        match self {
            ParseError::Syntax { location, .. } | ParseError::Internal { location, .. } => location,
        }
    }
}

impl From<ParseError> for CompilerError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Syntax { message, location } => CompilerError::parse_error(message, location),
            ParseError::Internal { message, location } => {
                CompilerError::internal(format!("{}: {}", location, message))
            }
        }
    }
}
