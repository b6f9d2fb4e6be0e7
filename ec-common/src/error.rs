//! Error handling for the ec compiler
//!
//! `CompilerError` is the error that crosses crate boundaries. Recoverable
//! problems in the source program are not errors in this sense: they are
//! recorded as [`Diagnostic`]s in an [`ErrorReporter`] and compilation keeps
//! going so that several of them can be reported in one run.

use crate::source_loc::SourceLocation;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Number of diagnostics kept before further ones are only counted
pub const DEFAULT_ERROR_LIMIT: usize = 5;

/// Main compiler error type that encompasses all phases of compilation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompilerError {
    #[error("Parse error at {location}: {message}")]
    ParseError {
        location: SourceLocation,
        message: String,
    },

    #[error("Code generation error: {message}")]
    CodegenError { message: String },

    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("compilation failed with {errors} error(s)")]
    Rejected { errors: usize },

    #[error("Internal compiler error: {message}")]
    InternalError { message: String },
}

impl CompilerError {
    pub fn parse_error(message: String, location: SourceLocation) -> Self {
        CompilerError::ParseError { location, message }
    }

    pub fn codegen_error(message: String) -> Self {
        CompilerError::CodegenError { message }
    }

    pub fn internal(message: String) -> Self {
        CompilerError::InternalError { message }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for CompilerError {
    fn from(err: std::io::Error) -> Self {
        CompilerError::IoError {
            message: err.to_string(),
        }
    }
}

/// A recorded problem in the source program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub message: String,
    pub location: SourceLocation,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            message: message.into(),
            location,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "*  {}: {}: {}",
            self.location.filename, self.location.line, self.message
        )
    }
}

/// Bounded collector of diagnostics.
///
/// The first `limit` errors are stored verbatim; later ones only bump the
/// suppressed counter so a badly broken input cannot flood the output.
#[derive(Debug, Clone)]
pub struct ErrorReporter {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
    limit: usize,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_ERROR_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            diagnostics: Vec::new(),
            error_count: 0,
            limit,
        }
    }

    /// Report an error diagnostic
    pub fn error(&mut self, message: impl Into<String>, location: SourceLocation) {
        self.error_count += 1;
        if self.diagnostics.len() < self.limit {
            self.diagnostics.push(Diagnostic::new(message, location));
        }
    }

    /// Check if any errors have been reported
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Total number of errors, stored or not
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Errors that were counted but not stored
    pub fn suppressed_count(&self) -> usize {
        self.error_count - self.diagnostics.len()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Get the stored diagnostics
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Print all diagnostics to stderr
    pub fn print_diagnostics(&self) {
        eprint!("{}", self.render());
    }

    /// Render the stored diagnostics plus the overflow line, if any
    pub fn render(&self) -> String {
        let mut out = String::new();
        for diagnostic in &self.diagnostics {
            out.push_str(&diagnostic.to_string());
            out.push('\n');
        }
        let suppressed = self.suppressed_count();
        if suppressed > 0 {
            out.push_str(&format!("*  {} more error(s) found\n", suppressed));
        }
        out
    }

    /// Create a summary string
    pub fn summary(&self) -> String {
        match self.error_count {
            0 => "No errors".to_string(),
            1 => "1 error".to_string(),
            e => format!("{} errors", e),
        }
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}
