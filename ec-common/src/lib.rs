//! ec compiler - common types and utilities
//!
//! Shared pieces used by the front end and the driver: source locations,
//! the compiler error type, the capped diagnostics reporter, data types
//! and the symbol table.

pub mod error;
pub mod types;
pub mod source_loc;

pub use error::{CompilerError, Diagnostic, ErrorReporter};
pub use types::*;
pub use source_loc::{SourceLocation, SourceSpan, SourceTracker};
