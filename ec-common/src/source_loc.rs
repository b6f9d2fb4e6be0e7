//! Source location tracking for diagnostics
//!
//! Lines and columns are 1-based. A newline moves to the next line and
//! resets the column.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A location in a source file (line and column are 1-based)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub filename: String,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(filename: &str, line: u32, column: u32) -> Self {
        Self {
            filename: filename.to_string(),
            line,
            column,
        }
    }

    /// Location in an anonymous in-memory source
    pub fn new_simple(line: u32, column: u32) -> Self {
        Self::new("<input>", line, column)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.column)
    }
}

/// A span in a source file (from start to end location)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpan {
    pub start: SourceLocation,
    pub end: SourceLocation,
}

impl SourceSpan {
    pub fn new(start: SourceLocation, end: SourceLocation) -> Self {
        Self { start, end }
    }

    /// Create a span from a single location
    pub fn from_location(location: SourceLocation) -> Self {
        Self {
            end: location.clone(),
            start: location,
        }
    }

    /// Span covering `self` through the end of `other`
    pub fn to(&self, other: &SourceSpan) -> SourceSpan {
        SourceSpan::new(self.start.clone(), other.end.clone())
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            if self.start.column == self.end.column {
                write!(f, "{}:{}", self.start.filename, self.start.line)
            } else {
                write!(
                    f,
                    "{}:{}:{}-{}",
                    self.start.filename, self.start.line, self.start.column, self.end.column
                )
            }
        } else {
            write!(
                f,
                "{}:{}:{}-{}:{}",
                self.start.filename, self.start.line, self.start.column, self.end.line, self.end.column
            )
        }
    }
}

/// Line/column counter driven one character at a time.
///
/// The character stream moves it forward with [`SourceTracker::advance`]
/// and rewinds it with [`SourceTracker::seek`] when characters are pushed
/// back.
#[derive(Debug, Clone)]
pub struct SourceTracker {
    filename: String,
    line: u32,
    column: u32,
}

impl SourceTracker {
    pub fn new(filename: &str) -> Self {
        Self {
            filename: filename.to_string(),
            line: 1,
            column: 1,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    /// Get current location
    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(&self.filename, self.line, self.column)
    }

    /// Advance by one character
    pub fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    /// Jump back to a previously recorded position
    pub fn seek(&mut self, line: u32, column: u32) {
        self.line = line;
        self.column = column;
    }

    /// Create a span from a start location to current location
    pub fn span_from(&self, start: SourceLocation) -> SourceSpan {
        SourceSpan::new(start, self.location())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_location() {
        let loc = SourceLocation::new("test.ec", 42, 10);
        assert_eq!(loc.filename, "test.ec");
        assert_eq!(loc.line, 42);
        assert_eq!(loc.column, 10);
        assert_eq!(format!("{}", loc), "test.ec:42:10");
    }

    #[test]
    fn test_source_span_same_line() {
        let start = SourceLocation::new("test.ec", 1, 5);
        let end = SourceLocation::new("test.ec", 1, 10);
        let span = SourceSpan::new(start, end);

        assert_eq!(format!("{}", span), "test.ec:1:5-10");
    }

    #[test]
    fn test_source_span_different_lines() {
        let start = SourceLocation::new("test.ec", 1, 5);
        let end = SourceLocation::new("test.ec", 3, 10);
        let span = SourceSpan::new(start, end);

        assert_eq!(format!("{}", span), "test.ec:1:5-3:10");
    }

    #[test]
    fn test_span_to() {
        let left = SourceSpan::new(
            SourceLocation::new("a.ec", 1, 1),
            SourceLocation::new("a.ec", 1, 2),
        );
        let right = SourceSpan::new(
            SourceLocation::new("a.ec", 2, 4),
            SourceLocation::new("a.ec", 2, 9),
        );
        let joined = left.to(&right);
        assert_eq!(joined.start.line, 1);
        assert_eq!(joined.end.line, 2);
        assert_eq!(joined.end.column, 9);
    }

    #[test]
    fn test_source_tracker_newline_resets_column() {
        let mut tracker = SourceTracker::new("test.ec");

        let start_loc = tracker.location();
        assert_eq!((start_loc.line, start_loc.column), (1, 1));

        tracker.advance('h');
        tracker.advance('i');
        tracker.advance('\n');
        tracker.advance('t');

        assert_eq!(tracker.line(), 2);
        assert_eq!(tracker.column(), 2);

        let span = tracker.span_from(start_loc);
        assert_eq!(span.start.line, 1);
        assert_eq!(span.end.line, 2);
    }

    #[test]
    fn test_source_tracker_seek() {
        let mut tracker = SourceTracker::new("test.ec");
        tracker.advance('a');
        tracker.advance('\n');
        tracker.seek(1, 2);
        assert_eq!(tracker.location(), SourceLocation::new("test.ec", 1, 2));
    }
}
