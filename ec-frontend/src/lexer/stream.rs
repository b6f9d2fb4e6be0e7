//! Character stream with bounded pushback
//!
//! Characters come either from an in-memory string or from a buffered file
//! reader. Every character handed out is also written into a small ring
//! (the lookback bucket) together with the position it was read at, so the
//! lexer can push characters back and re-read them without touching the
//! underlying source again.

use ec_common::{CompilerError, SourceLocation, SourceTracker};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Slots in the lookback ring. At most `LOOKBACK_SIZE - 1` characters can
/// be pushed back at once.
pub const LOOKBACK_SIZE: usize = 32;

#[derive(Debug, Clone, Copy, Default)]
struct Slot {
    ch: char,
    line: u32,
    column: u32,
}

enum Input {
    Text {
        chars: Vec<char>,
        index: usize,
    },
    File {
        reader: BufReader<File>,
        line: Vec<char>,
        index: usize,
    },
}

impl Input {
    fn read(&mut self) -> Option<char> {
        match self {
            Input::Text { chars, index } => {
                let ch = chars.get(*index).copied()?;
                *index += 1;
                Some(ch)
            }
            Input::File {
                reader,
                line,
                index,
            } => {
                if *index >= line.len() {
                    let mut buf = String::new();
                    match reader.read_line(&mut buf) {
                        Ok(0) => return None,
                        Ok(_) => {
                            *line = buf.chars().collect();
                            *index = 0;
                        }
                        Err(err) => {
                            log::warn!("read error, treating as end of input: {}", err);
                            return None;
                        }
                    }
                }
                let ch = line.get(*index).copied()?;
                *index += 1;
                Some(ch)
            }
        }
    }
}

/// Source of raw characters for the lexer
pub struct Stream {
    input: Input,
    tracker: SourceTracker,
    bucket: [Slot; LOOKBACK_SIZE],
    /// Slot of the most recently handed out character
    cursor: usize,
    /// Characters pushed back and waiting to be re-read
    behind: usize,
    /// Slots holding real characters (saturates at `LOOKBACK_SIZE`)
    filled: usize,
}

impl Stream {
    fn with_input(input: Input, filename: &str) -> Self {
        Self {
            input,
            tracker: SourceTracker::new(filename),
            bucket: [Slot::default(); LOOKBACK_SIZE],
            cursor: 0,
            behind: 0,
            filled: 0,
        }
    }

    /// Stream over an in-memory string
    pub fn open_string(text: &str) -> Self {
        Self::named_string(text, "<input>")
    }

    /// Stream over an in-memory string, reporting locations under `filename`
    pub fn named_string(text: &str, filename: &str) -> Self {
        Self::with_input(
            Input::Text {
                chars: text.chars().collect(),
                index: 0,
            },
            filename,
        )
    }

    /// Stream over a file on disk
    pub fn open_file(path: impl AsRef<Path>) -> Result<Self, CompilerError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| CompilerError::IoError {
            message: format!("cannot open {}: {}", path.display(), err),
        })?;
        log::debug!("opened {}", path.display());
        Ok(Self::with_input(
            Input::File {
                reader: BufReader::new(file),
                line: Vec::new(),
                index: 0,
            },
            &path.display().to_string(),
        ))
    }

    pub fn filename(&self) -> &str {
        self.tracker.filename()
    }

    /// Position of the next character to be read
    pub fn location(&self) -> SourceLocation {
        self.tracker.location()
    }

    pub fn line(&self) -> u32 {
        self.tracker.line()
    }

    /// Next character, or `None` at end of input
    pub fn next_char(&mut self) -> Option<char> {
        if self.behind > 0 {
            self.behind -= 1;
            self.cursor = (self.cursor + 1) % LOOKBACK_SIZE;
            let slot = self.bucket[self.cursor];
            self.tracker.seek(slot.line, slot.column);
            self.tracker.advance(slot.ch);
            return Some(slot.ch);
        }

        let ch = self.input.read()?;
        self.cursor = (self.cursor + 1) % LOOKBACK_SIZE;
        self.bucket[self.cursor] = Slot {
            ch,
            line: self.tracker.line(),
            column: self.tracker.column(),
        };
        self.filled = (self.filled + 1).min(LOOKBACK_SIZE);
        self.tracker.advance(ch);
        Some(ch)
    }

    /// Push the most recently read character back onto the stream
    pub fn unget_char(&mut self) {
        let allowed = self.behind < self.filled && self.behind + 1 < LOOKBACK_SIZE;
        debug_assert!(allowed, "pushback exceeds lookback depth");
        if !allowed {
            return;
        }

        let slot = self.bucket[self.cursor];
        self.tracker.seek(slot.line, slot.column);
        self.cursor = (self.cursor + LOOKBACK_SIZE - 1) % LOOKBACK_SIZE;
        self.behind += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_all_characters_then_none() {
        let mut stream = Stream::open_string("ab");
        assert_eq!(stream.next_char(), Some('a'));
        assert_eq!(stream.next_char(), Some('b'));
        assert_eq!(stream.next_char(), None);
        assert_eq!(stream.next_char(), None);
    }

    #[test]
    fn unget_returns_previous_character() {
        let mut stream = Stream::open_string("xyz");
        stream.next_char();
        assert_eq!(stream.next_char(), Some('y'));
        stream.unget_char();
        assert_eq!(stream.next_char(), Some('y'));
        assert_eq!(stream.next_char(), Some('z'));
    }

    #[test]
    fn multi_level_unget() {
        let mut stream = Stream::open_string("abcdef");
        for _ in 0..4 {
            stream.next_char();
        }
        stream.unget_char();
        stream.unget_char();
        stream.unget_char();
        assert_eq!(stream.next_char(), Some('b'));
        assert_eq!(stream.next_char(), Some('c'));
        assert_eq!(stream.next_char(), Some('d'));
        assert_eq!(stream.next_char(), Some('e'));
    }

    #[test]
    fn unget_restores_line_and_column() {
        let mut stream = Stream::open_string("a\nb");
        stream.next_char();
        stream.next_char();
        assert_eq!(stream.location(), SourceLocation::new("<input>", 2, 1));
        stream.unget_char();
        assert_eq!(stream.location(), SourceLocation::new("<input>", 1, 2));
        assert_eq!(stream.next_char(), Some('\n'));
        assert_eq!(stream.next_char(), Some('b'));
        assert_eq!(stream.location(), SourceLocation::new("<input>", 2, 2));
    }

    #[test]
    fn ring_wraps_around() {
        let text: String = (0..100).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let mut stream = Stream::open_string(&text);
        for _ in 0..70 {
            stream.next_char();
        }
        for _ in 0..(LOOKBACK_SIZE - 1) {
            stream.unget_char();
        }
        let replay: String = (0..(LOOKBACK_SIZE - 1)).filter_map(|_| stream.next_char()).collect();
        assert_eq!(replay, text[(70 - (LOOKBACK_SIZE - 1))..70]);
    }

    #[test]
    fn reads_from_file() {
        let path = std::env::temp_dir().join(format!("ec_stream_test_{}.ec", std::process::id()));
        {
            let mut file = File::create(&path).unwrap();
            write!(file, "ab\ncd").unwrap();
        }
        let mut stream = Stream::open_file(&path).unwrap();
        let text: String = std::iter::from_fn(|| stream.next_char()).collect();
        assert_eq!(text, "ab\ncd");
        assert_eq!(stream.line(), 2);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = Stream::open_file("/definitely/not/here.ec");
        assert!(matches!(result, Err(CompilerError::IoError { .. })));
    }
}
