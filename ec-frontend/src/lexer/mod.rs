//! ec lexer
//!
//! Turns the character stream into tokens with a hand-written state
//! machine: whitespace and comments are skipped, then the first character
//! of a token decides which scanner runs. Lexical problems never stop the
//! lexer; they come out as `TokenType::Malformed` tokens for the parser to
//! report.

pub mod buffer;
pub mod literals;
pub mod operators;
pub mod stream;
pub mod token;

pub use buffer::{TokenStream, MAX_PUSHBACK};
pub use stream::{Stream, LOOKBACK_SIZE};
pub use token::{Token, TokenType};

use ec_common::{CompilerError, SourceSpan};
use std::path::Path;

/// ec lexer
pub struct Lexer {
    pub(crate) stream: Stream,
}

impl Lexer {
    /// Create a lexer over an in-memory source
    pub fn new(input: &str) -> Self {
        Self::from_stream(Stream::open_string(input))
    }

    /// In-memory source whose locations are reported under `filename`
    pub fn with_filename(input: &str, filename: &str) -> Self {
        Self::from_stream(Stream::named_string(input, filename))
    }

    /// Create a lexer reading from a file
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CompilerError> {
        Ok(Self::from_stream(Stream::open_file(path)?))
    }

    pub fn from_stream(stream: Stream) -> Self {
        Self { stream }
    }

    pub fn filename(&self) -> &str {
        self.stream.filename()
    }

    /// Read the next character if it satisfies `accept`, otherwise leave it
    pub(crate) fn next_if(&mut self, accept: impl Fn(char) -> bool) -> Option<char> {
        match self.stream.next_char() {
            Some(ch) if accept(ch) => Some(ch),
            Some(_) => {
                self.stream.unget_char();
                None
            }
            None => None,
        }
    }

    fn lex_identifier(&mut self, first: char) -> TokenType {
        let mut word = String::new();
        word.push(first);
        while let Some(ch) = self.next_if(is_identifier_char) {
            word.push(ch);
        }

        TokenType::keyword(&word).unwrap_or(TokenType::Identifier(word))
    }

    /// Get next token
    pub fn next_token(&mut self) -> Token {
        loop {
            let start = self.stream.location();
            let Some(ch) = self.stream.next_char() else {
                return Token::new(TokenType::EndOfFile, SourceSpan::from_location(start));
            };

            let token_type = match ch {
                c if c.is_whitespace() => continue,

                '/' => match self.stream.next_char() {
                    Some('/') => {
                        self.skip_line_comment();
                        continue;
                    }
                    Some('*') => {
                        if self.skip_block_comment() {
                            continue;
                        }
                        TokenType::Malformed {
                            lexeme: "/*".to_string(),
                            reason: "unterminated block comment".to_string(),
                        }
                    }
                    Some('=') => TokenType::SlashEqual,
                    Some(_) => {
                        self.stream.unget_char();
                        TokenType::Slash
                    }
                    None => TokenType::Slash,
                },

                '"' => self.lex_string(),
                '\'' => self.lex_char(),

                c if c.is_ascii_digit() => self.lex_number(c),
                '.' => {
                    if self.next_if(|c| c.is_ascii_digit()).is_some() {
                        self.stream.unget_char();
                        self.lex_number('.')
                    } else {
                        TokenType::Other('.')
                    }
                }

                c if c.is_ascii_alphabetic() || c == '_' => self.lex_identifier(c),

                c => self.lex_operator(c),
            };

            let token = Token::new(token_type, SourceSpan::new(start, self.stream.location()));
            log::trace!("lexed {}", token);
            return token;
        }
    }

    /// Tokenize the whole input, including the final `EndOfFile`
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.token_type == TokenType::EndOfFile;
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }
}

pub(crate) fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}
