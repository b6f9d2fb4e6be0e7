//! Token stream with pushback for the parser
//!
//! Tokens handed out by [`TokenStream::get_token`] are remembered in a
//! small ring so the parser can push up to [`MAX_PUSHBACK`] of them back.
//! Re-reading a pushed-back token replays it from the ring; the lexer is
//! only asked for tokens that have never been seen.

use crate::lexer::{Lexer, Token};

/// How many tokens can be pushed back at once
pub const MAX_PUSHBACK: usize = 2;

// one extra slot keeps the token in front of the pushed-back ones
const RING_SIZE: usize = MAX_PUSHBACK + 1;

pub struct TokenStream {
    lexer: Lexer,
    ring: [Option<Token>; RING_SIZE],
    cursor: usize,
    behind: usize,
    filled: usize,
}

impl TokenStream {
    pub fn new(lexer: Lexer) -> Self {
        Self {
            lexer,
            ring: std::array::from_fn(|_| None),
            cursor: 0,
            behind: 0,
            filled: 0,
        }
    }

    pub fn filename(&self) -> &str {
        self.lexer.filename()
    }

    /// Next token, replaying pushed-back ones first
    pub fn get_token(&mut self) -> Token {
        self.cursor = (self.cursor + 1) % RING_SIZE;
        if self.behind > 0 {
            self.behind -= 1;
            if let Some(token) = &self.ring[self.cursor] {
                return token.clone();
            }
        }

        let token = self.lexer.next_token();
        self.ring[self.cursor] = Some(token.clone());
        self.filled = (self.filled + 1).min(RING_SIZE);
        token
    }

    /// Push the most recently read token back
    pub fn unget_token(&mut self) {
        let allowed = self.behind < MAX_PUSHBACK && self.behind < self.filled;
        debug_assert!(allowed, "token pushback exceeds buffer depth");
        if !allowed {
            return;
        }
        self.cursor = (self.cursor + RING_SIZE - 1) % RING_SIZE;
        self.behind += 1;
    }

    /// The token most recently returned by `get_token` and not pushed back
    pub fn current_token(&self) -> Option<&Token> {
        self.ring[self.cursor].as_ref()
    }

    /// Look at the next token without consuming it
    pub fn peek_token(&mut self) -> Token {
        let token = self.get_token();
        self.unget_token();
        token
    }
}
