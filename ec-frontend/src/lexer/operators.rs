//! Operator and comment scanning for the ec lexer

use crate::lexer::{Lexer, TokenType};

impl Lexer {
    /// Skip to the end of a `//` comment (the newline itself is left)
    pub(crate) fn skip_line_comment(&mut self) {
        while self.next_if(|c| c != '\n').is_some() {}
    }

    /// Skip the rest of a `/* */` comment; false if the input ended first
    pub(crate) fn skip_block_comment(&mut self) -> bool {
        let mut star = false;
        while let Some(ch) = self.stream.next_char() {
            if star && ch == '/' {
                return true;
            }
            star = ch == '*';
        }
        false
    }

    /// Commit to a two-character operator when the next character is one
    /// of `pairs`, otherwise retract it and settle for `single`
    fn one_or_two(&mut self, pairs: &[(char, TokenType)], single: TokenType) -> TokenType {
        if let Some(next) = self.stream.next_char() {
            if let Some((_, token_type)) = pairs.iter().find(|(c, _)| *c == next) {
                return token_type.clone();
            }
            self.stream.unget_char();
        }
        single
    }

    /// Operators and punctuation (the first character is already read)
    pub(crate) fn lex_operator(&mut self, ch: char) -> TokenType {
        match ch {
            '+' => self.one_or_two(
                &[('+', TokenType::PlusPlus), ('=', TokenType::PlusEqual)],
                TokenType::Plus,
            ),
            '-' => self.one_or_two(
                &[('-', TokenType::MinusMinus), ('=', TokenType::MinusEqual)],
                TokenType::Minus,
            ),
            '*' => self.one_or_two(&[('=', TokenType::StarEqual)], TokenType::Star),
            '=' => self.one_or_two(&[('=', TokenType::EqualEqual)], TokenType::Equal),
            '!' => self.one_or_two(&[('=', TokenType::BangEqual)], TokenType::Bang),
            '<' => self.one_or_two(
                &[('=', TokenType::LessEqual), ('<', TokenType::LeftShift)],
                TokenType::Less,
            ),
            '>' => self.one_or_two(
                &[('=', TokenType::GreaterEqual), ('>', TokenType::RightShift)],
                TokenType::Greater,
            ),
            '&' => self.one_or_two(&[('&', TokenType::AmpersandAmpersand)], TokenType::Ampersand),
            '|' => self.one_or_two(&[('|', TokenType::PipePipe)], TokenType::Pipe),
            '%' => TokenType::Percent,
            '^' => TokenType::Caret,
            '~' => TokenType::Tilde,
            ':' => TokenType::Colon,
            '(' => TokenType::LeftParen,
            ')' => TokenType::RightParen,
            '{' => TokenType::LeftBrace,
            '}' => TokenType::RightBrace,
            '[' => TokenType::LeftBracket,
            ']' => TokenType::RightBracket,
            ';' => TokenType::Semicolon,
            ',' => TokenType::Comma,
            other => TokenType::Other(other),
        }
    }
}
