//! Token definitions for the ec lexer

use ec_common::{SourceLocation, SourceSpan};
use serde::{Deserialize, Serialize};
use std::fmt;

/// ec token types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TokenType {
    // Literals
    IntLiteral(i64),
    FloatLiteral(f64),
    CharLiteral(char),
    StringLiteral(String),

    Identifier(String),

    // Keywords
    Bool, Break, Case, Char, Continue, Default, Do, Double,
    Else, Enum, False, Float, Fn, For, Goto, If,
    Int, Long, Return, Short, String, Switch, True, Var,
    Vardump, Void, While,

    // Operators
    Plus,           // +
    Minus,          // -
    Star,           // *
    Slash,          // /
    Percent,        // %
    Ampersand,      // &
    Pipe,           // |
    Caret,          // ^
    Tilde,          // ~
    Bang,           // !
    Equal,          // =
    Less,           // <
    Greater,        // >
    Colon,          // :

    // Compound operators
    PlusPlus,       // ++
    MinusMinus,     // --
    LeftShift,      // <<
    RightShift,     // >>
    LessEqual,      // <=
    GreaterEqual,   // >=
    EqualEqual,     // ==
    BangEqual,      // !=
    AmpersandAmpersand, // &&
    PipePipe,       // ||

    // Assignment operators
    PlusEqual,      // +=
    MinusEqual,     // -=
    StarEqual,      // *=
    SlashEqual,     // /=

    // Punctuation
    LeftParen,      // (
    RightParen,     // )
    LeftBrace,      // {
    RightBrace,     // }
    LeftBracket,    // [
    RightBracket,   // ]
    Semicolon,      // ;
    Comma,          // ,

    /// Any other single character
    Other(char),

    /// Lexically broken input (unterminated literal, bad number, ...)
    Malformed { lexeme: String, reason: String },

    EndOfFile,
}

/// Keyword spellings, sorted for binary search
static KEYWORDS: [(&str, TokenType); 27] = [
    ("bool", TokenType::Bool),
    ("break", TokenType::Break),
    ("case", TokenType::Case),
    ("char", TokenType::Char),
    ("continue", TokenType::Continue),
    ("default", TokenType::Default),
    ("do", TokenType::Do),
    ("double", TokenType::Double),
    ("else", TokenType::Else),
    ("enum", TokenType::Enum),
    ("false", TokenType::False),
    ("float", TokenType::Float),
    ("fn", TokenType::Fn),
    ("for", TokenType::For),
    ("goto", TokenType::Goto),
    ("if", TokenType::If),
    ("int", TokenType::Int),
    ("long", TokenType::Long),
    ("return", TokenType::Return),
    ("short", TokenType::Short),
    ("string", TokenType::String),
    ("switch", TokenType::Switch),
    ("true", TokenType::True),
    ("var", TokenType::Var),
    ("vardump", TokenType::Vardump),
    ("void", TokenType::Void),
    ("while", TokenType::While),
];

impl TokenType {
    /// Classify a word as a keyword, if it is one
    pub fn keyword(word: &str) -> Option<TokenType> {
        KEYWORDS
            .binary_search_by(|(spelling, _)| (*spelling).cmp(word))
            .ok()
            .map(|index| KEYWORDS[index].1.clone())
    }

    /// Type keywords usable in declarations
    pub fn is_type_keyword(&self) -> bool {
        matches!(
            self,
            TokenType::Bool
                | TokenType::Char
                | TokenType::Short
                | TokenType::Int
                | TokenType::Long
                | TokenType::Float
                | TokenType::Double
                | TokenType::String
                | TokenType::Void
        )
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::IntLiteral(n) => write!(f, "{n}"),
            TokenType::FloatLiteral(x) => write!(f, "{x:?}"),
            TokenType::CharLiteral(c) => write!(f, "'{}'", c.escape_default()),
            TokenType::StringLiteral(s) => write!(f, "\"{}\"", s.escape_default()),
            TokenType::Identifier(s) => write!(f, "{s}"),

            TokenType::Plus => write!(f, "+"),
            TokenType::Minus => write!(f, "-"),
            TokenType::Star => write!(f, "*"),
            TokenType::Slash => write!(f, "/"),
            TokenType::Percent => write!(f, "%"),
            TokenType::Ampersand => write!(f, "&"),
            TokenType::Pipe => write!(f, "|"),
            TokenType::Caret => write!(f, "^"),
            TokenType::Tilde => write!(f, "~"),
            TokenType::Bang => write!(f, "!"),
            TokenType::Equal => write!(f, "="),
            TokenType::Less => write!(f, "<"),
            TokenType::Greater => write!(f, ">"),
            TokenType::Colon => write!(f, ":"),
            TokenType::PlusPlus => write!(f, "++"),
            TokenType::MinusMinus => write!(f, "--"),
            TokenType::LeftShift => write!(f, "<<"),
            TokenType::RightShift => write!(f, ">>"),
            TokenType::LessEqual => write!(f, "<="),
            TokenType::GreaterEqual => write!(f, ">="),
            TokenType::EqualEqual => write!(f, "=="),
            TokenType::BangEqual => write!(f, "!="),
            TokenType::AmpersandAmpersand => write!(f, "&&"),
            TokenType::PipePipe => write!(f, "||"),
            TokenType::PlusEqual => write!(f, "+="),
            TokenType::MinusEqual => write!(f, "-="),
            TokenType::StarEqual => write!(f, "*="),
            TokenType::SlashEqual => write!(f, "/="),
            TokenType::LeftParen => write!(f, "("),
            TokenType::RightParen => write!(f, ")"),
            TokenType::LeftBrace => write!(f, "{{"),
            TokenType::RightBrace => write!(f, "}}"),
            TokenType::LeftBracket => write!(f, "["),
            TokenType::RightBracket => write!(f, "]"),
            TokenType::Semicolon => write!(f, ";"),
            TokenType::Comma => write!(f, ","),

            TokenType::Other(c) => write!(f, "{}", c.escape_default()),
            TokenType::Malformed { lexeme, .. } => write!(f, "{lexeme}"),
            TokenType::EndOfFile => write!(f, "end of file"),

            keyword => {
                let spelling = KEYWORDS
                    .iter()
                    .find(|(_, kind)| kind == keyword)
                    .map(|(spelling, _)| *spelling)
                    .unwrap_or("?");
                write!(f, "{spelling}")
            }
        }
    }
}

/// A token with its source location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub token_type: TokenType,
    pub span: SourceSpan,
}

impl Token {
    pub fn new(token_type: TokenType, span: SourceSpan) -> Self {
        Self { token_type, span }
    }

    pub fn location(&self) -> &SourceLocation {
        &self.span.start
    }

    /// Same variant, ignoring payloads
    pub fn is(&self, token_type: &TokenType) -> bool {
        std::mem::discriminant(&self.token_type) == std::mem::discriminant(token_type)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.token_type, self.span.start)
    }
}
