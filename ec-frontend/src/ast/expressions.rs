//! Expression AST nodes

use super::ops::{BinaryOp, UnaryOp};
use ec_common::{SourceSpan, SymbolId};
use serde::{Deserialize, Serialize};

/// AST Expression nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub span: SourceSpan,
}

impl Expression {
    pub fn new(kind: ExpressionKind, span: SourceSpan) -> Self {
        Self { kind, span }
    }

    /// Can appear on the left of an assignment or under `++`/`--`
    pub fn is_lvalue(&self) -> bool {
        matches!(
            self.kind,
            ExpressionKind::Identifier { .. } | ExpressionKind::Index { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExpressionKind {
    IntLiteral(i64),
    FloatLiteral(f64),
    CharLiteral(char),
    BoolLiteral(bool),

    /// String literal, interned in the symbol table under its C spelling
    StringLiteral {
        value: String,
        symbol_id: SymbolId,
    },

    /// Identifier reference
    Identifier {
        name: String,
        symbol_id: SymbolId,
    },

    /// Binary operation
    Binary {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },

    /// Plain or compound assignment
    Assignment {
        op: BinaryOp,
        target: Box<Expression>,
        value: Box<Expression>,
    },

    /// Unary operation
    Unary {
        op: UnaryOp,
        operand: Box<Expression>,
    },

    /// Function call
    Call {
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },

    /// Array subscript
    Index {
        array: Box<Expression>,
        index: Box<Expression>,
    },
}

/// Right-hand side of a declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Initializer {
    Expression(Expression),
    /// Brace-delimited list for arrays
    List(Vec<Expression>),
}

/// C spelling of a string literal, quotes included. Also the key string
/// literals are interned under in the symbol table.
pub fn c_quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        match ch {
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            ch if ch.is_ascii_control() => quoted.push_str(&format!("\\{:03o}", ch as u32)),
            ch => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}
