//! Prefix operator parsing

use crate::ast::*;
use crate::lexer::TokenType;
use crate::parser::{ParseError, ParseResult, Parser};

impl Parser {
    /// Parse unary expression
    pub fn parse_unary_expression(&mut self) -> ParseResult<Expression> {
        let token = self.peek();
        let op = match token.token_type {
            TokenType::PlusPlus => UnaryOp::PreIncrement,
            TokenType::MinusMinus => UnaryOp::PreDecrement,
            TokenType::Plus => UnaryOp::Plus,
            TokenType::Minus => UnaryOp::Minus,
            TokenType::Bang => UnaryOp::LogicalNot,
            TokenType::Tilde => UnaryOp::BitNot,
            _ => return self.parse_postfix_expression(),
        };
        self.advance();

        let operand = self.parse_unary_expression()?;
        if matches!(op, UnaryOp::PreIncrement | UnaryOp::PreDecrement) && !operand.is_lvalue() {
            return Err(ParseError::syntax(
                format!("operand of '{}' must be a variable", op),
                token.span.start,
            ));
        }

        let span = token.span.to(&operand.span);
        Ok(Expression::new(
            ExpressionKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }
}
