//! Assignment expression parsing

use crate::ast::*;
use crate::lexer::TokenType;
use crate::parser::{ParseError, ParseResult, Parser};

impl Parser {
    fn parse_assignment_operator(token_type: &TokenType) -> Option<BinaryOp> {
        match token_type {
            TokenType::Equal => Some(BinaryOp::Assign),
            TokenType::PlusEqual => Some(BinaryOp::AddAssign),
            TokenType::MinusEqual => Some(BinaryOp::SubAssign),
            TokenType::StarEqual => Some(BinaryOp::MulAssign),
            TokenType::SlashEqual => Some(BinaryOp::DivAssign),
            _ => None,
        }
    }

    /// Parse assignment expression (right-associative)
    pub fn parse_assignment_expression(&mut self) -> ParseResult<Expression> {
        let target = self.parse_logical_or_expression()?;

        let token = self.peek();
        let Some(op) = Self::parse_assignment_operator(&token.token_type) else {
            return Ok(target);
        };
        self.advance();

        if !target.is_lvalue() {
            return Err(ParseError::syntax("invalid assignment target", token.span.start));
        }

        let value = self.parse_assignment_expression()?;
        let span = target.span.to(&value.span);
        Ok(Expression::new(
            ExpressionKind::Assignment {
                op,
                target: Box::new(target),
                value: Box::new(value),
            },
            span,
        ))
    }
}
