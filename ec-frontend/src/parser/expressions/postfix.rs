//! Postfix expression parsing: `++`/`--`, calls and subscripts

use crate::ast::*;
use crate::lexer::TokenType;
use crate::parser::{ParseError, ParseResult, Parser};

impl Parser {
    /// Parse postfix expression
    pub fn parse_postfix_expression(&mut self) -> ParseResult<Expression> {
        let mut expr = self.parse_primary_expression()?;

        loop {
            let token = self.peek();
            match token.token_type {
                TokenType::PlusPlus | TokenType::MinusMinus => {
                    self.advance();
                    let op = if token.token_type == TokenType::PlusPlus {
                        UnaryOp::PostIncrement
                    } else {
                        UnaryOp::PostDecrement
                    };
                    if !expr.is_lvalue() {
                        return Err(ParseError::syntax(
                            format!("operand of '{}' must be a variable", op),
                            token.span.start,
                        ));
                    }
                    let span = expr.span.to(&token.span);
                    expr = Expression::new(
                        ExpressionKind::Unary {
                            op,
                            operand: Box::new(expr),
                        },
                        span,
                    );
                }
                TokenType::LeftParen => {
                    self.advance();
                    let arguments = self.parse_argument_list()?;
                    let close = self.require(TokenType::RightParen)?;
                    let span = expr.span.to(&close.span);
                    expr = Expression::new(
                        ExpressionKind::Call {
                            function: Box::new(expr),
                            arguments,
                        },
                        span,
                    );
                }
                TokenType::LeftBracket => {
                    self.advance();
                    let index = self.parse_expression()?;
                    let close = self.require(TokenType::RightBracket)?;
                    let span = expr.span.to(&close.span);
                    expr = Expression::new(
                        ExpressionKind::Index {
                            array: Box::new(expr),
                            index: Box::new(index),
                        },
                        span,
                    );
                }
                _ => return Ok(expr),
            }
        }
    }

    /// Comma-separated call arguments; the `(` is already consumed and the
    /// `)` is left for the caller
    fn parse_argument_list(&mut self) -> ParseResult<Vec<Expression>> {
        let mut arguments = Vec::new();
        if self.check(&TokenType::RightParen) {
            return Ok(arguments);
        }

        loop {
            arguments.push(self.parse_assignment_expression()?);
            if !self.expect(&TokenType::Comma) {
                return Ok(arguments);
            }
        }
    }
}
