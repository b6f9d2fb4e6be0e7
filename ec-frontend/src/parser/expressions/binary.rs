//! Binary expression parsing with operator precedence

use crate::ast::*;
use crate::lexer::TokenType;
use crate::parser::{ParseResult, Parser};

type Operand = fn(&mut Parser) -> ParseResult<Expression>;
type Operator = fn(&TokenType) -> Option<BinaryOp>;

impl Parser {
    /// Left-associative loop shared by every binary precedence level:
    /// parse an operand, then keep folding `op operand` into the left side
    fn parse_binary_level(&mut self, operand: Operand, operator: Operator) -> ParseResult<Expression> {
        let mut left = operand(self)?;

        loop {
            let token = self.peek();
            let Some(op) = operator(&token.token_type) else {
                return Ok(left);
            };
            self.advance();

            let right = operand(self)?;
            let span = left.span.to(&right.span);
            left = Expression::new(
                ExpressionKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }
    }

    /// Parse logical OR expression
    pub fn parse_logical_or_expression(&mut self) -> ParseResult<Expression> {
        self.parse_binary_level(Self::parse_logical_and_expression, |t| match t {
            TokenType::PipePipe => Some(BinaryOp::LogicalOr),
            _ => None,
        })
    }

    /// Parse logical AND expression
    pub fn parse_logical_and_expression(&mut self) -> ParseResult<Expression> {
        self.parse_binary_level(Self::parse_bitwise_or_expression, |t| match t {
            TokenType::AmpersandAmpersand => Some(BinaryOp::LogicalAnd),
            _ => None,
        })
    }

    /// Parse bitwise OR expression
    pub fn parse_bitwise_or_expression(&mut self) -> ParseResult<Expression> {
        self.parse_binary_level(Self::parse_bitwise_xor_expression, |t| match t {
            TokenType::Pipe => Some(BinaryOp::BitOr),
            _ => None,
        })
    }

    /// Parse bitwise XOR expression
    pub fn parse_bitwise_xor_expression(&mut self) -> ParseResult<Expression> {
        self.parse_binary_level(Self::parse_bitwise_and_expression, |t| match t {
            TokenType::Caret => Some(BinaryOp::BitXor),
            _ => None,
        })
    }

    /// Parse bitwise AND expression
    pub fn parse_bitwise_and_expression(&mut self) -> ParseResult<Expression> {
        self.parse_binary_level(Self::parse_equality_expression, |t| match t {
            TokenType::Ampersand => Some(BinaryOp::BitAnd),
            _ => None,
        })
    }

    /// Parse equality expression
    pub fn parse_equality_expression(&mut self) -> ParseResult<Expression> {
        self.parse_binary_level(Self::parse_relational_expression, |t| match t {
            TokenType::EqualEqual => Some(BinaryOp::Equal),
            TokenType::BangEqual => Some(BinaryOp::NotEqual),
            _ => None,
        })
    }

    /// Parse relational expression
    pub fn parse_relational_expression(&mut self) -> ParseResult<Expression> {
        self.parse_binary_level(Self::parse_shift_expression, |t| match t {
            TokenType::Less => Some(BinaryOp::Less),
            TokenType::Greater => Some(BinaryOp::Greater),
            TokenType::LessEqual => Some(BinaryOp::LessEqual),
            TokenType::GreaterEqual => Some(BinaryOp::GreaterEqual),
            _ => None,
        })
    }

    /// Parse shift expression
    pub fn parse_shift_expression(&mut self) -> ParseResult<Expression> {
        self.parse_binary_level(Self::parse_additive_expression, |t| match t {
            TokenType::LeftShift => Some(BinaryOp::LeftShift),
            TokenType::RightShift => Some(BinaryOp::RightShift),
            _ => None,
        })
    }

    /// Parse additive expression
    pub fn parse_additive_expression(&mut self) -> ParseResult<Expression> {
        self.parse_binary_level(Self::parse_multiplicative_expression, |t| match t {
            TokenType::Plus => Some(BinaryOp::Add),
            TokenType::Minus => Some(BinaryOp::Sub),
            _ => None,
        })
    }

    /// Parse multiplicative expression
    pub fn parse_multiplicative_expression(&mut self) -> ParseResult<Expression> {
        self.parse_binary_level(Self::parse_unary_expression, |t| match t {
            TokenType::Star => Some(BinaryOp::Mul),
            TokenType::Slash => Some(BinaryOp::Div),
            TokenType::Percent => Some(BinaryOp::Mod),
            _ => None,
        })
    }
}
