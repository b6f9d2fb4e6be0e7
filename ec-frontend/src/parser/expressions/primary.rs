//! Primary expression parsing

use crate::ast::*;
use crate::lexer::TokenType;
use crate::parser::{ParseError, ParseResult, Parser};
use ec_common::{DataType, SymbolKind};

impl Parser {
    /// Parse primary expression
    pub fn parse_primary_expression(&mut self) -> ParseResult<Expression> {
        let token = self.advance();
        let span = token.span.clone();

        let kind = match token.token_type {
            TokenType::IntLiteral(value) => ExpressionKind::IntLiteral(value),
            TokenType::FloatLiteral(value) => ExpressionKind::FloatLiteral(value),
            TokenType::CharLiteral(value) => ExpressionKind::CharLiteral(value),
            TokenType::True => ExpressionKind::BoolLiteral(true),
            TokenType::False => ExpressionKind::BoolLiteral(false),
            TokenType::StringLiteral(value) => {
                let quoted = c_quote(&value);
                let symbol_id = self.symbols.add(&quoted, SymbolKind::StringLiteral);
                // Quoted names never collide with identifiers, so any other
                // type here is a parser bug
                if let Err(conflict) = self.symbols.set_type(symbol_id, DataType::String, false) {
                    return Err(ParseError::Internal {
                        message: format!(
                            "string literal {} already typed {}",
                            quoted, conflict.existing
                        ),
                        location: span.start.clone(),
                    });
                }
                ExpressionKind::StringLiteral { value, symbol_id }
            }
            TokenType::Identifier(name) => {
                let symbol_id = self.resolve_identifier(&name, &token.span.start)?;
                ExpressionKind::Identifier { name, symbol_id }
            }
            TokenType::LeftParen => {
                let inner = self.parse_expression()?;
                let close = self.require(TokenType::RightParen)?;
                return Ok(Expression::new(inner.kind, span.to(&close.span)));
            }
            _ => {
                self.tokens.unget_token();
                return Err(self.unexpected(&token, "an expression"));
            }
        };

        Ok(Expression::new(kind, span))
    }

    /// Look up a name used in an expression. A name that is not known yet
    /// is accepted only as a callee and registered as a function.
    fn resolve_identifier(
        &mut self,
        name: &str,
        location: &ec_common::SourceLocation,
    ) -> ParseResult<ec_common::SymbolId> {
        match self.symbols.lookup(name) {
            Some(id) => match self.symbols.get(id).map(|symbol| symbol.kind) {
                Some(SymbolKind::Label) => Err(ParseError::syntax(
                    format!("label '{}' used as a value", name),
                    location.clone(),
                )),
                _ => Ok(id),
            },
            None if self.check(&TokenType::LeftParen) => {
                log::trace!("implicit function '{}'", name);
                Ok(self.symbols.add(name, SymbolKind::Function))
            }
            None => Err(ParseError::syntax(
                format!("undeclared identifier '{}'", name),
                location.clone(),
            )),
        }
    }
}
