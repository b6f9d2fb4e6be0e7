//! Declaration parsing: functions, variables, enums and type names

use crate::ast::*;
use crate::lexer::TokenType;
use crate::parser::{LabelScope, ParseError, ParseResult, Parser};
use ec_common::{DataType, SymbolKind};

impl Parser {
    /// Parse a type keyword
    pub fn parse_type(&mut self) -> ParseResult<DataType> {
        let token = self.advance();
        let data_type = match token.token_type {
            TokenType::Bool => DataType::Bool,
            TokenType::Char => DataType::Char,
            TokenType::Short => DataType::Short,
            TokenType::Int => DataType::Int,
            TokenType::Long => DataType::Long,
            TokenType::Float => DataType::Float,
            TokenType::Double => DataType::Double,
            TokenType::String => DataType::String,
            TokenType::Void => DataType::Void,
            _ => {
                self.tokens.unget_token();
                return Err(self.unexpected(&token, "a type"));
            }
        };
        Ok(data_type)
    }

    /// `fn name(a: int, b: float) int { ... }`; the return type defaults
    /// to `void`
    pub fn parse_function_definition(&mut self) -> ParseResult<FunctionDefinition> {
        let start = self.assert_next(TokenType::Fn)?;
        let (name, name_token) = self.expect_identifier("a function name")?;

        self.require(TokenType::LeftParen)?;
        let mut parameters = Vec::new();
        if !self.check(&TokenType::RightParen) {
            loop {
                parameters.push(self.parse_parameter()?);
                if !self.expect(&TokenType::Comma) {
                    break;
                }
            }
        }
        self.require(TokenType::RightParen)?;

        let return_type = if self.peek().token_type.is_type_keyword() {
            self.parse_type()?
        } else {
            DataType::Void
        };

        let symbol_id = self.declare(
            &name,
            SymbolKind::Function,
            return_type,
            false,
            &name_token.span.start,
        );
        if !self.defined_functions.insert(name.clone()) {
            self.error(
                format!("function '{}' is defined more than once", name),
                name_token.span.start.clone(),
            );
        }

        if !self.check(&TokenType::LeftBrace) {
            let token = self.peek();
            return Err(self.unexpected(&token, "'{' to start the function body"));
        }

        log::debug!("parsing function {}", name);
        self.labels = LabelScope::default();
        let body = self.parse_compound_statement()?;
        self.resolve_gotos();

        let span = start.span.to(&body.span);
        Ok(FunctionDefinition {
            name,
            symbol_id,
            return_type,
            parameters,
            body,
            span,
        })
    }

    fn parse_parameter(&mut self) -> ParseResult<Parameter> {
        let (name, token) = self.expect_identifier("a parameter name")?;
        self.require(TokenType::Colon)?;
        let param_type = self.parse_type()?;
        if param_type == DataType::Void {
            return Err(ParseError::syntax(
                format!("parameter '{}' cannot be void", name),
                token.span.start,
            ));
        }
        let symbol_id = self.declare(
            &name,
            SymbolKind::Variable,
            param_type,
            false,
            &token.span.start,
        );
        let span = token.span.to(&self.previous_span(&token));
        Ok(Parameter {
            name,
            symbol_id,
            param_type,
            span,
        })
    }

    /// Every `goto` in the function just parsed must name a label defined
    /// somewhere in that function
    fn resolve_gotos(&mut self) {
        let scope = std::mem::take(&mut self.labels);
        for (label, location) in scope.gotos {
            if !scope.defined.contains(&label) {
                self.error(format!("undefined label '{}'", label), location);
            }
        }
    }

    /// `var name: type[size] = initializer` (without the trailing `;`)
    pub fn parse_declaration(&mut self) -> ParseResult<Declaration> {
        let start = self.assert_next(TokenType::Var)?;
        let (name, name_token) = self.expect_identifier("a variable name")?;
        self.require(TokenType::Colon)?;
        let decl_type = self.parse_type()?;
        if decl_type == DataType::Void {
            return Err(ParseError::syntax(
                format!("variable '{}' cannot be void", name),
                name_token.span.start,
            ));
        }

        let mut is_array = false;
        let mut array_size = None;
        if self.expect(&TokenType::LeftBracket) {
            is_array = true;
            let token = self.peek();
            match token.token_type {
                TokenType::IntLiteral(size) if size > 0 => {
                    self.advance();
                    array_size = usize::try_from(size).ok();
                }
                TokenType::RightBracket => {}
                _ => {
                    self.advance();
                    return Err(ParseError::syntax(
                        format!("array size of '{}' must be a positive integer", name),
                        token.span.start,
                    ));
                }
            }
            self.require(TokenType::RightBracket)?;
        }

        let initializer = if self.expect(&TokenType::Equal) {
            Some(self.parse_initializer()?)
        } else {
            None
        };

        let location = name_token.span.start.clone();
        match (&initializer, is_array) {
            (Some(Initializer::List(values)), true) if values.is_empty() => {
                self.error(format!("empty initializer list for '{}'", name), location.clone());
            }
            (Some(Initializer::List(values)), true) => match array_size {
                Some(size) if values.len() > size => {
                    self.error(format!("too many initializers for '{}'", name), location.clone());
                }
                Some(_) => {}
                None => array_size = Some(values.len()),
            },
            (Some(Initializer::Expression(_)), true) => {
                self.error(
                    format!("array '{}' needs a brace-enclosed initializer", name),
                    location.clone(),
                );
            }
            (None, true) if array_size.is_none() => {
                self.error(
                    format!("array '{}' needs a size or an initializer list", name),
                    location.clone(),
                );
            }
            (Some(Initializer::List(_)), false) => {
                self.error(
                    format!("brace-enclosed initializer for non-array '{}'", name),
                    location.clone(),
                );
            }
            _ => {}
        }

        let symbol_id = self.declare(&name, SymbolKind::Variable, decl_type, is_array, &location);
        let span = start.span.to(&self.previous_span(&start));
        Ok(Declaration {
            name,
            symbol_id,
            decl_type,
            array_size,
            initializer,
            span,
        })
    }

    fn parse_initializer(&mut self) -> ParseResult<Initializer> {
        if !self.expect(&TokenType::LeftBrace) {
            return Ok(Initializer::Expression(self.parse_expression()?));
        }

        let mut values = Vec::new();
        if !self.check(&TokenType::RightBrace) {
            loop {
                values.push(self.parse_assignment_expression()?);
                if !self.expect(&TokenType::Comma) || self.check(&TokenType::RightBrace) {
                    break;
                }
            }
        }
        self.require(TokenType::RightBrace)?;
        Ok(Initializer::List(values))
    }

    /// `enum Name { A, B = 4, C }` with an optional trailing `;`
    pub fn parse_enum_definition(&mut self) -> ParseResult<EnumDefinition> {
        let start = self.assert_next(TokenType::Enum)?;
        let (name, name_token) = self.expect_identifier("an enum name")?;
        self.require(TokenType::LeftBrace)?;

        let mut enumerators = Vec::new();
        while !self.check(&TokenType::RightBrace) {
            let (constant, token) = self.expect_identifier("an enumerator name")?;
            let value = if self.expect(&TokenType::Equal) {
                Some(self.parse_logical_or_expression()?)
            } else {
                None
            };
            let symbol_id = self.declare(
                &constant,
                SymbolKind::Constant,
                DataType::Int,
                false,
                &token.span.start,
            );
            let span = token.span.to(&self.previous_span(&token));
            enumerators.push(Enumerator {
                name: constant,
                symbol_id,
                value,
                span,
            });
            if !self.expect(&TokenType::Comma) {
                break;
            }
        }
        let end = self.require(TokenType::RightBrace)?;
        self.expect(&TokenType::Semicolon);

        if enumerators.is_empty() {
            self.error(
                format!("enum '{}' has no enumerators", name),
                name_token.span.start,
            );
        }

        Ok(EnumDefinition {
            name,
            enumerators,
            span: start.span.to(&end.span),
        })
    }
}
