//! ec recursive descent parser
//!
//! Reads tokens through a [`TokenStream`], builds the AST and fills the
//! symbol table as declarations and references go by. Syntax errors are
//! recorded in an [`ErrorReporter`] and the parser resynchronizes on `;`
//! or `}` so one run can report several problems.

pub mod errors;
pub mod declarations;
pub mod statements;
pub mod expressions;

pub use errors::ParseError;

use crate::ast::*;
use crate::lexer::{Lexer, Token, TokenStream, TokenType};
use ec_common::error::DEFAULT_ERROR_LIMIT;
use ec_common::{
    DataType, ErrorReporter, SourceLocation, SourceSpan, SymbolId, SymbolKind, SymbolTable,
};
use std::collections::HashSet;

pub type ParseResult<T> = Result<T, ParseError>;

/// Parser settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Diagnostics stored before the rest are only counted
    pub max_errors: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_errors: DEFAULT_ERROR_LIMIT,
        }
    }
}

/// Everything a finished parse produces
#[derive(Debug)]
pub struct ParseOutput {
    pub unit: TranslationUnit,
    pub symbols: SymbolTable,
    pub diagnostics: ErrorReporter,
}

/// `goto`/label bookkeeping for the function being parsed
#[derive(Debug, Default)]
pub(crate) struct LabelScope {
    pub(crate) defined: HashSet<String>,
    pub(crate) gotos: Vec<(String, SourceLocation)>,
}

/// ec parser
pub struct Parser {
    pub(crate) tokens: TokenStream,
    pub(crate) symbols: SymbolTable,
    pub(crate) reporter: ErrorReporter,
    pub(crate) labels: LabelScope,
    pub(crate) defined_functions: HashSet<String>,
    pub(crate) loop_depth: usize,
    pub(crate) switch_depth: usize,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Self {
        Self::with_config(lexer, ParserConfig::default())
    }

    pub fn with_config(lexer: Lexer, config: ParserConfig) -> Self {
        Self {
            tokens: TokenStream::new(lexer),
            symbols: SymbolTable::new(),
            reporter: ErrorReporter::with_limit(config.max_errors),
            labels: LabelScope::default(),
            defined_functions: HashSet::new(),
            loop_depth: 0,
            switch_depth: 0,
        }
    }

    /// Look at the next token without consuming it
    pub(crate) fn peek(&mut self) -> Token {
        self.tokens.peek_token()
    }

    /// Get next token
    pub(crate) fn advance(&mut self) -> Token {
        self.tokens.get_token()
    }

    /// Check if the next token has the given type (payloads ignored)
    pub(crate) fn check(&mut self, token_type: &TokenType) -> bool {
        self.peek().is(token_type)
    }

    /// Consume the next token if it matches; otherwise leave it in place
    pub(crate) fn expect(&mut self, token_type: &TokenType) -> bool {
        let token = self.advance();
        if token.is(token_type) {
            true
        } else {
            self.tokens.unget_token();
            false
        }
    }

    /// Consume a token the grammar requires here, or fail with a syntax
    /// error located at the previous token
    pub(crate) fn require(&mut self, token_type: TokenType) -> ParseResult<Token> {
        let token = self.advance();
        if token.is(&token_type) {
            return Ok(token);
        }
        if let TokenType::Malformed { lexeme, reason } = &token.token_type {
            return Err(ParseError::syntax(
                format!("{}: {}", reason, lexeme),
                token.span.start.clone(),
            ));
        }

        self.tokens.unget_token();
        let message = match &token.token_type {
            TokenType::EndOfFile => format!("missing '{}' at end of file", token_type),
            found => format!("missing '{}' before '{}'", token_type, found),
        };
        Err(ParseError::syntax(message, self.previous_location(&token)))
    }

    /// Consume a token the caller has already checked for. A mismatch is a
    /// bug in the parser, not in the program being compiled.
    pub(crate) fn assert_next(&mut self, token_type: TokenType) -> ParseResult<Token> {
        let token = self.advance();
        if token.is(&token_type) {
            Ok(token)
        } else {
            Err(ParseError::Internal {
                message: format!("expected '{}', found '{}'", token_type, token.token_type),
                location: token.span.start,
            })
        }
    }

    /// Consume an identifier, or fail naming what was wanted
    pub(crate) fn expect_identifier(&mut self, what: &str) -> ParseResult<(String, Token)> {
        let token = self.advance();
        match &token.token_type {
            TokenType::Identifier(name) => Ok((name.clone(), token.clone())),
            _ => {
                self.tokens.unget_token();
                Err(self.unexpected(&token, what))
            }
        }
    }

    /// Error for a token that cannot start or continue the current construct
    pub(crate) fn unexpected(&self, token: &Token, what: &str) -> ParseError {
        let message = match &token.token_type {
            TokenType::Malformed { lexeme, reason } => format!("{}: {}", reason, lexeme),
            TokenType::EndOfFile => format!("unexpected end of file, expected {}", what),
            found => format!("expected {} but found '{}'", what, found),
        };
        ParseError::syntax(message, token.span.start.clone())
    }

    /// Start of the last token consumed (falls back to `next`)
    pub(crate) fn previous_location(&self, next: &Token) -> SourceLocation {
        self.tokens
            .current_token()
            .map(|token| token.span.start.clone())
            .unwrap_or_else(|| next.span.start.clone())
    }

    /// Span of the last token consumed (falls back to `next`)
    pub(crate) fn previous_span(&self, next: &Token) -> SourceSpan {
        self.tokens
            .current_token()
            .map(|token| token.span.clone())
            .unwrap_or_else(|| next.span.clone())
    }

    /// Record a diagnostic without interrupting the parse
    pub(crate) fn error(&mut self, message: impl Into<String>, location: SourceLocation) {
        self.reporter.error(message, location);
    }

    /// Record a syntax error and resynchronize on `tag`; internal errors
    /// are passed through
    pub(crate) fn recover(&mut self, err: ParseError, tag: &TokenType) -> ParseResult<()> {
        match err {
            ParseError::Internal { .. } => Err(err),
            ParseError::Syntax { message, location } => {
                log::debug!("syntax error at {}: {}; skipping to '{}'", location, message, tag);
                self.reporter.error(message, location);
                self.skip_until(tag);
                Ok(())
            }
        }
    }

    /// Discard tokens through the next `tag`. Stops in front of `}` so the
    /// enclosing block can still close, and at end of input.
    pub(crate) fn skip_until(&mut self, tag: &TokenType) {
        loop {
            let token = self.advance();
            if token.is(tag) {
                return;
            }
            if token.token_type == TokenType::EndOfFile || token.token_type == TokenType::RightBrace {
                self.tokens.unget_token();
                return;
            }
        }
    }

    /// Record a syntax error in a top-level item and skip to the next item
    pub(crate) fn recover_item(&mut self, err: ParseError) -> ParseResult<()> {
        match err {
            ParseError::Internal { .. } => Err(err),
            ParseError::Syntax { message, location } => {
                log::debug!("syntax error at {}: {}; skipping to next item", location, message);
                self.reporter.error(message, location);
                self.skip_to_item();
                Ok(())
            }
        }
    }

    /// Discard tokens up to the start of the next top-level item (or
    /// through the next `;`)
    pub(crate) fn skip_to_item(&mut self) {
        loop {
            let token = self.advance();
            match token.token_type {
                TokenType::Semicolon => return,
                TokenType::EndOfFile | TokenType::Fn | TokenType::Var | TokenType::Enum => {
                    self.tokens.unget_token();
                    return;
                }
                _ => {}
            }
        }
    }

    /// Register a name, checking it against what the table already holds
    pub(crate) fn declare(
        &mut self,
        name: &str,
        kind: SymbolKind,
        data_type: DataType,
        is_array: bool,
        location: &SourceLocation,
    ) -> SymbolId {
        let id = self.symbols.add(name, kind);
        let existing = self.symbols.get(id).map(|symbol| symbol.kind);
        if let Some(existing) = existing {
            if existing != kind {
                self.error(
                    format!("'{}' already declared as a {}", name, existing),
                    location.clone(),
                );
                return id;
            }
        }

        if let Err(conflict) = self.symbols.set_type(id, data_type, is_array) {
            let describe = |ty: DataType, array: bool| {
                if array {
                    format!("{}[]", ty)
                } else {
                    ty.to_string()
                }
            };
            self.error(
                format!(
                    "'{}' redeclared as {} (previously {})",
                    name,
                    describe(data_type, is_array),
                    describe(conflict.existing, conflict.existing_array)
                ),
                location.clone(),
            );
        }
        id
    }

    /// Parse a complete translation unit
    pub fn parse(mut self) -> ParseResult<ParseOutput> {
        let start_location = self.peek().span.start;
        let mut items = Vec::new();

        loop {
            let token = self.peek();
            match token.token_type {
                TokenType::EndOfFile => break,
                TokenType::Fn => match self.parse_function_definition() {
                    Ok(function) => items.push(TopLevelItem::Function(function)),
                    Err(err) => self.recover_item(err)?,
                },
                TokenType::Var => {
                    let declaration = self
                        .parse_declaration()
                        .and_then(|decl| self.require(TokenType::Semicolon).map(|_| decl));
                    match declaration {
                        Ok(decl) => items.push(TopLevelItem::Declaration(decl)),
                        Err(err) => self.recover_item(err)?,
                    }
                }
                TokenType::Enum => match self.parse_enum_definition() {
                    Ok(definition) => items.push(TopLevelItem::Enum(definition)),
                    Err(err) => self.recover_item(err)?,
                },
                TokenType::Semicolon => {
                    self.advance();
                }
                _ => {
                    let err = self.unexpected(&token, "'fn', 'var' or 'enum'");
                    self.recover_item(err)?;
                }
            }
        }

        let end_location = self.peek().span.end;
        log::debug!(
            "parsed {} item(s), {} symbol(s), {}",
            items.len(),
            self.symbols.len(),
            self.reporter.summary()
        );

        Ok(ParseOutput {
            unit: TranslationUnit {
                items,
                span: SourceSpan::new(start_location, end_location),
            },
            symbols: self.symbols,
            diagnostics: self.reporter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser(input: &str) -> Parser {
        Parser::new(Lexer::new(input))
    }

    #[test]
    fn test_expect_pushes_back_on_mismatch() {
        let mut p = parser("; x");
        assert!(!p.expect(&TokenType::Comma));
        assert!(p.expect(&TokenType::Semicolon));
        assert!(p.check(&TokenType::Identifier(String::new())));
    }

    #[test]
    fn test_require_reports_previous_line() {
        let mut p = parser("x\n\n}");
        p.advance();
        let err = p.require(TokenType::Semicolon).unwrap_err();
        assert_eq!(err.location().line, 1);
        assert_eq!(err.to_string(), "missing ';' before '}'");
        // the offending token is still there
        assert!(p.check(&TokenType::RightBrace));
    }

    #[test]
    fn test_assert_next_is_internal() {
        let mut p = parser("while");
        let err = p.assert_next(TokenType::If).unwrap_err();
        assert!(matches!(err, ParseError::Internal { .. }));
        let converted: ec_common::CompilerError = err.into();
        assert!(matches!(converted, ec_common::CompilerError::InternalError { .. }));
    }

    #[test]
    fn test_skip_until_consumes_tag() {
        let mut p = parser("a b ; c");
        p.skip_until(&TokenType::Semicolon);
        assert_eq!(p.advance().token_type, TokenType::Identifier("c".to_string()));
    }

    #[test]
    fn test_skip_until_stops_before_brace_and_eof() {
        let mut p = parser("a b } c");
        p.skip_until(&TokenType::Semicolon);
        assert!(p.check(&TokenType::RightBrace));

        let mut p = parser("a b");
        p.skip_until(&TokenType::Semicolon);
        assert!(p.check(&TokenType::EndOfFile));
    }

    #[test]
    fn test_top_level_garbage_is_reported_once_and_skipped() {
        let output = parser("42; fn main() {}").parse().unwrap();
        assert_eq!(output.diagnostics.error_count(), 1);
        assert_eq!(output.unit.items.len(), 1);
    }

    #[test]
    fn test_stray_closing_brace_terminates() {
        let output = parser("} } fn f() {}").parse().unwrap();
        assert_eq!(output.diagnostics.error_count(), 1);
        assert_eq!(output.unit.items.len(), 1);
    }

    #[test]
    fn test_declare_kind_clash() {
        let mut p = parser("");
        let loc = SourceLocation::new_simple(1, 1);
        let a = p.declare("f", SymbolKind::Function, DataType::Int, false, &loc);
        let b = p.declare("f", SymbolKind::Variable, DataType::Int, false, &loc);
        assert_eq!(a, b);
        assert_eq!(p.reporter.error_count(), 1);
        assert!(p.reporter.diagnostics()[0].message.contains("already declared as a function"));
    }
}
