//! Statement parsing
//!
//! Statement lists (blocks and switch clauses) are where syntax errors are
//! caught: the failing statement is recorded and skipped up to its `;`,
//! and the list carries on with the next statement.

use crate::ast::*;
use crate::lexer::TokenType;
use crate::parser::{ParseError, ParseResult, Parser};
use ec_common::{DataType, SymbolKind};

impl Parser {
    /// Parse compound statement (block)
    pub fn parse_compound_statement(&mut self) -> ParseResult<Statement> {
        let open = self.require(TokenType::LeftBrace)?;

        let mut statements = Vec::new();
        while !self.check(&TokenType::RightBrace) && !self.check(&TokenType::EndOfFile) {
            match self.parse_statement() {
                Ok(statement) => statements.push(statement),
                Err(err) => self.recover(err, &TokenType::Semicolon)?,
            }
        }

        if !self.expect(&TokenType::RightBrace) {
            let next = self.peek();
            let location = self.previous_location(&next);
            self.error("missing '}' at end of block", location);
        }

        let span = open.span.to(&self.previous_span(&open));
        Ok(Statement::new(StatementKind::Compound(statements), span))
    }

    /// Parse statement
    pub fn parse_statement(&mut self) -> ParseResult<Statement> {
        let token = self.peek();
        let start = token.span.clone();

        let kind = match token.token_type {
            TokenType::LeftBrace => return self.parse_compound_statement(),
            TokenType::Semicolon => {
                self.advance();
                StatementKind::Empty
            }
            TokenType::If => self.parse_if_statement()?,
            TokenType::While => self.parse_while_statement()?,
            TokenType::Do => self.parse_do_while_statement()?,
            TokenType::For => self.parse_for_statement()?,
            TokenType::Switch => self.parse_switch_statement()?,
            TokenType::Return => self.parse_return_statement()?,
            TokenType::Break => {
                let keyword = self.assert_next(TokenType::Break)?;
                if self.loop_depth == 0 && self.switch_depth == 0 {
                    self.error("'break' outside of a loop or switch", keyword.span.start);
                }
                self.require(TokenType::Semicolon)?;
                StatementKind::Break
            }
            TokenType::Continue => {
                let keyword = self.assert_next(TokenType::Continue)?;
                if self.loop_depth == 0 {
                    self.error("'continue' outside of a loop", keyword.span.start);
                }
                self.require(TokenType::Semicolon)?;
                StatementKind::Continue
            }
            TokenType::Goto => self.parse_goto_statement()?,
            TokenType::Vardump => self.parse_vardump_statement()?,
            TokenType::Var => {
                let declaration = self.parse_declaration()?;
                self.require(TokenType::Semicolon)?;
                StatementKind::Declaration(declaration)
            }
            TokenType::Case | TokenType::Default => {
                self.advance();
                return Err(ParseError::syntax(
                    format!("'{}' outside of a switch", token.token_type),
                    start.start,
                ));
            }
            TokenType::Identifier(_) => match self.parse_labeled_statement()? {
                Some(kind) => kind,
                None => self.parse_expression_statement()?,
            },
            _ => self.parse_expression_statement()?,
        };

        let span = start.to(&self.previous_span(&token));
        Ok(Statement::new(kind, span))
    }

    fn parse_expression_statement(&mut self) -> ParseResult<StatementKind> {
        let expression = self.parse_expression()?;
        self.require(TokenType::Semicolon)?;
        Ok(StatementKind::Expression(expression))
    }

    /// `name: statement`. Needs two tokens of lookahead: when the
    /// identifier is not followed by `:` both are pushed back and `None`
    /// is returned.
    fn parse_labeled_statement(&mut self) -> ParseResult<Option<StatementKind>> {
        let (label, token) = self.expect_identifier("a label")?;
        if !self.expect(&TokenType::Colon) {
            self.tokens.unget_token();
            return Ok(None);
        }

        let location = token.span.start.clone();
        let symbol_id = self.declare(&label, SymbolKind::Label, DataType::Unknown, false, &location);
        if !self.labels.defined.insert(label.clone()) {
            self.error(format!("duplicate label '{}'", label), location.clone());
        }

        if self.check(&TokenType::RightBrace) {
            return Err(ParseError::syntax(
                format!("label '{}' must be followed by a statement", label),
                location,
            ));
        }
        let statement = self.parse_statement()?;

        Ok(Some(StatementKind::Labeled {
            label,
            symbol_id,
            statement: Box::new(statement),
        }))
    }

    fn parse_parenthesized_condition(&mut self) -> ParseResult<Expression> {
        self.require(TokenType::LeftParen)?;
        let condition = self.parse_expression()?;
        self.require(TokenType::RightParen)?;
        Ok(condition)
    }

    fn parse_loop_body(&mut self) -> ParseResult<Statement> {
        self.loop_depth += 1;
        let body = self.parse_statement();
        self.loop_depth -= 1;
        body
    }

    /// Parse if statement
    fn parse_if_statement(&mut self) -> ParseResult<StatementKind> {
        self.assert_next(TokenType::If)?;
        let condition = self.parse_parenthesized_condition()?;
        let then_stmt = Box::new(self.parse_statement()?);

        let else_stmt = if self.expect(&TokenType::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(StatementKind::If {
            condition,
            then_stmt,
            else_stmt,
        })
    }

    /// Parse while statement
    fn parse_while_statement(&mut self) -> ParseResult<StatementKind> {
        self.assert_next(TokenType::While)?;
        let condition = self.parse_parenthesized_condition()?;
        let body = Box::new(self.parse_loop_body()?);
        Ok(StatementKind::While { condition, body })
    }

    /// Parse do-while statement
    fn parse_do_while_statement(&mut self) -> ParseResult<StatementKind> {
        self.assert_next(TokenType::Do)?;
        let body = Box::new(self.parse_loop_body()?);
        self.require(TokenType::While)?;
        let condition = self.parse_parenthesized_condition()?;
        self.require(TokenType::Semicolon)?;
        Ok(StatementKind::DoWhile { body, condition })
    }

    /// Parse for statement; each header clause may be empty
    fn parse_for_statement(&mut self) -> ParseResult<StatementKind> {
        self.assert_next(TokenType::For)?;
        self.require(TokenType::LeftParen)?;

        let init = if self.check(&TokenType::Semicolon) {
            None
        } else if self.check(&TokenType::Var) {
            Some(ForInit::Declaration(self.parse_declaration()?))
        } else {
            Some(ForInit::Expression(self.parse_expression()?))
        };
        self.require(TokenType::Semicolon)?;

        let condition = if self.check(&TokenType::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.require(TokenType::Semicolon)?;

        let update = if self.check(&TokenType::RightParen) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.require(TokenType::RightParen)?;

        let body = Box::new(self.parse_loop_body()?);
        Ok(StatementKind::For {
            init,
            condition,
            update,
            body,
        })
    }

    /// Parse switch statement. Each clause runs up to the next `case` or
    /// `default`.
    fn parse_switch_statement(&mut self) -> ParseResult<StatementKind> {
        self.assert_next(TokenType::Switch)?;
        let expression = self.parse_parenthesized_condition()?;
        self.require(TokenType::LeftBrace)?;

        let mut cases: Vec<SwitchCase> = Vec::new();
        let mut seen_default = false;
        loop {
            let token = self.peek();
            let value = match token.token_type {
                TokenType::Case => {
                    self.advance();
                    let value = self.parse_logical_or_expression()?;
                    Some(value)
                }
                TokenType::Default => {
                    self.advance();
                    if seen_default {
                        self.error("multiple 'default' clauses in one switch", token.span.start.clone());
                    }
                    seen_default = true;
                    None
                }
                TokenType::RightBrace | TokenType::EndOfFile => break,
                _ => {
                    let err = self.unexpected(&token, "'case' or 'default'");
                    self.recover(err, &TokenType::Semicolon)?;
                    continue;
                }
            };
            self.require(TokenType::Colon)?;

            let mut body = Vec::new();
            self.switch_depth += 1;
            let clause = self.parse_case_body(&mut body);
            self.switch_depth -= 1;
            clause?;

            let span = token.span.to(&self.previous_span(&token));
            cases.push(SwitchCase { value, body, span });
        }

        if !self.expect(&TokenType::RightBrace) {
            let next = self.peek();
            let location = self.previous_location(&next);
            self.error("missing '}' at end of switch", location);
        }

        Ok(StatementKind::Switch { expression, cases })
    }

    fn parse_case_body(&mut self, body: &mut Vec<Statement>) -> ParseResult<()> {
        loop {
            let token = self.peek();
            match token.token_type {
                TokenType::Case
                | TokenType::Default
                | TokenType::RightBrace
                | TokenType::EndOfFile => return Ok(()),
                _ => match self.parse_statement() {
                    Ok(statement) => body.push(statement),
                    Err(err) => self.recover(err, &TokenType::Semicolon)?,
                },
            }
        }
    }

    /// Parse return statement
    fn parse_return_statement(&mut self) -> ParseResult<StatementKind> {
        self.assert_next(TokenType::Return)?;
        let value = if self.check(&TokenType::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.require(TokenType::Semicolon)?;
        Ok(StatementKind::Return(value))
    }

    /// `goto name;`; the target is checked once the function is complete
    fn parse_goto_statement(&mut self) -> ParseResult<StatementKind> {
        self.assert_next(TokenType::Goto)?;
        let (label, token) = self.expect_identifier("a label name")?;
        let location = token.span.start.clone();
        let symbol_id = self.declare(&label, SymbolKind::Label, DataType::Unknown, false, &location);
        self.labels.gotos.push((label.clone(), location));
        self.require(TokenType::Semicolon)?;
        Ok(StatementKind::Goto { label, symbol_id })
    }

    /// `vardump name;` on a declared, non-array variable or constant
    fn parse_vardump_statement(&mut self) -> ParseResult<StatementKind> {
        self.assert_next(TokenType::Vardump)?;
        let (name, token) = self.expect_identifier("a variable name")?;
        let location = token.span.start.clone();

        let Some(symbol) = self.symbols.lookup(&name).and_then(|id| self.symbols.get(id)) else {
            return Err(ParseError::syntax(format!("undeclared variable '{}'", name), location));
        };
        if !matches!(symbol.kind, SymbolKind::Variable | SymbolKind::Constant) {
            return Err(ParseError::syntax(
                format!("cannot vardump {} '{}'", symbol.kind, name),
                location,
            ));
        }
        if symbol.is_array {
            return Err(ParseError::syntax(
                format!("cannot vardump array '{}'", name),
                location,
            ));
        }
        let symbol_id = symbol.id;

        self.require(TokenType::Semicolon)?;
        Ok(StatementKind::Vardump { name, symbol_id })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::lexer::Lexer;
    use crate::parser::{ParseOutput, Parser};

    fn parse(input: &str) -> ParseOutput {
        Parser::new(Lexer::new(input)).parse().unwrap()
    }

    fn main_body(output: &ParseOutput) -> &[Statement] {
        match &output.unit.items.last() {
            Some(TopLevelItem::Function(function)) => match &function.body.kind {
                StatementKind::Compound(statements) => statements,
                _ => panic!("Expected compound body"),
            },
            _ => panic!("Expected function"),
        }
    }

    fn messages(output: &ParseOutput) -> Vec<String> {
        output
            .diagnostics
            .diagnostics()
            .iter()
            .map(|d| d.message.clone())
            .collect()
    }

    #[test]
    fn test_if_else() {
        let output = parse("fn main() { var x: int; if (x) x = 1; else { x = 2; } }");
        assert!(!output.diagnostics.has_errors(), "{:?}", messages(&output));
        match &main_body(&output)[1].kind {
            StatementKind::If {
                then_stmt,
                else_stmt,
                ..
            } => {
                assert!(matches!(then_stmt.kind, StatementKind::Expression(_)));
                assert!(else_stmt.as_ref().is_some_and(|s| s.is_compound()));
            }
            _ => panic!("Expected if statement"),
        }
    }

    #[test]
    fn test_loops() {
        let output = parse(
            "fn main() { var i: int; while (i < 3) i++; do i--; while (i); \
             for (var j: int = 0; j < 2; j++) { continue; } for (;;) break; }",
        );
        assert!(!output.diagnostics.has_errors(), "{:?}", messages(&output));
        let body = main_body(&output);
        assert!(matches!(body[1].kind, StatementKind::While { .. }));
        assert!(matches!(body[2].kind, StatementKind::DoWhile { .. }));
        match &body[3].kind {
            StatementKind::For { init, condition, update, .. } => {
                assert!(matches!(init, Some(ForInit::Declaration(_))));
                assert!(condition.is_some());
                assert!(update.is_some());
            }
            _ => panic!("Expected for statement"),
        }
        match &body[4].kind {
            StatementKind::For { init, condition, update, .. } => {
                assert!(init.is_none() && condition.is_none() && update.is_none());
            }
            _ => panic!("Expected for statement"),
        }
    }

    #[test]
    fn test_switch_clauses() {
        let output = parse(
            "fn main() { var x: int; switch (x) { case 1: x = 2; x = 3; case 2: default: x = 0; } }",
        );
        assert!(!output.diagnostics.has_errors(), "{:?}", messages(&output));
        match &main_body(&output)[1].kind {
            StatementKind::Switch { cases, .. } => {
                assert_eq!(cases.len(), 3);
                assert_eq!(cases[0].body.len(), 2);
                assert!(cases[1].body.is_empty());
                assert!(cases[2].value.is_none());
            }
            _ => panic!("Expected switch statement"),
        }
    }

    #[test]
    fn test_labels_and_gotos() {
        let output = parse("fn main() { goto end; start: ; goto start; end: return; }");
        assert!(!output.diagnostics.has_errors(), "{:?}", messages(&output));
        let body = main_body(&output);
        assert!(matches!(body[0].kind, StatementKind::Goto { .. }));
        match &body[1].kind {
            StatementKind::Labeled { label, statement, .. } => {
                assert_eq!(label, "start");
                assert!(matches!(statement.kind, StatementKind::Empty));
            }
            _ => panic!("Expected labeled statement"),
        }
    }

    #[test]
    fn test_undefined_label() {
        let output = parse("fn main() { goto nowhere; }");
        assert_eq!(messages(&output), vec!["undefined label 'nowhere'".to_string()]);
    }

    #[test]
    fn test_labels_are_per_function() {
        let output = parse("fn a() { here: ; } fn b() { goto here; }");
        assert_eq!(messages(&output), vec!["undefined label 'here'".to_string()]);
    }

    #[test]
    fn test_identifier_statement_is_not_a_label() {
        let output = parse("fn main() { var x: int; x = 1; x; }");
        assert!(!output.diagnostics.has_errors(), "{:?}", messages(&output));
        assert_eq!(main_body(&output).len(), 3);
    }

    #[test]
    fn test_vardump_checks() {
        let output = parse(
            "fn f() {} fn main() { var a: int[2]; vardump missing; vardump a; vardump f; }",
        );
        let messages = messages(&output);
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0], "undeclared variable 'missing'");
        assert_eq!(messages[1], "cannot vardump array 'a'");
        assert_eq!(messages[2], "cannot vardump function 'f'");
    }

    #[test]
    fn test_break_and_continue_placement() {
        let output = parse("fn main() { break; continue; switch (1) { case 1: break; } }");
        let messages = messages(&output);
        assert_eq!(
            messages,
            vec![
                "'break' outside of a loop or switch".to_string(),
                "'continue' outside of a loop".to_string(),
            ]
        );
    }

    #[test]
    fn test_recovery_continues_after_bad_statement() {
        let output = parse("fn main() { var x: int; x = ; x = 2; }");
        assert_eq!(output.diagnostics.error_count(), 1);
        // the good statements survive
        assert_eq!(main_body(&output).len(), 2);
    }

    #[test]
    fn test_missing_semicolon_before_brace() {
        let output = parse("fn main() int {\n  return 1\n}");
        let diagnostics = output.diagnostics.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "missing ';' before '}'");
        assert_eq!(diagnostics[0].location.line, 2);
    }

    #[test]
    fn test_unterminated_block() {
        let output = parse("fn main() {\n  var x: int = 0;");
        let diagnostics = output.diagnostics.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("'}'"));
        assert_eq!(diagnostics[0].location.line, 2);
    }

    #[test]
    fn test_case_outside_switch() {
        let output = parse("fn main() { case 1: ; }");
        assert!(messages(&output)[0].contains("outside of a switch"));
    }
}
