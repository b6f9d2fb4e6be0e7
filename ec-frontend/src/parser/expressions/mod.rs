//! Expression parsing
//!
//! One function per precedence level, lowest first:
//! assignment, `||`, `&&`, `|`, `^`, `&`, equality, relational, shift,
//! additive, multiplicative, unary, postfix, primary. Each binary level
//! loops on its own operators, so the call graph encodes precedence and
//! every binary operator is left-associative.

pub mod assignment;
pub mod binary;
pub mod postfix;
pub mod primary;
pub mod unary;

use crate::ast::Expression;
use crate::parser::{ParseResult, Parser};

impl Parser {
    /// Parse expression
    pub fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_assignment_expression()
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::lexer::Lexer;
    use crate::parser::{ParseError, ParseResult, Parser};
    use ec_common::SymbolKind;

    /// Parse `input` with `a`, `b`, `c` and `arr` declared
    fn parse_expression_from_str(input: &str) -> ParseResult<Expression> {
        let mut parser = Parser::new(Lexer::new(input));
        let location = ec_common::SourceLocation::new_simple(1, 1);
        for name in ["a", "b", "c", "arr"] {
            parser.declare(name, SymbolKind::Variable, ec_common::DataType::Int, name == "arr", &location);
        }
        parser.parse_expression()
    }

    fn render(expr: &Expression) -> String {
        match &expr.kind {
            ExpressionKind::IntLiteral(v) => v.to_string(),
            ExpressionKind::Identifier { name, .. } => name.clone(),
            ExpressionKind::Binary { op, left, right } => {
                format!("({} {} {})", render(left), op, render(right))
            }
            ExpressionKind::Assignment { op, target, value } => {
                format!("({} {} {})", render(target), op, render(value))
            }
            ExpressionKind::Unary { op, operand } if op.is_postfix() => {
                format!("({}{})", render(operand), op)
            }
            ExpressionKind::Unary { op, operand } => format!("({}{})", op, render(operand)),
            ExpressionKind::Call { function, arguments } => format!(
                "{}({})",
                render(function),
                arguments.iter().map(render).collect::<Vec<_>>().join(", ")
            ),
            ExpressionKind::Index { array, index } => format!("{}[{}]", render(array), render(index)),
            other => format!("{:?}", other),
        }
    }

    fn shape(input: &str) -> String {
        render(&parse_expression_from_str(input).unwrap())
    }

    #[test]
    fn test_parse_integer_literal() {
        let expr = parse_expression_from_str("42").unwrap();
        match expr.kind {
            ExpressionKind::IntLiteral(value) => assert_eq!(value, 42),
            _ => panic!("Expected integer literal"),
        }
    }

    #[test]
    fn test_precedence() {
        assert_eq!(shape("1 + 2 * 3"), "(1 + (2 * 3))");
        assert_eq!(shape("1 * 2 + 3"), "((1 * 2) + 3)");
        assert_eq!(shape("a || b && c"), "(a || (b && c))");
        assert_eq!(shape("a | b ^ c & 1"), "(a | (b ^ (c & 1)))");
        assert_eq!(shape("a == b < c"), "(a == (b < c))");
        assert_eq!(shape("a << 1 + 2"), "(a << (1 + 2))");
        assert_eq!(shape("a < b == b >= c"), "((a < b) == (b >= c))");
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(shape("1 - 2 - 3"), "((1 - 2) - 3)");
        assert_eq!(shape("8 / 4 % 3"), "((8 / 4) % 3)");
    }

    #[test]
    fn test_assignment_is_right_associative() {
        assert_eq!(shape("a = b = 3"), "(a = (b = 3))");
        assert_eq!(shape("a += b * 2"), "(a += (b * 2))");
    }

    #[test]
    fn test_parentheses_override_precedence() {
        assert_eq!(shape("(1 + 2) * 3"), "((1 + 2) * 3)");
    }

    #[test]
    fn test_unary_and_postfix() {
        assert_eq!(shape("-a + !b"), "((-a) + (!b))");
        assert_eq!(shape("++a"), "(++a)");
        assert_eq!(shape("a++ * 2"), "((a++) * 2)");
        assert_eq!(shape("~-a"), "(~(-a))");
    }

    #[test]
    fn test_calls_and_subscripts() {
        assert_eq!(shape("f(1, a + 2, g())"), "f(1, (a + 2), g())");
        assert_eq!(shape("arr[a + 1] = 3"), "(arr[(a + 1)] = 3)");
    }

    #[test]
    fn test_invalid_assignment_target() {
        let err = parse_expression_from_str("1 = a").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
        assert_eq!(err.to_string(), "invalid assignment target");
    }

    #[test]
    fn test_increment_needs_variable() {
        assert!(parse_expression_from_str("++3").is_err());
        assert!(parse_expression_from_str("(a + b)++").is_err());
    }

    #[test]
    fn test_undeclared_identifier() {
        let err = parse_expression_from_str("nope + 1").unwrap_err();
        assert_eq!(err.to_string(), "undeclared identifier 'nope'");
    }

    #[test]
    fn test_unknown_callee_becomes_function() {
        let mut parser = Parser::new(Lexer::new("print(\"hi\")"));
        parser.parse_expression().unwrap();
        let id = parser.symbols.lookup("print").unwrap();
        assert_eq!(parser.symbols.get(id).unwrap().kind, SymbolKind::Function);
    }

    #[test]
    fn test_string_literal_interned() {
        let mut parser = Parser::new(Lexer::new("f(\"a\\n\", \"a\\n\")"));
        let expr = parser.parse_expression().unwrap();
        match expr.kind {
            ExpressionKind::Call { arguments, .. } => {
                let ids: Vec<_> = arguments
                    .iter()
                    .map(|arg| match &arg.kind {
                        ExpressionKind::StringLiteral { symbol_id, .. } => *symbol_id,
                        _ => panic!("Expected string literal"),
                    })
                    .collect();
                assert_eq!(ids[0], ids[1]);
                let symbol = parser.symbols.get(ids[0]).unwrap();
                assert_eq!(symbol.kind, SymbolKind::StringLiteral);
                assert_eq!(symbol.name, "\"a\\n\"");
            }
            _ => panic!("Expected function call"),
        }
    }

    #[test]
    fn test_literals() {
        let cases = [
            ("true", ExpressionKind::BoolLiteral(true)),
            ("false", ExpressionKind::BoolLiteral(false)),
            ("'x'", ExpressionKind::CharLiteral('x')),
            ("2.5", ExpressionKind::FloatLiteral(2.5)),
        ];
        for (input, expected) in cases {
            assert_eq!(parse_expression_from_str(input).unwrap().kind, expected);
        }
    }

    #[test]
    fn test_malformed_token_reported() {
        let err = parse_expression_from_str("12abc").unwrap_err();
        assert_eq!(err.to_string(), "malformed number: 12abc");
    }

    #[test]
    fn test_unexpected_token_is_not_consumed() {
        let mut parser = Parser::new(Lexer::new(";"));
        assert!(parser.parse_expression().is_err());
        assert!(parser.check(&crate::lexer::TokenType::Semicolon));
    }

    #[test]
    fn test_string_literal_clashing_with_typed_symbol_is_internal() {
        let mut parser = Parser::new(Lexer::new("\"a\""));
        let id = parser.symbols.add("\"a\"", SymbolKind::StringLiteral);
        parser.symbols.set_type(id, ec_common::DataType::Int, false).unwrap();
        match parser.parse_expression() {
            Err(ParseError::Internal { message, .. }) => {
                assert_eq!(message, "string literal \"a\" already typed int");
            }
            other => panic!("Expected internal error, got {:?}", other),
        }
    }
}
