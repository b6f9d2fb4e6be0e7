//! Expression rules. Every operator application is fully parenthesized.

use super::{expression, nothing, nothing_between, Rule};
use crate::ast::{c_quote, ExpressionKind, Node, UnaryOp};
use crate::cgen::context::{CodegenResult, Context};
use crate::cgen::errors::CodegenError;
use ec_common::{SourceLocation, SymbolKind};

pub(super) const LEAF: Rule = Rule {
    pre: leaf,
    between: nothing_between,
    post: nothing,
};

pub(super) const BINARY: Rule = Rule {
    pre: open_operation,
    between: binary_operator,
    post: close_paren,
};

pub(super) const UNARY: Rule = Rule {
    pre: open_unary,
    between: nothing_between,
    post: close_unary,
};

pub(super) const CALL: Rule = Rule {
    pre: check_call,
    between: nothing_between,
    post: nothing,
};

pub(super) const ARGUMENTS: Rule = Rule {
    pre: open_paren,
    between: comma,
    post: close_paren,
};

pub(super) const INDEX: Rule = Rule {
    pre: nothing,
    between: open_bracket,
    post: close_bracket,
};

fn non_constant(location: &SourceLocation) -> CodegenError {
    CodegenError::NonConstantEnumerator {
        location: location.clone(),
    }
}

fn open_paren(ctx: &mut Context<'_>, _node: Node<'_>) -> CodegenResult<()> {
    ctx.write("(")
}

fn close_paren(ctx: &mut Context<'_>, _node: Node<'_>) -> CodegenResult<()> {
    ctx.write(")")
}

fn comma(ctx: &mut Context<'_>, _node: Node<'_>, _slot: usize) -> CodegenResult<()> {
    ctx.write(", ")
}

fn open_bracket(ctx: &mut Context<'_>, _node: Node<'_>, _slot: usize) -> CodegenResult<()> {
    ctx.write("[")
}

fn close_bracket(ctx: &mut Context<'_>, _node: Node<'_>) -> CodegenResult<()> {
    ctx.write("]")
}

/// C spelling of a character literal
fn c_char(ch: char) -> String {
    match ch {
        '\n' => "'\\n'".to_string(),
        '\t' => "'\\t'".to_string(),
        '\r' => "'\\r'".to_string(),
        '\0' => "'\\0'".to_string(),
        '\\' => "'\\\\'".to_string(),
        '\'' => "'\\''".to_string(),
        ch if ch.is_ascii() && !ch.is_ascii_control() => format!("'{}'", ch),
        ch => (ch as u32).to_string(),
    }
}

fn leaf(ctx: &mut Context<'_>, node: Node<'_>) -> CodegenResult<()> {
    let expr = expression(node)?;
    let text = match &expr.kind {
        ExpressionKind::IntLiteral(value) => value.to_string(),
        ExpressionKind::FloatLiteral(value) => format!("{:?}", value),
        ExpressionKind::CharLiteral(ch) => c_char(*ch),
        ExpressionKind::BoolLiteral(value) => String::from(if *value { "1" } else { "0" }),
        ExpressionKind::StringLiteral { value, symbol_id } => match ctx.symbols.get(*symbol_id) {
            Some(symbol) if symbol.kind == SymbolKind::StringLiteral => symbol.name.clone(),
            _ => c_quote(value),
        },
        ExpressionKind::Identifier { name, symbol_id } => {
            let Some(symbol) = ctx.symbols.get(*symbol_id) else {
                return Err(CodegenError::UnknownSymbol {
                    name: name.clone(),
                    location: expr.span.start.clone(),
                });
            };
            if ctx.in_enum_initializer && symbol.kind != SymbolKind::Constant {
                return Err(non_constant(&expr.span.start));
            }
            if symbol.kind == SymbolKind::Function && name == "print" {
                "printf".to_string()
            } else {
                name.clone()
            }
        }
        _ => return Err(CodegenError::internal("leaf rule applied to an operation")),
    };
    ctx.write(&text)
}

fn open_operation(ctx: &mut Context<'_>, node: Node<'_>) -> CodegenResult<()> {
    let expr = expression(node)?;
    if ctx.in_enum_initializer && matches!(expr.kind, ExpressionKind::Assignment { .. }) {
        return Err(non_constant(&expr.span.start));
    }
    ctx.write("(")
}

fn binary_operator(ctx: &mut Context<'_>, node: Node<'_>, _slot: usize) -> CodegenResult<()> {
    let op = match &expression(node)?.kind {
        ExpressionKind::Binary { op, .. } | ExpressionKind::Assignment { op, .. } => *op,
        _ => return Err(CodegenError::internal("operator rule applied to a non-operation")),
    };
    ctx.write(&format!(" {} ", op))
}

fn unary_op(node: Node<'_>) -> CodegenResult<UnaryOp> {
    match &expression(node)?.kind {
        ExpressionKind::Unary { op, .. } => Ok(*op),
        _ => Err(CodegenError::internal("unary rule applied to a non-unary expression")),
    }
}

/// `(++(x))` before the operand, `((x)++)` after it
fn open_unary(ctx: &mut Context<'_>, node: Node<'_>) -> CodegenResult<()> {
    let op = unary_op(node)?;
    let changes_operand = !matches!(
        op,
        UnaryOp::Plus | UnaryOp::Minus | UnaryOp::BitNot | UnaryOp::LogicalNot
    );
    if ctx.in_enum_initializer && changes_operand {
        return Err(non_constant(&expression(node)?.span.start));
    }
    if op.is_postfix() {
        ctx.write("((")
    } else {
        ctx.write(&format!("({}(", op))
    }
}

fn close_unary(ctx: &mut Context<'_>, node: Node<'_>) -> CodegenResult<()> {
    let op = unary_op(node)?;
    if op.is_postfix() {
        ctx.write(&format!("){})", op))
    } else {
        ctx.write("))")
    }
}

fn check_call(ctx: &mut Context<'_>, node: Node<'_>) -> CodegenResult<()> {
    if ctx.in_enum_initializer {
        return Err(non_constant(&expression(node)?.span.start));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::c_char;

    #[test]
    fn test_c_char_escapes() {
        assert_eq!(c_char('a'), "'a'");
        assert_eq!(c_char('\n'), "'\\n'");
        assert_eq!(c_char('\''), "'\\''");
        assert_eq!(c_char('\\'), "'\\\\'");
        assert_eq!(c_char('é'), "233");
    }
}
