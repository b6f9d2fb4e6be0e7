//! Statement rules

use super::{nothing, nothing_between, statement, Rule};
use crate::ast::{Node, Statement, StatementKind};
use crate::cgen::context::{CodegenResult, Context};
use crate::cgen::errors::CodegenError;
use ec_common::DataType;

pub(super) const EXPRESSION: Rule = Rule {
    pre: indent,
    between: nothing_between,
    post: end_statement,
};

pub(super) const EMPTY: Rule = Rule {
    pre: indent,
    between: nothing_between,
    post: end_statement,
};

pub(super) const COMPOUND: Rule = Rule {
    pre: open_block,
    between: nothing_between,
    post: close_block,
};

pub(super) const IF: Rule = Rule {
    pre: open_if,
    between: if_branch,
    post: close_if,
};

pub(super) const WHILE: Rule = Rule {
    pre: open_while,
    between: loop_body,
    post: close_loop,
};

pub(super) const DO_WHILE: Rule = Rule {
    pre: open_do,
    between: do_condition,
    post: close_do,
};

pub(super) const FOR: Rule = Rule {
    pre: open_for,
    between: for_clause,
    post: close_loop,
};

pub(super) const SWITCH: Rule = Rule {
    pre: open_switch,
    between: switch_body,
    post: close_switch,
};

pub(super) const CASE: Rule = Rule {
    pre: case_label,
    between: case_colon,
    post: case_break,
};

pub(super) const JUMP: Rule = Rule {
    pre: jump,
    between: nothing_between,
    post: nothing,
};

pub(super) const LABELED: Rule = Rule {
    pre: label,
    between: nothing_between,
    post: nothing,
};

pub(super) const RETURN: Rule = Rule {
    pre: open_return,
    between: nothing_between,
    post: end_statement,
};

pub(super) const VARDUMP: Rule = Rule {
    pre: vardump,
    between: nothing_between,
    post: nothing,
};

fn indent(ctx: &mut Context<'_>, _node: Node<'_>) -> CodegenResult<()> {
    ctx.indent()
}

fn end_statement(ctx: &mut Context<'_>, _node: Node<'_>) -> CodegenResult<()> {
    ctx.write(";\n")
}

fn open_block(ctx: &mut Context<'_>, _node: Node<'_>) -> CodegenResult<()> {
    ctx.open_block()
}

fn close_block(ctx: &mut Context<'_>, node: Node<'_>) -> CodegenResult<()> {
    // A body of `main` that can fall off its end still has to return an int
    if ctx.in_main && ctx.depth == 1 {
        if let StatementKind::Compound(body) = &statement(node)?.kind {
            let returns = body
                .last()
                .is_some_and(|last| matches!(last.kind, StatementKind::Return(_)));
            if !returns {
                ctx.line("return 0;")?;
            }
        }
    }
    ctx.close_block()
}

/// Body of a loop statement
fn loop_body_of(stmt: &Statement) -> CodegenResult<&Statement> {
    match &stmt.kind {
        StatementKind::While { body, .. }
        | StatementKind::DoWhile { body, .. }
        | StatementKind::For { body, .. } => Ok(body),
        _ => Err(CodegenError::internal("loop rule applied to a non-loop statement")),
    }
}

fn open_if(ctx: &mut Context<'_>, _node: Node<'_>) -> CodegenResult<()> {
    ctx.indent()?;
    ctx.write("if (")
}

fn if_branch(ctx: &mut Context<'_>, node: Node<'_>, slot: usize) -> CodegenResult<()> {
    let StatementKind::If {
        then_stmt,
        else_stmt,
        ..
    } = &statement(node)?.kind
    else {
        return Err(CodegenError::internal("if rule applied to a non-if statement"));
    };

    if slot == 1 {
        ctx.write(")\n")?;
        return ctx.open_body(then_stmt);
    }

    ctx.close_body(then_stmt)?;
    if let Some(else_stmt) = else_stmt {
        ctx.line("else")?;
        ctx.open_body(else_stmt)?;
    }
    Ok(())
}

fn close_if(ctx: &mut Context<'_>, node: Node<'_>) -> CodegenResult<()> {
    if let StatementKind::If {
        else_stmt: Some(else_stmt),
        ..
    } = &statement(node)?.kind
    {
        ctx.close_body(else_stmt)?;
    }
    Ok(())
}

fn open_while(ctx: &mut Context<'_>, _node: Node<'_>) -> CodegenResult<()> {
    ctx.indent()?;
    ctx.write("while (")
}

/// Fires in front of the body slot of `while` (slot 1) and `for` (slot 3)
fn loop_body(ctx: &mut Context<'_>, node: Node<'_>, _slot: usize) -> CodegenResult<()> {
    let body = loop_body_of(statement(node)?)?;
    ctx.write(")\n")?;
    ctx.open_body(body)
}

fn close_loop(ctx: &mut Context<'_>, node: Node<'_>) -> CodegenResult<()> {
    let body = loop_body_of(statement(node)?)?;
    ctx.close_body(body)
}

fn open_do(ctx: &mut Context<'_>, node: Node<'_>) -> CodegenResult<()> {
    let body = loop_body_of(statement(node)?)?;
    ctx.line("do")?;
    ctx.open_body(body)
}

fn do_condition(ctx: &mut Context<'_>, node: Node<'_>, _slot: usize) -> CodegenResult<()> {
    let body = loop_body_of(statement(node)?)?;
    ctx.close_body(body)?;
    ctx.indent()?;
    ctx.write("while (")
}

fn close_do(ctx: &mut Context<'_>, _node: Node<'_>) -> CodegenResult<()> {
    ctx.write(");\n")
}

fn open_for(ctx: &mut Context<'_>, _node: Node<'_>) -> CodegenResult<()> {
    ctx.indent()?;
    ctx.write("for (")
}

/// `;` after the init and condition clauses, then the body
fn for_clause(ctx: &mut Context<'_>, node: Node<'_>, slot: usize) -> CodegenResult<()> {
    let stmt = statement(node)?;
    let StatementKind::For {
        condition, update, ..
    } = &stmt.kind
    else {
        return Err(CodegenError::internal("for rule applied to a non-for statement"));
    };

    match slot {
        1 => ctx.write(if condition.is_some() { "; " } else { ";" }),
        2 => ctx.write(if update.is_some() { "; " } else { ";" }),
        _ => loop_body(ctx, node, slot),
    }
}

fn open_switch(ctx: &mut Context<'_>, _node: Node<'_>) -> CodegenResult<()> {
    ctx.indent()?;
    ctx.write("switch (")
}

fn switch_cases(node: Node<'_>) -> CodegenResult<usize> {
    match &statement(node)?.kind {
        StatementKind::Switch { cases, .. } => Ok(cases.len()),
        _ => Err(CodegenError::internal("switch rule applied to a non-switch statement")),
    }
}

/// Fires in front of every clause; the first one opens the body
fn switch_body(ctx: &mut Context<'_>, _node: Node<'_>, slot: usize) -> CodegenResult<()> {
    if slot == 1 {
        ctx.write(")\n")?;
        ctx.open_block()?;
    }
    Ok(())
}

fn close_switch(ctx: &mut Context<'_>, node: Node<'_>) -> CodegenResult<()> {
    if switch_cases(node)? == 0 {
        ctx.write(")\n")?;
        ctx.line("{")?;
        return ctx.line("}");
    }
    ctx.close_block()
}

fn case_label(ctx: &mut Context<'_>, node: Node<'_>) -> CodegenResult<()> {
    let Node::SwitchCase(case) = node else {
        return Err(CodegenError::internal("case rule applied to a non-case node"));
    };
    ctx.outdent()?;
    ctx.write(if case.value.is_some() { "case " } else { "default" })
}

fn case_colon(ctx: &mut Context<'_>, _node: Node<'_>, slot: usize) -> CodegenResult<()> {
    if slot == 1 {
        ctx.write(":\n")?;
    }
    Ok(())
}

/// Clauses never fall through
fn case_break(ctx: &mut Context<'_>, node: Node<'_>) -> CodegenResult<()> {
    if let Node::SwitchCase(case) = node {
        if case.body.is_empty() {
            ctx.write(":\n")?;
        }
    }
    ctx.line("break;")
}

fn jump(ctx: &mut Context<'_>, node: Node<'_>) -> CodegenResult<()> {
    let text = match &statement(node)?.kind {
        StatementKind::Break => "break;".to_string(),
        StatementKind::Continue => "continue;".to_string(),
        StatementKind::Goto { label, .. } => format!("goto {};", label),
        _ => return Err(CodegenError::internal("jump rule applied to a non-jump statement")),
    };
    ctx.line(&text)
}

fn label(ctx: &mut Context<'_>, node: Node<'_>) -> CodegenResult<()> {
    let StatementKind::Labeled {
        label,
        statement: target,
        ..
    } = &statement(node)?.kind
    else {
        return Err(CodegenError::internal("label rule applied to an unlabeled statement"));
    };
    ctx.outdent()?;
    // A C label must be followed by a statement, not a declaration
    if matches!(target.kind, StatementKind::Declaration(_)) {
        ctx.write(&format!("{}: ;\n", label))
    } else {
        ctx.write(&format!("{}:\n", label))
    }
}

fn open_return(ctx: &mut Context<'_>, node: Node<'_>) -> CodegenResult<()> {
    ctx.indent()?;
    match &statement(node)?.kind {
        StatementKind::Return(Some(_)) => ctx.write("return "),
        StatementKind::Return(None) if ctx.in_main => ctx.write("return 0"),
        _ => ctx.write("return"),
    }
}

/// `printf` format and argument for a dumped variable of type `data_type`
fn vardump_format(name: &str, data_type: DataType) -> Option<(&'static str, String)> {
    let format = match data_type {
        DataType::Short | DataType::Int => "%d",
        DataType::Long => "%ld",
        DataType::Float | DataType::Double => "%g",
        DataType::Char => "'%c'",
        DataType::Bool => {
            return Some(("%s", format!("{} ? \"true\" : \"false\"", name)));
        }
        DataType::String => "\\\"%s\\\"",
        DataType::Void | DataType::Unknown => return None,
    };
    Some((format, name.to_string()))
}

fn vardump(ctx: &mut Context<'_>, node: Node<'_>) -> CodegenResult<()> {
    let stmt = statement(node)?;
    let StatementKind::Vardump { name, symbol_id } = &stmt.kind else {
        return Err(CodegenError::internal("vardump rule applied to another statement"));
    };
    let Some(symbol) = ctx.symbols.get(*symbol_id) else {
        return Err(CodegenError::UnknownSymbol {
            name: name.clone(),
            location: stmt.span.start.clone(),
        });
    };

    let data_type = symbol.data_type;
    let unsupported = || CodegenError::UnsupportedVardump {
        name: name.clone(),
        data_type,
        location: stmt.span.start.clone(),
    };
    if symbol.is_array {
        return Err(unsupported());
    }
    let (format, argument) = vardump_format(name, data_type).ok_or_else(unsupported)?;

    ctx.line(&format!(
        "printf(\"#  {} => {} ({})\\n\", {});",
        name, format, data_type, argument
    ))
}
