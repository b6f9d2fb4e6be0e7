//! Per-node-kind emission rules
//!
//! Every node kind maps to a [`Rule`]: three plain function pointers fired
//! by the walker before the first child, between children and after the
//! last child. [`rule_for`] selects the rule with a single `match`.

mod declarations;
mod expressions;
mod statements;

use super::context::{CodegenResult, Context};
use super::errors::CodegenError;
use crate::ast::{Expression, ExpressionKind, Initializer, Node, Statement, StatementKind};

pub(crate) type Hook = fn(&mut Context<'_>, Node<'_>) -> CodegenResult<()>;
pub(crate) type SlotHook = fn(&mut Context<'_>, Node<'_>, usize) -> CodegenResult<()>;

#[derive(Clone, Copy)]
pub(crate) struct Rule {
    pub(crate) pre: Hook,
    pub(crate) between: SlotHook,
    pub(crate) post: Hook,
}

fn nothing(_ctx: &mut Context<'_>, _node: Node<'_>) -> CodegenResult<()> {
    Ok(())
}

fn nothing_between(_ctx: &mut Context<'_>, _node: Node<'_>, _slot: usize) -> CodegenResult<()> {
    Ok(())
}

const NOOP: Rule = Rule {
    pre: nothing,
    between: nothing_between,
    post: nothing,
};

pub(crate) fn rule_for(node: Node<'_>) -> Rule {
    use declarations as d;
    use expressions as e;
    use statements as s;

    match node {
        Node::TranslationUnit(_) => d::TRANSLATION_UNIT,
        Node::Function(_) => d::FUNCTION,
        // The signature is written whole by the function rule
        Node::Parameters(_) | Node::Parameter(_) => NOOP,
        Node::Enum(_) => d::ENUM,
        Node::Enumerator(_) => d::ENUMERATOR,
        Node::Declaration(..) => d::DECLARATION,
        Node::Initializer(Initializer::Expression(_)) => NOOP,
        Node::Initializer(Initializer::List(_)) => d::INITIALIZER_LIST,
        Node::Statement(stmt) => match &stmt.kind {
            StatementKind::Expression(_) => s::EXPRESSION,
            StatementKind::Empty => s::EMPTY,
            StatementKind::Compound(_) => s::COMPOUND,
            StatementKind::Declaration(_) => NOOP,
            StatementKind::If { .. } => s::IF,
            StatementKind::While { .. } => s::WHILE,
            StatementKind::DoWhile { .. } => s::DO_WHILE,
            StatementKind::For { .. } => s::FOR,
            StatementKind::Switch { .. } => s::SWITCH,
            StatementKind::Break | StatementKind::Continue | StatementKind::Goto { .. } => s::JUMP,
            StatementKind::Labeled { .. } => s::LABELED,
            StatementKind::Return(_) => s::RETURN,
            StatementKind::Vardump { .. } => s::VARDUMP,
        },
        Node::SwitchCase(_) => s::CASE,
        Node::Expression(expr) => match &expr.kind {
            ExpressionKind::Binary { .. } | ExpressionKind::Assignment { .. } => e::BINARY,
            ExpressionKind::Unary { .. } => e::UNARY,
            ExpressionKind::Call { .. } => e::CALL,
            ExpressionKind::Index { .. } => e::INDEX,
            ExpressionKind::IntLiteral(_)
            | ExpressionKind::FloatLiteral(_)
            | ExpressionKind::CharLiteral(_)
            | ExpressionKind::BoolLiteral(_)
            | ExpressionKind::StringLiteral { .. }
            | ExpressionKind::Identifier { .. } => e::LEAF,
        },
        Node::Arguments(_) => e::ARGUMENTS,
    }
}

fn statement<'n>(node: Node<'n>) -> CodegenResult<&'n Statement> {
    match node {
        Node::Statement(stmt) => Ok(stmt),
        other => Err(CodegenError::internal(format!(
            "statement rule applied to {:?}",
            other
        ))),
    }
}

fn expression<'n>(node: Node<'n>) -> CodegenResult<&'n Expression> {
    match node {
        Node::Expression(expr) => Ok(expr),
        other => Err(CodegenError::internal(format!(
            "expression rule applied to {:?}",
            other
        ))),
    }
}
