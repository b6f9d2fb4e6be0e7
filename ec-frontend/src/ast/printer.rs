//! Indented tree dump of an AST, for `ec ast` and debugging

use super::expressions::{ExpressionKind, Initializer};
use super::statements::{StatementKind, TranslationUnit};
use super::walk::{walk, Node, Visitor};
use std::convert::Infallible;

#[derive(Default)]
struct Printer {
    out: String,
    depth: usize,
}

fn label(node: Node<'_>) -> String {
    match node {
        Node::TranslationUnit(_) => "TranslationUnit".to_string(),
        Node::Function(f) => format!("Function {} -> {}", f.name, f.return_type),
        Node::Parameters(_) => "Parameters".to_string(),
        Node::Parameter(p) => format!("Parameter {}: {}", p.name, p.param_type),
        Node::Enum(e) => format!("Enum {}", e.name),
        Node::Enumerator(e) => format!("Enumerator {}", e.name),
        Node::Declaration(d, _) => match d.array_size {
            Some(size) => format!("Declaration {}: {}[{}]", d.name, d.decl_type, size),
            None => format!("Declaration {}: {}", d.name, d.decl_type),
        },
        Node::Initializer(Initializer::Expression(_)) => "Initializer".to_string(),
        Node::Initializer(Initializer::List(_)) => "InitializerList".to_string(),
        Node::Statement(stmt) => match &stmt.kind {
            StatementKind::Expression(_) => "ExpressionStatement".to_string(),
            StatementKind::Empty => "Empty".to_string(),
            StatementKind::Compound(_) => "Compound".to_string(),
            StatementKind::Declaration(_) => "DeclarationStatement".to_string(),
            StatementKind::If { .. } => "If".to_string(),
            StatementKind::While { .. } => "While".to_string(),
            StatementKind::DoWhile { .. } => "DoWhile".to_string(),
            StatementKind::For { .. } => "For".to_string(),
            StatementKind::Switch { .. } => "Switch".to_string(),
            StatementKind::Break => "Break".to_string(),
            StatementKind::Continue => "Continue".to_string(),
            StatementKind::Goto { label, .. } => format!("Goto {}", label),
            StatementKind::Labeled { label, .. } => format!("Label {}", label),
            StatementKind::Return(_) => "Return".to_string(),
            StatementKind::Vardump { name, .. } => format!("Vardump {}", name),
        },
        Node::SwitchCase(case) => {
            let name = if case.value.is_some() { "Case" } else { "Default" };
            name.to_string()
        }
        Node::Expression(expr) => match &expr.kind {
            ExpressionKind::IntLiteral(v) => format!("IntLiteral {}", v),
            ExpressionKind::FloatLiteral(v) => format!("FloatLiteral {:?}", v),
            ExpressionKind::CharLiteral(c) => format!("CharLiteral '{}'", c.escape_default()),
            ExpressionKind::BoolLiteral(b) => format!("BoolLiteral {}", b),
            ExpressionKind::StringLiteral { value, .. } => {
                format!("StringLiteral \"{}\"", value.escape_default())
            }
            ExpressionKind::Identifier { name, .. } => format!("Identifier {}", name),
            ExpressionKind::Binary { op, .. } => format!("Binary {}", op),
            ExpressionKind::Assignment { op, .. } => format!("Assignment {}", op),
            ExpressionKind::Unary { op, .. } if op.is_postfix() => format!("Unary {} (postfix)", op),
            ExpressionKind::Unary { op, .. } => format!("Unary {}", op),
            ExpressionKind::Call { .. } => "Call".to_string(),
            ExpressionKind::Index { .. } => "Index".to_string(),
        },
        Node::Arguments(_) => "Arguments".to_string(),
    }
}

impl<'a> Visitor<'a> for Printer {
    type Error = Infallible;

    fn pre(&mut self, node: Node<'a>) -> Result<(), Infallible> {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
        self.out.push_str(&label(node));
        self.out.push('\n');
        self.depth += 1;
        Ok(())
    }

    fn post(&mut self, _node: Node<'a>) -> Result<(), Infallible> {
        self.depth -= 1;
        Ok(())
    }
}

/// Render the tree, one node per line, children indented by two spaces
pub fn dump(unit: &TranslationUnit) -> String {
    let mut printer = Printer::default();
    if let Err(never) = walk(Node::TranslationUnit(unit), &mut printer) {
        match never {}
    }
    printer.out
}
