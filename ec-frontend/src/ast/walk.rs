//! Generic depth-first traversal
//!
//! [`Node`] is a borrowed, copyable view of any AST node. Each node exposes
//! its children as an ordered list of *slots*; an optional child that is
//! absent still occupies its slot, so slot numbers mean the same thing for
//! every node of a kind (slot 2 of an `if` is always the `else` branch).
//!
//! [`walk`] calls `pre` on a node, then for every slot calls `between`
//! (from the second slot on) and recurses into the child if present, and
//! finally calls `post`.

use super::expressions::{Expression, ExpressionKind, Initializer};
use super::statements::*;
use ec_common::SourceSpan;

/// Where a declaration sits, which changes how it is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Global,
    Local,
    /// First clause of a `for` header
    ForInit,
}

#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    TranslationUnit(&'a TranslationUnit),
    Function(&'a FunctionDefinition),
    Parameters(&'a [Parameter]),
    Parameter(&'a Parameter),
    Enum(&'a EnumDefinition),
    Enumerator(&'a Enumerator),
    Declaration(&'a Declaration, Placement),
    Initializer(&'a Initializer),
    Statement(&'a Statement),
    SwitchCase(&'a SwitchCase),
    Expression(&'a Expression),
    Arguments(&'a [Expression]),
}

impl<'a> Node<'a> {
    /// Ordered child slots of this node
    pub fn slots(self) -> Vec<Option<Node<'a>>> {
        match self {
            Node::TranslationUnit(unit) => unit
                .items
                .iter()
                .map(|item| {
                    Some(match item {
                        TopLevelItem::Function(function) => Node::Function(function),
                        TopLevelItem::Declaration(decl) => Node::Declaration(decl, Placement::Global),
                        TopLevelItem::Enum(definition) => Node::Enum(definition),
                    })
                })
                .collect(),
            Node::Function(function) => vec![
                Some(Node::Parameters(&function.parameters)),
                Some(Node::Statement(&function.body)),
            ],
            Node::Parameters(params) => params.iter().map(|p| Some(Node::Parameter(p))).collect(),
            Node::Parameter(_) => Vec::new(),
            Node::Enum(definition) => definition
                .enumerators
                .iter()
                .map(|e| Some(Node::Enumerator(e)))
                .collect(),
            Node::Enumerator(enumerator) => vec![enumerator.value.as_ref().map(Node::Expression)],
            Node::Declaration(decl, _) => vec![decl.initializer.as_ref().map(Node::Initializer)],
            Node::Initializer(Initializer::Expression(expr)) => vec![Some(Node::Expression(expr))],
            Node::Initializer(Initializer::List(values)) => {
                values.iter().map(|v| Some(Node::Expression(v))).collect()
            }
            Node::Statement(stmt) => statement_slots(stmt),
            Node::SwitchCase(case) => std::iter::once(case.value.as_ref().map(Node::Expression))
                .chain(case.body.iter().map(|s| Some(Node::Statement(s))))
                .collect(),
            Node::Expression(expr) => expression_slots(expr),
            Node::Arguments(args) => args.iter().map(|a| Some(Node::Expression(a))).collect(),
        }
    }

    pub fn span(self) -> Option<&'a SourceSpan> {
        match self {
            Node::TranslationUnit(unit) => Some(&unit.span),
            Node::Function(function) => Some(&function.span),
            Node::Parameter(param) => Some(&param.span),
            Node::Enum(definition) => Some(&definition.span),
            Node::Enumerator(enumerator) => Some(&enumerator.span),
            Node::Declaration(decl, _) => Some(&decl.span),
            Node::Statement(stmt) => Some(&stmt.span),
            Node::SwitchCase(case) => Some(&case.span),
            Node::Expression(expr) => Some(&expr.span),
            Node::Parameters(_) | Node::Initializer(_) | Node::Arguments(_) => None,
        }
    }
}

fn boxed(stmt: &Statement) -> Option<Node<'_>> {
    Some(Node::Statement(stmt))
}

fn statement_slots(stmt: &Statement) -> Vec<Option<Node<'_>>> {
    match &stmt.kind {
        StatementKind::Expression(expr) => vec![Some(Node::Expression(expr))],
        StatementKind::Compound(stmts) => stmts.iter().map(|s| Some(Node::Statement(s))).collect(),
        StatementKind::Declaration(decl) => vec![Some(Node::Declaration(decl, Placement::Local))],
        StatementKind::If {
            condition,
            then_stmt,
            else_stmt,
        } => vec![
            Some(Node::Expression(condition)),
            boxed(then_stmt),
            else_stmt.as_deref().and_then(boxed),
        ],
        StatementKind::While { condition, body } => {
            vec![Some(Node::Expression(condition)), boxed(body)]
        }
        StatementKind::DoWhile { body, condition } => {
            vec![boxed(body), Some(Node::Expression(condition))]
        }
        StatementKind::For {
            init,
            condition,
            update,
            body,
        } => vec![
            init.as_ref().map(|init| match init {
                ForInit::Declaration(decl) => Node::Declaration(decl, Placement::ForInit),
                ForInit::Expression(expr) => Node::Expression(expr),
            }),
            condition.as_ref().map(Node::Expression),
            update.as_ref().map(Node::Expression),
            boxed(body),
        ],
        StatementKind::Switch { expression, cases } => {
            std::iter::once(Some(Node::Expression(expression)))
                .chain(cases.iter().map(|c| Some(Node::SwitchCase(c))))
                .collect()
        }
        StatementKind::Labeled { statement, .. } => vec![boxed(statement)],
        StatementKind::Return(value) => vec![value.as_ref().map(Node::Expression)],
        StatementKind::Empty
        | StatementKind::Break
        | StatementKind::Continue
        | StatementKind::Goto { .. }
        | StatementKind::Vardump { .. } => Vec::new(),
    }
}

fn expression_slots(expr: &Expression) -> Vec<Option<Node<'_>>> {
    match &expr.kind {
        ExpressionKind::Binary { left, right, .. } => {
            vec![Some(Node::Expression(left)), Some(Node::Expression(right))]
        }
        ExpressionKind::Assignment { target, value, .. } => {
            vec![Some(Node::Expression(target)), Some(Node::Expression(value))]
        }
        ExpressionKind::Unary { operand, .. } => vec![Some(Node::Expression(operand))],
        ExpressionKind::Call {
            function,
            arguments,
        } => vec![Some(Node::Expression(function)), Some(Node::Arguments(arguments))],
        ExpressionKind::Index { array, index } => {
            vec![Some(Node::Expression(array)), Some(Node::Expression(index))]
        }
        ExpressionKind::IntLiteral(_)
        | ExpressionKind::FloatLiteral(_)
        | ExpressionKind::CharLiteral(_)
        | ExpressionKind::BoolLiteral(_)
        | ExpressionKind::StringLiteral { .. }
        | ExpressionKind::Identifier { .. } => Vec::new(),
    }
}

/// Hooks called by [`walk`]
pub trait Visitor<'a> {
    type Error;

    /// Before any child
    fn pre(&mut self, node: Node<'a>) -> Result<(), Self::Error>;

    /// Between slot `slot - 1` and slot `slot`
    fn between(&mut self, _node: Node<'a>, _slot: usize) -> Result<(), Self::Error> {
        Ok(())
    }

    /// After the last child
    fn post(&mut self, _node: Node<'a>) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Depth-first traversal driving a [`Visitor`]
pub fn walk<'a, V>(node: Node<'a>, visitor: &mut V) -> Result<(), V::Error>
where
    V: Visitor<'a> + ?Sized,
{
    visitor.pre(node)?;
    for (index, slot) in node.slots().into_iter().enumerate() {
        if index > 0 {
            visitor.between(node, index)?;
        }
        if let Some(child) = slot {
            walk(child, visitor)?;
        }
    }
    visitor.post(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::BinaryOp;
    use ec_common::SourceLocation;

    fn span() -> SourceSpan {
        SourceSpan::from_location(SourceLocation::new_simple(1, 1))
    }

    fn int(value: i64) -> Expression {
        Expression::new(ExpressionKind::IntLiteral(value), span())
    }

    /// Records the order hooks fire in
    struct Trace(Vec<String>);

    impl<'a> Visitor<'a> for Trace {
        type Error = ();

        fn pre(&mut self, node: Node<'a>) -> Result<(), ()> {
            if let Node::Expression(Expression {
                kind: ExpressionKind::IntLiteral(v),
                ..
            }) = node
            {
                self.0.push(v.to_string());
            } else {
                self.0.push("pre".to_string());
            }
            Ok(())
        }

        fn between(&mut self, _node: Node<'a>, slot: usize) -> Result<(), ()> {
            self.0.push(format!("in{}", slot));
            Ok(())
        }

        fn post(&mut self, _node: Node<'a>) -> Result<(), ()> {
            self.0.push("post".to_string());
            Ok(())
        }
    }

    #[test]
    fn binary_hooks_fire_in_order() {
        let expr = Expression::new(
            ExpressionKind::Binary {
                op: BinaryOp::Add,
                left: Box::new(int(1)),
                right: Box::new(int(2)),
            },
            span(),
        );
        let mut trace = Trace(Vec::new());
        walk(Node::Expression(&expr), &mut trace).unwrap();
        assert_eq!(trace.0, vec!["pre", "1", "post", "in1", "2", "post", "post"]);
    }

    #[test]
    fn absent_else_keeps_its_slot() {
        let stmt = Statement::new(
            StatementKind::If {
                condition: int(1),
                then_stmt: Box::new(Statement::new(StatementKind::Empty, span())),
                else_stmt: None,
            },
            span(),
        );
        let slots = Node::Statement(&stmt).slots();
        assert_eq!(slots.len(), 3);
        assert!(slots[2].is_none());

        let mut trace = Trace(Vec::new());
        walk(Node::Statement(&stmt), &mut trace).unwrap();
        assert!(trace.0.contains(&"in2".to_string()));
    }

    #[test]
    fn errors_stop_the_walk() {
        struct Fail;
        impl<'a> Visitor<'a> for Fail {
            type Error = &'static str;
            fn pre(&mut self, _node: Node<'a>) -> Result<(), &'static str> {
                Err("stop")
            }
        }
        let expr = int(3);
        assert_eq!(walk(Node::Expression(&expr), &mut Fail), Err("stop"));
    }
}
