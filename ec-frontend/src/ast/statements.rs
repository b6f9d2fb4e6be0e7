//! Statement AST nodes, declarations and top-level items

use super::expressions::{Expression, Initializer};
use ec_common::{DataType, SourceSpan, SymbolId};
use serde::{Deserialize, Serialize};

/// AST Statement nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub kind: StatementKind,
    pub span: SourceSpan,
}

impl Statement {
    pub fn new(kind: StatementKind, span: SourceSpan) -> Self {
        Self { kind, span }
    }

    pub fn is_compound(&self) -> bool {
        matches!(self.kind, StatementKind::Compound(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StatementKind {
    /// Expression statement
    Expression(Expression),

    /// Lone `;`
    Empty,

    /// Compound statement (block)
    Compound(Vec<Statement>),

    /// Local variable declaration
    Declaration(Declaration),

    If {
        condition: Expression,
        then_stmt: Box<Statement>,
        else_stmt: Option<Box<Statement>>,
    },

    While {
        condition: Expression,
        body: Box<Statement>,
    },

    DoWhile {
        body: Box<Statement>,
        condition: Expression,
    },

    For {
        init: Option<ForInit>,
        condition: Option<Expression>,
        update: Option<Expression>,
        body: Box<Statement>,
    },

    /// Switch statement; clauses never fall through
    Switch {
        expression: Expression,
        cases: Vec<SwitchCase>,
    },

    Break,
    Continue,

    Goto {
        label: String,
        symbol_id: SymbolId,
    },

    Labeled {
        label: String,
        symbol_id: SymbolId,
        statement: Box<Statement>,
    },

    Return(Option<Expression>),

    /// Print a variable's name, value and type
    Vardump {
        name: String,
        symbol_id: SymbolId,
    },
}

/// First clause of a `for` header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ForInit {
    Declaration(Declaration),
    Expression(Expression),
}

/// `case value:` (or `default:` when `value` is `None`) and the statements
/// up to the next clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchCase {
    pub value: Option<Expression>,
    pub body: Vec<Statement>,
    pub span: SourceSpan,
}

/// `var name: type[size] = initializer`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    pub symbol_id: SymbolId,
    pub decl_type: DataType,
    /// Element count for arrays
    pub array_size: Option<usize>,
    pub initializer: Option<Initializer>,
    pub span: SourceSpan,
}

/// Function parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub symbol_id: SymbolId,
    pub param_type: DataType,
    pub span: SourceSpan,
}

/// Function definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub symbol_id: SymbolId,
    pub return_type: DataType,
    pub parameters: Vec<Parameter>,
    /// Always a compound statement
    pub body: Statement,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enumerator {
    pub name: String,
    pub symbol_id: SymbolId,
    pub value: Option<Expression>,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDefinition {
    pub name: String,
    pub enumerators: Vec<Enumerator>,
    pub span: SourceSpan,
}

/// Top-level items in a translation unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TopLevelItem {
    Function(FunctionDefinition),
    Declaration(Declaration),
    Enum(EnumDefinition),
}

/// Translation unit (entire source file)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationUnit {
    pub items: Vec<TopLevelItem>,
    pub span: SourceSpan,
}
