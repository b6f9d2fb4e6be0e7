//! Abstract Syntax Tree definitions
//!
//! The parser builds a [`TranslationUnit`]; after that the tree is only
//! read, by the code generator and the debug printer, both through the
//! generic [`walk`].

pub mod ops;
pub mod expressions;
pub mod statements;
pub mod walk;
pub mod printer;

// Re-export commonly used types at module level
pub use ops::{BinaryOp, UnaryOp};
pub use expressions::{c_quote, Expression, ExpressionKind, Initializer};
pub use statements::{
    Declaration, EnumDefinition, Enumerator, ForInit, FunctionDefinition, Parameter, Statement,
    StatementKind, SwitchCase, TopLevelItem, TranslationUnit,
};
pub use walk::{walk, Node, Placement, Visitor};
pub use printer::dump;
