//! ec compiler - frontend
//!
//! This crate provides every compilation phase of the ec compiler:
//! - Lexer: character stream with pushback, tokens with pushback
//! - Parser: recursive descent, builds the AST and the symbol table
//! - AST: node definitions, generic walk and a debug printer
//! - C code generation: rule-driven emission over the AST walk

pub mod lexer;
pub mod parser;
pub mod ast;
pub mod cgen;

pub use lexer::{Lexer, Token, TokenType};
pub use parser::{ParseError, ParseOutput, Parser, ParserConfig};
pub use ast::{
    Declaration, Expression, ExpressionKind, FunctionDefinition, Statement, StatementKind,
    TopLevelItem, TranslationUnit,
};
pub use cgen::{CodeGenerator, CodegenConfig, CodegenError};

use ec_common::CompilerError;
use std::path::Path;

/// High-level frontend interface
pub struct Frontend;

impl Frontend {
    /// Parse ec source code. Syntax errors are collected in the returned
    /// diagnostics; only an internal compiler error fails the call.
    pub fn parse_source(source: &str, config: ParserConfig) -> Result<ParseOutput, CompilerError> {
        Ok(Parser::with_config(Lexer::new(source), config).parse()?)
    }

    /// Parse an ec source file
    pub fn parse_file(path: &Path, config: ParserConfig) -> Result<ParseOutput, CompilerError> {
        let lexer = Lexer::open(path)?;
        Ok(Parser::with_config(lexer, config).parse()?)
    }

    /// Parse and translate to C. Fails with [`CompilerError::Rejected`] when
    /// the parse recorded diagnostics.
    pub fn compile_source(source: &str, config: CodegenConfig) -> Result<String, CompilerError> {
        let output = Self::parse_source(source, ParserConfig::default())?;
        Self::emit(&output, config)
    }

    /// Translate an already parsed unit, refusing one with diagnostics
    pub fn emit(output: &ParseOutput, config: CodegenConfig) -> Result<String, CompilerError> {
        if output.diagnostics.has_errors() {
            return Err(CompilerError::Rejected {
                errors: output.diagnostics.error_count(),
            });
        }
        let code = CodeGenerator::new(&output.symbols, config).generate_to_string(&output.unit)?;
        Ok(code)
    }

    /// Tokenize source code (for debugging)
    pub fn tokenize_source(source: &str) -> Vec<Token> {
        Lexer::new(source).tokenize()
    }
}
