//! Emission state shared by every rule

use super::errors::CodegenError;
use crate::ast::Statement;
use ec_common::SymbolTable;
use serde::{Deserialize, Serialize};
use std::io::Write;

pub type CodegenResult<T> = Result<T, CodegenError>;

/// Code generator settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenConfig {
    /// Spaces per nesting level
    pub indent_width: usize,
    /// Emit a prototype for every function ahead of the definitions
    pub emit_prototypes: bool,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            emit_prototypes: true,
        }
    }
}

pub struct Context<'w> {
    out: &'w mut dyn Write,
    pub(crate) symbols: &'w SymbolTable,
    pub(crate) config: &'w CodegenConfig,
    /// Current nesting level
    pub(crate) depth: usize,
    /// Inside `name = value` of an enumerator
    pub(crate) in_enum_initializer: bool,
    /// Inside a brace-enclosed initializer list
    pub(crate) in_array_initializer: bool,
    /// Inside `main`, which is always emitted returning `int`
    pub(crate) in_main: bool,
}

impl<'w> Context<'w> {
    pub fn new(out: &'w mut dyn Write, symbols: &'w SymbolTable, config: &'w CodegenConfig) -> Self {
        Self {
            out,
            symbols,
            config,
            depth: 0,
            in_enum_initializer: false,
            in_array_initializer: false,
            in_main: false,
        }
    }

    pub(crate) fn write(&mut self, text: &str) -> CodegenResult<()> {
        self.out.write_all(text.as_bytes())?;
        Ok(())
    }

    pub(crate) fn indent(&mut self) -> CodegenResult<()> {
        let width = self.depth * self.config.indent_width;
        write!(self.out, "{:width$}", "", width = width)?;
        Ok(())
    }

    /// Indent one level less than the current depth (case and goto labels)
    pub(crate) fn outdent(&mut self) -> CodegenResult<()> {
        let width = self.depth.saturating_sub(1) * self.config.indent_width;
        write!(self.out, "{:width$}", "", width = width)?;
        Ok(())
    }

    /// Indented line
    pub(crate) fn line(&mut self, text: &str) -> CodegenResult<()> {
        self.indent()?;
        self.write(text)?;
        self.write("\n")
    }

    /// Open a block
    pub(crate) fn open_block(&mut self) -> CodegenResult<()> {
        self.line("{")?;
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn close_block(&mut self) -> CodegenResult<()> {
        self.depth = self.depth.saturating_sub(1);
        self.line("}")
    }

    /// Bodies of `if`/`while`/`do`/`for` that are not already blocks get
    /// synthesized braces
    pub(crate) fn open_body(&mut self, body: &Statement) -> CodegenResult<()> {
        if body.is_compound() {
            Ok(())
        } else {
            self.open_block()
        }
    }

    pub(crate) fn close_body(&mut self, body: &Statement) -> CodegenResult<()> {
        if body.is_compound() {
            Ok(())
        } else {
            self.close_block()
        }
    }

    pub(crate) fn flush(&mut self) -> CodegenResult<()> {
        self.out.flush()?;
        Ok(())
    }
}
