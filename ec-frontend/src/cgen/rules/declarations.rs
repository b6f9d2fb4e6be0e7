//! Rules for top-level items, declarations and initializers

use super::{nothing_between, Rule};
use crate::ast::{Declaration, FunctionDefinition, Node, Placement, TopLevelItem};
use crate::cgen::context::{CodegenResult, Context};
use crate::cgen::errors::CodegenError;
use ec_common::DataType;

pub(super) const TRANSLATION_UNIT: Rule = Rule {
    pre: prelude,
    between: nothing_between,
    post: finish,
};

pub(super) const FUNCTION: Rule = Rule {
    pre: function_header,
    between: nothing_between,
    post: blank_line,
};

pub(super) const ENUM: Rule = Rule {
    pre: open_enum,
    between: nothing_between,
    post: close_enum,
};

pub(super) const ENUMERATOR: Rule = Rule {
    pre: open_enumerator,
    between: nothing_between,
    post: close_enumerator,
};

pub(super) const DECLARATION: Rule = Rule {
    pre: open_declaration,
    between: nothing_between,
    post: close_declaration,
};

pub(super) const INITIALIZER_LIST: Rule = Rule {
    pre: open_list,
    between: list_separator,
    post: close_list,
};

/// C type for an ec type
pub(crate) fn c_type(data_type: DataType) -> &'static str {
    match data_type {
        DataType::Bool | DataType::Char => "char",
        DataType::Short => "short",
        DataType::Int | DataType::Unknown => "int",
        DataType::Long => "long",
        DataType::Float => "float",
        DataType::Double => "double",
        DataType::String => "const char *",
        DataType::Void => "void",
    }
}

/// `type name`, without a space after a pointer star
pub(crate) fn c_declarator(data_type: DataType, name: &str) -> String {
    let ty = c_type(data_type);
    if ty.ends_with('*') {
        format!("{}{}", ty, name)
    } else {
        format!("{} {}", ty, name)
    }
}

fn zero_value(decl: &Declaration) -> &'static str {
    if decl.array_size.is_some() {
        return "{0}";
    }
    match decl.decl_type {
        DataType::Float | DataType::Double => "0.0",
        DataType::String => "\"\"",
        _ => "0",
    }
}

fn signature(function: &FunctionDefinition) -> String {
    // C requires `int main`
    let return_type = if function.name == "main" {
        DataType::Int
    } else {
        function.return_type
    };
    let parameters = if function.parameters.is_empty() {
        "void".to_string()
    } else {
        function
            .parameters
            .iter()
            .map(|param| c_declarator(param.param_type, &param.name))
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!("{}({})", c_declarator(return_type, &function.name), parameters)
}

fn prelude(ctx: &mut Context<'_>, node: Node<'_>) -> CodegenResult<()> {
    let Node::TranslationUnit(unit) = node else {
        return Err(CodegenError::internal("prelude written for a non-unit node"));
    };
    ctx.write("#include <stdio.h>\n\n")?;

    if ctx.config.emit_prototypes {
        let mut any = false;
        for item in &unit.items {
            if let TopLevelItem::Function(function) = item {
                ctx.write(&signature(function))?;
                ctx.write(";\n")?;
                any = true;
            }
        }
        if any {
            ctx.write("\n")?;
        }
    }
    Ok(())
}

fn finish(ctx: &mut Context<'_>, _node: Node<'_>) -> CodegenResult<()> {
    ctx.flush()
}

fn function_header(ctx: &mut Context<'_>, node: Node<'_>) -> CodegenResult<()> {
    let Node::Function(function) = node else {
        return Err(CodegenError::internal("function rule applied to a non-function node"));
    };
    log::trace!("emitting function {}", function.name);
    ctx.in_main = function.name == "main";
    ctx.line(&signature(function))
}

fn blank_line(ctx: &mut Context<'_>, _node: Node<'_>) -> CodegenResult<()> {
    ctx.in_main = false;
    ctx.write("\n")
}

fn open_enum(ctx: &mut Context<'_>, node: Node<'_>) -> CodegenResult<()> {
    let Node::Enum(definition) = node else {
        return Err(CodegenError::internal("enum rule applied to a non-enum node"));
    };
    ctx.line(&format!("enum {} {{", definition.name))?;
    ctx.depth += 1;
    Ok(())
}

fn close_enum(ctx: &mut Context<'_>, _node: Node<'_>) -> CodegenResult<()> {
    ctx.depth = ctx.depth.saturating_sub(1);
    ctx.line("};")?;
    ctx.write("\n")
}

fn open_enumerator(ctx: &mut Context<'_>, node: Node<'_>) -> CodegenResult<()> {
    let Node::Enumerator(enumerator) = node else {
        return Err(CodegenError::internal("enumerator rule applied to another node"));
    };
    ctx.indent()?;
    ctx.write(&enumerator.name)?;
    if enumerator.value.is_some() {
        ctx.write(" = ")?;
        ctx.in_enum_initializer = true;
    }
    Ok(())
}

fn close_enumerator(ctx: &mut Context<'_>, _node: Node<'_>) -> CodegenResult<()> {
    ctx.in_enum_initializer = false;
    ctx.write(",\n")
}

fn open_declaration(ctx: &mut Context<'_>, node: Node<'_>) -> CodegenResult<()> {
    let Node::Declaration(decl, placement) = node else {
        return Err(CodegenError::internal("declaration rule applied to another node"));
    };
    if placement != Placement::ForInit {
        ctx.indent()?;
    }
    ctx.write(&c_declarator(decl.decl_type, &decl.name))?;
    if let Some(size) = decl.array_size {
        ctx.write(&format!("[{}]", size))?;
    }
    if decl.initializer.is_some() {
        ctx.write(" = ")?;
    }
    Ok(())
}

fn close_declaration(ctx: &mut Context<'_>, node: Node<'_>) -> CodegenResult<()> {
    let Node::Declaration(decl, placement) = node else {
        return Err(CodegenError::internal("declaration rule applied to another node"));
    };
    if decl.initializer.is_none() {
        ctx.write(" = ")?;
        ctx.write(zero_value(decl))?;
    }
    if placement != Placement::ForInit {
        ctx.write(";\n")?;
    }
    Ok(())
}

fn open_list(ctx: &mut Context<'_>, _node: Node<'_>) -> CodegenResult<()> {
    if ctx.in_array_initializer {
        return Err(CodegenError::internal("nested initializer list"));
    }
    ctx.in_array_initializer = true;
    ctx.write("{")
}

fn list_separator(ctx: &mut Context<'_>, _node: Node<'_>, _slot: usize) -> CodegenResult<()> {
    ctx.write(", ")
}

fn close_list(ctx: &mut Context<'_>, _node: Node<'_>) -> CodegenResult<()> {
    ctx.in_array_initializer = false;
    ctx.write("}")
}
