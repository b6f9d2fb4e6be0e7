//! C code generation
//!
//! The generator drives the generic AST walk with [`Context`] as the
//! visitor. Each hook looks up the [`rules::Rule`] for the node kind and
//! writes its piece of C text.

mod context;
mod errors;
mod rules;

pub use context::{CodegenConfig, CodegenResult, Context};
pub use errors::CodegenError;

use crate::ast::{walk, Node, TranslationUnit, Visitor};
use ec_common::SymbolTable;
use std::io::Write;

impl<'a, 'w> Visitor<'a> for Context<'w> {
    type Error = CodegenError;

    fn pre(&mut self, node: Node<'a>) -> CodegenResult<()> {
        (rules::rule_for(node).pre)(self, node)
    }

    fn between(&mut self, node: Node<'a>, slot: usize) -> CodegenResult<()> {
        (rules::rule_for(node).between)(self, node, slot)
    }

    fn post(&mut self, node: Node<'a>) -> CodegenResult<()> {
        (rules::rule_for(node).post)(self, node)
    }
}

/// Emits C for a parsed translation unit
pub struct CodeGenerator<'s> {
    symbols: &'s SymbolTable,
    config: CodegenConfig,
}

impl<'s> CodeGenerator<'s> {
    pub fn new(symbols: &'s SymbolTable, config: CodegenConfig) -> Self {
        Self { symbols, config }
    }

    /// Write the C translation of `unit` to `out`
    pub fn generate(&self, unit: &TranslationUnit, out: &mut dyn Write) -> CodegenResult<()> {
        log::debug!("generating C for {} item(s)", unit.items.len());
        let mut context = Context::new(out, self.symbols, &self.config);
        walk(Node::TranslationUnit(unit), &mut context)
    }

    /// Generate into a string
    pub fn generate_to_string(&self, unit: &TranslationUnit) -> CodegenResult<String> {
        let mut buffer = Vec::new();
        self.generate(unit, &mut buffer)?;
        String::from_utf8(buffer).map_err(|err| CodegenError::internal(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn compile_with(source: &str, config: CodegenConfig) -> String {
        let output = Parser::new(Lexer::new(source)).parse().unwrap();
        assert!(
            !output.diagnostics.has_errors(),
            "unexpected diagnostics: {}",
            output.diagnostics.render()
        );
        CodeGenerator::new(&output.symbols, config)
            .generate_to_string(&output.unit)
            .unwrap()
    }

    fn compile(source: &str) -> String {
        compile_with(
            source,
            CodegenConfig {
                emit_prototypes: false,
                ..CodegenConfig::default()
            },
        )
    }

    #[test]
    fn test_function_and_return() {
        let code = compile("fn main() int { return 1 + 2 * 3; }");
        assert_eq!(
            code,
            "#include <stdio.h>\n\nint main(void)\n{\n  return (1 + (2 * 3));\n}\n\n"
        );
    }

    #[test]
    fn test_main_always_returns_int() {
        let code = compile("fn main() { var x: int; if (x) return; x = 1; }");
        assert!(code.contains("  if (x)\n  {\n    return 0;\n  }\n"));
        assert!(code.ends_with("  (x = 1);\n  return 0;\n}\n\n"));

        let code = compile("fn main() { return; }");
        assert_eq!(code, "#include <stdio.h>\n\nint main(void)\n{\n  return 0;\n}\n\n");

        // Other void functions keep bare returns
        let code = compile("fn f() { return; } fn main() int { f(); return 2; }");
        assert!(code.contains("void f(void)\n{\n  return;\n}\n"));
        assert!(!code.contains("return 0;"));
    }

    #[test]
    fn test_prototypes() {
        let code = compile_with(
            "fn add(a: int, b: int) int { return a + b; } fn main() { add(1, 2); }",
            CodegenConfig::default(),
        );
        assert!(code.contains("int add(int a, int b);\nint main(void);\n\n"));
        assert!(code.contains("  add(1, 2);\n"));
    }

    #[test]
    fn test_unbraced_bodies_are_wrapped() {
        let code = compile(
            "fn main() { var i: int = 0; while (i < 3) i++; if (i) i = 0; else i = 1; }",
        );
        assert!(code.contains("  while ((i < 3))\n  {\n    ((i)++);\n  }\n"));
        assert!(code.contains("  if (i)\n  {\n    (i = 0);\n  }\n  else\n  {\n    (i = 1);\n  }\n"));
    }

    #[test]
    fn test_braced_body_is_not_wrapped_twice() {
        let code = compile("fn main() { while (1) { break; } }");
        assert!(code.contains("  while (1)\n  {\n    break;\n  }\n"));
    }

    #[test]
    fn test_do_while_and_for() {
        let code = compile(
            "fn main() { var i: int; do i--; while (i > 0); for (var j: int = 0; j < 2; ++j) continue; for (;;) break; }",
        );
        assert!(code.contains("  int i = 0;\n"));
        assert!(code.contains("  do\n  {\n    ((i)--);\n  }\n  while ((i > 0));\n"));
        assert!(code.contains("  for (int j = 0; (j < 2); (++(j)))\n  {\n    continue;\n  }\n"));
        assert!(code.contains("  for (;;)\n  {\n    break;\n  }\n"));
    }

    #[test]
    fn test_switch_clauses_break() {
        let code = compile(
            "fn main() { var x: int = 2; switch (x) { case 1: x = 3; case 2: default: x = 4; } }",
        );
        assert!(code.contains(
            "  switch (x)\n  {\n  case 1:\n    (x = 3);\n    break;\n  case 2:\n    break;\n  default:\n    (x = 4);\n    break;\n  }\n"
        ));
    }

    #[test]
    fn test_labels_are_dedented() {
        let code = compile("fn f() { goto done; done: return; }");
        assert!(code.contains("  goto done;\ndone:\n  return;\n"));
    }

    #[test]
    fn test_declarations_and_defaults() {
        let code = compile(
            "var f: float; var s: string; var b: bool = true; var a: int[3]; var l: long[] = {1, 2,};",
        );
        assert!(code.contains("float f = 0.0;\n"));
        assert!(code.contains("const char *s = \"\";\n"));
        assert!(code.contains("char b = 1;\n"));
        assert!(code.contains("int a[3] = {0};\n"));
        assert!(code.contains("long l[2] = {1, 2};\n"));
    }

    #[test]
    fn test_vardump() {
        let code = compile(
            "fn main() { var x: int = 1; var s: string = \"hi\"; var c: char = 'a'; var ok: bool; vardump x; vardump s; vardump c; vardump ok; }",
        );
        assert!(code.contains("  printf(\"#  x => %d (int)\\n\", x);\n"));
        assert!(code.contains("  printf(\"#  s => \\\"%s\\\" (string)\\n\", s);\n"));
        assert!(code.contains("  printf(\"#  c => '%c' (char)\\n\", c);\n"));
        assert!(code.contains("  printf(\"#  ok => %s (bool)\\n\", ok ? \"true\" : \"false\");\n"));
    }

    #[test]
    fn test_print_becomes_printf() {
        let code = compile("fn main() { print(\"%d\\n\", 4); }");
        assert!(code.contains("  printf(\"%d\\n\", 4);\n"));
    }

    #[test]
    fn test_unary_operators() {
        let code = compile("fn main() { var x: int; x = -x + !x; x = ~x; }");
        assert!(code.contains("(x = ((-(x)) + (!(x))));"));
        assert!(code.contains("(x = (~(x)));"));
    }

    #[test]
    fn test_calls_and_subscripts() {
        let code = compile("fn main() { var a: int[2]; a[1] = a[0] * 2; }");
        assert!(code.contains("  (a[1] = (a[0] * 2));\n"));
    }

    #[test]
    fn test_enum() {
        let code = compile("enum color { red, green = 4, blue }; fn main() { var c: int = green; }");
        assert!(code.contains("enum color {\n  red,\n  green = 4,\n  blue,\n};\n"));
        assert!(code.contains("  int c = green;\n"));
    }

    #[test]
    fn test_enum_value_must_be_constant() {
        let output = Parser::new(Lexer::new("var x: int; enum e { a = x };"))
            .parse()
            .unwrap();
        assert!(!output.diagnostics.has_errors());
        let err = CodeGenerator::new(&output.symbols, CodegenConfig::default())
            .generate_to_string(&output.unit)
            .unwrap_err();
        assert!(matches!(err, CodegenError::NonConstantEnumerator { .. }));
    }

    #[test]
    fn test_indent_width() {
        let code = compile_with(
            "fn f() { return; }",
            CodegenConfig {
                indent_width: 4,
                emit_prototypes: false,
            },
        );
        assert!(code.contains("\n    return;\n"));
    }

    #[test]
    fn test_write_errors_surface() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk full"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }
        let output = Parser::new(Lexer::new("fn main() {}")).parse().unwrap();
        let err = CodeGenerator::new(&output.symbols, CodegenConfig::default())
            .generate(&output.unit, &mut Broken)
            .unwrap_err();
        assert!(matches!(err, CodegenError::Io(_)));
    }
}
