//! AST pretty-printing helpers.
//!
//! Two renderings, neither with a stability guarantee:
//!
//! - [`dump`] - an indented tree of the node structure, used by the CLI to
//!   show what the parser built.
//! - [`unparse`] - source text that re-parses to a structurally identical
//!   AST (for the grammar as parsed; `elif` chains and compound assignments
//!   are already desugared in the tree and come back out in their desugared
//!   spelling).

use std::fmt::Write;

use crate::ast::*;

/// Render a statement list as an indented node tree.
pub fn dump(stmts: &[Stmt]) -> String {
    let mut out = String::new();
    for stmt in stmts {
        dump_stmt(&mut out, stmt, 0);
    }
    out
}

/// Render a statement list back to source text.
pub fn unparse(stmts: &[Stmt]) -> String {
    let mut out = String::new();
    for stmt in stmts {
        write_stmt(&mut out, stmt, 0);
    }
    out
}

// =============================================================================
// TREE DUMP
// =============================================================================

fn pad(out: &mut String, indent: usize) {
    for _ in 0..indent {
        out.push(' ');
    }
}

fn line(out: &mut String, indent: usize, text: &str) {
    pad(out, indent);
    out.push_str(text);
    out.push('\n');
}

fn dump_stmt(out: &mut String, stmt: &Stmt, indent: usize) {
    match stmt {
        Stmt::FunctionDef(def) => {
            line(out, indent, &format!("FunctionDef({})", def.name));
            line(out, indent + 2, "Parameters:");
            for param in &def.params {
                dump_parameter(out, param, indent + 4);
            }
            line(out, indent + 2, "Body:");
            for stmt in &def.body {
                dump_stmt(out, stmt, indent + 4);
            }
        }
        Stmt::ClassDef(class) => {
            line(out, indent, &format!("ClassDef({})", class.name));
            if !class.bases.is_empty() {
                line(out, indent + 2, "Bases:");
                for base in &class.bases {
                    dump_expr(out, base, indent + 4);
                }
            }
            line(out, indent + 2, "Body:");
            for stmt in &class.body {
                dump_stmt(out, stmt, indent + 4);
            }
        }
        Stmt::If(stmt) => {
            line(out, indent, "If");
            line(out, indent + 2, "Condition:");
            dump_expr(out, &stmt.cond, indent + 4);
            line(out, indent + 2, "Then:");
            for stmt in &stmt.then_body {
                dump_stmt(out, stmt, indent + 4);
            }
            if !stmt.else_body.is_empty() {
                line(out, indent + 2, "Else:");
                for stmt in &stmt.else_body {
                    dump_stmt(out, stmt, indent + 4);
                }
            }
        }
        Stmt::While(stmt) => {
            line(out, indent, "While");
            line(out, indent + 2, "Condition:");
            dump_expr(out, &stmt.cond, indent + 4);
            line(out, indent + 2, "Body:");
            for stmt in &stmt.body {
                dump_stmt(out, stmt, indent + 4);
            }
        }
        Stmt::For(stmt) => {
            line(out, indent, "For");
            line(out, indent + 2, "Target:");
            dump_expr(out, &stmt.target, indent + 4);
            line(out, indent + 2, "Iterable:");
            dump_expr(out, &stmt.iter, indent + 4);
            line(out, indent + 2, "Body:");
            for stmt in &stmt.body {
                dump_stmt(out, stmt, indent + 4);
            }
        }
        Stmt::Return(stmt) => {
            line(out, indent, "Return");
            if let Some(value) = &stmt.value {
                dump_expr(out, value, indent + 2);
            }
        }
        Stmt::Import(import) => {
            let text = match import.alias {
                Some(alias) => format!("Import({} as {})", import.module, alias),
                None => format!("Import({})", import.module),
            };
            line(out, indent, &text);
        }
        Stmt::FromImport(import) => {
            line(out, indent, &format!("FromImport({})", import.module));
            for name in &import.names {
                let text = match name.alias {
                    Some(alias) => format!("{} as {}", name.name, alias),
                    None => name.name.to_string(),
                };
                line(out, indent + 2, &text);
            }
        }
        Stmt::Pass => line(out, indent, "Pass"),
        Stmt::Break => line(out, indent, "Break"),
        Stmt::Continue => line(out, indent, "Continue"),
        Stmt::Expr(expr) => dump_expr(out, expr, indent),
    }
}

fn dump_parameter(out: &mut String, param: &Parameter, indent: usize) {
    let text = if param.keyword_only {
        format!("Parameter({}, keyword-only)", param.name)
    } else {
        format!("Parameter({})", param.name)
    };
    line(out, indent, &text);
    if let Some(default) = &param.default {
        line(out, indent + 2, "Default Value:");
        dump_expr(out, default, indent + 4);
    }
}

fn dump_expr(out: &mut String, expr: &Expr, indent: usize) {
    match expr {
        Expr::Int(value) => line(out, indent, &format!("IntLiteral({})", value)),
        Expr::Float(value) => line(out, indent, &format!("FloatLiteral({:?})", value)),
        Expr::Str(lit) => {
            let kind = if lit.f_string { "FString" } else { "StringLiteral" };
            line(out, indent, &format!("{}({:?})", kind, lit.value.as_str()));
        }
        Expr::Bool(value) => {
            let text = if *value { "True" } else { "False" };
            line(out, indent, &format!("BoolLiteral({})", text));
        }
        Expr::None => line(out, indent, "None"),
        Expr::Name(name) => line(out, indent, &format!("Identifier({})", name)),
        Expr::Binary(binary) => {
            line(out, indent, &format!("BinaryOp({})", binary.op));
            dump_expr(out, &binary.left, indent + 2);
            dump_expr(out, &binary.right, indent + 2);
        }
        Expr::Unary(unary) => {
            line(out, indent, &format!("UnaryOp({})", unary.op));
            dump_expr(out, &unary.operand, indent + 2);
        }
        Expr::Assign(assign) => {
            line(out, indent, "Assignment");
            line(out, indent + 2, "Target:");
            dump_expr(out, &assign.target, indent + 4);
            line(out, indent + 2, "Value:");
            dump_expr(out, &assign.value, indent + 4);
        }
        Expr::Call(call) => {
            line(out, indent, "FunctionCall");
            line(out, indent + 2, "Callable:");
            dump_expr(out, &call.callee, indent + 4);
            if !call.args.is_empty() {
                line(out, indent + 2, "Arguments:");
                for arg in &call.args {
                    dump_expr(out, arg, indent + 4);
                }
            }
            if !call.kwargs.is_empty() {
                line(out, indent + 2, "Keyword Arguments:");
                for (name, value) in &call.kwargs {
                    line(out, indent + 4, &format!("{}:", name));
                    dump_expr(out, value, indent + 6);
                }
            }
        }
        Expr::Attribute(attr) => {
            line(out, indent, &format!("Attribute({})", attr.attr));
            line(out, indent + 2, "Value:");
            dump_expr(out, &attr.value, indent + 4);
        }
        Expr::Subscript(sub) => {
            line(out, indent, "Subscript");
            line(out, indent + 2, "Value:");
            dump_expr(out, &sub.value, indent + 4);
            line(out, indent + 2, "Index:");
            dump_expr(out, &sub.index, indent + 4);
        }
        Expr::List(elements) => {
            line(out, indent, "List");
            for element in elements {
                dump_expr(out, element, indent + 2);
            }
        }
        Expr::Dict(items) => {
            line(out, indent, "Dict");
            for (key, value) in items {
                line(out, indent + 2, "Key:");
                dump_expr(out, key, indent + 4);
                line(out, indent + 2, "Value:");
                dump_expr(out, value, indent + 4);
            }
        }
    }
}

// =============================================================================
// UNPARSE
// =============================================================================

/// Binding powers for parenthesization, unrelated to the parser's internal
/// numbering but encoding the same precedence ladder.
mod ubp {
    pub const STMT: u8 = 1;
    pub const ASSIGN: u8 = 1;
    pub const UNARY: u8 = 8;
    pub const POW: u8 = 9;
    pub const ATOM: u8 = 10;
}

fn bin_power(op: BinOp) -> (u8, bool) {
    match op {
        BinOp::Or => (2, false),
        BinOp::And => (3, false),
        BinOp::Eq | BinOp::Ne => (4, false),
        BinOp::Lt | BinOp::Gt | BinOp::Le | BinOp::Ge => (5, false),
        BinOp::Add | BinOp::Sub => (6, false),
        BinOp::Mul | BinOp::Div | BinOp::Mod => (7, false),
        BinOp::Pow => (ubp::POW, true),
    }
}

fn indent_of(level: usize) -> String {
    "    ".repeat(level)
}

fn write_stmt(out: &mut String, stmt: &Stmt, level: usize) {
    out.push_str(&indent_of(level));
    match stmt {
        Stmt::FunctionDef(def) => {
            let _ = write!(out, "def {}(", def.name);
            for (i, param) in def.params.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                let _ = write!(out, "{}", param.name);
                if let Some(default) = &param.default {
                    out.push('=');
                    write_expr(out, default, ubp::ASSIGN + 1);
                }
            }
            out.push_str("):\n");
            write_block(out, &def.body, level + 1);
        }
        Stmt::ClassDef(class) => {
            let _ = write!(out, "class {}", class.name);
            if !class.bases.is_empty() {
                out.push('(');
                for (i, base) in class.bases.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_expr(out, base, ubp::STMT);
                }
                out.push(')');
            }
            out.push_str(":\n");
            write_block(out, &class.body, level + 1);
        }
        Stmt::If(stmt) => {
            out.push_str("if ");
            write_expr(out, &stmt.cond, ubp::STMT);
            out.push_str(":\n");
            write_block(out, &stmt.then_body, level + 1);
            if !stmt.else_body.is_empty() {
                out.push_str(&indent_of(level));
                out.push_str("else:\n");
                write_block(out, &stmt.else_body, level + 1);
            }
        }
        Stmt::While(stmt) => {
            out.push_str("while ");
            write_expr(out, &stmt.cond, ubp::STMT);
            out.push_str(":\n");
            write_block(out, &stmt.body, level + 1);
        }
        Stmt::For(stmt) => {
            out.push_str("for ");
            write_expr(out, &stmt.target, ubp::STMT);
            out.push_str(" in ");
            write_expr(out, &stmt.iter, ubp::STMT);
            out.push_str(":\n");
            write_block(out, &stmt.body, level + 1);
        }
        Stmt::Return(stmt) => {
            out.push_str("return");
            if let Some(value) = &stmt.value {
                out.push(' ');
                write_expr(out, value, ubp::STMT);
            }
            out.push('\n');
        }
        Stmt::Import(import) => {
            let _ = write!(out, "import {}", import.module);
            if let Some(alias) = import.alias {
                let _ = write!(out, " as {}", alias);
            }
            out.push('\n');
        }
        Stmt::FromImport(import) => {
            let _ = write!(out, "from {} import ", import.module);
            for (i, name) in import.names.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                let _ = write!(out, "{}", name.name);
                if let Some(alias) = name.alias {
                    let _ = write!(out, " as {}", alias);
                }
            }
            out.push('\n');
        }
        Stmt::Pass => out.push_str("pass\n"),
        Stmt::Break => out.push_str("break\n"),
        Stmt::Continue => out.push_str("continue\n"),
        Stmt::Expr(expr) => {
            write_expr(out, expr, ubp::STMT);
            out.push('\n');
        }
    }
}

fn write_block(out: &mut String, body: &[Stmt], level: usize) {
    if body.is_empty() {
        out.push_str(&indent_of(level));
        out.push_str("pass\n");
        return;
    }
    for stmt in body {
        write_stmt(out, stmt, level);
    }
}

fn write_expr(out: &mut String, expr: &Expr, min_bp: u8) {
    match expr {
        Expr::Int(value) => {
            let _ = write!(out, "{}", value);
        }
        Expr::Float(value) => {
            let _ = write!(out, "{:?}", value);
        }
        Expr::Str(lit) => {
            if lit.f_string {
                out.push('f');
            }
            write_string_literal(out, lit.value.as_str());
        }
        Expr::Bool(true) => out.push_str("True"),
        Expr::Bool(false) => out.push_str("False"),
        Expr::None => out.push_str("None"),
        Expr::Name(name) => {
            let _ = write!(out, "{}", name);
        }
        Expr::Binary(binary) => {
            let (bp, right_assoc) = bin_power(binary.op);
            let parens = bp < min_bp;
            if parens {
                out.push('(');
            }
            let (left_min, right_min) = if right_assoc {
                (bp + 1, bp)
            } else {
                (bp, bp + 1)
            };
            write_expr(out, &binary.left, left_min);
            let _ = write!(out, " {} ", binary.op);
            write_expr(out, &binary.right, right_min);
            if parens {
                out.push(')');
            }
        }
        Expr::Unary(unary) => {
            let parens = ubp::UNARY < min_bp;
            if parens {
                out.push('(');
            }
            match unary.op {
                UnOp::Neg => out.push('-'),
                UnOp::Not => out.push_str("not "),
            }
            write_expr(out, &unary.operand, ubp::UNARY);
            if parens {
                out.push(')');
            }
        }
        Expr::Assign(assign) => {
            let parens = ubp::ASSIGN < min_bp;
            if parens {
                out.push('(');
            }
            write_expr(out, &assign.target, ubp::ASSIGN + 1);
            out.push_str(" = ");
            write_expr(out, &assign.value, ubp::ASSIGN);
            if parens {
                out.push(')');
            }
        }
        Expr::Call(call) => {
            write_expr(out, &call.callee, ubp::ATOM);
            out.push('(');
            let mut first = true;
            for arg in &call.args {
                if !first {
                    out.push_str(", ");
                }
                first = false;
                write_expr(out, arg, ubp::STMT);
            }
            for (name, value) in &call.kwargs {
                if !first {
                    out.push_str(", ");
                }
                first = false;
                let _ = write!(out, "{}=", name);
                write_expr(out, value, ubp::ASSIGN + 1);
            }
            out.push(')');
        }
        Expr::Attribute(attr) => {
            write_expr(out, &attr.value, ubp::ATOM);
            let _ = write!(out, ".{}", attr.attr);
        }
        Expr::Subscript(sub) => {
            write_expr(out, &sub.value, ubp::ATOM);
            out.push('[');
            write_expr(out, &sub.index, ubp::STMT);
            out.push(']');
        }
        Expr::List(elements) => {
            out.push('[');
            for (i, element) in elements.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_expr(out, element, ubp::STMT);
            }
            out.push(']');
        }
        Expr::Dict(items) => {
            out.push('{');
            for (i, (key, value)) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_expr(out, key, ubp::STMT);
                out.push_str(": ");
                write_expr(out, value, ubp::STMT);
            }
            out.push('}');
        }
    }
}

/// Write a double-quoted string with the escapes the lexer recognizes.
fn write_string_literal(out: &mut String, value: &str) {
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use serpc_util::Handler;

    fn parse_source(source: &str) -> Vec<Stmt> {
        let handler = Handler::new();
        let tokens = serpc_lex::Lexer::new(source, &handler).tokenize();
        assert!(!handler.has_errors(), "lex failed for {:?}", source);

        let stmts = crate::Parser::new(tokens, &handler).parse();
        assert!(
            !handler.has_errors(),
            "parse failed for {:?}: {:?}",
            source,
            handler.diagnostics()
        );
        stmts
    }

    /// Parse, unparse, re-parse, and compare the two trees structurally
    /// (via their dumps, which cover every semantic field but no spans).
    fn assert_round_trip(source: &str) {
        let first = parse_source(source);
        let emitted = unparse(&first);
        let second = parse_source(&emitted);
        assert_eq!(
            dump(&first),
            dump(&second),
            "round trip changed the tree; emitted source was:\n{}",
            emitted
        );
    }

    // =========================================================================
    // ROUND TRIPS
    // =========================================================================

    #[test]
    fn test_round_trip_expressions() {
        assert_round_trip("x = 1 + 2 * 3\n");
        assert_round_trip("y = (1 + 2) * 3\n");
        assert_round_trip("z = a ** b ** c\n");
        assert_round_trip("w = (a ** b) ** c\n");
        assert_round_trip("v = -x ** 2\n");
        assert_round_trip("u = not a and b or c\n");
        assert_round_trip("t = a < b == c >= d\n");
    }

    #[test]
    fn test_round_trip_strings() {
        assert_round_trip("s = \"hello\"\n");
        assert_round_trip("s = \"line\\nbreak and \\\"quotes\\\"\"\n");
        assert_round_trip("s = f\"x is {x}\"\n");
        assert_round_trip("s = \"\\u0001\"\n");
    }

    #[test]
    fn test_round_trip_postfix() {
        assert_round_trip("r = obj.attr.other\n");
        assert_round_trip("r = f(1, 2, name=\"x\")\n");
        assert_round_trip("r = xs[i + 1]\n");
        assert_round_trip("r = obj.items[0].count()\n");
    }

    #[test]
    fn test_round_trip_collections() {
        assert_round_trip("xs = [1, 2.5, \"three\", None]\n");
        assert_round_trip("d = {\"a\": 1, \"b\": [2, 3]}\n");
        assert_round_trip("e = []\n");
    }

    #[test]
    fn test_round_trip_statements() {
        assert_round_trip("def add(a, b=1):\n    return a + b\n");
        assert_round_trip("if x:\n    y = 1\nelse:\n    y = 2\n");
        assert_round_trip("while n > 0:\n    n = n - 1\n");
        assert_round_trip("for i in xs:\n    total += i\n");
        assert_round_trip("import math\nfrom os import path as p, sep\n");
        assert_round_trip("pass\nbreak\ncontinue\n");
    }

    #[test]
    fn test_round_trip_class() {
        assert_round_trip(
            "class P(Base):\n    def __init__(self, n):\n        self.n = n\n    def g(self):\n        return P()\n",
        );
    }

    #[test]
    fn test_round_trip_desugared_elif() {
        // elif comes back out as a nested else-if with the same tree.
        assert_round_trip("if a:\n    x = 1\nelif b:\n    x = 2\nelse:\n    x = 3\n");
    }

    #[test]
    fn test_round_trip_unary_chains() {
        assert_round_trip("x = --y\n");
        assert_round_trip("x = - not y\n");
        assert_round_trip("x = not a == b\n");
    }

    // =========================================================================
    // DUMP FORMAT
    // =========================================================================

    #[test]
    fn test_dump_assignment() {
        let stmts = parse_source("x = 1 + 2\n");
        let text = dump(&stmts);
        assert!(text.contains("Assignment"));
        assert!(text.contains("Identifier(x)"));
        assert!(text.contains("BinaryOp(+)"));
        assert!(text.contains("IntLiteral(1)"));
    }

    #[test]
    fn test_dump_function() {
        let stmts = parse_source("def f(a, b=2):\n    return a\n");
        let text = dump(&stmts);
        assert!(text.contains("FunctionDef(f)"));
        assert!(text.contains("Parameter(a)"));
        assert!(text.contains("Default Value:"));
        assert!(text.contains("Return"));
    }

    #[test]
    fn test_dump_f_string() {
        let stmts = parse_source("s = f\"{x}\"\n");
        assert!(dump(&stmts).contains("FString"));
    }

    #[test]
    fn test_unparse_indentation() {
        let stmts = parse_source("def f():\n    if x:\n        return 1\n");
        let text = unparse(&stmts);
        assert!(text.contains("def f():\n    if x:\n        return 1\n"));
    }
}
