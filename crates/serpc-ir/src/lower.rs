//! AST to IR lowering.
//!
//! The generator walks the statement list and flattens every expression
//! into three-address instructions: lowering an expression pushes the
//! instructions that compute it into a sink and returns the operand holding
//! the result, so instruction operands are always leaves. Left subtrees are
//! lowered before right subtrees and arguments in source order, preserving
//! left-to-right evaluation.
//!
//! Temporaries `t0, t1, ...` and labels `L0, L1, ...` come from two
//! counters owned by the generator; they are never reset within a
//! translation, so every synthesized name is unique across the program.
//!
//! Lowering is not recovered: the first unsupported construct aborts
//! generation with an [`IrError`].

use serpc_par::{
    AssignExpr, AttributeExpr, CallExpr, ClassDef, Expr, FunctionDef, If, Parameter, Stmt, StrLit,
    While,
};
use serpc_util::{IrError, Span, Symbol};

use crate::ir::{Function, Instr, Operand, Program, Value};

/// Generates a [`Program`] from a parsed statement list.
///
/// One generator performs one translation; its temporary and label
/// counters start at zero and only move forward.
pub struct IrGenerator {
    /// Next temporary number.
    temp_counter: u32,

    /// Next label number.
    label_counter: u32,

    /// Name of the function currently being lowered.
    current_function: Option<Symbol>,

    /// Name of the class currently being lowered. Calls to a plain
    /// identifier made inside a class lower to constructor calls.
    current_class: Option<Symbol>,
}

impl IrGenerator {
    /// Create a fresh generator with zeroed counters.
    pub fn new() -> Self {
        Self {
            temp_counter: 0,
            label_counter: 0,
            current_function: None,
            current_class: None,
        }
    }

    /// Lower a whole program.
    ///
    /// Functions and class methods emit into the program's function list in
    /// source order. Every other top-level statement collects into a
    /// synthesized `main` function appended last (when any exist).
    pub fn generate(&mut self, stmts: &[Stmt]) -> Result<Program, IrError> {
        let mut functions = Vec::new();
        let mut main_body = Vec::new();

        for stmt in stmts {
            match stmt {
                Stmt::FunctionDef(def) => functions.push(self.lower_function(def)?),
                Stmt::ClassDef(class) => self.lower_class(class, &mut functions)?,
                other => self.lower_stmt(other, &mut main_body)?,
            }
        }

        if !main_body.is_empty() {
            functions.push(Function {
                name: Symbol::intern("main"),
                params: Vec::new(),
                body: main_body,
            });
        }

        Ok(Program { functions })
    }

    /// Allocate a fresh temporary name.
    fn fresh_temp(&mut self) -> Symbol {
        let name = Symbol::intern(&format!("t{}", self.temp_counter));
        self.temp_counter += 1;
        name
    }

    /// Allocate a fresh label name.
    fn fresh_label(&mut self) -> Symbol {
        let name = Symbol::intern(&format!("L{}", self.label_counter));
        self.label_counter += 1;
        name
    }

    // =========================================================================
    // DEFINITIONS
    // =========================================================================

    fn lower_function(&mut self, def: &FunctionDef) -> Result<Function, IrError> {
        let previous = self.current_function.replace(def.name);

        let params = def.params.iter().map(|p| p.name).collect();
        let mut body = Vec::new();
        for stmt in &def.body {
            self.lower_stmt(stmt, &mut body)?;
        }

        self.current_function = previous;
        Ok(Function {
            name: def.name,
            params,
            body,
        })
    }

    /// Lower a class: every method gets `self` prepended to its parameters
    /// and emits as a program-level function. The input definition is not
    /// mutated; a widened copy is lowered instead. Non-method statements in
    /// the class body are ignored.
    fn lower_class(
        &mut self,
        class: &ClassDef,
        functions: &mut Vec<Function>,
    ) -> Result<(), IrError> {
        let previous = self.current_class.replace(class.name);

        for stmt in &class.body {
            if let Stmt::FunctionDef(method) = stmt {
                let mut params = Vec::with_capacity(method.params.len() + 1);
                params.push(Parameter::plain(Symbol::intern("self")));
                params.extend(method.params.iter().cloned());

                let widened = FunctionDef {
                    name: method.name,
                    params,
                    body: method.body.clone(),
                    span: method.span,
                };
                functions.push(self.lower_function(&widened)?);
            }
        }

        self.current_class = previous;
        Ok(())
    }

    // =========================================================================
    // STATEMENTS
    // =========================================================================

    fn lower_stmt(&mut self, stmt: &Stmt, sink: &mut Vec<Instr>) -> Result<(), IrError> {
        match stmt {
            Stmt::Expr(expr) => {
                self.lower_expr(expr, sink)?;
                Ok(())
            }
            Stmt::Return(ret) => {
                let value = match &ret.value {
                    Some(expr) => Some(self.lower_expr(expr, sink)?),
                    None => None,
                };
                sink.push(Instr::Return { value });
                Ok(())
            }
            Stmt::If(stmt) => self.lower_if(stmt, sink),
            Stmt::While(stmt) => self.lower_while(stmt, sink),
            Stmt::Pass => Ok(()),
            Stmt::For(stmt) => Err(IrError::new("for loops are not supported", stmt.span)),
            Stmt::Break => Err(IrError::new(
                "'break' has no IR lowering",
                Span::DUMMY,
            )),
            Stmt::Continue => Err(IrError::new(
                "'continue' has no IR lowering",
                Span::DUMMY,
            )),
            Stmt::Import(import) => Err(IrError::new(
                "import statements have no IR lowering",
                import.span,
            )),
            Stmt::FromImport(import) => Err(IrError::new(
                "import statements have no IR lowering",
                import.span,
            )),
            Stmt::FunctionDef(def) => {
                let context = self
                    .current_function
                    .map(|name| format!(" inside '{}'", name))
                    .unwrap_or_default();
                Err(IrError::new(
                    format!("nested function definitions are not supported{}", context),
                    def.span,
                ))
            }
            Stmt::ClassDef(class) => Err(IrError::new(
                "nested class definitions are not supported",
                class.span,
            )),
        }
    }

    /// Lower `if cond: then else: otherwise` to:
    ///
    /// ```text
    /// ...cond...
    /// if c jump L_then else L_else
    /// L_then:
    /// ...then...
    /// jump L_end
    /// L_else:
    /// ...otherwise...
    /// L_end:
    /// ```
    fn lower_if(&mut self, stmt: &If, sink: &mut Vec<Instr>) -> Result<(), IrError> {
        let cond = self.lower_expr(&stmt.cond, sink)?;
        let then_label = self.fresh_label();
        let else_label = self.fresh_label();
        let end_label = self.fresh_label();

        sink.push(Instr::CondJump {
            cond,
            then_label,
            else_label,
        });

        sink.push(Instr::Label { name: then_label });
        for stmt in &stmt.then_body {
            self.lower_stmt(stmt, sink)?;
        }
        sink.push(Instr::Jump { target: end_label });

        sink.push(Instr::Label { name: else_label });
        for stmt in &stmt.else_body {
            self.lower_stmt(stmt, sink)?;
        }
        sink.push(Instr::Label { name: end_label });

        Ok(())
    }

    /// Lower `while cond: body` to:
    ///
    /// ```text
    /// L_start:
    /// ...cond...
    /// if c jump L_body else L_end
    /// L_body:
    /// ...body...
    /// jump L_start
    /// L_end:
    /// ```
    fn lower_while(&mut self, stmt: &While, sink: &mut Vec<Instr>) -> Result<(), IrError> {
        let start_label = self.fresh_label();
        let body_label = self.fresh_label();
        let end_label = self.fresh_label();

        sink.push(Instr::Label { name: start_label });
        let cond = self.lower_expr(&stmt.cond, sink)?;
        sink.push(Instr::CondJump {
            cond,
            then_label: body_label,
            else_label: end_label,
        });

        sink.push(Instr::Label { name: body_label });
        for stmt in &stmt.body {
            self.lower_stmt(stmt, sink)?;
        }
        sink.push(Instr::Jump {
            target: start_label,
        });
        sink.push(Instr::Label { name: end_label });

        Ok(())
    }

    // =========================================================================
    // EXPRESSIONS
    // =========================================================================

    /// Lower an expression, pushing its instructions into `sink` and
    /// returning the operand holding the result.
    fn lower_expr(&mut self, expr: &Expr, sink: &mut Vec<Instr>) -> Result<Operand, IrError> {
        match expr {
            Expr::Int(value) => Ok(Operand::Const(Value::Int(*value))),
            Expr::Float(value) => Ok(Operand::Const(Value::Float(*value))),
            Expr::Str(StrLit { value, .. }) => Ok(Operand::Const(Value::Str(*value))),
            Expr::Bool(value) => Ok(Operand::Const(Value::Bool(*value))),
            Expr::None => Ok(Operand::Const(Value::None)),
            Expr::Name(name) => Ok(Operand::Var(*name)),

            // Attribute access is a dotted name, not a load instruction.
            Expr::Attribute(attr) => Ok(Operand::Var(self.attribute_path(attr)?)),

            Expr::Binary(binary) => {
                let left = self.lower_expr(&binary.left, sink)?;
                let right = self.lower_expr(&binary.right, sink)?;
                let dest = self.fresh_temp();
                sink.push(Instr::Binary {
                    op: binary.op,
                    left,
                    right,
                    dest,
                });
                Ok(Operand::Var(dest))
            }

            Expr::Unary(unary) => {
                let operand = self.lower_expr(&unary.operand, sink)?;
                let dest = self.fresh_temp();
                sink.push(Instr::Unary {
                    op: unary.op,
                    operand,
                    dest,
                });
                Ok(Operand::Var(dest))
            }

            Expr::Assign(assign) => self.lower_assign(assign, sink),
            Expr::Call(call) => self.lower_call(call, sink),

            Expr::Subscript(sub) => Err(IrError::new(
                "subscript expressions have no IR lowering",
                sub.span,
            )),
            Expr::List(_) => Err(IrError::new(
                "list literals have no IR lowering",
                expr.span().unwrap_or(Span::DUMMY),
            )),
            Expr::Dict(_) => Err(IrError::new(
                "dict literals have no IR lowering",
                expr.span().unwrap_or(Span::DUMMY),
            )),
        }
    }

    /// Lower an assignment: value first, then a store to the target name.
    /// Valid targets are names and attribute paths.
    fn lower_assign(
        &mut self,
        assign: &AssignExpr,
        sink: &mut Vec<Instr>,
    ) -> Result<Operand, IrError> {
        let value = self.lower_expr(&assign.value, sink)?;

        let dest = match &assign.target {
            Expr::Name(name) => *name,
            Expr::Attribute(attr) => self.attribute_path(attr)?,
            other => {
                return Err(IrError::new(
                    "invalid assignment target",
                    other.span().unwrap_or(assign.span),
                ))
            }
        };

        sink.push(Instr::Store {
            source: value.clone(),
            dest,
        });
        Ok(value)
    }

    /// Lower a call. Positional arguments lower in source order; keyword
    /// arguments are not carried into the IR. Dispatch:
    ///
    /// - attribute callee: method call on the lowered object
    /// - identifier callee inside a class: constructor call
    /// - identifier callee otherwise: plain call
    fn lower_call(&mut self, call: &CallExpr, sink: &mut Vec<Instr>) -> Result<Operand, IrError> {
        let mut args = Vec::with_capacity(call.args.len());
        for arg in &call.args {
            args.push(self.lower_expr(arg, sink)?);
        }

        match &call.callee {
            Expr::Attribute(attr) => {
                let object = self.lower_expr(&attr.value, sink)?;
                let dest = self.fresh_temp();
                sink.push(Instr::MethodCall {
                    object,
                    method: attr.attr,
                    args,
                    dest,
                });
                Ok(Operand::Var(dest))
            }
            Expr::Name(name) => {
                let dest = self.fresh_temp();
                if self.current_class.is_some() {
                    sink.push(Instr::ConstructorCall {
                        class: *name,
                        args,
                        dest,
                    });
                } else {
                    sink.push(Instr::Call {
                        func: *name,
                        args,
                        dest,
                    });
                }
                Ok(Operand::Var(dest))
            }
            other => Err(IrError::new(
                "unsupported call target",
                other.span().unwrap_or(call.span),
            )),
        }
    }

    /// Flatten an attribute chain into a dotted name (`self.n`, `a.b.c`).
    /// The base must bottom out in an identifier.
    fn attribute_path(&self, attr: &AttributeExpr) -> Result<Symbol, IrError> {
        let base = match &attr.value {
            Expr::Name(name) => name.to_string(),
            Expr::Attribute(inner) => self.attribute_path(inner)?.to_string(),
            other => {
                return Err(IrError::new(
                    "unsupported attribute base expression",
                    other.span().unwrap_or(attr.span),
                ))
            }
        };
        Ok(Symbol::intern(&format!("{}.{}", base, attr.attr)))
    }
}

impl Default for IrGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Run the full pipeline on `source`, asserting every stage succeeds.
    fn gen(source: &str) -> Program {
        let (tokens, lex_errors) = serpc_lex::tokenize(source);
        assert!(lex_errors.is_empty(), "lex errors: {:?}", lex_errors);
        let (ast, parse_errors) = serpc_par::parse(tokens);
        assert!(parse_errors.is_empty(), "parse errors: {:?}", parse_errors);
        IrGenerator::new()
            .generate(&ast)
            .expect("ir generation failed")
    }

    /// Run the pipeline expecting an IR error.
    fn gen_err(source: &str) -> IrError {
        let (tokens, lex_errors) = serpc_lex::tokenize(source);
        assert!(lex_errors.is_empty());
        let (ast, parse_errors) = serpc_par::parse(tokens);
        assert!(parse_errors.is_empty());
        IrGenerator::new()
            .generate(&ast)
            .expect_err("expected ir generation to fail")
    }

    /// The instruction texts of the function named `name`.
    fn body_text(program: &Program, name: &str) -> Vec<String> {
        let function = program
            .functions
            .iter()
            .find(|f| f.name.as_str() == name)
            .unwrap_or_else(|| panic!("no function named {}", name));
        function.body.iter().map(|i| i.to_string()).collect()
    }

    fn function_names(program: &Program) -> Vec<&'static str> {
        program.functions.iter().map(|f| f.name.as_str()).collect()
    }

    // =========================================================================
    // END-TO-END SCENARIOS
    // =========================================================================

    #[test]
    fn test_arithmetic_and_assignment() {
        // x = 1 + 2 * 3 flattens inner-first, left-to-right.
        let program = gen("x = 1 + 2 * 3\n");
        assert_eq!(function_names(&program), vec!["main"]);
        assert_eq!(
            body_text(&program, "main"),
            vec!["t0 = 2 * 3", "t1 = 1 + t0", "store t1 -> x"]
        );
    }

    #[test]
    fn test_function_and_call() {
        let program = gen("def add(a, b):\n    return a + b\n");
        let add = &program.functions[0];
        assert_eq!(add.name.as_str(), "add");
        assert_eq!(
            add.params.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
            vec!["a", "b"]
        );
        assert_eq!(
            body_text(&program, "add"),
            vec!["t0 = a + b", "return t0"]
        );
    }

    #[test]
    fn test_method_call() {
        let program = gen("p.greet()\n");
        assert_eq!(body_text(&program, "main"), vec!["t0 = call p.greet()"]);
    }

    #[test]
    fn test_if_else_structure() {
        let program = gen("if x < 10:\n    y = 1\nelse:\n    y = 2\n");
        assert_eq!(
            body_text(&program, "main"),
            vec![
                "t0 = x < 10",
                "if t0 jump L0 else L1",
                "L0:",
                "store 1 -> y",
                "jump L2",
                "L1:",
                "store 2 -> y",
                "L2:"
            ]
        );
    }

    #[test]
    fn test_while_structure() {
        let program = gen("while n > 0:\n    n = n - 1\n");
        assert_eq!(
            body_text(&program, "main"),
            vec![
                "L0:",
                "t0 = n > 0",
                "if t0 jump L1 else L2",
                "L1:",
                "t1 = n - 1",
                "store t1 -> n",
                "jump L0",
                "L2:"
            ]
        );
    }

    #[test]
    fn test_class_methods_and_constructor() {
        let source = "class P:\n    def __init__(self, n):\n        self.n = n\n    def g(self):\n        return P()\n";
        let program = gen(source);
        assert_eq!(function_names(&program), vec!["__init__", "g"]);

        let init = &program.functions[0];
        assert_eq!(
            init.params.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
            vec!["self", "n"]
        );
        assert_eq!(body_text(&program, "__init__"), vec!["store n -> self.n"]);

        let g = &program.functions[1];
        assert_eq!(
            g.params.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
            vec!["self"]
        );
        // Construction of the class inside its own body is a constructor call.
        assert_eq!(
            body_text(&program, "g"),
            vec!["t0 = new P()", "return t0"]
        );
    }

    // =========================================================================
    // EXPRESSION LOWERING
    // =========================================================================

    #[test]
    fn test_left_operands_lower_before_right() {
        let program = gen("r = (a + b) * (c + d)\n");
        assert_eq!(
            body_text(&program, "main"),
            vec![
                "t0 = a + b",
                "t1 = c + d",
                "t2 = t0 * t1",
                "store t2 -> r"
            ]
        );
    }

    #[test]
    fn test_argument_evaluation_order() {
        let program = gen("f(a + 1, g(b), 2)\n");
        assert_eq!(
            body_text(&program, "main"),
            vec![
                "t0 = a + 1",
                "t1 = call g(b)",
                "t2 = call f(t0, t1, 2)"
            ]
        );
    }

    #[test]
    fn test_unary_lowering() {
        let program = gen("y = -x\nz = not ok\n");
        assert_eq!(
            body_text(&program, "main"),
            vec![
                "t0 = -x",
                "store t0 -> y",
                "t1 = not ok",
                "store t1 -> z"
            ]
        );
    }

    #[test]
    fn test_constant_operands() {
        let program = gen("a = True\nb = None\nc = \"hi\"\nd = 2.5\n");
        assert_eq!(
            body_text(&program, "main"),
            vec![
                "store True -> a",
                "store None -> b",
                "store \"hi\" -> c",
                "store 2.5 -> d"
            ]
        );
    }

    #[test]
    fn test_attribute_reads_are_dotted_names() {
        let program = gen("x = a.b.c\n");
        assert_eq!(body_text(&program, "main"), vec!["store a.b.c -> x"]);
    }

    #[test]
    fn test_method_call_on_attribute_object() {
        let program = gen("box.items.append(x)\n");
        assert_eq!(
            body_text(&program, "main"),
            vec!["t0 = call box.items.append(x)"]
        );
    }

    #[test]
    fn test_keyword_arguments_are_not_lowered() {
        let program = gen("f(1, name=2)\n");
        assert_eq!(body_text(&program, "main"), vec!["t0 = call f(1)"]);
    }

    #[test]
    fn test_constructor_only_inside_class() {
        // Outside a class, a capitalized call is still a plain call.
        let program = gen("def make():\n    return P()\n");
        assert_eq!(
            body_text(&program, "make"),
            vec!["t0 = call P()", "return t0"]
        );
    }

    #[test]
    fn test_chained_assignment() {
        let program = gen("a = b = 1\n");
        assert_eq!(
            body_text(&program, "main"),
            vec!["store 1 -> b", "store 1 -> a"]
        );
    }

    // =========================================================================
    // PROGRAM STRUCTURE
    // =========================================================================

    #[test]
    fn test_main_is_synthesized_last() {
        let program = gen("x = 1\ndef f():\n    return 2\ny = 3\n");
        assert_eq!(function_names(&program), vec!["f", "main"]);
        assert_eq!(
            body_text(&program, "main"),
            vec!["store 1 -> x", "store 3 -> y"]
        );
    }

    #[test]
    fn test_no_main_without_top_level_statements() {
        let program = gen("def f():\n    return 1\n");
        assert_eq!(function_names(&program), vec!["f"]);
    }

    #[test]
    fn test_pass_lowers_to_nothing() {
        let program = gen("def f():\n    pass\n");
        assert!(body_text(&program, "f").is_empty());
    }

    #[test]
    fn test_bare_return() {
        let program = gen("def f():\n    return\n");
        assert_eq!(body_text(&program, "f"), vec!["return"]);
    }

    #[test]
    fn test_counters_continue_across_functions() {
        let program = gen("def f():\n    return 1 + 2\ndef g():\n    return 3 + 4\n");
        assert_eq!(body_text(&program, "f"), vec!["t0 = 1 + 2", "return t0"]);
        // The counter is per translation, not per function.
        assert_eq!(body_text(&program, "g"), vec!["t1 = 3 + 4", "return t1"]);
    }

    #[test]
    fn test_fresh_generator_restarts_counters() {
        let first = gen("x = 1 + 2\n");
        let second = gen("y = 3 + 4\n");
        assert_eq!(body_text(&first, "main")[0], "t0 = 1 + 2");
        assert_eq!(body_text(&second, "main")[0], "t0 = 3 + 4");
    }

    // =========================================================================
    // INVARIANTS
    // =========================================================================

    /// Collect every temporary defined and every label defined per function.
    fn collect_names(program: &Program) -> (Vec<String>, Vec<String>) {
        let mut temps = Vec::new();
        let mut labels = Vec::new();
        for function in &program.functions {
            for instr in &function.body {
                match instr {
                    Instr::Binary { dest, .. }
                    | Instr::Unary { dest, .. }
                    | Instr::Call { dest, .. }
                    | Instr::MethodCall { dest, .. }
                    | Instr::ConstructorCall { dest, .. } => temps.push(dest.to_string()),
                    Instr::Label { name } => labels.push(name.to_string()),
                    _ => {}
                }
            }
        }
        (temps, labels)
    }

    #[test]
    fn test_temporaries_and_labels_are_unique() {
        let source = "def f(a):\n    if a > 0:\n        while a:\n            a = a - 1\n    return a\nif x:\n    y = f(1) + f(2)\nelse:\n    y = 0\n";
        let program = gen(source);
        let (temps, labels) = collect_names(&program);

        let mut dedup = temps.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), temps.len(), "duplicate temporary: {:?}", temps);

        let mut dedup = labels.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), labels.len(), "duplicate label: {:?}", labels);
    }

    #[test]
    fn test_referenced_labels_are_defined_in_function() {
        let source = "def f(a):\n    while a > 0:\n        if a == 1:\n            return a\n        a = a - 2\n    return 0\n";
        let program = gen(source);

        for function in &program.functions {
            let defined: Vec<_> = function
                .body
                .iter()
                .filter_map(|i| match i {
                    Instr::Label { name } => Some(*name),
                    _ => None,
                })
                .collect();

            for instr in &function.body {
                match instr {
                    Instr::Jump { target } => {
                        assert!(defined.contains(target), "undefined label {}", target);
                    }
                    Instr::CondJump {
                        then_label,
                        else_label,
                        ..
                    } => {
                        assert!(defined.contains(then_label));
                        assert!(defined.contains(else_label));
                    }
                    _ => {}
                }
            }
        }
    }

    #[test]
    fn test_nested_if_structure() {
        // Inner blocks nest between the outer labels; every label is
        // defined exactly once.
        let program = gen("if a:\n    if b:\n        x = 1\n");
        let text = body_text(&program, "main");
        assert_eq!(
            text,
            vec![
                "if a jump L0 else L1",
                "L0:",
                "if b jump L3 else L4",
                "L3:",
                "store 1 -> x",
                "jump L5",
                "L4:",
                "L5:",
                "jump L2",
                "L1:",
                "L2:"
            ]
        );
    }

    // =========================================================================
    // ERRORS
    // =========================================================================

    #[test]
    fn test_for_loop_is_unsupported() {
        let err = gen_err("for i in xs:\n    pass\n");
        assert!(err.message.contains("for loops are not supported"));
        assert_eq!(err.line, 1);
    }

    #[test]
    fn test_break_and_continue_are_unsupported() {
        assert!(gen_err("break\n").message.contains("'break'"));
        assert!(gen_err("continue\n").message.contains("'continue'"));
    }

    #[test]
    fn test_imports_are_unsupported() {
        assert!(gen_err("import os\n").message.contains("import"));
        assert!(gen_err("from os import path\n").message.contains("import"));
    }

    #[test]
    fn test_invalid_assignment_target() {
        let err = gen_err("xs[0] = 1\n");
        assert!(err.message.contains("invalid assignment target"));
    }

    #[test]
    fn test_collection_literals_are_unsupported() {
        assert!(gen_err("x = [1, 2]\n").message.contains("list literals"));
        assert!(gen_err("x = {}\n").message.contains("dict literals"));
    }

    #[test]
    fn test_subscript_reads_are_unsupported() {
        assert!(gen_err("x = xs[0]\n").message.contains("subscript"));
    }

    #[test]
    fn test_nested_definitions_are_unsupported() {
        assert!(gen_err("def f():\n    def g():\n        pass\n")
            .message
            .contains("nested function"));
    }
}
