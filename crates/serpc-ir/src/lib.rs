//! serpc-ir - Three-address intermediate representation and its generator.
//!
//! Walks the AST built by `serpc-par` and emits one [`Function`] per source
//! function (class methods included, with `self` prepended), plus a
//! synthesized `main` holding any top-level statements. Nested expressions
//! flatten into temporaries; structured control flow becomes labeled jumps.
//!
//! The crate surface is [`generate_ir`]; [`IrGenerator`] is exported for
//! callers that drive lowering directly, and [`render`] produces the
//! canonical debug text.
//!
//! # Example
//!
//! ```
//! use serpc_ir::generate_ir;
//!
//! let (tokens, _) = serpc_lex::tokenize("x = 1 + 2\n");
//! let (ast, _) = serpc_par::parse(tokens);
//! let (program, errors) = generate_ir(&ast);
//!
//! assert!(errors.is_empty());
//! let program = program.unwrap();
//! assert_eq!(program.functions[0].name.as_str(), "main");
//! ```

pub mod ir;
pub mod lower;

pub use ir::{render, Function, Instr, Operand, Program, Value};
pub use lower::IrGenerator;

use serpc_par::Stmt;
use serpc_util::IrError;

/// Generate IR for a parsed program.
///
/// IR errors are not recovered: on failure the program is `None` and the
/// error vector holds the single error that stopped generation.
pub fn generate_ir(ast: &[Stmt]) -> (Option<Program>, Vec<IrError>) {
    match IrGenerator::new().generate(ast) {
        Ok(program) => (Some(program), Vec::new()),
        Err(error) => (None, vec![error]),
    }
}
