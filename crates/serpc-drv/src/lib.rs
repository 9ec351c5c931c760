//! serpc-drv - Compiler driver.
//!
//! The driver is a thin coordinator: it reads the input file, runs
//! lex → parse (→ IR when requested), prints the AST dump and IR text, and
//! reports every diagnostic as a one-line message on stderr. It holds no
//! compiler state of its own.
//!
//! Exit codes: 0 on success, 1 on any I/O, lexical, syntax, or IR error.

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::debug;

use serpc_ir::{generate_ir, render};
use serpc_lex::tokenize;
use serpc_par::{dump, parse};

/// Driver configuration, straight from the command line.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the Serpent source file
    pub input_file: PathBuf,

    /// Print the generated intermediate representation
    pub show_ir: bool,
}

/// Run one compilation and return the process exit code.
///
/// I/O failures surface as errors; compilation problems are printed and
/// reflected in the exit code instead.
pub fn run(config: &Config) -> Result<i32> {
    let source = std::fs::read_to_string(&config.input_file)
        .with_context(|| format!("could not open file {}", config.input_file.display()))?;

    // Lexing. A lexical error aborts before any output is produced.
    let (tokens, lex_errors) = tokenize(&source);
    debug!("lexed {} tokens", tokens.len());
    for error in &lex_errors {
        eprintln!("{}", error);
    }
    if !lex_errors.is_empty() {
        return Ok(1);
    }

    // Parsing recovers at statement boundaries; the dump below may show a
    // partial program when there were syntax errors.
    let (ast, parse_errors) = parse(tokens);
    debug!("parsed {} top-level statements", ast.len());
    for error in &parse_errors {
        eprintln!("{}", error);
    }

    println!("Abstract Syntax Tree for {}:", config.input_file.display());
    println!("{}", "-".repeat(50));
    print!("{}", dump(&ast));

    let mut failed = !parse_errors.is_empty();

    if config.show_ir {
        let (program, ir_errors) = generate_ir(&ast);
        for error in &ir_errors {
            eprintln!("{}", error);
        }
        failed = failed || !ir_errors.is_empty();

        if let Some(program) = program {
            debug!("generated {} functions", program.functions.len());
            println!();
            println!("Intermediate Representation:");
            println!("{}", "-".repeat(50));
            print!("{}", render(&program));
        }
    }

    Ok(if failed { 1 } else { 0 })
}
