//! Typed per-phase error types.
//!
//! Each pipeline stage surfaces its failures as one of three error kinds,
//! all carrying the message plus the 1-based line/column where the problem
//! was detected. The rendered form is the one-line diagnostic shown to
//! users: `<kind>: <message> at line L, column C`.

use thiserror::Error;

use crate::Span;

/// A lexical error. Tokenization stops at the failing character.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("lex error: {message} at line {line}, column {column}")]
pub struct LexError {
    /// Human-readable description of the problem
    pub message: String,
    /// Line where lexing failed (1-based)
    pub line: u32,
    /// Column where lexing failed (1-based)
    pub column: u32,
}

impl LexError {
    /// Create a lex error anchored at a span.
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            line: span.line,
            column: span.column,
        }
    }
}

/// A syntax error. The parser recovers at the next statement boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error: {message} at line {line}, column {column}")]
pub struct ParseError {
    /// Human-readable description of the problem
    pub message: String,
    /// Line of the offending token (1-based)
    pub line: u32,
    /// Column of the offending token (1-based)
    pub column: u32,
}

impl ParseError {
    /// Create a parse error anchored at a span.
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            line: span.line,
            column: span.column,
        }
    }
}

/// An IR lowering error. Not recovered; generation stops.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("ir error: {message} at line {line}, column {column}")]
pub struct IrError {
    /// Human-readable description of the problem
    pub message: String,
    /// Line of the AST node that could not be lowered (1-based)
    pub line: u32,
    /// Column of the AST node that could not be lowered (1-based)
    pub column: u32,
}

impl IrError {
    /// Create an IR error anchored at a span.
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            line: span.line,
            column: span.column,
        }
    }
}
