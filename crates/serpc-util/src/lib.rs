//! serpc-util - Foundation types for the Serpent compiler front end.
//!
//! This crate provides the types shared by every pipeline stage:
//!
//! - [`Span`] - source location tracking (byte range plus line/column)
//! - [`Symbol`] - interned strings for identifiers, names, and labels
//! - [`Diagnostic`] / [`Handler`] - diagnostic collection and reporting
//! - [`LexError`], [`ParseError`], [`IrError`] - typed per-phase errors
//!
//! Nothing here knows about tokens, AST nodes, or IR; the dependency order
//! is strictly util → lex → par → ir → drv.

pub mod diagnostic;
pub mod error;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, Handler, Level};
pub use error::{IrError, LexError, ParseError};
pub use span::Span;
pub use symbol::Symbol;
