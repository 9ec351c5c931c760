//! serpc-par - Recursive descent parser for the Serpent language.
//!
//! Consumes the token stream produced by `serpc-lex` and builds a list of
//! top-level [`Stmt`] nodes. Statements dispatch on their leading token;
//! expressions use binding-power (Pratt) climbing; blocks follow the
//! `Colon` / optional `Newline` / `Indent` ... `Dedent` layout the lexer
//! synthesizes.
//!
//! Syntax errors are reported to the shared [`Handler`] and recovered at
//! statement boundaries: the parser skips to the next `Newline`,
//! `Semicolon`, or `End` and resumes, so the returned statement list may be
//! a partial prefix of the program.
//!
//! # Example
//!
//! ```
//! use serpc_lex::tokenize;
//! use serpc_par::{parse, Stmt};
//!
//! let (tokens, _) = tokenize("def f(a):\n    return a\n");
//! let (ast, errors) = parse(tokens);
//! assert!(errors.is_empty());
//! assert!(matches!(ast[0], Stmt::FunctionDef(_)));
//! ```

pub mod ast;
pub mod expr;
pub mod items;
pub mod print;
pub mod stmt;

pub use ast::*;
pub use print::{dump, unparse};

use serpc_lex::{Token, TokenKind};
use serpc_util::{Handler, ParseError, Span, Symbol};

/// Parse a token stream into a list of top-level statements.
///
/// Returns the (possibly partial) statement list together with every syntax
/// error encountered; the parser recovers at statement boundaries rather
/// than stopping at the first problem.
pub fn parse(tokens: Vec<Token>) -> (Vec<Stmt>, Vec<ParseError>) {
    let handler = Handler::new();
    let stmts = Parser::new(tokens, &handler).parse();
    let errors = handler
        .take()
        .into_iter()
        .map(|d| ParseError::new(d.message, d.span))
        .collect();
    (stmts, errors)
}

/// Recursive descent parser over a token vector.
pub struct Parser<'a> {
    /// Token stream from the lexer
    tokens: Vec<Token>,

    /// Current position in the token stream
    position: usize,

    /// Diagnostic sink shared with the caller
    handler: &'a Handler,
}

impl<'a> Parser<'a> {
    /// Create a parser over `tokens`, reporting errors to `handler`.
    pub fn new(tokens: Vec<Token>, handler: &'a Handler) -> Self {
        Self {
            tokens,
            position: 0,
            handler,
        }
    }

    /// Parse the whole stream into top-level statements.
    pub fn parse(&mut self) -> Vec<Stmt> {
        let mut stmts = Vec::new();

        while self.current_kind() != TokenKind::End {
            // Blank lines produce lone newline tokens; skip them.
            if self.match_kind(&TokenKind::Newline) {
                continue;
            }
            match self.parse_statement() {
                Some(stmt) => stmts.push(stmt),
                None => self.synchronize(),
            }
        }

        stmts
    }

    /// Parse one statement, dispatching on the leading token.
    ///
    /// Returns `None` after reporting a diagnostic; the caller decides how
    /// to recover.
    pub(crate) fn parse_statement(&mut self) -> Option<Stmt> {
        match self.current_kind() {
            TokenKind::Def => self.parse_function_def(),
            TokenKind::Class => self.parse_class_def(),
            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => self.parse_while_loop(),
            TokenKind::For => self.parse_for_loop(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Import => self.parse_import(),
            TokenKind::From => self.parse_from_import(),
            TokenKind::Pass => {
                self.advance();
                self.match_kind(&TokenKind::Newline);
                Some(Stmt::Pass)
            }
            TokenKind::Break => {
                self.advance();
                self.match_kind(&TokenKind::Newline);
                Some(Stmt::Break)
            }
            TokenKind::Continue => {
                self.advance();
                self.match_kind(&TokenKind::Newline);
                Some(Stmt::Continue)
            }
            _ => {
                // Expression statement, including assignments.
                let expr = self.parse_expression()?;
                self.match_kind(&TokenKind::Newline);
                Some(Stmt::Expr(expr))
            }
        }
    }

    /// Parse a block: `:` then either an indented statement list or a
    /// single statement on the same line.
    pub(crate) fn parse_block(&mut self) -> Option<Vec<Stmt>> {
        self.expect(TokenKind::Colon, "expected ':' before indented block")?;
        self.match_kind(&TokenKind::Newline);

        if !self.match_kind(&TokenKind::Indent) {
            // Single-line block, e.g. `if x: pass`.
            let stmt = self.parse_statement()?;
            return Some(vec![stmt]);
        }

        let mut stmts = Vec::new();
        while self.current_kind() != TokenKind::Dedent && self.current_kind() != TokenKind::End {
            if self.match_kind(&TokenKind::Newline) {
                continue;
            }
            stmts.push(self.parse_statement()?);
        }
        self.match_kind(&TokenKind::Dedent);

        Some(stmts)
    }

    /// Skip to the next statement boundary after an error.
    ///
    /// Advances past everything up to a `Newline`, `Semicolon`, or `End`,
    /// consuming the boundary token itself (except `End`).
    pub(crate) fn synchronize(&mut self) {
        loop {
            match self.current_kind() {
                TokenKind::Newline | TokenKind::Semicolon => {
                    self.advance();
                    return;
                }
                TokenKind::End => return,
                _ => self.advance(),
            }
        }
    }

    // =========================================================================
    // TOKEN STREAM HELPERS
    // =========================================================================

    /// The kind of the current token; `End` past the stream.
    pub(crate) fn current_kind(&self) -> TokenKind {
        self.tokens
            .get(self.position)
            .map(|t| t.kind.clone())
            .unwrap_or(TokenKind::End)
    }

    /// The span of the current token; the last token's span past the end.
    pub(crate) fn current_span(&self) -> Span {
        self.tokens
            .get(self.position)
            .or_else(|| self.tokens.last())
            .map(|t| t.span)
            .unwrap_or(Span::DUMMY)
    }

    /// Advance past the current token.
    pub(crate) fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    /// Consume the current token if its kind equals `kind`.
    pub(crate) fn match_kind(&mut self, kind: &TokenKind) -> bool {
        if self.current_kind() == *kind {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Require a token of the given kind, reporting `message` otherwise.
    pub(crate) fn expect(&mut self, kind: TokenKind, message: &str) -> Option<Span> {
        let span = self.current_span();
        if self.match_kind(&kind) {
            Some(span)
        } else {
            self.error(message.to_string());
            None
        }
    }

    /// Require an identifier, returning its symbol.
    pub(crate) fn expect_ident(&mut self, message: &str) -> Option<Symbol> {
        match self.current_kind() {
            TokenKind::Ident(name) => {
                self.advance();
                Some(name)
            }
            _ => {
                self.error(message.to_string());
                None
            }
        }
    }

    /// Report a syntax error at the current token.
    pub(crate) fn error(&self, message: String) {
        self.handler.error(message, self.current_span());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serpc_lex::Lexer;

    fn parse_source(source: &str) -> (Vec<Stmt>, Vec<ParseError>) {
        let (tokens, lex_errors) = serpc_lex::tokenize(source);
        assert!(lex_errors.is_empty(), "lex errors: {:?}", lex_errors);
        parse(tokens)
    }

    #[test]
    fn test_parse_empty_source() {
        let (stmts, errors) = parse_source("");
        assert!(stmts.is_empty());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let (stmts, errors) = parse_source("\n\nx = 1\n\n\n");
        assert!(errors.is_empty());
        assert_eq!(stmts.len(), 1);
    }

    #[test]
    fn test_error_recovery_keeps_later_statements() {
        // The first line is broken; the second parses fine.
        let (stmts, errors) = parse_source("x = )\ny = 2\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(stmts.len(), 1);
        assert!(matches!(&stmts[0], Stmt::Expr(Expr::Assign(_))));
    }

    #[test]
    fn test_multiple_errors_are_all_reported() {
        let (stmts, errors) = parse_source("x = )\ny = ]\nz = 3\n");
        assert_eq!(errors.len(), 2);
        assert_eq!(stmts.len(), 1);
    }

    #[test]
    fn test_error_positions() {
        let (_, errors) = parse_source("x = )\n");
        assert_eq!(errors[0].line, 1);
        assert_eq!(errors[0].column, 5);
    }

    #[test]
    fn test_statement_keywords() {
        let (stmts, errors) = parse_source("pass\nbreak\ncontinue\n");
        assert!(errors.is_empty());
        assert_eq!(stmts, vec![Stmt::Pass, Stmt::Break, Stmt::Continue]);
    }

    #[test]
    fn test_parser_with_shared_handler() {
        let handler = Handler::new();
        let tokens = Lexer::new("x = 1\n", &handler).tokenize();
        let stmts = Parser::new(tokens, &handler).parse();
        assert!(!handler.has_errors());
        assert_eq!(stmts.len(), 1);
    }

    #[test]
    fn test_with_keyword_is_not_a_statement() {
        // `with` is lexed as a keyword but has no statement form; it fails
        // as an expression and the parser recovers.
        let (stmts, errors) = parse_source("with open(f) as g:\n    pass\nx = 1\n");
        assert!(!errors.is_empty());
        assert!(matches!(stmts.last(), Some(Stmt::Expr(Expr::Assign(_)))));
    }
}
