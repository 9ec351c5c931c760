//! Control-flow and simple statement parsing.

use serpc_lex::TokenKind;

use crate::ast::*;
use crate::Parser;

impl<'a> Parser<'a> {
    /// Parse an `if` statement with its `elif`/`else` chain.
    ///
    /// An `elif` arm becomes an else body holding a single nested `If`, so
    /// the chain is right-nested in the AST; a trailing `else` attaches to
    /// the innermost `If`.
    pub(crate) fn parse_if_statement(&mut self) -> Option<Stmt> {
        let span = self.current_span();
        self.advance(); // if (or elif when called for a chained arm)

        let cond = self.parse_expression()?;
        let then_body = self.parse_block()?;

        let mut else_body = Vec::new();
        if self.current_kind() == TokenKind::Elif {
            // The recursive call consumes the elif as its leading token.
            else_body.push(self.parse_if_statement()?);
        } else if self.match_kind(&TokenKind::Else) {
            else_body = self.parse_block()?;
        }

        Some(Stmt::If(If {
            cond,
            then_body,
            else_body,
            span,
        }))
    }

    /// Parse a `while` loop.
    pub(crate) fn parse_while_loop(&mut self) -> Option<Stmt> {
        let span = self.current_span();
        self.advance(); // while

        let cond = self.parse_expression()?;
        let body = self.parse_block()?;

        Some(Stmt::While(While { cond, body, span }))
    }

    /// Parse a `for` loop. The target is a general expression; no lvalue
    /// check happens here.
    pub(crate) fn parse_for_loop(&mut self) -> Option<Stmt> {
        let span = self.current_span();
        self.advance(); // for

        let target = self.parse_expression()?;
        self.expect(TokenKind::In, "expected 'in' after for-loop target")?;
        let iter = self.parse_expression()?;
        let body = self.parse_block()?;

        Some(Stmt::For(For {
            target,
            iter,
            body,
            span,
        }))
    }

    /// Parse a `return` statement with an optional value.
    pub(crate) fn parse_return(&mut self) -> Option<Stmt> {
        let span = self.current_span();
        self.advance(); // return

        let value = match self.current_kind() {
            TokenKind::Newline | TokenKind::Semicolon | TokenKind::Dedent | TokenKind::End => None,
            _ => Some(self.parse_expression()?),
        };

        self.match_kind(&TokenKind::Newline);
        Some(Stmt::Return(Return { value, span }))
    }
}
