//! Definition and import statement parsing: `def`, `class`, `import`,
//! `from ... import`.

use serpc_lex::TokenKind;
use serpc_util::Symbol;

use crate::ast::*;
use crate::Parser;

impl<'a> Parser<'a> {
    /// Parse a function definition.
    pub(crate) fn parse_function_def(&mut self) -> Option<Stmt> {
        let span = self.current_span();
        self.advance(); // def

        let name = self.expect_ident("expected function name after 'def'")?;
        self.expect(TokenKind::LParen, "expected '(' after function name")?;
        let params = self.parse_parameters()?;
        self.expect(TokenKind::RParen, "expected ')' after parameters")?;
        let body = self.parse_block()?;

        Some(Stmt::FunctionDef(FunctionDef {
            name,
            params,
            body,
            span,
        }))
    }

    /// Parse a comma-separated parameter list (may be empty).
    fn parse_parameters(&mut self) -> Option<Vec<Parameter>> {
        let mut params = Vec::new();

        if self.current_kind() == TokenKind::RParen {
            return Some(params);
        }

        params.push(self.parse_parameter()?);
        while self.match_kind(&TokenKind::Comma) {
            params.push(self.parse_parameter()?);
        }

        Some(params)
    }

    /// Parse one parameter with its optional default value.
    fn parse_parameter(&mut self) -> Option<Parameter> {
        let name = self.expect_ident("expected parameter name")?;

        let default = if self.match_kind(&TokenKind::Eq) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        Some(Parameter {
            name,
            default,
            keyword_only: false,
        })
    }

    /// Parse a class definition with its optional base list.
    pub(crate) fn parse_class_def(&mut self) -> Option<Stmt> {
        let span = self.current_span();
        self.advance(); // class

        let name = self.expect_ident("expected class name after 'class'")?;

        let mut bases = Vec::new();
        if self.match_kind(&TokenKind::LParen) {
            if self.current_kind() != TokenKind::RParen {
                bases.push(self.parse_expression()?);
                while self.match_kind(&TokenKind::Comma) {
                    bases.push(self.parse_expression()?);
                }
            }
            self.expect(TokenKind::RParen, "expected ')' after base classes")?;
        }

        let body = self.parse_block()?;

        Some(Stmt::ClassDef(ClassDef {
            name,
            bases,
            body,
            span,
        }))
    }

    /// Parse `import module [as alias]`.
    pub(crate) fn parse_import(&mut self) -> Option<Stmt> {
        let span = self.current_span();
        self.advance(); // import

        let module = self.expect_ident("expected module name after 'import'")?;
        let alias = if self.match_kind(&TokenKind::As) {
            Some(self.expect_ident("expected alias after 'as'")?)
        } else {
            None
        };

        self.match_kind(&TokenKind::Newline);
        Some(Stmt::Import(Import {
            module,
            alias,
            span,
        }))
    }

    /// Parse `from module import a [as b], ...` or `from module import *`.
    pub(crate) fn parse_from_import(&mut self) -> Option<Stmt> {
        let span = self.current_span();
        self.advance(); // from

        let module = self.expect_ident("expected module name after 'from'")?;
        self.expect(TokenKind::Import, "expected 'import' after module name")?;

        let mut names = Vec::new();
        if self.match_kind(&TokenKind::Star) {
            names.push(ImportName {
                name: Symbol::intern("*"),
                alias: None,
            });
        } else {
            names.push(self.parse_import_name()?);
            while self.match_kind(&TokenKind::Comma) {
                names.push(self.parse_import_name()?);
            }
        }

        self.match_kind(&TokenKind::Newline);
        Some(Stmt::FromImport(FromImport {
            module,
            names,
            span,
        }))
    }

    fn parse_import_name(&mut self) -> Option<ImportName> {
        let name = self.expect_ident("expected name to import")?;
        let alias = if self.match_kind(&TokenKind::As) {
            Some(self.expect_ident("expected alias after 'as'")?)
        } else {
            None
        };
        Some(ImportName { name, alias })
    }
}
