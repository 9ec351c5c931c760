//! Expression parsing using binding-power (Pratt) climbing.
//!
//! # Operator precedence (lowest to highest)
//!
//! | Level | Operators | Associativity |
//! |-------|-----------|---------------|
//! | Assignment | `=` `+=` `-=` `*=` `/=` | Right |
//! | Logical OR | `or` | Left |
//! | Logical AND | `and` | Left |
//! | Equality | `==` `!=` | Left |
//! | Comparison | `<` `>` `<=` `>=` | Left |
//! | Term | `+` `-` | Left |
//! | Factor | `*` `/` `//` `%` | Left |
//! | Unary | prefix `-` `not` | Right |
//! | Power | `**` | Right |
//! | Primary | literals, names, `(...)`, `[...]`, `{...}`, postfix `. () []` | - |
//!
//! Assignment sits above the operator ladder: after an or-level expression,
//! `=` and the compound forms recurse into a full expression. `x op= e`
//! desugars here into `x = x op e` with a cloned target. The `//` token
//! participates at factor level but folds into the `/` operator; the AST op
//! set does not keep the distinction.

use indexmap::IndexMap;

use serpc_lex::TokenKind;
use serpc_util::Symbol;

use crate::ast::*;
use crate::Parser;

/// Binding power levels. Higher numbers bind tighter; a left-associative
/// operator's right power is one above its left power, a right-associative
/// operator's one below.
mod bp {
    /// Start of an expression
    pub const MIN: u8 = 0;
    /// Prefix `-` and `not`
    pub const PREFIX: u8 = 13;
}

/// Binding powers for an infix operator token, if it is one.
fn infix_binding_power(kind: &TokenKind) -> Option<(u8, u8)> {
    let powers = match kind {
        TokenKind::Or => (1, 2),
        TokenKind::And => (3, 4),
        TokenKind::EqEq | TokenKind::NotEq => (5, 6),
        TokenKind::Lt | TokenKind::Gt | TokenKind::LtEq | TokenKind::GtEq => (7, 8),
        TokenKind::Plus | TokenKind::Minus => (9, 10),
        TokenKind::Star | TokenKind::Slash | TokenKind::SlashSlash | TokenKind::Percent => (11, 12),
        // Right-associative, tighter than prefix operators.
        TokenKind::StarStar => (16, 15),
        _ => return None,
    };
    Some(powers)
}

/// The AST operator for an infix token.
fn token_to_binop(kind: &TokenKind) -> Option<BinOp> {
    let op = match kind {
        TokenKind::Plus => BinOp::Add,
        TokenKind::Minus => BinOp::Sub,
        TokenKind::Star => BinOp::Mul,
        // `//` is tokenized separately but shares the division operator.
        TokenKind::Slash | TokenKind::SlashSlash => BinOp::Div,
        TokenKind::Percent => BinOp::Mod,
        TokenKind::StarStar => BinOp::Pow,
        TokenKind::EqEq => BinOp::Eq,
        TokenKind::NotEq => BinOp::Ne,
        TokenKind::Lt => BinOp::Lt,
        TokenKind::Gt => BinOp::Gt,
        TokenKind::LtEq => BinOp::Le,
        TokenKind::GtEq => BinOp::Ge,
        TokenKind::And => BinOp::And,
        TokenKind::Or => BinOp::Or,
        _ => return None,
    };
    Some(op)
}

impl<'a> Parser<'a> {
    /// Parse a full expression, assignments included.
    pub fn parse_expression(&mut self) -> Option<Expr> {
        let target = self.parse_expr_bp(bp::MIN)?;

        let compound = match self.current_kind() {
            TokenKind::Eq => {
                let span = self.current_span();
                self.advance();
                let value = self.parse_expression()?;
                return Some(Expr::Assign(Box::new(AssignExpr {
                    target,
                    value,
                    span,
                })));
            }
            TokenKind::PlusEq => BinOp::Add,
            TokenKind::MinusEq => BinOp::Sub,
            TokenKind::StarEq => BinOp::Mul,
            TokenKind::SlashEq => BinOp::Div,
            _ => return Some(target),
        };

        // `x op= e` becomes `x = x op e`. The target subtree is cloned so
        // the assignment target and the operand stay independent.
        let span = self.current_span();
        self.advance();
        let value = self.parse_expression()?;
        let operation = Expr::Binary(BinaryExpr {
            op: compound,
            left: Box::new(target.clone()),
            right: Box::new(value),
            span,
        });
        Some(Expr::Assign(Box::new(AssignExpr {
            target,
            value: operation,
            span,
        })))
    }

    /// Pratt core: parse an expression consuming only operators whose left
    /// binding power is at least `min_bp`.
    fn parse_expr_bp(&mut self, min_bp: u8) -> Option<Expr> {
        let mut lhs = self.parse_prefix()?;

        loop {
            let kind = self.current_kind();
            let Some((lbp, rbp)) = infix_binding_power(&kind) else {
                break;
            };
            if lbp < min_bp {
                break;
            }

            let span = self.current_span();
            self.advance();
            let rhs = self.parse_expr_bp(rbp)?;
            let op = token_to_binop(&kind)?;
            lhs = Expr::Binary(BinaryExpr {
                op,
                left: Box::new(lhs),
                right: Box::new(rhs),
                span,
            });
        }

        Some(lhs)
    }

    /// Parse a prefix operator or a primary expression.
    fn parse_prefix(&mut self) -> Option<Expr> {
        let op = match self.current_kind() {
            TokenKind::Minus => UnOp::Neg,
            TokenKind::Not => UnOp::Not,
            _ => return self.parse_primary(),
        };

        let span = self.current_span();
        self.advance();
        let operand = self.parse_expr_bp(bp::PREFIX)?;
        Some(Expr::Unary(UnaryExpr {
            op,
            operand: Box::new(operand),
            span,
        }))
    }

    /// Parse a primary expression: literal, name with postfix chain,
    /// parenthesized group, list, or dict.
    fn parse_primary(&mut self) -> Option<Expr> {
        match self.current_kind() {
            TokenKind::Int(value) => {
                self.advance();
                Some(Expr::Int(value))
            }
            TokenKind::Float(value) => {
                self.advance();
                Some(Expr::Float(value))
            }
            TokenKind::Str { value, f_string } => {
                self.advance();
                Some(Expr::Str(StrLit { value, f_string }))
            }
            TokenKind::True => {
                self.advance();
                Some(Expr::Bool(true))
            }
            TokenKind::False => {
                self.advance();
                Some(Expr::Bool(false))
            }
            TokenKind::None => {
                self.advance();
                Some(Expr::None)
            }
            TokenKind::Ident(name) => {
                self.advance();
                self.parse_postfix(Expr::Name(name))
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::RParen, "expected ')'")?;
                Some(expr)
            }
            TokenKind::LBracket => self.parse_list(),
            TokenKind::LBrace => self.parse_dict(),
            kind => {
                self.error(format!("unexpected token {} in expression", kind));
                None
            }
        }
    }

    /// Parse the postfix chain after a primary: attribute access, calls,
    /// and subscripts, in any combination.
    fn parse_postfix(&mut self, mut expr: Expr) -> Option<Expr> {
        loop {
            match self.current_kind() {
                TokenKind::Dot => {
                    let span = self.current_span();
                    self.advance();
                    let attr = self.expect_ident("expected attribute name after '.'")?;
                    expr = Expr::Attribute(Box::new(AttributeExpr {
                        value: expr,
                        attr,
                        span,
                    }));
                }
                TokenKind::LParen => {
                    expr = self.finish_call(expr)?;
                }
                TokenKind::LBracket => {
                    let span = self.current_span();
                    self.advance();
                    let index = self.parse_expression()?;
                    self.expect(TokenKind::RBracket, "expected ']' after subscript")?;
                    expr = Expr::Subscript(Box::new(SubscriptExpr {
                        value: expr,
                        index,
                        span,
                    }));
                }
                _ => break,
            }
        }
        Some(expr)
    }

    /// Parse a call's argument list. An argument of the shape
    /// `Assign(Name, value)` is a keyword argument and moves into the
    /// keyword map; everything else stays positional, in source order.
    fn finish_call(&mut self, callee: Expr) -> Option<Expr> {
        let span = self.current_span();
        self.advance(); // (

        let mut args = Vec::new();
        let mut kwargs = IndexMap::new();

        if self.current_kind() != TokenKind::RParen {
            self.parse_argument(&mut args, &mut kwargs)?;
            while self.match_kind(&TokenKind::Comma) {
                if self.current_kind() == TokenKind::RParen {
                    break; // trailing comma
                }
                self.parse_argument(&mut args, &mut kwargs)?;
            }
        }

        self.expect(TokenKind::RParen, "expected ')' after function arguments")?;
        Some(Expr::Call(Box::new(CallExpr {
            callee,
            args,
            kwargs,
            span,
        })))
    }

    fn parse_argument(
        &mut self,
        args: &mut Vec<Expr>,
        kwargs: &mut IndexMap<Symbol, Expr>,
    ) -> Option<()> {
        let arg = self.parse_expression()?;
        match arg {
            Expr::Assign(assign) => {
                let AssignExpr {
                    target,
                    value,
                    span,
                } = *assign;
                match target {
                    Expr::Name(name) => {
                        kwargs.insert(name, value);
                    }
                    target => args.push(Expr::Assign(Box::new(AssignExpr {
                        target,
                        value,
                        span,
                    }))),
                }
            }
            other => args.push(other),
        }
        Some(())
    }

    /// Parse a list literal `[a, b, ...]` (trailing comma allowed).
    fn parse_list(&mut self) -> Option<Expr> {
        self.advance(); // [
        let mut elements = Vec::new();

        if self.current_kind() != TokenKind::RBracket {
            elements.push(self.parse_expression()?);
            while self.match_kind(&TokenKind::Comma) {
                if self.current_kind() == TokenKind::RBracket {
                    break;
                }
                elements.push(self.parse_expression()?);
            }
        }

        self.expect(TokenKind::RBracket, "expected ']'")?;
        Some(Expr::List(elements))
    }

    /// Parse a dict literal `{k: v, ...}` (trailing comma allowed).
    fn parse_dict(&mut self) -> Option<Expr> {
        self.advance(); // {
        let mut items = Vec::new();

        if self.current_kind() != TokenKind::RBrace {
            items.push(self.parse_dict_item()?);
            while self.match_kind(&TokenKind::Comma) {
                if self.current_kind() == TokenKind::RBrace {
                    break;
                }
                items.push(self.parse_dict_item()?);
            }
        }

        self.expect(TokenKind::RBrace, "expected '}'")?;
        Some(Expr::Dict(items))
    }

    fn parse_dict_item(&mut self) -> Option<(Expr, Expr)> {
        let key = self.parse_expression()?;
        self.expect(TokenKind::Colon, "expected ':' in dictionary literal")?;
        let value = self.parse_expression()?;
        Some((key, value))
    }
}
