//! AST node definitions for the Serpent language.
//!
//! Statements and expressions are tagged enums; composite shapes get their
//! own structs. Nodes carry a [`Span`] where the parser has a natural anchor
//! token (position metadata is a soft invariant, literals go without).
//! Everything derives `Clone` and `PartialEq`: the compound-assignment
//! desugaring duplicates its target subtree, and tests compare trees
//! structurally.

use std::fmt;

use indexmap::IndexMap;
use serpc_util::{Span, Symbol};

/// A statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Function definition
    FunctionDef(FunctionDef),

    /// Class definition
    ClassDef(ClassDef),

    /// `if`/`elif`/`else` chain. `elif` arms are desugared at parse time
    /// into an else body holding a single nested `If`.
    If(If),

    /// `while` loop
    While(While),

    /// `for` loop
    For(For),

    /// `return`, with an optional value
    Return(Return),

    /// `import module [as alias]`
    Import(Import),

    /// `from module import name [as alias], ...`
    FromImport(FromImport),

    /// `pass`
    Pass,

    /// `break`
    Break,

    /// `continue`
    Continue,

    /// Expression statement (including assignments)
    Expr(Expr),
}

/// Function definition
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: Symbol,
    pub params: Vec<Parameter>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// A single function parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: Symbol,
    pub default: Option<Expr>,
    pub keyword_only: bool,
}

impl Parameter {
    /// A plain positional parameter with no default.
    pub fn plain(name: Symbol) -> Self {
        Self {
            name,
            default: None,
            keyword_only: false,
        }
    }
}

/// Class definition
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    pub name: Symbol,
    pub bases: Vec<Expr>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// `if` statement
#[derive(Debug, Clone, PartialEq)]
pub struct If {
    pub cond: Expr,
    pub then_body: Vec<Stmt>,
    pub else_body: Vec<Stmt>,
    pub span: Span,
}

/// `while` loop
#[derive(Debug, Clone, PartialEq)]
pub struct While {
    pub cond: Expr,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// `for` loop. The target is a general expression; whether it is a valid
/// assignment target is not checked by the parser.
#[derive(Debug, Clone, PartialEq)]
pub struct For {
    pub target: Expr,
    pub iter: Expr,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// `return` statement
#[derive(Debug, Clone, PartialEq)]
pub struct Return {
    pub value: Option<Expr>,
    pub span: Span,
}

/// `import` statement
#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub module: Symbol,
    pub alias: Option<Symbol>,
    pub span: Span,
}

/// `from ... import ...` statement. A star import is recorded as the
/// name `"*"`.
#[derive(Debug, Clone, PartialEq)]
pub struct FromImport {
    pub module: Symbol,
    pub names: Vec<ImportName>,
    pub span: Span,
}

/// One imported name with its optional alias
#[derive(Debug, Clone, PartialEq)]
pub struct ImportName {
    pub name: Symbol,
    pub alias: Option<Symbol>,
}

/// An expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Integer literal
    Int(i64),

    /// Float literal
    Float(f64),

    /// String literal (f-strings keep their text verbatim)
    Str(StrLit),

    /// Boolean literal
    Bool(bool),

    /// The `None` literal
    None,

    /// Identifier reference
    Name(Symbol),

    /// Binary operation
    Binary(BinaryExpr),

    /// Unary operation (`-`, `not`)
    Unary(UnaryExpr),

    /// Assignment. The target must be an lvalue (name, attribute, or
    /// subscript); the parser does not enforce this, lowering does.
    Assign(Box<AssignExpr>),

    /// Call with positional and keyword arguments
    Call(Box<CallExpr>),

    /// Attribute access `value.attr`
    Attribute(Box<AttributeExpr>),

    /// Subscript access `value[index]`
    Subscript(Box<SubscriptExpr>),

    /// List literal
    List(Vec<Expr>),

    /// Dict literal, as (key, value) pairs in source order
    Dict(Vec<(Expr, Expr)>),
}

/// String literal payload
#[derive(Debug, Clone, PartialEq)]
pub struct StrLit {
    pub value: Symbol,
    pub f_string: bool,
}

/// Binary operation
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub op: BinOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub span: Span,
}

/// Unary operation
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: UnOp,
    pub operand: Box<Expr>,
    pub span: Span,
}

/// Assignment expression
#[derive(Debug, Clone, PartialEq)]
pub struct AssignExpr {
    pub target: Expr,
    pub value: Expr,
    pub span: Span,
}

/// Call expression. Keyword arguments keep their source order.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Expr,
    pub args: Vec<Expr>,
    pub kwargs: IndexMap<Symbol, Expr>,
    pub span: Span,
}

/// Attribute access
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeExpr {
    pub value: Expr,
    pub attr: Symbol,
    pub span: Span,
}

/// Subscript access
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptExpr {
    pub value: Expr,
    pub index: Expr,
    pub span: Span,
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    And,
    Or,
}

impl BinOp {
    /// The source spelling of the operator.
    pub fn as_str(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Pow => "**",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::Le => "<=",
            BinOp::Ge => ">=",
            BinOp::And => "and",
            BinOp::Or => "or",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg,
    Not,
}

impl UnOp {
    /// The source spelling of the operator.
    pub fn as_str(self) -> &'static str {
        match self {
            UnOp::Neg => "-",
            UnOp::Not => "not",
        }
    }
}

impl fmt::Display for UnOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Expr {
    /// The span of this expression, where one was recorded.
    pub fn span(&self) -> Option<Span> {
        match self {
            Expr::Binary(e) => Some(e.span),
            Expr::Unary(e) => Some(e.span),
            Expr::Assign(e) => Some(e.span),
            Expr::Call(e) => Some(e.span),
            Expr::Attribute(e) => Some(e.span),
            Expr::Subscript(e) => Some(e.span),
            Expr::Int(_)
            | Expr::Float(_)
            | Expr::Str(_)
            | Expr::Bool(_)
            | Expr::None
            | Expr::Name(_)
            | Expr::List(_)
            | Expr::Dict(_) => None,
        }
    }
}

impl Stmt {
    /// The span of this statement, where one was recorded.
    pub fn span(&self) -> Option<Span> {
        match self {
            Stmt::FunctionDef(s) => Some(s.span),
            Stmt::ClassDef(s) => Some(s.span),
            Stmt::If(s) => Some(s.span),
            Stmt::While(s) => Some(s.span),
            Stmt::For(s) => Some(s.span),
            Stmt::Return(s) => Some(s.span),
            Stmt::Import(s) => Some(s.span),
            Stmt::FromImport(s) => Some(s.span),
            Stmt::Expr(e) => e.span(),
            Stmt::Pass | Stmt::Break | Stmt::Continue => None,
        }
    }
}
