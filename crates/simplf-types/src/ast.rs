//! AST node types consumed by the Simplf runtime.
//!
//! The tree is produced by an external parser. Every node carries a [`Span`];
//! operator and call nodes additionally carry the span of the token that
//! triggers their runtime errors. Function declarations sit behind an [`Rc`]
//! so closures can share a declaration with the tree instead of copying it.

use crate::Span;
use std::rc::Rc;

// ══════════════════════════════════════════════════════════════════════════════
// Shared pieces
// ══════════════════════════════════════════════════════════════════════════════

/// A spanned identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// A value paired with the location of the token it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// A literal embedded in the source.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    Str(String),
    Bool(bool),
    Nil,
}

// ══════════════════════════════════════════════════════════════════════════════
// Statements
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// `expr;`
    Expression(Expr),
    /// `print expr;`
    Print(Expr),
    /// `var name [= initializer];`
    Var {
        name: Ident,
        initializer: Option<Expr>,
    },
    /// `{ stmts... }`
    Block(Vec<Stmt>),
    /// `if (cond) then [else otherwise]`
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    /// `while (cond) body`
    While { condition: Expr, body: Box<Stmt> },
    /// `for (init; cond; incr) body`. Parsers are expected to lower this
    /// into a `while` block; the evaluator refuses to run it.
    For(Box<ForStmt>),
    /// `fun name(params) { body }`
    Function(Rc<FunctionDecl>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub initializer: Option<Stmt>,
    pub condition: Option<Expr>,
    pub increment: Option<Expr>,
    pub body: Stmt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: Ident,
    pub params: Vec<Ident>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn expression(expr: Expr) -> Self {
        let span = expr.span;
        Self::new(StmtKind::Expression(expr), span)
    }

    pub fn print(expr: Expr, span: Span) -> Self {
        let span = span.to(expr.span);
        Self::new(StmtKind::Print(expr), span)
    }

    pub fn var(name: Ident, initializer: Option<Expr>) -> Self {
        let span = initializer
            .as_ref()
            .map_or(name.span, |init| name.span.to(init.span));
        Self::new(StmtKind::Var { name, initializer }, span)
    }

    pub fn block(stmts: Vec<Stmt>, span: Span) -> Self {
        Self::new(StmtKind::Block(stmts), span)
    }

    pub fn if_else(condition: Expr, then_branch: Stmt, else_branch: Option<Stmt>) -> Self {
        let end = else_branch.as_ref().map_or(then_branch.span, |e| e.span);
        let span = condition.span.to(end);
        Self::new(
            StmtKind::If {
                condition,
                then_branch: Box::new(then_branch),
                else_branch: else_branch.map(Box::new),
            },
            span,
        )
    }

    pub fn while_loop(condition: Expr, body: Stmt) -> Self {
        let span = condition.span.to(body.span);
        Self::new(
            StmtKind::While {
                condition,
                body: Box::new(body),
            },
            span,
        )
    }

    pub fn for_loop(for_stmt: ForStmt, span: Span) -> Self {
        Self::new(StmtKind::For(Box::new(for_stmt)), span)
    }

    pub fn function(name: Ident, params: Vec<Ident>, body: Vec<Stmt>, span: Span) -> Self {
        let decl = FunctionDecl {
            name,
            params,
            body,
            span,
        };
        Self::new(StmtKind::Function(Rc::new(decl)), span)
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Expressions
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    /// `(expr)`
    Grouping(Box<Expr>),
    Variable(Ident),
    /// `name = value`
    Assign { name: Ident, value: Box<Expr> },
    /// `a and b`, `a or b`
    Logical {
        left: Box<Expr>,
        op: Spanned<LogicalOp>,
        right: Box<Expr>,
    },
    /// `cond ? then : otherwise`
    Conditional {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    /// `-x`, `!x`
    Unary {
        op: Spanned<UnaryOp>,
        operand: Box<Expr>,
    },
    /// `a + b`, `a == b`, `a, b`, ...
    Binary {
        left: Box<Expr>,
        op: Spanned<BinOp>,
        right: Box<Expr>,
    },
    /// `callee(args...)`; `paren` is the closing parenthesis.
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
        paren: Span,
    },
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn literal(value: Literal, span: Span) -> Self {
        Self::new(ExprKind::Literal(value), span)
    }

    pub fn number(n: f64, span: Span) -> Self {
        Self::literal(Literal::Number(n), span)
    }

    pub fn string(s: impl Into<String>, span: Span) -> Self {
        Self::literal(Literal::Str(s.into()), span)
    }

    pub fn boolean(b: bool, span: Span) -> Self {
        Self::literal(Literal::Bool(b), span)
    }

    pub fn nil(span: Span) -> Self {
        Self::literal(Literal::Nil, span)
    }

    pub fn grouping(inner: Expr, span: Span) -> Self {
        Self::new(ExprKind::Grouping(Box::new(inner)), span)
    }

    pub fn variable(name: Ident) -> Self {
        let span = name.span;
        Self::new(ExprKind::Variable(name), span)
    }

    pub fn assign(name: Ident, value: Expr) -> Self {
        let span = name.span.to(value.span);
        Self::new(
            ExprKind::Assign {
                name,
                value: Box::new(value),
            },
            span,
        )
    }

    pub fn logical(left: Expr, op: Spanned<LogicalOp>, right: Expr) -> Self {
        let span = left.span.to(right.span);
        Self::new(
            ExprKind::Logical {
                left: Box::new(left),
                op,
                right: Box::new(right),
            },
            span,
        )
    }

    pub fn conditional(condition: Expr, then_branch: Expr, else_branch: Expr) -> Self {
        let span = condition.span.to(else_branch.span);
        Self::new(
            ExprKind::Conditional {
                condition: Box::new(condition),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
            span,
        )
    }

    pub fn unary(op: Spanned<UnaryOp>, operand: Expr) -> Self {
        let span = op.span.to(operand.span);
        Self::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        )
    }

    pub fn binary(left: Expr, op: Spanned<BinOp>, right: Expr) -> Self {
        let span = left.span.to(right.span);
        Self::new(
            ExprKind::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            },
            span,
        )
    }

    pub fn call(callee: Expr, args: Vec<Expr>, paren: Span) -> Self {
        let span = callee.span.to(paren);
        Self::new(
            ExprKind::Call {
                callee: Box::new(callee),
                args,
                paren,
            },
            span,
        )
    }
}

// ── Operators ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Greater,
    GreaterEq,
    Less,
    LessEq,
    Eq,
    NotEq,
    /// `a, b`: evaluates both, yields `b`.
    Comma,
}

impl BinOp {
    /// Operator symbol, for error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Greater => ">",
            BinOp::GreaterEq => ">=",
            BinOp::Less => "<",
            BinOp::LessEq => "<=",
            BinOp::Eq => "==",
            BinOp::NotEq => "!=",
            BinOp::Comma => ",",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `-x`
    Neg,
    /// `!x`
    Not,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(col: u32) -> Span {
        Span::point(1, col)
    }

    #[test]
    fn test_binary_span_covers_operands() {
        let expr = Expr::binary(
            Expr::number(1.0, at(1)),
            Spanned::new(BinOp::Add, at(3)),
            Expr::number(2.0, at(5)),
        );
        assert_eq!(expr.span, Span::new(1, 1, 1, 5));
        match expr.kind {
            ExprKind::Binary { op, .. } => assert_eq!(op.span, at(3)),
            other => panic!("expected binary, got {other:?}"),
        }
    }

    #[test]
    fn test_var_without_initializer_uses_name_span() {
        let stmt = Stmt::var(Ident::new("a", at(5)), None);
        assert_eq!(stmt.span, at(5));
    }

    #[test]
    fn test_function_decl_is_shared() {
        let stmt = Stmt::function(Ident::new("f", at(5)), vec![], vec![], at(1));
        let copy = stmt.clone();
        match (&stmt.kind, &copy.kind) {
            (StmtKind::Function(a), StmtKind::Function(b)) => assert!(Rc::ptr_eq(a, b)),
            _ => panic!("expected function declarations"),
        }
    }

    #[test]
    fn test_binop_symbols() {
        assert_eq!(BinOp::GreaterEq.as_str(), ">=");
        assert_eq!(BinOp::Comma.as_str(), ",");
    }
}
