//! Tree-building helpers for evaluator tests.
//!
//! The parser lives outside this workspace, so tests assemble programs from
//! AST nodes directly. Every node gets line 1; tests that care about error
//! locations use the `*_at` variants.

#![allow(dead_code)]

use simplf_eval::{BufferSink, DiagnosticCollector, EvalError, Interpreter, InterpreterConfig, Value};
use simplf_types::ast::*;
use simplf_types::Span;

pub fn at(col: u32) -> Span {
    Span::point(1, col)
}

fn sp() -> Span {
    at(1)
}

pub fn ident(name: &str) -> Ident {
    Ident::new(name, sp())
}

// ── Expressions ──────────────────────────────────────────────────────────────

pub fn num(n: f64) -> Expr {
    Expr::number(n, sp())
}

pub fn text(s: &str) -> Expr {
    Expr::string(s, sp())
}

pub fn boolean(b: bool) -> Expr {
    Expr::boolean(b, sp())
}

pub fn nil() -> Expr {
    Expr::nil(sp())
}

pub fn var(name: &str) -> Expr {
    Expr::variable(ident(name))
}

pub fn var_at(name: &str, span: Span) -> Expr {
    Expr::variable(Ident::new(name, span))
}

pub fn group(inner: Expr) -> Expr {
    Expr::grouping(inner, sp())
}

pub fn assign(name: &str, value: Expr) -> Expr {
    Expr::assign(ident(name), value)
}

pub fn bin(left: Expr, op: BinOp, right: Expr) -> Expr {
    bin_at(left, op, sp(), right)
}

pub fn bin_at(left: Expr, op: BinOp, op_span: Span, right: Expr) -> Expr {
    Expr::binary(left, Spanned::new(op, op_span), right)
}

pub fn and(left: Expr, right: Expr) -> Expr {
    Expr::logical(left, Spanned::new(LogicalOp::And, sp()), right)
}

pub fn or(left: Expr, right: Expr) -> Expr {
    Expr::logical(left, Spanned::new(LogicalOp::Or, sp()), right)
}

pub fn neg(operand: Expr) -> Expr {
    Expr::unary(Spanned::new(UnaryOp::Neg, sp()), operand)
}

pub fn not(operand: Expr) -> Expr {
    Expr::unary(Spanned::new(UnaryOp::Not, sp()), operand)
}

pub fn ternary(condition: Expr, then_branch: Expr, else_branch: Expr) -> Expr {
    Expr::conditional(condition, then_branch, else_branch)
}

pub fn call(callee: &str, args: Vec<Expr>) -> Expr {
    Expr::call(var(callee), args, sp())
}

pub fn call_at(callee: Expr, args: Vec<Expr>, paren: Span) -> Expr {
    Expr::call(callee, args, paren)
}

// ── Statements ───────────────────────────────────────────────────────────────

pub fn expr(e: Expr) -> Stmt {
    Stmt::expression(e)
}

pub fn print(e: Expr) -> Stmt {
    Stmt::print(e, sp())
}

pub fn decl(name: &str, init: Expr) -> Stmt {
    Stmt::var(ident(name), Some(init))
}

pub fn decl_empty(name: &str) -> Stmt {
    Stmt::var(ident(name), None)
}

pub fn block(stmts: Vec<Stmt>) -> Stmt {
    Stmt::block(stmts, sp())
}

pub fn if_stmt(condition: Expr, then_branch: Stmt, else_branch: Option<Stmt>) -> Stmt {
    Stmt::if_else(condition, then_branch, else_branch)
}

pub fn while_stmt(condition: Expr, body: Stmt) -> Stmt {
    Stmt::while_loop(condition, body)
}

pub fn fun(name: &str, params: &[&str], body: Vec<Stmt>) -> Stmt {
    Stmt::function(
        ident(name),
        params.iter().map(|p| ident(p)).collect(),
        body,
        sp(),
    )
}

// ── Running ──────────────────────────────────────────────────────────────────

pub fn interpreter() -> Interpreter<BufferSink> {
    Interpreter::with_output(BufferSink::new())
}

pub fn interpreter_with_depth(max_call_depth: usize) -> Interpreter<BufferSink> {
    Interpreter::with_config(BufferSink::new(), InterpreterConfig { max_call_depth })
}

/// Run a program, returning printed lines and the error that stopped it.
pub fn run(program: &[Stmt]) -> (Vec<String>, Option<EvalError>) {
    let mut interp = interpreter();
    let err = interp.run(program).err();
    (interp.output().lines().to_vec(), err)
}

/// Run a program that must succeed, returning printed lines.
pub fn output(program: &[Stmt]) -> Vec<String> {
    let (lines, err) = run(program);
    if let Some(err) = err {
        panic!("unexpected runtime error: {err}");
    }
    lines
}

/// Run a program that must fail, returning the error.
pub fn failure(program: &[Stmt]) -> EvalError {
    match run(program) {
        (_, Some(err)) => err,
        (lines, None) => panic!("expected a runtime error, program printed {lines:?}"),
    }
}

/// Evaluate a single expression in a fresh interpreter.
pub fn eval(e: Expr) -> Result<Value, EvalError> {
    interpreter().evaluate_expression(&e)
}

pub fn reporter() -> DiagnosticCollector {
    DiagnosticCollector::new()
}
