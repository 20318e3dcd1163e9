//! Core statement and expression evaluator.
//!
//! The current environment is passed down the recursion rather than stored
//! on the evaluator. Statements that declare names take it as
//! `&mut Rc<Environment>` and advance it; blocks and calls run against a
//! scope of their own, so the caller's environment is untouched on every
//! exit path, errors included.

use crate::callable::{Callable, Function};
use crate::config::InterpreterConfig;
use crate::env::Environment;
use crate::error::{EvalError, EvalResult};
use crate::output::PrintSink;
use crate::value::Value;
use simplf_types::ast::*;
use simplf_types::Span;
use std::rc::Rc;

/// Walks AST nodes and produces values.
pub struct Evaluator<O: PrintSink> {
    output: O,
    config: InterpreterConfig,
    /// Number of user-function calls currently on the stack.
    call_depth: usize,
}

impl<O: PrintSink> Evaluator<O> {
    pub fn new(output: O, config: InterpreterConfig) -> Self {
        Self {
            output,
            config,
            call_depth: 0,
        }
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    pub fn call_depth(&self) -> usize {
        self.call_depth
    }

    // ══════════════════════════════════════════════════════════════════════
    // Statements
    // ══════════════════════════════════════════════════════════════════════

    /// Execute one statement. Its value feeds the block-result rule: a block
    /// (and so a function call) yields the value of its last statement.
    pub fn exec_stmt(&mut self, stmt: &Stmt, env: &mut Rc<Environment>) -> EvalResult<Value> {
        match &stmt.kind {
            StmtKind::Expression(expr) => self.eval_expr(expr, env),
            StmtKind::Print(expr) => {
                let value = self.eval_expr(expr, env)?;
                self.output.println(&value.to_string());
                Ok(Value::Nil)
            }
            StmtKind::Var { name, initializer } => {
                let value = match initializer {
                    Some(init) => self.eval_expr(init, env)?,
                    None => Value::Nil,
                };
                *env = env.define(&name.name, value.clone());
                Ok(value)
            }
            StmtKind::Block(stmts) => {
                let scope = Environment::with_enclosing(Rc::clone(env));
                self.exec_block(stmts, scope)
            }
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.eval_expr(condition, env)?.is_truthy() {
                    self.exec_stmt(then_branch, env)?;
                } else if let Some(else_branch) = else_branch {
                    self.exec_stmt(else_branch, env)?;
                }
                Ok(Value::Nil)
            }
            StmtKind::While { condition, body } => {
                while self.eval_expr(condition, env)?.is_truthy() {
                    self.exec_stmt(body, env)?;
                }
                Ok(Value::Nil)
            }
            StmtKind::For(_) => Err(EvalError::InternalUnsupported {
                construct: "For loops",
                span: stmt.span,
            }),
            StmtKind::Function(decl) => {
                // The closure shares `env`, and `define` prepends to `env`
                // itself, so the body can see its own name.
                let function = Function::new(Rc::clone(decl), Rc::clone(env));
                let value = Value::Callable(Callable::Function(Rc::new(function)));
                *env = env.define(&decl.name.name, value.clone());
                Ok(value)
            }
        }
    }

    /// Run `stmts` in order against `scope`. Yields the last statement's value, or nil.
    pub fn exec_block(&mut self, stmts: &[Stmt], mut scope: Rc<Environment>) -> EvalResult<Value> {
        let mut last = Value::Nil;
        for stmt in stmts {
            last = self.exec_stmt(stmt, &mut scope)?;
        }
        Ok(last)
    }

    // ══════════════════════════════════════════════════════════════════════
    // Expressions
    // ══════════════════════════════════════════════════════════════════════

    pub fn eval_expr(&mut self, expr: &Expr, env: &Rc<Environment>) -> EvalResult<Value> {
        match &expr.kind {
            ExprKind::Literal(literal) => Ok(Value::from(literal)),
            ExprKind::Grouping(inner) => self.eval_expr(inner, env),
            ExprKind::Variable(name) => env.get(&name.name, name.span),
            ExprKind::Assign { name, value } => {
                let value = self.eval_expr(value, env)?;
                env.assign(&name.name, value.clone(), name.span)?;
                Ok(value)
            }
            ExprKind::Logical { left, op, right } => self.eval_logical(left, op.node, right, env),
            ExprKind::Conditional {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.eval_expr(condition, env)?.is_truthy() {
                    self.eval_expr(then_branch, env)
                } else {
                    self.eval_expr(else_branch, env)
                }
            }
            ExprKind::Unary { op, operand } => self.eval_unary(*op, operand, env),
            ExprKind::Binary { left, op, right } => self.eval_binary(left, *op, right, env),
            ExprKind::Call {
                callee,
                args,
                paren,
            } => self.eval_call(callee, args, *paren, env),
        }
    }

    // ── Operators ────────────────────────────────────────────────────────

    /// Short-circuits, yielding whichever operand decided the result.
    fn eval_logical(
        &mut self,
        left: &Expr,
        op: LogicalOp,
        right: &Expr,
        env: &Rc<Environment>,
    ) -> EvalResult<Value> {
        let lv = self.eval_expr(left, env)?;
        let decided = match op {
            LogicalOp::Or => lv.is_truthy(),
            LogicalOp::And => !lv.is_truthy(),
        };
        if decided {
            Ok(lv)
        } else {
            self.eval_expr(right, env)
        }
    }

    fn eval_unary(
        &mut self,
        op: Spanned<UnaryOp>,
        operand: &Expr,
        env: &Rc<Environment>,
    ) -> EvalResult<Value> {
        let val = self.eval_expr(operand, env)?;
        match op.node {
            UnaryOp::Neg => match val {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(EvalError::type_mismatch("Operand must be a number.", op.span)),
            },
            UnaryOp::Not => Ok(Value::Bool(!val.is_truthy())),
        }
    }

    fn eval_binary(
        &mut self,
        left: &Expr,
        op: Spanned<BinOp>,
        right: &Expr,
        env: &Rc<Environment>,
    ) -> EvalResult<Value> {
        let lv = self.eval_expr(left, env)?;
        let rv = self.eval_expr(right, env)?;
        let span = op.span;

        match op.node {
            BinOp::Add => eval_add(lv, rv, span),
            BinOp::Sub => {
                let (a, b) = numbers(&lv, &rv, span)?;
                Ok(Value::Number(a - b))
            }
            BinOp::Mul => {
                let (a, b) = numbers(&lv, &rv, span)?;
                Ok(Value::Number(a * b))
            }
            BinOp::Div => {
                let (a, b) = numbers(&lv, &rv, span)?;
                if b == 0.0 {
                    return Err(EvalError::DivisionByZero { span });
                }
                Ok(Value::Number(a / b))
            }
            BinOp::Greater => compare(&lv, &rv, span, |a, b| a > b),
            BinOp::GreaterEq => compare(&lv, &rv, span, |a, b| a >= b),
            BinOp::Less => compare(&lv, &rv, span, |a, b| a < b),
            BinOp::LessEq => compare(&lv, &rv, span, |a, b| a <= b),
            BinOp::Eq => Ok(Value::Bool(lv == rv)),
            BinOp::NotEq => Ok(Value::Bool(lv != rv)),
            BinOp::Comma => Ok(rv),
        }
    }

    // ── Calls ────────────────────────────────────────────────────────────

    fn eval_call(
        &mut self,
        callee: &Expr,
        args: &[Expr],
        paren: Span,
        env: &Rc<Environment>,
    ) -> EvalResult<Value> {
        let Value::Callable(callable) = self.eval_expr(callee, env)? else {
            return Err(EvalError::NotCallable { span: paren });
        };

        let mut arg_vals = Vec::with_capacity(args.len());
        for arg in args {
            arg_vals.push(self.eval_expr(arg, env)?);
        }
        self.call(&callable, arg_vals, paren)
    }

    /// Invoke a callable with already-evaluated arguments.
    ///
    /// The argument count must match the declared arity exactly.
    pub fn call(&mut self, callable: &Callable, args: Vec<Value>, span: Span) -> EvalResult<Value> {
        if args.len() != callable.arity() {
            return Err(EvalError::ArityMismatch {
                expected: callable.arity(),
                found: args.len(),
                span,
            });
        }
        match callable {
            Callable::Function(function) => self.call_function(function, args, span),
            Callable::Native(native) => {
                native
                    .invoke(&args)
                    .map_err(|message| EvalError::NativeFailure {
                        name: native.name().to_string(),
                        message,
                        span,
                    })
            }
        }
    }

    /// Run a user function: a fresh scope under the captured closure (not the
    /// caller's scope), parameters defined left to right, then the body.
    #[tracing::instrument(level = "debug", skip_all, fields(name = function.name(), depth = self.call_depth))]
    fn call_function(&mut self, function: &Function, args: Vec<Value>, span: Span) -> EvalResult<Value> {
        if self.call_depth >= self.config.max_call_depth {
            return Err(EvalError::StackOverflow {
                limit: self.config.max_call_depth,
                span,
            });
        }

        let scope = Environment::with_enclosing(function.closure());
        for (param, arg) in function.params().iter().zip(args) {
            scope.define(&param.name, arg);
        }

        self.call_depth += 1;
        let result = self.exec_block(function.body(), scope);
        self.call_depth -= 1;
        result
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Operand checks
// ══════════════════════════════════════════════════════════════════════════

/// `+` concatenates as soon as either side is text, otherwise adds numbers.
fn eval_add(lv: Value, rv: Value, span: Span) -> EvalResult<Value> {
    match (&lv, &rv) {
        (Value::String(_), _) | (_, Value::String(_)) => Ok(Value::String(format!("{lv}{rv}"))),
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        _ => Err(EvalError::type_mismatch(
            format!(
                "Addition operation not supported for operands ({} + {}).",
                lv.type_name(),
                rv.type_name()
            ),
            span,
        )),
    }
}

fn numbers(lv: &Value, rv: &Value, span: Span) -> EvalResult<(f64, f64)> {
    match (lv, rv) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(EvalError::type_mismatch(
            format!(
                "Operands must be numbers, got {} and {}.",
                lv.type_name(),
                rv.type_name()
            ),
            span,
        )),
    }
}

fn compare(lv: &Value, rv: &Value, span: Span, op: fn(f64, f64) -> bool) -> EvalResult<Value> {
    let (a, b) = numbers(lv, rv, span)?;
    Ok(Value::Bool(op(a, b)))
}
