//! Program-level driver around the [`Evaluator`].
//!
//! Owns the global scope and the current top-level environment, runs
//! top-level statements in order, and stops at the first uncaught runtime
//! error, handing it to the caller's [`ErrorReporter`].

use crate::callable::{Callable, NativeFunction};
use crate::config::InterpreterConfig;
use crate::env::Environment;
use crate::error::EvalResult;
use crate::evaluator::Evaluator;
use crate::output::{ErrorReporter, PrintSink, StdoutSink};
use crate::value::Value;
use simplf_types::ast::{Expr, Stmt};
use simplf_types::SourceFile;
use std::rc::Rc;

pub struct Interpreter<O: PrintSink = StdoutSink> {
    evaluator: Evaluator<O>,
    globals: Rc<Environment>,
    /// Current top-level scope; advances as top-level declarations run.
    environment: Rc<Environment>,
    /// Program text, used to quote source lines in diagnostics.
    source: Option<SourceFile>,
}

impl Interpreter<StdoutSink> {
    /// An interpreter printing to stdout with the default configuration.
    pub fn new() -> Self {
        Self::with_output(StdoutSink)
    }
}

impl Default for Interpreter<StdoutSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: PrintSink> Interpreter<O> {
    pub fn with_output(output: O) -> Self {
        Self::with_config(output, InterpreterConfig::default())
    }

    pub fn with_config(output: O, config: InterpreterConfig) -> Self {
        let globals = Environment::global();
        Self {
            evaluator: Evaluator::new(output, config),
            environment: Rc::clone(&globals),
            globals,
            source: None,
        }
    }

    /// Attach the program text so reported diagnostics quote the failing line.
    pub fn with_source(mut self, source: SourceFile) -> Self {
        self.source = Some(source);
        self
    }

    pub fn globals(&self) -> &Rc<Environment> {
        &self.globals
    }

    pub fn environment(&self) -> &Rc<Environment> {
        &self.environment
    }

    pub fn output(&self) -> &O {
        self.evaluator.output()
    }

    pub fn output_mut(&mut self) -> &mut O {
        self.evaluator.output_mut()
    }

    /// Register a host function in the global scope.
    pub fn define_native(
        &mut self,
        name: &str,
        arity: usize,
        func: impl Fn(&[Value]) -> Result<Value, String> + 'static,
    ) {
        let native = NativeFunction::new(name, arity, func);
        self.globals
            .define(name, Value::Callable(Callable::Native(Rc::new(native))));
    }

    /// Execute `stmts` in order, returning the last statement's value or the
    /// first error. Nothing is reported.
    pub fn run(&mut self, stmts: &[Stmt]) -> EvalResult<Value> {
        tracing::debug!(statements = stmts.len(), "run");
        let mut last = Value::Nil;
        for stmt in stmts {
            last = self.evaluator.exec_stmt(stmt, &mut self.environment)?;
        }
        Ok(last)
    }

    /// Execute `stmts`, reporting the first uncaught error and skipping the
    /// remaining statements. Returns `true` when every statement ran.
    pub fn interpret(&mut self, stmts: &[Stmt], reporter: &mut impl ErrorReporter) -> bool {
        match self.run(stmts) {
            Ok(_) => true,
            Err(error) => {
                tracing::warn!(code = %error.code(), span = %error.span(), "runtime error: {error}");
                reporter.report(&error, self.source.as_ref());
                false
            }
        }
    }

    /// Evaluate a single expression against the current top-level scope.
    pub fn evaluate_expression(&mut self, expr: &Expr) -> EvalResult<Value> {
        self.evaluator.eval_expr(expr, &self.environment)
    }
}
