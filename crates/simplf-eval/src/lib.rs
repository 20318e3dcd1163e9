//! Simplf tree-walking evaluator.
//!
//! Executes an already-parsed Simplf program: lexical environments with
//! shadowing and shared mutation, closures, and the expression/statement
//! semantics of the language. Lexing and parsing happen elsewhere; this crate
//! starts from the tree in [`simplf_types::ast`].

pub mod callable;
pub mod config;
pub mod env;
pub mod error;
pub mod evaluator;
pub mod interpreter;
pub mod output;
pub mod value;

pub use callable::{Callable, Function, NativeFunction};
pub use config::InterpreterConfig;
pub use env::Environment;
pub use error::{EvalError, EvalResult};
pub use evaluator::Evaluator;
pub use interpreter::Interpreter;
pub use output::{BufferSink, DiagnosticCollector, ErrorReporter, PrintSink, StderrReporter, StdoutSink};
pub use value::Value;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber for evaluator logs.
///
/// Does nothing unless `RUST_LOG` is set, e.g. `RUST_LOG=simplf_eval=debug`
/// for calls or `=trace` for every define and assign. Safe to call repeatedly.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
