//! Where program output and uncaught runtime errors go.
//!
//! `print` statements write whole lines to a [`PrintSink`]. The interpret
//! loop hands the first uncaught error to an [`ErrorReporter`].

use crate::error::EvalError;
use simplf_types::{Diagnostic, SourceFile};

/// Line-oriented output for `print`.
pub trait PrintSink {
    fn println(&mut self, line: &str);
}

/// Writes each line to stdout.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl PrintSink for StdoutSink {
    fn println(&mut self, line: &str) {
        println!("{line}");
    }
}

/// Keeps printed lines in memory.
#[derive(Debug, Default)]
pub struct BufferSink {
    lines: Vec<String>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All output, one `\n`-terminated line per `print`.
    pub fn output(&self) -> String {
        self.lines.iter().map(|l| format!("{l}\n")).collect()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl PrintSink for BufferSink {
    fn println(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

/// Receives the error that stopped a program run.
pub trait ErrorReporter {
    fn report(&mut self, error: &EvalError, source: Option<&SourceFile>);
}

/// Renders diagnostics to stderr.
#[derive(Debug, Default)]
pub struct StderrReporter;

impl ErrorReporter for StderrReporter {
    fn report(&mut self, error: &EvalError, source: Option<&SourceFile>) {
        eprintln!("{}", error.to_diagnostic(source));
    }
}

/// Stores diagnostics for hosts that render them later (or tests).
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    pub diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

impl ErrorReporter for DiagnosticCollector {
    fn report(&mut self, error: &EvalError, source: Option<&SourceFile>) {
        self.diagnostics.push(error.to_diagnostic(source));
    }
}
