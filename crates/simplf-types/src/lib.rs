//! Shared types for the Simplf runtime.
//!
//! This crate defines the AST the evaluator consumes (the contract with the
//! external parser), source spans, and the runtime error codes and
//! diagnostics handed to error reporters.

mod error;
mod span;
pub mod ast;

pub use error::{Diagnostic, ErrorCategory, ErrorCode};
pub use span::{SourceFile, Span};
