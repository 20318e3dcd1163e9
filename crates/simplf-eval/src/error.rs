//! Runtime error types for the Simplf evaluator.

use simplf_types::{Diagnostic, ErrorCode, SourceFile, Span};
use thiserror::Error;

/// Evaluation error. Every variant carries the span of the token that failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// `get` or `assign` on a name no scope in the chain binds.
    #[error("Undefined variable '{name}'.")]
    UndefinedVariable { name: String, span: Span },

    /// Operand kind violation for arithmetic, comparison or unary minus.
    #[error("{message}")]
    TypeMismatch { message: String, span: Span },

    /// The callee of a call expression is not a function.
    #[error("Can only call functions.")]
    NotCallable { span: Span },

    #[error("Cannot divide by zero.")]
    DivisionByZero { span: Span },

    #[error("Expected {expected} arguments but got {found}.")]
    ArityMismatch {
        expected: usize,
        found: usize,
        span: Span,
    },

    /// Nested user-function calls went past the configured depth.
    #[error("Stack overflow: call depth exceeded {limit}.")]
    StackOverflow { limit: usize, span: Span },

    /// A host-provided function reported an error.
    #[error("{name}: {message}")]
    NativeFailure {
        name: String,
        message: String,
        span: Span,
    },

    /// A construct the evaluator refuses to run (`for` statements).
    #[error("{construct} are not interpreted.")]
    InternalUnsupported { construct: &'static str, span: Span },
}

impl EvalError {
    pub(crate) fn type_mismatch(message: impl Into<String>, span: Span) -> Self {
        Self::TypeMismatch {
            message: message.into(),
            span,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::UndefinedVariable { span, .. }
            | Self::TypeMismatch { span, .. }
            | Self::NotCallable { span }
            | Self::DivisionByZero { span }
            | Self::ArityMismatch { span, .. }
            | Self::StackOverflow { span, .. }
            | Self::NativeFailure { span, .. }
            | Self::InternalUnsupported { span, .. } => *span,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UndefinedVariable { .. } => ErrorCode::UNDEFINED_VARIABLE,
            Self::TypeMismatch { .. } => ErrorCode::TYPE_MISMATCH,
            Self::NotCallable { .. } => ErrorCode::NOT_CALLABLE,
            Self::DivisionByZero { .. } => ErrorCode::DIVISION_BY_ZERO,
            Self::ArityMismatch { .. } => ErrorCode::ARITY_MISMATCH,
            Self::StackOverflow { .. } => ErrorCode::STACK_OVERFLOW,
            Self::NativeFailure { .. } => ErrorCode::NATIVE_FAILURE,
            Self::InternalUnsupported { .. } => ErrorCode::UNSUPPORTED,
        }
    }

    /// Build the diagnostic an error reporter receives.
    pub fn to_diagnostic(&self, source: Option<&SourceFile>) -> Diagnostic {
        let diagnostic = Diagnostic::new("<input>", self.code(), self.to_string(), self.span());
        match source {
            Some(source) => diagnostic.with_source(source),
            None => diagnostic,
        }
    }
}

/// Result alias for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;

#[cfg(test)]
mod tests {
    use super::*;
    use simplf_types::ErrorCategory;

    #[test]
    fn test_messages() {
        let span = Span::point(1, 1);
        let undefined = EvalError::UndefinedVariable {
            name: "x".into(),
            span,
        };
        assert_eq!(undefined.to_string(), "Undefined variable 'x'.");

        let arity = EvalError::ArityMismatch {
            expected: 2,
            found: 3,
            span,
        };
        assert_eq!(arity.to_string(), "Expected 2 arguments but got 3.");

        let unsupported = EvalError::InternalUnsupported {
            construct: "For loops",
            span,
        };
        assert_eq!(unsupported.to_string(), "For loops are not interpreted.");
    }

    #[test]
    fn test_diagnostic_carries_code_and_span() {
        let err = EvalError::DivisionByZero {
            span: Span::point(4, 11),
        };
        let diag = err.to_diagnostic(None);
        assert_eq!(diag.code, ErrorCode::DIVISION_BY_ZERO);
        assert_eq!(diag.category, ErrorCategory::Arithmetic);
        assert_eq!(diag.span, Span::point(4, 11));
        assert_eq!(diag.message, "Cannot divide by zero.");
        assert_eq!(diag.file, "<input>");
    }

    #[test]
    fn test_not_callable_is_a_type_error() {
        let err = EvalError::NotCallable {
            span: Span::default(),
        };
        assert_eq!(err.code().category(), ErrorCategory::Type);
    }
}
