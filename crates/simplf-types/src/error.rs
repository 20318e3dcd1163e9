use crate::{SourceFile, Span};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a runtime failure, derived from its code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Scope,
    Type,
    Arithmetic,
    Call,
    Internal,
}

/// Numeric runtime error code (E700–E799).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Scope (E700–E719) ──
    pub const UNDEFINED_VARIABLE: Self = Self(700);

    // ── Type (E720–E739) ──
    pub const TYPE_MISMATCH: Self = Self(720);
    pub const NOT_CALLABLE: Self = Self(721);

    // ── Arithmetic (E740–E759) ──
    pub const DIVISION_BY_ZERO: Self = Self(740);

    // ── Call (E760–E779) ──
    pub const ARITY_MISMATCH: Self = Self(760);
    pub const STACK_OVERFLOW: Self = Self(761);
    pub const NATIVE_FAILURE: Self = Self(762);

    // ── Internal (E780–E799) ──
    pub const UNSUPPORTED: Self = Self(780);

    pub fn category(self) -> ErrorCategory {
        match self.0 {
            700..=719 => ErrorCategory::Scope,
            720..=739 => ErrorCategory::Type,
            740..=759 => ErrorCategory::Arithmetic,
            760..=779 => ErrorCategory::Call,
            _ => ErrorCategory::Internal,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Scope => "scope",
            Self::Type => "type",
            Self::Arithmetic => "arithmetic",
            Self::Call => "call",
            Self::Internal => "internal",
        };
        f.write_str(name)
    }
}

/// A reported runtime failure, ready for display or JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub file: String,
    pub code: ErrorCode,
    pub category: ErrorCategory,
    pub message: String,
    #[serde(flatten)]
    pub span: Span,
    /// The offending source line, empty when no source text is available.
    pub source_line: String,
}

impl Diagnostic {
    pub fn new(
        file: impl Into<String>,
        code: ErrorCode,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            file: file.into(),
            code,
            category: code.category(),
            message: message.into(),
            span,
            source_line: String::new(),
        }
    }

    /// Fill `file` and `source_line` from the program text.
    pub fn with_source(mut self, source: &SourceFile) -> Self {
        self.file = source.name.clone();
        self.source_line = source
            .line(self.span.start_line)
            .unwrap_or_default()
            .to_string();
        self
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}] {}",
            self.span, self.code, self.category, self.message
        )?;
        if !self.source_line.is_empty() {
            write!(f, "\n    {}", self.source_line.trim())?;
        }
        Ok(())
    }
}
