//! Diagnostic collection for editor consumption
//!
//! The tree builder never fails on structurally invalid input. Every problem it
//! resolves (a skipped line, an odd indentation, a re-parented node) is recorded as a
//! [Diagnostic] instead, and editors render them as squiggles. The [Display] form,
//! `Line N: <message>`, is the string consumers expect.

use serde::Serialize;
use std::fmt;

/// Diagnostic severity levels matching LSP protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Information,
    Hint,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Error => write!(f, "error"),
            DiagnosticSeverity::Warning => write!(f, "warning"),
            DiagnosticSeverity::Information => write!(f, "info"),
            DiagnosticSeverity::Hint => write!(f, "hint"),
        }
    }
}

/// Codes attached by the tree builder
pub mod codes {
    pub const SYNTAX_ERROR: &str = "syntax-error";
    pub const INDENTATION: &str = "indentation";
    pub const AUTO_CORRECTED_PARENT: &str = "auto-corrected-parent";
    pub const MADE_TOP_LEVEL: &str = "made-top-level";
    pub const DUPLICATE_PATH: &str = "duplicate-path";
}

/// A single advisory message tied to a 1-based source line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub line: usize,
    pub severity: DiagnosticSeverity,
    pub message: String,
    pub code: Option<String>,
    pub source: String,
}

impl Diagnostic {
    pub fn new(line: usize, severity: DiagnosticSeverity, message: impl Into<String>) -> Self {
        Self {
            line,
            severity,
            message: message.into(),
            code: None,
            source: "codoc".to_string(),
        }
    }

    pub fn error(line: usize, message: impl Into<String>) -> Self {
        Self::new(line, DiagnosticSeverity::Error, message)
    }

    pub fn warning(line: usize, message: impl Into<String>) -> Self {
        Self::new(line, DiagnosticSeverity::Warning, message)
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.code.as_deref() == Some(code)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: {}", self.line, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_form() {
        let diag = Diagnostic::warning(3, "Indentation of 3 spaces is not a multiple of 2");
        assert_eq!(
            diag.to_string(),
            "Line 3: Indentation of 3 spaces is not a multiple of 2"
        );
    }

    #[test]
    fn test_builders() {
        let diag = Diagnostic::error(1, "boom")
            .with_code(codes::SYNTAX_ERROR)
            .with_source("editor");
        assert!(diag.is_error());
        assert!(diag.has_code("syntax-error"));
        assert!(!diag.has_code("indentation"));
        assert_eq!(diag.source, "editor");
    }
}
