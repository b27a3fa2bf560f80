//! Diagnostics reported by the markup parser and the hierarchy analysis.
//!
//! Unresolved references never surface here; best-effort reconstruction
//! means they simply contribute nothing. What does surface is terminal
//! analysis damage (the recursion depth guard) and tolerated markup syntax
//! damage, both of which callers may want to show without failing the
//! request.

use std::fmt;

use crate::base::{FileId, TextRange};

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Convert to the LSP severity number.
    pub fn to_lsp(self) -> u32 {
        match self {
            Severity::Error => 1,
            Severity::Warning => 2,
            Severity::Info => 3,
        }
    }
}

/// A diagnostic message anchored to a source range.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub file: FileId,
    pub range: TextRange,
    pub severity: Severity,
    /// Stable code from [`codes`], when the condition has one.
    pub code: Option<&'static str>,
    pub message: String,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(file: FileId, range: TextRange, message: impl Into<String>) -> Self {
        Self {
            file,
            range,
            severity: Severity::Error,
            code: None,
            message: message.into(),
        }
    }

    /// Create a warning diagnostic.
    pub fn warning(file: FileId, range: TextRange, message: impl Into<String>) -> Self {
        Self {
            file,
            range,
            severity: Severity::Warning,
            code: None,
            message: message.into(),
        }
    }

    /// Set the diagnostic code.
    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{:?}..{:?}: {}",
            self.file,
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )
    }
}

/// Stable diagnostic codes.
pub mod codes {
    /// Component tree nesting exceeded the recursion depth guard.
    pub const DEPTH_LIMIT: &str = "E0001";

    /// An element was still open at the end of the markup document.
    pub const UNCLOSED_ELEMENT: &str = "W0001";
    /// A closing tag had no matching open element.
    pub const UNMATCHED_CLOSE: &str = "W0002";
    /// A start tag was interrupted by another tag.
    pub const UNTERMINATED_TAG: &str = "W0003";
}

/// Collects diagnostics during one analysis or parse.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Get all diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of error diagnostics.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    /// Take all diagnostics, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sp(start: u32, end: u32) -> TextRange {
        TextRange::new(start.into(), end.into())
    }

    #[test]
    fn test_diagnostic_with_code() {
        let diag = Diagnostic::error(FileId::new(0), sp(3, 9), "too deep")
            .with_code(codes::DEPTH_LIMIT);
        assert_eq!(diag.code, Some("E0001"));
        assert_eq!(diag.severity.to_lsp(), 1);
    }

    #[test]
    fn test_collector_counts() {
        let mut collector = DiagnosticCollector::new();
        collector.add(Diagnostic::error(FileId::new(0), sp(0, 1), "a"));
        collector.add(Diagnostic::warning(FileId::new(0), sp(1, 2), "b"));

        assert_eq!(collector.error_count(), 1);
        assert!(collector.has_errors());
        assert_eq!(collector.take().len(), 2);
        assert!(!collector.has_errors());
    }
}
