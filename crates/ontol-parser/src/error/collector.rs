//! Collector for accumulating diagnostics during a processing phase.
//!
//! The lexer recovers from errors and keeps scanning, so a single pass can
//! report every bad character instead of stopping at the first. The
//! [`DiagnosticCollector`] accumulates those diagnostics and converts to a
//! [`ParseError`] once the phase finishes.

use crate::error::{Diagnostic, ParseError};

/// A collector for accumulating diagnostics during a processing phase.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Finish collection and return a result.
    ///
    /// - If any error was emitted, returns `Err(ParseError)` with all
    ///   diagnostics.
    /// - Otherwise returns `Ok(warnings)` with whatever warnings were
    ///   emitted.
    pub fn finish(self) -> Result<Vec<Diagnostic>, ParseError> {
        if self.has_errors {
            Err(ParseError::new(self.diagnostics))
        } else {
            Ok(self.diagnostics)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorCode, span::Span};

    #[test]
    fn test_collector_empty_finish_ok() {
        let collector = DiagnosticCollector::new();
        assert!(collector.finish().unwrap().is_empty());
    }

    #[test]
    fn test_collector_error_finish_err() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::error("bad character"));

        assert!(collector.finish().is_err());
    }

    #[test]
    fn test_collector_warnings_survive() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::warning("label is empty"));
        collector.emit(Diagnostic::warning("description is empty"));

        let warnings = collector.finish().unwrap();
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_collector_mixed_finish_err() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::warning("label is empty"));
        collector.emit(
            Diagnostic::error("unexpected character")
                .with_code(ErrorCode::E002)
                .with_label(Span::new(10..11), "here"),
        );

        let err = collector.finish().unwrap_err();
        assert_eq!(err.diagnostics().len(), 2);
    }
}
