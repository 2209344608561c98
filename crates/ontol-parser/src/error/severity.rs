//! Severity levels for diagnostics.

use std::fmt;

/// The severity level of a diagnostic.
///
/// Ontol has exactly two severities:
/// - [`Severity::Error`] aborts the parse that raised it
/// - [`Severity::Warning`] is collected and reported without blocking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A fatal error. The current parse stops at the first one.
    Error,

    /// A non-fatal advisory, such as an empty label or description.
    Warning,
}

impl Severity {
    /// Returns `true` if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns `true` if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}
