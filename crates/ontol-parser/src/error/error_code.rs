//! Error codes for the Ontol diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Lexical errors
//! - `E1xx` - Syntactic errors
//! - `E2xx` - Semantic errors
//! - `E3xx` - Import errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Lexical errors (E0xx)
    // =========================================================================
    /// Unterminated string literal.
    ///
    /// A string was opened with a quote but never closed before the end of
    /// the line.
    E001,

    /// Unexpected character.
    ///
    /// A character was encountered that is not valid in Ontol source.
    E002,

    // =========================================================================
    // Syntactic errors (E1xx)
    // =========================================================================
    /// Unexpected token.
    ///
    /// The parser encountered a token it did not expect at this position.
    E100,

    /// Incomplete input.
    ///
    /// The input ended before a complete statement was parsed.
    E101,

    // =========================================================================
    // Semantic errors (E2xx)
    // =========================================================================
    /// Unknown meta tag.
    ///
    /// A meta line used a name outside the fixed meta field set.
    E200,

    /// Duplicate definition.
    ///
    /// The name is already taken by a term, function or relationship.
    E201,

    /// Undefined reference.
    ///
    /// A term (or figure member) was referenced before being declared.
    E202,

    /// Unknown attribute.
    ///
    /// An attribute key outside the entity's allowed set was used.
    E203,

    /// Invalid tag value.
    ///
    /// A relationship type or direction outside the closed tag set.
    E204,

    /// Bidirectional inheritance.
    ///
    /// Inheritance edges may be forward or backward, never bidirectional.
    E205,

    // =========================================================================
    // Import errors (E3xx)
    // =========================================================================
    /// Import target unavailable.
    ///
    /// The imported file or URL could not be read or fetched.
    E300,

    /// Imported name not found.
    ///
    /// A selective import listed a name the imported ontology does not
    /// define.
    E301,

    /// Import collision.
    ///
    /// A merged definition's name is already taken in the importing
    /// ontology.
    E302,

    /// Circular import.
    ///
    /// The import target is already being resolved further up the stack.
    E303,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
            ErrorCode::E205 => "E205",
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
            ErrorCode::E302 => "E302",
            ErrorCode::E303 => "E303",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "unterminated string literal",
            ErrorCode::E002 => "unexpected character",
            ErrorCode::E100 => "unexpected token",
            ErrorCode::E101 => "incomplete input",
            ErrorCode::E200 => "unknown meta tag",
            ErrorCode::E201 => "duplicate definition",
            ErrorCode::E202 => "undefined reference",
            ErrorCode::E203 => "unknown attribute",
            ErrorCode::E204 => "invalid tag value",
            ErrorCode::E205 => "bidirectional inheritance",
            ErrorCode::E300 => "import target unavailable",
            ErrorCode::E301 => "imported name not found",
            ErrorCode::E302 => "import collision",
            ErrorCode::E303 => "circular import",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E201.to_string(), "E201");
        assert_eq!(ErrorCode::E303.to_string(), "E303");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E001.description(), "unterminated string literal");
        assert_eq!(ErrorCode::E202.description(), "undefined reference");
        assert_eq!(ErrorCode::E303.description(), "circular import");
    }
}
