//! Error and diagnostic system for the Ontol parser.
//!
//! The system is built around the [`Diagnostic`] type: a severity, an
//! optional error code, a message, labeled source spans and optional help
//! text. Fatal diagnostics abort the parse and are wrapped in
//! [`ParseError`]; warnings are collected and handed back to the caller
//! alongside the parsed ontology.
//!
//! Message construction is separate from presentation: the library never
//! embeds terminal escape codes. [`Diagnostic::render`] produces the plain
//! `File "...", line N` / source line / caret block; a command-line consumer
//! is free to colorize it.
//!
//! # Example
//!
//! ```
//! # use ontol_parser::error::{Diagnostic, ErrorCode};
//! # use ontol_parser::Span;
//!
//! let span = Span::new(100..120);
//!
//! let diag = Diagnostic::error("'set' has already been declared")
//!     .with_code(ErrorCode::E201)
//!     .with_label(span, "duplicate definition")
//!     .with_help("remove the duplicate or use a different name");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::{Diagnostic, SourceContext};
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
