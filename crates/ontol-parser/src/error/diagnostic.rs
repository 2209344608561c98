//! The core diagnostic type for the Ontol error system.

use std::fmt;

use crate::{
    error::{Severity, error_code::ErrorCode, label::Label},
    span::Span,
};

/// Resolved position of a diagnostic inside a particular source file.
///
/// Imports make the pipeline multi-file: a warning raised three imports deep
/// must still point at its own file and line. The pipeline therefore attaches
/// the positional payload when the diagnostic is emitted, while the source
/// that produced it is at hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    /// Path of the file the diagnostic was raised in.
    pub path: String,
    /// 1-based line number.
    pub line: usize,
    /// 0-based character column of the caret.
    pub column: usize,
    /// Full text of the offending line.
    pub line_text: String,
}

/// A diagnostic message with source location information.
///
/// Rendered, a diagnostic produces the positional block shared by warnings
/// and errors:
///
/// ```text
/// File "ontology.ontol", line 4
///     set: 'Set', 'A collection'
///     ^
/// error[E201]: 'set' has already been declared
/// ```
///
/// The library never embeds terminal escape codes; colorization is the
/// consumer's decision.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
    context: Option<SourceContext>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get all labels attached to this diagnostic.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Get the resolved source position, if one was attached.
    pub fn source_context(&self) -> Option<&SourceContext> {
        self.context.as_ref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Resolve the primary label's span against `source` and attach the
    /// resulting file/line/column payload.
    pub fn with_source_context(mut self, path: &str, source: &str) -> Self {
        let context = match self.primary_span() {
            Some(span) => {
                let (line, column, line_text) = locate(source, span.start());
                SourceContext {
                    path: path.to_owned(),
                    line,
                    column,
                    line_text: line_text.to_owned(),
                }
            }
            None => SourceContext {
                path: path.to_owned(),
                line: 1,
                column: 0,
                line_text: source.lines().next().unwrap_or("").to_owned(),
            },
        };
        self.context = Some(context);
        self
    }

    /// The span of the primary label, if one was attached.
    pub fn primary_span(&self) -> Option<Span> {
        self.labels
            .iter()
            .find(|l| l.is_primary())
            .map(|l| l.span())
    }

    /// Render this diagnostic as a plain positional block: file and line
    /// header, the offending source line, a caret under the error column,
    /// and the severity-prefixed message.
    ///
    /// Without an attached [`SourceContext`] only the message line is
    /// produced.
    pub fn render(&self) -> String {
        const PADDING: &str = "    ";

        let mut out = String::new();

        if let Some(ctx) = &self.context {
            out.push_str(&format!("File \"{}\", line {}\n", ctx.path, ctx.line));
            out.push_str(&format!("{PADDING}{}\n", ctx.line_text));
            out.push_str(&format!("{PADDING}{}^\n", " ".repeat(ctx.column)));
        }

        out.push_str(&self.to_string());
        if let Some(help) = &self.help {
            out.push_str(&format!("\nhelp: {help}"));
        }
        out
    }

    /// Create a new diagnostic with the given severity and message.
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
            context: None,
        }
    }
}

/// Resolve a byte offset to a 1-based line number, 0-based column and the
/// text of the containing line.
fn locate(source: &str, offset: usize) -> (usize, usize, &str) {
    let mut line_start = 0;
    for (idx, line) in source.split('\n').enumerate() {
        let line_end = line_start + line.len();
        if offset <= line_end {
            let column = source[line_start..offset.min(line_end)].chars().count();
            return (idx + 1, column, line);
        }
        line_start = line_end + 1;
    }
    // Offset past the end of the source: point at the last line.
    let last = source.split('\n').next_back().unwrap_or("");
    (source.split('\n').count(), last.chars().count(), last)
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[E201]: message" or "error: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}
