//! # Ontol Parser
//!
//! Parser for the Ontol ontology language. This crate provides the pipeline
//! from source text to a validated [`ontol_core::Ontology`]:
//!
//! 1. **Tokenize** - Convert source text to tokens
//! 2. **Parse** - Build the syntactic statement list from tokens
//! 3. **Elaborate** - Resolve references, validate attributes and build the
//!    ontology, resolving `import` statements recursively
//!
//! ## Usage
//!
//! ```
//! # use ontol_parser::parse;
//!
//! let source = "\
//! title: 'Sets'
//!
//! types:
//! set: 'Set', 'A collection of unique elements'
//! element: 'Element', 'A member of a set'
//!
//! hierarchy:
//! element aggregation set
//! ";
//!
//! let (ontology, warnings) = parse(source, "sets.ontol").unwrap();
//! assert_eq!(ontology.terms().len(), 2);
//! assert!(warnings.is_empty());
//! ```

use std::path::Path;

mod elaborate;
pub mod error;
mod lexer;
mod parser;
mod parser_types;
mod span;
mod tokens;

pub mod import;

pub use error::{Diagnostic, ParseError, Severity};
pub use import::{FsLoader, SourceLoader};
pub use span::{Span, Spanned};

use import::{ImportResolver, Origin};
use ontol_core::Ontology;

/// Parse Ontol source text into a validated ontology.
///
/// `path` names the source in diagnostics and anchors relative imports.
/// Imports are resolved with the default [`FsLoader`]; use
/// [`parse_with_loader`] to substitute the I/O.
///
/// # Returns
///
/// On success, the ontology plus the collected warnings (empty labels,
/// descriptions and attribute values), each carrying its positional
/// payload — including warnings raised inside imported files. The first
/// fatal error aborts the parse and is returned as [`ParseError`].
pub fn parse(
    source: &str,
    path: impl AsRef<Path>,
) -> Result<(Ontology, Vec<Diagnostic>), ParseError> {
    parse_with_loader(source, path, &FsLoader::new())
}

/// [`parse`] with a custom [`SourceLoader`] for import resolution.
pub fn parse_with_loader(
    source: &str,
    path: impl AsRef<Path>,
    loader: &dyn SourceLoader,
) -> Result<(Ontology, Vec<Diagnostic>), ParseError> {
    let origin = Origin::for_path(path.as_ref());
    let mut resolver = ImportResolver::new(loader, origin.canonical.clone());
    let mut warnings = Vec::new();

    let ontology = parse_source(source, &origin, &mut resolver, &mut warnings)?;
    Ok((ontology, warnings))
}

/// Run the per-file pipeline: tokenize, parse, elaborate.
///
/// Called once for the top-level source and recursively for every import.
pub(crate) fn parse_source(
    source: &str,
    origin: &Origin,
    resolver: &mut ImportResolver<'_>,
    warnings: &mut Vec<Diagnostic>,
) -> Result<Ontology, ParseError> {
    let tokens =
        lexer::tokenize(source).map_err(|e| e.with_source_context(&origin.path, source))?;

    let statements = parser::parse_statements(&tokens)
        .map_err(|d| ParseError::from(d.with_source_context(&origin.path, source)))?;

    elaborate::elaborate(&statements, source, origin, resolver, warnings)
}
