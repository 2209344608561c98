//! Import resolution and definition merging.
//!
//! An `import` statement pulls definitions out of another Ontol source —
//! a file resolved relative to the importing file's directory, or an
//! `http(s)://` URL fetched over the network — by recursively running the
//! whole pipeline on it and merging the selected definitions into the
//! importing ontology.
//!
//! The [`SourceLoader`] trait is the I/O seam: the default [`FsLoader`]
//! touches disk and network, while tests substitute an in-memory map.
//!
//! Sources currently being resolved are tracked on an in-flight stack;
//! importing one of them again is a fatal circular-import error rather than
//! unbounded recursion.

use std::path::{Path, PathBuf};

use thiserror::Error;

use ontol_core::{Definition, Id, Ontology};

use crate::{
    error::{Diagnostic, ErrorCode, ParseError},
    parser_types::{ImportEntry, ImportSelection},
    span::Span,
};

/// Identity and location of one source in the import graph.
#[derive(Debug, Clone)]
pub(crate) struct Origin {
    /// Display path used in diagnostics.
    pub path: String,
    /// Directory that relative imports resolve against.
    pub base_dir: Option<PathBuf>,
    /// Canonical identity used for circular-import detection.
    pub canonical: String,
}

impl Origin {
    pub(crate) fn for_path(path: &Path) -> Self {
        let base_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf);
        let canonical = std::fs::canonicalize(path)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| path.display().to_string());
        Self {
            path: path.display().to_string(),
            base_dir,
            canonical,
        }
    }
}

/// A successfully loaded import target.
pub struct LoadedSource {
    pub text: String,
    pub(crate) origin: Origin,
}

impl LoadedSource {
    /// A source identified only by a name, with no directory to resolve
    /// nested relative imports against. Used by loaders that do not touch
    /// the filesystem.
    pub fn in_memory(name: &str, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: Origin {
                path: name.to_owned(),
                base_dir: None,
                canonical: name.to_owned(),
            },
        }
    }
}

/// Failure to read or fetch an import target.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned status {0}")]
    HttpStatus(reqwest::StatusCode),
}

/// The I/O seam for import resolution.
pub trait SourceLoader {
    /// Load `src` — a path relative to `base_dir`, or a URL.
    fn load(&self, src: &str, base_dir: Option<&Path>) -> Result<LoadedSource, LoadError>;
}

/// Loads imports from the filesystem and, for `http(s)://` sources, over
/// the network with a blocking fetch.
#[derive(Debug, Default)]
pub struct FsLoader;

impl FsLoader {
    pub fn new() -> Self {
        Self
    }
}

impl SourceLoader for FsLoader {
    fn load(&self, src: &str, base_dir: Option<&Path>) -> Result<LoadedSource, LoadError> {
        if src.starts_with("http://") || src.starts_with("https://") {
            log::debug!(url = src; "fetching import");
            let response = reqwest::blocking::get(src)?;
            if !response.status().is_success() {
                return Err(LoadError::HttpStatus(response.status()));
            }
            let text = response.text()?;
            return Ok(LoadedSource {
                text,
                origin: Origin {
                    path: src.to_owned(),
                    base_dir: None,
                    canonical: src.to_owned(),
                },
            });
        }

        let path = match base_dir {
            Some(dir) => dir.join(src),
            None => PathBuf::from(src),
        };
        log::debug!(path = src; "reading import");
        let text = std::fs::read_to_string(&path)?;
        Ok(LoadedSource {
            text,
            origin: Origin::for_path(&path),
        })
    }
}

/// Resolves import statements against a loader, tracking the in-flight
/// resolution stack.
pub(crate) struct ImportResolver<'a> {
    loader: &'a dyn SourceLoader,
    in_flight: Vec<String>,
}

impl<'a> ImportResolver<'a> {
    pub(crate) fn new(loader: &'a dyn SourceLoader, top: String) -> Self {
        Self {
            loader,
            in_flight: vec![top],
        }
    }

    /// Resolve one import statement and merge its selection into
    /// `ontology`. Warnings from the imported parse are appended to
    /// `warnings`.
    pub(crate) fn resolve(
        &mut self,
        entry: &ImportEntry<'_>,
        ontology: &mut Ontology,
        origin: &Origin,
        source: &str,
        warnings: &mut Vec<Diagnostic>,
    ) -> Result<(), ParseError> {
        let src = entry.source.inner();
        let span = entry.source.span();

        let fatal = |code: ErrorCode, at: Span, message: String| -> ParseError {
            Diagnostic::error(message)
                .with_code(code)
                .with_label(at, code.description())
                .with_source_context(&origin.path, source)
                .into()
        };

        let loaded = self
            .loader
            .load(src, origin.base_dir.as_deref())
            .map_err(|e| fatal(ErrorCode::E300, span, format!("cannot import '{src}': {e}")))?;

        if self.in_flight.contains(&loaded.origin.canonical) {
            return Err(fatal(
                ErrorCode::E303,
                span,
                format!("circular import of '{src}'"),
            ));
        }

        self.in_flight.push(loaded.origin.canonical.clone());
        let result = crate::parse_source(&loaded.text, &loaded.origin, self, warnings);
        self.in_flight.pop();
        let imported = result?;

        log::debug!(src = src; "merging import");
        match &entry.selection {
            ImportSelection::Wildcard(star_span) => {
                self.merge_all(&imported, ontology)
                    .map_err(|name| {
                        fatal(
                            ErrorCode::E302,
                            *star_span,
                            format!("imported '{name}' collides with an existing definition"),
                        )
                    })?;
            }
            ImportSelection::Named(items) => {
                // Terms pulled in transitively during this statement; an
                // explicit mention of one of them is not a collision.
                let mut pulled: Vec<Id> = Vec::new();

                for item in items {
                    let name = Id::new(item.name.inner());
                    let dest_name = match &item.alias {
                        Some(alias) => Id::new(alias.inner()),
                        None => name,
                    };
                    let item_span = item.name.span();

                    let collision = |name: Id| {
                        fatal(
                            ErrorCode::E302,
                            item_span,
                            format!("imported '{name}' collides with an existing definition"),
                        )
                    };

                    match imported.definition(name) {
                        None => {
                            return Err(fatal(
                                ErrorCode::E301,
                                item_span,
                                format!("'{name}' is not defined in '{src}'"),
                            ));
                        }
                        Some(Definition::Term(_)) => {
                            if item.alias.is_none() && pulled.contains(&name) {
                                continue;
                            }
                            let mut term = imported
                                .find_term(name)
                                .expect("definition index points at a term")
                                .clone();
                            term.name = dest_name;
                            ontology.add_term(term).map_err(|_| collision(dest_name))?;
                        }
                        Some(Definition::Function(_)) => {
                            let mut function = imported
                                .find_function(name)
                                .expect("definition index points at a function")
                                .clone();
                            for argument in function
                                .input_types
                                .iter()
                                .chain(std::iter::once(&function.output_type))
                            {
                                pull_term(argument.term, &imported, ontology, &mut pulled);
                            }
                            function.name = dest_name;
                            ontology
                                .add_function(function)
                                .map_err(|_| collision(dest_name))?;
                        }
                        Some(Definition::Relationship(_)) => {
                            let mut relationship = imported
                                .find_relationship(name)
                                .expect("definition index points at a relationship")
                                .clone();
                            pull_term(relationship.parent, &imported, ontology, &mut pulled);
                            for &child in &relationship.children {
                                pull_term(child, &imported, ontology, &mut pulled);
                            }
                            relationship.name = Some(dest_name);
                            ontology
                                .add_relationship(relationship)
                                .map_err(|_| collision(dest_name))?;
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Merge every definition of `imported` name-for-name, returning the
    /// colliding name on failure.
    fn merge_all(&self, imported: &Ontology, ontology: &mut Ontology) -> Result<(), Id> {
        for term in imported.terms() {
            ontology.add_term(term.clone()).map_err(|_| term.name)?;
        }
        for function in imported.functions() {
            ontology
                .add_function(function.clone())
                .map_err(|_| function.name)?;
        }
        for relationship in imported.hierarchy() {
            let name = relationship.name;
            ontology
                .add_relationship(relationship.clone())
                .map_err(|_| name.expect("only named relationships can collide"))?;
        }
        Ok(())
    }
}

/// Copy a referenced term into the destination if its name is not yet
/// present there.
fn pull_term(term: Id, imported: &Ontology, ontology: &mut Ontology, pulled: &mut Vec<Id>) {
    if ontology.contains(term) {
        return;
    }
    let copy = imported
        .find_term(term)
        .expect("imported ontology is self-consistent")
        .clone();
    ontology
        .add_term(copy)
        .expect("contains() checked the name is free");
    pulled.push(term);
}
