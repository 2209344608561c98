//! The Ontol entity model.
//!
//! An [`Ontology`] is the aggregate root produced by one parse: metadata,
//! insertion-ordered terms, functions, hierarchy relationships and figures.
//! Terms, functions and relationships share a single namespace — a name may
//! denote at most one definition across all three kinds — tracked by one
//! [`IndexMap`] from [`Id`] to a tagged [`Definition`] reference, so the
//! uniqueness check is a single lookup.
//!
//! Entities reference each other by [`Id`], not by pointer: a
//! [`FunctionArgument`] or a [`Relationship`] endpoint names a term that the
//! elaborator has already proven to exist.

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

use crate::{
    attributes::{FunctionAttributes, RelationshipAttributes, TermAttributes},
    identifier::Id,
    relationship::RelationshipType,
};

/// Ontology-level metadata. All fields optional; `date` is defaulted by the
/// parser when the source never set it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Meta {
    pub version: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub date: Option<String>,
}

impl Meta {
    /// Surface key names accepted on a meta line.
    pub const FIELDS: &'static [&'static str] =
        &["version", "title", "author", "description", "type", "date"];
}

/// A named concept in the modeled domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Term {
    pub name: Id,
    pub label: String,
    pub description: String,
    pub attributes: TermAttributes,
}

impl Term {
    pub fn new(name: Id, label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name,
            label: label.into(),
            description: description.into(),
            attributes: TermAttributes::default(),
        }
    }
}

/// A term playing a positional role in a function signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionArgument {
    #[serde(rename = "name")]
    pub term: Id,
    pub label: String,
}

impl FunctionArgument {
    pub fn new(term: Id, label: impl Into<String>) -> Self {
        Self {
            term,
            label: label.into(),
        }
    }
}

/// A named operation over terms: ordered inputs, a single output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Function {
    pub name: Id,
    pub label: String,
    pub input_types: Vec<FunctionArgument>,
    pub output_type: FunctionArgument,
    pub attributes: FunctionAttributes,
}

/// A typed edge between a parent term and its children.
///
/// The current grammar yields exactly one child per statement; the list form
/// is kept for the serialized contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relationship {
    pub name: Option<Id>,
    pub parent: Id,
    pub relationship: RelationshipType,
    pub children: Vec<Id>,
    pub attributes: RelationshipAttributes,
}

/// A named subset view over an ontology's definitions.
///
/// Members are references by name, partitioned by the kind each name
/// resolved to at declaration time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Figure {
    pub name: String,
    pub terms: Vec<Id>,
    pub functions: Vec<Id>,
    pub hierarchy: Vec<Id>,
}

impl Figure {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A reference into one of an ontology's definition lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Definition {
    Term(usize),
    Function(usize),
    Relationship(usize),
}

/// Errors raised by structural mutations of an [`Ontology`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OntologyError {
    #[error("'{name}' has already been declared")]
    DuplicateName { name: String },
}

/// The aggregate root owning every definition produced by one parse.
#[derive(Debug, Clone, Default)]
pub struct Ontology {
    pub meta: Meta,
    terms: Vec<Term>,
    functions: Vec<Function>,
    hierarchy: Vec<Relationship>,
    figures: Vec<Figure>,
    definitions: IndexMap<Id, Definition>,
}

impl Ontology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Terms in declaration order.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Functions in declaration order.
    pub fn functions(&self) -> &[Function] {
        &self.functions
    }

    /// Relationships in declaration order.
    pub fn hierarchy(&self) -> &[Relationship] {
        &self.hierarchy
    }

    /// Figures in declaration order.
    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    /// Look up what kind of definition `name` denotes, if any.
    pub fn definition(&self, name: Id) -> Option<Definition> {
        self.definitions.get(&name).copied()
    }

    /// Whether `name` denotes any definition.
    pub fn contains(&self, name: Id) -> bool {
        self.definitions.contains_key(&name)
    }

    pub fn find_term(&self, name: Id) -> Option<&Term> {
        match self.definitions.get(&name)? {
            Definition::Term(idx) => self.terms.get(*idx),
            _ => None,
        }
    }

    pub fn find_function(&self, name: Id) -> Option<&Function> {
        match self.definitions.get(&name)? {
            Definition::Function(idx) => self.functions.get(*idx),
            _ => None,
        }
    }

    pub fn find_relationship(&self, name: Id) -> Option<&Relationship> {
        match self.definitions.get(&name)? {
            Definition::Relationship(idx) => self.hierarchy.get(*idx),
            _ => None,
        }
    }

    pub fn find_figure(&self, name: &str) -> Option<&Figure> {
        self.figures.iter().find(|f| f.name == name)
    }

    /// Add a term, rejecting a name already taken by any definition kind.
    pub fn add_term(&mut self, term: Term) -> Result<(), OntologyError> {
        self.claim_name(term.name, Definition::Term(self.terms.len()))?;
        self.terms.push(term);
        Ok(())
    }

    /// Add a function, rejecting a name already taken by any definition kind.
    pub fn add_function(&mut self, function: Function) -> Result<(), OntologyError> {
        self.claim_name(function.name, Definition::Function(self.functions.len()))?;
        self.functions.push(function);
        Ok(())
    }

    /// Add a relationship. Unnamed relationships never enter the namespace.
    pub fn add_relationship(&mut self, relationship: Relationship) -> Result<(), OntologyError> {
        if let Some(name) = relationship.name {
            self.claim_name(name, Definition::Relationship(self.hierarchy.len()))?;
        }
        self.hierarchy.push(relationship);
        Ok(())
    }

    /// Add a figure. Figure names live outside the definition namespace.
    pub fn add_figure(&mut self, figure: Figure) {
        self.figures.push(figure);
    }

    fn claim_name(&mut self, name: Id, def: Definition) -> Result<(), OntologyError> {
        if self.definitions.contains_key(&name) {
            return Err(OntologyError::DuplicateName {
                name: name.resolve(),
            });
        }
        self.definitions.insert(name, def);
        Ok(())
    }
}
