//! Syntactic AST produced by the parser.
//!
//! These types mirror the source statement-for-statement and carry spans on
//! every field a later phase might report on. Name resolution, duplicate
//! detection and attribute validation happen in
//! [`elaborate`](crate::elaborate), which walks the statements in order and
//! builds the semantic [`ontol_core::Ontology`].

use crate::span::{Span, Spanned};

/// One parsed `key: 'value'` attribute pair, not yet validated.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute<'src> {
    pub key: Spanned<&'src str>,
    pub value: Spanned<String>,
}

/// A meta line: `identifier: 'string'`.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaLine<'src> {
    pub key: Spanned<&'src str>,
    pub value: Spanned<String>,
}

/// One entry of a `types:` block.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeEntry<'src> {
    pub name: Spanned<&'src str>,
    pub label: Spanned<String>,
    pub description: Spanned<String>,
    pub attributes: Vec<Attribute<'src>>,
}

/// A `term: 'label'` pair inside a function signature.
#[derive(Debug, Clone, PartialEq)]
pub struct Param<'src> {
    pub term: Spanned<&'src str>,
    pub label: Spanned<String>,
}

/// One entry of a `functions:` block.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionEntry<'src> {
    pub name: Spanned<&'src str>,
    pub label: Spanned<String>,
    pub params: Vec<Param<'src>>,
    pub output: Param<'src>,
    pub attributes: Vec<Attribute<'src>>,
}

/// One entry of a `hierarchy:` block: `[name:] parent relType child`.
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyEntry<'src> {
    pub name: Option<Spanned<&'src str>>,
    pub parent: Spanned<&'src str>,
    pub relation: Spanned<&'src str>,
    pub child: Spanned<&'src str>,
    pub attributes: Vec<Attribute<'src>>,
}

/// A `figure 'name': member ...` block.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureEntry<'src> {
    pub name: Spanned<String>,
    pub members: Vec<Spanned<&'src str>>,
}

/// What an import statement selects from its source.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportSelection<'src> {
    /// `import * from ...` — every definition. The span is the `*` token.
    Wildcard(Span),
    /// `import {a, b as c} from ...` — the listed definitions.
    Named(Vec<ImportItem<'src>>),
}

/// One selected name, optionally renamed in the importing namespace.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportItem<'src> {
    pub name: Spanned<&'src str>,
    pub alias: Option<Spanned<&'src str>>,
}

/// An `import ... from 'source'` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportEntry<'src> {
    pub selection: ImportSelection<'src>,
    pub source: Spanned<String>,
}

/// A top-level statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement<'src> {
    Meta(MetaLine<'src>),
    Import(ImportEntry<'src>),
    Types(Vec<TypeEntry<'src>>),
    Functions(Vec<FunctionEntry<'src>>),
    Hierarchy(Vec<HierarchyEntry<'src>>),
    Figure(FigureEntry<'src>),
}
