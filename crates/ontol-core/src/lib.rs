//! Ontol Core Types and Definitions
//!
//! This crate provides the foundational types for the Ontol ontology
//! language. It includes:
//!
//! - **Identifiers**: String-interned identifiers ([`identifier::Id`])
//! - **Entity model**: Terms, functions, relationships, figures and the
//!   [`ast::Ontology`] aggregate root ([`ast`] module)
//! - **Attributes**: Typed per-entity attribute records with key validation
//!   ([`attributes`] module)
//! - **Closed tag sets**: Relationship types and directions
//!   ([`relationship`] module)

pub mod ast;
pub mod attributes;
pub mod identifier;
pub mod relationship;

pub use ast::{
    Definition, Figure, Function, FunctionArgument, Meta, Ontology, OntologyError, Relationship,
    Term,
};
pub use attributes::{
    AttributeError, FunctionAttributes, RelationshipAttributes, TermAttributes,
};
pub use identifier::Id;
pub use relationship::{RelationshipDirection, RelationshipType};
