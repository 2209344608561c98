//! Ontol - a small language for describing ontologies.
//!
//! Parsing, validation and code generation for the Ontol language: named
//! concept terms, typed functions over those terms, and typed relationships
//! forming a hierarchy, grouped into figures and composable via imports.
//!
//! This crate is the consumer side of the pipeline. Parsing lives in
//! [`ontol_parser`]; the resulting [`Ontology`] is consumed here by three
//! independent generators plus the figure extractor:
//!
//! - [`generate_diagram`] - PlantUML diagram text
//! - [`retranslate`] - Ontol surface syntax (round-trip pretty-printer)
//! - [`to_structured`] / [`serializer::to_json`] - the canonical structured
//!   document
//! - [`figure::extract`] - derived per-figure sub-ontologies
//!
//! # Example
//!
//! ```
//! let source = "\
//! title: 'Sets'
//!
//! types:
//! element: 'Element', 'A basic thing'
//! set: 'Set', 'A collection'
//!
//! hierarchy:
//! element aggregation set
//! ";
//!
//! let (ontology, warnings) = ontol::parse(source, "sets.ontol").unwrap();
//! assert!(warnings.is_empty());
//!
//! let diagram = ontol::generate_diagram(&ontology);
//! assert!(diagram.contains("element ---o set"));
//!
//! let round_trip = ontol::retranslate(&ontology);
//! let (reparsed, _) = ontol::parse(&round_trip, "sets.ontol").unwrap();
//! assert_eq!(reparsed.terms().len(), ontology.terms().len());
//! ```

pub mod figure;
pub mod plantuml;
pub mod retranslator;
pub mod serializer;

mod error;

pub use error::OntolError;

pub use ontol_core::{
    Figure, Function, FunctionArgument, Id, Meta, Ontology, Relationship, RelationshipDirection,
    RelationshipType, Term,
};
pub use ontol_parser::{Diagnostic, ParseError, parse, parse_with_loader};

use log::info;

/// Generate the PlantUML document for a validated ontology.
pub fn generate_diagram(ontology: &Ontology) -> String {
    info!("generating plantuml diagram");
    plantuml::generate(ontology)
}

/// Serialize an ontology back into Ontol surface syntax.
pub fn retranslate(ontology: &Ontology) -> String {
    info!("retranslating ontology");
    retranslator::retranslate(ontology)
}

/// Build the canonical structured document for an ontology.
pub fn to_structured(ontology: &Ontology) -> serde_json::Value {
    info!("serializing ontology");
    serializer::to_value(ontology)
}
