//! Figure extraction: derived sub-ontologies.
//!
//! A figure is a name-based selection over an ontology's definitions.
//! Extraction materializes it as an independent [`Ontology`] holding only
//! the referenced terms, functions and relationships, so callers can emit
//! one set of output artifacts per figure alongside the whole-ontology
//! output.

use ontol_core::{Figure, Ontology};

use crate::OntolError;

/// Materialize `figure` as a derived ontology.
///
/// The metadata is cloned with the title suffixed by the figure's name.
/// Membership is exactly the figure's declared reference lists, in order.
pub fn extract(ontology: &Ontology, figure: &Figure) -> Result<Ontology, OntolError> {
    let mut derived = Ontology::new();

    derived.meta = ontology.meta.clone();
    derived.meta.title = Some(match &ontology.meta.title {
        Some(title) => format!("{title} - {}", figure.name),
        None => figure.name.clone(),
    });

    for &name in &figure.terms {
        if derived.contains(name) {
            continue;
        }
        let term = ontology
            .find_term(name)
            .ok_or_else(|| OntolError::UnknownFigureMember(name.resolve()))?;
        derived
            .add_term(term.clone())
            .expect("contains() checked the name is free");
    }

    for &name in &figure.functions {
        if derived.contains(name) {
            continue;
        }
        let function = ontology
            .find_function(name)
            .ok_or_else(|| OntolError::UnknownFigureMember(name.resolve()))?;
        derived
            .add_function(function.clone())
            .expect("contains() checked the name is free");
    }

    for &name in &figure.hierarchy {
        if derived.contains(name) {
            continue;
        }
        let relationship = ontology
            .find_relationship(name)
            .ok_or_else(|| OntolError::UnknownFigureMember(name.resolve()))?;
        derived
            .add_relationship(relationship.clone())
            .expect("contains() checked the name is free");
    }

    log::debug!(figure = figure.name.as_str(); "extracted figure ontology");
    Ok(derived)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontol_core::{Id, Relationship, RelationshipAttributes, RelationshipType, Term};

    fn sample() -> Ontology {
        let mut ontology = Ontology::new();
        ontology.meta.title = Some("Sets".to_owned());
        for name in ["element", "set", "pair"] {
            ontology
                .add_term(Term::new(Id::new(name), name.to_uppercase(), ""))
                .unwrap();
        }
        ontology
            .add_relationship(Relationship {
                name: Some(Id::new("member")),
                parent: Id::new("element"),
                relationship: RelationshipType::Aggregation,
                children: vec![Id::new("set")],
                attributes: RelationshipAttributes::default(),
            })
            .unwrap();
        ontology
    }

    #[test]
    fn test_extract_is_exact_membership() {
        let ontology = sample();
        let figure = Figure {
            name: "overview".to_owned(),
            terms: vec![Id::new("element"), Id::new("set")],
            functions: vec![],
            hierarchy: vec![Id::new("member")],
        };

        let derived = extract(&ontology, &figure).unwrap();
        assert_eq!(derived.terms().len(), 2);
        assert!(derived.find_term(Id::new("pair")).is_none());
        assert_eq!(derived.hierarchy().len(), 1);
        assert_eq!(derived.meta.title.as_deref(), Some("Sets - overview"));
    }

    #[test]
    fn test_extract_untitled_uses_figure_name() {
        let mut ontology = sample();
        ontology.meta.title = None;
        let figure = Figure::new("solo");

        let derived = extract(&ontology, &figure).unwrap();
        assert_eq!(derived.meta.title.as_deref(), Some("solo"));
    }

    #[test]
    fn test_extract_unknown_member_errors() {
        let ontology = sample();
        let mut figure = Figure::new("broken");
        figure.terms.push(Id::new("ghost"));

        let err = extract(&ontology, &figure).unwrap_err();
        assert!(matches!(err, OntolError::UnknownFigureMember(name) if name == "ghost"));
    }

    #[test]
    fn test_extract_independent_of_sibling_figures() {
        let mut ontology = sample();
        ontology.add_figure(Figure {
            name: "first".to_owned(),
            terms: vec![Id::new("element")],
            functions: vec![],
            hierarchy: vec![],
        });
        ontology.add_figure(Figure {
            name: "second".to_owned(),
            terms: vec![Id::new("pair")],
            functions: vec![],
            hierarchy: vec![],
        });

        let first = extract(&ontology, ontology.find_figure("first").unwrap()).unwrap();
        let second = extract(&ontology, ontology.find_figure("second").unwrap()).unwrap();

        assert_eq!(first.terms().len(), 1);
        assert_eq!(first.terms()[0].name, Id::new("element"));
        assert_eq!(second.terms().len(), 1);
        assert_eq!(second.terms()[0].name, Id::new("pair"));
    }
}
