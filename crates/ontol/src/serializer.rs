//! Canonical structured serialization.
//!
//! Dumps the ontology into a nested map/sequence document — the stable
//! machine-readable contract consumed by other tools. Field names and
//! nesting shape are part of the external interface: top-level keys `meta`,
//! `terms`, `functions`, `hierarchy` and `figures`; attribute maps contain
//! only present values; enumerated tags render as their textual form.

use serde_json::{Value, json};

use ontol_core::Ontology;

use crate::OntolError;

/// Build the canonical structured document for an ontology.
pub fn to_value(ontology: &Ontology) -> Value {
    json!({
        "meta": ontology.meta,
        "terms": ontology.terms(),
        "functions": ontology.functions(),
        "hierarchy": ontology.hierarchy(),
        "figures": ontology.figures(),
    })
}

/// Encode the structured document as pretty-printed JSON.
pub fn to_json(ontology: &Ontology) -> Result<String, OntolError> {
    Ok(serde_json::to_string_pretty(&to_value(ontology))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontol_core::{
        FunctionArgument, Id, Relationship, RelationshipAttributes, RelationshipType, Term,
    };

    fn sample() -> Ontology {
        let mut ontology = Ontology::new();
        ontology.meta.title = Some("Sets".to_owned());
        ontology
            .add_term(Term::new(Id::new("element"), "Element", "A basic thing"))
            .unwrap();
        ontology
            .add_term(Term::new(Id::new("set"), "Set", "A collection"))
            .unwrap();
        ontology
            .add_function(ontol_core::Function {
                name: Id::new("singleton"),
                label: "Singleton".to_owned(),
                input_types: vec![FunctionArgument::new(
                    Id::new("element"),
                    "the member".to_owned(),
                )],
                output_type: FunctionArgument::new(Id::new("set"), "the set".to_owned()),
                attributes: Default::default(),
            })
            .unwrap();
        ontology
            .add_relationship(Relationship {
                name: None,
                parent: Id::new("element"),
                relationship: RelationshipType::Aggregation,
                children: vec![Id::new("set")],
                attributes: RelationshipAttributes::default(),
            })
            .unwrap();
        ontology
    }

    #[test]
    fn test_top_level_keys() {
        let value = to_value(&sample());
        let object = value.as_object().unwrap();

        for key in ["meta", "terms", "functions", "hierarchy", "figures"] {
            assert!(object.contains_key(key), "missing key {key}");
        }
    }

    #[test]
    fn test_meta_includes_absent_fields() {
        let value = to_value(&sample());
        assert_eq!(value["meta"]["title"], "Sets");
        assert_eq!(value["meta"]["author"], Value::Null);
    }

    #[test]
    fn test_terms_shape() {
        let value = to_value(&sample());
        assert_eq!(value["terms"][0]["name"], "element");
        assert_eq!(value["terms"][0]["label"], "Element");
        assert_eq!(value["terms"][0]["description"], "A basic thing");
        // Absent attributes are omitted entirely.
        assert_eq!(value["terms"][0]["attributes"], json!({}));
    }

    #[test]
    fn test_functions_resolve_argument_names() {
        let value = to_value(&sample());
        let function = &value["functions"][0];

        assert_eq!(function["name"], "singleton");
        assert_eq!(function["input_types"][0]["name"], "element");
        assert_eq!(function["input_types"][0]["label"], "the member");
        assert_eq!(function["output_type"]["name"], "set");
        assert_eq!(function["output_type"]["label"], "the set");
    }

    #[test]
    fn test_hierarchy_entry_shape() {
        let value = to_value(&sample());
        let entry = &value["hierarchy"][0];

        assert_eq!(entry["name"], Value::Null);
        assert_eq!(entry["parent"], "element");
        assert_eq!(entry["relationship"], "aggregation");
        assert_eq!(entry["children"], json!(["set"]));
    }

    #[test]
    fn test_json_round_trips_through_serde() {
        let text = to_json(&sample()).unwrap();
        let reparsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(reparsed, to_value(&sample()));
    }
}
