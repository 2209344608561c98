//! End-to-end pipeline tests: parse, generate, retranslate, serialize.

use ontol::{Id, RelationshipType, figure, parse, serializer};
use serde_json::json;

const SOURCE: &str = r#"
version: '1.0'
title: 'Set theory'
author: 'A. Author'

types:
element: 'Element', 'A basic thing'
set: 'Set', 'A collection of unique elements', { color: '#e8f4f8', note: 'the main concept' }
pair: 'Pair', 'Two elements'

functions:
join: 'Join' (set: 'left', set: 'right') -> set: 'union', { colorArrow: '#888888', type: 'dependence' }

hierarchy:
element aggregation set
contains: set composition pair, { direction: 'backward', title: 'contains', leftChar: '1', rightChar: '2' }

figure 'core': element set
figure 'pairs': pair contains
"#;

#[test]
fn test_end_to_end_scenario() {
    // Two types and an aggregation edge surface in the structured document
    // exactly as declared.
    let source = "\
types:
element: 'Element', ''
set: 'Set', ''

hierarchy:
element aggregation set
";
    let (ontology, _) = parse(source, "scenario.ontol").expect("failed to parse");
    let value = ontol::to_structured(&ontology);

    let entry = &value["hierarchy"][0];
    assert_eq!(entry["relationship"], "aggregation");
    assert_eq!(entry["parent"], "element");
    assert_eq!(entry["children"], json!(["set"]));
}

#[test]
fn test_diagram_generation_deterministic() {
    let (ontology, _) = parse(SOURCE, "sets.ontol").expect("failed to parse");

    let first = ontol::generate_diagram(&ontology);
    let second = ontol::generate_diagram(&ontology);
    assert_eq!(first, second);
}

#[test]
fn test_diagram_contains_expected_elements() {
    let (ontology, _) = parse(SOURCE, "sets.ontol").expect("failed to parse");
    let diagram = ontol::generate_diagram(&ontology);

    assert!(diagram.starts_with("@startuml"));
    assert!(diagram.trim_end().ends_with("@enduml"));
    assert!(diagram.contains("package \"Set theory\" {"));

    // Term nodes and the note annotation.
    assert!(diagram.contains("rectangle \"Element\\n(A basic thing)\" as element"));
    assert!(diagram.contains("#e8f4f8"));
    assert!(diagram.contains("note right of set\nthe main concept\nend note"));

    // The synthesized function node and its call edges: two identical
    // input terms collapse into one edge with a multiplicity marker.
    assert!(diagram.contains("rectangle \"Join\\n(set: left, set: right -> set: union)\" as join"));
    assert!(diagram.contains("set \"2\" ..[#888888].> join"));
    assert!(diagram.contains("join ..[#888888].> set"));

    // Explicit relationships: plain aggregation and decorated composition.
    assert!(diagram.contains("element ---o set"));
    assert!(diagram.contains("set \"1\" *--- \"2\" pair : \"contains\""));
}

#[test]
fn test_round_trip_preserves_definitions() {
    let (ontology, _) = parse(SOURCE, "sets.ontol").expect("failed to parse");

    let regenerated = ontol::retranslate(&ontology);
    let (reparsed, warnings) = parse(&regenerated, "sets.ontol").expect("round trip re-parse");
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");

    // Same definitions under the same names.
    assert_eq!(reparsed.terms().len(), ontology.terms().len());
    assert_eq!(reparsed.functions().len(), ontology.functions().len());
    assert_eq!(reparsed.hierarchy().len(), ontology.hierarchy().len());
    assert_eq!(reparsed.figures().len(), ontology.figures().len());

    for term in ontology.terms() {
        let other = reparsed.find_term(term.name).expect("term survives");
        assert_eq!(other, term);
    }
    for function in ontology.functions() {
        let other = reparsed
            .find_function(function.name)
            .expect("function survives");
        assert_eq!(other, function);
    }
    for (ours, theirs) in ontology.hierarchy().iter().zip(reparsed.hierarchy()) {
        assert_eq!(ours, theirs);
    }

    // The structured documents agree except for the generated date.
    let mut ours = ontol::to_structured(&ontology);
    let mut theirs = ontol::to_structured(&reparsed);
    ours["meta"]["date"] = serde_json::Value::Null;
    theirs["meta"]["date"] = serde_json::Value::Null;
    assert_eq!(ours, theirs);
}

#[test]
fn test_round_trip_of_empty_ontology() {
    let (ontology, _) = parse("", "empty.ontol").expect("failed to parse");
    let regenerated = ontol::retranslate(&ontology);
    let (reparsed, _) = parse(&regenerated, "empty.ontol").expect("round trip re-parse");
    assert!(reparsed.terms().is_empty());
}

#[test]
fn test_figure_isolation() {
    let (ontology, _) = parse(SOURCE, "sets.ontol").expect("failed to parse");

    let core = figure::extract(&ontology, ontology.find_figure("core").unwrap()).unwrap();
    let pairs = figure::extract(&ontology, ontology.find_figure("pairs").unwrap()).unwrap();

    assert_eq!(core.terms().len(), 2);
    assert!(core.find_term(Id::new("pair")).is_none());
    assert!(core.hierarchy().is_empty());
    assert_eq!(core.meta.title.as_deref(), Some("Set theory - core"));

    assert_eq!(pairs.terms().len(), 1);
    assert_eq!(pairs.hierarchy().len(), 1);
    assert_eq!(
        pairs.hierarchy()[0].relationship,
        RelationshipType::Composition
    );
}

#[test]
fn test_figure_extraction_feeds_generators() {
    // A figure sub-ontology is a full ontology: every generator accepts it.
    let (ontology, _) = parse(SOURCE, "sets.ontol").expect("failed to parse");
    let core = figure::extract(&ontology, ontology.find_figure("core").unwrap()).unwrap();

    let diagram = ontol::generate_diagram(&core);
    assert!(diagram.contains("package \"Set theory - core\" {"));
    assert!(diagram.contains("as element"));
    assert!(!diagram.contains("as pair"));

    let value = serializer::to_value(&core);
    assert_eq!(value["terms"].as_array().unwrap().len(), 2);
    assert_eq!(value["hierarchy"].as_array().unwrap().len(), 0);
}

#[test]
fn test_structured_document_attributes_only_present() {
    let (ontology, _) = parse(SOURCE, "sets.ontol").expect("failed to parse");
    let value = ontol::to_structured(&ontology);

    // `element` has no attributes; `set` carries color and note.
    assert_eq!(value["terms"][0]["attributes"], json!({}));
    assert_eq!(
        value["terms"][1]["attributes"],
        json!({"color": "#e8f4f8", "note": "the main concept"})
    );

    // Enumerated attributes render as tags.
    assert_eq!(value["functions"][0]["attributes"]["type"], "dependence");
    assert_eq!(
        value["hierarchy"][1]["attributes"]["direction"],
        "backward"
    );
}

#[test]
fn test_structured_figures_are_name_lists() {
    let (ontology, _) = parse(SOURCE, "sets.ontol").expect("failed to parse");
    let value = ontol::to_structured(&ontology);

    assert_eq!(value["figures"][0]["name"], "core");
    assert_eq!(value["figures"][0]["terms"], json!(["element", "set"]));
    assert_eq!(value["figures"][1]["hierarchy"], json!(["contains"]));
}
