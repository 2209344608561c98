//! PlantUML code generation.
//!
//! Renders a validated [`Ontology`] into PlantUML text: one rectangle per
//! term, a synthesized rectangle and call edges per function, and one edge
//! per explicit relationship. Output is deterministic — generating twice
//! from the same ontology yields byte-identical text.

use indexmap::IndexMap;

use ontol_core::{
    Function, Id, Ontology, Relationship, RelationshipAttributes, RelationshipDirection,
    RelationshipType, Term, TermAttributes,
};

/// Default arrow style for function call edges without a `type` attribute.
const DEFAULT_FUNCTION_EDGE: RelationshipType = RelationshipType::DirectAssociation;

/// Default arrow color for function call edges without `colorArrow`.
const DEFAULT_ARROW_COLOR: &str = "black";

/// Generate the PlantUML document for an ontology.
pub fn generate(ontology: &Ontology) -> String {
    let mut lines: Vec<String> = vec![
        "@startuml".to_owned(),
        "skinparam backgroundColor #F0F8FF".to_owned(),
        "skinparam defaultTextAlignment center".to_owned(),
        "skinparam shadowing false".to_owned(),
        "skinparam dpi 150".to_owned(),
        "skinparam linetype ortho".to_owned(),
        "skinparam ranksep 40".to_owned(),
        "skinparam nodesep 30".to_owned(),
        format!(
            "package \"{}\" {{",
            ontology.meta.title.as_deref().unwrap_or("Ontology")
        ),
    ];

    for term in ontology.terms() {
        lines.push(rectangle(term));
        if let Some(note) = note(term) {
            lines.push(note);
        }
    }

    for function in ontology.functions() {
        lines.push(rectangle(&function_node(function)));
    }

    for function in ontology.functions() {
        for edge in function_edges(function) {
            lines.push(relationship_line(&edge));
        }
    }

    for relationship in ontology.hierarchy() {
        lines.push(relationship_line(relationship));
    }

    lines.push("}".to_owned());
    lines.push("@enduml".to_owned());

    log::debug!(lines = lines.len(); "generated plantuml document");
    lines.join("\n")
}

/// Render a term as a labeled rectangle, with its description in
/// parentheses on a second line and its color when configured.
fn rectangle(term: &Term) -> String {
    let mut text = term.label.clone();
    if !term.description.is_empty() {
        text.push_str(&format!("\\n({})", term.description));
    }

    let mut line = format!("rectangle \"{}\" as {}", text, term.name);
    if let Some(color) = &term.attributes.color {
        line.push(' ');
        line.push_str(color);
    }
    line
}

/// Render the floating note attached to a term, if any.
fn note(term: &Term) -> Option<String> {
    let text = term.attributes.note.as_ref()?;
    // Source notes encode line breaks as literal `\n`.
    let text = text.replace("\\n", "\n");
    Some(format!("note right of {}\n{}\nend note", term.name, text))
}

/// Synthesize the visual node standing in for a function: its description
/// concatenates the inputs, an arrow and the output.
fn function_node(function: &Function) -> Term {
    let inputs: Vec<String> = function
        .input_types
        .iter()
        .map(|argument| {
            if argument.label.is_empty() {
                argument.term.to_string()
            } else {
                format!("{}: {}", argument.term, argument.label)
            }
        })
        .collect();
    let output = if function.output_type.label.is_empty() {
        function.output_type.term.to_string()
    } else {
        format!("{}: {}", function.output_type.term, function.output_type.label)
    };

    Term {
        name: function.name,
        label: function.label.clone(),
        description: format!("{} -> {}", inputs.join(", "), output),
        attributes: TermAttributes {
            color: function.attributes.color.clone(),
            note: None,
        },
    }
}

/// Synthesize one incoming edge per distinct input term, with a
/// multiplicity marker when a term appears more than once, plus the
/// outgoing edge to the output term.
fn function_edges(function: &Function) -> Vec<Relationship> {
    let edge_type = function
        .attributes
        .relationship_type
        .unwrap_or(DEFAULT_FUNCTION_EDGE);
    let color = function
        .attributes
        .color_arrow
        .clone()
        .unwrap_or_else(|| DEFAULT_ARROW_COLOR.to_owned());

    let mut input_counts: IndexMap<Id, usize> = IndexMap::new();
    for argument in &function.input_types {
        *input_counts.entry(argument.term).or_insert(0) += 1;
    }

    let mut edges = Vec::with_capacity(input_counts.len() + 1);
    for (term, count) in &input_counts {
        edges.push(Relationship {
            name: None,
            parent: *term,
            relationship: edge_type,
            children: vec![function.name],
            attributes: RelationshipAttributes {
                color: Some(color.clone()),
                direction: Some(RelationshipDirection::Forward),
                title: function.attributes.input_title.clone(),
                left_char: (*count > 1).then(|| count.to_string()),
                right_char: None,
            },
        });
    }

    edges.push(Relationship {
        name: None,
        parent: function.name,
        relationship: edge_type,
        children: vec![function.output_type.term],
        attributes: RelationshipAttributes {
            color: Some(color),
            direction: Some(RelationshipDirection::Forward),
            title: function.attributes.output_title.clone(),
            left_char: None,
            right_char: None,
        },
    });

    edges
}

/// Render one edge line: parent, optional quoted multiplicity chars, the
/// arrow glyph (with the color bracket-injected), child and optional title.
fn relationship_line(relationship: &Relationship) -> String {
    let direction = relationship
        .attributes
        .direction
        .unwrap_or(RelationshipDirection::Forward);
    let glyph = arrow_glyph(relationship.relationship, direction);

    let arrow = match &relationship.attributes.color {
        // The color is spliced in after the first two glyph characters:
        // `--[#red]-|>`, `..[#red].>`.
        Some(color) => format!("{}[{}]{}", &glyph[..2], color, &glyph[2..]),
        None => glyph.to_owned(),
    };

    let mut parts: Vec<String> = vec![relationship.parent.to_string()];
    if let Some(left) = &relationship.attributes.left_char {
        parts.push(format!("\"{left}\""));
    }
    parts.push(arrow);
    if let Some(right) = &relationship.attributes.right_char {
        parts.push(format!("\"{right}\""));
    }
    parts.push(relationship.children[0].to_string());

    let mut line = parts.join(" ");
    if let Some(title) = &relationship.attributes.title {
        line.push_str(&format!(" : \"{title}\""));
    }
    line
}

/// The arrow vocabulary: relationship type and direction to glyph.
fn arrow_glyph(relationship: RelationshipType, direction: RelationshipDirection) -> &'static str {
    use RelationshipDirection::{Backward, Bidirectional, Forward};
    use RelationshipType::*;

    match (relationship, direction) {
        (Dependence, Forward) => "...>",
        (Dependence, Backward) => "<...",
        (Dependence, Bidirectional) => "<...>",

        (Association, _) => "---",

        (DirectAssociation, Forward) => "--->",
        (DirectAssociation, Backward) => "<---",
        (DirectAssociation, Bidirectional) => "<--->",

        (Inheritance, Forward) => "---|>",
        (Inheritance, Backward) => "<|---",
        (Inheritance, Bidirectional) => "<|---|>",

        (Implementation, Forward) => "...|>",
        (Implementation, Backward) => "<|...",
        (Implementation, Bidirectional) => "<|...|>",

        (Aggregation, Forward) => "---o",
        (Aggregation, Backward) => "o---",
        (Aggregation, Bidirectional) => "o---o",

        (Composition, Forward) => "---*",
        (Composition, Backward) => "*---",
        (Composition, Bidirectional) => "*---*",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontol_core::{FunctionArgument, FunctionAttributes};

    fn term(name: &str, label: &str, description: &str) -> Term {
        Term::new(Id::new(name), label, description)
    }

    #[test]
    fn test_rectangle_with_description_and_color() {
        let mut t = term("set", "Set", "A collection");
        t.attributes.color = Some("#ffffff".to_owned());

        assert_eq!(
            rectangle(&t),
            "rectangle \"Set\\n(A collection)\" as set #ffffff"
        );
    }

    #[test]
    fn test_rectangle_without_description() {
        let t = term("set", "Set", "");
        assert_eq!(rectangle(&t), "rectangle \"Set\" as set");
    }

    #[test]
    fn test_note_rendering() {
        let mut t = term("set", "Set", "");
        t.attributes.note = Some("first line\\nsecond line".to_owned());

        assert_eq!(
            note(&t).unwrap(),
            "note right of set\nfirst line\nsecond line\nend note"
        );
        assert!(note(&term("x", "X", "")).is_none());
    }

    #[test]
    fn test_arrow_glyphs() {
        use RelationshipDirection::*;

        assert_eq!(arrow_glyph(RelationshipType::Inheritance, Forward), "---|>");
        assert_eq!(arrow_glyph(RelationshipType::Composition, Backward), "*---");
        assert_eq!(arrow_glyph(RelationshipType::Association, Forward), "---");
        assert_eq!(arrow_glyph(RelationshipType::Association, Bidirectional), "---");
        assert_eq!(arrow_glyph(RelationshipType::Dependence, Forward), "...>");
        assert_eq!(
            arrow_glyph(RelationshipType::Implementation, Bidirectional),
            "<|...|>"
        );
    }

    #[test]
    fn test_relationship_line_color_injection() {
        let relationship = Relationship {
            name: None,
            parent: Id::new("a"),
            relationship: RelationshipType::Inheritance,
            children: vec![Id::new("b")],
            attributes: RelationshipAttributes {
                color: Some("#red".to_owned()),
                direction: Some(RelationshipDirection::Forward),
                ..Default::default()
            },
        };

        assert_eq!(relationship_line(&relationship), "a --[#red]-|> b");
    }

    #[test]
    fn test_relationship_line_chars_and_title() {
        let relationship = Relationship {
            name: None,
            parent: Id::new("a"),
            relationship: RelationshipType::Aggregation,
            children: vec![Id::new("b")],
            attributes: RelationshipAttributes {
                direction: Some(RelationshipDirection::Forward),
                title: Some("holds".to_owned()),
                left_char: Some("1".to_owned()),
                right_char: Some("*".to_owned()),
                ..Default::default()
            },
        };

        assert_eq!(
            relationship_line(&relationship),
            "a \"1\" ---o \"*\" b : \"holds\""
        );
    }

    #[test]
    fn test_function_node_description() {
        let function = Function {
            name: Id::new("join"),
            label: "Join".to_owned(),
            input_types: vec![
                FunctionArgument::new(Id::new("set"), "left".to_owned()),
                FunctionArgument::new(Id::new("set"), String::new()),
            ],
            output_type: FunctionArgument::new(Id::new("set"), "union".to_owned()),
            attributes: FunctionAttributes::default(),
        };

        let node = function_node(&function);
        assert_eq!(node.name, Id::new("join"));
        assert_eq!(node.description, "set: left, set -> set: union");
    }

    #[test]
    fn test_function_edges_multiplicity() {
        let function = Function {
            name: Id::new("join"),
            label: "Join".to_owned(),
            input_types: vec![
                FunctionArgument::new(Id::new("set"), String::new()),
                FunctionArgument::new(Id::new("set"), String::new()),
            ],
            output_type: FunctionArgument::new(Id::new("set"), String::new()),
            attributes: FunctionAttributes::default(),
        };

        let edges = function_edges(&function);
        // One distinct input edge plus the output edge.
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].parent, Id::new("set"));
        assert_eq!(edges[0].attributes.left_char.as_deref(), Some("2"));
        assert_eq!(edges[0].relationship, RelationshipType::DirectAssociation);
        assert_eq!(edges[0].attributes.color.as_deref(), Some("black"));
        assert_eq!(edges[1].parent, Id::new("join"));
        assert!(edges[1].attributes.left_char.is_none());
    }

    #[test]
    fn test_generate_deterministic() {
        let mut ontology = Ontology::new();
        ontology.meta.title = Some("Sets".to_owned());
        ontology.add_term(term("element", "Element", "")).unwrap();
        ontology.add_term(term("set", "Set", "")).unwrap();
        ontology
            .add_relationship(Relationship {
                name: None,
                parent: Id::new("element"),
                relationship: RelationshipType::Aggregation,
                children: vec![Id::new("set")],
                attributes: Default::default(),
            })
            .unwrap();

        let first = generate(&ontology);
        let second = generate(&ontology);
        assert_eq!(first, second);

        assert!(first.starts_with("@startuml"));
        assert!(first.ends_with("@enduml"));
        assert!(first.contains("package \"Sets\" {"));
        assert!(first.contains("element ---o set"));
    }

    #[test]
    fn test_generate_untitled_package() {
        let ontology = Ontology::new();
        let text = generate(&ontology);
        assert!(text.contains("package \"Ontology\" {"));
    }
}
