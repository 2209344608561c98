//! Retranslation: Ontol surface syntax from a parsed ontology.
//!
//! The inverse of parsing, used for debugging and round-trip verification:
//! re-parsing the produced text yields an ontology with the same
//! definitions, relationship types and non-absent attributes (comments and
//! layout are not preserved).

use ontol_core::{
    Figure, Function, FunctionAttributes, Ontology, Relationship, RelationshipAttributes, Term,
    TermAttributes,
};

/// Serialize an ontology back into Ontol source text.
pub fn retranslate(ontology: &Ontology) -> String {
    let mut lines: Vec<String> = Vec::new();

    let meta = &ontology.meta;
    for (key, value) in [
        ("version", &meta.version),
        ("title", &meta.title),
        ("author", &meta.author),
        ("description", &meta.description),
        ("type", &meta.kind),
        ("date", &meta.date),
    ] {
        if let Some(value) = value {
            lines.push(format!("{key}: {}", quote(value)));
        }
    }
    lines.push(String::new());

    lines.push("types:".to_owned());
    for term in ontology.terms() {
        lines.push(term_line(term));
    }
    lines.push(String::new());

    lines.push("functions:".to_owned());
    for function in ontology.functions() {
        lines.push(function_line(function));
    }
    lines.push(String::new());

    lines.push("hierarchy:".to_owned());
    for relationship in ontology.hierarchy() {
        lines.push(relationship_line(relationship));
    }

    for figure in ontology.figures() {
        lines.push(String::new());
        lines.push(figure_line(figure));
    }

    lines.join("\n")
}

fn term_line(term: &Term) -> String {
    format!(
        "{}: {}, {}{}",
        term.name,
        quote(&term.label),
        quote(&term.description),
        attribute_clause(&term_attributes(&term.attributes)),
    )
}

fn function_line(function: &Function) -> String {
    let params: Vec<String> = function
        .input_types
        .iter()
        .map(|argument| format!("{}: {}", argument.term, quote(&argument.label)))
        .collect();

    format!(
        "{}: {} ({}) -> {}: {}{}",
        function.name,
        quote(&function.label),
        params.join(", "),
        function.output_type.term,
        quote(&function.output_type.label),
        attribute_clause(&function_attributes(&function.attributes)),
    )
}

fn relationship_line(relationship: &Relationship) -> String {
    let prefix = match relationship.name {
        Some(name) => format!("{name}: "),
        None => String::new(),
    };

    format!(
        "{prefix}{} {} {}{}",
        relationship.parent,
        relationship.relationship.tag(),
        relationship.children[0],
        attribute_clause(&relationship_attributes(&relationship.attributes)),
    )
}

fn figure_line(figure: &Figure) -> String {
    let members: Vec<String> = figure
        .terms
        .iter()
        .chain(&figure.functions)
        .chain(&figure.hierarchy)
        .map(|id| id.to_string())
        .collect();

    format!("figure {}: {}", quote(&figure.name), members.join(" "))
}

fn term_attributes(attributes: &TermAttributes) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    if let Some(color) = &attributes.color {
        pairs.push(("color", color.clone()));
    }
    if let Some(note) = &attributes.note {
        pairs.push(("note", note.clone()));
    }
    pairs
}

fn function_attributes(attributes: &FunctionAttributes) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    if let Some(color) = &attributes.color {
        pairs.push(("color", color.clone()));
    }
    if let Some(color_arrow) = &attributes.color_arrow {
        pairs.push(("colorArrow", color_arrow.clone()));
    }
    if let Some(relationship_type) = attributes.relationship_type {
        pairs.push(("type", relationship_type.tag().to_owned()));
    }
    if let Some(input_title) = &attributes.input_title {
        pairs.push(("inputTitle", input_title.clone()));
    }
    if let Some(output_title) = &attributes.output_title {
        pairs.push(("outputTitle", output_title.clone()));
    }
    pairs
}

fn relationship_attributes(attributes: &RelationshipAttributes) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    if let Some(color) = &attributes.color {
        pairs.push(("color", color.clone()));
    }
    if let Some(direction) = attributes.direction {
        pairs.push(("direction", direction.tag().to_owned()));
    }
    if let Some(title) = &attributes.title {
        pairs.push(("title", title.clone()));
    }
    if let Some(left_char) = &attributes.left_char {
        pairs.push(("leftChar", left_char.clone()));
    }
    if let Some(right_char) = &attributes.right_char {
        pairs.push(("rightChar", right_char.clone()));
    }
    pairs
}

/// Render a trailing `, { k: 'v', ... }` clause, or nothing when every
/// attribute is absent.
fn attribute_clause(pairs: &[(&'static str, String)]) -> String {
    if pairs.is_empty() {
        return String::new();
    }
    let rendered: Vec<String> = pairs
        .iter()
        .map(|(key, value)| format!("{key}: {}", quote(value)))
        .collect();
    format!(", {{ {} }}", rendered.join(", "))
}

/// Quote a string value, preferring single quotes like hand-written Ontol.
fn quote(value: &str) -> String {
    if value.contains('\'') {
        format!("\"{value}\"")
    } else {
        format!("'{value}'")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontol_core::{FunctionArgument, Id, RelationshipDirection, RelationshipType};

    #[test]
    fn test_term_line() {
        let mut term = Term::new(Id::new("set"), "Set", "A collection");
        assert_eq!(term_line(&term), "set: 'Set', 'A collection'");

        term.attributes.color = Some("#ffffff".to_owned());
        term.attributes.note = Some("a note".to_owned());
        assert_eq!(
            term_line(&term),
            "set: 'Set', 'A collection', { color: '#ffffff', note: 'a note' }"
        );
    }

    #[test]
    fn test_function_line() {
        let function = Function {
            name: Id::new("transpose"),
            label: "Transpose".to_owned(),
            input_types: vec![FunctionArgument::new(Id::new("matrix"), "input".to_owned())],
            output_type: FunctionArgument::new(Id::new("matrix"), "output".to_owned()),
            attributes: FunctionAttributes {
                relationship_type: Some(RelationshipType::Dependence),
                ..Default::default()
            },
        };

        assert_eq!(
            function_line(&function),
            "transpose: 'Transpose' (matrix: 'input') -> matrix: 'output', { type: 'dependence' }"
        );
    }

    #[test]
    fn test_relationship_line_named_and_unnamed() {
        let mut relationship = Relationship {
            name: None,
            parent: Id::new("element"),
            relationship: RelationshipType::Aggregation,
            children: vec![Id::new("set")],
            attributes: RelationshipAttributes::default(),
        };
        assert_eq!(relationship_line(&relationship), "element aggregation set");

        relationship.name = Some(Id::new("member"));
        relationship.attributes.direction = Some(RelationshipDirection::Backward);
        assert_eq!(
            relationship_line(&relationship),
            "member: element aggregation set, { direction: 'backward' }"
        );
    }

    #[test]
    fn test_figure_line() {
        let figure = Figure {
            name: "overview".to_owned(),
            terms: vec![Id::new("set")],
            functions: vec![Id::new("transpose")],
            hierarchy: vec![Id::new("member")],
        };
        assert_eq!(figure_line(&figure), "figure 'overview': set transpose member");
    }

    #[test]
    fn test_quote_switches_for_embedded_quote() {
        assert_eq!(quote("plain"), "'plain'");
        assert_eq!(quote("it's"), "\"it's\"");
    }

    #[test]
    fn test_full_document_shape() {
        let mut ontology = Ontology::new();
        ontology.meta.title = Some("Sets".to_owned());
        ontology.meta.date = Some("2025-01-01".to_owned());
        ontology
            .add_term(Term::new(Id::new("set"), "Set", ""))
            .unwrap();

        let text = retranslate(&ontology);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "title: 'Sets'");
        assert_eq!(lines[1], "date: '2025-01-01'");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "types:");
        assert_eq!(lines[4], "set: 'Set', ''");
        assert_eq!(lines[5], "");
        assert_eq!(lines[6], "functions:");
        assert_eq!(lines[7], "");
        assert_eq!(lines[8], "hierarchy:");
    }
}
