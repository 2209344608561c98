//! Semantic elaboration: syntactic statements into a validated [`Ontology`].
//!
//! Statements are walked in source order, so every reference check sees
//! exactly the definitions declared (or imported) before it — forward
//! references are undefined references. Structural violations are fatal and
//! abort immediately; empty labels, descriptions and attribute values are
//! collected as warnings.

use ontol_core::{
    Figure, Function, FunctionArgument, Id, Meta, Ontology, Relationship, RelationshipDirection,
    RelationshipType, Term,
};

use crate::{
    error::{Diagnostic, ErrorCode, ParseError},
    import::{ImportResolver, Origin},
    parser_types::{
        Attribute, FigureEntry, FunctionEntry, HierarchyEntry, ImportEntry, MetaLine, Statement,
        TypeEntry,
    },
    span::Span,
};

/// Elaborate parsed statements into an ontology.
///
/// Warnings are appended to `warnings` with their positional payload already
/// attached; the first fatal error aborts and is returned.
pub(crate) fn elaborate(
    statements: &[Statement<'_>],
    source: &str,
    origin: &Origin,
    resolver: &mut ImportResolver<'_>,
    warnings: &mut Vec<Diagnostic>,
) -> Result<Ontology, ParseError> {
    let mut elaborator = Elaborator {
        source,
        origin,
        ontology: Ontology::new(),
        warnings,
    };

    for statement in statements {
        match statement {
            Statement::Meta(meta) => elaborator.meta_line(meta)?,
            Statement::Types(entries) => {
                for entry in entries {
                    elaborator.type_entry(entry)?;
                }
            }
            Statement::Functions(entries) => {
                for entry in entries {
                    elaborator.function_entry(entry)?;
                }
            }
            Statement::Hierarchy(entries) => {
                for entry in entries {
                    elaborator.hierarchy_entry(entry)?;
                }
            }
            Statement::Figure(figure) => elaborator.figure_entry(figure)?,
            Statement::Import(import) => elaborator.import_entry(import, resolver)?,
        }
    }

    let mut ontology = elaborator.ontology;
    if ontology.meta.date.as_deref().is_none_or(str::is_empty) {
        ontology.meta.date = Some(chrono::Local::now().format("%Y-%m-%d").to_string());
    }

    log::debug!(
        terms = ontology.terms().len(),
        functions = ontology.functions().len(),
        relationships = ontology.hierarchy().len();
        "elaborated ontology"
    );
    Ok(ontology)
}

struct Elaborator<'a> {
    source: &'a str,
    origin: &'a Origin,
    ontology: Ontology,
    warnings: &'a mut Vec<Diagnostic>,
}

impl Elaborator<'_> {
    fn warn(&mut self, span: Span, message: impl Into<String>) {
        self.warnings.push(
            Diagnostic::warning(message)
                .with_label(span, "empty value")
                .with_source_context(&self.origin.path, self.source),
        );
    }

    fn fatal(&self, span: Span, code: ErrorCode, message: impl Into<String>) -> ParseError {
        Diagnostic::error(message)
            .with_code(code)
            .with_label(span, code.description())
            .with_source_context(&self.origin.path, self.source)
            .into()
    }

    fn meta_line(&mut self, meta: &MetaLine<'_>) -> Result<(), ParseError> {
        let key = *meta.key.inner();
        let value = meta.value.inner().clone();

        if value.is_empty() {
            self.warn(meta.value.span(), format!("{key} value is empty"));
        }

        let slot = match key {
            "version" => &mut self.ontology.meta.version,
            "title" => &mut self.ontology.meta.title,
            "author" => &mut self.ontology.meta.author,
            "description" => &mut self.ontology.meta.description,
            "type" => &mut self.ontology.meta.kind,
            "date" => &mut self.ontology.meta.date,
            _ => {
                return Err(self
                    .fatal(
                        meta.key.span(),
                        ErrorCode::E200,
                        format!("unknown meta tag '{key}'"),
                    )
                    .with_help_hint(Meta::FIELDS));
            }
        };
        *slot = Some(value);
        Ok(())
    }

    fn type_entry(&mut self, entry: &TypeEntry<'_>) -> Result<(), ParseError> {
        let name = Id::new(entry.name.inner());

        if self.ontology.contains(name) {
            return Err(self.fatal(
                entry.name.span(),
                ErrorCode::E201,
                format!("type '{name}' has already been declared"),
            ));
        }

        if entry.label.inner().is_empty() {
            self.warn(entry.label.span(), "term label is empty");
        }
        if entry.description.inner().is_empty() {
            self.warn(entry.description.span(), "term description is empty");
        }

        let mut term = Term::new(
            name,
            entry.label.inner().clone(),
            entry.description.inner().clone(),
        );
        self.apply_attributes(&entry.attributes, |key, value| {
            term.attributes.apply(key, value)
        })?;

        self.ontology
            .add_term(term)
            .expect("uniqueness checked above");
        Ok(())
    }

    fn function_entry(&mut self, entry: &FunctionEntry<'_>) -> Result<(), ParseError> {
        let name = Id::new(entry.name.inner());

        if self.ontology.contains(name) {
            return Err(self.fatal(
                entry.name.span(),
                ErrorCode::E201,
                format!("function '{name}' has already been declared"),
            ));
        }

        if entry.label.inner().is_empty() {
            self.warn(entry.label.span(), "label is empty");
        }

        let mut input_types = Vec::with_capacity(entry.params.len());
        for param in &entry.params {
            let term = self.resolve_term(param.term.inner(), param.term.span())?;
            if param.label.inner().is_empty() {
                self.warn(param.label.span(), "parameter label is empty");
            }
            input_types.push(FunctionArgument::new(term, param.label.inner().clone()));
        }

        let output_term = self.resolve_term(entry.output.term.inner(), entry.output.term.span())?;
        if entry.output.label.inner().is_empty() {
            self.warn(entry.output.label.span(), "output term label is empty");
        }
        let output_type = FunctionArgument::new(output_term, entry.output.label.inner().clone());

        let mut function = Function {
            name,
            label: entry.label.inner().clone(),
            input_types,
            output_type,
            attributes: Default::default(),
        };
        self.apply_attributes(&entry.attributes, |key, value| {
            function.attributes.apply(key, value)
        })?;

        self.ontology
            .add_function(function)
            .expect("uniqueness checked above");
        Ok(())
    }

    fn hierarchy_entry(&mut self, entry: &HierarchyEntry<'_>) -> Result<(), ParseError> {
        let name = match &entry.name {
            Some(spanned) => {
                let name = Id::new(spanned.inner());
                if self.ontology.contains(name) {
                    return Err(self.fatal(
                        spanned.span(),
                        ErrorCode::E201,
                        format!("relationship '{name}' has already been declared"),
                    ));
                }
                Some(name)
            }
            None => None,
        };

        let parent = self.resolve_term(entry.parent.inner(), entry.parent.span())?;

        let relationship = RelationshipType::from_tag(entry.relation.inner()).ok_or_else(|| {
            self.fatal(
                entry.relation.span(),
                ErrorCode::E204,
                format!("unexpected relationship type '{}'", entry.relation.inner()),
            )
            .with_help_hint(
                &RelationshipType::ALL
                    .iter()
                    .map(RelationshipType::tag)
                    .collect::<Vec<_>>(),
            )
        })?;

        let child = self.resolve_term(entry.child.inner(), entry.child.span())?;

        let mut relationship = Relationship {
            name,
            parent,
            relationship,
            children: vec![child],
            attributes: Default::default(),
        };
        self.apply_attributes(&entry.attributes, |key, value| {
            relationship.attributes.apply(key, value)
        })?;

        if relationship.relationship == RelationshipType::Inheritance
            && relationship.attributes.direction == Some(RelationshipDirection::Bidirectional)
        {
            return Err(self.fatal(
                entry.relation.span(),
                ErrorCode::E205,
                "inheritance relationship cannot be bidirectional",
            ));
        }

        self.ontology
            .add_relationship(relationship)
            .expect("uniqueness checked above");
        Ok(())
    }

    fn figure_entry(&mut self, entry: &FigureEntry<'_>) -> Result<(), ParseError> {
        let mut figure = Figure::new(entry.name.inner().clone());

        for member in &entry.members {
            let id = Id::new(member.inner());
            match self.ontology.definition(id) {
                Some(ontol_core::Definition::Term(_)) => figure.terms.push(id),
                Some(ontol_core::Definition::Function(_)) => figure.functions.push(id),
                Some(ontol_core::Definition::Relationship(_)) => figure.hierarchy.push(id),
                None => {
                    return Err(self.fatal(
                        member.span(),
                        ErrorCode::E202,
                        format!("undefined reference '{id}' in figure"),
                    ));
                }
            }
        }

        self.ontology.add_figure(figure);
        Ok(())
    }

    fn import_entry(
        &mut self,
        entry: &ImportEntry<'_>,
        resolver: &mut ImportResolver<'_>,
    ) -> Result<(), ParseError> {
        resolver.resolve(
            entry,
            &mut self.ontology,
            self.origin,
            self.source,
            self.warnings,
        )
    }

    /// Resolve a term reference or raise the fatal undefined-term error.
    fn resolve_term(&self, name: &str, span: Span) -> Result<Id, ParseError> {
        let id = Id::new(name);
        if self.ontology.find_term(id).is_some() {
            Ok(id)
        } else {
            Err(self.fatal(span, ErrorCode::E202, format!("undefined term '{name}'")))
        }
    }

    /// Apply parsed attribute pairs through `apply`, warning on empty values
    /// and converting key/tag rejections to fatal diagnostics.
    fn apply_attributes<F>(
        &mut self,
        attributes: &[Attribute<'_>],
        mut apply: F,
    ) -> Result<(), ParseError>
    where
        F: FnMut(&str, String) -> Result<(), ontol_core::AttributeError>,
    {
        for attribute in attributes {
            let key = *attribute.key.inner();
            let value = attribute.value.inner().clone();

            if value.is_empty() {
                self.warn(attribute.value.span(), "attribute value is empty");
            }

            apply(key, value).map_err(|e| {
                let code = match e {
                    ontol_core::AttributeError::UnknownKey { .. } => ErrorCode::E203,
                    ontol_core::AttributeError::InvalidTag { .. } => ErrorCode::E204,
                };
                self.fatal(attribute.key.span(), code, e.to_string())
            })?;
        }
        Ok(())
    }
}

/// Attach a "valid values" help line to the last diagnostic of an error.
trait WithHelpHint {
    fn with_help_hint(self, values: &[&str]) -> Self;
}

impl WithHelpHint for ParseError {
    fn with_help_hint(self, values: &[&str]) -> Self {
        let diagnostics = self
            .into_diagnostics()
            .into_iter()
            .map(|d| d.with_help(format!("valid values are: {}", values.join(", "))))
            .collect::<Vec<_>>();
        ParseError::new(diagnostics)
    }
}
