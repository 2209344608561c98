//! Parser for Ontol source tokens.
//!
//! This module transforms a token stream from the [`lexer`](crate::lexer)
//! into the syntactic AST defined in [`parser_types`](crate::parser_types).
//! The public entry point is [`parse_statements`].
//!
//! The grammar is unambiguous at the token level: block keywords are
//! distinct tokens, and trailing commas and multi-line attribute blocks each
//! follow one canonical production. Newlines are significant — they
//! terminate entries — while other whitespace and comments are skipped.

use winnow::{
    Parser as _,
    combinator::{alt, eof, not, opt, peek, preceded, repeat, separated, terminated},
    error::{ContextError, ErrMode},
    stream::{Stream, TokenSlice},
    token::any,
};

use crate::{
    error::{Diagnostic, ErrorCode},
    parser_types as types,
    span::{Span, Spanned},
    tokens::{PositionedToken, Token},
};

/// Context type for parser errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Context {
    /// Description of what is currently being parsed
    Label(&'static str),
    /// Remaining token count (`eof_offset()`) at error start position
    ///
    /// Used to calculate start_offset as: `tokens.len() - start_offset_value`
    StartOffset(usize),
}

type Input<'src> = TokenSlice<'src, PositionedToken<'src>>;
type IResult<O> = std::result::Result<O, ErrMode<ContextError<Context>>>;

/// Run `f` committed: a backtrack failure inside it becomes a cut error
/// tagged with the position where the committed region started.
fn cut_err<'src, O, F>(input: &mut Input<'src>, f: F) -> IResult<O>
where
    F: FnOnce(&mut Input<'src>) -> IResult<O>,
{
    let start_remaining = input.eof_offset();

    match f(input) {
        Ok(o) => Ok(o),
        Err(ErrMode::Backtrack(mut e)) | Err(ErrMode::Cut(mut e)) => {
            e.push(Context::StartOffset(start_remaining));
            Err(ErrMode::Cut(e))
        }
        Err(e) => Err(e),
    }
}

/// Parse inline whitespace or a comment (never a newline).
fn ws_comment<'src>(input: &mut Input<'src>) -> IResult<()> {
    any.verify(|token: &PositionedToken<'_>| {
        matches!(token.token, Token::Whitespace | Token::LineComment(_))
    })
    .void()
    .parse_next(input)
}

/// Parse zero or more inline whitespace/comments.
fn ws0<'src>(input: &mut Input<'src>) -> IResult<()> {
    repeat(0.., ws_comment).parse_next(input)
}

/// Parse one whitespace, comment or newline.
fn blank<'src>(input: &mut Input<'src>) -> IResult<()> {
    any.verify(|token: &PositionedToken<'_>| {
        matches!(
            token.token,
            Token::Whitespace | Token::LineComment(_) | Token::Newline
        )
    })
    .void()
    .parse_next(input)
}

/// Parse zero or more whitespace/comments/newlines.
fn blanks0<'src>(input: &mut Input<'src>) -> IResult<()> {
    repeat(0.., blank).parse_next(input)
}

/// Parse the end of a statement line: optional inline trivia, then a
/// newline or the end of input.
fn line_end<'src>(input: &mut Input<'src>) -> IResult<()> {
    (
        ws0,
        alt((
            any.verify(|token: &PositionedToken<'_>| matches!(token.token, Token::Newline))
                .void(),
            eof.void(),
        )),
    )
        .void()
        .context(Context::Label("end of line"))
        .parse_next(input)
}

macro_rules! token_parser {
    ($name:ident, $pattern:pat, $label:literal) => {
        fn $name<'src>(input: &mut Input<'src>) -> IResult<Span> {
            any.verify_map(|token: &PositionedToken<'_>| {
                matches!(token.token, $pattern).then_some(token.span)
            })
            .context(Context::Label($label))
            .parse_next(input)
        }
    };
}

token_parser!(colon, Token::Colon, "':'");
token_parser!(comma, Token::Comma, "','");
token_parser!(lbrace, Token::LeftBrace, "'{'");
token_parser!(rbrace, Token::RightBrace, "'}'");
token_parser!(lparen, Token::LeftParen, "'('");
token_parser!(rparen, Token::RightParen, "')'");
token_parser!(arrow, Token::Arrow, "'->'");
token_parser!(star, Token::Star, "'*'");
token_parser!(kw_types, Token::Types, "'types'");
token_parser!(kw_functions, Token::Functions, "'functions'");
token_parser!(kw_hierarchy, Token::Hierarchy, "'hierarchy'");
token_parser!(kw_figure, Token::Figure, "'figure'");
token_parser!(kw_import, Token::Import, "'import'");
token_parser!(kw_from, Token::From, "'from'");
token_parser!(kw_as, Token::As, "'as'");

/// Parse an identifier with span preservation.
fn identifier<'src>(input: &mut Input<'src>) -> IResult<Spanned<&'src str>> {
    any.verify_map(|token: &PositionedToken<'src>| match &token.token {
        Token::Identifier(name) => Some(Spanned::new(*name, token.span)),
        _ => None,
    })
    .context(Context::Label("identifier"))
    .parse_next(input)
}

/// Parse a string literal with span preservation.
fn string_literal<'src>(input: &mut Input<'src>) -> IResult<Spanned<String>> {
    any.verify_map(|token: &PositionedToken<'_>| match &token.token {
        Token::StringLiteral(s) => Some(Spanned::new(s.clone(), token.span)),
        _ => None,
    })
    .context(Context::Label("string literal"))
    .parse_next(input)
}

/// Parse a single `key: 'value'` attribute pair.
fn attribute<'src>(input: &mut Input<'src>) -> IResult<types::Attribute<'src>> {
    let key = identifier.parse_next(input)?;
    (ws0, colon, ws0).parse_next(input)?;
    let value = string_literal.parse_next(input)?;
    Ok(types::Attribute { key, value })
}

/// Parse a trailing attribute clause: `, { key: 'value', ... }`.
///
/// The braces may span newlines and one trailing comma is tolerated before
/// the closing brace.
fn attribute_block<'src>(input: &mut Input<'src>) -> IResult<Vec<types::Attribute<'src>>> {
    (ws0, comma, ws0, lbrace).parse_next(input)?;

    cut_err(input, |input| {
        blanks0.parse_next(input)?;
        let attributes: Vec<types::Attribute<'src>> =
            separated(0.., attribute, (ws0, comma, blanks0)).parse_next(input)?;
        opt((ws0, comma)).parse_next(input)?;
        blanks0.parse_next(input)?;
        rbrace.parse_next(input)?;
        Ok(attributes)
    })
}

/// Parse one entry of a `types:` block:
/// `name: 'label', 'description'[, { attrs }]`.
fn type_entry<'src>(input: &mut Input<'src>) -> IResult<types::TypeEntry<'src>> {
    let name = identifier.parse_next(input)?;
    (ws0, colon, ws0).parse_next(input)?;
    let label = string_literal.parse_next(input)?;
    (ws0, comma, ws0).parse_next(input)?;

    // A comma after the label can only continue a type entry; commit.
    cut_err(input, |input| {
        let description = string_literal.parse_next(input)?;
        let attributes = opt(attribute_block)
            .parse_next(input)?
            .unwrap_or_default();
        line_end.parse_next(input)?;

        Ok(types::TypeEntry {
            name,
            label,
            description,
            attributes,
        })
    })
}

/// Parse a `types:` block and its entries.
fn types_block<'src>(input: &mut Input<'src>) -> IResult<types::Statement<'src>> {
    kw_types.parse_next(input)?;

    cut_err(input, |input| {
        (ws0, colon).parse_next(input)?;
        line_end.parse_next(input)?;
        let entries = repeat(0.., preceded(blanks0, type_entry)).parse_next(input)?;
        Ok(types::Statement::Types(entries))
    })
}

/// Parse a `term: 'label'` pair inside a function signature.
fn param<'src>(input: &mut Input<'src>) -> IResult<types::Param<'src>> {
    let term = identifier.parse_next(input)?;
    (ws0, colon, ws0).parse_next(input)?;
    let label = string_literal.parse_next(input)?;
    Ok(types::Param { term, label })
}

/// Parse one entry of a `functions:` block:
/// `name: 'label' (arg: 'label', ...) -> out: 'label'[, { attrs }]`.
fn function_entry<'src>(input: &mut Input<'src>) -> IResult<types::FunctionEntry<'src>> {
    let name = identifier.parse_next(input)?;
    (ws0, colon, ws0).parse_next(input)?;
    let label = string_literal.parse_next(input)?;
    (ws0, lparen).parse_next(input)?;

    // Only a function entry puts parentheses here; commit.
    cut_err(input, |input| {
        blanks0.parse_next(input)?;
        let params: Vec<types::Param<'src>> =
            separated(0.., param, (ws0, comma, blanks0)).parse_next(input)?;
        opt((ws0, comma)).parse_next(input)?;
        blanks0.parse_next(input)?;
        rparen.parse_next(input)?;

        (ws0, arrow, ws0).parse_next(input)?;
        let out_term = identifier.parse_next(input)?;
        (ws0, colon, ws0).parse_next(input)?;
        let out_label = string_literal.parse_next(input)?;

        let attributes = opt(attribute_block)
            .parse_next(input)?
            .unwrap_or_default();
        line_end.parse_next(input)?;

        Ok(types::FunctionEntry {
            name,
            label,
            params,
            output: types::Param {
                term: out_term,
                label: out_label,
            },
            attributes,
        })
    })
}

/// Parse a `functions:` block and its entries.
fn functions_block<'src>(input: &mut Input<'src>) -> IResult<types::Statement<'src>> {
    kw_functions.parse_next(input)?;

    cut_err(input, |input| {
        (ws0, colon).parse_next(input)?;
        line_end.parse_next(input)?;
        let entries = repeat(0.., preceded(blanks0, function_entry)).parse_next(input)?;
        Ok(types::Statement::Functions(entries))
    })
}

/// Parse one entry of a `hierarchy:` block:
/// `[name:] parent relType child[, { attrs }]`.
fn hierarchy_entry<'src>(input: &mut Input<'src>) -> IResult<types::HierarchyEntry<'src>> {
    let first = identifier.parse_next(input)?;

    let (name, parent) = match opt((ws0, colon, ws0)).parse_next(input)? {
        Some(_) => (Some(first), identifier.parse_next(input)?),
        None => (None, first),
    };

    let relation = preceded(ws0, identifier).parse_next(input)?;
    let child = preceded(ws0, identifier).parse_next(input)?;

    let attributes = opt(attribute_block)
        .parse_next(input)?
        .unwrap_or_default();
    line_end.parse_next(input)?;

    Ok(types::HierarchyEntry {
        name,
        parent,
        relation,
        child,
        attributes,
    })
}

/// Parse a `hierarchy:` block and its entries.
fn hierarchy_block<'src>(input: &mut Input<'src>) -> IResult<types::Statement<'src>> {
    kw_hierarchy.parse_next(input)?;

    cut_err(input, |input| {
        (ws0, colon).parse_next(input)?;
        line_end.parse_next(input)?;
        let entries = repeat(0.., preceded(blanks0, hierarchy_entry)).parse_next(input)?;
        Ok(types::Statement::Hierarchy(entries))
    })
}

/// Parse one figure member: an identifier not opening a new `name:` line.
///
/// The lookahead keeps a following meta line (`version: '...'`) out of the
/// member list.
fn figure_member<'src>(input: &mut Input<'src>) -> IResult<Spanned<&'src str>> {
    terminated(identifier, peek(not((ws0, colon)))).parse_next(input)
}

/// Parse a `figure 'name': member ...` block. Members may continue on
/// following lines until a non-member token appears.
fn figure_block<'src>(input: &mut Input<'src>) -> IResult<types::Statement<'src>> {
    kw_figure.parse_next(input)?;

    cut_err(input, |input| {
        let name = preceded(ws0, string_literal).parse_next(input)?;
        (ws0, colon).parse_next(input)?;
        let members = repeat(0.., preceded(blanks0, figure_member)).parse_next(input)?;
        Ok(types::Statement::Figure(types::FigureEntry { name, members }))
    })
}

/// Parse one selected import name with an optional `as` alias.
fn import_item<'src>(input: &mut Input<'src>) -> IResult<types::ImportItem<'src>> {
    let name = identifier.parse_next(input)?;
    let alias = opt(preceded((ws0, kw_as, ws0), identifier)).parse_next(input)?;
    Ok(types::ImportItem { name, alias })
}

/// Parse a selective import list: `{a, b as c}`.
fn import_list<'src>(input: &mut Input<'src>) -> IResult<Vec<types::ImportItem<'src>>> {
    lbrace.parse_next(input)?;
    blanks0.parse_next(input)?;
    let items: Vec<types::ImportItem<'src>> =
        separated(1.., import_item, (ws0, comma, blanks0)).parse_next(input)?;
    opt((ws0, comma)).parse_next(input)?;
    blanks0.parse_next(input)?;
    rbrace.parse_next(input)?;
    Ok(items)
}

/// Parse an import statement:
/// `import {a, b as c} from 'src'` or `import * from 'src'`.
fn import_statement<'src>(input: &mut Input<'src>) -> IResult<types::Statement<'src>> {
    kw_import.parse_next(input)?;

    cut_err(input, |input| {
        ws0.parse_next(input)?;
        let selection = alt((
            star.map(types::ImportSelection::Wildcard),
            import_list.map(types::ImportSelection::Named),
        ))
        .parse_next(input)?;
        (ws0, kw_from, ws0).parse_next(input)?;
        let source = string_literal.parse_next(input)?;
        line_end.parse_next(input)?;

        Ok(types::Statement::Import(types::ImportEntry {
            selection,
            source,
        }))
    })
}

/// Parse a meta line: `identifier: 'string'`.
///
/// The key's membership in the meta field set is checked during
/// elaboration, not here.
fn meta_line<'src>(input: &mut Input<'src>) -> IResult<types::Statement<'src>> {
    let key = identifier.parse_next(input)?;
    (ws0, colon, ws0).parse_next(input)?;
    let value = string_literal.parse_next(input)?;
    line_end.parse_next(input)?;
    Ok(types::Statement::Meta(types::MetaLine { key, value }))
}

/// Parse one top-level statement.
fn statement<'src>(input: &mut Input<'src>) -> IResult<types::Statement<'src>> {
    alt((
        types_block,
        functions_block,
        hierarchy_block,
        figure_block,
        import_statement,
        meta_line,
    ))
    .context(Context::Label("statement"))
    .parse_next(input)
}

/// Parse a whole program: statements separated by blank lines, then EOF.
fn program<'src>(input: &mut Input<'src>) -> IResult<Vec<types::Statement<'src>>> {
    let statements = repeat(0.., preceded(blanks0, statement)).parse_next(input)?;
    blanks0.parse_next(input)?;
    eof.void().parse_next(input)?;
    Ok(statements)
}

/// Utility function to convert winnow errors to our diagnostic format.
///
/// Extracts position information from error context (StartOffset) and
/// derives the error span from the token array.
fn convert_error(
    error: ErrMode<ContextError<Context>>,
    tokens: &[PositionedToken],
    current_remaining: usize,
) -> Diagnostic {
    fn is_trivia(token: &PositionedToken) -> bool {
        matches!(
            token.token,
            Token::Whitespace | Token::Newline | Token::LineComment(_)
        )
    }

    let end_offset = tokens.len() - current_remaining;

    match error {
        ErrMode::Backtrack(e) | ErrMode::Cut(e) => {
            let start_offset = e
                .context()
                .find_map(|ctx| match ctx {
                    Context::StartOffset(n) => Some(tokens.len() - n),
                    _ => None,
                })
                .unwrap_or(end_offset);

            let contexts: Vec<String> = e
                .context()
                .filter_map(|ctx| match ctx {
                    Context::Label(label) => Some(format!("expected {label}")),
                    _ => None,
                })
                .collect();

            let message = if contexts.is_empty() {
                "unexpected token or end of input".to_owned()
            } else {
                contexts.join(" → ")
            };

            // Prefer the consumed range; otherwise the first meaningful
            // token at or after the error; at EOF fall back to the last
            // meaningful token.
            let error_span = if start_offset < end_offset {
                let slice = &tokens[start_offset..end_offset];
                let first = slice.iter().find(|t| !is_trivia(t)).map(|t| t.span);
                let last = slice.iter().rev().find(|t| !is_trivia(t)).map(|t| t.span);
                match (first, last) {
                    (Some(f), Some(l)) => f.union(l),
                    _ => slice[0].span,
                }
            } else if let Some(token) = tokens[end_offset.min(tokens.len())..]
                .iter()
                .find(|t| !is_trivia(t))
            {
                token.span
            } else if let Some(token) = tokens[..end_offset.min(tokens.len())]
                .iter()
                .rev()
                .find(|t| !is_trivia(t))
            {
                token.span
            } else {
                Span::default()
            };

            Diagnostic::error(format!("syntax error: {message}"))
                .with_code(ErrorCode::E100)
                .with_label(error_span, "unexpected token")
                .with_help("check syntax and token positioning")
        }
        ErrMode::Incomplete(_) => {
            // Streaming input is not used; kept for completeness.
            let error_span = tokens
                .iter()
                .rev()
                .find(|t| !is_trivia(t))
                .map(|t| t.span)
                .unwrap_or_default();

            Diagnostic::error("incomplete input, more tokens expected")
                .with_code(ErrorCode::E101)
                .with_label(error_span, "incomplete")
                .with_help("ensure input is complete")
        }
    }
}

/// Build the statement list from tokens.
pub(crate) fn parse_statements<'src>(
    tokens: &'src [PositionedToken<'src>],
) -> Result<Vec<types::Statement<'src>>, Diagnostic> {
    let mut token_slice = TokenSlice::new(tokens);

    match program(&mut token_slice) {
        Ok(statements) => {
            log::debug!(count = statements.len(); "parsed statements");
            Ok(statements)
        }
        Err(e) => {
            let current_remaining = token_slice.eof_offset();
            Err(convert_error(e, tokens, current_remaining))
        }
    }
}
