//! Lexical analyzer for Ontol source text.
//!
//! The lexer converts source text into a stream of [`Token`]s for parsing.
//! It handles whitespace, `#` comments, quoted strings and the language
//! tokens defined in the [`tokens`](crate::tokens) module.
//!
//! The public entry point is [`tokenize`], which performs error-recovering
//! lexical analysis and collects all diagnostics in a single pass.

use winnow::{
    Parser as _,
    combinator::{alt, cut_err, not, peek, preceded, terminated},
    error::{ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{literal, one_of, take_while},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
    tokens::{PositionedToken, Token},
};

/// Rich diagnostic information for lexer errors.
///
/// Attached to winnow errors via `.context()` so the recovery loop can
/// surface a precise message and span.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LexerDiagnostic {
    code: ErrorCode,
    message: &'static str,
    help: Option<&'static str>,
    /// The error span covers from `start` to the error position.
    start: usize,
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError<LexerDiagnostic>>;

/// Parse a string literal delimited by single or double quotes.
///
/// Ontol strings carry no escape sequences and may not span lines; the
/// delimiters are stripped. A quote left open at the end of the line is an
/// unterminated-string error.
fn string_literal<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let start_pos = input.current_token_start();

    let quote = one_of(['\'', '"']).parse_next(input)?;

    // Committed after the opening quote: a missing closer is fatal, not a
    // different token.
    cut_err(terminated(
        take_while(0.., move |c: char| c != quote && c != '\n'),
        quote,
    ))
    .context(LexerDiagnostic {
        code: ErrorCode::E001,
        message: "unterminated string literal",
        help: Some("add the closing quote before the end of the line"),
        start: start_pos,
    })
    .map(|s: &str| Token::StringLiteral(s.to_owned()))
    .parse_next(input)
}

/// Parse a line comment starting with '#'.
fn line_comment<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    preceded("#", take_while(0.., |c| c != '\n'))
        .map(Token::LineComment)
        .parse_next(input)
}

/// Parse block keywords with word boundary checking.
fn keyword<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    terminated(
        alt((
            literal("types"),
            literal("functions"),
            literal("hierarchy"),
            literal("figure"),
            literal("import"),
            literal("from"),
            literal("as"),
        )),
        // A keyword may not run into identifier characters ("association"
        // is an identifier, not `as` + "sociation").
        peek(not(one_of(|c: char| c.is_ascii_alphanumeric() || c == '_'))),
    )
    .map(|keyword: &str| match keyword {
        "types" => Token::Types,
        "functions" => Token::Functions,
        "hierarchy" => Token::Hierarchy,
        "figure" => Token::Figure,
        "import" => Token::Import,
        "from" => Token::From,
        "as" => Token::As,
        _ => unreachable!(),
    })
    .parse_next(input)
}

/// Parse identifiers: `[a-zA-Z_][a-zA-Z0-9_]*`.
fn identifier<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    take_while(1.., |c: char| {
        c.is_ascii_alphabetic() || c == '_' || c.is_ascii_digit()
    })
    .verify(|s: &str| {
        s.chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
    })
    .map(Token::Identifier)
    .parse_next(input)
}

/// Parse single character tokens and the arrow.
fn punctuation<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    alt((
        literal("->").value(Token::Arrow),
        ':'.value(Token::Colon),
        ','.value(Token::Comma),
        '{'.value(Token::LeftBrace),
        '}'.value(Token::RightBrace),
        '('.value(Token::LeftParen),
        ')'.value(Token::RightParen),
        '*'.value(Token::Star),
    ))
    .parse_next(input)
}

/// Parse whitespace (spaces, tabs, etc. but not newlines).
fn whitespace<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    take_while(1.., |c: char| c.is_whitespace() && c != '\n')
        .value(Token::Whitespace)
        .parse_next(input)
}

/// Parse a newline. Newlines terminate statements and are significant.
fn newline<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    '\n'.value(Token::Newline).parse_next(input)
}

/// Parse a single token with position tracking.
fn positioned_token<'a>(input: &mut Input<'a>) -> IResult<PositionedToken<'a>> {
    let start_pos = input.current_token_start();

    let token = alt((
        line_comment,   // Must come before punctuation
        string_literal, // Must come before any single char
        keyword,        // Must come before identifier
        identifier,
        punctuation,
        newline, // Must come before whitespace
        whitespace,
    ))
    .parse_next(input)?;

    let end_pos = input.current_token_start();
    let span = Span::new(start_pos..end_pos);

    Ok(PositionedToken::new(token, span))
}

/// Lexer that accumulates tokens and diagnostics during tokenization.
struct Lexer<'a> {
    tokens: Vec<PositionedToken<'a>>,
    diagnostics: DiagnosticCollector,
}

impl<'a> Lexer<'a> {
    fn new() -> Self {
        Self {
            tokens: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    /// Tokenize the input, collecting tokens and errors.
    fn tokenize(&mut self, mut input: Input<'a>) {
        while !input.is_empty() {
            match positioned_token(&mut input) {
                Ok(token) => {
                    self.tokens.push(token);
                }
                Err(e) => {
                    let error_pos = input.current_token_start();
                    let offending = {
                        let mut probe = input.clone();
                        probe.next_token()
                    };

                    let diagnostic = Self::convert_err_mode(e, error_pos, offending);
                    self.diagnostics.emit(diagnostic);

                    // Skip one character and keep scanning so a single pass
                    // reports every bad character.
                    if !input.is_empty() {
                        input.next_token();
                    }
                }
            }
        }
    }

    /// Finish lexing and return tokens or collected errors.
    fn finish(self) -> Result<Vec<PositionedToken<'a>>, ParseError> {
        self.diagnostics.finish().map(|_warnings| self.tokens)
    }

    /// Convert an ErrMode and error position to a Diagnostic.
    ///
    /// Uses the `LexerDiagnostic` context when present (unterminated
    /// string); otherwise falls back to E002 naming the offending
    /// character.
    fn convert_err_mode(
        err: ErrMode<ContextError<LexerDiagnostic>>,
        error_pos: usize,
        offending: Option<char>,
    ) -> Diagnostic {
        let context_error = match err {
            ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
            ErrMode::Incomplete(_) => ContextError::new(),
        };

        if let Some(LexerDiagnostic {
            code,
            message,
            help,
            start,
        }) = context_error.context().next()
        {
            let span = Span::new(*start..error_pos);

            let mut diag = Diagnostic::error(*message)
                .with_code(*code)
                .with_label(span, code.description());
            if let Some(h) = help {
                diag = diag.with_help(*h);
            }
            return diag;
        }

        let span = Span::new(error_pos..error_pos.saturating_add(1));
        let message = match offending {
            Some(c) => format!("unexpected character '{c}'"),
            None => "unexpected end of input".to_owned(),
        };
        Diagnostic::error(message)
            .with_code(ErrorCode::E002)
            .with_label(span, ErrorCode::E002.description())
    }
}

/// Parse tokens from a string input, collecting multiple errors.
///
/// Attempts to recover from errors and continue tokenizing, so every
/// lexical problem in the file is reported in one pass. Any error makes the
/// whole tokenization fail.
///
/// # Returns
///
/// - `Ok(tokens)` - All tokens successfully parsed
/// - `Err(ParseError)` - One or more errors occurred; contains all diagnostics
pub fn tokenize(input: &str) -> Result<Vec<PositionedToken<'_>>, ParseError> {
    let located_input = LocatingSlice::new(input);
    let mut lexer = Lexer::new();
    lexer.tokenize(located_input);
    let tokens = lexer.finish()?;
    log::trace!(count = tokens.len(); "tokenized source");
    Ok(tokens)
}
