//! Lexer for the Turtle subset the ontology codec reads.
//!
//! Covers what hand-written and generated OWL documents use in practice:
//! `@prefix`/`@base` directives, IRIs, prefixed names, the `a` keyword,
//! string literals with escapes, language tags, `^^` datatypes, numbers,
//! booleans, `;`, `,`, `.` and `#` comments. Blank nodes, collections and
//! long (triple-quoted) strings are rejected.

use chumsky::prelude::*;

/// A Turtle token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'src> {
    PrefixDirective,
    BaseDirective,
    /// `<...>`, without the angle brackets.
    Iri(&'src str),
    /// `prefix:local`. Either part may be empty.
    PrefixedName(&'src str, &'src str),
    /// String literal, escapes already resolved.
    Str(String),
    /// `@en`, without the `@`.
    LangTag(&'src str),
    /// `^^`
    DatatypeMarker,
    Number(&'src str),
    Bool(bool),
    /// The `a` keyword (`rdf:type`).
    A,
    Semicolon,
    Comma,
    Dot,
}

/// Creates the Turtle lexer.
pub fn lexer<'src>(
) -> impl Parser<'src, &'src str, Vec<(Token<'src>, SimpleSpan)>, extra::Err<Rich<'src, char>>> {
    let directive = choice((
        just("@prefix").to(Token::PrefixDirective),
        just("@base").to(Token::BaseDirective),
    ));

    // IRIs: <...> with no whitespace or reserved characters inside
    let iri = just('<')
        .ignore_then(none_of("<>\"{}|^`\\ \t\r\n").repeated().to_slice())
        .then_ignore(just('>'))
        .map(Token::Iri);

    let escape = just('\\').ignore_then(choice((
        just('\\'),
        just('"'),
        just('\''),
        just('n').to('\n'),
        just('r').to('\r'),
        just('t').to('\t'),
    )));
    let string_lit = none_of("\\\"\n")
        .or(escape)
        .repeated()
        .collect::<String>()
        .delimited_by(just('"'), just('"'))
        .map(Token::Str);

    let lang_tag = just('@')
        .ignore_then(
            any()
                .filter(|c: &char| c.is_ascii_alphabetic())
                .repeated()
                .at_least(1)
                .then(
                    just('-')
                        .then(any().filter(|c: &char| c.is_ascii_alphanumeric()).repeated().at_least(1))
                        .repeated(),
                )
                .to_slice(),
        )
        .map(Token::LangTag);

    // Prefixed names: [prefix]:[local]
    let name_char = any().filter(|c: &char| c.is_alphanumeric() || *c == '_' || *c == '-');
    let prefix = any()
        .filter(|c: &char| c.is_alphabetic())
        .then(name_char.clone().repeated())
        .to_slice()
        .or_not();
    let local = name_char.repeated().to_slice();
    let prefixed_name = prefix
        .then_ignore(just(':'))
        .then(local)
        .map(|(prefix, local): (Option<&str>, &str)| Token::PrefixedName(prefix.unwrap_or(""), local));

    let number = one_of("+-")
        .or_not()
        .then(text::digits(10))
        .then(just('.').then(text::digits(10)).or_not())
        .to_slice()
        .map(Token::Number);

    // Bare words: only `a`, `true` and `false` are meaningful
    let word = text::ident().try_map(|word: &str, span| match word {
        "a" => Ok(Token::A),
        "true" => Ok(Token::Bool(true)),
        "false" => Ok(Token::Bool(false)),
        other => Err(Rich::custom(span, format!("unexpected word '{}'", other))),
    });

    let punct = choice((
        just("^^").to(Token::DatatypeMarker),
        just(';').to(Token::Semicolon),
        just(',').to(Token::Comma),
        just('.').to(Token::Dot),
    ));

    let comment = just('#')
        .then(any().and_is(just('\n').not()).repeated())
        .ignored();

    let token = choice((
        directive,
        lang_tag,
        iri,
        string_lit,
        prefixed_name,
        number,
        word,
        punct,
    ))
    .map_with(|tok, e| (tok, e.span()));

    token
        .padded_by(comment.padded().repeated())
        .padded()
        .repeated()
        .collect()
        .padded_by(comment.padded().repeated())
        .padded()
        .then_ignore(end())
}

/// Lex a Turtle document.
pub fn lex(source: &str) -> Result<Vec<(Token<'_>, SimpleSpan)>, Vec<Rich<'_, char>>> {
    let (tokens, errs) = lexer().parse(source).into_output_errors();
    if errs.is_empty() {
        Ok(tokens.unwrap_or_default())
    } else {
        Err(errs)
    }
}
