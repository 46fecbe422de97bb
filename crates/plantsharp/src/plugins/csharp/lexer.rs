//! C# lexer using chumsky
//!
//! Splits source text into identifier, literal and punctuation tokens.
//! Comments, whitespace and preprocessor lines are dropped as trivia.
//! Literals are kept as opaque slices so braces inside strings never reach
//! the declaration parser.

use std::borrow::Cow;
use std::fmt;

use chumsky::prelude::*;

use crate::core::chumsky_utils::{trivia, LexExtra};
use crate::core::{line_column, DiagramError, DiagramResult};

/// A token with its byte span in the source
pub type Spanned<T> = (T, SimpleSpan);

/// A lexical token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'src> {
    /// Identifier or keyword, verbatim identifiers keep their `@`
    Ident(&'src str),
    /// String, character or numeric literal as written
    Literal(&'src str),
    /// `=>`
    FatArrow,
    /// Any other single character
    Punct(char),
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(word) => write!(f, "'{}'", word),
            Token::Literal(_) => write!(f, "literal"),
            Token::FatArrow => write!(f, "'=>'"),
            Token::Punct(c) => write!(f, "'{}'", c),
        }
    }
}

fn escaped_char<'src>() -> impl Parser<'src, &'src str, (), LexExtra<'src>> + Clone {
    just('\\').ignore_then(any()).ignored()
}

/// `"""raw"""`, optionally `$`-prefixed for interpolation
fn raw_string<'src>() -> impl Parser<'src, &'src str, &'src str, LexExtra<'src>> + Clone {
    just('$')
        .repeated()
        .then(just("\"\"\""))
        .then(any().and_is(just("\"\"\"").not()).repeated())
        .then(just("\"\"\""))
        .to_slice()
        .labelled("raw string")
}

/// `@"verbatim"` with `""` as the only escape
fn verbatim_string<'src>() -> impl Parser<'src, &'src str, &'src str, LexExtra<'src>> + Clone {
    just('@')
        .then(just('"'))
        .then(
            choice((just("\"\"").ignored(), none_of('"').ignored()))
                .repeated(),
        )
        .then(just('"'))
        .to_slice()
        .labelled("verbatim string")
}

/// `"regular"` strings
fn regular_string<'src>() -> impl Parser<'src, &'src str, &'src str, LexExtra<'src>> + Clone {
    just('"')
        .then(choice((escaped_char(), none_of("\\\"\n").ignored())).repeated())
        .then(just('"'))
        .to_slice()
        .labelled("string")
}

fn char_literal<'src>() -> impl Parser<'src, &'src str, &'src str, LexExtra<'src>> + Clone {
    just('\'')
        .then(choice((escaped_char(), none_of("\\'\n").ignored())).repeated())
        .then(just('\''))
        .to_slice()
        .labelled("character literal")
}

/// Any string or character literal.
///
/// Interpolation holes in `$"..."` and `$@"..."` are lexed recursively:
/// quotes, braces and nested literals inside `{...}` stay part of the
/// enclosing literal. `{{` and `}}` outside a hole are escaped braces.
fn literal<'src>() -> impl Parser<'src, &'src str, &'src str, LexExtra<'src>> + Clone {
    recursive(|literal| {
        let hole = recursive(|hole| {
            just('{')
                .then(
                    choice((
                        literal.clone().ignored(),
                        hole.ignored(),
                        none_of("{}\"'").ignored(),
                    ))
                    .repeated(),
                )
                .then(just('}'))
                .ignored()
        });

        let brace_escape = choice((just("{{"), just("}}"))).ignored();

        let interpolated_verbatim = choice((just("@$"), just("$@")))
            .then(just('"'))
            .then(
                choice((
                    just("\"\"").ignored(),
                    brace_escape.clone(),
                    hole.clone(),
                    none_of("\"{").ignored(),
                ))
                .repeated(),
            )
            .then(just('"'))
            .to_slice()
            .labelled("interpolated verbatim string");

        let interpolated = just('$')
            .then(just('"'))
            .then(
                choice((
                    escaped_char(),
                    brace_escape,
                    hole,
                    none_of("\\\"{\n").ignored(),
                ))
                .repeated(),
            )
            .then(just('"'))
            .to_slice()
            .labelled("interpolated string");

        // Raw strings must win over `$"` and `"`
        choice((
            raw_string(),
            interpolated_verbatim,
            verbatim_string(),
            interpolated,
            regular_string(),
            char_literal(),
        ))
    })
}

fn number<'src>() -> impl Parser<'src, &'src str, &'src str, LexExtra<'src>> + Clone {
    any()
        .filter(|c: &char| c.is_ascii_digit())
        .then(
            any()
                .filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_' || *c == '.')
                .repeated(),
        )
        .to_slice()
        .labelled("number")
}

fn identifier<'src>() -> impl Parser<'src, &'src str, &'src str, LexExtra<'src>> + Clone {
    just('@')
        .or_not()
        .then(text::ident())
        .to_slice()
        .labelled("identifier")
}

/// Build the token stream parser
pub fn lexer<'src>() -> impl Parser<'src, &'src str, Vec<Spanned<Token<'src>>>, LexExtra<'src>> {
    // Order matters: string forms must win over `@`, `$` and `"` punctuation
    let token = choice((
        literal().map(Token::Literal),
        number().map(Token::Literal),
        just("=>").to(Token::FatArrow),
        identifier().map(Token::Ident),
        // Quotes only ever start literals
        none_of("\"'").map(Token::Punct),
    ));

    trivia()
        .ignore_then(
            token
                .map_with(|tok, extra| (tok, extra.span()))
                .then_ignore(trivia())
                .repeated()
                .collect(),
        )
        .then_ignore(end())
}

/// Tokenize a source unit
pub fn tokenize(source: &str) -> DiagramResult<Vec<Spanned<Token<'_>>>> {
    lexer().parse(source).into_result().map_err(|errors| {
        let first = errors.into_iter().next();
        let offset = first.as_ref().map(|e| e.span().start).unwrap_or(0);
        let message = first
            .map(|e| e.to_string())
            .unwrap_or_else(|| "unrecognised input".to_string());
        let (line, column) = line_column(source, offset);
        DiagramError::parse_error(message, line, column)
    })
}

/// Blank out every conditional-compilation branch after the first.
///
/// Lines inside an `#elif` or `#else` branch (up to the matching
/// `#endif`) are replaced by spaces, so byte offsets and line numbers are
/// unchanged. Directive lines themselves are left for the lexer to drop
/// as trivia.
pub fn mask_inactive_branches(source: &str) -> Cow<'_, str> {
    if !source.contains('#') {
        return Cow::Borrowed(source);
    }

    // One entry per open `#if`: true while still in its first branch
    let mut groups: Vec<bool> = Vec::new();
    let mut masked = String::with_capacity(source.len());

    for line in source.split_inclusive('\n') {
        match directive_name(line) {
            Some("if") => groups.push(true),
            Some("elif" | "else") => {
                if let Some(first) = groups.last_mut() {
                    *first = false;
                }
            }
            Some("endif") => {
                groups.pop();
            }
            _ => {
                if groups.iter().any(|first| !first) {
                    masked.extend(line.chars().map(|c| match c {
                        '\n' | '\r' => c,
                        _ => ' ',
                    }));
                    // Keep byte offsets for multi-byte characters
                    let padding = line.len() - line.chars().count();
                    masked.extend(std::iter::repeat(' ').take(padding));
                    continue;
                }
            }
        }
        masked.push_str(line);
    }

    Cow::Owned(masked)
}

/// `if` for a line like `  #  if DEBUG`
fn directive_name(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix('#')?.trim_start();
    let end = rest
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(rest.len());
    Some(&rest[..end])
}
