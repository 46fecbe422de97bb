//! Shared chumsky parser utilities for source lexing
//!
//! This module provides the trivia combinators (whitespace, comments,
//! preprocessor lines) that the C# lexer skips between tokens.

use chumsky::prelude::*;

/// Parser extras used by every lexer combinator
pub type LexExtra<'src> = extra::Err<Rich<'src, char>>;

/// Parse required whitespace (at least one whitespace/newline character).
///
/// Uses explicit character matching to avoid the "repeated combinator making no progress"
/// issue.
pub fn whitespace_required<'src>() -> impl Parser<'src, &'src str, (), LexExtra<'src>> + Clone {
    any()
        .filter(|c: &char| c.is_whitespace() || *c == '\u{feff}')
        .repeated()
        .at_least(1)
        .ignored()
}

/// Parse a line comment (`//` to end of line).
pub fn line_comment<'src>() -> impl Parser<'src, &'src str, (), LexExtra<'src>> + Clone {
    just("//").ignore_then(none_of('\n').repeated()).ignored()
}

/// Parse a block comment (`/* ... */`).
pub fn block_comment<'src>() -> impl Parser<'src, &'src str, (), LexExtra<'src>> + Clone {
    just("/*")
        .ignore_then(any().and_is(just("*/").not()).repeated())
        .then_ignore(just("*/"))
        .ignored()
}

/// Parse a preprocessor line (`#region`, `#if DEBUG`, ...).
pub fn preprocessor_line<'src>() -> impl Parser<'src, &'src str, (), LexExtra<'src>> + Clone {
    just('#').ignore_then(none_of('\n').repeated()).ignored()
}

/// Parse optional sequence of whitespace, comments and preprocessor lines.
///
/// Every alternative consumes at least one character, so the repetition
/// always makes progress.
pub fn trivia<'src>() -> impl Parser<'src, &'src str, (), LexExtra<'src>> + Clone {
    choice((
        whitespace_required(),
        line_comment(),
        block_comment(),
        preprocessor_line(),
    ))
    .repeated()
    .ignored()
}
