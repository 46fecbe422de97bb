//! C# front end
//!
//! A chumsky lexer and a declaration-level recursive descent parser
//! producing the [`SyntaxTree`](crate::core::SyntaxTree) the emitter walks.

mod lexer;
mod parser;

pub use lexer::{mask_inactive_branches, tokenize, Spanned, Token};
pub use parser::CSharpParser;
