//! Core abstractions for diagram generation
//!
//! This module defines the vocabulary shared by source front ends and the
//! diagram emitter: the syntax tree, declaration modifiers, errors and
//! logging.

pub mod chumsky_utils;
mod error;
pub mod logging;
mod syntax;
mod types;

pub use error::*;
pub use logging::*;
pub use syntax::*;
pub use types::*;
