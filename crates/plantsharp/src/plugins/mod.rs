//! Plugin implementations for source front ends and diagram emitters
//!
//! `csharp` turns C# text into a syntax tree; `plantuml` turns syntax
//! trees into a PlantUML class diagram.

pub mod csharp;
pub mod plantuml;

pub use csharp::*;
pub use plantuml::*;
