//! Plantsharp - Generate PlantUML class diagrams from C# sources
//!
//! A library for parsing the declaration skeleton of C# code (namespaces,
//! classes, methods, modifiers) and emitting it as a PlantUML class diagram.
//!
//! # Quick Start
//!
//! ```rust
//! use plantsharp::generate_to_string;
//!
//! let source = "namespace A.B { public class Foo { public int Bar(int x) { return x; } } }";
//! let uml = generate_to_string(&[source], "A").unwrap();
//! assert!(uml.contains("package B {"));
//! assert!(uml.contains("+Bar(x:int) : int"));
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual components:
//!
//! ```rust
//! use plantsharp::prelude::*;
//!
//! let source = "namespace Shop.Orders { public sealed class Order { } }";
//!
//! // Parse into a syntax tree
//! let tree = CSharpParser::new().parse(source).unwrap();
//! assert_eq!(tree.node_count(), 2);
//!
//! // Emit with a styled header into any writer
//! let config = GeneratorConfig::new("Shop").with_stylesheet("skinparam monochrome true");
//! let generator = PlantUmlGenerator::new(config);
//! let mut out = Vec::new();
//! generator.generate(&[source], &mut out).unwrap();
//!
//! let uml = String::from_utf8(out).unwrap();
//! assert!(uml.contains("class Order <<sealed>> {"));
//! ```

pub mod core;
pub mod plugins;

pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        DiagramError, DiagramResult, Modifier, SyntaxNode, SyntaxParser, SyntaxTree, TypeKind,
    };
    pub use crate::plugins::csharp::CSharpParser;
    pub use crate::plugins::plantuml::{GeneratorConfig, HeaderStyle, PlantUmlGenerator};
}

/// Generate a PlantUML class diagram from C# sources
///
/// Uses the breadcrumb header with `root_namespace` stripped from every
/// namespace. Pass `""` to keep namespaces unchanged.
///
/// # Example
/// ```rust
/// use plantsharp::generate_to_string;
///
/// let uml = generate_to_string(&["class Loose { }"], "").unwrap();
/// assert!(uml.starts_with("@startuml\n"));
/// assert!(uml.ends_with("@enduml\n"));
/// ```
pub fn generate_to_string<S: AsRef<str>>(
    sources: &[S],
    root_namespace: &str,
) -> DiagramResult<String> {
    use crate::plugins::plantuml::{GeneratorConfig, PlantUmlGenerator};

    PlantUmlGenerator::new(GeneratorConfig::new(root_namespace)).render_document(sources)
}

/// Parse one C# source into a syntax tree without generating a diagram
///
/// # Example
/// ```rust
/// use plantsharp::{parse, SyntaxNode};
///
/// let tree = parse("namespace A { class B { void C() { } } }").unwrap();
/// assert!(matches!(tree.members[0], SyntaxNode::Namespace(_)));
/// ```
pub fn parse(input: &str) -> DiagramResult<SyntaxTree> {
    use crate::plugins::csharp::CSharpParser;

    CSharpParser::new().parse(input)
}
