//! Syntax tree and parser abstraction
//!
//! The emitter consumes a declaration-level syntax tree. Parsers for a
//! source language produce it through the [`SyntaxParser`] trait.

use serde::Serialize;

use super::{DiagramResult, Modifier, TypeKind};

/// One parsed compilation unit
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SyntaxTree {
    /// Top-level declarations in document order
    pub members: Vec<SyntaxNode>,
}

impl SyntaxTree {
    pub fn new(members: Vec<SyntaxNode>) -> Self {
        Self { members }
    }

    /// Count every node in the tree, nested ones included
    pub fn node_count(&self) -> usize {
        self.members.iter().map(SyntaxNode::node_count).sum()
    }
}

/// A declaration node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum SyntaxNode {
    Namespace(NamespaceDecl),
    Type(TypeDecl),
    Enum(EnumDecl),
    Method(MethodDecl),
}

impl SyntaxNode {
    /// The declared identifier of this node
    pub fn name(&self) -> &str {
        match self {
            SyntaxNode::Namespace(ns) => &ns.name,
            SyntaxNode::Type(ty) => &ty.name,
            SyntaxNode::Enum(en) => &en.name,
            SyntaxNode::Method(method) => &method.name,
        }
    }

    /// Child declarations, empty for leaves
    pub fn children(&self) -> &[SyntaxNode] {
        match self {
            SyntaxNode::Namespace(ns) => &ns.members,
            SyntaxNode::Type(ty) => &ty.members,
            SyntaxNode::Enum(_) | SyntaxNode::Method(_) => &[],
        }
    }

    fn node_count(&self) -> usize {
        1 + self.children().iter().map(SyntaxNode::node_count).sum::<usize>()
    }
}

/// `namespace Name { ... }` or `namespace Name;`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamespaceDecl {
    /// Dotted name as written (not qualified by enclosing namespaces)
    pub name: String,
    pub members: Vec<SyntaxNode>,
}

impl NamespaceDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn with_member(mut self, member: SyntaxNode) -> Self {
        self.members.push(member);
        self
    }
}

/// A class, interface, struct or record declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDecl {
    pub kind: TypeKind,
    pub name: String,
    /// Generic parameter list exactly as written, angle brackets included
    pub type_parameters: Option<String>,
    pub modifiers: Vec<Modifier>,
    pub members: Vec<SyntaxNode>,
}

impl TypeDecl {
    pub fn new(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            type_parameters: None,
            modifiers: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn with_type_parameters(mut self, parameters: impl Into<String>) -> Self {
        self.type_parameters = Some(parameters.into());
        self
    }

    pub fn with_modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers.extend(modifiers);
        self
    }

    pub fn with_member(mut self, member: SyntaxNode) -> Self {
        self.members.push(member);
        self
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }
}

/// An enum declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumDecl {
    pub name: String,
    pub modifiers: Vec<Modifier>,
    pub variants: Vec<String>,
}

impl EnumDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Vec::new(),
            variants: Vec::new(),
        }
    }

    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variants.push(variant.into());
        self
    }
}

/// A method declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDecl {
    pub name: String,
    /// Return type exactly as written
    pub return_type: String,
    pub parameters: Vec<Parameter>,
    pub modifiers: Vec<Modifier>,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            parameters: Vec::new(),
            modifiers: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.parameters.push(Parameter {
            name: name.into(),
            type_name: type_name.into(),
        });
        self
    }

    pub fn with_modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers.extend(modifiers);
        self
    }
}

/// A method parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    /// Parameter type exactly as written, without `ref`/`out`/`params`
    pub type_name: String,
}

/// Trait for turning source text into a [`SyntaxTree`]
///
/// The emitter never parses on its own; it delegates to an implementation
/// of this trait so alternative front ends can be plugged in.
pub trait SyntaxParser: Send + Sync {
    /// Parse one source unit
    fn parse(&self, input: &str) -> DiagramResult<SyntaxTree>;

    /// Get the name of this syntax parser
    fn name(&self) -> &'static str;

    /// Get the version of this syntax parser
    fn version(&self) -> &'static str;

    /// Check if the input looks like something this parser understands
    fn can_parse(&self, input: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let method = MethodDecl::new("Bar", "int")
            .with_parameter("x", "int")
            .with_modifiers([Modifier::Public]);
        let ty = TypeDecl::new(TypeKind::Class, "Foo")
            .with_type_parameters("<T>")
            .with_modifiers([Modifier::Public, Modifier::Sealed])
            .with_member(SyntaxNode::Method(method));

        assert!(ty.has_modifier(Modifier::Sealed));
        assert!(!ty.has_modifier(Modifier::Abstract));
        assert_eq!(ty.type_parameters.as_deref(), Some("<T>"));
        assert_eq!(ty.members.len(), 1);
        assert_eq!(ty.members[0].name(), "Bar");
    }

    #[test]
    fn test_node_count() {
        let tree = SyntaxTree::new(vec![SyntaxNode::Namespace(
            NamespaceDecl::new("A.B").with_member(SyntaxNode::Type(
                TypeDecl::new(TypeKind::Class, "Foo")
                    .with_member(SyntaxNode::Method(MethodDecl::new("Run", "void"))),
            )),
        )]);
        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.members[0].children().len(), 1);
    }

    #[test]
    fn test_syntax_node_variants() {
        let node = SyntaxNode::Enum(EnumDecl::new("Color").with_variant("Red"));
        match node {
            SyntaxNode::Enum(en) => assert_eq!(en.variants, vec!["Red".to_string()]),
            _ => panic!("Expected Enum variant"),
        }
    }
}
