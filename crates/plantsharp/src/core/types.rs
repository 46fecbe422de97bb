//! Core type definitions for diagram generation
//!
//! This module contains the declaration vocabulary shared by the front end
//! and the emitter: declaration modifiers and type kinds.

use serde::Serialize;
use std::fmt;

/// A declaration modifier as written in source
///
/// Modifiers keep their declaration order; the emitter maps every one of
/// them to exactly one diagram decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Public,
    Private,
    Protected,
    Internal,
    Abstract,
    Static,
    Sealed,
    Partial,
    Virtual,
    Override,
    Readonly,
    Const,
    Extern,
    Unsafe,
    New,
    Async,
    Volatile,
    Required,
    File,
    Ref,
}

impl Modifier {
    /// Every modifier the front end recognises
    pub const ALL: [Modifier; 20] = [
        Modifier::Public,
        Modifier::Private,
        Modifier::Protected,
        Modifier::Internal,
        Modifier::Abstract,
        Modifier::Static,
        Modifier::Sealed,
        Modifier::Partial,
        Modifier::Virtual,
        Modifier::Override,
        Modifier::Readonly,
        Modifier::Const,
        Modifier::Extern,
        Modifier::Unsafe,
        Modifier::New,
        Modifier::Async,
        Modifier::Volatile,
        Modifier::Required,
        Modifier::File,
        Modifier::Ref,
    ];

    /// Look up a modifier by its source keyword
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.keyword() == keyword)
    }

    /// The source keyword of this modifier
    pub fn keyword(self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Private => "private",
            Modifier::Protected => "protected",
            Modifier::Internal => "internal",
            Modifier::Abstract => "abstract",
            Modifier::Static => "static",
            Modifier::Sealed => "sealed",
            Modifier::Partial => "partial",
            Modifier::Virtual => "virtual",
            Modifier::Override => "override",
            Modifier::Readonly => "readonly",
            Modifier::Const => "const",
            Modifier::Extern => "extern",
            Modifier::Unsafe => "unsafe",
            Modifier::New => "new",
            Modifier::Async => "async",
            Modifier::Volatile => "volatile",
            Modifier::Required => "required",
            Modifier::File => "file",
            Modifier::Ref => "ref",
        }
    }

    /// Returns true for visibility modifiers
    pub fn is_visibility(self) -> bool {
        matches!(
            self,
            Modifier::Public | Modifier::Private | Modifier::Protected | Modifier::Internal
        )
    }

    /// Returns true for keywords that are only modifiers in front of
    /// another identifier (`partial`, `async`, `required`, `file`, `ref`)
    pub fn is_contextual(self) -> bool {
        matches!(
            self,
            Modifier::Partial
                | Modifier::Async
                | Modifier::Required
                | Modifier::File
                | Modifier::Ref
        )
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// The kind of a class-like declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Struct,
    Record,
}

impl TypeKind {
    /// Look up a type kind by its declaration keyword
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "class" => Some(TypeKind::Class),
            "interface" => Some(TypeKind::Interface),
            "struct" => Some(TypeKind::Struct),
            "record" => Some(TypeKind::Record),
            _ => None,
        }
    }

    /// The declaration keyword of this kind
    pub fn keyword(self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Struct => "struct",
            TypeKind::Record => "record",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
