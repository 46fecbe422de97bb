//! Modifier encoding for type and member lines

use crate::core::{Modifier, TypeKind};

/// Keyword opening a type block: `class`, or `abstract class` when the
/// abstract modifier is present
pub fn type_keyword(kind: TypeKind, modifiers: &[Modifier]) -> String {
    if modifiers.contains(&Modifier::Abstract) {
        format!("abstract {}", kind.keyword())
    } else {
        kind.keyword().to_string()
    }
}

/// Stereotypes for a type declaration.
///
/// Visibility and `abstract` are dropped; the rest become `<<word>>`,
/// space-joined, followed by one space when anything was written.
pub fn type_modifier_flags(modifiers: &[Modifier]) -> String {
    let flags: Vec<String> = modifiers
        .iter()
        .filter(|m| !m.is_visibility() && **m != Modifier::Abstract)
        .map(|m| stereotype(*m))
        .collect();

    if flags.is_empty() {
        String::new()
    } else {
        format!("{} ", flags.join(" "))
    }
}

/// Decorations for a member line, in declaration order, space-joined
/// without a trailing separator
pub fn member_modifier_flags(modifiers: &[Modifier]) -> String {
    modifiers
        .iter()
        .map(|m| member_flag(*m))
        .collect::<Vec<_>>()
        .join(" ")
}

/// The decoration for one member modifier
pub fn member_flag(modifier: Modifier) -> String {
    match modifier {
        Modifier::Public => "+".to_string(),
        Modifier::Private => "-".to_string(),
        Modifier::Protected => "#".to_string(),
        Modifier::Abstract | Modifier::Static => format!("{{{}}}", modifier.keyword()),
        _ => stereotype(modifier),
    }
}

fn stereotype(modifier: Modifier) -> String {
    format!("<<{}>>", modifier.keyword())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_keyword() {
        assert_eq!(type_keyword(TypeKind::Class, &[Modifier::Public]), "class");
        assert_eq!(
            type_keyword(TypeKind::Class, &[Modifier::Public, Modifier::Abstract]),
            "abstract class"
        );
        assert_eq!(type_keyword(TypeKind::Record, &[]), "record");
    }

    #[test]
    fn test_type_flags_suppress_visibility_and_abstract() {
        assert_eq!(
            type_modifier_flags(&[Modifier::Public, Modifier::Abstract]),
            ""
        );
        assert_eq!(
            type_modifier_flags(&[Modifier::Internal, Modifier::Sealed, Modifier::Partial]),
            "<<sealed>> <<partial>> "
        );
        assert_eq!(type_modifier_flags(&[]), "");
    }

    #[test]
    fn test_member_flags() {
        assert_eq!(member_modifier_flags(&[Modifier::Public]), "+");
        assert_eq!(
            member_modifier_flags(&[Modifier::Internal, Modifier::Static]),
            "<<internal>> {static}"
        );
        assert_eq!(
            member_modifier_flags(&[Modifier::Protected, Modifier::Abstract]),
            "# {abstract}"
        );
        assert_eq!(member_modifier_flags(&[]), "");
    }

    #[test]
    fn test_every_modifier_has_a_member_flag() {
        for modifier in Modifier::ALL {
            assert!(!member_flag(modifier).is_empty(), "{:?}", modifier);
        }
    }
}
