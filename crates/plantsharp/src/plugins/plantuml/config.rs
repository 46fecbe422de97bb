//! Generator configuration and module-name derivation

use std::fs;
use std::path::Path;

use crate::core::{DiagramError, DiagramResult};

/// How the document header and package decorations are written
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HeaderStyle {
    /// `allow_mixing`, one artifact per root-namespace segment, and an
    /// arrow from the last segment to every package
    #[default]
    Breadcrumb,
    /// A verbatim stylesheet, a `header Generated ...` line, and a dated
    /// caption before every package
    Styled { stylesheet: String },
}

/// Configuration for one [`PlantUmlGenerator`](super::PlantUmlGenerator)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GeneratorConfig {
    /// Namespace prefix stripped from every namespace to form module names.
    /// Empty means namespaces are used unchanged.
    pub root_namespace: String,
    pub header: HeaderStyle,
}

impl GeneratorConfig {
    pub fn new(root_namespace: impl Into<String>) -> Self {
        Self {
            root_namespace: root_namespace.into(),
            header: HeaderStyle::Breadcrumb,
        }
    }

    /// Use the styled header with the given stylesheet text
    pub fn with_stylesheet(mut self, stylesheet: impl Into<String>) -> Self {
        self.header = HeaderStyle::Styled {
            stylesheet: stylesheet.into(),
        };
        self
    }

    /// Use the styled header, reading the stylesheet from `path`
    pub fn with_style_path(self, path: impl AsRef<Path>) -> DiagramResult<Self> {
        let path = path.as_ref();
        let stylesheet = fs::read_to_string(path).map_err(|source| DiagramError::StyleError {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.with_stylesheet(stylesheet))
    }

    /// Check the root namespace is a well-formed dotted name
    pub fn validate(&self) -> DiagramResult<()> {
        validate_root_namespace(&self.root_namespace)
    }

    /// Segments of the root namespace, empty when no root is configured
    pub fn root_segments(&self) -> Vec<&str> {
        if self.root_namespace.is_empty() {
            Vec::new()
        } else {
            self.root_namespace.split('.').collect()
        }
    }
}

/// Validate a dotted root namespace such as `Company.Product`.
///
/// The empty string is valid and means "no root".
pub fn validate_root_namespace(root: &str) -> DiagramResult<()> {
    if root.is_empty() {
        return Ok(());
    }
    for segment in root.split('.') {
        if segment.is_empty() {
            return Err(DiagramError::config_error(format!(
                "Root namespace '{}' contains an empty segment",
                root
            )));
        }
        let mut chars = segment.chars();
        let starts_ok = chars
            .next()
            .is_some_and(|c| c.is_alphabetic() || c == '_');
        if !starts_ok || !chars.all(|c| c.is_alphanumeric() || c == '_') {
            return Err(DiagramError::config_error(format!(
                "Root namespace '{}' has invalid segment '{}'",
                root, segment
            )));
        }
    }
    Ok(())
}

/// Derive the package name for `namespace` by locating `root` and
/// keeping what follows it and its trailing `.`.
///
/// `root` must match whole segments, and its first occurrence wins. It
/// does not have to lead the namespace: `Company.Shop.Orders` under root
/// `Shop` maps to `Orders`.
///
/// ```
/// use plantsharp::plugins::plantuml::derive_module_name;
///
/// assert_eq!(derive_module_name("A.B", "A").unwrap(), "B");
/// assert_eq!(derive_module_name("A.B", "").unwrap(), "A.B");
/// assert_eq!(derive_module_name("X.A.B", "A").unwrap(), "B");
/// assert!(derive_module_name("X.B", "A").is_err());
/// ```
pub fn derive_module_name<'a>(namespace: &'a str, root: &str) -> DiagramResult<&'a str> {
    if root.is_empty() {
        return Ok(namespace);
    }

    let mut start = 0;
    loop {
        let rest = &namespace[start..];
        if let Some(after) = rest.strip_prefix(root) {
            if after.is_empty() {
                return Err(DiagramError::EmptyModuleName {
                    namespace: namespace.to_string(),
                });
            }
            if let Some(module) = after.strip_prefix('.') {
                return Ok(module);
            }
        }
        match rest.find('.') {
            Some(dot) => start += dot + 1,
            None => return Err(DiagramError::root_namespace_mismatch(namespace, root)),
        }
    }
}
