//! Core error types for diagram generation
//!
//! This module defines the error taxonomy shared by the C# front end and the
//! PlantUML emitter. Every failure is terminal for the current call.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the library
pub type DiagramResult<T> = std::result::Result<T, DiagramError>;

/// Core error types for diagram generation
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Parse error: {message} at line {line}, column {column}")]
    ParseError {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Namespace '{namespace}' is not inside root namespace '{root_namespace}'")]
    RootNamespaceMismatch {
        namespace: String,
        root_namespace: String,
    },

    #[error("Namespace '{namespace}' is the root namespace and has no module name")]
    EmptyModuleName { namespace: String },

    #[error("Style error: cannot read '{}': {source}", path.display())]
    StyleError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Syntax tree error: {message}")]
    TreeError { message: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl DiagramError {
    /// Create a new parse error
    pub fn parse_error(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::ParseError {
            message: message.into(),
            line,
            column,
        }
    }

    /// Create a new configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new syntax tree error
    pub fn tree_error(message: impl Into<String>) -> Self {
        Self::TreeError {
            message: message.into(),
        }
    }

    /// Create a root namespace mismatch error
    pub fn root_namespace_mismatch(namespace: &str, root_namespace: &str) -> Self {
        Self::RootNamespaceMismatch {
            namespace: namespace.to_string(),
            root_namespace: root_namespace.to_string(),
        }
    }

    /// Returns true if the error comes from malformed source text
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::ParseError { .. })
    }

    /// Returns true if the error comes from the generator configuration
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigError { .. }
                | Self::RootNamespaceMismatch { .. }
                | Self::EmptyModuleName { .. }
                | Self::StyleError { .. }
        )
    }
}

/// Convert a byte offset into a 1-based (line, column) pair
pub fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = source.get(..offset).unwrap_or(source);
    let line = before.matches('\n').count() + 1;
    let column = match before.rfind('\n') {
        Some(newline) => before[newline + 1..].chars().count() + 1,
        None => before.chars().count() + 1,
    };
    (line, column)
}
