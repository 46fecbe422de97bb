//! Tests for core error types

use plantsharp::core::{line_column, DiagramError};
use std::error::Error;
use std::io;
use std::path::PathBuf;

#[test]
fn test_parse_error() {
    let error = DiagramError::parse_error("expected ';'".to_string(), 5, 10);
    let error_msg = format!("{}", error);
    assert!(error_msg.contains("Parse error"));
    assert!(error_msg.contains("expected ';'"));
    assert!(error_msg.contains("line 5"));
    assert!(error_msg.contains("column 10"));
    assert!(error.is_parse_error());
    assert!(!error.is_config_error());
}

#[test]
fn test_config_error() {
    let error = DiagramError::config_error("bad root");
    let error_msg = format!("{}", error);
    assert!(error_msg.contains("Configuration error"));
    assert!(error_msg.contains("bad root"));
    assert!(error.is_config_error());
}

#[test]
fn test_root_namespace_mismatch() {
    let error = DiagramError::root_namespace_mismatch("Other.B", "A");
    let error_msg = format!("{}", error);
    assert!(error_msg.contains("Other.B"));
    assert!(error_msg.contains("'A'"));
    assert!(error.is_config_error());
}

#[test]
fn test_empty_module_name() {
    let error = DiagramError::EmptyModuleName {
        namespace: "A".to_string(),
    };
    assert!(format!("{}", error).contains("no module name"));
    assert!(error.is_config_error());
}

#[test]
fn test_style_error_keeps_source() {
    let error = DiagramError::StyleError {
        path: PathBuf::from("style.iuml"),
        source: io::Error::new(io::ErrorKind::NotFound, "missing"),
    };
    let error_msg = format!("{}", error);
    assert!(error_msg.contains("style.iuml"));
    assert!(error.source().is_some());
    assert!(error.is_config_error());
}

#[test]
fn test_tree_error() {
    let error = DiagramError::tree_error("namespace inside type");
    let error_msg = format!("{}", error);
    assert!(error_msg.contains("Syntax tree error"));
    assert!(!error.is_parse_error());
    assert!(!error.is_config_error());
}

#[test]
fn test_io_error_conversion() {
    let io_error = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
    let error: DiagramError = io_error.into();
    assert!(matches!(error, DiagramError::IoError { .. }));
    assert!(format!("{}", error).contains("pipe closed"));
}

#[test]
fn test_line_column() {
    let source = "ab\ncd\n\nef";
    assert_eq!(line_column(source, 0), (1, 1));
    assert_eq!(line_column(source, 1), (1, 2));
    assert_eq!(line_column(source, 3), (2, 1));
    assert_eq!(line_column(source, 6), (3, 1));
    assert_eq!(line_column(source, 8), (4, 2));
    assert_eq!(line_column(source, 100), (4, 3));
}
