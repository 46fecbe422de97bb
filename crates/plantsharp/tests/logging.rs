//! Tests for logging functionality
//!
//! These tests verify that logging initialization works correctly
//! with different configurations.

use plantsharp::core::logging::{init_logging, LogFormat, LOG_FORMAT_ENV, LOG_LEVEL_ENV};
use std::str::FromStr;

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
    assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
    assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
    assert_eq!(LogFormat::from_str("COMPACT").unwrap(), LogFormat::Compact);
    assert!(LogFormat::from_str("invalid").is_err());
}

#[test]
fn test_log_format_variants() {
    let variants = LogFormat::variants();
    assert!(variants.contains(&"compact"));
    assert!(variants.contains(&"pretty"));
    assert!(variants.contains(&"json"));
}

#[test]
fn test_env_var_names() {
    assert_eq!(LOG_LEVEL_ENV, "PLANTSHARP_LOG_LEVEL");
    assert_eq!(LOG_FORMAT_ENV, "PLANTSHARP_LOG_FORMAT");
}

#[test]
fn test_init_logging_with_levels() {
    // Only the first call can install the global subscriber; the rest
    // must fail gracefully rather than panic
    let _ = init_logging(Some("trace"), Some("compact"));
    let _ = init_logging(Some("debug"), Some("compact"));
    let _ = init_logging(Some("info"), Some("compact"));
    let _ = init_logging(Some("warn"), Some("compact"));
    let _ = init_logging(Some("error"), Some("compact"));
    let _ = init_logging(Some("off"), Some("compact"));
}

#[test]
fn test_init_logging_with_formats() {
    let _ = init_logging(Some("info"), Some("compact"));
    let _ = init_logging(Some("info"), Some("pretty"));
    let _ = init_logging(Some("info"), Some("json"));
}

#[test]
fn test_init_logging_invalid_format() {
    let result = init_logging(Some("info"), Some("invalid_format"));
    assert!(result.is_err());
}

#[test]
fn test_generation_runs_with_subscriber_installed() {
    let _ = init_logging(Some("trace"), Some("compact"));

    let uml = plantsharp::generate_to_string(
        &["namespace A.B { public class Foo { public int Bar(int x) { return x; } } }"],
        "A",
    )
    .unwrap();
    assert!(uml.contains("+Bar(x:int) : int"));
}
