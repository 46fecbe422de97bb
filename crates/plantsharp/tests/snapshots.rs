//! Snapshot tests for generated PlantUML documents
//!
//! Each fixture is a C# source `tests/fixtures/<name>.cs` with the expected
//! diagram in `<name>.puml`. A `<name>.iuml` next to them switches on the
//! styled header. To update fixtures after changing the output, run the
//! tests with UPDATE_FIXTURES=1

use chrono::NaiveDate;
use plantsharp::plugins::plantuml::{GeneratorConfig, PlantUmlGenerator};
use std::fs;
use std::path::{Path, PathBuf};

fn fixture_path(name: &str, extension: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(format!("{}.{}", name, extension))
}

/// Compare generated output to a fixture file
fn assert_fixture(name: &str, root_namespace: &str) {
    let source = fs::read_to_string(fixture_path(name, "cs")).expect("fixture source missing");

    let mut config = GeneratorConfig::new(root_namespace);
    let style_path = fixture_path(name, "iuml");
    if style_path.exists() {
        config = config.with_style_path(&style_path).expect("stylesheet unreadable");
    }

    let timestamp = NaiveDate::from_ymd_opt(2024, 5, 6)
        .unwrap()
        .and_hms_opt(7, 8, 9)
        .unwrap();
    let output = PlantUmlGenerator::new(config)
        .with_timestamp(timestamp)
        .render_document(&[source])
        .expect("generation should succeed");

    let expected_path = fixture_path(name, "puml");
    if std::env::var("UPDATE_FIXTURES").is_ok() {
        fs::write(&expected_path, &output).expect("failed to write fixture");
        println!("Updated fixture: {}", expected_path.display());
        return;
    }

    let expected = fs::read_to_string(&expected_path).unwrap_or_else(|_| {
        panic!(
            "Fixture not found: {}\nRun with UPDATE_FIXTURES=1 to create it.\n\nActual output:\n{}",
            expected_path.display(),
            output
        )
    });

    if output != expected {
        panic!(
            "Snapshot mismatch for '{}'!\n\n=== Expected ===\n{}\n=== Actual ===\n{}\nRun with UPDATE_FIXTURES=1 to update.",
            name, expected, output
        );
    }
}

#[test]
fn test_shop_orders() {
    assert_fixture("shop_orders", "Shop");
}

#[test]
fn test_styled_file_scoped() {
    assert_fixture("styled_file_scoped", "Acme");
}

#[test]
fn test_top_level_program() {
    assert_fixture("top_level_program", "");
}
