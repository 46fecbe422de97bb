//! Source discovery for the generate and validate commands

use anyhow::{anyhow, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};
use walkdir::{DirEntry, WalkDir};

/// A C# source read from disk or stdin
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Display label: the path, or `<stdin>`
    pub label: String,
    pub content: String,
}

/// Expand files and directories into the list of source paths.
///
/// Files are taken as given. Directories are walked recursively in
/// file-name order, keeping files with `extension` and skipping hidden,
/// `bin` and `obj` directories. An entry that cannot be read fails the
/// whole discovery.
pub fn discover_sources(inputs: &[PathBuf], extension: &str) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for input in inputs {
        if input.is_file() {
            paths.push(input.clone());
            continue;
        }
        if !input.is_dir() {
            return Err(anyhow!("Input path '{}' does not exist", input.display()));
        }

        let before = paths.len();
        for entry in WalkDir::new(input)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_hidden(e) && !is_build_output(e))
        {
            let entry = entry.map_err(|e| {
                warn!(dir = %input.display(), error = %e, "Failed to walk source directory");
                anyhow!("Failed to scan '{}': {}", input.display(), e)
            })?;
            if entry.file_type().is_file() && has_extension(entry.path(), extension) {
                trace!(path = %entry.path().display(), "Found source");
                paths.push(entry.into_path());
            }
        }
        debug!(
            dir = %input.display(),
            count = paths.len() - before,
            "Scanned directory"
        );
    }

    Ok(paths)
}

/// Read every path into memory
pub fn read_sources(paths: &[PathBuf]) -> Result<Vec<SourceFile>> {
    paths
        .iter()
        .map(|path| {
            let content = fs::read_to_string(path).map_err(|e| {
                anyhow!("Failed to read input file '{}': {}", path.display(), e)
            })?;
            Ok(SourceFile {
                label: path.display().to_string(),
                content,
            })
        })
        .collect()
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(extension.trim_start_matches('.')))
        .unwrap_or(false)
}

/// Check if entry is hidden (starts with .). The walk root is never hidden.
fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|s| s.starts_with('.'))
            .unwrap_or(false)
}

/// Check if entry is a compiler output directory.
fn is_build_output(entry: &DirEntry) -> bool {
    const BUILD_DIRS: &[&str] = &["bin", "obj"];

    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|s| BUILD_DIRS.contains(&s))
            .unwrap_or(false)
}
