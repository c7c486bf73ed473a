//! Shared test utilities for integration tests.
//!
//! Provides helpers for building temporary documentation trees and reading
//! files back after a pass has run.

#![allow(dead_code)]

use anyhow::Result;
use std::path::Path;
use tempfile::TempDir;

/// Creates temporary site tree from `(path, content)` pairs.
///
/// # Errors
///
/// Returns error if directory creation or a file write fails
pub fn create_site(files: &[(&str, &str)]) -> Result<TempDir> {
    let dir = TempDir::new()?;
    for (path, content) in files {
        write_file(dir.path(), path, content)?;
    }
    Ok(dir)
}

/// Writes file below the site root, creating parent directories as needed.
///
/// # Errors
///
/// Returns error if directory creation or file write fails
pub fn write_file(root: &Path, path: &str, content: &str) -> Result<()> {
    let file_path = root.join(path);
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

/// Reads file below the site root.
///
/// # Errors
///
/// Returns error if the file cannot be read as UTF8
pub fn read_file(root: &Path, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(root.join(path))?)
}
