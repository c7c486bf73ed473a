//! Document discovery over a directory tree.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Text document found under the scan root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: PathBuf,
    display_path: String,
}

impl Document {
    /// Creates document from filesystem path and root relative display path.
    pub fn new(path: impl Into<PathBuf>, display_path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            display_path: display_path.into(),
        }
    }

    /// Filesystem path used for reading and writing.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path relative to the scan root, written as `./dir/file.md`.
    pub fn display_path(&self) -> &str {
        &self.display_path
    }

    /// Reads current document content.
    ///
    /// Content is never cached: every pass sees the file as it is on disk.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or is not valid UTF8.
    pub fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))
    }

    /// Overwrites document content in place.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be written.
    pub fn write(&self, content: &str) -> Result<()> {
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}

/// Collects all documents with the given extension below `root`.
///
/// Directories whose name starts with `.` are pruned together with their
/// subtree. The root itself is always entered, so `.` works as a root.
/// Hidden files are kept. Entries are visited in file name order.
///
/// # Arguments
///
/// * `root`: Directory to scan
/// * `extension`: Extension without the leading dot (e.g. `md`)
///
/// # Errors
///
/// Returns error if any directory in the tree cannot be traversed. Partial
/// results are not returned since a silently incomplete tree would make
/// existing targets look broken.
pub fn discover(root: impl AsRef<Path>, extension: &str) -> Result<Vec<Document>> {
    let root = root.as_ref();
    let suffix = format!(".{}", extension);
    let mut documents = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden_dir(entry));

    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to traverse {}", root.display()))?;

        // Symlinked directories are not descended into and are not documents
        if entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir()) {
            continue;
        }

        if !entry.file_name().to_string_lossy().ends_with(&suffix) {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .with_context(|| format!("Entry outside scan root: {}", entry.path().display()))?;

        documents.push(Document::new(entry.path(), display_path(relative)));
    }

    Ok(documents)
}

fn is_hidden_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name().to_string_lossy().starts_with('.')
}

/// Renders a root relative path as `./a/b.md` with forward slashes.
fn display_path(relative: &Path) -> String {
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    format!("./{}", parts.join("/"))
}
