//! Existence resolution for link references.

use std::collections::BTreeSet;

use crate::discovery::Document;

/// Strips leading `./` markers from a path.
///
/// Repeated markers are all removed, so applying this twice gives the same
/// result as applying it once.
pub fn normalize(path: &str) -> &str {
    let mut path = path;
    while let Some(rest) = path.strip_prefix("./") {
        path = rest;
    }
    path
}

/// Whether a reference resolves to a discovered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    Working,
    Broken,
}

/// Normalized paths of every discovered document.
///
/// Discovered paths are normalized on insertion. References are looked up
/// verbatim: `./a.md` does not match a discovered `./a.md`, only `a.md`
/// does.
#[derive(Debug, Clone, Default)]
pub struct ExistingFiles {
    paths: BTreeSet<String>,
}

impl ExistingFiles {
    /// Builds the set from raw discovered paths.
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            paths: paths
                .into_iter()
                .map(|p| normalize(p.as_ref()).to_string())
                .collect(),
        }
    }

    /// Builds the set from discovered documents.
    pub fn from_documents(documents: &[Document]) -> Self {
        Self::from_paths(documents.iter().map(Document::display_path))
    }

    /// Tests verbatim membership of a reference.
    pub fn contains(&self, reference: &str) -> bool {
        self.paths.contains(reference)
    }

    pub fn classify(&self, reference: &str) -> LinkStatus {
        if self.contains(reference) {
            LinkStatus::Working
        } else {
            LinkStatus::Broken
        }
    }

    /// Normalized paths in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }
}
