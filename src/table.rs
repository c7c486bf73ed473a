//! Table of reference paths known to be broken.

use anyhow::{Context, Result, bail};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Indent of table entries, matching the audit's `BROKEN LINKS:` section.
const INDENT: &str = "  ";

/// Paths hand-copied from a past audit of the documentation site.
///
/// Used by `repair` when no table is given on the command line.
const BUILTIN_BROKEN_LINKS: &[&str] = &[
    "ai-integration/advanced-features.md",
    "ai-integration/advanced-features/index.md",
    "ai-integration/ai-context-formats.md",
    "ai-integration/ai-context-formats/index.md",
    "ai-integration/ai-guided-development.md",
    "ai-integration/ai-guided-development/index.md",
    "community/code-of-conduct.md",
    "community/guidelines.md",
    "community/partners.md",
    "community/videos.md",
    "examples/case-studies/before-after.md",
    "examples/case-studies/index.md",
    "examples/case-studies/roi-analysis.md",
    "examples/case-studies/team-adoption.md",
    "examples/industry-examples/index.md",
    "examples/live-examples/index.md",
    "examples/live-examples/microservices.md",
    "examples/live-examples/taskflow.md",
    "implementation/team-adoption/change-management.md",
    "implementation/team-adoption/online-training.md",
    "implementation/team-adoption/rollout-strategies.md",
    "implementation/team-adoption/training-materials.md",
    "implementation/templates/quality-checklist.md",
    "learn/best-practices/index.md",
    "learn/core-concepts/ai-integration.md",
    "learn/core-concepts/index.md",
    "learn/core-concepts/tdr-hierarchy.md",
    "learn/mastery-paths/index.md",
    "reference/api-docs.md",
    "reference/best-practices.md",
    "reference/ddse-spec.md",
    "reference/glossary.md",
    "reference/research.md",
    "resources/training-slides.md",
    "support/enterprise.md",
    "support/mentorship.md",
    "support/training-faq.md",
    "tools/vscode-extension.md",
];

/// Fixed set of reference paths the rewriter treats as broken.
///
/// The table is taken as given. Nothing checks it against the tree, so a
/// listed path that exists on disk is still rewritten and a missing target
/// that is not listed is left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrokenTable {
    paths: BTreeSet<String>,
}

impl BrokenTable {
    /// Creates table from reference paths, stored verbatim.
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the curated table shipped with the binary.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_BROKEN_LINKS.iter().copied())
    }

    /// Parses the line based table format.
    ///
    /// One path per line. A leading two-space indent is removed, so the
    /// `BROKEN LINKS:` section of an audit report can be pasted as is; any
    /// other whitespace is part of the path. Empty lines and lines starting
    /// with `#` in the first column are ignored. An indented `#` starts a
    /// path.
    pub fn parse(text: &str) -> Self {
        Self::new(
            text.lines()
                .filter(|line| !line.starts_with('#'))
                .map(|line| line.strip_prefix(INDENT).unwrap_or(line))
                .filter(|line| !line.is_empty()),
        )
    }

    /// Loads table from a file in the [`BrokenTable::parse`] format.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read broken link table {}", path.display()))?;
        Ok(Self::parse(&text))
    }

    /// Writes table in the [`BrokenTable::parse`] format.
    ///
    /// Every path is written indented, so paths that start with `#` or
    /// carry surrounding whitespace load back unchanged.
    ///
    /// # Errors
    ///
    /// Returns error if a path contains a line break or the file cannot be
    /// written.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = self.to_text()?;
        fs::write(path, text)
            .with_context(|| format!("Failed to write broken link table {}", path.display()))
    }

    fn to_text(&self) -> Result<String> {
        let mut text = String::from("# Broken link table, one path per line\n");
        for path in &self.paths {
            if path.contains(['\n', '\r']) {
                bail!("Broken link path contains a line break: {:?}", path);
            }
            text.push_str(INDENT);
            text.push_str(path);
            text.push('\n');
        }
        Ok(text)
    }

    /// Adds every path of `other` to this table.
    pub fn extend(&mut self, other: BrokenTable) {
        self.paths.extend(other.paths);
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Paths in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for BrokenTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
