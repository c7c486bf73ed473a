//! Audit mode: find and report broken link directives.

use anyhow::Result;
use std::collections::BTreeSet;
use std::io::Write;

use crate::discovery::Document;
use crate::markdown::extract_references;
use crate::resolver::{ExistingFiles, LinkStatus};
use crate::table::BrokenTable;

/// Single directive occurrence inside a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkReference {
    target: String,
    source: String,
}

impl LinkReference {
    /// Referenced path as written in the directive.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Display path of the document containing the directive.
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Document skipped because its content could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unreadable {
    path: String,
    cause: String,
}

impl Unreadable {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn cause(&self) -> &str {
        &self.cause
    }
}

/// Result of an audit run.
#[derive(Debug, Clone)]
pub struct AuditReport {
    existing: ExistingFiles,
    references: BTreeSet<String>,
    broken: BTreeSet<String>,
    broken_occurrences: Vec<LinkReference>,
    unreadable: Vec<Unreadable>,
}

impl AuditReport {
    /// Number of distinct referenced paths.
    pub fn total(&self) -> usize {
        self.references.len()
    }

    /// Number of distinct broken paths.
    pub fn broken_count(&self) -> usize {
        self.broken.len()
    }

    pub fn working_count(&self) -> usize {
        self.total() - self.broken_count()
    }

    /// Distinct broken paths in lexicographic order.
    pub fn broken(&self) -> impl Iterator<Item = &str> {
        self.broken.iter().map(String::as_str)
    }

    /// Every broken directive occurrence in scan order, duplicates included.
    pub fn broken_occurrences(&self) -> &[LinkReference] {
        &self.broken_occurrences
    }

    pub fn unreadable(&self) -> &[Unreadable] {
        &self.unreadable
    }

    pub fn existing(&self) -> &ExistingFiles {
        &self.existing
    }

    /// Broken paths as a table that `repair` accepts.
    pub fn broken_table(&self) -> BrokenTable {
        self.broken.iter().cloned().collect()
    }

    /// Writes summary, broken list and existing file list.
    ///
    /// # Errors
    ///
    /// Returns error if writing to `out` fails.
    pub fn write_summary<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out)?;
        writeln!(out, "SUMMARY:")?;
        writeln!(out, "Total link references found: {}", self.total())?;
        writeln!(out, "Broken links: {}", self.broken_count())?;
        writeln!(out, "Working links: {}", self.working_count())?;

        writeln!(out)?;
        writeln!(out, "BROKEN LINKS:")?;
        for link in self.broken() {
            writeln!(out, "  {}", link)?;
        }

        writeln!(out)?;
        writeln!(out, "EXISTING FILES:")?;
        for file in self.existing.iter() {
            writeln!(out, "  {}", file)?;
        }

        Ok(())
    }
}

/// Scans documents and classifies every link directive.
///
/// Broken occurrences and unreadable documents are written to `out` as
/// they are found:
///
/// ```text
/// BROKEN: reference/glossary.md (referenced in ./index.md)
/// Error reading ./bad.md: Failed to read ./bad.md: stream did not contain valid UTF-8
/// ```
///
/// Unreadable documents are skipped and the scan continues. They still
/// count as existing files since discovery found them.
///
/// # Errors
///
/// Returns error only if writing to `out` fails.
pub fn audit<W: Write>(documents: &[Document], out: &mut W) -> Result<AuditReport> {
    let existing = ExistingFiles::from_documents(documents);
    let mut references = BTreeSet::new();
    let mut broken = BTreeSet::new();
    let mut broken_occurrences = Vec::new();
    let mut unreadable = Vec::new();

    for document in documents {
        let content = match document.read() {
            Ok(content) => content,
            Err(e) => {
                let cause = format!("{:#}", e);
                writeln!(out, "Error reading {}: {}", document.display_path(), cause)?;
                unreadable.push(Unreadable {
                    path: document.display_path().to_string(),
                    cause,
                });
                continue;
            }
        };

        for target in extract_references(&content) {
            references.insert(target.to_string());

            if existing.classify(target) == LinkStatus::Broken {
                broken.insert(target.to_string());
                writeln!(
                    out,
                    "BROKEN: {} (referenced in {})",
                    target,
                    document.display_path()
                )?;
                broken_occurrences.push(LinkReference {
                    target: target.to_string(),
                    source: document.display_path().to_string(),
                });
            }
        }
    }

    Ok(AuditReport {
        existing,
        references,
        broken,
        broken_occurrences,
        unreadable,
    })
}
