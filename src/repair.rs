//! Repair mode: rewrite broken directive links into plain text.

use anyhow::Result;
use std::io::Write;

use crate::discovery::Document;
use crate::markdown::rewrite;
use crate::table::BrokenTable;

/// Whether changed documents are written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepairMode {
    #[default]
    Write,
    DryRun,
}

/// What happened to one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Nothing to rewrite; file not touched.
    Unchanged,
    /// Rewritten and saved.
    Fixed,
    /// Would be rewritten; dry run only.
    WouldFix,
    /// Content could not be read.
    Unreadable(String),
    /// Rewritten content could not be saved.
    Unwritable(String),
}

impl FileOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, FileOutcome::Unreadable(_) | FileOutcome::Unwritable(_))
    }
}

/// Outcome for a single document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResult {
    path: String,
    outcome: FileOutcome,
}

impl FileResult {
    /// Display path of the document.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn outcome(&self) -> &FileOutcome {
        &self.outcome
    }
}

/// Per-document outcomes of a repair run.
#[derive(Debug, Clone, Default)]
pub struct RepairSummary {
    mode: RepairMode,
    results: Vec<FileResult>,
}

impl RepairSummary {
    pub fn mode(&self) -> RepairMode {
        self.mode
    }

    /// Results in processing order.
    pub fn results(&self) -> &[FileResult] {
        &self.results
    }

    /// Number of documents written back, or that would be in a dry run.
    pub fn fixed_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, FileOutcome::Fixed | FileOutcome::WouldFix))
            .count()
    }

    /// Results for documents that could not be read or written.
    pub fn failures(&self) -> impl Iterator<Item = &FileResult> {
        self.results.iter().filter(|r| r.outcome.is_failure())
    }

    /// Writes the closing summary lines, plus a failure count when any
    /// document could not be read or written.
    ///
    /// # Errors
    ///
    /// Returns error if writing to `out` fails.
    pub fn write_summary<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out)?;
        match self.mode {
            RepairMode::Write => {
                writeln!(out, "Completed! Fixed {} files.", self.fixed_count())?;
                writeln!(out, "All broken links have been converted to plain text.")?;
            }
            RepairMode::DryRun => {
                writeln!(out, "Dry run: {} files would be fixed.", self.fixed_count())?;
            }
        }

        let failed = self.failures().count();
        if failed > 0 {
            writeln!(out, "{} files could not be processed.", failed)?;
        }
        Ok(())
    }
}

/// Rewrites broken directive links in every document.
///
/// `broken` is used as given and never checked against the tree. A
/// document is written only when rewriting changed it. Progress lines go to
/// `out` as each document is handled:
///
/// ```text
/// Fixed: ./guide/index.md
/// Error processing ./locked.md: Failed to write ./locked.md: Permission denied (os error 13)
/// ```
///
/// Read and write failures are recorded in the summary and the run moves on
/// to the next document.
///
/// # Errors
///
/// Returns error only if writing to `out` fails.
pub fn repair<W: Write>(
    documents: &[Document],
    broken: &BrokenTable,
    mode: RepairMode,
    out: &mut W,
) -> Result<RepairSummary> {
    repair_with(documents, broken, mode, out, Document::write)
}

/// [`repair`] with the step that saves rewritten content supplied by the
/// caller.
fn repair_with<W, S>(
    documents: &[Document],
    broken: &BrokenTable,
    mode: RepairMode,
    out: &mut W,
    mut save: S,
) -> Result<RepairSummary>
where
    W: Write,
    S: FnMut(&Document, &str) -> Result<()>,
{
    let mut results = Vec::with_capacity(documents.len());

    for document in documents {
        let outcome = repair_document(document, broken, mode, &mut save);
        let path = document.display_path();

        match &outcome {
            FileOutcome::Fixed => writeln!(out, "Fixed: {}", path)?,
            FileOutcome::WouldFix => writeln!(out, "Would fix: {}", path)?,
            FileOutcome::Unreadable(cause) | FileOutcome::Unwritable(cause) => {
                writeln!(out, "Error processing {}: {}", path, cause)?
            }
            FileOutcome::Unchanged => {}
        }

        results.push(FileResult {
            path: path.to_string(),
            outcome,
        });
    }

    Ok(RepairSummary { mode, results })
}

fn repair_document<S>(
    document: &Document,
    broken: &BrokenTable,
    mode: RepairMode,
    save: &mut S,
) -> FileOutcome
where
    S: FnMut(&Document, &str) -> Result<()>,
{
    let original = match document.read() {
        Ok(content) => content,
        Err(e) => return FileOutcome::Unreadable(format!("{:#}", e)),
    };

    let fixed = rewrite(&original, broken);
    if fixed == original {
        return FileOutcome::Unchanged;
    }

    match mode {
        RepairMode::DryRun => FileOutcome::WouldFix,
        RepairMode::Write => match save(document, &fixed) {
            Ok(()) => FileOutcome::Fixed,
            Err(e) => FileOutcome::Unwritable(format!("{:#}", e)),
        },
    }
}
