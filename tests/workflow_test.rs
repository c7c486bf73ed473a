//! Workflow integration tests for linkmend.
//!
//! Tests the audit then repair handoff through a broken link table file.

mod common;

use anyhow::Result;
use linkmend::{BrokenTable, RepairMode, audit, discover, extract_references, repair};

/// Tests complete workflow: audit, save table, repair from file, re-audit.
///
/// This is the intended manual handoff: the audit's broken set is written
/// to a file which the repair pass then loads. After repair no link shape
/// pointing at a broken path remains, so a fresh audit only reports bare
/// directives that live outside markdown links.
#[test]
fn test_workflow_audit_table_repair() -> Result<()> {
    // Arrange
    let site = common::create_site(&[
        (
            "index.md",
            "# Docs\n\n- [Start]({% link start.md %})\n- [Glossary]({% link reference/glossary.md %})\n",
        ),
        ("start.md", "## Next [API]({% link reference/api.md %})\n"),
        ("layout.md", "<a href=\"{% link reference/api.md %}\">API</a>\n"),
    ])?;
    let table_path = site.path().join("broken.txt");

    // Act: audit and save the broken set
    let documents = discover(site.path(), "md")?;
    let before = audit(&documents, &mut Vec::new())?;
    before.broken_table().write_to(&table_path)?;

    // Assert: audit found both missing targets
    assert_eq!(
        before.broken().collect::<Vec<_>>(),
        vec!["reference/api.md", "reference/glossary.md"]
    );

    // Act: repair from the saved table
    let broken = BrokenTable::from_file(&table_path)?;
    let summary = repair(&documents, &broken, RepairMode::Write, &mut Vec::new())?;

    // Assert: both link shapes were rewritten
    assert_eq!(summary.fixed_count(), 2);
    assert_eq!(
        common::read_file(site.path(), "index.md")?,
        "# Docs\n\n- [Start]({% link start.md %})\n- Glossary\n"
    );
    assert_eq!(
        common::read_file(site.path(), "start.md")?,
        "## Next API\n"
    );

    // Act: audit again
    let after = audit(&discover(site.path(), "md")?, &mut Vec::new())?;

    // Assert: only the bare directive in HTML remains
    assert_eq!(after.broken_count(), 1);
    assert_eq!(after.broken_occurrences()[0].source(), "./layout.md");

    Ok(())
}

/// Tests that extraction sees every directive the audit counts.
#[test]
fn test_workflow_extraction_matches_audit_totals() -> Result<()> {
    // Arrange
    let site = common::create_site(&[
        ("a.md", "{% link b.md %} {% link b.md %} {% link c.md %}"),
        ("b.md", "{% link a.md %}"),
    ])?;
    let documents = discover(site.path(), "md")?;

    // Act
    let mut extracted = Vec::new();
    for document in &documents {
        let content = document.read()?;
        extracted.extend(extract_references(&content).into_iter().map(String::from));
    }
    let report = audit(&documents, &mut Vec::new())?;

    // Assert
    assert_eq!(extracted.len(), 4, "Duplicates are kept by extraction");
    extracted.sort();
    extracted.dedup();
    assert_eq!(report.total(), extracted.len());

    Ok(())
}

/// Tests that paths with surrounding whitespace survive the table file.
///
/// Directive paths are extracted verbatim, so `{% link gone.md  %}` is
/// reported as `gone.md ` and repair must match that exact string after
/// loading the emitted table.
#[test]
fn test_workflow_table_keeps_padded_paths() -> Result<()> {
    // Arrange
    let site = common::create_site(&[
        ("a.md", "[Gone]({% link gone.md  %})\n"),
        ("b.md", "[Hash]({% link #draft.md %})\n"),
    ])?;
    let table_path = site.path().join("broken.txt");
    let documents = discover(site.path(), "md")?;

    // Act
    let report = audit(&documents, &mut Vec::new())?;
    report.broken_table().write_to(&table_path)?;
    let loaded = BrokenTable::from_file(&table_path)?;
    let summary = repair(&documents, &loaded, RepairMode::Write, &mut Vec::new())?;

    // Assert
    assert_eq!(
        loaded.iter().collect::<Vec<_>>(),
        report.broken().collect::<Vec<_>>()
    );
    assert!(loaded.contains("gone.md "));
    assert_eq!(summary.fixed_count(), 2);
    assert_eq!(common::read_file(site.path(), "a.md")?, "Gone\n");
    assert_eq!(common::read_file(site.path(), "b.md")?, "Hash\n");

    Ok(())
}
