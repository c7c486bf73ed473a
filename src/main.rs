use anyhow::{Context, Result};
use linkmend::{AuditArgs, Command, Config, Document, RepairArgs};
use std::io::{self, Write};

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate().context("Invalid configuration")?;

    let documents = linkmend::discover(&config.root, config.extension())
        .context("Failed to discover documents")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match config.command() {
        Command::Audit(args) => run_audit(&documents, &args, &mut out)?,
        Command::Repair(args) => run_repair(&documents, &args, &mut out)?,
    }

    out.flush().context("Failed to flush output")?;
    Ok(())
}

fn run_audit(documents: &[Document], args: &AuditArgs, out: &mut impl Write) -> Result<()> {
    let report = linkmend::audit(documents, out).context("Failed to write audit report")?;
    report
        .write_summary(out)
        .context("Failed to write audit summary")?;

    if let Some(path) = &args.emit_broken {
        report.broken_table().write_to(path)?;
        writeln!(out)?;
        writeln!(
            out,
            "Wrote {} broken links to {}",
            report.broken_count(),
            path.display()
        )?;
    }

    Ok(())
}

fn run_repair(documents: &[Document], args: &RepairArgs, out: &mut impl Write) -> Result<()> {
    let broken = args.broken_table()?;
    if broken.is_empty() {
        eprintln!("Warning: broken link table is empty, nothing will be rewritten");
    }

    let summary = linkmend::repair(documents, &broken, args.mode(), out)
        .context("Failed to write repair progress")?;
    summary
        .write_summary(out)
        .context("Failed to write repair summary")?;

    Ok(())
}
