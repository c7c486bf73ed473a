//! Command line configuration.

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::repair::RepairMode;
use crate::table::BrokenTable;

/// Command line configuration for linkmend.
#[derive(Debug, Clone, Parser)]
#[command(name = "linkmend", version, about, long_about = None)]
pub struct Config {
    /// Site root to scan
    #[arg(long, default_value = ".", global = true)]
    pub root: PathBuf,

    /// Document extension, without the dot
    #[arg(long = "ext", default_value = "md", global = true)]
    pub extension: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Pass to run.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Report broken link directives without touching any file
    Audit(AuditArgs),
    /// Rewrite links to known broken paths as plain text
    Repair(RepairArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct AuditArgs {
    /// Also write the broken paths to this file, in the format `repair --broken` reads
    #[arg(long, value_name = "FILE")]
    pub emit_broken: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct RepairArgs {
    /// File listing broken paths, one per line
    #[arg(long, value_name = "FILE")]
    pub broken: Option<PathBuf>,

    /// Broken path to rewrite (repeatable)
    #[arg(long = "link", value_name = "PATH")]
    pub links: Vec<String>,

    /// Report files that would change without writing them
    #[arg(long)]
    pub dry_run: bool,
}

impl RepairArgs {
    /// Builds the table of paths to treat as broken.
    ///
    /// Entries from `--broken` and `--link` are merged. With neither, the
    /// built-in table is used.
    ///
    /// # Errors
    ///
    /// Returns error if the `--broken` file cannot be read.
    pub fn broken_table(&self) -> Result<BrokenTable> {
        if self.broken.is_none() && self.links.is_empty() {
            return Ok(BrokenTable::builtin());
        }

        let mut table = match &self.broken {
            Some(path) => BrokenTable::from_file(path)?,
            None => BrokenTable::default(),
        };
        table.extend(self.links.iter().cloned().collect());

        Ok(table)
    }

    pub fn mode(&self) -> RepairMode {
        if self.dry_run {
            RepairMode::DryRun
        } else {
            RepairMode::Write
        }
    }
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Selected pass; audit when no subcommand is given.
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Audit(AuditArgs::default()))
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the root is not an existing directory or the
    /// extension is empty.
    pub fn validate(&self) -> Result<()> {
        if !self.root.exists() {
            bail!("Root path does not exist: {}", self.root.display());
        }

        if !self.root.is_dir() {
            bail!("Root path is not a directory: {}", self.root.display());
        }

        if self.extension.trim_start_matches('.').is_empty() {
            bail!("Document extension must not be empty");
        }

        Ok(())
    }

    /// Extension without a leading dot, so `--ext .md` works too.
    pub fn extension(&self) -> &str {
        self.extension.trim_start_matches('.')
    }
}
