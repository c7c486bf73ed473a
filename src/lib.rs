//! Broken `{% link %}` directive finder and fixer for markdown sites.

mod audit;
mod config;
mod discovery;
mod markdown;
mod repair;
mod resolver;
mod table;

pub use audit::{AuditReport, LinkReference, Unreadable, audit};
pub use config::{AuditArgs, Command, Config, RepairArgs};
pub use discovery::{Document, discover};
pub use markdown::{LinkShape, PIPELINE, extract_references, rewrite, rewrite_pass};
pub use repair::{FileOutcome, FileResult, RepairMode, RepairSummary, repair};
pub use resolver::{ExistingFiles, LinkStatus, normalize};
pub use table::BrokenTable;
