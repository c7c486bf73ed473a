//! Markdown link directive handling.
//!
//! This module finds `{% link path %}` directives in document text and
//! rewrites markdown links that point at broken paths into plain text.

mod directive;
mod rewrite;

pub use directive::extract_references;
pub use rewrite::{LinkShape, PIPELINE, rewrite, rewrite_pass};
