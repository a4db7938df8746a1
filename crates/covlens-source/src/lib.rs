//! # covlens-source
//!
//! **Tier 3 (Formatting Adapter)**
//!
//! HTML source listings painted with line and branch coverage.
//!
//! ## What belongs here
//! * [`render_listing`]: one table row per source line
//! * [`annotate_modified_lines`] and [`annotate_indirect_changes`]: in-place
//!   rewrite of the flagged rows of an existing listing
//!
//! ## What does NOT belong here
//! * Reading source files or deciding which lines changed
//! * Page layout around the table

#![forbid(unsafe_code)]

mod annotate;
mod html;
mod listing;

pub use annotate::{annotate_indirect_changes, annotate_modified_lines};
pub use html::{color_class, escape_html, summary_column, tooltip};
pub use listing::render_listing;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SourceError {
    /// The change set flags a line the listing has no row for.
    #[error("{path}: line {line} is flagged as changed but the listing has no row for it")]
    MissingLine { path: String, line: u32 },
}
