//! # covlens-types
//!
//! **Tier 0 (Core Types)**
//!
//! Data types and the value algebra shared by every covlens crate.
//!
//! ## Stability Policy
//!
//! **JSON-first stability**: metric identifiers serialize as their enum names
//! (`"LINE"`, `"CYCLOMATIC_COMPLEXITY"`), baselines as snake case
//! (`"modified_lines"`). Renaming either is a breaking change.
//!
//! ## What belongs here
//! * The static metric catalog ([`Metric`], [`MetricCatalog`])
//! * The closed [`Value`] variant and its combination rules
//! * Baselines, locales and the statistics / delta maps
//!
//! ## What does NOT belong here
//! * Tree traversal (see `covlens-tree`)
//! * Rendering of values (see `covlens-format`)
//! * File I/O

#![forbid(unsafe_code)]

mod baseline;
mod error;
mod locale;
mod metric;
mod statistics;
mod value;

pub use baseline::Baseline;
pub use covlens_math::Fraction;
pub use error::TypesError;
pub use locale::Locale;
pub use metric::{Metric, MetricCatalog, MetricDescriptor, ValueKind};
pub use statistics::{CoverageStatistics, Delta, Statistics};
pub use value::{Ratio, Value};
