//! # covlens-tree
//!
//! **Tier 2 (Coverage Tree)**
//!
//! The coverage tree of a single build and everything computed directly from
//! it.
//!
//! ## What belongs here
//! * [`Node`] and its structural validation
//! * Bottom-up aggregation of metric values
//! * Package splitting (a pure structural transform)
//! * Change-set filtering and statistics per baseline
//! * Indirect coverage change detection between two trees
//! * Port traits for the collaborators that supply trees and change sets
//!
//! ## What does NOT belong here
//! * Report parsing (trees arrive already built)
//! * Delta computation (see `covlens-delta`)
//! * Rendering
//!
//! ## Example
//! ```ignore
//! use covlens_tree::{ChangeSet, compute_statistics, split_packages};
//!
//! let tree: Node = serde_json::from_str(json)?;
//! let tree = split_packages(&tree);
//! let stats = compute_statistics(&tree, &ChangeSet::default())?;
//! ```

#![forbid(unsafe_code)]

mod aggregate;
mod changes;
mod error;
mod filter;
mod indirect;
mod node;
mod ports;
mod split;
mod statistics;
mod validate;

pub use aggregate::{aggregate, aggregate_all, leaf_values};
pub use changes::{ChangeSet, Direction, FileChanges};
pub use error::TreeError;
pub use filter::{
    filter_by_file_paths, filter_by_indirect_changes, filter_by_modified_files,
    filter_by_modified_lines,
};
pub use indirect::detect_indirect_changes;
pub use node::{LineCounters, Node, NodeKind, line_statistics};
pub use ports::{ChangeSetProvider, CoverageTreeProvider, ReferenceResolver};
pub use split::split_packages;
pub use statistics::compute_statistics;
pub use validate::{MAX_DEPTH, validate};
