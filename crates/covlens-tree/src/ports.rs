//! Port traits for the collaborators that feed the core.
//!
//! Adapters live at the edge (the CLI reads JSON files); the core never
//! touches the file system.

use crate::{ChangeSet, Node};

/// Supplies the parsed coverage tree of a build.
pub trait CoverageTreeProvider {
    fn coverage_tree(&self, build: u64) -> Result<Node, String>;
}

/// Supplies the reference build's tree. `Ok(None)` means there is no
/// reference, which is a valid state: statistics are computed, deltas are
/// not.
pub trait ReferenceResolver {
    fn reference_tree(&self, build: u64) -> Result<Option<Node>, String>;
}

/// Supplies modified lines and indirect changes derived from SCM diffs.
pub trait ChangeSetProvider {
    fn change_set(&self, build: u64) -> Result<ChangeSet, String>;
}
