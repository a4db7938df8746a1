//! Change-set filters. Each filter returns a new tree that keeps the root
//! and every ancestor of a kept file; ancestors lose their own values.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::{ChangeSet, LineCounters, Node};

/// Keep only the modified lines of every file that has coverage on at least
/// one of them. Values of kept files are re-derived from those lines.
#[must_use]
pub fn filter_by_modified_lines(root: &Node, changes: &ChangeSet) -> Node {
    prune(root, &|file| {
        let lines = changes.modified_lines(file.file_path())?;
        keep_lines(file, |line| lines.contains(&line))
    })
}

/// Keep every file with at least one modified line, unchanged.
#[must_use]
pub fn filter_by_modified_files(root: &Node, changes: &ChangeSet) -> Node {
    let paths = changes.modified_files();
    prune(root, &|file| {
        paths.contains(file.file_path()).then(|| file.clone())
    })
}

/// Keep only the lines with an indirect coverage change.
#[must_use]
pub fn filter_by_indirect_changes(root: &Node, changes: &ChangeSet) -> Node {
    prune(root, &|file| {
        let indirect = changes.indirect_changes(file.file_path())?;
        keep_lines(file, |line| indirect.contains_key(&line))
    })
}

/// Keep the files whose path is listed, unchanged.
#[must_use]
pub fn filter_by_file_paths(root: &Node, paths: &BTreeSet<&str>) -> Node {
    prune(root, &|file| {
        paths.contains(file.file_path()).then(|| file.clone())
    })
}

fn keep_lines(file: &Node, wanted: impl Fn(u32) -> bool) -> Option<Node> {
    let lines: BTreeMap<u32, LineCounters> = file
        .lines
        .iter()
        .filter(|(line, counters)| wanted(**line) && counters.total() > 0)
        .map(|(line, counters)| (*line, *counters))
        .collect();
    if lines.is_empty() {
        debug!("{}: no covered code among the selected lines", file.file_path());
        return None;
    }
    let mut kept = file.copy_empty();
    kept.lines = lines;
    Some(kept.with_line_values())
}

fn prune(root: &Node, keep_file: &dyn Fn(&Node) -> Option<Node>) -> Node {
    let mut out = root.copy_empty();
    if root.is_file() {
        if let Some(file) = keep_file(root) {
            return file;
        }
        return out;
    }
    out.children = root
        .children
        .iter()
        .filter_map(|child| prune_child(child, keep_file))
        .collect();
    out
}

fn prune_child(node: &Node, keep_file: &dyn Fn(&Node) -> Option<Node>) -> Option<Node> {
    if node.is_file() {
        return keep_file(node);
    }
    let children: Vec<Node> = node
        .children
        .iter()
        .filter_map(|child| prune_child(child, keep_file))
        .collect();
    if children.is_empty() {
        return None;
    }
    let mut out = node.copy_empty();
    out.children = children;
    Some(out)
}
