//! Package splitting.
//!
//! Produces a new tree in which dotted package names become nested package
//! nodes and files that sit directly below a container or module are grouped into
//! packages named after their directory. Leaf data is moved, never changed:
//! every metric except PACKAGE aggregates to the same value before and after.

use std::collections::BTreeMap;
use std::mem;

use covlens_types::{Metric, Value};

use crate::{Node, NodeKind};

#[must_use]
pub fn split_packages(root: &Node) -> Node {
    split_node(root)
}

fn split_node(node: &Node) -> Node {
    let mut children = Vec::with_capacity(node.children.len());
    for child in &node.children {
        let child = split_node(child);
        let groups_files = matches!(node.kind, NodeKind::Container | NodeKind::Module);
        match directory_package(&child) {
            Some(package) if groups_files => {
                children.push(Node::new(NodeKind::Package, package).with_child(child));
            }
            _ => children.push(child),
        }
    }

    let mut out = node.copy_empty();
    out.values = node.values.clone();
    out.lines = node.lines.clone();
    out.children = merge_packages(children.into_iter().map(expand_package).collect());
    out
}

/// `edu/hm/A.java` becomes `edu.hm`; files without a directory stay put.
fn directory_package(node: &Node) -> Option<String> {
    if !node.is_file() {
        return None;
    }
    let path = node.file_path().replace('\\', "/");
    let (dir, _) = path.rsplit_once('/')?;
    let segments: Vec<&str> = dir.split('/').filter(|s| !s.is_empty() && *s != ".").collect();
    if segments.is_empty() {
        None
    } else {
        Some(segments.join("."))
    }
}

fn expand_package(node: Node) -> Node {
    if node.kind != NodeKind::Package || !node.name.contains('.') {
        return node;
    }
    let segments: Vec<String> = node
        .name
        .split('.')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    let Some((innermost, outer)) = segments.split_last() else {
        return node;
    };

    let mut current = node;
    current.name = innermost.clone();
    for name in outer.iter().rev() {
        current = Node::new(NodeKind::Package, name.clone()).with_child(current);
    }
    current
}

/// Merge sibling packages with the same name, keeping first-seen order.
fn merge_packages(children: Vec<Node>) -> Vec<Node> {
    let mut out: Vec<Node> = Vec::with_capacity(children.len());
    for child in children {
        if child.kind == NodeKind::Package
            && let Some(existing) = out
                .iter_mut()
                .find(|n| n.kind == NodeKind::Package && n.name == child.name)
            && let Some(values) = merged_values(existing, &child)
        {
            existing.values = values;
            let mut grouped = mem::take(&mut existing.children);
            grouped.extend(child.children);
            existing.children = merge_packages(grouped);
            continue;
        }
        out.push(child);
    }
    out
}

/// Combined own values of two packages, `None` when they cannot be combined;
/// the packages then stay separate and validation reports the duplicate.
fn merged_values(existing: &Node, other: &Node) -> Option<BTreeMap<Metric, Value>> {
    let mut values = existing.values.clone();
    for (metric, value) in &other.values {
        let combined = match values.get(metric) {
            Some(current) => current.combine(*value).ok()?,
            None => *value,
        };
        values.insert(*metric, combined);
    }
    Some(values)
}
