use std::collections::BTreeSet;

use crate::{Node, NodeKind, TreeError};

/// Maximum nesting depth accepted by [`validate`] and by aggregation.
pub const MAX_DEPTH: usize = 256;

/// Check the structural rules of a tree.
///
/// * siblings never repeat the same kind and name
/// * kinds nest strictly deeper (packages and classes may nest in themselves)
/// * stored values match their metric's value kind
/// * structural coverage metrics are never stored, they are derived
/// * only files carry line counters
/// * depth is at most [`MAX_DEPTH`]
pub fn validate(root: &Node) -> Result<(), TreeError> {
    validate_node(root, 0)
}

fn validate_node(node: &Node, depth: usize) -> Result<(), TreeError> {
    if depth > MAX_DEPTH {
        return Err(TreeError::TooDeep {
            node: node.name.clone(),
            limit: MAX_DEPTH,
        });
    }

    for (metric, value) in &node.values {
        if metric.is_structural() {
            return Err(TreeError::DerivedMetricStored {
                node: node.name.clone(),
                metric: *metric,
            });
        }
        if value.kind() != metric.kind() {
            return Err(TreeError::KindMismatch {
                node: node.name.clone(),
                metric: *metric,
                expected: metric.kind(),
                found: value.kind(),
            });
        }
    }

    if !node.lines.is_empty() && node.kind != NodeKind::File {
        return Err(TreeError::LinesOutsideFile {
            node: node.name.clone(),
            kind: node.kind,
        });
    }

    let mut seen = BTreeSet::new();
    for child in &node.children {
        if !node.kind.may_contain(child.kind) {
            return Err(TreeError::InvalidNesting {
                parent: node.kind,
                child: child.kind,
                name: child.name.clone(),
            });
        }
        if !seen.insert((child.kind, child.name.as_str())) {
            return Err(TreeError::DuplicateChild {
                parent: node.name.clone(),
                kind: child.kind,
                name: child.name.clone(),
            });
        }
        validate_node(child, depth + 1)?;
    }
    Ok(())
}
