//! Bottom-up aggregation.
//!
//! A node's aggregated value for a metric is the combination of its
//! children's aggregated values. The node's own value counts only when no
//! child supplies the metric, so a file that carries line values and also
//! has class or method children is not counted twice. Structural coverage metrics
//! (module, package, file, class, method) are derived: a node counts as
//! covered when its aggregated line coverage has at least one covered line,
//! falling back to instruction and then branch coverage.

use covlens_types::{Metric, Statistics, Value};
use log::debug;

use crate::{MAX_DEPTH, Node, TreeError};

/// Aggregated value of `metric` over the subtree, or `None` when no node in
/// the subtree carries data for it.
pub fn aggregate(node: &Node, metric: Metric) -> Result<Option<Value>, TreeError> {
    Ok(aggregate_all(node)?.get(metric).copied())
}

/// Aggregated values of every metric present in the subtree.
pub fn aggregate_all(node: &Node) -> Result<Statistics, TreeError> {
    fold(node, 0)
}

fn fold(node: &Node, depth: usize) -> Result<Statistics, TreeError> {
    if depth > MAX_DEPTH {
        return Err(TreeError::TooDeep {
            node: node.name.clone(),
            limit: MAX_DEPTH,
        });
    }

    let mut acc = Statistics::new();
    for child in &node.children {
        let child_stats = fold(child, depth + 1)?;
        for (metric, value) in child_stats.iter() {
            merge(&mut acc, node, metric, *value)?;
        }
    }
    for (metric, value) in &node.values {
        if metric.is_structural() {
            continue;
        }
        if acc.get(*metric).is_some() {
            debug!("{}: {metric:?} comes from the children, own value ignored", node.name);
        } else {
            acc.insert(*metric, *value);
        }
    }

    if let Some(metric) = node.kind.metric()
        && let Some(covered) = has_covered_code(&acc)
    {
        let contribution = if covered {
            Value::ratio(1, 0)
        } else {
            Value::ratio(0, 1)
        };
        merge(&mut acc, node, metric, contribution)?;
    }
    Ok(acc)
}

fn merge(acc: &mut Statistics, node: &Node, metric: Metric, value: Value) -> Result<(), TreeError> {
    let combined = match acc.get(metric) {
        Some(existing) => {
            existing
                .combine(value)
                .map_err(|source| TreeError::IncompatibleValues {
                    node: node.name.clone(),
                    metric,
                    source,
                })?
        }
        None => value,
    };
    acc.insert(metric, combined);
    Ok(())
}

/// `Some(true)` when the first defined coverage among LINE, INSTRUCTION and
/// BRANCH has covered items, `None` when none of them is defined.
fn has_covered_code(stats: &Statistics) -> Option<bool> {
    [Metric::Line, Metric::Instruction, Metric::Branch]
        .into_iter()
        .filter_map(|m| match stats.get(m) {
            Some(Value::Ratio(r)) if r.is_defined() => Some(r.covered > 0),
            _ => None,
        })
        .next()
}

/// Values of `metric` at the deepest nodes that carry it. A node's own value
/// is a leaf only when none of its descendants has one, the same rule
/// aggregation follows.
///
/// Used for maximum and average quality gates.
pub fn leaf_values(node: &Node, metric: Metric) -> Vec<Value> {
    let mut out = Vec::new();
    collect_leaf_values(node, metric, &mut out);
    out
}

fn collect_leaf_values(node: &Node, metric: Metric, out: &mut Vec<Value>) {
    let own = node.values.get(&metric).copied();
    let before = out.len();
    for child in &node.children {
        collect_leaf_values(child, metric, out);
    }
    let children_found = out.len() > before;

    if !children_found && let Some(value) = own {
        out.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NodeKind;

    fn file(name: &str, covered: u64, missed: u64) -> Node {
        Node::file(name, format!("p/{name}")).with_value(Metric::Line, Value::ratio(covered, missed))
    }

    fn sample() -> Node {
        Node::new(NodeKind::Module, "m").with_child(
            Node::new(NodeKind::Package, "p")
                .with_child(file("A.java", 3, 1).with_value(Metric::Loc, Value::count(40)))
                .with_child(file("B.java", 0, 4).with_value(Metric::Loc, Value::count(2))),
        )
    }

    #[test]
    fn ratios_and_counts_add_up() {
        let tree = sample();
        assert_eq!(aggregate(&tree, Metric::Line).unwrap(), Some(Value::ratio(3, 5)));
        assert_eq!(aggregate(&tree, Metric::Loc).unwrap(), Some(Value::count(42)));
    }

    #[test]
    fn structural_metrics_are_derived_from_line_coverage() {
        let tree = sample();
        assert_eq!(aggregate(&tree, Metric::File).unwrap(), Some(Value::ratio(1, 1)));
        assert_eq!(aggregate(&tree, Metric::Package).unwrap(), Some(Value::ratio(1, 0)));
        assert_eq!(aggregate(&tree, Metric::Module).unwrap(), Some(Value::ratio(1, 0)));
    }

    #[test]
    fn absent_metric_is_none() {
        assert_eq!(aggregate(&sample(), Metric::Mutation).unwrap(), None);
    }

    #[test]
    fn node_without_coverage_does_not_count_structurally() {
        let tree = Node::new(NodeKind::Package, "p")
            .with_child(Node::file("A.java", "p/A.java").with_value(Metric::Loc, Value::count(5)));
        assert_eq!(aggregate(&tree, Metric::File).unwrap(), None);
    }

    #[test]
    fn instruction_coverage_is_the_fallback() {
        let tree = Node::file("A.c", "A.c").with_value(Metric::Instruction, Value::ratio(0, 7));
        assert_eq!(aggregate(&tree, Metric::File).unwrap(), Some(Value::ratio(0, 1)));
    }

    #[test]
    fn mixed_kinds_surface_as_error() {
        let tree = Node::new(NodeKind::Package, "p")
            .with_child(Node::file("A", "A").with_value(Metric::Loc, Value::count(1)))
            .with_child(Node::file("B", "B").with_value(Metric::Loc, Value::ratio(1, 0)));
        assert!(matches!(
            aggregate(&tree, Metric::Loc),
            Err(TreeError::IncompatibleValues { metric: Metric::Loc, .. })
        ));
    }

    #[test]
    fn file_values_are_not_added_to_method_values() {
        let tree = Node::file("A.java", "p/A.java")
            .with_line(1, 1, 0)
            .with_line(2, 0, 1)
            .with_line_values()
            .with_child(
                Node::new(NodeKind::Class, "A")
                    .with_child(Node::new(NodeKind::Method, "a()").with_value(Metric::Line, Value::ratio(1, 1))),
            );
        assert!(crate::validate(&tree).is_ok());
        assert_eq!(aggregate(&tree, Metric::Line).unwrap(), Some(Value::ratio(1, 1)));
        assert_eq!(leaf_values(&tree, Metric::Line), vec![Value::ratio(1, 1)]);
        assert_eq!(aggregate(&tree, Metric::Method).unwrap(), Some(Value::ratio(1, 0)));
    }

    #[test]
    fn own_value_fills_metrics_the_children_lack() {
        let tree = Node::file("A.java", "p/A.java")
            .with_value(Metric::Loc, Value::count(30))
            .with_child(Node::new(NodeKind::Class, "A").with_value(Metric::Line, Value::ratio(2, 2)));
        let stats = aggregate_all(&tree).unwrap();
        assert_eq!(stats.get(Metric::Loc), Some(&Value::count(30)));
        assert_eq!(stats.get(Metric::Line), Some(&Value::ratio(2, 2)));
    }

    #[test]
    fn class_value_is_not_a_leaf_when_its_methods_have_one() {
        let tree = Node::new(NodeKind::Class, "A")
            .with_value(Metric::CyclomaticComplexity, Value::count(9))
            .with_child(Node::new(NodeKind::Method, "a()").with_value(Metric::CyclomaticComplexity, Value::count(4)))
            .with_child(Node::new(NodeKind::Method, "b()").with_value(Metric::CyclomaticComplexity, Value::count(5)));
        assert_eq!(
            leaf_values(&tree, Metric::CyclomaticComplexity),
            vec![Value::count(4), Value::count(5)]
        );
        assert_eq!(
            aggregate(&tree, Metric::CyclomaticComplexity).unwrap(),
            Some(Value::count(9))
        );
    }

    #[test]
    fn aggregation_is_repeatable() {
        let tree = sample();
        assert_eq!(aggregate_all(&tree).unwrap(), aggregate_all(&tree).unwrap());
    }

    #[test]
    fn leaf_values_prefer_methods() {
        let tree = Node::file("A.java", "A.java")
            .with_value(Metric::CyclomaticComplexity, Value::count(9))
            .with_child(
                Node::new(NodeKind::Class, "A")
                    .with_child(
                        Node::new(NodeKind::Method, "a()")
                            .with_value(Metric::CyclomaticComplexity, Value::count(2)),
                    )
                    .with_child(
                        Node::new(NodeKind::Method, "b()")
                            .with_value(Metric::CyclomaticComplexity, Value::count(7)),
                    ),
            );
        assert_eq!(
            leaf_values(&tree, Metric::CyclomaticComplexity),
            vec![Value::count(2), Value::count(7)]
        );
    }
}
