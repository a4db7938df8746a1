use std::collections::BTreeMap;

use covlens_types::{Metric, Statistics, Value};
use serde::{Deserialize, Serialize};

/// Level of a node in the coverage tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    /// Synthetic root that groups several modules.
    Container,
    Module,
    Package,
    File,
    Class,
    Method,
}

impl NodeKind {
    /// The structural coverage metric this kind counts towards.
    #[must_use]
    pub fn metric(self) -> Option<Metric> {
        match self {
            NodeKind::Container => None,
            NodeKind::Module => Some(Metric::Module),
            NodeKind::Package => Some(Metric::Package),
            NodeKind::File => Some(Metric::File),
            NodeKind::Class => Some(Metric::Class),
            NodeKind::Method => Some(Metric::Method),
        }
    }

    /// Nesting goes strictly deeper, except that packages and classes nest
    /// in themselves.
    #[must_use]
    pub fn may_contain(self, child: NodeKind) -> bool {
        child > self || (child == self && matches!(self, NodeKind::Package | NodeKind::Class))
    }
}

/// Per-line execution counters of a source file.
///
/// With more than one item the counters are branch counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineCounters {
    pub covered: u32,
    pub missed: u32,
}

impl LineCounters {
    #[must_use]
    pub const fn new(covered: u32, missed: u32) -> Self {
        LineCounters { covered, missed }
    }

    #[must_use]
    pub const fn total(self) -> u32 {
        self.covered.saturating_add(self.missed)
    }

    #[must_use]
    pub const fn is_covered(self) -> bool {
        self.covered > 0
    }

    #[must_use]
    pub const fn has_branches(self) -> bool {
        self.total() > 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    /// Relative path of a file node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// The node's own values; aggregation uses one only when no child
    /// supplies that metric.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub values: BTreeMap<Metric, Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub lines: BTreeMap<u32, LineCounters>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    #[must_use]
    pub fn new(kind: NodeKind, name: impl Into<String>) -> Self {
        Node {
            name: name.into(),
            kind,
            path: None,
            values: BTreeMap::new(),
            lines: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        let mut node = Node::new(NodeKind::File, name);
        node.path = Some(path.into());
        node
    }

    #[must_use]
    pub fn with_value(mut self, metric: Metric, value: Value) -> Self {
        self.values.insert(metric, value);
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn with_line(mut self, line: u32, covered: u32, missed: u32) -> Self {
        self.lines.insert(line, LineCounters::new(covered, missed));
        self
    }

    /// Replace LINE, BRANCH and LOC with the values derived from the line
    /// counters.
    #[must_use]
    pub fn with_line_values(mut self) -> Self {
        self.values.remove(&Metric::Line);
        self.values.remove(&Metric::Branch);
        self.values.remove(&Metric::Loc);
        let derived = line_statistics(&self.lines);
        for (metric, value) in derived.iter() {
            self.values.insert(metric, *value);
        }
        self
    }

    /// Path used to match change sets: the relative path, or the name when
    /// no path is recorded.
    #[must_use]
    pub fn file_path(&self) -> &str {
        self.path.as_deref().unwrap_or(&self.name)
    }

    #[must_use]
    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    /// All file nodes of the subtree, depth first.
    #[must_use]
    pub fn files(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        collect_files(self, &mut out);
        out
    }

    #[must_use]
    pub fn find_file(&self, path: &str) -> Option<&Node> {
        if self.is_file() && self.file_path() == path {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_file(path))
    }

    /// A copy without children, values or lines.
    #[must_use]
    pub fn copy_empty(&self) -> Node {
        Node {
            name: self.name.clone(),
            kind: self.kind,
            path: self.path.clone(),
            values: BTreeMap::new(),
            lines: BTreeMap::new(),
            children: Vec::new(),
        }
    }
}

fn collect_files<'a>(node: &'a Node, out: &mut Vec<&'a Node>) {
    if node.is_file() {
        out.push(node);
    }
    for child in &node.children {
        collect_files(child, out);
    }
}

/// LINE, BRANCH and LOC derived from per-line counters. Lines without any
/// counter are not code and are skipped.
#[must_use]
pub fn line_statistics(lines: &BTreeMap<u32, LineCounters>) -> Statistics {
    let mut covered_lines = 0u64;
    let mut missed_lines = 0u64;
    let mut covered_branches = 0u64;
    let mut missed_branches = 0u64;
    let mut has_branches = false;

    for counters in lines.values().filter(|c| c.total() > 0) {
        if counters.is_covered() {
            covered_lines += 1;
        } else {
            missed_lines += 1;
        }
        if counters.has_branches() {
            has_branches = true;
            covered_branches += u64::from(counters.covered);
            missed_branches += u64::from(counters.missed);
        }
    }

    let mut stats = Statistics::new();
    if covered_lines + missed_lines == 0 {
        return stats;
    }
    stats.insert(Metric::Line, Value::ratio(covered_lines, missed_lines));
    if has_branches {
        stats.insert(Metric::Branch, Value::ratio(covered_branches, missed_branches));
    }
    let loc = i64::try_from(covered_lines + missed_lines).unwrap_or(i64::MAX);
    stats.insert(Metric::Loc, Value::count(loc));
    stats
}
