//! JSON file adapters for the collaborator ports, and the build pipeline
//! that every statistics-based command shares.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use covlens_delta::build_coverage_statistics;
use covlens_tree::{
    ChangeSet, ChangeSetProvider, CoverageTreeProvider, Node, ReferenceResolver,
    detect_indirect_changes, split_packages,
};
use covlens_types::CoverageStatistics;
use log::{debug, info};
use serde::de::DeserializeOwned;

/// The CLI processes a single build per invocation; the id only labels log
/// lines.
pub(crate) const LOCAL_BUILD: u64 = 0;

/// Trees and change set of one build, each read from its own JSON file.
#[derive(Debug, Clone, Default)]
pub(crate) struct JsonFiles {
    pub tree: PathBuf,
    pub reference: Option<PathBuf>,
    pub changes: Option<PathBuf>,
}

impl CoverageTreeProvider for JsonFiles {
    fn coverage_tree(&self, build: u64) -> Result<Node, String> {
        debug!("build {build}: coverage tree from {}", self.tree.display());
        read_tree(&self.tree)
    }
}

impl ReferenceResolver for JsonFiles {
    fn reference_tree(&self, build: u64) -> Result<Option<Node>, String> {
        match &self.reference {
            Some(path) => {
                debug!("build {build}: reference tree from {}", path.display());
                read_tree(path).map(Some)
            }
            None => Ok(None),
        }
    }
}

impl ChangeSetProvider for JsonFiles {
    fn change_set(&self, build: u64) -> Result<ChangeSet, String> {
        match &self.changes {
            Some(path) => {
                debug!("build {build}: change set from {}", path.display());
                read_json(path)
            }
            None => Ok(ChangeSet::default()),
        }
    }
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse JSON from {}: {e}", path.display()))
}

fn read_tree(path: &Path) -> Result<Node, String> {
    read_json(path).map(derive_line_values)
}

/// Files that carry line counters get LINE, BRANCH and LOC from them.
/// Class or method children that carry LINE themselves still win during
/// aggregation.
fn derive_line_values(mut node: Node) -> Node {
    node.children = node.children.into_iter().map(derive_line_values).collect();
    if node.is_file() && !node.lines.is_empty() {
        node.with_line_values()
    } else {
        node
    }
}

/// Everything the statistics of one build are computed from.
#[derive(Debug, Clone)]
pub(crate) struct Build {
    pub tree: Node,
    pub reference: Option<Node>,
    pub changes: ChangeSet,
}

impl Build {
    pub(crate) fn statistics(&self) -> Result<CoverageStatistics> {
        build_coverage_statistics(&self.tree, self.reference.as_ref(), &self.changes)
            .context("Failed to compute coverage statistics")
    }

    pub(crate) fn file(&self, path: &str) -> Result<&Node> {
        self.tree
            .find_file(path)
            .ok_or_else(|| anyhow!("'{path}' is not part of the coverage tree"))
    }
}

/// Load a build through the ports. With a reference tree, indirect changes
/// are detected and merged into the change set.
pub(crate) fn load_build<P>(ports: &P, build: u64, split: bool) -> Result<Build>
where
    P: CoverageTreeProvider + ReferenceResolver + ChangeSetProvider,
{
    let mut tree = ports.coverage_tree(build).map_err(anyhow::Error::msg)?;
    let mut reference = ports.reference_tree(build).map_err(anyhow::Error::msg)?;
    let mut changes = ports.change_set(build).map_err(anyhow::Error::msg)?;

    if split {
        tree = split_packages(&tree);
        reference = reference.map(|r| split_packages(&r));
    }
    if let Some(previous) = &reference {
        changes = detect_indirect_changes(&tree, previous, &changes);
    }
    info!(
        "build {build}: {} files, {} files with changes",
        tree.files().len(),
        changes.files.len()
    );

    Ok(Build {
        tree,
        reference,
        changes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use covlens_tree::NodeKind;
    use covlens_types::{Baseline, Metric, Value};

    struct InMemory {
        tree: Node,
        reference: Option<Node>,
    }

    impl CoverageTreeProvider for InMemory {
        fn coverage_tree(&self, _build: u64) -> Result<Node, String> {
            Ok(self.tree.clone())
        }
    }

    impl ReferenceResolver for InMemory {
        fn reference_tree(&self, _build: u64) -> Result<Option<Node>, String> {
            Ok(self.reference.clone())
        }
    }

    impl ChangeSetProvider for InMemory {
        fn change_set(&self, _build: u64) -> Result<ChangeSet, String> {
            Ok(ChangeSet::new().with_modified_lines("a/A.java", [1]))
        }
    }

    fn module(lines: &[(u32, u32, u32)]) -> Node {
        let mut file = Node::file("A.java", "a/A.java");
        for (line, covered, missed) in lines {
            file = file.with_line(*line, *covered, *missed);
        }
        Node::new(NodeKind::Module, "m")
            .with_child(Node::new(NodeKind::Package, "a").with_child(file.with_line_values()))
    }

    #[test]
    fn line_values_are_derived_from_counters() {
        let raw = Node::new(NodeKind::Module, "m")
            .with_child(Node::file("A.java", "A.java").with_line(1, 1, 0).with_line(2, 0, 1));
        let tree = derive_line_values(raw);
        assert_eq!(
            tree.children[0].values.get(&Metric::Line),
            Some(&Value::ratio(1, 1))
        );
    }

    #[test]
    fn reference_adds_indirect_changes() {
        let ports = InMemory {
            tree: module(&[(1, 1, 0), (2, 0, 1)]),
            reference: Some(module(&[(1, 0, 1), (2, 1, 0)])),
        };
        let build = load_build(&ports, LOCAL_BUILD, false).unwrap();
        assert_eq!(build.changes.indirect_changes("a/A.java").unwrap().len(), 1);
        let stats = build.statistics().unwrap();
        assert!(stats.delta_of(Baseline::Project).is_some());
    }

    #[test]
    fn without_reference_the_change_set_is_kept() {
        let ports = InMemory {
            tree: module(&[(1, 1, 0)]),
            reference: None,
        };
        let build = load_build(&ports, LOCAL_BUILD, false).unwrap();
        assert!(build.changes.indirect_changes("a/A.java").is_none());
        assert!(build.file("a/A.java").is_ok());
        assert!(build.file("b/B.java").is_err());
    }

    #[test]
    fn missing_file_reports_the_path() {
        let files = JsonFiles {
            tree: PathBuf::from("does-not-exist.json"),
            ..JsonFiles::default()
        };
        let err = files.coverage_tree(LOCAL_BUILD).unwrap_err();
        assert!(err.starts_with("Failed to read does-not-exist.json"));
    }
}
