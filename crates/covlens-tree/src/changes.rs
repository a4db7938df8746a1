use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Direction of an indirect coverage change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// The line was not covered before and is covered now.
    Increased,
    /// The line was covered before and is not covered now.
    Decreased,
}

impl Direction {
    /// `+1` or `-1`.
    #[must_use]
    pub fn signum(self) -> i32 {
        match self {
            Direction::Increased => 1,
            Direction::Decreased => -1,
        }
    }
}

/// Changes of one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChanges {
    pub modified_lines: BTreeSet<u32>,
    pub indirect: BTreeMap<u32, Direction>,
}

impl FileChanges {
    #[must_use]
    pub fn is_modified(&self) -> bool {
        !self.modified_lines.is_empty()
    }
}

/// Modified lines and indirect changes per file path, as supplied by the
/// SCM collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeSet {
    pub files: BTreeMap<String, FileChanges>,
}

impl ChangeSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_modified_lines(
        mut self,
        path: impl Into<String>,
        lines: impl IntoIterator<Item = u32>,
    ) -> Self {
        self.files
            .entry(path.into())
            .or_default()
            .modified_lines
            .extend(lines);
        self
    }

    #[must_use]
    pub fn with_indirect_change(mut self, path: impl Into<String>, line: u32, direction: Direction) -> Self {
        self.files
            .entry(path.into())
            .or_default()
            .indirect
            .insert(line, direction);
        self
    }

    #[must_use]
    pub fn file(&self, path: &str) -> Option<&FileChanges> {
        self.files.get(path)
    }

    /// Paths of files with at least one modified line.
    #[must_use]
    pub fn modified_files(&self) -> BTreeSet<&str> {
        self.files
            .iter()
            .filter(|(_, c)| c.is_modified())
            .map(|(p, _)| p.as_str())
            .collect()
    }

    #[must_use]
    pub fn modified_lines(&self, path: &str) -> Option<&BTreeSet<u32>> {
        self.files
            .get(path)
            .map(|c| &c.modified_lines)
            .filter(|lines| !lines.is_empty())
    }

    #[must_use]
    pub fn indirect_changes(&self, path: &str) -> Option<&BTreeMap<u32, Direction>> {
        self.files
            .get(path)
            .map(|c| &c.indirect)
            .filter(|changes| !changes.is_empty())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files
            .values()
            .all(|c| c.modified_lines.is_empty() && c.indirect.is_empty())
    }
}
