use std::collections::BTreeMap;

use log::debug;

use crate::{ChangeSet, Direction, Node};

/// Find unmodified lines whose coverage flipped between the reference and
/// the current build.
///
/// Only files present in both trees are compared, line numbers are taken as
/// stable, and lines without code on either side are skipped. The returned
/// change set keeps the modified lines of `changes` and replaces the
/// indirect entries of every compared file.
#[must_use]
pub fn detect_indirect_changes(current: &Node, reference: &Node, changes: &ChangeSet) -> ChangeSet {
    let mut result = changes.clone();
    for file in current.files() {
        let path = file.file_path();
        let Some(previous) = reference.find_file(path) else {
            continue;
        };
        let modified = changes.modified_lines(path);

        let mut flipped = BTreeMap::new();
        for (line, now) in &file.lines {
            if modified.is_some_and(|lines| lines.contains(line)) {
                continue;
            }
            let Some(before) = previous.lines.get(line) else {
                continue;
            };
            if now.total() == 0 || before.total() == 0 {
                continue;
            }
            match (before.is_covered(), now.is_covered()) {
                (false, true) => {
                    flipped.insert(*line, Direction::Increased);
                }
                (true, false) => {
                    flipped.insert(*line, Direction::Decreased);
                }
                _ => {}
            }
        }

        if flipped.is_empty() {
            if let Some(entry) = result.files.get_mut(path) {
                entry.indirect.clear();
            }
        } else {
            debug!("{path}: {} indirect coverage changes", flipped.len());
            result.files.entry(path.to_string()).or_default().indirect = flipped;
        }
    }
    result
}
