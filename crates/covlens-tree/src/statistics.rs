use covlens_types::{Baseline, CoverageStatistics, Metric, Statistics, Value, ValueKind};
use log::debug;

use crate::{
    ChangeSet, Node, TreeError, aggregate_all, filter_by_indirect_changes,
    filter_by_modified_files, filter_by_modified_lines, validate,
};

/// Statistics of all four baselines of one build.
///
/// A baseline whose filter keeps nothing still lists every coverage metric of
/// the project, with an empty ratio (`n/a`). No deltas are attached.
pub fn compute_statistics(tree: &Node, changes: &ChangeSet) -> Result<CoverageStatistics, TreeError> {
    validate(tree)?;

    let project = aggregate_all(tree)?;
    let coverage: Vec<Metric> = project.metrics().filter(|m| m.is_coverage()).collect();

    let modified_lines = filtered(&filter_by_modified_lines(tree, changes), &coverage)?;
    let modified_files = filtered(&filter_by_modified_files(tree, changes), &coverage)?;
    let indirect = filtered(&filter_by_indirect_changes(tree, changes), &coverage)?;

    debug!(
        "statistics: project={} modified_lines={} modified_files={} indirect={} metrics",
        project.len(),
        modified_lines.len(),
        modified_files.len(),
        indirect.len()
    );

    Ok(CoverageStatistics::new()
        .with_statistics(Baseline::Project, project)
        .with_statistics(Baseline::ModifiedLines, modified_lines)
        .with_statistics(Baseline::ModifiedFiles, modified_files)
        .with_statistics(Baseline::Indirect, indirect))
}

fn filtered(tree: &Node, coverage: &[Metric]) -> Result<Statistics, TreeError> {
    let mut stats = aggregate_all(tree)?;
    for metric in coverage {
        if !stats.contains(*metric) {
            stats.insert(*metric, Value::identity(ValueKind::Ratio));
        }
    }
    Ok(stats)
}
