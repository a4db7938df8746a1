use covlens_tree::{
    ChangeSet, Node, TreeError, aggregate_all, compute_statistics, filter_by_file_paths, validate,
};
use covlens_types::{Baseline, CoverageStatistics, Statistics};
use log::{debug, info};

use crate::compute_delta;

/// Values of every baseline plus the deltas that can be computed.
///
/// * `PROJECT`: current project against the reference project
/// * `MODIFIED_FILES`: current modified files against the same files in the
///   reference
/// * `MODIFIED_LINES`: modified lines against the modified files of the
///   current build, so it is available without a reference
///
/// Without a reference there is no project or modified-files delta; the
/// statistics themselves are unaffected. Indirect changes never get a delta.
pub fn build_coverage_statistics(
    current: &Node,
    reference: Option<&Node>,
    changes: &ChangeSet,
) -> Result<CoverageStatistics, TreeError> {
    let values = compute_statistics(current, changes)?;
    let empty = Statistics::new();
    let project = values.statistics(Baseline::Project).unwrap_or(&empty);
    let modified_files = values.statistics(Baseline::ModifiedFiles).unwrap_or(&empty);
    let modified_lines = values.statistics(Baseline::ModifiedLines).unwrap_or(&empty);

    let lines_delta = compute_delta(modified_lines, modified_files);
    let mut deltas = vec![(Baseline::ModifiedLines, lines_delta)];

    match reference {
        Some(reference) => {
            validate(reference)?;
            let reference_project = aggregate_all(reference)?;
            deltas.push((Baseline::Project, compute_delta(project, &reference_project)));

            let paths = changes.modified_files();
            let reference_files = aggregate_all(&filter_by_file_paths(reference, &paths))?;
            deltas.push((
                Baseline::ModifiedFiles,
                compute_delta(modified_files, &reference_files),
            ));
            debug!("deltas computed against reference '{}'", reference.name);
        }
        None => info!("no reference build, skipping project and modified-files deltas"),
    }

    Ok(deltas
        .into_iter()
        .fold(values, |stats, (baseline, delta)| stats.with_delta(baseline, delta)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use covlens_tree::NodeKind;
    use covlens_types::{Fraction, Metric};

    fn build(lines: &[(u32, u32, u32)]) -> Node {
        let file = lines
            .iter()
            .fold(Node::file("A.java", "p/A.java"), |f, (l, c, m)| f.with_line(*l, *c, *m))
            .with_line_values();
        Node::new(NodeKind::Module, "m").with_child(Node::new(NodeKind::Package, "p").with_child(file))
    }

    #[test]
    fn without_reference_only_modified_lines_delta_exists() {
        let current = build(&[(1, 1, 0), (2, 0, 1)]);
        let changes = ChangeSet::new().with_modified_lines("p/A.java", [1]);
        let stats = build_coverage_statistics(&current, None, &changes).unwrap();
        assert!(stats.delta_of(Baseline::Project).is_none());
        assert!(stats.delta_of(Baseline::ModifiedFiles).is_none());
        assert_eq!(
            stats.delta(Baseline::ModifiedLines, Metric::Line),
            Some(Fraction::integer(50))
        );
    }

    #[test]
    fn project_delta_compares_against_reference() {
        let current = build(&[(1, 1, 0), (2, 1, 0)]);
        let reference = build(&[(1, 1, 0), (2, 0, 1)]);
        let stats = build_coverage_statistics(&current, Some(&reference), &ChangeSet::new()).unwrap();
        assert_eq!(
            stats.delta(Baseline::Project, Metric::Line),
            Some(Fraction::integer(50))
        );
        assert_eq!(
            stats.delta(Baseline::Project, Metric::Loc),
            Some(Fraction::ZERO)
        );
        assert!(stats.delta_of(Baseline::Indirect).is_none());
    }

    #[test]
    fn modified_files_delta_uses_the_same_reference_files() {
        let current = build(&[(1, 1, 0), (2, 1, 0), (3, 1, 0)]);
        let reference = build(&[(1, 1, 0), (2, 0, 1), (3, 0, 1)]);
        let changes = ChangeSet::new().with_modified_lines("p/A.java", [3]);
        let stats = build_coverage_statistics(&current, Some(&reference), &changes).unwrap();
        let delta = stats.delta(Baseline::ModifiedFiles, Metric::Line).unwrap();
        assert_eq!(delta, Fraction::new(200, 3).unwrap());
    }
}
