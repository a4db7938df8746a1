//! Gate evaluation logic.

use covlens_math::mean;
use covlens_tree::{Node, leaf_values};
use covlens_types::{Baseline, CoverageStatistics, Value};
use log::{debug, info, warn};

use crate::types::{Aggregation, GateResult, GateSource, QualityGate, Reading, Verdict};

/// Evaluate gates against the statistics of a build.
///
/// Gates are evaluated in order and the result items keep that order. A gate
/// whose value is missing or undefined fails with its criticality. A delta
/// gate whose baseline has no delta (no reference build) is inactive. Maximum
/// and average gates fall back to the total here; use
/// [`evaluate_with_tree`] to evaluate them against the tree.
#[must_use]
pub fn evaluate(gates: &[QualityGate], statistics: &CoverageStatistics) -> Verdict {
    evaluate_gates(gates, statistics, None)
}

/// Evaluate gates, reading maximum and average gates from the leaf values
/// of `tree`.
#[must_use]
pub fn evaluate_with_tree(gates: &[QualityGate], statistics: &CoverageStatistics, tree: &Node) -> Verdict {
    evaluate_gates(gates, statistics, Some(tree))
}

fn evaluate_gates(gates: &[QualityGate], statistics: &CoverageStatistics, tree: Option<&Node>) -> Verdict {
    let items: Vec<GateResult> = gates
        .iter()
        .map(|gate| {
            if gate.source == GateSource::Delta && statistics.delta_of(gate.baseline).is_none() {
                info!("{}: no reference build, gate is inactive", gate.name());
                return GateResult::inactive(gate);
            }
            let result = GateResult::new(gate, read(gate, statistics, tree));
            if result.actual.is_none() {
                warn!("{}: no value, gate fails closed", result.name);
            } else {
                debug!("{}: {} -> {:?}", result.name, result.actual_text, result.status);
            }
            result
        })
        .collect();
    Verdict::from_results(items)
}

fn read(gate: &QualityGate, statistics: &CoverageStatistics, tree: Option<&Node>) -> Option<Reading> {
    match gate.source {
        GateSource::Delta => statistics.delta(gate.baseline, gate.metric).map(Reading::Delta),
        GateSource::Value => match tree {
            Some(tree) if gate.is_aggregated() && gate.baseline == Baseline::Project => {
                read_leaves(gate, tree)
            }
            _ => statistics
                .value(gate.baseline, gate.metric)
                .copied()
                .map(Reading::Value),
        },
    }
}

fn read_leaves(gate: &QualityGate, tree: &Node) -> Option<Reading> {
    let values = leaf_values(tree, gate.metric);
    match gate.aggregation {
        Aggregation::Maximum => {
            let (first, rest) = values.split_first()?;
            rest.iter()
                .try_fold(*first, |max, value| max.max(*value))
                .inspect_err(|err| warn!("{}: {err}", gate.name()))
                .ok()
                .map(Reading::Value)
        }
        Aggregation::Average => {
            let numbers: Vec<f64> = values.iter().filter_map(Value::as_f64).collect();
            mean(&numbers).map(Reading::Mean)
        }
        Aggregation::Total => None,
    }
}
