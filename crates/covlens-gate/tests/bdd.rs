use covlens_gate::{
    Criticality, GateSource, GateStatus, OverallResult, QualityGate, evaluate,
};
use covlens_math::Fraction;
use covlens_types::{Baseline, CoverageStatistics, Delta, Locale, Metric, Statistics, Value};

// =============================================================================
// Helpers
// =============================================================================

/// Project at 50% line and 75% file coverage, modified lines and files at the
/// same values, deltas of +5 (line) and -10 (file) everywhere.
fn statistics() -> CoverageStatistics {
    let values = Statistics::new()
        .with(Metric::File, Value::ratio(3, 1))
        .with(Metric::Line, Value::ratio(2, 2));
    let delta: Delta = [
        (Metric::File, Fraction::integer(-10)),
        (Metric::Line, Fraction::integer(5)),
    ]
    .into_iter()
    .collect();
    [Baseline::Project, Baseline::ModifiedLines, Baseline::ModifiedFiles]
        .into_iter()
        .fold(CoverageStatistics::new(), |stats, baseline| {
            stats
                .with_statistics(baseline, values.clone())
                .with_delta(baseline, delta.clone())
        })
}

fn gate(metric: Metric, baseline: Baseline, threshold: f64) -> QualityGate {
    QualityGate::new(metric, baseline, threshold, Criticality::Unstable)
}

// =============================================================================
// Passing gates
// =============================================================================

#[test]
fn given_zero_thresholds_when_evaluating_every_baseline_then_all_gates_pass() {
    let mut gates = Vec::new();
    for baseline in [Baseline::Project, Baseline::ModifiedLines, Baseline::ModifiedFiles] {
        gates.push(gate(Metric::File, baseline, 0.0));
        gates.push(gate(Metric::Line, baseline, 0.0));
    }
    for baseline in [Baseline::Project, Baseline::ModifiedLines, Baseline::ModifiedFiles] {
        gates.push(gate(Metric::File, baseline, -10.0).with_source(GateSource::Delta));
        gates.push(gate(Metric::Line, baseline, -10.0).with_source(GateSource::Delta));
    }

    let verdict = evaluate(&gates, &statistics());

    assert_eq!(verdict.overall, OverallResult::Success);
    assert_eq!(
        verdict.messages(Locale::En),
        vec![
            "[Overall project - File Coverage]: ≪Success≫ - (Actual value: 75.00%, Quality gate: 0.00)",
            "[Overall project - Line Coverage]: ≪Success≫ - (Actual value: 50.00%, Quality gate: 0.00)",
            "[Modified code lines - File Coverage]: ≪Success≫ - (Actual value: 75.00%, Quality gate: 0.00)",
            "[Modified code lines - Line Coverage]: ≪Success≫ - (Actual value: 50.00%, Quality gate: 0.00)",
            "[Modified files - File Coverage]: ≪Success≫ - (Actual value: 75.00%, Quality gate: 0.00)",
            "[Modified files - Line Coverage]: ≪Success≫ - (Actual value: 50.00%, Quality gate: 0.00)",
            "[Overall project (difference to reference job) - File Coverage]: ≪Success≫ - (Actual value: -10.00%, Quality gate: -10.00)",
            "[Overall project (difference to reference job) - Line Coverage]: ≪Success≫ - (Actual value: +5.00%, Quality gate: -10.00)",
            "[Modified code lines (difference to modified files) - File Coverage]: ≪Success≫ - (Actual value: -10.00%, Quality gate: -10.00)",
            "[Modified code lines (difference to modified files) - Line Coverage]: ≪Success≫ - (Actual value: +5.00%, Quality gate: -10.00)",
            "[Modified files (difference to reference job) - File Coverage]: ≪Success≫ - (Actual value: -10.00%, Quality gate: -10.00)",
            "[Modified files (difference to reference job) - Line Coverage]: ≪Success≫ - (Actual value: +5.00%, Quality gate: -10.00)",
        ]
    );
}

#[test]
fn given_threshold_equal_to_value_when_evaluating_then_gate_passes() {
    let verdict = evaluate(&[gate(Metric::Line, Baseline::Project, 50.0)], &statistics());
    assert!(verdict.items[0].passed());
}

// =============================================================================
// Failing gates
// =============================================================================

#[test]
fn given_threshold_above_value_when_evaluating_then_gate_is_unstable() {
    let verdict = evaluate(&[gate(Metric::Line, Baseline::Project, 51.0)], &statistics());
    assert_eq!(verdict.overall, OverallResult::Warning);
    assert_eq!(
        verdict.messages(Locale::En),
        vec!["[Overall project - Line Coverage]: ≪Unstable≫ - (Actual value: 50.00%, Quality gate: 51.00)"]
    );
}

#[test]
fn given_one_failure_among_unstable_gates_when_evaluating_then_overall_is_failure() {
    let gates = [
        gate(Metric::Line, Baseline::Project, 90.0),
        QualityGate::new(Metric::File, Baseline::Project, 90.0, Criticality::Failure),
        gate(Metric::Line, Baseline::ModifiedFiles, 90.0),
    ];
    let verdict = evaluate(&gates, &statistics());
    assert_eq!(verdict.overall, OverallResult::Failure);
    assert_eq!(verdict.count(GateStatus::Unstable), 2);
    assert_eq!(verdict.count(GateStatus::Failure), 1);
}

#[test]
fn given_no_reference_when_evaluating_delta_gate_then_gate_is_inactive() {
    let stats = CoverageStatistics::new()
        .with_statistics(Baseline::Project, Statistics::new().with(Metric::Line, Value::ratio(1, 0)));
    let gates = [gate(Metric::Line, Baseline::Project, -100.0).with_source(GateSource::Delta)];
    let verdict = evaluate(&gates, &stats);
    assert_eq!(verdict.overall, OverallResult::Success);
    assert_eq!(verdict.count(GateStatus::Inactive), 1);
    assert_eq!(
        verdict.messages(Locale::En),
        vec!["[Overall project (difference to reference job) - Line Coverage]: ≪Inactive≫ - (Actual value: n/a, Quality gate: -100.00)"]
    );
}

#[test]
fn given_no_reference_and_passing_value_gates_when_evaluating_then_overall_is_success() {
    let stats = CoverageStatistics::new().with_statistics(
        Baseline::Project,
        Statistics::new()
            .with(Metric::Line, Value::ratio(3, 1))
            .with(Metric::Branch, Value::ratio(1, 1)),
    );
    let gates = [
        QualityGate::new(Metric::Line, Baseline::Project, 70.0, Criticality::Failure),
        QualityGate::new(Metric::Line, Baseline::Project, 0.0, Criticality::Failure).with_source(GateSource::Delta),
        QualityGate::new(Metric::Branch, Baseline::Project, 50.0, Criticality::Failure),
    ];
    let verdict = evaluate(&gates, &stats);
    assert_eq!(verdict.overall, OverallResult::Success);
    assert!(verdict.passed());
    assert_eq!(verdict.count(GateStatus::Success), 2);
    assert_eq!(verdict.items[1].status, GateStatus::Inactive);
}

#[test]
fn given_no_reference_and_failing_value_gate_when_evaluating_then_failure_still_wins() {
    let stats = CoverageStatistics::new()
        .with_statistics(Baseline::Project, Statistics::new().with(Metric::Line, Value::ratio(1, 3)));
    let gates = [
        QualityGate::new(Metric::Line, Baseline::Project, 0.0, Criticality::Failure).with_source(GateSource::Delta),
        QualityGate::new(Metric::Line, Baseline::Project, 50.0, Criticality::Failure),
    ];
    let verdict = evaluate(&gates, &stats);
    assert_eq!(verdict.overall, OverallResult::Failure);
}

#[test]
fn given_empty_modified_lines_when_evaluating_then_gate_does_not_pass() {
    let stats = CoverageStatistics::new()
        .with_statistics(Baseline::ModifiedLines, Statistics::new().with(Metric::Line, Value::ratio(0, 0)));
    let verdict = evaluate(&[gate(Metric::Line, Baseline::ModifiedLines, 0.0)], &stats);
    assert!(!verdict.passed());
    assert_eq!(verdict.items[0].actual_text, "n/a");
}

// =============================================================================
// Counts
// =============================================================================

#[test]
fn given_count_metric_when_evaluating_then_higher_is_better() {
    let stats = CoverageStatistics::new()
        .with_statistics(Baseline::Project, Statistics::new().with(Metric::Tests, Value::count(120)));
    let verdict = evaluate(
        &[
            gate(Metric::Tests, Baseline::Project, 100.0),
            gate(Metric::Tests, Baseline::Project, 121.0),
        ],
        &stats,
    );
    assert!(verdict.items[0].passed());
    assert!(!verdict.items[1].passed());
    assert_eq!(verdict.items[0].actual_text, "120");
}
