//! Series construction.

use std::collections::BTreeSet;

use covlens_math::round_f64;
use covlens_types::{Metric, Statistics, Value, ValueKind};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::TrendConfig;

/// Statistics of one build of the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildPoint {
    pub build_id: u64,
    pub statistics: Statistics,
}

impl BuildPoint {
    #[must_use]
    pub fn new(build_id: u64, statistics: Statistics) -> Self {
        Self {
            build_id,
            statistics,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChartMode {
    /// Filled areas.
    Stacked,
    /// Plain lines.
    Line,
}

/// One metric over the plotted builds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Metric tag, e.g. `line`.
    pub id: String,
    /// Display name, e.g. `Line Coverage`.
    pub name: String,
    /// One entry per build; `None` where the build has no value.
    pub data: Vec<Option<f64>>,
    pub filled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesModel {
    pub build_numbers: Vec<u64>,
    pub domain_axis_labels: Vec<String>,
    pub series: Vec<Series>,
    pub mode: ChartMode,
    pub range_max: Option<f64>,
    pub range_min: Option<f64>,
}

impl SeriesModel {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.build_numbers.is_empty()
    }
}

/// Build the chart model for `metrics` over `history`.
///
/// The history is plotted in the given order (oldest first); `build_count`
/// keeps the most recent builds. Every build gets a domain label only when
/// `build_count` is 0 or at least the history length; the default of 50 drops
/// older builds of a longer history. Metrics no plotted build carries get no
/// series. Ratio metrics plot their percentage. Count metrics plot their
/// value, scaled to 0..100 by their maximum when a ratio metric shares the
/// axis.
#[must_use]
pub fn build_series(history: &[BuildPoint], metrics: &BTreeSet<Metric>, config: &TrendConfig) -> SeriesModel {
    let start = match config.build_count {
        0 => 0,
        count => history.len().saturating_sub(count),
    };
    let window = &history[start..];

    let percent_axis = metrics.iter().any(|m| m.kind() == ValueKind::Ratio);
    let mode = chart_mode(metrics, config.use_lines);

    let series: Vec<Series> = metrics
        .iter()
        .filter(|metric| window.iter().any(|p| p.statistics.contains(**metric)))
        .map(|metric| Series {
            id: metric.tag().to_string(),
            name: metric.display_name().to_string(),
            data: plot(window, *metric, percent_axis),
            filled: mode == ChartMode::Stacked,
        })
        .collect();

    let plotted: Vec<f64> = series.iter().flat_map(|s| s.data.iter().flatten().copied()).collect();
    let range_min = plotted.iter().copied().reduce(f64::min).map(|v| round_f64(v, 2));
    let range_max = plotted.iter().copied().reduce(f64::max).map(|v| {
        if percent_axis { 100.0 } else { round_f64(v, 2) }
    });

    debug!(
        "trend: {} builds, {} series, {:?} mode",
        window.len(),
        series.len(),
        mode
    );

    SeriesModel {
        build_numbers: window.iter().map(|p| p.build_id).collect(),
        domain_axis_labels: window.iter().map(|p| format!("#{}", p.build_id)).collect(),
        series,
        mode,
        range_max,
        range_min,
    }
}

/// Stacked only for plain coverage metrics; vector coverages and software
/// metrics overlap and need lines.
fn chart_mode(metrics: &BTreeSet<Metric>, use_lines: bool) -> ChartMode {
    let stackable = metrics.iter().all(|m| m.is_coverage() && !m.is_vector());
    if stackable && !use_lines {
        ChartMode::Stacked
    } else {
        ChartMode::Line
    }
}

fn plot(window: &[BuildPoint], metric: Metric, percent_axis: bool) -> Vec<Option<f64>> {
    let raw: Vec<Option<f64>> = window
        .iter()
        .map(|p| p.statistics.get(metric).and_then(plot_value))
        .collect();
    if !percent_axis || metric.kind() == ValueKind::Ratio {
        return raw;
    }
    let max = raw.iter().flatten().copied().fold(0.0, f64::max);
    if max <= 0.0 {
        return raw;
    }
    raw.into_iter()
        .map(|v| v.map(|v| round_f64(v / max * 100.0, 2)))
        .collect()
}

fn plot_value(value: &Value) -> Option<f64> {
    match value {
        Value::Ratio(ratio) => ratio.percentage().map(|p| round_f64(p, 2)),
        Value::Count(_) | Value::Fraction(_) => value.as_f64(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(build_id: u64, line: (u64, u64), branch: (u64, u64)) -> BuildPoint {
        BuildPoint::new(
            build_id,
            Statistics::new()
                .with(Metric::Line, Value::ratio(line.0, line.1))
                .with(Metric::Branch, Value::ratio(branch.0, branch.1)),
        )
    }

    fn coverage() -> BTreeSet<Metric> {
        BTreeSet::from([Metric::Line, Metric::Branch])
    }

    #[test]
    fn labels_follow_build_ids() {
        let history = [point(1, (1, 1), (3, 1)), point(2, (1, 3), (1, 3))];
        let model = build_series(&history, &coverage(), &TrendConfig::default());
        assert_eq!(model.domain_axis_labels, vec!["#1", "#2"]);
        assert_eq!(model.build_numbers, vec![1, 2]);
    }

    #[test]
    fn ranges_span_all_series() {
        let history = [point(1, (1, 1), (3, 1)), point(2, (1, 3), (1, 3))];
        let model = build_series(&history, &coverage(), &TrendConfig::default());
        assert_eq!(model.series[0].data, vec![Some(50.0), Some(25.0)]);
        assert_eq!(model.series[1].data, vec![Some(75.0), Some(25.0)]);
        assert_eq!(model.range_max, Some(100.0));
        assert_eq!(model.range_min, Some(25.0));

        let first = build_series(&history[..1], &coverage(), &TrendConfig::default());
        assert_eq!(first.range_min, Some(50.0));
    }

    #[test]
    fn build_count_keeps_recent_builds() {
        let history: Vec<BuildPoint> = (1..=5).map(|id| point(id, (id, 1), (1, 1))).collect();
        let config = TrendConfig {
            build_count: 2,
            use_lines: false,
        };
        let model = build_series(&history, &coverage(), &config);
        assert_eq!(model.build_numbers, vec![4, 5]);
    }

    #[test]
    fn missing_metric_is_null() {
        let history = [
            point(1, (1, 1), (1, 1)),
            BuildPoint::new(2, Statistics::new().with(Metric::Line, Value::ratio(1, 0))),
        ];
        let model = build_series(&history, &coverage(), &TrendConfig::default());
        assert_eq!(model.series[1].id, "branch");
        assert_eq!(model.series[1].data, vec![Some(50.0), None]);
    }

    #[test]
    fn vector_coverage_switches_to_lines() {
        let metrics = BTreeSet::from([Metric::Line, Metric::McdcPair]);
        assert_eq!(chart_mode(&metrics, false), ChartMode::Line);
        assert_eq!(chart_mode(&coverage(), false), ChartMode::Stacked);
        assert_eq!(chart_mode(&coverage(), true), ChartMode::Line);
    }

    #[test]
    fn counts_are_scaled_next_to_ratios() {
        let history = [
            BuildPoint::new(
                1,
                Statistics::new()
                    .with(Metric::Line, Value::ratio(1, 1))
                    .with(Metric::Loc, Value::count(200)),
            ),
            BuildPoint::new(
                2,
                Statistics::new()
                    .with(Metric::Line, Value::ratio(1, 1))
                    .with(Metric::Loc, Value::count(400)),
            ),
        ];
        let metrics = BTreeSet::from([Metric::Line, Metric::Loc]);
        let model = build_series(&history, &metrics, &TrendConfig::default());
        assert_eq!(model.mode, ChartMode::Line);
        assert_eq!(model.series[1].data, vec![Some(50.0), Some(100.0)]);

        let counts_only = build_series(&history, &BTreeSet::from([Metric::Loc]), &TrendConfig::default());
        assert_eq!(counts_only.series[0].data, vec![Some(200.0), Some(400.0)]);
        assert_eq!(counts_only.range_max, Some(400.0));
        assert_eq!(counts_only.range_min, Some(200.0));
    }

    #[test]
    fn empty_history_is_an_empty_model() {
        let model = build_series(&[], &coverage(), &TrendConfig::default());
        assert!(model.is_empty());
        assert!(model.series.is_empty());
        assert_eq!(model.range_max, None);
        assert_eq!(model.range_min, None);
    }
}
