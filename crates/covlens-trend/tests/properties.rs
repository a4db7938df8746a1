use std::collections::BTreeSet;

use covlens_trend::{BuildPoint, TrendConfig, build_series};
use covlens_types::{Metric, Statistics, Value};
use proptest::prelude::*;

fn point() -> impl Strategy<Value = Statistics> {
    (
        prop::option::of((0u64..100, 0u64..100)),
        prop::option::of((0u64..100, 0u64..100)),
        prop::option::of(0i64..10_000),
    )
        .prop_map(|(line, branch, loc)| {
            let mut stats = Statistics::new();
            if let Some((c, m)) = line {
                stats.insert(Metric::Line, Value::ratio(c, m));
            }
            if let Some((c, m)) = branch {
                stats.insert(Metric::Branch, Value::ratio(c, m));
            }
            if let Some(amount) = loc {
                stats.insert(Metric::Loc, Value::count(amount));
            }
            stats
        })
}

fn history() -> impl Strategy<Value = Vec<BuildPoint>> {
    prop::collection::vec(point(), 0..20).prop_map(|points| {
        points
            .into_iter()
            .enumerate()
            .map(|(i, stats)| BuildPoint::new(i as u64 + 1, stats))
            .collect()
    })
}

fn all() -> BTreeSet<Metric> {
    BTreeSet::from([Metric::Line, Metric::Branch, Metric::Loc])
}

proptest! {
    #[test]
    fn one_label_per_build(history in history()) {
        let model = build_series(&history, &all(), &TrendConfig { build_count: 0, use_lines: false });
        prop_assert_eq!(model.domain_axis_labels.len(), history.len());
        for series in &model.series {
            prop_assert_eq!(series.data.len(), history.len());
        }
    }

    #[test]
    fn plotted_values_stay_on_the_percent_axis(history in history()) {
        let model = build_series(&history, &all(), &TrendConfig { build_count: 0, use_lines: false });
        for value in model.series.iter().flat_map(|s| s.data.iter().flatten()) {
            prop_assert!((0.0..=100.0).contains(value), "{value}");
        }
    }

    #[test]
    fn range_bounds_every_point(history in history()) {
        let model = build_series(&history, &all(), &TrendConfig::default());
        let values: Vec<f64> = model.series.iter().flat_map(|s| s.data.iter().flatten().copied()).collect();
        match (model.range_min, model.range_max) {
            (Some(min), Some(max)) => {
                for value in values {
                    prop_assert!(value >= min && value <= max);
                }
            }
            (None, None) => prop_assert!(values.is_empty()),
            other => prop_assert!(false, "inconsistent range {other:?}"),
        }
    }

    #[test]
    fn build_count_limits_points(history in history(), count in 1usize..10) {
        let model = build_series(&history, &all(), &TrendConfig { build_count: count, use_lines: false });
        prop_assert_eq!(model.build_numbers.len(), history.len().min(count));
        if let Some(last) = history.last() {
            prop_assert_eq!(model.build_numbers.last(), Some(&last.build_id));
        }
    }
}
