//! REST-shaped JSON: metric tags mapped to formatted strings.

use covlens_types::{Baseline, CoverageStatistics, Delta, Locale, Statistics};
use serde_json::{Map, Value as Json};

use crate::{format_delta, format_value};

/// `{"line": "95.39%", "loc": "5798", ...}`.
#[must_use]
pub fn statistics_to_json(statistics: &Statistics, locale: Locale) -> Map<String, Json> {
    statistics
        .iter()
        .map(|(metric, value)| {
            (
                metric.tag().to_string(),
                Json::String(format_value(value, locale)),
            )
        })
        .collect()
}

/// `{"branch": "+5.33%", "loc": "-5798", "module": "±0%", ...}`.
#[must_use]
pub fn delta_to_json(delta: &Delta, locale: Locale) -> Map<String, Json> {
    delta
        .iter()
        .map(|(metric, change)| {
            (
                metric.tag().to_string(),
                Json::String(format_delta(metric, change, locale)),
            )
        })
        .collect()
}

fn statistics_key(baseline: Baseline) -> &'static str {
    match baseline {
        Baseline::Project => "projectStatistics",
        Baseline::ModifiedLines => "modifiedLinesStatistics",
        Baseline::ModifiedFiles => "modifiedFilesStatistics",
        Baseline::Indirect => "indirectStatistics",
    }
}

fn delta_key(baseline: Baseline) -> &'static str {
    match baseline {
        Baseline::Project => "projectDelta",
        Baseline::ModifiedLines => "modifiedLinesDelta",
        Baseline::ModifiedFiles => "modifiedFilesDelta",
        Baseline::Indirect => "indirectDelta",
    }
}

/// The full statistics object of one build: one `<baseline>Statistics` entry
/// per baseline and one `<baseline>Delta` entry per baseline that has a delta.
#[must_use]
pub fn coverage_to_json(statistics: &CoverageStatistics, locale: Locale) -> Json {
    let mut root = Map::new();
    for baseline in Baseline::ALL {
        let values = statistics
            .statistics(baseline)
            .map(|s| statistics_to_json(s, locale))
            .unwrap_or_default();
        root.insert(statistics_key(baseline).to_string(), Json::Object(values));

        if let Some(delta) = statistics.delta_of(baseline) {
            root.insert(
                delta_key(baseline).to_string(),
                Json::Object(delta_to_json(delta, locale)),
            );
        }
    }
    Json::Object(root)
}
