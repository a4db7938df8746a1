use std::collections::BTreeSet;

use covlens_types::Metric;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

/// Metrics shown when no valid selection is configured.
pub const DEFAULT_METRICS: [Metric; 8] = [
    Metric::Line,
    Metric::Branch,
    Metric::Mutation,
    Metric::TestStrength,
    Metric::Ncss,
    Metric::Loc,
    Metric::CyclomaticComplexity,
    Metric::CognitiveComplexity,
];

/// The `[trend]` table of the configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Number of most recent builds to plot, `0` for all.
    pub build_count: usize,
    /// Plot lines even when the metrics could be stacked.
    pub use_lines: bool,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            build_count: 50,
            use_lines: false,
        }
    }
}

#[must_use]
pub fn default_metrics() -> BTreeSet<Metric> {
    DEFAULT_METRICS.into_iter().collect()
}

/// Parse `{"metrics": {"LINE": true, "LOC": false}}` into the selected
/// metrics.
///
/// Anything that is not exactly that shape (malformed JSON, an empty map, an
/// unknown metric name or a non-boolean flag) selects [`DEFAULT_METRICS`].
#[must_use]
pub fn visible_metrics(json: &str) -> BTreeSet<Metric> {
    match parse_selection(json) {
        Some(selection) => selection,
        None => {
            warn!("invalid metric selection, using the default metrics");
            default_metrics()
        }
    }
}

fn parse_selection(json: &str) -> Option<BTreeSet<Metric>> {
    let root: Json = serde_json::from_str(json).ok()?;
    let entries = root.get("metrics")?.as_object()?;
    if entries.is_empty() {
        return None;
    }
    let mut selected = BTreeSet::new();
    for (name, flag) in entries {
        let metric: Metric = name.parse().ok()?;
        if flag.as_bool()? {
            selected.insert(metric);
        }
    }
    Some(selected)
}
