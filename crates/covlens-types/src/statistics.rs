use std::collections::BTreeMap;

use covlens_math::Fraction;
use serde::{Deserialize, Serialize};

use crate::{Baseline, Metric, Value};

/// Aggregated values of one baseline of one build, sorted by metric.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Statistics {
    values: BTreeMap<Metric, Value>,
}

impl Statistics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value; returns the previous value of the metric, if any.
    pub fn insert(&mut self, metric: Metric, value: Value) -> Option<Value> {
        self.values.insert(metric, value)
    }

    #[must_use]
    pub fn with(mut self, metric: Metric, value: Value) -> Self {
        self.values.insert(metric, value);
        self
    }

    #[must_use]
    pub fn get(&self, metric: Metric) -> Option<&Value> {
        self.values.get(&metric)
    }

    #[must_use]
    pub fn contains(&self, metric: Metric) -> bool {
        self.values.contains_key(&metric)
    }

    pub fn metrics(&self) -> impl Iterator<Item = Metric> + '_ {
        self.values.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, &Value)> {
        self.values.iter().map(|(m, v)| (*m, v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(Metric, Value)> for Statistics {
    fn from_iter<I: IntoIterator<Item = (Metric, Value)>>(iter: I) -> Self {
        Statistics {
            values: iter.into_iter().collect(),
        }
    }
}

/// Signed change per metric, current minus reference. Ratio metrics are in
/// percentage points.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Delta {
    values: BTreeMap<Metric, Fraction>,
}

impl Delta {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, metric: Metric, delta: Fraction) -> Option<Fraction> {
        self.values.insert(metric, delta)
    }

    #[must_use]
    pub fn get(&self, metric: Metric) -> Option<Fraction> {
        self.values.get(&metric).copied()
    }

    #[must_use]
    pub fn contains(&self, metric: Metric) -> bool {
        self.values.contains_key(&metric)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, Fraction)> + '_ {
        self.values.iter().map(|(m, d)| (*m, *d))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(Metric, Fraction)> for Delta {
    fn from_iter<I: IntoIterator<Item = (Metric, Fraction)>>(iter: I) -> Self {
        Delta {
            values: iter.into_iter().collect(),
        }
    }
}

/// Values and deltas of one build for every baseline.
///
/// A baseline without a delta entry had no comparable reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageStatistics {
    values: BTreeMap<Baseline, Statistics>,
    deltas: BTreeMap<Baseline, Delta>,
}

impl CoverageStatistics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_statistics(mut self, baseline: Baseline, statistics: Statistics) -> Self {
        self.values.insert(baseline, statistics);
        self
    }

    #[must_use]
    pub fn with_delta(mut self, baseline: Baseline, delta: Delta) -> Self {
        self.deltas.insert(baseline, delta);
        self
    }

    #[must_use]
    pub fn statistics(&self, baseline: Baseline) -> Option<&Statistics> {
        self.values.get(&baseline)
    }

    #[must_use]
    pub fn delta_of(&self, baseline: Baseline) -> Option<&Delta> {
        self.deltas.get(&baseline)
    }

    #[must_use]
    pub fn value(&self, baseline: Baseline, metric: Metric) -> Option<&Value> {
        self.statistics(baseline).and_then(|s| s.get(metric))
    }

    #[must_use]
    pub fn delta(&self, baseline: Baseline, metric: Metric) -> Option<Fraction> {
        self.delta_of(baseline).and_then(|d| d.get(metric))
    }

    pub fn baselines(&self) -> impl Iterator<Item = Baseline> + '_ {
        self.values.keys().copied()
    }

    pub fn delta_baselines(&self) -> impl Iterator<Item = Baseline> + '_ {
        self.deltas.keys().copied()
    }
}
