//! Gate, result and verdict type definitions.

use std::fmt;
use std::path::Path;

use covlens_format::{UNDEFINED, format_decimal, format_delta, format_value};
use covlens_math::Fraction;
use covlens_types::{Baseline, Locale, Metric, Value};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading gate configuration.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("Failed to read gate configuration: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse gate TOML: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Gate '{name}' reads the delta of '{baseline}', which never has one")]
    NoDelta { name: String, baseline: Baseline },

    #[error("Gate '{name}' has a threshold that is not a number")]
    InvalidThreshold { name: String },
}

/// The `[[gates]]` tables of a configuration file. Other keys are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    pub gates: Vec<QualityGate>,
}

impl GateConfig {
    /// Parse and validate gates from a TOML string.
    pub fn from_toml(s: &str) -> Result<Self, GateError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load gates from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, GateError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> Result<(), GateError> {
        self.gates.iter().try_for_each(QualityGate::validate)
    }
}

/// Build result a failed gate asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Criticality {
    /// The build is marked unstable.
    #[default]
    Unstable,
    /// The build fails.
    Failure,
}

/// What a gate compares against its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GateSource {
    /// The baseline's statistics value.
    #[default]
    Value,
    /// The baseline's delta, in percentage points for coverage metrics.
    Delta,
}

/// How values of a software metric are combined for a gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// The aggregated project value.
    #[default]
    Total,
    /// The largest value of any method or class.
    Maximum,
    /// The mean over all methods or classes.
    Average,
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aggregation::Total => write!(f, "TOTAL"),
            Aggregation::Maximum => write!(f, "MAXIMUM"),
            Aggregation::Average => write!(f, "AVERAGE"),
        }
    }
}

/// A single threshold rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityGate {
    pub metric: Metric,

    #[serde(default = "default_baseline")]
    pub baseline: Baseline,

    /// Smallest accepted value; the gate passes when `actual >= threshold`.
    pub threshold: f64,

    #[serde(default)]
    pub criticality: Criticality,

    #[serde(default)]
    pub source: GateSource,

    /// Only honoured for software metrics.
    #[serde(default)]
    pub aggregation: Aggregation,
}

fn default_baseline() -> Baseline {
    Baseline::Project
}

impl QualityGate {
    #[must_use]
    pub fn new(metric: Metric, baseline: Baseline, threshold: f64, criticality: Criticality) -> Self {
        Self {
            metric,
            baseline,
            threshold,
            criticality,
            source: GateSource::Value,
            aggregation: Aggregation::Total,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: GateSource) -> Self {
        self.source = source;
        self
    }

    #[must_use]
    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    /// Whether the gate reads leaf values instead of the total.
    #[must_use]
    pub fn is_aggregated(&self) -> bool {
        self.source == GateSource::Value
            && self.aggregation != Aggregation::Total
            && !self.metric.is_coverage()
    }

    /// `"Overall project - Line Coverage"`, with the delta title of the
    /// baseline for delta gates and the aggregation appended for maximum and
    /// average gates.
    #[must_use]
    pub fn name(&self) -> String {
        let baseline = match self.source {
            GateSource::Delta => self
                .baseline
                .delta_title()
                .unwrap_or_else(|| self.baseline.display_name()),
            GateSource::Value => self.baseline.display_name(),
        };
        let name = format!("{baseline} - {}", self.metric.display_name());
        if self.is_aggregated() {
            format!("{name} ({})", self.aggregation)
        } else {
            name
        }
    }

    pub fn validate(&self) -> Result<(), GateError> {
        if !self.threshold.is_finite() {
            return Err(GateError::InvalidThreshold { name: self.name() });
        }
        if self.source == GateSource::Delta && self.baseline.delta_title().is_none() {
            return Err(GateError::NoDelta {
                name: self.name(),
                baseline: self.baseline,
            });
        }
        Ok(())
    }
}

/// Outcome of one gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateStatus {
    /// Delta gate skipped because there is no reference build.
    Inactive,
    Success,
    Unstable,
    Failure,
}

impl GateStatus {
    /// Status of a failed gate with the given criticality.
    #[must_use]
    pub fn failed(criticality: Criticality) -> Self {
        match criticality {
            Criticality::Unstable => GateStatus::Unstable,
            Criticality::Failure => GateStatus::Failure,
        }
    }

    /// Word shown in log messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            GateStatus::Inactive => "Inactive",
            GateStatus::Success => "Success",
            GateStatus::Unstable => "Unstable",
            GateStatus::Failure => "Failed",
        }
    }
}

/// Outcome of all gates of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallResult {
    #[default]
    Success,
    Warning,
    Failure,
}

/// Inactive gates never raise the overall result.
impl From<GateStatus> for OverallResult {
    fn from(status: GateStatus) -> Self {
        match status {
            GateStatus::Inactive | GateStatus::Success => OverallResult::Success,
            GateStatus::Unstable => OverallResult::Warning,
            GateStatus::Failure => OverallResult::Failure,
        }
    }
}

impl fmt::Display for OverallResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverallResult::Success => write!(f, "SUCCESS"),
            OverallResult::Warning => write!(f, "WARNING"),
            OverallResult::Failure => write!(f, "FAILURE"),
        }
    }
}

/// What a gate actually read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reading {
    Value(Value),
    Delta(Fraction),
    /// Mean over leaf values.
    Mean(f64),
}

impl Reading {
    /// The number compared with the threshold, `None` for an empty ratio.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Reading::Value(value) => value.as_f64(),
            Reading::Delta(delta) => Some(delta.to_f64()),
            Reading::Mean(mean) => Some(*mean),
        }
    }

    #[must_use]
    pub fn format(&self, metric: Metric, locale: Locale) -> String {
        match self {
            Reading::Value(value) => format_value(value, locale),
            Reading::Delta(delta) => format_delta(metric, *delta, locale),
            Reading::Mean(mean) => format_decimal(*mean, locale),
        }
    }
}

/// Result of evaluating one gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateResult {
    pub gate: QualityGate,
    pub name: String,
    pub reading: Option<Reading>,
    /// Compared number; `None` when the gate failed closed or is inactive.
    pub actual: Option<f64>,
    /// English rendering of the reading, `n/a` when there is none.
    pub actual_text: String,
    pub status: GateStatus,
}

impl GateResult {
    #[must_use]
    pub fn new(gate: &QualityGate, reading: Option<Reading>) -> Self {
        let actual = reading.and_then(|r| r.as_f64());
        let passed = actual.is_some_and(|value| value >= gate.threshold);
        let status = if passed {
            GateStatus::Success
        } else {
            GateStatus::failed(gate.criticality)
        };
        Self {
            gate: gate.clone(),
            name: gate.name(),
            reading,
            actual,
            actual_text: format_actual(reading, gate.metric, Locale::En),
            status,
        }
    }

    /// Result of a gate that could not be evaluated; it reads nothing and
    /// does not count towards the verdict.
    #[must_use]
    pub fn inactive(gate: &QualityGate) -> Self {
        Self {
            gate: gate.clone(),
            name: gate.name(),
            reading: None,
            actual: None,
            actual_text: UNDEFINED.to_string(),
            status: GateStatus::Inactive,
        }
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == GateStatus::Success
    }

    /// `[Overall project - Line Coverage]: ≪Success≫ - (Actual value: 50.00%, Quality gate: 51.00)`.
    #[must_use]
    pub fn message(&self, locale: Locale) -> String {
        format!(
            "[{}]: ≪{}≫ - (Actual value: {}, Quality gate: {})",
            self.name,
            self.status.label(),
            format_actual(self.reading, self.gate.metric, locale),
            format_decimal(self.gate.threshold, locale)
        )
    }
}

fn format_actual(reading: Option<Reading>, metric: Metric, locale: Locale) -> String {
    reading.map_or_else(|| UNDEFINED.to_string(), |r| r.format(metric, locale))
}

/// Result of evaluating every gate, in gate order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Verdict {
    pub overall: OverallResult,
    pub items: Vec<GateResult>,
}

impl Verdict {
    /// The overall result is the worst status among the items; inactive
    /// items are ignored.
    #[must_use]
    pub fn from_results(items: Vec<GateResult>) -> Self {
        let overall = items
            .iter()
            .map(|item| OverallResult::from(item.status))
            .max()
            .unwrap_or_default();
        Self { overall, items }
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.overall == OverallResult::Success
    }

    /// Number of gates with the given status.
    #[must_use]
    pub fn count(&self, status: GateStatus) -> usize {
        self.items.iter().filter(|item| item.status == status).count()
    }

    /// One log line per gate, in gate order.
    #[must_use]
    pub fn messages(&self, locale: Locale) -> Vec<String> {
        self.items.iter().map(|item| item.message(locale)).collect()
    }
}
