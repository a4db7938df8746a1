//! The metric catalog.
//!
//! The catalog is a static table indexed by [`Metric`] declaration order.
//! Declaration order is also the total order used to sort metrics in
//! statistics, deltas and chart series.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TypesError;

/// The value kind a metric carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Covered and missed items; rendered as a percentage.
    Ratio,
    /// Plain integer amount (LOC, complexity, tests).
    Count,
    /// Exact rational value (cohesion, density).
    Fraction,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValueKind::Ratio => "ratio",
            ValueKind::Count => "count",
            ValueKind::Fraction => "fraction",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Metric {
    Module,
    Package,
    File,
    Class,
    Method,
    Line,
    Branch,
    Instruction,
    McdcPair,
    FunctionCall,
    Mutation,
    TestStrength,
    Tests,
    Loc,
    Ncss,
    CyclomaticComplexity,
    CognitiveComplexity,
    NpathComplexity,
    AccessToForeignData,
    FanOut,
    NumberOfAccessors,
    WeightOfClass,
    WeighedMethodCount,
    Cohesion,
    ComplexityDensity,
}

/// Static facts about a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricDescriptor {
    pub metric: Metric,
    /// Enum-style identifier, e.g. `CYCLOMATIC_COMPLEXITY`.
    pub name: &'static str,
    /// REST field name, e.g. `cyclomatic-complexity`.
    pub tag: &'static str,
    pub display_name: &'static str,
    pub kind: ValueKind,
    /// Vector coverages cannot be stacked in a trend chart.
    pub vector: bool,
}

const fn entry(
    metric: Metric,
    name: &'static str,
    tag: &'static str,
    display_name: &'static str,
    kind: ValueKind,
    vector: bool,
) -> MetricDescriptor {
    MetricDescriptor {
        metric,
        name,
        tag,
        display_name,
        kind,
        vector,
    }
}

use ValueKind::{Count, Fraction, Ratio};

static CATALOG: [MetricDescriptor; 25] = [
    entry(Metric::Module, "MODULE", "module", "Module Coverage", Ratio, false),
    entry(Metric::Package, "PACKAGE", "package", "Package Coverage", Ratio, false),
    entry(Metric::File, "FILE", "file", "File Coverage", Ratio, false),
    entry(Metric::Class, "CLASS", "class", "Class Coverage", Ratio, false),
    entry(Metric::Method, "METHOD", "method", "Method Coverage", Ratio, false),
    entry(Metric::Line, "LINE", "line", "Line Coverage", Ratio, false),
    entry(Metric::Branch, "BRANCH", "branch", "Branch Coverage", Ratio, false),
    entry(
        Metric::Instruction,
        "INSTRUCTION",
        "instruction",
        "Instruction Coverage",
        Ratio,
        false,
    ),
    entry(
        Metric::McdcPair,
        "MCDC_PAIR",
        "mcdc-pair",
        "Modified Condition and Decision Coverage",
        Ratio,
        true,
    ),
    entry(
        Metric::FunctionCall,
        "FUNCTION_CALL",
        "function-call",
        "Function Call Coverage",
        Ratio,
        true,
    ),
    entry(Metric::Mutation, "MUTATION", "mutation", "Mutation Coverage", Ratio, false),
    entry(
        Metric::TestStrength,
        "TEST_STRENGTH",
        "test-strength",
        "Test Strength",
        Ratio,
        false,
    ),
    entry(Metric::Tests, "TESTS", "tests", "Number of Tests", Count, false),
    entry(Metric::Loc, "LOC", "loc", "Lines of Code", Count, false),
    entry(
        Metric::Ncss,
        "NCSS",
        "ncss",
        "Non Commenting Source Statements",
        Count,
        false,
    ),
    entry(
        Metric::CyclomaticComplexity,
        "CYCLOMATIC_COMPLEXITY",
        "cyclomatic-complexity",
        "Cyclomatic Complexity",
        Count,
        false,
    ),
    entry(
        Metric::CognitiveComplexity,
        "COGNITIVE_COMPLEXITY",
        "cognitive-complexity",
        "Cognitive Complexity",
        Count,
        false,
    ),
    entry(
        Metric::NpathComplexity,
        "NPATH_COMPLEXITY",
        "npath-complexity",
        "N-Path Complexity",
        Count,
        false,
    ),
    entry(
        Metric::AccessToForeignData,
        "ACCESS_TO_FOREIGN_DATA",
        "access-to-foreign-data",
        "Access to Foreign Data",
        Count,
        false,
    ),
    entry(Metric::FanOut, "FAN_OUT", "fan-out", "Fan Out", Count, false),
    entry(
        Metric::NumberOfAccessors,
        "NUMBER_OF_ACCESSORS",
        "number-of-accessors",
        "Number of Accessors",
        Count,
        false,
    ),
    entry(
        Metric::WeightOfClass,
        "WEIGHT_OF_CLASS",
        "weight-of-class",
        "Weight of Class",
        Count,
        false,
    ),
    entry(
        Metric::WeighedMethodCount,
        "WEIGHED_METHOD_COUNT",
        "weighed-method-count",
        "Weighted Method Count",
        Count,
        false,
    ),
    entry(Metric::Cohesion, "COHESION", "cohesion", "Class Cohesion", Fraction, false),
    entry(
        Metric::ComplexityDensity,
        "COMPLEXITY_DENSITY",
        "complexity-density",
        "Complexity Density",
        Fraction,
        false,
    ),
];

impl Metric {
    /// Every metric in catalog order.
    pub const ALL: [Metric; 25] = [
        Metric::Module,
        Metric::Package,
        Metric::File,
        Metric::Class,
        Metric::Method,
        Metric::Line,
        Metric::Branch,
        Metric::Instruction,
        Metric::McdcPair,
        Metric::FunctionCall,
        Metric::Mutation,
        Metric::TestStrength,
        Metric::Tests,
        Metric::Loc,
        Metric::Ncss,
        Metric::CyclomaticComplexity,
        Metric::CognitiveComplexity,
        Metric::NpathComplexity,
        Metric::AccessToForeignData,
        Metric::FanOut,
        Metric::NumberOfAccessors,
        Metric::WeightOfClass,
        Metric::WeighedMethodCount,
        Metric::Cohesion,
        Metric::ComplexityDensity,
    ];

    #[must_use]
    pub fn descriptor(self) -> &'static MetricDescriptor {
        &CATALOG[self as usize]
    }

    #[must_use]
    pub fn kind(self) -> ValueKind {
        self.descriptor().kind
    }

    #[must_use]
    pub fn tag(self) -> &'static str {
        self.descriptor().tag
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        self.descriptor().display_name
    }

    #[must_use]
    pub fn is_coverage(self) -> bool {
        self.kind() == ValueKind::Ratio
    }

    #[must_use]
    pub fn is_vector(self) -> bool {
        self.descriptor().vector
    }

    /// Coverage of structural elements, derived from line coverage.
    #[must_use]
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            Metric::Module | Metric::Package | Metric::File | Metric::Class | Metric::Method
        )
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor().name)
    }
}

impl FromStr for Metric {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricCatalog::standard().resolve(s)
    }
}

/// Read-only view of the metric table. Every name lookup, including
/// `Metric::from_str` used by configuration and trend selections, resolves
/// through [`MetricCatalog::standard`].
#[derive(Debug, Clone, Copy)]
pub struct MetricCatalog {
    entries: &'static [MetricDescriptor],
}

impl MetricCatalog {
    #[must_use]
    pub fn standard() -> Self {
        MetricCatalog { entries: &CATALOG }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static MetricDescriptor> + use<> {
        self.entries.iter()
    }

    /// Look up by enum name (`LINE`), ignoring ASCII case.
    pub fn by_name(&self, name: &str) -> Result<Metric, TypesError> {
        self.entries
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
            .map(|d| d.metric)
            .ok_or_else(|| TypesError::UnknownMetric(name.to_string()))
    }

    /// Look up by REST tag (`cyclomatic-complexity`).
    pub fn by_tag(&self, tag: &str) -> Result<Metric, TypesError> {
        self.entries
            .iter()
            .find(|d| d.tag == tag)
            .map(|d| d.metric)
            .ok_or_else(|| TypesError::UnknownMetric(tag.to_string()))
    }

    /// Accept either an enum name or a tag.
    pub fn resolve(&self, text: &str) -> Result<Metric, TypesError> {
        let text = text.trim();
        self.by_name(text).or_else(|_| self.by_tag(text))
    }

    pub fn coverage_metrics(&self) -> impl Iterator<Item = Metric> + use<> {
        self.iter().filter(|d| d.kind == ValueKind::Ratio).map(|d| d.metric)
    }

    pub fn software_metrics(&self) -> impl Iterator<Item = Metric> + use<> {
        self.iter().filter(|d| d.kind != ValueKind::Ratio).map(|d| d.metric)
    }
}
