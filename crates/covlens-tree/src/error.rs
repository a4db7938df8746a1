use covlens_types::{Metric, TypesError, ValueKind};
use thiserror::Error;

use crate::NodeKind;

/// Structural integrity violations. Fatal for the build being processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("node '{parent}' has duplicate child {kind:?} '{name}'")]
    DuplicateChild {
        parent: String,
        kind: NodeKind,
        name: String,
    },

    #[error("a {child:?} node ('{name}') cannot be nested in a {parent:?} node")]
    InvalidNesting {
        parent: NodeKind,
        child: NodeKind,
        name: String,
    },

    #[error("node '{node}' stores a {found} value for {metric}, which expects {expected}")]
    KindMismatch {
        node: String,
        metric: Metric,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("node '{node}' stores {metric}, which is derived from line coverage")]
    DerivedMetricStored { node: String, metric: Metric },

    #[error("{kind:?} node '{node}' carries line counters; only files may")]
    LinesOutsideFile { node: String, kind: NodeKind },

    #[error("tree is nested deeper than {limit} levels at '{node}'")]
    TooDeep { node: String, limit: usize },

    #[error("cannot aggregate {metric} at '{node}': {source}")]
    IncompatibleValues {
        node: String,
        metric: Metric,
        #[source]
        source: TypesError,
    },
}
