use thiserror::Error;

use crate::ValueKind;

/// Errors raised by the value algebra and by name lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("unknown metric: {0}")]
    UnknownMetric(String),

    #[error("unknown baseline: {0}")]
    UnknownBaseline(String),

    #[error("unknown locale: {0}")]
    UnknownLocale(String),

    #[error("cannot combine a {left} value with a {right} value")]
    IncompatibleValues { left: ValueKind, right: ValueKind },
}
