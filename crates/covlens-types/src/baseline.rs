use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TypesError;

/// The subset of the coverage tree a statistic or gate applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum Baseline {
    /// The whole tree.
    Project,
    /// Only lines touched by the change.
    ModifiedLines,
    /// Whole files touched by the change.
    ModifiedFiles,
    /// Unmodified lines whose coverage flipped.
    Indirect,
}

impl Baseline {
    pub const ALL: [Baseline; 4] = [
        Baseline::Project,
        Baseline::ModifiedLines,
        Baseline::ModifiedFiles,
        Baseline::Indirect,
    ];

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Baseline::Project => "Overall project",
            Baseline::ModifiedLines => "Modified code lines",
            Baseline::ModifiedFiles => "Modified files",
            Baseline::Indirect => "Indirect coverage changes",
        }
    }

    /// Title used when a gate reads this baseline's delta. Indirect changes
    /// have no delta.
    #[must_use]
    pub fn delta_title(self) -> Option<&'static str> {
        match self {
            Baseline::Project => Some("Overall project (difference to reference job)"),
            Baseline::ModifiedLines => Some("Modified code lines (difference to modified files)"),
            Baseline::ModifiedFiles => Some("Modified files (difference to reference job)"),
            Baseline::Indirect => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Baseline::Project => "project",
            Baseline::ModifiedLines => "modified_lines",
            Baseline::ModifiedFiles => "modified_files",
            Baseline::Indirect => "indirect",
        }
    }
}

impl fmt::Display for Baseline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Baseline {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Baseline::ALL
            .into_iter()
            .find(|b| b.as_str() == normalized)
            .ok_or_else(|| TypesError::UnknownBaseline(s.to_string()))
    }
}
