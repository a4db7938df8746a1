//! # covlens-gate
//!
//! **Tier 3 (Quality Gate Evaluation)**
//!
//! Threshold rules over coverage statistics, evaluated into a build verdict.
//!
//! ## What belongs here
//! * Gate types and TOML parsing
//! * Evaluation against statistics, deltas and leaf values of the tree
//! * Verdict rendering (log messages and REST-shaped JSON)
//!
//! ## What does NOT belong here
//! * Computing statistics or deltas (see `covlens-tree`, `covlens-delta`)
//! * Deciding what a verdict does to the build (the CLI maps it to an exit code)
//!
//! ## Example
//! ```ignore
//! use covlens_gate::{GateConfig, evaluate};
//!
//! let config = GateConfig::from_file(Path::new("covlens.toml"))?;
//! let verdict = evaluate(&config.gates, &statistics);
//! ```

#![forbid(unsafe_code)]

mod evaluate;
mod report;
mod types;

pub use evaluate::{evaluate, evaluate_with_tree};
pub use report::verdict_to_json;
pub use types::{
    Aggregation, Criticality, GateConfig, GateError, GateResult, GateSource, GateStatus,
    OverallResult, QualityGate, Reading, Verdict,
};
