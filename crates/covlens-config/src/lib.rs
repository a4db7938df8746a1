//! # covlens-config
//!
//! **Tier 4 (Configuration)**
//!
//! CLI arguments and the `covlens.toml` schema.
//!
//! ## What belongs here
//! * Clap `Parser`, `Args`, `Subcommand` structs
//! * Configuration file structs (Serde) and their lookup
//! * Default values and enums
//!
//! ## What does NOT belong here
//! * Business logic
//! * I/O beyond reading the configuration file

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use covlens_gate::GateConfig;
use covlens_trend::TrendConfig;
use serde::{Deserialize, Serialize};

pub use covlens_types::Locale;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "covlens.toml";

/// `covlens`: coverage statistics, deltas, quality gates, trends and source
/// listings from coverage trees.
#[derive(Parser, Debug)]
#[command(name = "covlens", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Configuration file (default: ./covlens.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Locale for numbers in text output (overrides the configuration file).
    #[arg(long, global = true, value_enum)]
    pub locale: Option<Locale>,

    /// Verbose output (repeat for more detail).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Statistics and deltas of every baseline as JSON.
    Stats(StatsArgs),

    /// Evaluate the configured quality gates.
    Gate(GateArgs),

    /// Build trend chart series from a build history.
    Trend(TrendArgs),

    /// Mark modified or indirectly changed lines in a rendered listing.
    Annotate(AnnotateArgs),

    /// Render a source file as an HTML listing with coverage.
    Render(RenderArgs),
}

/// Inputs shared by the commands that compute statistics.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Coverage tree of the current build (JSON).
    #[arg(long, value_name = "PATH")]
    pub tree: PathBuf,

    /// Coverage tree of the reference build (JSON).
    #[arg(long, value_name = "PATH")]
    pub reference: Option<PathBuf>,

    /// Change set of the current build (JSON).
    #[arg(long, value_name = "PATH")]
    pub changes: Option<PathBuf>,

    /// Split dotted package names into nested packages before computing.
    #[arg(long)]
    pub split_packages: bool,
}

#[derive(Args, Debug, Clone)]
pub struct StatsArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Args, Debug, Clone)]
pub struct GateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output format.
    #[arg(long, value_enum, default_value_t = GateFormat::Text)]
    pub format: GateFormat,

    /// Exit with code 2 when the verdict is WARNING.
    #[arg(long)]
    pub fail_on_unstable: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum GateFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
}

#[derive(Args, Debug, Clone)]
pub struct TrendArgs {
    /// Build history: a JSON array of `{build_id, statistics}`, oldest first.
    #[arg(long, value_name = "PATH")]
    pub history: PathBuf,

    /// Visible metrics as `{"metrics": {"LINE": true, ...}}`.
    #[arg(long, value_name = "JSON")]
    pub metrics: Option<String>,

    /// Number of most recent builds to plot (0 = all).
    #[arg(long)]
    pub build_count: Option<usize>,

    /// Plot lines instead of stacked areas.
    #[arg(long)]
    pub use_lines: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnnotateMode {
    /// Mark modified lines.
    #[default]
    Modified,
    /// Mark lines whose coverage changed indirectly.
    Indirect,
}

#[derive(Args, Debug, Clone)]
pub struct AnnotateArgs {
    /// Coverage tree of the current build (JSON).
    #[arg(long, value_name = "PATH")]
    pub tree: PathBuf,

    /// Coverage tree of the reference build, used to detect indirect changes.
    #[arg(long, value_name = "PATH")]
    pub reference: Option<PathBuf>,

    /// Change set of the current build (JSON).
    #[arg(long, value_name = "PATH")]
    pub changes: PathBuf,

    /// Path of the source file inside the tree.
    #[arg(long, value_name = "FILE")]
    pub file: String,

    /// Rendered listing to annotate (HTML).
    #[arg(long, value_name = "PATH")]
    pub listing: PathBuf,

    #[arg(long, value_enum, default_value_t = AnnotateMode::Modified)]
    pub mode: AnnotateMode,
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Coverage tree of the current build (JSON).
    #[arg(long, value_name = "PATH")]
    pub tree: PathBuf,

    /// Path of the source file inside the tree.
    #[arg(long, value_name = "FILE")]
    pub file: String,

    /// Source file to render.
    #[arg(long, value_name = "PATH")]
    pub source: PathBuf,
}

// =============================================================================
// TOML Configuration File Structures
// =============================================================================

/// Root of `covlens.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Default locale for text output.
    pub locale: Option<Locale>,

    /// Trend chart settings.
    pub trend: TrendConfig,

    /// The `[[gates]]` tables, evaluated in order.
    #[serde(flatten)]
    pub quality: GateConfig,
}

impl ProjectConfig {
    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Load and validate configuration from a file path.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        config
            .quality
            .validate()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// The explicit file when given, else `covlens.toml` in `dir` when it
    /// exists, else defaults. A missing explicit file is an error.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> std::io::Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let candidate = dir.join(CONFIG_FILE);
                if candidate.is_file() {
                    Self::from_file(&candidate)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// CLI flag first, then the file, then English.
    #[must_use]
    pub fn resolve_locale(&self, global: &GlobalArgs) -> Locale {
        global.locale.or(self.locale).unwrap_or_default()
    }
}
