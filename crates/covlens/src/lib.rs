//! # covlens
//!
//! **CLI Binary**
//!
//! Entry point of the `covlens` command-line application.
//!
//! ## Responsibilities
//! * Parse command line arguments
//! * Load `covlens.toml`
//! * Read trees, change sets and histories through the port adapters
//! * Dispatch commands to their handlers and map verdicts to exit codes
//!
//! This crate should contain minimal business logic.

mod commands;
mod error_hints;
mod input;

use anyhow::{Context, Result};
use clap::Parser;
use covlens_config::{Cli, ProjectConfig};

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let cwd = std::env::current_dir().context("Failed to resolve the working directory")?;
    let config = ProjectConfig::discover(cli.global.config.as_deref(), &cwd)
        .context("Failed to load configuration")?;
    log::debug!("{} quality gates configured", config.quality.gates.len());

    commands::dispatch(cli, &config)
}

/// Render an error with its cause chain and troubleshooting hints.
#[must_use]
pub fn format_error(err: &anyhow::Error) -> String {
    error_hints::format(err)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}
