//! Handler for the `covlens stats` command.

use anyhow::Result;
use covlens_config::{Locale, StatsArgs};
use covlens_format::coverage_to_json;

use crate::input::{JsonFiles, LOCAL_BUILD, load_build};

pub(crate) fn handle(args: StatsArgs, locale: Locale) -> Result<()> {
    let files = JsonFiles {
        tree: args.input.tree,
        reference: args.input.reference,
        changes: args.input.changes,
    };
    let build = load_build(&files, LOCAL_BUILD, args.input.split_packages)?;
    let statistics = build.statistics()?;

    let json = serde_json::to_string_pretty(&coverage_to_json(&statistics, locale))?;
    println!("{json}");
    Ok(())
}
