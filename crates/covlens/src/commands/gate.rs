//! Handler for the `covlens gate` command.

use anyhow::Result;
use covlens_config::{GateArgs, GateFormat, Locale, ProjectConfig};
use covlens_gate::{GateStatus, OverallResult, Verdict, evaluate_with_tree, verdict_to_json};
use log::warn;

use crate::input::{JsonFiles, LOCAL_BUILD, load_build};

/// Exit code for a FAILURE verdict.
const EXIT_FAIL: i32 = 1;

/// Exit code for a WARNING verdict with `--fail-on-unstable`.
const EXIT_UNSTABLE: i32 = 2;

pub(crate) fn handle(args: GateArgs, config: &ProjectConfig, locale: Locale) -> Result<()> {
    if config.quality.gates.is_empty() {
        warn!("no quality gates configured; add [[gates]] entries to covlens.toml");
    }

    let files = JsonFiles {
        tree: args.input.tree,
        reference: args.input.reference,
        changes: args.input.changes,
    };
    let build = load_build(&files, LOCAL_BUILD, args.input.split_packages)?;
    let statistics = build.statistics()?;
    let verdict = evaluate_with_tree(&config.quality.gates, &statistics, &build.tree);

    match args.format {
        GateFormat::Text => print_text_result(&verdict, locale),
        GateFormat::Json => println!("{}", serde_json::to_string_pretty(&verdict_to_json(&verdict))?),
    }

    if let Some(code) = exit_code(verdict.overall, args.fail_on_unstable) {
        std::process::exit(code);
    }
    Ok(())
}

fn exit_code(overall: OverallResult, fail_on_unstable: bool) -> Option<i32> {
    match overall {
        OverallResult::Success => None,
        OverallResult::Warning if fail_on_unstable => Some(EXIT_UNSTABLE),
        OverallResult::Warning => None,
        OverallResult::Failure => Some(EXIT_FAIL),
    }
}

fn print_text_result(verdict: &Verdict, locale: Locale) {
    println!(
        "Quality gates: {} ({} evaluated, {} unstable, {} failed)",
        verdict.overall,
        verdict.items.len(),
        verdict.count(GateStatus::Unstable),
        verdict.count(GateStatus::Failure)
    );
    for message in verdict.messages(locale) {
        println!("  {message}");
    }
}
