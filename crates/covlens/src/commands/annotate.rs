//! Handler for the `covlens annotate` command.

use anyhow::{Context, Result};
use covlens_config::{AnnotateArgs, AnnotateMode};
use covlens_source::{annotate_indirect_changes, annotate_modified_lines};

use crate::input::{JsonFiles, LOCAL_BUILD, load_build};

pub(crate) fn handle(args: AnnotateArgs) -> Result<()> {
    let files = JsonFiles {
        tree: args.tree,
        reference: args.reference,
        changes: Some(args.changes),
    };
    let build = load_build(&files, LOCAL_BUILD, false)?;
    let file = build.file(&args.file)?;
    let listing = std::fs::read_to_string(&args.listing)
        .with_context(|| format!("Failed to read listing from {}", args.listing.display()))?;

    let annotated = match args.mode {
        AnnotateMode::Modified => {
            let lines = build
                .changes
                .modified_lines(&args.file)
                .cloned()
                .unwrap_or_default();
            annotate_modified_lines(&listing, file, &lines)?
        }
        AnnotateMode::Indirect => {
            let changes = build
                .changes
                .indirect_changes(&args.file)
                .cloned()
                .unwrap_or_default();
            annotate_indirect_changes(&listing, file, &changes)?
        }
    };
    println!("{annotated}");
    Ok(())
}
