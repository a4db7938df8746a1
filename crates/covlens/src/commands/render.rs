//! Handler for the `covlens render` command.

use anyhow::{Context, Result};
use covlens_config::RenderArgs;
use covlens_source::render_listing;

use crate::input::{JsonFiles, LOCAL_BUILD, load_build};

pub(crate) fn handle(args: RenderArgs) -> Result<()> {
    let files = JsonFiles {
        tree: args.tree,
        ..JsonFiles::default()
    };
    let build = load_build(&files, LOCAL_BUILD, false)?;
    let file = build.file(&args.file)?;
    let source = std::fs::read_to_string(&args.source)
        .with_context(|| format!("Failed to read source from {}", args.source.display()))?;

    println!("{}", render_listing(file, &source));
    Ok(())
}
