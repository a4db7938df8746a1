pub(crate) mod annotate;
pub(crate) mod gate;
pub(crate) mod render;
pub(crate) mod stats;
pub(crate) mod trend;

use anyhow::Result;
use covlens_config::{Cli, Commands, ProjectConfig};

pub(crate) fn dispatch(cli: Cli, config: &ProjectConfig) -> Result<()> {
    let locale = config.resolve_locale(&cli.global);
    match cli.command {
        Commands::Stats(args) => stats::handle(args, locale),
        Commands::Gate(args) => gate::handle(args, config, locale),
        Commands::Trend(args) => trend::handle(args, config),
        Commands::Annotate(args) => annotate::handle(args),
        Commands::Render(args) => render::handle(args),
    }
}
