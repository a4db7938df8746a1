//! Handler for the `covlens trend` command.

use anyhow::Result;
use covlens_config::{ProjectConfig, TrendArgs};
use covlens_trend::{BuildPoint, TrendConfig, build_series, default_metrics, visible_metrics};
use log::warn;

use crate::input::read_json;

pub(crate) fn handle(args: TrendArgs, config: &ProjectConfig) -> Result<()> {
    let history: Vec<BuildPoint> = read_json(&args.history).map_err(anyhow::Error::msg)?;
    let metrics = args
        .metrics
        .as_deref()
        .map_or_else(default_metrics, visible_metrics);
    let settings = TrendConfig {
        build_count: args.build_count.unwrap_or(config.trend.build_count),
        use_lines: args.use_lines || config.trend.use_lines,
    };

    let model = build_series(&history, &metrics, &settings);
    if model.is_empty() {
        warn!("{}: nothing to plot", args.history.display());
    }
    println!("{}", serde_json::to_string_pretty(&model)?);
    Ok(())
}
