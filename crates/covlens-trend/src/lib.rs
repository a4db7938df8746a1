//! # covlens-trend
//!
//! **Tier 3 (Trend Series)**
//!
//! Turns an ordered build history into chart-ready series.
//!
//! ## What belongs here
//! * [`build_series`]: one series per visible metric, one point per build
//! * Chart mode (stacked areas or plain lines) and axis range
//! * [`TrendConfig`] and parsing of the visible-metrics selection
//!
//! ## What does NOT belong here
//! * Loading builds (the CLI reads a history file)
//! * Drawing the chart

#![forbid(unsafe_code)]

mod config;
mod series;

pub use config::{DEFAULT_METRICS, TrendConfig, default_metrics, visible_metrics};
pub use series::{BuildPoint, ChartMode, Series, SeriesModel, build_series};
