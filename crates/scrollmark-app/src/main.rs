//! scrollmark trace replay.
//!
//! Replays a recorded scroll trace against a milestone tracker and prints
//! every confirmed milestone event to stdout as one JSON object per line.
//!
//! Usage: `scrollmark-replay <trace.toml> [config.toml]`. Without a config
//! argument the `SCROLLMARK_CONFIG` environment variable is consulted, then
//! built-in defaults apply.

mod page;
mod replay;
mod trace;

use std::io;
use std::path::Path;

use anyhow::{Context, Result};

use scrollmark_core::config::TrackerConfig;
use scrollmark_core::sink::{FanoutSink, JsonLinesSink, LogSink};

use trace::Trace;

fn resolve_config(arg: Option<String>) -> Result<TrackerConfig> {
    let Some(path) = arg.or_else(|| std::env::var("SCROLLMARK_CONFIG").ok()) else {
        log::info!("No tracker config given, using defaults");
        return Ok(TrackerConfig::default());
    };
    let config = TrackerConfig::load(Path::new(&path))
        .with_context(|| format!("loading tracker config {path}"))?;
    log::info!("Loaded tracker config: {path}");
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let Some(trace_path) = args.next() else {
        anyhow::bail!("usage: scrollmark-replay <trace.toml> [config.toml]");
    };
    let config = resolve_config(args.next())?;
    let trace = Trace::load(Path::new(&trace_path))
        .with_context(|| format!("loading trace {trace_path}"))?;

    log::info!(
        "Replaying {} events over {}ms ({}x{} page, milestones {:?})",
        trace.events.len(),
        trace.duration_ms(),
        trace.page.viewport_height,
        trace.page.document_height,
        config.milestones,
    );

    let mut sink = FanoutSink::new()
        .with(LogSink)
        .with(JsonLinesSink::new(io::stdout()));
    let report = replay::replay(&trace, &config, &mut sink)?;

    log::info!(
        "Done after {}ms: {} events emitted, deepest milestone {}%",
        report.elapsed_ms,
        report.emitted,
        report.summary.deepest_reached,
    );
    Ok(())
}
