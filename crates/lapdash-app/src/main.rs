//! lapdash - live telemetry overlay runner
//!
//! Polls a telemetry source at a fixed rate, derives the dash values, and
//! prints one line per tick. Ctrl-C stops the loop after the current tick.

#![deny(clippy::unwrap_used)]

mod sink;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use lapdash_core::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::sink::{JsonSink, TextSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "lapdash")]
#[command(about = "Live sim racing telemetry overlay")]
#[command(version)]
struct Cli {
    /// Config file (defaults to the per-user config location)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Play back a JSON-lines recording instead of the simulated car
    #[arg(short, long)]
    replay: Option<PathBuf>,

    /// Seed for the simulated car
    #[arg(long, conflicts_with = "replay")]
    seed: Option<u64>,

    /// Override the configured tick rate (Hz)
    #[arg(long)]
    tick_rate: Option<f64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write the effective config to the config path and exit
    #[arg(long)]
    save_config: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config_path = match cli.config.clone() {
        Some(path) => path,
        None => OverlayConfig::default_path().context("Failed to locate config directory")?,
    };
    let mut config = OverlayConfig::load_or_default(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    if let Some(rate) = cli.tick_rate {
        config.tick_rate_hz = rate;
    }
    config.validate().context("Invalid configuration")?;

    if cli.save_config {
        config
            .save(&config_path)
            .with_context(|| format!("Failed to save config to {}", config_path.display()))?;
        info!("Saved config to {}", config_path.display());
        return Ok(());
    }

    let source: Box<dyn TelemetrySource> = match &cli.replay {
        Some(path) => {
            let replay = ReplaySource::open(path)
                .with_context(|| format!("Failed to open replay {}", path.display()))?;
            info!("Replaying {} ({} frames)", path.display(), replay.len());
            Box::new(replay)
        }
        None => {
            info!("No replay given, running the simulated car");
            Box::new(match cli.seed {
                Some(seed) => DemoSource::with_seed(seed),
                None => DemoSource::new(),
            })
        }
    };

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Interrupted, stopping"),
            Err(e) => warn!("Could not listen for Ctrl-C: {}", e),
        }
        on_signal.cancel();
    });

    let summary = match cli.format {
        OutputFormat::Text => run(source, TextSink::new(io::stdout()), &config, &cancel).await?,
        OutputFormat::Json => run(source, JsonSink::new(io::stdout()), &config, &cancel).await?,
    };

    info!(
        "Session {} -> {}: {} ticks",
        summary.started_at.format("%H:%M:%S"),
        summary.stopped_at.format("%H:%M:%S"),
        summary.ticks
    );
    Ok(())
}

async fn run<R: RenderSink>(
    source: Box<dyn TelemetrySource>,
    sink: R,
    config: &OverlayConfig,
    cancel: &CancellationToken,
) -> Result<SessionSummary> {
    let mut frame_loop = FrameLoop::new(
        source,
        sink,
        config.metrics.clone(),
        config.layout.clone(),
        config.tick_interval(),
    );
    frame_loop.run(cancel).await.context("Overlay stopped")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();

        let cli = Cli::try_parse_from(["lapdash", "--seed", "7", "--format", "json"]).unwrap();
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.replay.is_none());
    }

    #[test]
    fn test_seed_conflicts_with_replay() {
        let result = Cli::try_parse_from(["lapdash", "--seed", "7", "--replay", "lap.jsonl"]);
        assert!(result.is_err());
    }
}
