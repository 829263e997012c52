//! Ranking driver - exercises the ranking service from the command line.
//!
//! Demo: ranking-driver demo
//! Load: ranking-driver load --threads 8 --players 10000 --updates 1000000
//!
//! Global flags: --backend memory|indexed, --config <file.json>, --log-level, --json-logs

use clap::{Parser, Subcommand};
use ranking::{init_tracing, RankingConfig, RankingService, StoreBackend, TracingConfig};
use std::path::PathBuf;

mod demo;
mod load;

#[derive(Debug, Parser)]
#[command(name = "ranking-driver", version, about = "Leaderboard store driver")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Store backend (overrides the config file)
    #[arg(long, global = true)]
    backend: Option<StoreBackend>,

    /// Log filter, e.g. "info" or "ranking=trace"
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replay the ten-player walkthrough
    Demo,
    /// Concurrent random submissions, then verify the result
    Load(load::LoadArgs),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut tracing_config = TracingConfig::new("ranking-driver").with_level(cli.log_level.clone());
    if cli.json_logs {
        tracing_config = tracing_config.with_json();
    }
    init_tracing(tracing_config);

    let mut config = match &cli.config {
        Some(path) => RankingConfig::from_file(path)?,
        None => RankingConfig::default(),
    };
    if let Some(backend) = cli.backend {
        config = config.with_backend(backend);
    }
    tracing::info!(backend = %config.backend, top = config.default_top_limit, around = config.default_around_count, "configuration loaded");

    let service = RankingService::new(config)?;

    match cli.command {
        Command::Demo => demo::run(&service)?,
        Command::Load(args) => load::run(&service, &args)?,
    }

    #[cfg(feature = "metrics")]
    println!("\n{}", service.metrics().gather());

    Ok(())
}
