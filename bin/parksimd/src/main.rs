//! ---
//! park_section: "01-core-functionality"
//! park_subsection: "binary"
//! park_type: "source"
//! park_scope: "code"
//! park_description: "Binary entrypoint for the ParkSim daemon."
//! park_version: "v0.1.0"
//! park_owner: "tbd"
//! ---
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use parksim_client::SlotUpdater;
use parksim_common::config::{LoggingConfig, RemoteSettings, SimulatorSettings};
use parksim_common::logging::{init_tracing, LogFormat};
use parksim_core::SimulatorLoop;
use parksim_sim::SampleEngine;
use tokio::signal;
use tracing::info;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "SmartCloudPark occupancy simulator daemon",
    long_about = None
)]
struct Cli {
    /// Milliseconds between update attempts
    #[arg(long, default_value_t = 3000)]
    interval_ms: u64,

    /// Number of parking slots tracked by the backend
    #[arg(long, default_value_t = 10)]
    slots: u32,

    /// Random seed; omit to seed from entropy
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many updates instead of running forever
    #[arg(long)]
    ticks: Option<u64>,

    /// Console log format
    #[arg(long, value_enum, default_value_t = LogFormatArg::Pretty)]
    log_format: LogFormatArg,

    /// Directory for rolling daily JSON log files
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Pretty,
    StructuredJson,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::StructuredJson => LogFormat::StructuredJson,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Credentials are checked before anything else happens; a missing or
    // malformed variable exits non-zero without touching the network.
    let remote = RemoteSettings::from_env()?;

    let settings = SimulatorSettings {
        interval: Duration::from_millis(cli.interval_ms),
        slots: cli.slots,
        max_ticks: cli.ticks,
    };
    settings.validate()?;

    let logging = LoggingConfig {
        format: cli.log_format.into(),
        directory: cli.log_dir.clone(),
        file_prefix: None,
    };
    init_tracing("parksimd", &logging)?;

    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(
        interval_ms = cli.interval_ms,
        slots = cli.slots,
        seed,
        "simulator started; stop with ctrl-c"
    );

    let engine = SampleEngine::new(cli.slots, seed);
    let updater = SlotUpdater::new(remote);
    let handle = SimulatorLoop::new(engine, Arc::new(updater), &settings).spawn();

    if settings.max_ticks.is_some() {
        let ticks = handle.join().await?;
        info!(ticks, "tick limit reached; exiting");
    } else {
        signal::ctrl_c().await?;
        info!("ctrl-c received; shutting down");
        handle.shutdown().await?;
    }

    Ok(())
}
