//! ---
//! park_section: "01-core-functionality"
//! park_subsection: "module"
//! park_type: "source"
//! park_scope: "code"
//! park_description: "Simulator loop and lifecycle management."
//! park_version: "v0.1.0"
//! park_owner: "tbd"
//! ---
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use parksim_client::{OccupancyWriter, UpdateError};
use parksim_common::SimulatorSettings;
use parksim_sim::SampleEngine;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

/// Fixed-period simulator loop.
///
/// Each tick synthesizes one sample and awaits one write before the next
/// tick fires, so ticks never overlap; a write that outlasts the period
/// delays subsequent ticks rather than piling up concurrent requests.
/// Write failures are logged and do not stop the loop.
pub struct SimulatorLoop {
    engine: SampleEngine,
    writer: Arc<dyn OccupancyWriter>,
    period: Duration,
    max_ticks: Option<u64>,
}

impl SimulatorLoop {
    pub fn new(
        engine: SampleEngine,
        writer: Arc<dyn OccupancyWriter>,
        settings: &SimulatorSettings,
    ) -> Self {
        Self {
            engine,
            writer,
            period: settings.interval,
            max_ticks: settings.max_ticks,
        }
    }

    /// Spawn the loop on the runtime and return its lifecycle handle.
    pub fn spawn(self) -> LoopHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(self.run(shutdown_rx));
        LoopHandle {
            shutdown: shutdown_tx,
            task,
        }
    }

    async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> u64 {
        // First tick fires one full period after start, matching a plain
        // repeating timer rather than an immediate first update.
        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut ticks: u64 = 0;

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    debug!(ticks, "simulator loop shutdown signal received");
                    break;
                }
                _ = ticker.tick() => {
                    let sample = self.engine.next_sample();
                    match self.writer.write(&sample).await {
                        Ok(rows) => {
                            info!(response = %rows, "updated slot {} -> {}", sample.slot_id, sample.state_word());
                        }
                        Err(UpdateError::Rejected { status, body }) => {
                            error!(%status, body = %body, "slot {} update rejected by backend", sample.slot_id);
                        }
                        Err(UpdateError::Transport(err)) => {
                            error!(error = %err, "slot {} update failed in transport", sample.slot_id);
                        }
                        Err(UpdateError::MalformedBody(err)) => {
                            error!(error = %err, "slot {} update returned a malformed representation", sample.slot_id);
                        }
                    }
                    ticks += 1;
                    if let Some(limit) = self.max_ticks {
                        if ticks >= limit {
                            debug!(ticks, "simulator loop tick limit reached");
                            break;
                        }
                    }
                }
            }
        }
        ticks
    }
}

/// Handle returned from [`SimulatorLoop::spawn`] for lifecycle control.
pub struct LoopHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<u64>,
}

impl LoopHandle {
    /// Request shutdown and wait for the loop task, returning the number of
    /// completed ticks.
    pub async fn shutdown(self) -> Result<u64> {
        let _ = self.shutdown.send(true);
        let ticks = self
            .task
            .await
            .map_err(|err| anyhow!("simulator loop join failure: {err}"))?;
        info!(ticks, "simulator loop stopped");
        Ok(ticks)
    }

    /// Wait for the loop to finish on its own; only meaningful with a tick
    /// limit configured.
    pub async fn join(self) -> Result<u64> {
        self.task
            .await
            .map_err(|err| anyhow!("simulator loop join failure: {err}"))
    }
}
