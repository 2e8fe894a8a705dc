//! ---
//! park_section: "01-core-functionality"
//! park_subsection: "module"
//! park_type: "source"
//! park_scope: "code"
//! park_description: "Shared primitives for the simulator runtime."
//! park_version: "v0.1.0"
//! park_owner: "tbd"
//! ---
//! Shared primitives for the ParkSim workspace.
//! This crate exposes configuration loading and logging utilities consumed
//! by the client, the loop, and the daemon binary.

pub mod config;
pub mod logging;

pub use config::{LoggingConfig, RemoteSettings, SimulatorSettings};
pub use logging::{init_tracing, LogFormat};
