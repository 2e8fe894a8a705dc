//! ---
//! park_section: "01-core-functionality"
//! park_subsection: "module"
//! park_type: "source"
//! park_scope: "code"
//! park_description: "Simulator loop and lifecycle management."
//! park_version: "v0.1.0"
//! park_owner: "tbd"
//! ---
//! The simulator loop: a fixed-period scheduler that feeds synthesized
//! occupancy samples into an [`parksim_client::OccupancyWriter`].

pub mod scheduler;

pub use scheduler::{LoopHandle, SimulatorLoop};
