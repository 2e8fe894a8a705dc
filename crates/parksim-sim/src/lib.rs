//! ---
//! park_section: "11-simulation-test-harness"
//! park_subsection: "module"
//! park_type: "source"
//! park_scope: "code"
//! park_description: "Sample synthesis module exports and shared types."
//! park_version: "v0.1.0"
//! park_owner: "tbd"
//! ---
//! Occupancy sample synthesis for the ParkSim simulator.

pub mod generator;
pub mod sample;

pub use generator::SampleEngine;
pub use sample::SlotSample;
