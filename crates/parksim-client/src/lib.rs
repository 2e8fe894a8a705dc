//! ---
//! park_section: "05-networking-external-interfaces"
//! park_subsection: "module"
//! park_type: "source"
//! park_scope: "code"
//! park_description: "Remote update client module exports."
//! park_version: "v0.1.0"
//! park_owner: "tbd"
//! ---
//! HTTP client for pushing occupancy samples into the hosted backend.

pub mod updater;

pub use reqwest::StatusCode;
pub use updater::{OccupancyWriter, SlotUpdater, UpdateError};
