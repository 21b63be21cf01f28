//! SOULBIND headless application.
//!
//! Runs a capture session on a fixed-rate loop thread, fed through a
//! command channel, with an optional autopilot playing the key rounds.

pub mod autopilot;
pub mod cli;
pub mod game_loop;
pub mod state;

pub use soulbind_core as core;
