//! Capture simulation for SOULBIND.
//!
//! Owns the hecs world of players, creatures and capture stones, drives
//! capture attempts through the timed-input engine, and produces
//! `SessionSnapshot`s for whatever renders them.

pub mod controller;
pub mod odds;
pub mod session;
pub mod snapshot;
pub mod stones;
pub mod world_setup;

pub use controller::{CaptureController, CaptureResolution, CompletionCallback};
pub use session::{CaptureSession, SessionConfig};
pub use soulbind_core as core;
