//! Timed-input (quick-time-event) engine for SOULBIND.
//!
//! One round at a time: generate a directional key sequence sized by
//! difficulty, count down a time budget, and judge key presses each frame.
//! No ECS dependency. Operates on plain data and an injected RNG.

pub mod engine;
pub mod sequence;

pub use engine::{QteEngine, QteTick, RoundInProgress};
pub use soulbind_core as core;
