//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Attempt lifecycle ---
    /// Begin a capture attempt on a creature, optionally using a stone.
    StartCapture {
        creature_id: u32,
        stone_id: Option<u32>,
    },
    /// Abandon the running attempt. Never reports a result.
    CancelCapture,

    // --- Hand signs ---
    /// A directional key pressed this frame.
    PressDirection { direction: Direction },

    // --- Tuning ---
    /// Change the base difficulty (clamped to the valid range).
    SetBaseDifficulty { difficulty: i32 },
    /// Change how many signs an attempt needs (at least one).
    SetSignsRequired { count: u32 },
}
