//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Difficulty;

/// Capture lifecycle events, in the order they happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CaptureEvent {
    /// An attempt began.
    AttemptStarted {
        creature_id: u32,
        stone_id: Option<u32>,
        difficulty: Difficulty,
    },
    /// A timed-input round began.
    RoundStarted {
        round: u32,
        difficulty: Difficulty,
        sequence_len: usize,
        time_budget_secs: f64,
    },
    /// The expected key was pressed.
    SignAccepted { cursor: usize },
    /// A wrong key was pressed and time was deducted.
    SignMissed {
        expected: Direction,
        pressed: Direction,
        time_remaining_secs: f64,
    },
    /// The round's timer ran out.
    RoundTimedOut { round: u32 },
    /// A round was consumed by the attempt.
    RoundCompleted {
        round: u32,
        success: bool,
        successful_signs: u32,
    },
    /// The final probability draw happened; the outcome animation starts.
    OutcomeDrawn { probability: f64, success: bool },
    /// A creature was recorded into a capture stone.
    CreatureBound { creature_id: u32, stone_id: u32 },
    /// The attempt finished and its completion handler ran.
    AttemptResolved { creature_id: u32, success: bool },
    /// The attempt was abandoned without a result.
    AttemptCancelled,
    /// A start request was refused.
    StartRejected { creature_id: u32, reason: String },
}
