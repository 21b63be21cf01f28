//! Session state snapshot: everything a renderer samples after each tick.

use serde::{Deserialize, Serialize};

use crate::components::CapturedCreature;
use crate::enums::*;
use crate::events::CaptureEvent;
use crate::types::{Difficulty, SimTime};

/// Complete visible state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub time: SimTime,
    pub attempt: AttemptView,
    pub creatures: Vec<CreatureView>,
    pub stones: Vec<StoneView>,
    /// Events raised during this tick.
    pub events: Vec<CaptureEvent>,
    /// Attempts that resolved during this tick.
    pub resolutions: Vec<ResolutionView>,
}

/// The capture attempt as seen by the UI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttemptView {
    pub state: AttemptState,
    pub creature_id: Option<u32>,
    pub stone_id: Option<u32>,
    pub successful_signs: u32,
    pub total_signs_required: u32,
    /// Rounds started so far in this attempt, including the running one.
    pub round: u32,
    /// Outcome animation frame, only during `Animation`.
    pub animation_frame: Option<u32>,
    /// Drawn outcome, once known.
    pub outcome: Option<bool>,
    pub qte: QteView,
}

/// The running timed-input round, for the sequence strip and progress bar.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QteView {
    pub state: QteState,
    pub difficulty: Option<Difficulty>,
    pub sequence: Vec<Direction>,
    /// Index of the next expected key.
    pub cursor: usize,
    pub time_remaining_secs: f64,
    pub time_budget_secs: f64,
    /// Remaining over budget, `0.0..=1.0`.
    pub time_fraction: f64,
}

/// A wild or captured creature in the world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatureView {
    pub id: u32,
    pub name: String,
    pub kind: CreatureKind,
    pub level: u32,
    pub health: f64,
    pub max_health: f64,
    pub captured: bool,
}

/// A capture stone and what it holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoneView {
    pub id: u32,
    pub kind: StoneKind,
    pub captured: Vec<CapturedCreature>,
}

/// Result of a finished attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionView {
    pub creature_id: u32,
    pub stone_id: Option<u32>,
    pub success: bool,
    pub probability: f64,
    pub tick: u64,
}
