//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in the simulation crate, not here.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// The player performing captures. Passed through opaquely to completion handlers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
}

/// A wild creature that can be targeted by a capture attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creature {
    /// Stable id used by commands and snapshots.
    pub id: u32,
    pub name: String,
    pub kind: CreatureKind,
    pub level: u32,
}

/// Hit points of a creature.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f64,
    pub max: f64,
}

/// Marker attached to a creature once it has been bound to a stone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Captured {
    /// Stone that holds the creature, if the attempt used one.
    pub stone_id: Option<u32>,
}

/// A capture stone carried by the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureStone {
    /// Stable id used by commands and snapshots.
    pub id: u32,
    pub kind: StoneKind,
    /// Flat factor from upgrades applied on top of the kind profile (1.0 = none).
    pub refinement: f64,
    /// Creatures bound into this stone, oldest first.
    pub captured: Vec<CapturedCreature>,
}

/// Record of a creature held by a capture stone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapturedCreature {
    pub creature_id: u32,
    pub name: String,
    pub kind: CreatureKind,
    pub level: u32,
}
