//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// One of the eight directional keys a hand sign is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

impl Direction {
    /// Every direction, in clockwise order starting at `Up`.
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::UpRight,
        Direction::Right,
        Direction::DownRight,
        Direction::Down,
        Direction::DownLeft,
        Direction::Left,
        Direction::UpLeft,
    ];
}

/// Lifecycle of a single timed-input round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum QteState {
    /// No round running.
    #[default]
    Inactive,
    /// Timer running, keys being judged.
    Active,
    /// Round finished (sequence matched or time ran out), result not yet consumed.
    Completed,
}

/// Lifecycle of a capture attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttemptState {
    /// No attempt in progress.
    #[default]
    Inactive,
    /// First round running. Its completion always advances to `HandSigns`.
    Starting,
    /// Repeated rounds until enough signs are won.
    HandSigns,
    /// Outcome drawn, outcome animation playing.
    Animation,
}

/// Elemental affinity of a wild creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreatureKind {
    Ember,
    Tide,
    Grove,
    Gale,
    Stone,
    Shade,
}

impl CreatureKind {
    pub const ALL: [CreatureKind; 6] = [
        CreatureKind::Ember,
        CreatureKind::Tide,
        CreatureKind::Grove,
        CreatureKind::Gale,
        CreatureKind::Stone,
        CreatureKind::Shade,
    ];
}

/// Capture stone variety. Each kind has its own multiplier profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoneKind {
    /// No affinity, modest multiplier.
    #[default]
    Plain,
    Ember,
    Tide,
    Grove,
    Gale,
    /// Rare stone with a strong flat multiplier.
    Prism,
}
