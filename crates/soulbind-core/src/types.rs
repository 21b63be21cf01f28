//! Fundamental numeric and simulation types.

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_DIFFICULTY, MIN_DIFFICULTY};
use crate::enums::CreatureKind;

/// Round difficulty, always within `[MIN_DIFFICULTY, MAX_DIFFICULTY]`.
///
/// The only way to build one is through [`Difficulty::clamped`], so an
/// out-of-range difficulty cannot reach the timed-input engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", from = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: Difficulty = Difficulty(MIN_DIFFICULTY);
    pub const MAX: Difficulty = Difficulty(MAX_DIFFICULTY);

    /// Clamp any integer into the valid difficulty range.
    pub fn clamped(raw: i64) -> Self {
        Self(raw.clamp(MIN_DIFFICULTY as i64, MAX_DIFFICULTY as i64) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::MIN
    }
}

impl From<u8> for Difficulty {
    fn from(raw: u8) -> Self {
        Self::clamped(raw as i64)
    }
}

impl From<Difficulty> for u8 {
    fn from(d: Difficulty) -> Self {
        d.0
    }
}

/// The creature numbers the capture rules care about.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreatureStats {
    pub health: f64,
    pub max_health: f64,
    pub level: u32,
    pub kind: CreatureKind,
}

impl CreatureStats {
    /// Current health over max health, clamped to `[0, 1]`.
    /// A creature with no max health counts as fully drained.
    pub fn health_ratio(&self) -> f64 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (self.health / self.max_health).clamp(0.0, 1.0)
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}
