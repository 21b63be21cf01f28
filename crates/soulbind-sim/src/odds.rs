//! Probability model: difficulty and capture-chance rules.
//!
//! Pure functions over plain creature numbers. Every difficulty leaves
//! through `Difficulty::clamped`, and every probability through the
//! `[MIN_CAPTURE_PROBABILITY, MAX_CAPTURE_PROBABILITY]` clamp.

use rand::Rng;

use soulbind_core::constants::*;
use soulbind_core::types::{CreatureStats, Difficulty};

/// Round 1: `base + floor(5 * health ratio) + floor(level / 5)`.
pub fn opening_difficulty(base: i32, stats: &CreatureStats) -> Difficulty {
    let health_term = (HEALTH_DIFFICULTY_WEIGHT * stats.health_ratio()).floor() as i64;
    let level_term = (stats.level / LEVELS_PER_DIFFICULTY) as i64;
    Difficulty::clamped(base as i64 + health_term + level_term)
}

/// Later rounds: `base + floor(successful_signs * 0.5)`.
pub fn round_difficulty(base: i32, successful_signs: u32) -> Difficulty {
    let sign_term = (successful_signs as f64 * DIFFICULTY_PER_SIGN).floor() as i64;
    Difficulty::clamped(base as i64 + sign_term)
}

/// Divide by the stone multiplier (floored) and re-clamp. No stone leaves it unchanged.
pub fn apply_stone(difficulty: Difficulty, stone_multiplier: Option<f64>) -> Difficulty {
    match stone_multiplier {
        Some(multiplier) => {
            let multiplier = multiplier.max(MIN_STONE_MULTIPLIER);
            let scaled = (difficulty.get() as f64 / multiplier).floor();
            Difficulty::clamped(scaled as i64)
        }
        None => difficulty,
    }
}

/// Chance the final draw binds the creature, in `[0.1, 0.9]`.
///
/// `signs / required * (0.5 + 0.3 * missing health + 0.2 * (1 - level / 50)) * stone`
pub fn capture_probability(
    successful_signs: u32,
    total_signs_required: u32,
    stats: &CreatureStats,
    stone_multiplier: Option<f64>,
) -> f64 {
    let base = successful_signs as f64 / total_signs_required.max(1) as f64;
    let health_factor = 1.0 - stats.health_ratio();
    let level_factor = 1.0 - stats.level as f64 / ASSUMED_MAX_LEVEL;
    let stone = stone_multiplier.map_or(1.0, |m| m.max(MIN_STONE_MULTIPLIER));

    let probability = base
        * (PROBABILITY_BASE_WEIGHT
            + PROBABILITY_HEALTH_WEIGHT * health_factor
            + PROBABILITY_LEVEL_WEIGHT * level_factor)
        * stone;
    probability.clamp(MIN_CAPTURE_PROBABILITY, MAX_CAPTURE_PROBABILITY)
}

/// Draw uniformly in `[0, 1)`; success when the draw is at most `probability`.
/// Returns the outcome and the draw.
pub fn roll_outcome<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> (bool, f64) {
    let draw: f64 = rng.gen();
    (draw <= probability, draw)
}
