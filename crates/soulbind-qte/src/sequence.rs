//! Round sizing and key sequence generation.

use rand::Rng;

use soulbind_core::constants::*;
use soulbind_core::enums::Direction;
use soulbind_core::types::Difficulty;

/// Number of keys in a round: `2 + difficulty / 2`.
pub fn sequence_len(difficulty: Difficulty) -> usize {
    QTE_BASE_SEQUENCE_LEN + difficulty.get() as usize / 2
}

/// Seconds allowed for a round: `5.0 + (10 - difficulty) * 0.5`.
pub fn time_budget_secs(difficulty: Difficulty) -> f64 {
    let easy_steps = (MAX_DIFFICULTY - difficulty.get()) as f64;
    QTE_BASE_TIME_BUDGET_SECS + easy_steps * QTE_TIME_PER_EASY_STEP_SECS
}

/// Draw `len` directions independently and uniformly.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<Direction> {
    (0..len)
        .map(|_| Direction::ALL[rng.gen_range(0..Direction::ALL.len())])
        .collect()
}
