//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Difficulty ---

/// Lowest difficulty a round can run at.
pub const MIN_DIFFICULTY: u8 = 1;

/// Highest difficulty a round can run at.
pub const MAX_DIFFICULTY: u8 = 10;

/// Default base difficulty for new attempts.
pub const DEFAULT_BASE_DIFFICULTY: i32 = 5;

/// Weight of the creature's health ratio in the opening difficulty.
pub const HEALTH_DIFFICULTY_WEIGHT: f64 = 5.0;

/// Creature levels per extra point of opening difficulty.
pub const LEVELS_PER_DIFFICULTY: u32 = 5;

/// Extra difficulty per sign already won (applied to rounds after the first).
pub const DIFFICULTY_PER_SIGN: f64 = 0.5;

// --- Timed input ---

/// Shortest possible key sequence (difficulty contributes `difficulty / 2` on top).
pub const QTE_BASE_SEQUENCE_LEN: usize = 2;

/// Time budget at maximum difficulty (seconds).
pub const QTE_BASE_TIME_BUDGET_SECS: f64 = 5.0;

/// Extra time granted per difficulty step below the maximum (seconds).
pub const QTE_TIME_PER_EASY_STEP_SECS: f64 = 0.5;

/// Time removed for each wrong key press (seconds).
pub const QTE_WRONG_KEY_PENALTY_SECS: f64 = 0.5;

// --- Attempt ---

/// Default number of successful rounds needed before the outcome is drawn.
pub const DEFAULT_TOTAL_SIGNS_REQUIRED: u32 = 5;

/// Default outcome animation duration (seconds).
pub const DEFAULT_ANIMATION_DURATION_SECS: f64 = 3.0;

/// Default number of frames in the outcome animation.
pub const DEFAULT_ANIMATION_FRAME_COUNT: u32 = 8;

// --- Probability model ---

/// Level treated as the ceiling when scaling the level factor.
pub const ASSUMED_MAX_LEVEL: f64 = 50.0;

/// Constant share of the capture probability.
pub const PROBABILITY_BASE_WEIGHT: f64 = 0.5;

/// Share of the capture probability driven by missing health.
pub const PROBABILITY_HEALTH_WEIGHT: f64 = 0.3;

/// Share of the capture probability driven by low level.
pub const PROBABILITY_LEVEL_WEIGHT: f64 = 0.2;

/// Floor of the final capture probability.
pub const MIN_CAPTURE_PROBABILITY: f64 = 0.1;

/// Ceiling of the final capture probability.
pub const MAX_CAPTURE_PROBABILITY: f64 = 0.9;

// --- Capture stones ---

/// Smallest multiplier a stone may report. Keeps the difficulty divisor positive.
pub const MIN_STONE_MULTIPLIER: f64 = 0.1;

/// Multiplier of a plain stone.
pub const PLAIN_STONE_MULTIPLIER: f64 = 1.2;

/// Multiplier of an elemental stone against any creature.
pub const ELEMENTAL_STONE_MULTIPLIER: f64 = 1.0;

/// Bonus factor when an elemental stone matches the creature's kind.
pub const STONE_AFFINITY_BONUS: f64 = 2.0;

/// Multiplier of a prism stone against any creature.
pub const PRISM_STONE_MULTIPLIER: f64 = 1.75;

// --- Wild creatures ---

/// Level range of randomly populated creatures.
pub const WILD_LEVEL_MIN: u32 = 1;
pub const WILD_LEVEL_MAX: u32 = 40;

/// Max health gained per creature level.
pub const HEALTH_PER_LEVEL: f64 = 12.0;

/// Max health of a level-0 creature.
pub const BASE_CREATURE_HEALTH: f64 = 40.0;
