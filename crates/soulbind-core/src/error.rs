//! Error types for capture operations.
//!
//! Out-of-range gameplay numbers are clamped, never reported. Only starting
//! an attempt and resolving command targets can fail.

use thiserror::Error;

/// Why a capture attempt could not be started.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartError {
    #[error("a capture attempt is already in progress")]
    Busy,

    #[error("the timed-input engine refused to start a round")]
    EngineRefused,

    #[error("target entity is not a creature with health")]
    InvalidTarget,

    #[error("stone entity carries no capture stone")]
    InvalidStone,
}

/// Why a queued player command was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("no creature with id {0}")]
    UnknownCreature(u32),

    #[error("no capture stone with id {0}")]
    UnknownStone(u32),

    #[error("creature {0} has already been captured")]
    AlreadyCaptured(u32),

    #[error("no player has been spawned")]
    NoPlayer,

    #[error(transparent)]
    Start(#[from] StartError),
}

/// Failure to load a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
