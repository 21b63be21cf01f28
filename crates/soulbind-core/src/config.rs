//! Tunable capture parameters.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

/// Capture tuning. Missing JSON fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Base difficulty, clamped to `[1, 10]`.
    pub base_difficulty: i32,
    /// Signs needed before the outcome is drawn (at least 1).
    pub total_signs_required: u32,
    /// Outcome animation length in seconds.
    pub animation_duration_secs: f64,
    /// Frames in the outcome animation.
    pub animation_frame_count: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            base_difficulty: DEFAULT_BASE_DIFFICULTY,
            total_signs_required: DEFAULT_TOTAL_SIGNS_REQUIRED,
            animation_duration_secs: DEFAULT_ANIMATION_DURATION_SECS,
            animation_frame_count: DEFAULT_ANIMATION_FRAME_COUNT,
        }
    }
}

impl CaptureConfig {
    /// Parse from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: CaptureConfig = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Apply the same clamps the runtime setters apply.
    pub fn sanitized(mut self) -> Self {
        self.base_difficulty = self
            .base_difficulty
            .clamp(MIN_DIFFICULTY as i32, MAX_DIFFICULTY as i32);
        self.total_signs_required = self.total_signs_required.max(1);
        self.animation_duration_secs = self.animation_duration_secs.max(0.0);
        self.animation_frame_count = self.animation_frame_count.max(1);
        self
    }
}
