//! The timed-input engine: one quick-time-event round at a time.
//!
//! Lifecycle: `Inactive --start--> Active --tick--> Completed --reset--> Inactive`.
//! A completed round stays `Completed` until its owner reads the result and
//! calls [`QteEngine::reset`]; starting over an unconsumed result is refused.

use rand::Rng;
use thiserror::Error;

use soulbind_core::constants::QTE_WRONG_KEY_PENALTY_SECS;
use soulbind_core::enums::{Direction, QteState};
use soulbind_core::state::QteView;
use soulbind_core::types::Difficulty;

use crate::sequence;

/// Returned by [`QteEngine::start`] when a round is running or its result is unconsumed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("timed-input round already in progress ({0:?})")]
pub struct RoundInProgress(pub QteState);

/// A wrong key judged during a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Miss {
    pub expected: Direction,
    pub pressed: Direction,
    /// Time left after the penalty was applied.
    pub time_remaining_secs: f64,
}

/// What happened during one [`QteEngine::tick`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QteTick {
    /// Cursor value after each accepted key, in press order.
    pub accepted: Vec<usize>,
    pub missed: Vec<Miss>,
    /// The timer ran out this tick.
    pub timed_out: bool,
    /// Set when the round completed this tick: `Some(true)` on a full match.
    pub completed: Option<bool>,
}

/// Timed-input engine state. Owned exclusively by the capture controller.
#[derive(Debug, Clone, Default)]
pub struct QteEngine {
    state: QteState,
    difficulty: Option<Difficulty>,
    sequence: Vec<Direction>,
    cursor: usize,
    time_budget: f64,
    time_remaining: f64,
    succeeded: bool,
    /// Keys pressed since the last tick.
    pending: Vec<Direction>,
}

impl QteEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a round. `difficulty` is clamped to `[1, 10]`.
    ///
    /// Refused without any state change while a round is `Active` or `Completed`.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        difficulty: i32,
        rng: &mut R,
    ) -> Result<Difficulty, RoundInProgress> {
        if self.state != QteState::Inactive {
            return Err(RoundInProgress(self.state));
        }

        let difficulty = Difficulty::clamped(difficulty as i64);
        let len = sequence::sequence_len(difficulty);

        self.difficulty = Some(difficulty);
        self.sequence = sequence::generate(rng, len);
        self.cursor = 0;
        self.time_budget = sequence::time_budget_secs(difficulty);
        self.time_remaining = self.time_budget;
        self.succeeded = false;
        self.pending.clear();
        self.state = QteState::Active;

        tracing::debug!(
            difficulty = difficulty.get(),
            len,
            budget_secs = self.time_budget,
            "timed-input round started"
        );
        Ok(difficulty)
    }

    /// Register a key pressed this frame. Judged on the next tick; ignored unless active.
    pub fn press(&mut self, direction: Direction) {
        if self.state == QteState::Active {
            self.pending.push(direction);
        }
    }

    /// Advance the timer by `dt` seconds and judge this frame's key presses.
    ///
    /// A round whose timer runs out fails before any of the frame's keys are judged.
    pub fn tick(&mut self, dt: f64) -> QteTick {
        let mut report = QteTick::default();
        if self.state != QteState::Active {
            self.pending.clear();
            return report;
        }

        self.time_remaining -= dt.max(0.0);
        if self.time_remaining <= 0.0 {
            self.time_remaining = 0.0;
            self.pending.clear();
            self.complete(false);
            report.timed_out = true;
            report.completed = Some(false);
            return report;
        }

        for pressed in std::mem::take(&mut self.pending) {
            if self.state != QteState::Active {
                break;
            }
            let expected = self.sequence[self.cursor];
            if pressed == expected {
                self.cursor += 1;
                report.accepted.push(self.cursor);
                if self.cursor == self.sequence.len() {
                    self.complete(true);
                    report.completed = Some(true);
                }
            } else {
                self.time_remaining = (self.time_remaining - QTE_WRONG_KEY_PENALTY_SECS).max(0.0);
                report.missed.push(Miss {
                    expected,
                    pressed,
                    time_remaining_secs: self.time_remaining,
                });
            }
        }

        report
    }

    /// Drop any round and return to `Inactive`. Safe to call at any time.
    pub fn reset(&mut self) {
        self.state = QteState::Inactive;
        self.difficulty = None;
        self.sequence.clear();
        self.cursor = 0;
        self.time_budget = 0.0;
        self.time_remaining = 0.0;
        self.succeeded = false;
        self.pending.clear();
    }

    fn complete(&mut self, success: bool) {
        self.state = QteState::Completed;
        self.succeeded = success;
        tracing::debug!(success, cursor = self.cursor, "timed-input round completed");
    }

    pub fn state(&self) -> QteState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == QteState::Active
    }

    pub fn is_completed(&self) -> bool {
        self.state == QteState::Completed
    }

    /// True only for a completed round whose sequence was fully matched.
    pub fn is_success(&self) -> bool {
        self.is_completed() && self.succeeded
    }

    /// Result of the round, once completed.
    pub fn outcome(&self) -> Option<bool> {
        self.is_completed().then_some(self.succeeded)
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn sequence(&self) -> &[Direction] {
        &self.sequence
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Next key the player must press, while active.
    pub fn expected(&self) -> Option<Direction> {
        if self.is_active() {
            self.sequence.get(self.cursor).copied()
        } else {
            None
        }
    }

    pub fn time_remaining(&self) -> f64 {
        self.time_remaining
    }

    pub fn time_budget(&self) -> f64 {
        self.time_budget
    }

    /// Remaining time over budget, for the progress bar. Zero when no round exists.
    pub fn time_fraction(&self) -> f64 {
        if self.time_budget <= 0.0 {
            return 0.0;
        }
        (self.time_remaining / self.time_budget).clamp(0.0, 1.0)
    }

    /// Read-only projection for renderers.
    pub fn view(&self) -> QteView {
        QteView {
            state: self.state,
            difficulty: self.difficulty,
            sequence: self.sequence.clone(),
            cursor: self.cursor,
            time_remaining_secs: self.time_remaining,
            time_budget_secs: self.time_budget,
            time_fraction: self.time_fraction(),
        }
    }
}
