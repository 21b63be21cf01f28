//! Scripted input source that plays capture attempts from snapshots.
//!
//! Reads only the published `SessionSnapshot`, like a player watching the
//! screen: starts an attempt on the first uncaptured creature, then presses
//! the shown key after a reaction delay, sometimes fumbling it.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use soulbind_core::commands::PlayerCommand;
use soulbind_core::enums::{AttemptState, Direction, QteState};
use soulbind_core::state::{QteView, SessionSnapshot};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutopilotConfig {
    pub seed: u64,
    /// Ticks between noticing a key and pressing it.
    pub reaction_ticks: u32,
    /// Chance each press hits a wrong direction, in `[0, 1]`.
    pub mistake_rate: f64,
}

impl Default for AutopilotConfig {
    fn default() -> Self {
        Self {
            seed: 7,
            reaction_ticks: 9,
            mistake_rate: 0.08,
        }
    }
}

pub struct Autopilot {
    config: AutopilotConfig,
    rng: ChaCha8Rng,
    stone_id: Option<u32>,
    wait: u32,
}

impl Autopilot {
    /// `stone_id` is thrown on every attempt; `None` captures bare-handed.
    pub fn new(config: AutopilotConfig, stone_id: Option<u32>) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let wait = config.reaction_ticks;
        Self {
            config,
            rng,
            stone_id,
            wait,
        }
    }

    /// Commands to queue in response to one snapshot.
    pub fn observe(&mut self, snapshot: &SessionSnapshot) -> Vec<PlayerCommand> {
        match snapshot.attempt.state {
            AttemptState::Inactive => {
                self.wait = self.config.reaction_ticks;
                self.choose_target(snapshot)
                    .map(|creature_id| PlayerCommand::StartCapture {
                        creature_id,
                        stone_id: self.stone_id,
                    })
                    .into_iter()
                    .collect()
            }
            AttemptState::Animation => Vec::new(),
            AttemptState::Starting | AttemptState::HandSigns => {
                self.press(&snapshot.attempt.qte).into_iter().collect()
            }
        }
    }

    fn choose_target(&self, snapshot: &SessionSnapshot) -> Option<u32> {
        snapshot
            .creatures
            .iter()
            .find(|creature| !creature.captured)
            .map(|creature| creature.id)
    }

    fn press(&mut self, qte: &QteView) -> Option<PlayerCommand> {
        if qte.state != QteState::Active {
            return None;
        }
        let expected = *qte.sequence.get(qte.cursor)?;
        if self.wait > 0 {
            self.wait -= 1;
            return None;
        }
        self.wait = self.config.reaction_ticks;

        let direction = if self.rng.gen_bool(self.config.mistake_rate.clamp(0.0, 1.0)) {
            self.fumble(expected)
        } else {
            expected
        };
        Some(PlayerCommand::PressDirection { direction })
    }

    /// Any direction except `expected`.
    fn fumble(&mut self, expected: Direction) -> Direction {
        let all = Direction::ALL;
        let index = all.iter().position(|d| *d == expected).unwrap_or(0);
        let offset = self.rng.gen_range(1..all.len());
        all[(index + offset) % all.len()]
    }
}
