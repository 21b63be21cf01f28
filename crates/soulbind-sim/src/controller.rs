//! Capture attempt controller: the attempt lifecycle state machine.
//!
//! ```text
//! Inactive --start--> Starting --round 1 done--> HandSigns
//! HandSigns --round done, signs < required--> HandSigns (next round)
//! HandSigns --signs >= required--> Animation
//! Animation --animation elapsed--> Inactive (completion handler runs)
//! ```
//!
//! The controller exclusively owns one `QteEngine`; key presses reach the
//! engine only through [`CaptureController::press`]. Players, creatures and
//! stones are entities in the caller's `hecs::World`, passed in on each call.

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use soulbind_core::components::{CaptureStone, CapturedCreature, Creature, Health};
use soulbind_core::config::CaptureConfig;
use soulbind_core::constants::{MAX_DIFFICULTY, MIN_DIFFICULTY};
use soulbind_core::enums::{AttemptState, Direction};
use soulbind_core::error::StartError;
use soulbind_core::events::CaptureEvent;
use soulbind_core::state::AttemptView;
use soulbind_core::types::{CreatureStats, Difficulty};
use soulbind_qte::{QteEngine, QteTick};

use crate::{odds, stones};

/// Single-shot handler run when an attempt finishes its outcome animation.
pub type CompletionCallback = Box<dyn FnOnce(&mut World, &CaptureResolution)>;

/// What a finished attempt reports to its completion handler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureResolution {
    pub player: Entity,
    pub creature: Entity,
    pub creature_id: u32,
    pub stone: Option<Entity>,
    pub stone_id: Option<u32>,
    pub success: bool,
    /// Probability the outcome was drawn against.
    pub probability: f64,
}

/// The running attempt. Exists only while the controller is not `Inactive`.
struct Attempt {
    state: AttemptState,
    player: Entity,
    creature: Entity,
    creature_id: u32,
    stone: Option<Entity>,
    stone_id: Option<u32>,
    /// Stone multiplier against this creature, fixed at start.
    stone_multiplier: Option<f64>,
    successful_signs: u32,
    /// Rounds started, including the running one.
    rounds: u32,
    animation_elapsed: f64,
    probability: Option<f64>,
    outcome: Option<bool>,
    on_complete: CompletionCallback,
}

/// Drives one capture attempt at a time through repeated timed-input rounds.
pub struct CaptureController {
    config: CaptureConfig,
    engine: QteEngine,
    rng: ChaCha8Rng,
    attempt: Option<Attempt>,
    events: Vec<CaptureEvent>,
}

impl CaptureController {
    /// Create an idle controller. `seed` drives key sequences and outcome draws.
    pub fn new(config: CaptureConfig, seed: u64) -> Self {
        Self {
            config: config.sanitized(),
            engine: QteEngine::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            attempt: None,
            events: Vec::new(),
        }
    }

    /// Begin an attempt on `creature`, optionally through `stone`.
    ///
    /// Fails without side effects while another attempt is running or when
    /// the entities lack the required components. Returns the first round's
    /// difficulty.
    pub fn start(
        &mut self,
        world: &World,
        player: Entity,
        creature: Entity,
        stone: Option<Entity>,
        on_complete: CompletionCallback,
    ) -> Result<Difficulty, StartError> {
        if self.attempt.is_some() {
            return Err(StartError::Busy);
        }

        let (creature_id, stats) = read_creature(world, creature).ok_or(StartError::InvalidTarget)?;

        let (stone_id, stone_multiplier) = match stone {
            Some(entity) => {
                let stone = world
                    .get::<&CaptureStone>(entity)
                    .map_err(|_| StartError::InvalidStone)?;
                (
                    Some(stone.id),
                    Some(stones::total_capture_multiplier(&stone, stats.kind)),
                )
            }
            None => (None, None),
        };

        let difficulty = odds::apply_stone(
            odds::opening_difficulty(self.config.base_difficulty, &stats),
            stone_multiplier,
        );

        let difficulty = match self.engine.start(difficulty.get() as i32, &mut self.rng) {
            Ok(d) => d,
            Err(err) => {
                tracing::error!(%err, "first capture round refused");
                self.reset();
                return Err(StartError::EngineRefused);
            }
        };

        self.attempt = Some(Attempt {
            state: AttemptState::Starting,
            player,
            creature,
            creature_id,
            stone,
            stone_id,
            stone_multiplier,
            successful_signs: 0,
            rounds: 1,
            animation_elapsed: 0.0,
            probability: None,
            outcome: None,
            on_complete,
        });

        tracing::info!(
            creature_id,
            ?stone_id,
            difficulty = difficulty.get(),
            "capture attempt started"
        );
        self.events.push(CaptureEvent::AttemptStarted {
            creature_id,
            stone_id,
            difficulty,
        });
        self.push_round_started(1, difficulty);
        Ok(difficulty)
    }

    /// Forward a key pressed this frame to the running round.
    pub fn press(&mut self, direction: Direction) {
        if self.attempt.is_some() {
            self.engine.press(direction);
        }
    }

    /// Advance the attempt by `dt` seconds.
    ///
    /// Order within one call: engine timer and input, round consumption,
    /// the next round's start, then the animation check.
    pub fn tick(&mut self, world: &mut World, dt: f64) {
        let Some(attempt) = self.attempt.as_mut() else {
            return;
        };

        if !world.contains(attempt.creature) {
            tracing::warn!(
                creature_id = attempt.creature_id,
                "capture target left the world; cancelling attempt"
            );
            self.reset();
            return;
        }

        if attempt.state == AttemptState::Animation {
            attempt.animation_elapsed += dt.max(0.0);
        }

        if self.engine.is_active() {
            let report = self.engine.tick(dt);
            self.record_input(&report);
        }

        if self.engine.is_completed() {
            let succeeded = self.engine.is_success();
            self.engine.reset();
            self.consume_round(world, succeeded);
            self.continue_hand_signs();
        }

        let animation_done = self.attempt.as_ref().is_some_and(|a| {
            a.state == AttemptState::Animation
                && a.animation_elapsed >= self.config.animation_duration_secs
        });
        if animation_done {
            self.resolve(world);
        }
    }

    /// Abandon any attempt. Idempotent; never runs the completion handler.
    pub fn reset(&mut self) {
        if let Some(attempt) = self.attempt.take() {
            tracing::info!(
                creature_id = attempt.creature_id,
                "capture attempt cancelled"
            );
            self.events.push(CaptureEvent::AttemptCancelled);
        }
        self.engine.reset();
    }

    /// Set the base difficulty, clamped to `[1, 10]`.
    pub fn set_base_difficulty(&mut self, difficulty: i32) {
        self.config.base_difficulty = difficulty.clamp(MIN_DIFFICULTY as i32, MAX_DIFFICULTY as i32);
    }

    /// Set the signs an attempt needs, at least 1.
    pub fn set_total_signs_required(&mut self, count: u32) {
        self.config.total_signs_required = count.max(1);
    }

    /// Drain events raised since the last call.
    pub fn take_events(&mut self) -> Vec<CaptureEvent> {
        std::mem::take(&mut self.events)
    }

    fn record_input(&mut self, report: &QteTick) {
        for &cursor in &report.accepted {
            self.events.push(CaptureEvent::SignAccepted { cursor });
        }
        for miss in &report.missed {
            self.events.push(CaptureEvent::SignMissed {
                expected: miss.expected,
                pressed: miss.pressed,
                time_remaining_secs: miss.time_remaining_secs,
            });
        }
        if report.timed_out {
            let round = self.attempt.as_ref().map_or(0, |a| a.rounds);
            self.events.push(CaptureEvent::RoundTimedOut { round });
        }
    }

    /// Apply a finished round's result. Draws the outcome once enough signs are won.
    fn consume_round(&mut self, world: &World, succeeded: bool) {
        let Some(attempt) = self.attempt.as_mut() else {
            return;
        };

        // The first round always moves the attempt on, won or lost
        if attempt.state == AttemptState::Starting {
            attempt.state = AttemptState::HandSigns;
        }
        if succeeded {
            attempt.successful_signs += 1;
        }
        self.events.push(CaptureEvent::RoundCompleted {
            round: attempt.rounds,
            success: succeeded,
            successful_signs: attempt.successful_signs,
        });
        tracing::debug!(
            round = attempt.rounds,
            succeeded,
            signs = attempt.successful_signs,
            "capture round consumed"
        );

        if attempt.successful_signs < self.config.total_signs_required {
            return;
        }

        let Some((_, stats)) = read_creature(world, attempt.creature) else {
            tracing::warn!(
                creature_id = attempt.creature_id,
                "capture target lost its stats; cancelling attempt"
            );
            self.reset();
            return;
        };

        let probability = odds::capture_probability(
            attempt.successful_signs,
            self.config.total_signs_required,
            &stats,
            attempt.stone_multiplier,
        );
        let (success, draw) = odds::roll_outcome(&mut self.rng, probability);

        attempt.probability = Some(probability);
        attempt.outcome = Some(success);
        attempt.state = AttemptState::Animation;
        attempt.animation_elapsed = 0.0;

        tracing::info!(
            creature_id = attempt.creature_id,
            probability,
            draw,
            success,
            "capture outcome drawn"
        );
        self.events
            .push(CaptureEvent::OutcomeDrawn { probability, success });
    }

    /// Start the next round while more signs are needed.
    fn continue_hand_signs(&mut self) {
        let Some(attempt) = self.attempt.as_mut() else {
            return;
        };
        if attempt.state != AttemptState::HandSigns
            || attempt.successful_signs >= self.config.total_signs_required
        {
            return;
        }

        let difficulty = odds::apply_stone(
            odds::round_difficulty(self.config.base_difficulty, attempt.successful_signs),
            attempt.stone_multiplier,
        );
        match self.engine.start(difficulty.get() as i32, &mut self.rng) {
            Ok(difficulty) => {
                attempt.rounds += 1;
                let round = attempt.rounds;
                self.push_round_started(round, difficulty);
            }
            Err(err) => {
                tracing::error!(%err, "next capture round refused");
                self.reset();
            }
        }
    }

    /// Finish the animation: bind into the stone on success, then run the handler.
    fn resolve(&mut self, world: &mut World) {
        let Some(attempt) = self.attempt.take() else {
            return;
        };
        self.engine.reset();

        let success = attempt.outcome.unwrap_or(false);
        if success {
            if let Some(stone) = attempt.stone {
                self.bind_into_stone(world, attempt.creature, stone);
            }
        }

        let resolution = CaptureResolution {
            player: attempt.player,
            creature: attempt.creature,
            creature_id: attempt.creature_id,
            stone: attempt.stone,
            stone_id: attempt.stone_id,
            success,
            probability: attempt.probability.unwrap_or(0.0),
        };

        tracing::info!(
            creature_id = attempt.creature_id,
            success,
            "capture attempt resolved"
        );
        self.events.push(CaptureEvent::AttemptResolved {
            creature_id: attempt.creature_id,
            success,
        });

        // Controller is already Inactive here, so the handler may start a new attempt
        (attempt.on_complete)(world, &resolution);
    }

    fn bind_into_stone(&mut self, world: &mut World, creature: Entity, stone: Entity) {
        let record = match world.get::<&Creature>(creature) {
            Ok(c) => CapturedCreature {
                creature_id: c.id,
                name: c.name.clone(),
                kind: c.kind,
                level: c.level,
            },
            Err(_) => return,
        };

        match world.get::<&mut CaptureStone>(stone) {
            Ok(mut stone) => {
                self.events.push(CaptureEvent::CreatureBound {
                    creature_id: record.creature_id,
                    stone_id: stone.id,
                });
                stones::capture_creature(&mut stone, record);
            }
            Err(_) => {
                tracing::warn!(
                    creature_id = record.creature_id,
                    "capture stone vanished before binding"
                );
            }
        }
    }

    fn push_round_started(&mut self, round: u32, difficulty: Difficulty) {
        self.events.push(CaptureEvent::RoundStarted {
            round,
            difficulty,
            sequence_len: self.engine.sequence().len(),
            time_budget_secs: self.engine.time_budget(),
        });
    }

    // --- Read-only projections ---

    pub fn state(&self) -> AttemptState {
        self.attempt.as_ref().map_or(AttemptState::Inactive, |a| a.state)
    }

    pub fn is_active(&self) -> bool {
        self.attempt.is_some()
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    pub fn engine(&self) -> &QteEngine {
        &self.engine
    }

    pub fn successful_signs(&self) -> u32 {
        self.attempt.as_ref().map_or(0, |a| a.successful_signs)
    }

    pub fn rounds_played(&self) -> u32 {
        self.attempt.as_ref().map_or(0, |a| a.rounds)
    }

    /// Drawn outcome, once the attempt reaches `Animation`.
    pub fn outcome(&self) -> Option<bool> {
        self.attempt.as_ref().and_then(|a| a.outcome)
    }

    pub fn probability(&self) -> Option<f64> {
        self.attempt.as_ref().and_then(|a| a.probability)
    }

    pub fn creature(&self) -> Option<Entity> {
        self.attempt.as_ref().map(|a| a.creature)
    }

    /// Outcome animation frame: `floor(elapsed / duration * frames)`, capped at the last frame.
    pub fn animation_frame(&self) -> Option<u32> {
        let attempt = self.attempt.as_ref()?;
        if attempt.state != AttemptState::Animation {
            return None;
        }
        let frames = self.config.animation_frame_count.max(1);
        let duration = self.config.animation_duration_secs;
        if duration <= 0.0 {
            return Some(frames - 1);
        }
        let frame = (attempt.animation_elapsed / duration * frames as f64).floor() as u32;
        Some(frame.min(frames - 1))
    }

    pub fn view(&self) -> AttemptView {
        AttemptView {
            state: self.state(),
            creature_id: self.attempt.as_ref().map(|a| a.creature_id),
            stone_id: self.attempt.as_ref().and_then(|a| a.stone_id),
            successful_signs: self.successful_signs(),
            total_signs_required: self.config.total_signs_required,
            round: self.rounds_played(),
            animation_frame: self.animation_frame(),
            outcome: self.outcome(),
            qte: self.engine.view(),
        }
    }
}

/// Read the capture-relevant numbers of a creature entity.
pub fn read_creature(world: &World, entity: Entity) -> Option<(u32, CreatureStats)> {
    let creature = world.get::<&Creature>(entity).ok()?;
    let health = world.get::<&Health>(entity).ok()?;
    Some((
        creature.id,
        CreatureStats {
            health: health.current,
            max_health: health.max,
            level: creature.level,
            kind: creature.kind,
        },
    ))
}
