//! Capture session: the owner of everything a capture needs.
//!
//! `CaptureSession` owns the hecs world, the capture controller and the
//! command queue, runs one fixed step per `tick`, and produces
//! `SessionSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;
use std::sync::mpsc;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use soulbind_core::commands::PlayerCommand;
use soulbind_core::components::{CaptureStone, Captured, Creature};
use soulbind_core::config::CaptureConfig;
use soulbind_core::constants::DT;
use soulbind_core::enums::{CreatureKind, StoneKind};
use soulbind_core::error::CommandError;
use soulbind_core::events::CaptureEvent;
use soulbind_core::state::{ResolutionView, SessionSnapshot};
use soulbind_core::types::SimTime;

use crate::controller::{CaptureController, CaptureResolution, CompletionCallback};
use crate::{snapshot, world_setup};

/// Configuration for starting a new session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// RNG seed for determinism. Same seed = same session.
    pub seed: u64,
    pub capture: CaptureConfig,
    pub player_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            capture: CaptureConfig::default(),
            player_name: "Warden".to_string(),
        }
    }
}

/// A capture session. Owns the world and the single capture controller.
pub struct CaptureSession {
    world: World,
    time: SimTime,
    controller: CaptureController,
    /// World-population randomness, separate from the controller's stream.
    rng: ChaCha8Rng,
    player: Entity,
    next_creature_id: u32,
    next_stone_id: u32,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<CaptureEvent>,
    resolution_tx: mpsc::Sender<CaptureResolution>,
    resolution_rx: mpsc::Receiver<CaptureResolution>,
    history: Vec<ResolutionView>,
}

impl CaptureSession {
    /// Create a session with the player spawned and an empty meadow.
    pub fn new(config: SessionConfig) -> Self {
        let mut world = World::new();
        let player = world_setup::spawn_player(&mut world, &config.player_name);
        let (resolution_tx, resolution_rx) = mpsc::channel();

        Self {
            world,
            time: SimTime::default(),
            controller: CaptureController::new(config.capture, config.seed),
            rng: ChaCha8Rng::seed_from_u64(config.seed.wrapping_add(1)),
            player,
            next_creature_id: 1,
            next_stone_id: 1,
            command_queue: VecDeque::new(),
            events: Vec::new(),
            resolution_tx,
            resolution_rx,
            history: Vec::new(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the session by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> SessionSnapshot {
        self.process_commands();
        self.events.extend(self.controller.take_events());

        self.controller.tick(&mut self.world, DT);
        self.time.advance();
        self.events.extend(self.controller.take_events());

        let resolutions = self.collect_resolutions();
        let events = std::mem::take(&mut self.events);
        snapshot::build_snapshot(&self.world, &self.time, &self.controller, events, resolutions)
    }

    /// Spawn `count` random wild creatures. Returns their ids.
    pub fn populate_meadow(&mut self, count: usize) -> Vec<u32> {
        let first = self.next_creature_id;
        world_setup::populate_meadow(&mut self.world, &mut self.rng, &mut self.next_creature_id, count);
        (first..self.next_creature_id).collect()
    }

    /// Spawn a specific creature. Returns its id.
    pub fn spawn_creature(&mut self, name: &str, kind: CreatureKind, level: u32, health: f64) -> u32 {
        let id = self.next_creature_id;
        self.next_creature_id += 1;
        world_setup::spawn_creature(&mut self.world, id, name, kind, level, health);
        id
    }

    /// Give the player a capture stone. Returns its id.
    pub fn spawn_stone(&mut self, kind: StoneKind) -> u32 {
        let id = self.next_stone_id;
        self.next_stone_id += 1;
        world_setup::spawn_stone(&mut self.world, id, kind, 1.0);
        id
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn controller(&self) -> &CaptureController {
        &self.controller
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for collaborators outside the capture core (combat, AI).
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Every attempt resolved so far, oldest first.
    pub fn history(&self) -> &[ResolutionView] {
        &self.history
    }

    pub fn find_creature(&self, id: u32) -> Option<Entity> {
        let mut query = self.world.query::<&Creature>();
        let found = query
            .iter()
            .find(|(_, creature)| creature.id == id)
            .map(|(entity, _)| entity);
        found
    }

    pub fn find_stone(&self, id: u32) -> Option<Entity> {
        let mut query = self.world.query::<&CaptureStone>();
        let found = query
            .iter()
            .find(|(_, stone)| stone.id == id)
            .map(|(entity, _)| entity);
        found
    }

    /// Process all queued commands. Rejections are logged and reported as events.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            let target = match &command {
                PlayerCommand::StartCapture { creature_id, .. } => Some(*creature_id),
                _ => None,
            };
            if let Err(err) = self.handle_command(command) {
                tracing::warn!(%err, ?target, "player command rejected");
                if let Some(creature_id) = target {
                    self.events.push(CaptureEvent::StartRejected {
                        creature_id,
                        reason: err.to_string(),
                    });
                }
            }
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) -> Result<(), CommandError> {
        match command {
            PlayerCommand::StartCapture {
                creature_id,
                stone_id,
            } => {
                let creature = self
                    .find_creature(creature_id)
                    .ok_or(CommandError::UnknownCreature(creature_id))?;
                if self.world.get::<&Captured>(creature).is_ok() {
                    return Err(CommandError::AlreadyCaptured(creature_id));
                }
                let stone = stone_id
                    .map(|id| self.find_stone(id).ok_or(CommandError::UnknownStone(id)))
                    .transpose()?;
                if !self.world.contains(self.player) {
                    return Err(CommandError::NoPlayer);
                }

                let on_complete = self.completion_handler();
                self.controller
                    .start(&self.world, self.player, creature, stone, on_complete)?;
            }
            PlayerCommand::CancelCapture => {
                self.controller.reset();
            }
            PlayerCommand::PressDirection { direction } => {
                self.controller.press(direction);
            }
            PlayerCommand::SetBaseDifficulty { difficulty } => {
                self.controller.set_base_difficulty(difficulty);
            }
            PlayerCommand::SetSignsRequired { count } => {
                self.controller.set_total_signs_required(count);
            }
        }
        Ok(())
    }

    /// Handler for command-started attempts: mark the creature captured and
    /// report the resolution back to this session.
    fn completion_handler(&self) -> CompletionCallback {
        let tx = self.resolution_tx.clone();
        Box::new(move |world: &mut World, resolution: &CaptureResolution| {
            if resolution.success {
                let marker = Captured {
                    stone_id: resolution.stone_id,
                };
                if world.insert_one(resolution.creature, marker).is_err() {
                    tracing::warn!(
                        creature_id = resolution.creature_id,
                        "captured creature no longer exists"
                    );
                }
            }
            let _ = tx.send(*resolution);
        })
    }

    fn collect_resolutions(&mut self) -> Vec<ResolutionView> {
        let mut resolved = Vec::new();
        while let Ok(resolution) = self.resolution_rx.try_recv() {
            let view = ResolutionView {
                creature_id: resolution.creature_id,
                stone_id: resolution.stone_id,
                success: resolution.success,
                probability: resolution.probability,
                tick: self.time.tick,
            };
            self.history.push(view.clone());
            resolved.push(view);
        }
        resolved
    }
}
