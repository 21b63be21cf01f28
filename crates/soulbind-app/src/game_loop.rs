//! Game loop thread: runs the capture session at 60Hz and publishes snapshots.
//!
//! The session is created inside this thread because completion handlers are
//! not `Send`. Commands arrive via `mpsc` channel. Snapshots are stored in
//! shared state for synchronous polling and forwarded to an optional observer.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use soulbind_core::constants::TICK_RATE;
use soulbind_core::enums::StoneKind;
use soulbind_core::state::SessionSnapshot;
use soulbind_sim::session::{CaptureSession, SessionConfig};

use crate::autopilot::{Autopilot, AutopilotConfig};
use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// What the loop thread sets up before its first tick.
#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub session: SessionConfig,
    /// Wild creatures spawned into the meadow.
    pub meadow_size: usize,
    /// Stones handed to the player. The autopilot throws the first one.
    pub stones: Vec<StoneKind>,
    pub autopilot: Option<AutopilotConfig>,
    /// Sleep between ticks to hold real time. Off runs as fast as possible.
    pub paced: bool,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            meadow_size: 6,
            stones: vec![StoneKind::Plain],
            autopilot: None,
            paced: true,
        }
    }
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    config: LoopConfig,
    latest_snapshot: Arc<Mutex<Option<SessionSnapshot>>>,
    observer: Option<mpsc::SyncSender<SessionSnapshot>>,
) -> std::io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("soulbind-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, &latest_snapshot, observer);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: LoopConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<SessionSnapshot>>,
    mut observer: Option<mpsc::SyncSender<SessionSnapshot>>,
) {
    let mut session = CaptureSession::new(config.session.clone());
    let creatures = session.populate_meadow(config.meadow_size);
    let stones: Vec<u32> = config
        .stones
        .iter()
        .map(|kind| session.spawn_stone(*kind))
        .collect();
    let mut autopilot = config
        .autopilot
        .map(|pilot| Autopilot::new(pilot, stones.first().copied()));

    tracing::info!(
        seed = config.session.seed,
        creatures = creatures.len(),
        stones = stones.len(),
        autopilot = autopilot.is_some(),
        "game loop started"
    );

    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Player(cmd)) => session.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) => {
                    tracing::info!(tick = session.time().tick, "game loop shutting down");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick
        let snapshot = session.tick();

        // 3. Let the autopilot react; its commands land on the next tick
        if let Some(pilot) = autopilot.as_mut() {
            session.queue_commands(pilot.observe(&snapshot));
        }

        // 4. Forward to the observer, forgetting it once it hangs up
        if let Some(tx) = &observer {
            if tx.send(snapshot.clone()).is_err() {
                tracing::debug!("snapshot observer disconnected");
                observer = None;
            }
        }

        // 5. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if !config.paced {
            continue;
        }

        // 6. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind, reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}
