//! Application state shared between the caller and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use thiserror::Error;

use soulbind_core::commands::PlayerCommand;
use soulbind_core::state::SessionSnapshot;

use crate::game_loop::{self, LoopConfig};

/// Commands sent from the caller to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the capture session.
    Player(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

#[derive(Error, Debug)]
pub enum LoopError {
    #[error("game loop is already running")]
    AlreadyRunning,

    #[error("game loop has not been started")]
    NotStarted,

    #[error("game loop has stopped")]
    Disconnected,

    #[error("game loop thread panicked")]
    Panicked,

    #[error("shared state lock poisoned")]
    Poisoned,

    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Shared application state.
///
/// `mpsc::Sender` is not `Sync`, so it sits behind a `Mutex` like the rest.
pub struct AppState {
    /// `None` until `start` is called.
    command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest snapshot for synchronous polling. Written by the loop thread after each tick.
    latest_snapshot: Arc<Mutex<Option<SessionSnapshot>>>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            handle: Mutex::new(None),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn the game loop thread.
    ///
    /// Every snapshot is also sent to `observer` when given. The observer
    /// channel is bounded, so its receiver must keep draining or be dropped.
    pub fn start(
        &self,
        config: LoopConfig,
        observer: Option<mpsc::SyncSender<SessionSnapshot>>,
    ) -> Result<(), LoopError> {
        let mut handle = self.handle.lock().map_err(|_| LoopError::Poisoned)?;
        if handle.is_some() {
            return Err(LoopError::AlreadyRunning);
        }

        let (cmd_tx, join) =
            game_loop::spawn_game_loop(config, self.latest_snapshot.clone(), observer)?;

        let mut tx_lock = self.command_tx.lock().map_err(|_| LoopError::Poisoned)?;
        *tx_lock = Some(cmd_tx);
        *handle = Some(join);
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.handle.lock().map(|h| h.is_some()).unwrap_or(false)
    }

    /// Forward a player command to the session.
    pub fn send_command(&self, command: PlayerCommand) -> Result<(), LoopError> {
        let tx_lock = self.command_tx.lock().map_err(|_| LoopError::Poisoned)?;
        match tx_lock.as_ref() {
            Some(tx) => tx
                .send(GameLoopCommand::Player(command))
                .map_err(|_| LoopError::Disconnected),
            None => Err(LoopError::NotStarted),
        }
    }

    /// Latest snapshot, if the loop has ticked at least once.
    pub fn snapshot(&self) -> Result<Option<SessionSnapshot>, LoopError> {
        let lock = self.latest_snapshot.lock().map_err(|_| LoopError::Poisoned)?;
        Ok(lock.clone())
    }

    /// Stop the loop thread and wait for it to exit.
    pub fn shutdown(&self) -> Result<(), LoopError> {
        let join = self
            .handle
            .lock()
            .map_err(|_| LoopError::Poisoned)?
            .take()
            .ok_or(LoopError::NotStarted)?;

        if let Some(tx) = self
            .command_tx
            .lock()
            .map_err(|_| LoopError::Poisoned)?
            .take()
        {
            // The loop may already have exited on its own
            let _ = tx.send(GameLoopCommand::Shutdown);
        }

        join.join().map_err(|_| LoopError::Panicked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    use crate::autopilot::AutopilotConfig;

    fn headless_config() -> LoopConfig {
        LoopConfig {
            autopilot: Some(AutopilotConfig::default()),
            paced: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(!state.is_running());
        assert!(state.snapshot().unwrap().is_none());
    }

    #[test]
    fn test_commands_require_running_loop() {
        let state = AppState::new();
        let err = state
            .send_command(PlayerCommand::CancelCapture)
            .unwrap_err();
        assert!(matches!(err, LoopError::NotStarted));
        assert!(matches!(state.shutdown(), Err(LoopError::NotStarted)));
    }

    #[test]
    fn test_start_poll_shutdown() {
        let state = AppState::new();
        state.start(headless_config(), None).unwrap();
        assert!(state.is_running());
        assert!(matches!(
            state.start(headless_config(), None),
            Err(LoopError::AlreadyRunning)
        ));

        let deadline = Instant::now() + Duration::from_secs(5);
        while state.snapshot().unwrap().is_none() {
            assert!(Instant::now() < deadline, "loop never published a snapshot");
            std::thread::sleep(Duration::from_millis(1));
        }
        state
            .send_command(PlayerCommand::SetSignsRequired { count: 2 })
            .unwrap();

        state.shutdown().unwrap();
        assert!(!state.is_running());
        assert!(matches!(
            state.send_command(PlayerCommand::CancelCapture),
            Err(LoopError::NotStarted)
        ));
    }
}
