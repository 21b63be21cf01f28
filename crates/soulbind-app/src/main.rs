//! soulbind - headless capture session runner
//!
//! Usage:
//!   soulbind [--config PATH] [--seed N] [--attempts N]
//!   soulbind --help

use std::sync::mpsc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use soulbind_app::cli;
use soulbind_app::state::AppState;
use soulbind_core::config::CaptureConfig;
use soulbind_core::enums::AttemptState;
use soulbind_core::state::ResolutionView;

/// Snapshots the loop may run ahead of this thread.
const SNAPSHOT_BACKLOG: usize = 64;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        cli::print_help();
        return Ok(());
    }

    let options = match cli::parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            cli::print_help();
            std::process::exit(1);
        }
    };

    init_logging();

    let capture = match &options.config {
        Some(path) => CaptureConfig::load(path)
            .with_context(|| format!("Failed to load capture config from {}", path.display()))?,
        None => CaptureConfig::default(),
    };

    let state = AppState::new();
    let (snap_tx, snap_rx) = mpsc::sync_channel(SNAPSHOT_BACKLOG);
    state
        .start(options.loop_config(capture), Some(snap_tx))
        .context("Failed to start game loop")?;

    let mut resolved: Vec<ResolutionView> = Vec::new();
    while resolved.len() < options.attempts {
        let Ok(snapshot) = snap_rx.recv() else {
            tracing::warn!("game loop stopped early");
            break;
        };

        for resolution in &snapshot.resolutions {
            tracing::info!(
                creature_id = resolution.creature_id,
                success = resolution.success,
                probability = resolution.probability,
                tick = resolution.tick,
                "attempt resolved"
            );
        }
        resolved.extend(snapshot.resolutions);

        let exhausted = snapshot.attempt.state == AttemptState::Inactive
            && snapshot.creatures.iter().all(|c| c.captured);
        if exhausted {
            tracing::warn!("every creature in the meadow is captured");
            break;
        }
    }

    // Unblock the loop's observer send before joining it
    drop(snap_rx);
    state.shutdown().context("Failed to stop game loop")?;

    let captured = resolved.iter().filter(|r| r.success).count();
    tracing::info!(attempts = resolved.len(), captured, "session finished");

    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
