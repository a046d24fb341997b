//! Driver-facing control surface.
//!
//! Bridges requests from whatever drives the game (the autopilot, a future
//! input layer) to the game loop thread via channels.

use anyhow::{anyhow, bail, Result};
use tracing::{info, warn};

use onslaught_core::commands::PlayerCommand;
use onslaught_core::state::GameStateSnapshot;
use onslaught_sim::SimulationEngine;

use crate::game_loop;
use crate::state::{AppState, GameLoopCommand};

/// Start the simulation. Spawns the game loop thread if not already running.
pub fn start_simulation(state: &AppState, engine: SimulationEngine) -> Result<()> {
    let mut running = state.running.lock().map_err(|e| anyhow!(e.to_string()))?;

    if *running {
        bail!("Simulation already running");
    }

    let (cmd_tx, handle) = game_loop::spawn_game_loop(engine, state.latest_snapshot.clone())?;

    *state.command_tx.lock().map_err(|e| anyhow!(e.to_string()))? = Some(cmd_tx);
    *state.loop_handle.lock().map_err(|e| anyhow!(e.to_string()))? = Some(handle);
    *running = true;
    info!("game loop started");

    Ok(())
}

/// Send a player command to the simulation.
pub fn send_command(state: &AppState, command: PlayerCommand) -> Result<()> {
    let tx_lock = state.command_tx.lock().map_err(|e| anyhow!(e.to_string()))?;

    match tx_lock.as_ref() {
        Some(tx) => tx
            .send(GameLoopCommand::PlayerCommand(command))
            .map_err(|e| anyhow!("Failed to send command: {e}")),
        None => bail!("Simulation not started"),
    }
}

/// Get the latest snapshot synchronously.
pub fn get_snapshot(state: &AppState) -> Result<Option<GameStateSnapshot>> {
    let lock = state.latest_snapshot.lock().map_err(|e| anyhow!(e.to_string()))?;
    Ok(lock.clone())
}

/// Stop the game loop and wait for its thread to exit.
pub fn stop_simulation(state: &AppState) -> Result<()> {
    let mut running = state.running.lock().map_err(|e| anyhow!(e.to_string()))?;
    if !*running {
        return Ok(());
    }

    if let Some(tx) = state.command_tx.lock().map_err(|e| anyhow!(e.to_string()))?.take() {
        // A disconnected channel means the loop already exited.
        let _ = tx.send(GameLoopCommand::Shutdown);
    }
    if let Some(handle) = state.loop_handle.lock().map_err(|e| anyhow!(e.to_string()))?.take() {
        if handle.join().is_err() {
            warn!("game loop thread panicked");
        }
    }
    *running = false;
    info!("game loop stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use onslaught_core::enums::RunMode;
    use onslaught_sim::SimConfig;

    #[test]
    fn test_send_before_start_fails() {
        let state = AppState::new();
        assert!(send_command(&state, PlayerCommand::Pause).is_err());
        assert!(get_snapshot(&state).unwrap().is_none());
    }

    #[test]
    fn test_start_send_stop() {
        let state = AppState::new();
        let engine = SimulationEngine::new(SimConfig::default()).unwrap();
        start_simulation(&state, engine).unwrap();

        let second = SimulationEngine::new(SimConfig::default()).unwrap();
        assert!(start_simulation(&state, second).is_err());

        send_command(&state, PlayerCommand::StartGame { mode: RunMode::Endless }).unwrap();
        stop_simulation(&state).unwrap();
        assert!(!*state.running.lock().unwrap());
        assert!(send_command(&state, PlayerCommand::Pause).is_err());
    }
}
