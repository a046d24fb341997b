//! Game loop thread: runs the simulation engine at 30Hz and publishes snapshots.
//!
//! The engine is moved into this thread and owned by it. Commands arrive via
//! an `mpsc` channel. Snapshots are stored in shared state for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{debug, info};

use onslaught_core::constants::TICK_RATE;
use onslaught_core::state::GameStateSnapshot;
use onslaught_sim::SimulationEngine;

use crate::state::GameLoopCommand;

/// Nominal duration of one tick at 1x speed.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender for the control layer and the thread handle.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("onslaught-game-loop".into())
        .spawn(move || {
            run_game_loop(engine, cmd_rx, &latest_snapshot);
        })
        .context("Failed to spawn game loop thread")?;

    Ok((cmd_tx, handle))
}

/// Whether the loop should keep ticking after a command drain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// Forward every queued command to the engine without blocking.
fn drain_commands(engine: &mut SimulationEngine, cmd_rx: &mpsc::Receiver<GameLoopCommand>) -> Flow {
    loop {
        match cmd_rx.try_recv() {
            Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
            Ok(GameLoopCommand::Shutdown) => {
                info!(tick = engine.time().tick, "game loop shutting down");
                return Flow::Stop;
            }
            Err(mpsc::TryRecvError::Empty) => return Flow::Continue,
            Err(mpsc::TryRecvError::Disconnected) => {
                debug!("command channel closed");
                return Flow::Stop;
            }
        }
    }
}

/// Wall-clock length of one tick at the given speed multiplier.
fn tick_interval(time_scale: f64) -> Duration {
    if time_scale > 0.001 {
        TICK_DURATION.div_f64(time_scale)
    } else {
        TICK_DURATION
    }
}

/// Runs until a Shutdown command arrives or every sender is dropped.
fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    let mut deadline = Instant::now();

    while drain_commands(&mut engine, &cmd_rx) == Flow::Continue {
        // Paused and terminal phases still tick; the engine freezes its own clock.
        let snapshot = engine.tick();
        if let Ok(mut slot) = latest_snapshot.lock() {
            *slot = Some(snapshot);
        }

        let interval = tick_interval(engine.time_scale());
        deadline += interval;
        let now = Instant::now();
        if deadline > now {
            std::thread::sleep(deadline - now);
        } else if now - deadline > interval * 2 {
            // More than two ticks late: drop the backlog instead of bursting.
            deadline = now;
        }
    }
}
