//! Run drivers: a fast synchronous loop and a paced threaded one.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use onslaught_core::enums::GamePhase;
use onslaught_core::events::CombatEvent;
use onslaught_core::state::GameStateSnapshot;
use onslaught_sim::SimulationEngine;

use crate::autopilot::Autopilot;
use crate::control;
use crate::game_loop::TICK_DURATION;
use crate::state::AppState;

/// Outcome of one run, printed by the binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub elapsed_secs: f64,
    pub phase: GamePhase,
    pub wave: u32,
    pub total_kills: u32,
    pub level: u32,
    pub health: u32,
}

impl RunSummary {
    fn from_snapshot(snapshot: &GameStateSnapshot) -> Self {
        Self {
            ticks: snapshot.time.tick,
            elapsed_secs: snapshot.time.elapsed_secs,
            phase: snapshot.phase,
            wave: snapshot.wave.wave,
            total_kills: snapshot.wave.total_kills,
            level: snapshot.player.as_ref().map_or(0, |p| p.level),
            health: snapshot.player.as_ref().map_or(0, |p| p.health),
        }
    }
}

fn is_over(snapshot: &GameStateSnapshot, max_ticks: u64) -> bool {
    snapshot.phase.is_terminal() || snapshot.time.tick >= max_ticks
}

fn log_events(snapshot: &GameStateSnapshot) {
    for event in &snapshot.events {
        match event {
            CombatEvent::WaveStarted { wave, required } => info!(wave, required, "wave started"),
            CombatEvent::LevelUp { level } => info!(level, "level up"),
            _ => debug!(?event, "event"),
        }
    }
}

/// Drive the engine on the calling thread as fast as it will go.
///
/// Commands planned from one snapshot are applied at the next tick, so a
/// given seed always plays out the same way.
pub fn run_headless(engine: &mut SimulationEngine, autopilot: &mut Autopilot, max_ticks: u64) -> RunSummary {
    let mut snapshot = engine.tick();
    // Bound the pre-start handshake too, in case the pilot never starts.
    let mut steps = 0u64;
    while !is_over(&snapshot, max_ticks) && steps <= max_ticks {
        engine.queue_commands(autopilot.plan(&snapshot));
        snapshot = engine.tick();
        log_events(&snapshot);
        steps += 1;
    }
    RunSummary::from_snapshot(&snapshot)
}

/// Drive the engine on its own game-loop thread at wall-clock pace,
/// polling snapshots once per tick.
pub fn run_realtime(engine: SimulationEngine, mut autopilot: Autopilot, max_ticks: u64) -> Result<RunSummary> {
    let state = AppState::new();
    control::start_simulation(&state, engine)?;

    let mut last_tick = None;
    let summary = loop {
        std::thread::sleep(TICK_DURATION);
        let Some(snapshot) = control::get_snapshot(&state)? else {
            continue;
        };
        if last_tick == Some(snapshot.time.tick) {
            continue;
        }
        last_tick = Some(snapshot.time.tick);
        log_events(&snapshot);
        if is_over(&snapshot, max_ticks) {
            break RunSummary::from_snapshot(&snapshot);
        }
        for command in autopilot.plan(&snapshot) {
            control::send_command(&state, command)?;
        }
    };

    control::stop_simulation(&state)?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use onslaught_arena::Arena;
    use onslaught_core::config::{GameConfig, SpawnPointConfig};
    use onslaught_core::enums::{EnemyKind, RunMode};
    use onslaught_core::types::Position;
    use onslaught_sim::SimConfig;

    fn run(seed: u64, max_ticks: u64) -> RunSummary {
        let mut engine = SimulationEngine::new(SimConfig {
            seed,
            ..Default::default()
        })
        .unwrap();
        let mut pilot = Autopilot::new(RunMode::Limited, &GameConfig::default().weapons);
        run_headless(&mut engine, &mut pilot, max_ticks)
    }

    #[test]
    fn test_headless_run_respects_tick_budget() {
        let summary = run(42, 900);
        assert!(summary.ticks <= 900);
        assert!(summary.wave >= 1);
        if !summary.phase.is_terminal() {
            assert_eq!(summary.ticks, 900);
        }
    }

    #[test]
    fn test_headless_run_is_deterministic() {
        assert_eq!(run(7, 1500), run(7, 1500));
    }

    #[test]
    fn test_autopilot_scores_kills() {
        let mut game = GameConfig::default();
        game.waves.spawn_points = vec![SpawnPointConfig {
            position: Position::new(8.0, 0.0),
            interval: 2.0,
            roster: vec![EnemyKind::Melee],
        }];
        let mut engine = SimulationEngine::new(SimConfig {
            game,
            arena: Arena::open(30.0, 30.0),
            ..Default::default()
        })
        .unwrap();
        let mut pilot = Autopilot::new(RunMode::Limited, &GameConfig::default().weapons);

        let summary = run_headless(&mut engine, &mut pilot, 3000);
        assert!(summary.total_kills > 0, "autopilot never killed anything: {summary:?}");
    }
}
