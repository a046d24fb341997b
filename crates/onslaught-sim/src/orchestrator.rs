//! Wave orchestrator: spawn gating, wave completion, and win/lose.
//!
//! Stored in `SimulationEngine`, NOT as an ECS entity. The orchestrator is
//! the single owner of the game phase.

use tracing::{debug, info};

use onslaught_core::config::WaveConfig;
use onslaught_core::enums::{GamePhase, KillOverflowPolicy, RunMode};
use onslaught_core::events::CombatEvent;
use onslaught_core::state::WaveView;

#[derive(Debug, Clone)]
pub struct WaveOrchestrator {
    phase: GamePhase,
    mode: RunMode,
    /// 1-based; 0 before the first start.
    wave: u32,
    required: u32,
    spawned: u32,
    killed: u32,
    total_kills: u32,

    base_per_wave: u32,
    max_waves: u32,
    overflow: KillOverflowPolicy,
}

impl WaveOrchestrator {
    pub fn new(config: &WaveConfig) -> Self {
        Self {
            phase: GamePhase::PreStart,
            mode: RunMode::default(),
            wave: 0,
            required: 0,
            spawned: 0,
            killed: 0,
            total_kills: 0,
            base_per_wave: config.base_enemies_per_wave,
            max_waves: config.max_waves,
            overflow: config.kill_overflow,
        }
    }

    /// Leave pre-start and begin wave 1. Ignored in any other phase.
    pub fn start(&mut self, mode: RunMode, events: &mut Vec<CombatEvent>) -> bool {
        if self.phase != GamePhase::PreStart {
            return false;
        }
        self.mode = mode;
        self.total_kills = 0;
        self.phase = GamePhase::Running;
        self.begin_wave(1, events);
        true
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Running;
        }
    }

    /// Back to pre-start with all counters cleared.
    pub fn reset(&mut self) {
        *self = Self {
            phase: GamePhase::PreStart,
            mode: RunMode::default(),
            wave: 0,
            required: 0,
            spawned: 0,
            killed: 0,
            total_kills: 0,
            ..*self
        };
    }

    /// Whether a spawner may spawn one more enemy right now.
    pub fn can_spawn(&self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        if self.mode == RunMode::Limited && self.wave > self.max_waves {
            return false;
        }
        self.spawned < self.required
    }

    /// Record one successful spawn.
    pub fn register_spawned(&mut self) {
        self.spawned = (self.spawned + 1).min(self.required);
    }

    /// Credit a kill of an enemy spawned during the current wave.
    pub fn report_killed(&mut self, events: &mut Vec<CombatEvent>) {
        let wave = self.wave;
        self.report_killed_from(wave, events);
    }

    /// Credit a kill of an enemy spawned during `spawn_wave`.
    ///
    /// Total kills always count. Whether a kill from an earlier wave counts
    /// toward the current wave depends on the overflow policy.
    pub fn report_killed_from(&mut self, spawn_wave: u32, events: &mut Vec<CombatEvent>) {
        if !matches!(self.phase, GamePhase::Running | GamePhase::Paused) {
            return;
        }
        self.total_kills += 1;

        if spawn_wave != self.wave && self.overflow == KillOverflowPolicy::Discard {
            debug!(spawn_wave, wave = self.wave, "kill from earlier wave not credited");
            return;
        }

        self.killed = (self.killed + 1).min(self.required);
        if self.killed >= self.required {
            self.complete_wave(events);
        }
    }

    /// Observe a player health change. Health at zero loses the game.
    pub fn on_player_health_changed(&mut self, current: u32, events: &mut Vec<CombatEvent>) {
        if current > 0 || !matches!(self.phase, GamePhase::Running | GamePhase::Paused) {
            return;
        }
        self.phase = GamePhase::Lost;
        info!(total_kills = self.total_kills, wave = self.wave, "game lost");
        events.push(CombatEvent::GameLost {
            total_kills: self.total_kills,
            wave_reached: self.wave,
        });
    }

    fn complete_wave(&mut self, events: &mut Vec<CombatEvent>) {
        events.push(CombatEvent::WaveCompleted { wave: self.wave });

        if self.mode == RunMode::Limited && self.wave >= self.max_waves {
            self.phase = GamePhase::Won;
            info!(total_kills = self.total_kills, "game won");
            events.push(CombatEvent::GameWon {
                total_kills: self.total_kills,
            });
            return;
        }
        self.begin_wave(self.wave + 1, events);
    }

    fn begin_wave(&mut self, wave: u32, events: &mut Vec<CombatEvent>) {
        self.wave = wave;
        self.required = self.base_per_wave * wave;
        self.spawned = 0;
        self.killed = 0;
        debug!(wave, required = self.required, "wave started");
        events.push(CombatEvent::WaveStarted {
            wave,
            required: self.required,
        });
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn required(&self) -> u32 {
        self.required
    }

    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    pub fn killed(&self) -> u32 {
        self.killed
    }

    pub fn total_kills(&self) -> u32 {
        self.total_kills
    }

    pub fn view(&self) -> WaveView {
        WaveView {
            wave: self.wave,
            required: self.required,
            spawned: self.spawned,
            killed: self.killed,
            total_kills: self.total_kills,
        }
    }
}
