//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;

use glam::DVec2;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace};

use onslaught_arena::Arena;
use onslaught_core::commands::PlayerCommand;
use onslaught_core::components::PlayerControl;
use onslaught_core::config::GameConfig;
use onslaught_core::enums::GamePhase;
use onslaught_core::error::ConfigError;
use onslaught_core::events::CombatEvent;
use onslaught_core::state::GameStateSnapshot;
use onslaught_core::types::SimTime;

use crate::context::{find_player, CombatContext};
use crate::orchestrator::WaveOrchestrator;
use crate::spatial::{ArenaSpace, SpatialQuery};
use crate::systems;
use crate::world_setup;

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
    pub game: GameConfig,
    pub arena: Arena,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            game: GameConfig::default(),
            arena: Arena::default(),
        }
    }
}

type Stage = fn(&mut CombatContext);

/// Per-tick stages, in order. Cleanup runs separately so removals are
/// flushed even when a stage ends the run.
const STAGES: [(&str, Stage); 8] = [
    // 1. Spawn points
    ("spawner", systems::spawner::run),
    // 2. Player movement intent
    ("player_movement", systems::player::run_movement),
    // 3. Player weapons
    ("player_weapons", systems::player::run_weapons),
    // 4. Enemy steering and ranged fire
    ("behavior", systems::behavior::run),
    // 5. Projectile lifetime and homing
    ("projectiles", systems::projectiles::run),
    // 6. Movement integration
    ("movement", systems::movement::run),
    // 7. Projectile hits
    ("collision", systems::collision::run),
    // 8. Body contact and pickups
    ("contact", systems::contact::run),
];

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    time_scale: f64,
    seed: u64,
    rng: ChaCha8Rng,
    config: GameConfig,
    spatial: Box<dyn SpatialQuery + Send>,
    orchestrator: WaveOrchestrator,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<CombatEvent>,
}

impl SimulationEngine {
    /// Create a new simulation engine over the config's arena.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        let spatial = Box::new(ArenaSpace::new(config.arena.clone()));
        Self::with_spatial(config, spatial)
    }

    /// Create an engine with a caller-provided spatial service.
    pub fn with_spatial(config: SimConfig, spatial: Box<dyn SpatialQuery + Send>) -> Result<Self, ConfigError> {
        config.game.validate()?;
        info!(seed = config.seed, "simulation created");
        Ok(Self {
            world: World::new(),
            time: SimTime::default(),
            time_scale: config.time_scale,
            seed: config.seed,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            orchestrator: WaveOrchestrator::new(&config.game.waves),
            config: config.game,
            spatial,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.orchestrator.phase() == GamePhase::Running {
            let still_running = self.run_systems();
            if still_running {
                self.time.advance();
            }
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &self.time, &self.orchestrator, events)
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.orchestrator.phase()
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn orchestrator(&self) -> &WaveOrchestrator {
        &self.orchestrator
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The player entity, once a run has started.
    pub fn player(&self) -> Option<Entity> {
        find_player(&self.world)
    }

    /// Mutable world access (for tests).
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Spawn an enemy outside the spawn-point schedule (for tests).
    /// Counts toward the current wave like a regular spawn.
    #[cfg(test)]
    pub fn spawn_test_enemy(
        &mut self,
        kind: onslaught_core::enums::EnemyKind,
        position: onslaught_core::types::Position,
    ) -> Entity {
        let wave = self.orchestrator.wave();
        let enemy = world_setup::spawn_enemy(&mut self.world, &mut self.rng, &self.config, kind, position, wave);
        self.orchestrator.register_spawned();
        enemy
    }

    /// Run `f` against a combat context built from the engine's state (for tests).
    #[cfg(test)]
    pub fn with_context<R>(&mut self, f: impl FnOnce(&mut CombatContext) -> R) -> R {
        let mut ctx = CombatContext {
            world: &mut self.world,
            spatial: self.spatial.as_ref(),
            orchestrator: &mut self.orchestrator,
            rng: &mut self.rng,
            events: &mut self.events,
            config: &self.config,
            despawn: &mut self.despawn_buffer,
            dt: self.time.dt(),
        };
        f(&mut ctx)
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartGame { mode } => {
                if self.orchestrator.phase() == GamePhase::PreStart {
                    world_setup::setup_run(&mut self.world, &self.config, self.spatial.player_start());
                    self.time = SimTime::default();
                    self.orchestrator.start(mode, &mut self.events);
                    info!(?mode, "run started");
                }
            }
            PlayerCommand::Pause => self.orchestrator.pause(),
            PlayerCommand::Resume => self.orchestrator.resume(),
            PlayerCommand::Restart => {
                self.world.clear();
                self.orchestrator.reset();
                self.time = SimTime::default();
                self.rng = ChaCha8Rng::seed_from_u64(self.seed);
                self.despawn_buffer.clear();
                self.events.clear();
                info!("run reset");
            }
            PlayerCommand::Move { x, y } => {
                self.with_control(|control| control.move_input = DVec2::new(x, y));
            }
            PlayerCommand::Aim { x, y } => {
                self.with_control(|control| control.aim = DVec2::new(x, y));
            }
            PlayerCommand::SetSprint { active } => {
                self.with_control(|control| control.sprint = active);
            }
            PlayerCommand::SetTrigger { held } => {
                self.with_control(|control| control.trigger_held = held);
            }
            PlayerCommand::CastFireball => {
                self.with_control(|control| control.fireball_requested = true);
            }
            PlayerCommand::LaunchMissile => {
                self.with_control(|control| control.missile_requested = true);
            }
            PlayerCommand::CastBlast => {
                self.with_control(|control| control.blast_requested = true);
            }
        }
    }

    fn with_control(&mut self, f: impl FnOnce(&mut PlayerControl)) {
        match self.world.query_mut::<&mut PlayerControl>().into_iter().next() {
            Some((_entity, control)) => f(control),
            None => debug!("input ignored: no player"),
        }
    }

    /// Run all stages in order. Returns whether the run is still going.
    fn run_systems(&mut self) -> bool {
        let mut ctx = CombatContext {
            world: &mut self.world,
            spatial: self.spatial.as_ref(),
            orchestrator: &mut self.orchestrator,
            rng: &mut self.rng,
            events: &mut self.events,
            config: &self.config,
            despawn: &mut self.despawn_buffer,
            dt: self.time.dt(),
        };

        for (name, stage) in STAGES {
            stage(&mut ctx);
            if !ctx.running() {
                debug!(stage = name, phase = ?ctx.orchestrator.phase(), "run ended mid-tick");
                break;
            }
            trace!(stage = name, "stage complete");
        }
        let running = ctx.running();

        // 9. Cleanup (out of bounds, dead, consumed)
        systems::cleanup::run(&mut self.world, self.spatial.as_ref(), &mut self.despawn_buffer);
        running
    }
}
