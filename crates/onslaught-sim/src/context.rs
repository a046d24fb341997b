//! Per-tick combat context.
//!
//! Bundles the mutable simulation state that combat systems share, so the
//! engine can hand its collaborators to each system explicitly.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use onslaught_core::components::{Life, Player};
use onslaught_core::config::GameConfig;
use onslaught_core::enums::{GamePhase, LifeState};
use onslaught_core::events::CombatEvent;
use onslaught_core::types::{ActorId, Position};

use crate::orchestrator::WaveOrchestrator;
use crate::spatial::SpatialQuery;

pub struct CombatContext<'a> {
    pub world: &'a mut World,
    pub spatial: &'a dyn SpatialQuery,
    pub orchestrator: &'a mut WaveOrchestrator,
    pub rng: &'a mut ChaCha8Rng,
    pub events: &'a mut Vec<CombatEvent>,
    pub config: &'a GameConfig,
    /// Entities scheduled for removal at cleanup.
    pub despawn: &'a mut Vec<Entity>,
    pub dt: f64,
}

impl CombatContext<'_> {
    /// Whether the orchestrator is still running this tick.
    pub fn running(&self) -> bool {
        self.orchestrator.phase() == GamePhase::Running
    }

    pub fn player(&self) -> Option<Entity> {
        find_player(self.world)
    }

    /// Position of the living player, if any.
    pub fn player_target(&self) -> Option<(Entity, Position)> {
        let player = self.player()?;
        if !is_alive(self.world, player) {
            return None;
        }
        let pos = *self.world.get::<&Position>(player).ok()?;
        Some((player, pos))
    }
}

pub fn find_player(world: &World) -> Option<Entity> {
    let mut query = world.query::<&Player>();
    query.iter().next().map(|(entity, _)| entity)
}

/// True for existing actors that have not entered the dying state.
pub fn is_alive(world: &World, entity: Entity) -> bool {
    world
        .get::<&Life>(entity)
        .map(|life| life.state == LifeState::Alive)
        .unwrap_or(false)
}

pub fn actor_id(entity: Entity) -> ActorId {
    ActorId(entity.to_bits().get())
}

pub fn entity_of(id: ActorId) -> Option<Entity> {
    Entity::from_bits(id.0)
}
