//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use onslaught_core::components::*;
use onslaught_core::events::CombatEvent;
use onslaught_core::state::*;
use onslaught_core::types::{Position, SimTime, Velocity};

use crate::context::actor_id;
use crate::orchestrator::WaveOrchestrator;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    orchestrator: &WaveOrchestrator,
    events: Vec<CombatEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase: orchestrator.phase(),
        mode: orchestrator.mode(),
        wave: orchestrator.view(),
        player: build_player(world),
        enemies: build_enemies(world),
        projectiles: build_projectiles(world),
        pickups: build_pickups(world),
        events,
    }
}

fn build_player(world: &World) -> Option<PlayerView> {
    world
        .query::<(
            &Player,
            &Position,
            &Velocity,
            &Health,
            &ResourcePool,
            &Progression,
        )>()
        .iter()
        .next()
        .map(|(entity, (_, pos, vel, health, pool, progression))| PlayerView {
            id: actor_id(entity),
            position: *pos,
            velocity: *vel,
            health: health.current,
            max_health: health.max,
            resource: pool.current,
            max_resource: pool.max,
            level: progression.level,
            xp: progression.xp,
            xp_to_next: progression.xp_to_next,
        })
}

/// Build EnemyView list for every enemy that is still alive.
fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Enemy, &Position, &Velocity, &Health, &Life, &Steering)>()
        .iter()
        .filter(|(_, (_, _, _, _, life, _))| life.state == onslaught_core::enums::LifeState::Alive)
        .map(|(entity, (enemy, pos, vel, health, _, steering))| EnemyView {
            id: actor_id(entity),
            kind: enemy.kind,
            position: *pos,
            velocity: *vel,
            health: health.current,
            max_health: health.max,
            mode: steering.mode,
        })
        .collect();

    enemies.sort_by_key(|e| e.id);
    enemies
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = world
        .query::<(&Projectile, &Position, &Velocity)>()
        .iter()
        .filter(|(_, (p, _, _))| !p.resolved)
        .map(|(entity, (projectile, pos, vel))| ProjectileView {
            id: actor_id(entity),
            weapon: projectile.weapon,
            faction: projectile.faction,
            position: *pos,
            velocity: *vel,
        })
        .collect();

    projectiles.sort_by_key(|p| p.id);
    projectiles
}

fn build_pickups(world: &World) -> Vec<PickupView> {
    let mut pickups: Vec<(u64, PickupView)> = world
        .query::<(&Pickup, &Position)>()
        .iter()
        .filter(|(_, (pickup, _))| !pickup.consumed)
        .map(|(entity, (pickup, pos))| {
            (
                entity.to_bits().get(),
                PickupView {
                    kind: pickup.kind,
                    amount: pickup.amount,
                    position: *pos,
                },
            )
        })
        .collect();

    pickups.sort_by_key(|(id, _)| *id);
    pickups.into_iter().map(|(_, view)| view).collect()
}
