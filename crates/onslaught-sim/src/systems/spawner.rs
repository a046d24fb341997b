//! Spawn point system: periodically spawns enemies while the wave has quota.

use hecs::Entity;
use rand::seq::SliceRandom;
use tracing::{debug, warn};

use onslaught_core::components::SpawnPoint;
use onslaught_core::enums::EnemyKind;
use onslaught_core::types::Position;

use crate::context::CombatContext;
use crate::world_setup;

/// Tick every spawn point's countdown and spawn one enemy per elapsed timer.
///
/// The countdown resets whether or not the wave accepted a spawn, so a
/// saturated wave does not cause a burst once quota frees up.
pub fn run(ctx: &mut CombatContext) {
    let mut due: Vec<(Entity, Position, Option<EnemyKind>)> = Vec::new();

    for (entity, (pos, point)) in ctx.world.query_mut::<(&Position, &mut SpawnPoint)>() {
        point.countdown -= ctx.dt;
        if point.countdown > 0.0 {
            continue;
        }
        point.countdown = point.interval;
        due.push((entity, *pos, point.roster.choose(ctx.rng).copied()));
    }

    for (entity, position, kind) in due {
        let Some(kind) = kind else {
            warn!(?entity, "spawn point has an empty roster");
            continue;
        };
        if !ctx.orchestrator.can_spawn() {
            continue;
        }
        let wave = ctx.orchestrator.wave();
        let enemy = world_setup::spawn_enemy(ctx.world, ctx.rng, ctx.config, kind, position, wave);
        ctx.orchestrator.register_spawned();
        debug!(?enemy, ?kind, wave, "enemy spawned");
    }
}
