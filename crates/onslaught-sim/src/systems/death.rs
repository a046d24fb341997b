//! Death and explosion pipeline.
//!
//! `Alive -> Dying -> removed`. Entering `Dying` is latched, so repeated
//! lethal hits, chain explosions, and duplicate contacts all collapse to
//! exactly one explosion, one kill report, and one drop roll per enemy.

use hecs::{Entity, World};
use rand::Rng;

use onslaught_core::components::{Bounty, DropTable, Enemy, Life, Volatile};
use onslaught_core::enums::{LifeState, PickupKind};
use onslaught_core::events::CombatEvent;
use onslaught_core::layers::{CollisionLayers, DamageChannel};
use onslaught_core::types::Position;

use crate::context::{actor_id, CombatContext};
use crate::systems::{damage, progression};
use crate::world_setup;

/// Latch an actor into `Dying`. Returns false if it already was (or is gone).
pub fn begin_dying(world: &mut World, entity: Entity) -> bool {
    let Ok(mut life) = world.get::<&mut Life>(entity) else {
        return false;
    };
    if life.state == LifeState::Dying {
        return false;
    }
    life.state = LifeState::Dying;
    true
}

/// Lethal damage. Explosive kinds detonate on the way out.
pub fn kill(ctx: &mut CombatContext, entity: Entity) {
    if ctx.world.get::<&Volatile>(entity).is_ok() {
        explode(ctx, entity);
        return;
    }
    if begin_dying(ctx.world, entity) {
        finalize(ctx, entity);
    }
}

/// Detonate an explosive enemy: area damage to every other actor in radius,
/// then finalize. No-op once dying.
pub fn explode(ctx: &mut CombatContext, entity: Entity) {
    let Ok(volatile) = ctx.world.get::<&Volatile>(entity).map(|v| *v) else {
        return;
    };
    let Ok(center) = ctx.world.get::<&Position>(entity).map(|p| *p) else {
        return;
    };
    if !begin_dying(ctx.world, entity) {
        return;
    }

    ctx.events.push(CombatEvent::Explosion {
        source: actor_id(entity),
        position: center,
        radius: volatile.radius,
    });

    let victims = ctx
        .spatial
        .overlap_circle(ctx.world, center, volatile.radius, CollisionLayers::ACTORS);
    for victim in victims {
        if victim == entity {
            continue;
        }
        damage::apply_damage(ctx, victim, volatile.damage, DamageChannel::EXPLOSION);
    }

    finalize(ctx, entity);
}

/// Credit the kill, grant XP, roll drops, and schedule removal.
fn finalize(ctx: &mut CombatContext, entity: Entity) {
    let Ok(enemy) = ctx.world.get::<&Enemy>(entity).map(|e| *e) else {
        ctx.despawn.push(entity);
        return;
    };
    let xp = ctx.world.get::<&Bounty>(entity).map(|b| b.xp).unwrap_or(0);
    let id = actor_id(entity);

    ctx.events.push(CombatEvent::Death { actor: id, kind: enemy.kind });
    ctx.events.push(CombatEvent::Kill {
        actor: id,
        kind: enemy.kind,
        xp,
    });
    ctx.orchestrator.report_killed_from(enemy.spawn_wave, ctx.events);
    progression::grant_xp(ctx, xp);
    roll_drop(ctx, entity);

    ctx.despawn.push(entity);
}

/// Independent drop roll: any-drop chance, then the health/resource split.
/// A missing template falls back to the other kind; both missing drops nothing.
fn roll_drop(ctx: &mut CombatContext, entity: Entity) {
    let Ok(table) = ctx.world.get::<&DropTable>(entity).map(|t| *t) else {
        return;
    };
    let Ok(position) = ctx.world.get::<&Position>(entity).map(|p| *p) else {
        return;
    };
    if !table.eligible || !ctx.rng.gen_bool(table.chance) {
        return;
    }

    let prefer_health = ctx.rng.gen_bool(table.health_share);
    let choice = match (prefer_health, table.health_amount, table.resource_amount) {
        (true, Some(amount), _) => Some((PickupKind::Health, amount)),
        (true, None, Some(amount)) => Some((PickupKind::Resource, amount)),
        (false, _, Some(amount)) => Some((PickupKind::Resource, amount)),
        (false, Some(amount), None) => Some((PickupKind::Health, amount)),
        _ => None,
    };
    let Some((kind, amount)) = choice else {
        return;
    };

    world_setup::spawn_pickup(ctx.world, kind, amount, position);
    ctx.events.push(CombatEvent::PickupSpawned { kind, amount, position });
}
