//! Body contact: melee touch damage, explosive charges, and pickup collection.

use hecs::Entity;

use onslaught_core::components::{Collider, ContactDamage, Pickup, Volatile};
use onslaught_core::enums::PickupKind;
use onslaught_core::events::CombatEvent;
use onslaught_core::layers::{CollisionLayers, DamageChannel};
use onslaught_core::types::Position;

use crate::context::{is_alive, CombatContext};
use crate::systems::{damage, death};

pub fn run(ctx: &mut CombatContext) {
    let dt = ctx.dt;
    for (_entity, contact) in ctx.world.query_mut::<&mut ContactDamage>() {
        contact.cooldown_remaining = (contact.cooldown_remaining - dt).max(0.0);
    }

    let Some((player, player_pos)) = ctx.player_target() else {
        return;
    };
    let player_radius = ctx.world.get::<&Collider>(player).map(|c| c.radius).unwrap_or(0.0);

    let touching = ctx
        .spatial
        .overlap_circle(ctx.world, player_pos, player_radius, CollisionLayers::ENEMY);
    for enemy in touching {
        if !ctx.running() {
            return;
        }
        if !is_alive(ctx.world, enemy) {
            continue;
        }
        if ctx.world.get::<&Volatile>(enemy).is_ok() {
            death::explode(ctx, enemy);
            continue;
        }
        melee_hit(ctx, enemy, player);
    }

    if ctx.running() {
        collect_pickups(ctx, player, player_pos, player_radius);
    }
}

/// Contact damage from one melee enemy, gated by its own cooldown.
fn melee_hit(ctx: &mut CombatContext, enemy: Entity, player: Entity) {
    let damage = {
        let Ok(mut contact) = ctx.world.get::<&mut ContactDamage>(enemy) else {
            return;
        };
        if contact.cooldown_remaining > 0.0 {
            return;
        }
        contact.cooldown_remaining = contact.cooldown;
        contact.damage
    };
    damage::apply_damage(ctx, player, damage, DamageChannel::CONTACT);
}

/// Consume every pickup the player overlaps. Each pickup applies once.
fn collect_pickups(ctx: &mut CombatContext, player: Entity, player_pos: Position, player_radius: f64) {
    let touching = ctx
        .spatial
        .overlap_circle(ctx.world, player_pos, player_radius, CollisionLayers::PICKUP);
    for entity in touching {
        let taken = {
            let Ok(mut pickup) = ctx.world.get::<&mut Pickup>(entity) else {
                continue;
            };
            if pickup.consumed {
                continue;
            }
            pickup.consumed = true;
            (pickup.kind, pickup.amount)
        };
        let (kind, amount) = taken;
        match kind {
            PickupKind::Health => damage::heal(ctx, player, amount),
            PickupKind::Resource => damage::restore_resource(ctx, player, amount),
        }
        ctx.events.push(CombatEvent::PickupCollected { kind, amount });
        ctx.despawn.push(entity);
    }
}
