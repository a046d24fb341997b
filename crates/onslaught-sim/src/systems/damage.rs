//! Damage model: the HP/MP ledger.
//!
//! Every mutation clamps to `[0, max]` and raises a change event only when
//! the value actually moved. Dying actors ignore everything. Damage is
//! routed with a channel that the target's `DamageGate` may reject.

use hecs::Entity;
use tracing::trace;

use onslaught_core::components::{DamageGate, Enemy, Health, Player, ResourcePool, Volatile};
use onslaught_core::events::CombatEvent;
use onslaught_core::layers::DamageChannel;

use crate::context::{actor_id, is_alive, CombatContext};
use crate::systems::death;

/// Apply `amount` damage through `channel`. Returns true if the damage landed.
///
/// Lethal damage on an enemy runs the death pipeline immediately, which
/// may re-enter this function for area damage.
pub fn apply_damage(ctx: &mut CombatContext, target: Entity, amount: u32, channel: DamageChannel) -> bool {
    if !is_alive(ctx.world, target) {
        return false;
    }
    if let Ok(gate) = ctx.world.get::<&DamageGate>(target) {
        if !gate.accepts.contains(channel) {
            trace!(?channel, "damage rejected by gate");
            return false;
        }
    }

    let (current, max, changed) = {
        let Ok(mut health) = ctx.world.get::<&mut Health>(target) else {
            return false;
        };
        let before = health.current;
        health.current = health.current.saturating_sub(amount);
        (health.current, health.max, health.current != before)
    };
    if changed {
        ctx.events.push(CombatEvent::HealthChanged {
            actor: actor_id(target),
            current,
            max,
        });
    }

    if ctx.world.get::<&Player>(target).is_ok() {
        if current == 0 {
            death::begin_dying(ctx.world, target);
        }
        if changed {
            ctx.orchestrator.on_player_health_changed(current, ctx.events);
        }
        return true;
    }

    if ctx.world.get::<&Enemy>(target).is_err() {
        return true;
    }

    if current == 0 {
        death::kill(ctx, target);
        return true;
    }

    // Explosive kinds detonate after enough non-lethal hits.
    let detonate = match ctx.world.get::<&mut Volatile>(target) {
        Ok(mut volatile) => {
            volatile.hits_taken += 1;
            volatile.hits_to_explode > 0 && volatile.hits_taken >= volatile.hits_to_explode
        }
        Err(_) => false,
    };
    if detonate {
        death::explode(ctx, target);
    }
    true
}

/// Restore health, clamped at max.
pub fn heal(ctx: &mut CombatContext, target: Entity, amount: u32) {
    if !is_alive(ctx.world, target) {
        return;
    }
    let Ok(mut health) = ctx.world.get::<&mut Health>(target) else {
        return;
    };
    let before = health.current;
    health.current = health.current.saturating_add(amount).min(health.max);
    if health.current != before {
        ctx.events.push(CombatEvent::HealthChanged {
            actor: actor_id(target),
            current: health.current,
            max: health.max,
        });
    }
}

/// Restore resource, clamped at max.
pub fn restore_resource(ctx: &mut CombatContext, target: Entity, amount: u32) {
    if !is_alive(ctx.world, target) {
        return;
    }
    let Ok(mut pool) = ctx.world.get::<&mut ResourcePool>(target) else {
        return;
    };
    let before = pool.current;
    pool.current = pool.current.saturating_add(amount).min(pool.max);
    if pool.current != before {
        ctx.events.push(CombatEvent::ResourceChanged {
            actor: actor_id(target),
            current: pool.current,
            max: pool.max,
        });
    }
}

/// Spend `cost` resource. Fails without mutation if the pool is short.
pub fn spend_resource(ctx: &mut CombatContext, target: Entity, cost: u32) -> bool {
    if !is_alive(ctx.world, target) {
        return false;
    }
    let Ok(mut pool) = ctx.world.get::<&mut ResourcePool>(target) else {
        return false;
    };
    if pool.current < cost {
        return false;
    }
    pool.current -= cost;
    if cost > 0 {
        ctx.events.push(CombatEvent::ResourceChanged {
            actor: actor_id(target),
            current: pool.current,
            max: pool.max,
        });
    }
    true
}
