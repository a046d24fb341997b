//! Player experience and level-ups.

use onslaught_core::components::{Health, Progression, ResourcePool};
use onslaught_core::events::CombatEvent;

use crate::context::{actor_id, is_alive, CombatContext};
use crate::world_setup::stat_for_level;

/// Add XP to the living player, levelling up as many times as it covers.
/// Each level-up rescales max HP/MP and fully restores both.
pub fn grant_xp(ctx: &mut CombatContext, amount: u32) {
    if amount == 0 {
        return;
    }
    let Some(player) = ctx.player() else {
        return;
    };
    if !is_alive(ctx.world, player) {
        return;
    }

    let (levels, progression) = {
        let Ok(mut prog) = ctx.world.get::<&mut Progression>(player) else {
            return;
        };
        prog.xp += amount;
        let mut levels = Vec::new();
        while prog.xp_to_next > 0 && prog.xp >= prog.xp_to_next {
            prog.xp -= prog.xp_to_next;
            prog.level += 1;
            prog.xp_to_next += ctx.config.player.xp_to_next_step;
            levels.push(prog.level);
        }
        (levels, *prog)
    };

    for level in levels {
        let stat = stat_for_level(&ctx.config.player, level);
        let id = actor_id(player);
        if let Ok(mut health) = ctx.world.get::<&mut Health>(player) {
            health.max = stat;
            health.current = stat;
        }
        if let Ok(mut pool) = ctx.world.get::<&mut ResourcePool>(player) {
            pool.max = stat;
            pool.current = stat;
        }
        ctx.events.push(CombatEvent::LevelUp { level });
        ctx.events.push(CombatEvent::HealthChanged {
            actor: id,
            current: stat,
            max: stat,
        });
        ctx.events.push(CombatEvent::ResourceChanged {
            actor: id,
            current: stat,
            max: stat,
        });
    }

    ctx.events.push(CombatEvent::XpChanged {
        xp: progression.xp,
        xp_to_next: progression.xp_to_next,
    });
}
