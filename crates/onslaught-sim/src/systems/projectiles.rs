//! Projectile flight: lifetime expiry and homing guidance.

use glam::DVec2;
use hecs::Entity;

use onslaught_core::components::{Homing, Projectile};
use onslaught_core::types::{ActorId, Position, Velocity};

use crate::context::{entity_of, is_alive, CombatContext};
use crate::systems::player::nearest_enemy;

/// Age every projectile and schedule the expired ones for removal.
pub fn run(ctx: &mut CombatContext) {
    let dt = ctx.dt;
    for (entity, projectile) in ctx.world.query_mut::<&mut Projectile>() {
        projectile.age += dt;
        projectile.lifetime_remaining -= dt;
        if projectile.lifetime_remaining <= 0.0 && !projectile.resolved {
            projectile.resolved = true;
            ctx.despawn.push(entity);
        }
    }
    run_guidance(ctx);
}

/// Steer homing projectiles toward their target, turning at most
/// `turn_rate * dt` radians per tick. Targets that die or leave the
/// homing radius are dropped and a new nearest enemy is acquired.
fn run_guidance(ctx: &mut CombatContext) {
    let missiles: Vec<(Entity, Position, Homing)> = {
        let mut query = ctx.world.query::<(&Projectile, &Homing, &Position)>();
        query
            .iter()
            .filter(|(_, (p, _, _))| !p.resolved)
            .map(|(entity, (_, homing, pos))| (entity, *pos, *homing))
            .collect()
    };

    let mut updates: Vec<(Entity, Option<ActorId>, Option<DVec2>)> = Vec::new();
    for (entity, pos, homing) in missiles {
        let target = homing
            .target
            .and_then(|id| tracked_position(ctx, id, pos, homing.radius).map(|p| (id, p)))
            .or_else(|| {
                let id = nearest_enemy(ctx, pos, homing.radius)?;
                tracked_position(ctx, id, pos, homing.radius).map(|p| (id, p))
            });
        match target {
            Some((id, target_pos)) => {
                let desired = pos.direction_to(&target_pos);
                updates.push((entity, Some(id), Some(desired)));
            }
            None => updates.push((entity, None, None)),
        }
    }

    let dt = ctx.dt;
    for (entity, target, desired) in updates {
        let Ok((projectile, homing, vel)) =
            ctx.world.query_one_mut::<(&mut Projectile, &mut Homing, &mut Velocity)>(entity)
        else {
            continue;
        };
        homing.target = target;
        let Some(desired) = desired.filter(|d| *d != DVec2::ZERO) else {
            continue;
        };
        projectile.direction = turn_toward(projectile.direction, desired, homing.turn_rate * dt);
        *vel = Velocity::from(projectile.direction * projectile.speed);
    }
}

/// Position of a living tracked enemy still inside the homing radius.
fn tracked_position(ctx: &CombatContext, id: ActorId, from: Position, radius: f64) -> Option<Position> {
    let entity = entity_of(id)?;
    if !is_alive(ctx.world, entity) {
        return None;
    }
    let pos = *ctx.world.get::<&Position>(entity).ok()?;
    (pos.distance_to(&from) <= radius).then_some(pos)
}

/// Rotate unit vector `current` toward `desired` by at most `max_angle` radians.
pub fn turn_toward(current: DVec2, desired: DVec2, max_angle: f64) -> DVec2 {
    let angle = current.perp_dot(desired).atan2(current.dot(desired));
    let step = angle.clamp(-max_angle, max_angle);
    DVec2::from_angle(step).rotate(current).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_is_rate_limited() {
        let out = turn_toward(DVec2::X, DVec2::Y, 0.1);
        let angle = DVec2::X.angle_to(out);
        assert!((angle - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_turn_snaps_when_within_rate() {
        let desired = DVec2::from_angle(0.05);
        let out = turn_toward(DVec2::X, desired, 0.1);
        assert!(out.distance(desired) < 1e-9);
    }

    #[test]
    fn test_turn_goes_the_short_way() {
        let out = turn_toward(DVec2::X, DVec2::NEG_Y, 0.2);
        assert!(out.y < 0.0);
    }
}
