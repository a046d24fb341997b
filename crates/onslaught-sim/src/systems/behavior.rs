//! Enemy behavior system: runs the steering engine for each living enemy,
//! then lets shooters fire along the direction steering hands back.

use glam::DVec2;
use hecs::Entity;
use tracing::trace;

use onslaught_core::components::{Enemy, Shooter, Steering};
use onslaught_core::enums::{EnemyKind, Faction, PenetrationClass, WeaponKind};
use onslaught_core::events::CombatEvent;
use onslaught_core::layers::DamageChannel;
use onslaught_core::types::{Position, Velocity};

use onslaught_behavior::profiles::{from_config, BehaviorProfile};
use onslaught_behavior::steering::{evaluate, SteeringContext};

use crate::context::{actor_id, is_alive, CombatContext};
use crate::spatial::{self, WallProbe};
use crate::world_setup::{self, ProjectileSpawn};

struct Profiles {
    melee: BehaviorProfile,
    explosive: BehaviorProfile,
    ranged: BehaviorProfile,
}

impl Profiles {
    fn get(&self, kind: EnemyKind) -> &BehaviorProfile {
        match kind {
            EnemyKind::Melee => &self.melee,
            EnemyKind::Explosive => &self.explosive,
            EnemyKind::Ranged => &self.ranged,
        }
    }
}

/// Run steering for every living enemy and apply the results.
pub fn run(ctx: &mut CombatContext) {
    let config = ctx.config;
    let profiles = Profiles {
        melee: from_config(config.enemy(EnemyKind::Melee)),
        explosive: from_config(config.enemy(EnemyKind::Explosive)),
        ranged: from_config(config.enemy(EnemyKind::Ranged)),
    };
    let target = ctx.player_target().map(|(_, pos)| pos);

    let inputs: Vec<(Entity, EnemyKind, SteeringContext)> = {
        let mut query = ctx.world.query::<(&Enemy, &Position, &Steering)>();
        query
            .iter()
            .filter(|(entity, _)| is_alive(ctx.world, *entity))
            .map(|(entity, (enemy, pos, steering))| {
                let sctx = SteeringContext {
                    mode: steering.mode,
                    position: *pos,
                    spawn_origin: steering.spawn_origin,
                    target,
                    wander_target: steering.wander_target,
                    wander_timer: steering.wander_timer,
                    dt: ctx.dt,
                };
                (entity, enemy.kind, sctx)
            })
            .collect()
    };

    let mut fire_orders: Vec<(Entity, Position, DVec2)> = Vec::new();
    let mut updates = Vec::with_capacity(inputs.len());
    {
        let probe = WallProbe {
            spatial: ctx.spatial,
            world: &*ctx.world,
        };
        for (entity, kind, sctx) in &inputs {
            let update = evaluate(sctx, profiles.get(*kind), ctx.rng, &probe);
            if update.mode_changed {
                trace!(?entity, from = ?sctx.mode, to = ?update.mode, "steering mode changed");
            }
            if let Some(dir) = update.fire_direction {
                fire_orders.push((*entity, sctx.position, dir));
            }
            updates.push((*entity, update));
        }
    }

    for (entity, update) in updates {
        if let Ok((steering, vel)) = ctx.world.query_one_mut::<(&mut Steering, &mut Velocity)>(entity) {
            steering.mode = update.mode;
            steering.wander_target = update.wander_target;
            steering.wander_timer = update.wander_timer;
            *vel = update.velocity;
        }
    }

    run_shooters(ctx, &fire_orders);
}

/// Tick shooter cooldowns and fire for enemies that steering cleared to shoot.
fn run_shooters(ctx: &mut CombatContext, fire_orders: &[(Entity, Position, DVec2)]) {
    let dt = ctx.dt;
    for (_entity, shooter) in ctx.world.query_mut::<&mut Shooter>() {
        shooter.cooldown_remaining = (shooter.cooldown_remaining - dt).max(0.0);
    }

    let config = ctx.config;
    for &(entity, origin, dir) in fire_orders {
        let Ok(kind) = ctx.world.get::<&Enemy>(entity).map(|e| e.kind) else {
            continue;
        };
        let tunables = config.enemy(kind);
        let Some(spec) = &tunables.projectile else {
            continue;
        };
        let ready = ctx
            .world
            .get::<&Shooter>(entity)
            .map(|s| s.cooldown_remaining <= 0.0)
            .unwrap_or(false);
        if !ready {
            continue;
        }

        let position = spatial::muzzle_point(ctx.spatial, ctx.world, origin, dir, spec.muzzle_offset, spec.radius);
        let owner = actor_id(entity);
        world_setup::spawn_projectile(
            ctx.world,
            ProjectileSpawn {
                weapon: WeaponKind::EnemyBolt,
                owner,
                faction: Faction::Hostile,
                class: PenetrationClass::SingleTarget,
                channel: DamageChannel::PROJECTILE,
                position,
                direction: dir,
                speed: spec.speed,
                damage: spec.damage,
                lifetime: spec.lifetime,
                radius: spec.radius,
                cancels_hostile_fire: true,
                phases_walls: false,
                explosion_radius: 0.0,
                homing: None,
            },
        );
        if let Ok(mut shooter) = ctx.world.get::<&mut Shooter>(entity) {
            shooter.cooldown_remaining = tunables.fire_cooldown;
        }
        ctx.events.push(CombatEvent::WeaponFired {
            weapon: WeaponKind::EnemyBolt,
            owner,
            position: origin,
        });
    }
}
