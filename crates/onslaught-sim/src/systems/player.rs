//! Player control: movement smoothing and the weapon loadout.
//!
//! Commands only latch intent into `PlayerControl`; this system turns that
//! intent into velocity and ordnance once per tick.

use glam::DVec2;
use hecs::Entity;

use onslaught_core::components::{Enemy, Homing, PlayerControl};
use onslaught_core::config::WeaponSpec;
use onslaught_core::enums::{Faction, PenetrationClass, WeaponKind};
use onslaught_core::events::CombatEvent;
use onslaught_core::layers::DamageChannel;
use onslaught_core::types::{ActorId, Position, Velocity};

use crate::context::{actor_id, is_alive, CombatContext};
use crate::spatial;
use crate::systems::damage;
use crate::world_setup::{self, ProjectileSpawn};

/// Move the player toward its input velocity.
pub fn run_movement(ctx: &mut CombatContext) {
    let Some(player) = ctx.player() else {
        return;
    };
    let alive = is_alive(ctx.world, player);
    let config = &ctx.config.player;
    let Ok((vel, control)) = ctx.world.query_one_mut::<(&mut Velocity, &mut PlayerControl)>(player) else {
        return;
    };
    if !alive {
        *vel = Velocity::zero();
        return;
    }

    let input = control.move_input.clamp_length_max(1.0);
    let sprint = if control.sprint { config.sprint_multiplier } else { 1.0 };
    let desired = input * config.move_speed * sprint;
    let current = vel.to_vec();
    *vel = Velocity::from(current.lerp(desired, config.velocity_lerp.clamp(0.0, 1.0)));

    if let Some(dir) = input.try_normalize() {
        control.facing = dir;
    }
}

/// Which weapons the player is trying to fire this tick.
struct FireOrders {
    position: Position,
    aim: DVec2,
    gun: bool,
    fireball: bool,
    missile: bool,
    blast: bool,
}

/// Tick weapon cooldowns and fire whatever is requested and ready.
pub fn run_weapons(ctx: &mut CombatContext) {
    let Some(player) = ctx.player() else {
        return;
    };
    let alive = is_alive(ctx.world, player);
    let dt = ctx.dt;
    let orders = {
        let Ok((pos, control)) = ctx.world.query_one_mut::<(&Position, &mut PlayerControl)>(player) else {
            return;
        };
        control.gun_cooldown = (control.gun_cooldown - dt).max(0.0);
        control.fireball_cooldown = (control.fireball_cooldown - dt).max(0.0);
        control.missile_cooldown = (control.missile_cooldown - dt).max(0.0);
        control.blast_cooldown = (control.blast_cooldown - dt).max(0.0);

        let orders = FireOrders {
            position: *pos,
            aim: control.aim.try_normalize().unwrap_or(control.facing),
            gun: control.trigger_held,
            fireball: control.fireball_requested,
            missile: control.missile_requested,
            blast: control.blast_requested,
        };
        control.fireball_requested = false;
        control.missile_requested = false;
        control.blast_requested = false;
        orders
    };
    if !alive {
        return;
    }

    let config = ctx.config;
    let weapons = &config.weapons;
    if orders.gun {
        if let Some(spec) = &weapons.gun {
            fire(ctx, player, &orders, WeaponKind::Gun, spec);
        }
    }
    if orders.fireball {
        if let Some(spec) = &weapons.fireball {
            fire(ctx, player, &orders, WeaponKind::Fireball, spec);
        }
    }
    if orders.missile {
        if let Some(spec) = &weapons.missile {
            fire(ctx, player, &orders, WeaponKind::Missile, spec);
        }
    }
    if orders.blast {
        if let Some(spec) = &weapons.blast {
            fire(ctx, player, &orders, WeaponKind::Blast, spec);
        }
    }
}

fn cooldown_slot(control: &mut PlayerControl, weapon: WeaponKind) -> Option<&mut f64> {
    match weapon {
        WeaponKind::Gun => Some(&mut control.gun_cooldown),
        WeaponKind::Fireball => Some(&mut control.fireball_cooldown),
        WeaponKind::Missile => Some(&mut control.missile_cooldown),
        WeaponKind::Blast => Some(&mut control.blast_cooldown),
        WeaponKind::EnemyBolt => None,
    }
}

/// Fire one weapon if its cooldown has elapsed and the resource cost is paid.
fn fire(ctx: &mut CombatContext, player: Entity, orders: &FireOrders, weapon: WeaponKind, spec: &WeaponSpec) -> bool {
    let ready = ctx
        .world
        .get::<&mut PlayerControl>(player)
        .ok()
        .and_then(|mut control| cooldown_slot(&mut control, weapon).map(|cd| *cd <= 0.0))
        .unwrap_or(false);
    if !ready {
        return false;
    }
    if spec.resource_cost > 0 && !damage::spend_resource(ctx, player, spec.resource_cost) {
        return false;
    }
    if let Ok(mut control) = ctx.world.get::<&mut PlayerControl>(player) {
        if let Some(cd) = cooldown_slot(&mut control, weapon) {
            *cd = spec.cooldown;
        }
    }

    let owner = actor_id(player);
    let spawn = match weapon {
        WeaponKind::Blast => ProjectileSpawn {
            weapon,
            owner,
            faction: Faction::Friendly,
            class: PenetrationClass::Piercing,
            channel: DamageChannel::BLAST,
            position: orders.position,
            direction: orders.aim,
            speed: 0.0,
            damage: spec.damage,
            lifetime: spec.lifetime,
            radius: spec.radius,
            cancels_hostile_fire: false,
            phases_walls: true,
            explosion_radius: 0.0,
            homing: None,
        },
        WeaponKind::Missile => ProjectileSpawn {
            weapon,
            owner,
            faction: Faction::Friendly,
            class: PenetrationClass::Area,
            channel: DamageChannel::BLAST,
            position: muzzle(ctx, orders, spec),
            direction: orders.aim,
            speed: spec.speed,
            damage: spec.damage,
            lifetime: spec.lifetime,
            radius: spec.radius,
            cancels_hostile_fire: false,
            phases_walls: true,
            explosion_radius: spec.explosion_radius,
            homing: Some(Homing {
                radius: spec.homing_radius,
                turn_rate: spec.turn_rate_deg.to_radians(),
                target: nearest_enemy(ctx, orders.position, spec.homing_radius),
            }),
        },
        _ => ProjectileSpawn {
            weapon,
            owner,
            faction: Faction::Friendly,
            class: PenetrationClass::SingleTarget,
            channel: DamageChannel::PROJECTILE,
            position: muzzle(ctx, orders, spec),
            direction: orders.aim,
            speed: spec.speed,
            damage: spec.damage,
            lifetime: spec.lifetime,
            radius: spec.radius,
            cancels_hostile_fire: true,
            phases_walls: false,
            explosion_radius: 0.0,
            homing: None,
        },
    };

    world_setup::spawn_projectile(ctx.world, spawn);
    ctx.events.push(CombatEvent::WeaponFired {
        weapon,
        owner,
        position: orders.position,
    });
    true
}

fn muzzle(ctx: &CombatContext, orders: &FireOrders, spec: &WeaponSpec) -> Position {
    spatial::muzzle_point(
        ctx.spatial,
        ctx.world,
        orders.position,
        orders.aim,
        spec.muzzle_offset,
        spec.radius,
    )
}

/// Nearest living enemy within `radius` of `from`.
pub fn nearest_enemy(ctx: &CombatContext, from: Position, radius: f64) -> Option<ActorId> {
    let mut query = ctx.world.query::<(&Enemy, &Position)>();
    query
        .iter()
        .filter(|(entity, _)| is_alive(ctx.world, *entity))
        .map(|(entity, (_, pos))| (entity, pos.distance_to(&from)))
        .filter(|(_, distance)| *distance <= radius)
        .min_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.to_bits().cmp(&b.0.to_bits())))
        .map(|(entity, _)| actor_id(entity))
}
