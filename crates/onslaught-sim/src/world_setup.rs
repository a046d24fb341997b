//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the player, spawn points, enemies, projectiles, and pickups
//! with the appropriate component bundles.

use glam::DVec2;
use hecs::{Entity, EntityBuilder, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use onslaught_core::components::*;
use onslaught_core::config::{GameConfig, PlayerConfig};
use onslaught_core::constants::{PICKUP_RADIUS, START_LEVEL};
use onslaught_core::enums::*;
use onslaught_core::layers::{CollisionLayers, DamageChannel};
use onslaught_core::types::{ActorId, Position, Velocity};

/// Set up a fresh run: the player and every configured spawn point.
pub fn setup_run(world: &mut World, config: &GameConfig, player_start: Position) -> Entity {
    let player = spawn_player(world, &config.player, player_start);
    for point in &config.waves.spawn_points {
        world.spawn((
            point.position,
            SpawnPoint {
                interval: point.interval,
                countdown: point.interval,
                roster: point.roster.clone(),
            },
        ));
    }
    player
}

/// Spawn the player at full level-1 stats.
pub fn spawn_player(world: &mut World, config: &PlayerConfig, position: Position) -> Entity {
    let stat = stat_for_level(config, START_LEVEL);
    world.spawn((
        Player,
        position,
        Velocity::zero(),
        Health { current: stat, max: stat },
        ResourcePool { current: stat, max: stat },
        Life::default(),
        Collider {
            radius: config.collider_radius,
            layer: CollisionLayers::PLAYER,
        },
        Progression {
            level: START_LEVEL,
            xp: 0,
            xp_to_next: config.base_xp_to_next,
        },
        PlayerControl {
            facing: DVec2::X,
            ..Default::default()
        },
    ))
}

/// Max HP/MP for a level: linear from the level-1 value to the capped value.
pub fn stat_for_level(config: &PlayerConfig, level: u32) -> u32 {
    let span = config.stat_scaling_max_level.saturating_sub(1).max(1) as f64;
    let t = (level.saturating_sub(1) as f64 / span).clamp(0.0, 1.0);
    let low = config.stat_at_min_level as f64;
    let high = config.stat_at_max_level as f64;
    (low + (high - low) * t).round() as u32
}

/// Spawn an enemy of `kind` tagged with the wave that spawned it.
pub fn spawn_enemy(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &GameConfig,
    kind: EnemyKind,
    position: Position,
    wave: u32,
) -> Entity {
    let tunables = config.enemy(kind);
    let drops = &tunables.drops;
    let eligible = drops.enabled && (!drops.choose_eligible_at_spawn || rng.gen_bool(drops.eligible_chance));

    let mut builder = EntityBuilder::new();
    builder
        .add(Enemy { kind, spawn_wave: wave })
        .add(position)
        .add(Velocity::zero())
        .add(Health {
            current: tunables.max_health,
            max: tunables.max_health,
        })
        .add(Life::default())
        .add(Collider {
            radius: tunables.collider_radius,
            layer: CollisionLayers::ENEMY,
        })
        .add(DamageGate {
            accepts: tunables.accepts,
        })
        .add(Steering {
            mode: SteeringMode::Idle,
            spawn_origin: position,
            wander_target: position,
            wander_timer: 0.0,
        })
        .add(Bounty { xp: tunables.xp_reward })
        .add(DropTable {
            eligible,
            chance: drops.chance,
            health_share: drops.health_share,
            health_amount: drops.health_amount,
            resource_amount: drops.resource_amount,
        });

    match kind {
        EnemyKind::Melee => {
            builder.add(ContactDamage {
                damage: tunables.contact_damage,
                cooldown: tunables.contact_cooldown,
                cooldown_remaining: 0.0,
            });
        }
        EnemyKind::Explosive => {
            builder.add(Volatile {
                radius: tunables.explosion_radius,
                damage: tunables.explosion_damage,
                hits_to_explode: tunables.hits_to_explode,
                hits_taken: 0,
            });
        }
        EnemyKind::Ranged => {
            builder.add(Shooter { cooldown_remaining: 0.0 });
        }
    }

    world.spawn(builder.build())
}

/// Everything needed to put one projectile into the world.
pub struct ProjectileSpawn {
    pub weapon: WeaponKind,
    pub owner: ActorId,
    pub faction: Faction,
    pub class: PenetrationClass,
    pub channel: DamageChannel,
    pub position: Position,
    pub direction: DVec2,
    pub speed: f64,
    pub damage: u32,
    pub lifetime: f64,
    pub radius: f64,
    pub cancels_hostile_fire: bool,
    pub phases_walls: bool,
    pub explosion_radius: f64,
    pub homing: Option<Homing>,
}

pub fn spawn_projectile(world: &mut World, spawn: ProjectileSpawn) -> Entity {
    let direction = spawn.direction.try_normalize().unwrap_or(DVec2::X);
    let mut builder = EntityBuilder::new();
    builder
        .add(spawn.position)
        .add(Velocity::from(direction * spawn.speed))
        .add(Collider {
            radius: spawn.radius,
            layer: CollisionLayers::PROJECTILE,
        })
        .add(Projectile {
            weapon: spawn.weapon,
            owner: spawn.owner,
            faction: spawn.faction,
            class: spawn.class,
            direction,
            speed: spawn.speed,
            damage: spawn.damage,
            channel: spawn.channel,
            lifetime_remaining: spawn.lifetime,
            age: 0.0,
            resolved: false,
            hit_set: Vec::new(),
            cancels_hostile_fire: spawn.cancels_hostile_fire,
            phases_walls: spawn.phases_walls,
            explosion_radius: spawn.explosion_radius,
        });
    if let Some(homing) = spawn.homing {
        builder.add(homing);
    }
    world.spawn(builder.build())
}

pub fn spawn_pickup(world: &mut World, kind: PickupKind, amount: u32, position: Position) -> Entity {
    world.spawn((
        position,
        Collider {
            radius: PICKUP_RADIUS,
            layer: CollisionLayers::PICKUP,
        },
        Pickup {
            kind,
            amount,
            consumed: false,
        },
    ))
}
