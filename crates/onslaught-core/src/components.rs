//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::layers::{CollisionLayers, DamageChannel};
use crate::types::{ActorId, Position};

/// Marker for the player actor.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Player;

/// Hostile actor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    /// Wave index that spawned this enemy.
    pub spawn_wave: u32,
}

/// Hit points. `current` is always within `[0, max]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

/// Spendable resource ("MP"). `current` is always within `[0, max]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ResourcePool {
    pub current: u32,
    pub max: u32,
}

/// Death latch. Once `Dying`, the actor ignores damage and behavior updates.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Life {
    pub state: LifeState,
}

/// Circular collision footprint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Collider {
    pub radius: f64,
    /// Layer this entity occupies.
    pub layer: CollisionLayers,
}

/// Channels through which this actor accepts damage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DamageGate {
    pub accepts: DamageChannel,
}

/// Per-enemy steering state carried between ticks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Steering {
    pub mode: SteeringMode,
    /// Where this enemy spawned. Wandering is centered here.
    pub spawn_origin: Position,
    pub wander_target: Position,
    /// Seconds until a new wander target is picked.
    pub wander_timer: f64,
}

/// Ranged attack state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Shooter {
    /// Seconds until the next shot is allowed.
    pub cooldown_remaining: f64,
}

/// Melee touch damage state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ContactDamage {
    pub damage: u32,
    pub cooldown: f64,
    pub cooldown_remaining: f64,
}

/// Self-destruct charge carried by the explosive variant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Volatile {
    pub radius: f64,
    pub damage: u32,
    /// Non-lethal hits absorbed before detonating.
    pub hits_to_explode: u32,
    pub hits_taken: u32,
}

/// Experience granted to the player when this enemy is finalized.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bounty {
    pub xp: u32,
}

/// Death-time drop roll parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DropTable {
    /// False when the per-spawn eligibility pre-roll failed or drops are disabled.
    pub eligible: bool,
    pub chance: f64,
    pub health_share: f64,
    /// `None` means no health pickup template is configured.
    pub health_amount: Option<u32>,
    /// `None` means no resource pickup template is configured.
    pub resource_amount: Option<u32>,
}

/// Player level and experience.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Progression {
    pub level: u32,
    pub xp: u32,
    pub xp_to_next: u32,
}

/// Player intent and weapon timers.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerControl {
    /// Raw movement input, each axis in [-1, 1].
    pub move_input: DVec2,
    /// Aim direction (unit vector, or zero to fire along `facing`).
    pub aim: DVec2,
    /// Last non-zero movement direction.
    pub facing: DVec2,
    pub trigger_held: bool,
    pub sprint: bool,
    pub gun_cooldown: f64,
    pub fireball_cooldown: f64,
    pub missile_cooldown: f64,
    pub blast_cooldown: f64,
    pub fireball_requested: bool,
    pub missile_requested: bool,
    pub blast_requested: bool,
}

/// Short-lived damage carrier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub weapon: WeaponKind,
    /// Firing actor. Identity comparison only.
    pub owner: ActorId,
    pub faction: Faction,
    pub class: PenetrationClass,
    /// Unit vector.
    pub direction: DVec2,
    pub speed: f64,
    pub damage: u32,
    /// Channel used for every damage call this projectile makes.
    pub channel: DamageChannel,
    pub lifetime_remaining: f64,
    /// Seconds since spawn.
    pub age: f64,
    /// Terminal-interaction latch.
    pub resolved: bool,
    /// Targets already damaged (piercing class).
    pub hit_set: Vec<ActorId>,
    /// Destroys opposing-faction projectiles on contact.
    pub cancels_hostile_fire: bool,
    /// Passes through solid arena geometry.
    pub phases_walls: bool,
    /// Detonation radius (area class).
    pub explosion_radius: f64,
}

/// Target re-acquisition and turn-rate limits for guided projectiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Homing {
    pub radius: f64,
    /// Radians per second.
    pub turn_rate: f64,
    pub target: Option<ActorId>,
}

/// Collectible dropped on enemy death.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: PickupKind,
    pub amount: u32,
    /// Consumption latch.
    pub consumed: bool,
}

/// Enemy spawner location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub interval: f64,
    pub countdown: f64,
    /// Enemy kinds picked uniformly at random.
    pub roster: Vec<EnemyKind>,
}
