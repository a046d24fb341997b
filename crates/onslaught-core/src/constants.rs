//! Simulation constants and default tuning parameters.
//!
//! Everything here is a default; `GameConfig` carries the values the
//! engine actually uses.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Arena ---

/// Half-width of the default square arena.
pub const ARENA_HALF_EXTENT: f64 = 30.0;

/// Distance a projectile's muzzle placement stays away from a blocking wall.
pub const MUZZLE_SKIN: f64 = 0.05;

// --- Player ---

pub const PLAYER_MOVE_SPEED: f64 = 6.0;

/// Speed multiplier while sprinting.
pub const PLAYER_SPRINT_MULTIPLIER: f64 = 1.5;

/// Fraction of the gap between current and desired velocity closed per tick.
pub const PLAYER_VELOCITY_LERP: f64 = 0.2;

pub const PLAYER_COLLIDER_RADIUS: f64 = 0.4;

// --- Progression ---

pub const START_LEVEL: u32 = 1;

/// XP needed to go from level 1 to level 2.
pub const BASE_XP_TO_NEXT: u32 = 25;

/// Extra XP required for each subsequent level.
pub const XP_TO_NEXT_STEP: u32 = 10;

/// Max HP/MP at level 1.
pub const STAT_AT_MIN_LEVEL: u32 = 10;

/// Max HP/MP at `STAT_SCALING_MAX_LEVEL` and beyond.
pub const STAT_AT_MAX_LEVEL: u32 = 100;

pub const STAT_SCALING_MAX_LEVEL: u32 = 10;

// --- Player weapons ---

/// Primary gun fire rate (shots per second while the trigger is held).
pub const GUN_FIRE_RATE: f64 = 3.0;
pub const GUN_DAMAGE: u32 = 1;
pub const GUN_PROJECTILE_SPEED: f64 = 16.0;
pub const GUN_PROJECTILE_LIFETIME: f64 = 2.0;

/// Distance in front of the shooter at which player ordnance spawns.
pub const PLAYER_MUZZLE_OFFSET: f64 = 0.6;

/// Collider radius of bullets and fireballs.
pub const BULLET_RADIUS: f64 = 0.15;

pub const FIREBALL_DAMAGE: u32 = 2;
pub const FIREBALL_COOLDOWN: f64 = 0.25;
pub const FIREBALL_MP_COST: u32 = 2;

pub const MISSILE_DAMAGE: u32 = 3;
pub const MISSILE_COOLDOWN: f64 = 1.5;
pub const MISSILE_MP_COST: u32 = 5;
pub const MISSILE_SPEED: f64 = 12.0;
pub const MISSILE_LIFETIME: f64 = 4.0;
pub const MISSILE_HOMING_RADIUS: f64 = 5.0;

/// Maximum missile turn rate (degrees per second).
pub const MISSILE_TURN_RATE_DEG: f64 = 360.0;
pub const MISSILE_EXPLOSION_RADIUS: f64 = 3.0;

pub const BLAST_RADIUS: f64 = 1.25;
pub const BLAST_LIFETIME: f64 = 0.2;
pub const BLAST_DAMAGE: u32 = 2;
pub const BLAST_COOLDOWN: f64 = 1.0;
pub const BLAST_MP_COST: u32 = 3;

/// Window after spawn during which unmatched projectile contacts are not terminal.
pub const PROJECTILE_GRACE_SECS: f64 = 0.05;

// --- Enemies (shared) ---

pub const ENEMY_MAX_HEALTH: u32 = 3;
pub const ENEMY_MOVE_SPEED: f64 = 2.5;
pub const ENEMY_CHASE_RADIUS: f64 = 20.0;
pub const ENEMY_COLLIDER_RADIUS: f64 = 0.45;

pub const WANDER_RADIUS: f64 = 5.0;
pub const WANDER_SPEED_MULTIPLIER: f64 = 0.6;
pub const WANDER_INTERVAL_MIN: f64 = 1.5;
pub const WANDER_INTERVAL_MAX: f64 = 3.5;

/// Distance below which a wander target counts as reached.
pub const WANDER_ARRIVAL_DISTANCE: f64 = 0.1;

/// Forward probe length for obstacle avoidance.
pub const AVOID_DISTANCE: f64 = 1.0;

/// Perpendicular probe length for obstacle avoidance.
pub const AVOID_SIDE_DISTANCE: f64 = 0.75;

// --- Melee ---

pub const MELEE_XP_REWARD: u32 = 2;
pub const MELEE_CONTACT_DAMAGE: u32 = 1;
pub const MELEE_CONTACT_COOLDOWN: f64 = 0.5;

// --- Explosive ---

pub const EXPLOSIVE_XP_REWARD: u32 = 2;
pub const EXPLOSION_RADIUS: f64 = 2.5;
pub const EXPLOSION_DAMAGE: u32 = 4;

/// Non-lethal hits an explosive absorbs before detonating.
pub const HITS_TO_EXPLODE: u32 = 2;

// --- Ranged ---

pub const RANGED_XP_REWARD: u32 = 5;
pub const RANGED_DESIRED_RANGE: f64 = 6.0;
pub const RANGED_RANGE_SLACK: f64 = 1.5;

/// Speed multiplier while backing away from a too-close target.
pub const RANGED_BACK_AWAY_BOOST: f64 = 1.2;
pub const RANGED_FIRE_COOLDOWN: f64 = 1.0;
pub const RANGED_PROJECTILE_DAMAGE: u32 = 1;
pub const RANGED_PROJECTILE_SPEED: f64 = 10.0;
pub const RANGED_PROJECTILE_LIFETIME: f64 = 2.5;
pub const RANGED_MUZZLE_OFFSET: f64 = 0.8;

// --- Drops ---

pub const DROP_CHANCE: f64 = 0.25;

/// Share of drops that are health (the rest are resource).
pub const DROP_HEALTH_SHARE: f64 = 0.5;

/// Probability that an enemy is drop-eligible when pre-rolled at spawn.
pub const DROP_ELIGIBLE_CHANCE: f64 = 0.5;

pub const PICKUP_AMOUNT: u32 = 3;
pub const PICKUP_RADIUS: f64 = 0.35;

// --- Waves ---

/// Required kills for wave N is `BASE_ENEMIES_PER_WAVE * N`.
pub const BASE_ENEMIES_PER_WAVE: u32 = 10;

/// Number of waves in a limited run.
pub const MAX_WAVES: u32 = 6;

pub const SPAWN_INTERVAL: f64 = 1.5;
