//! Runtime-tunable game configuration.
//!
//! Every section is `#[serde(default)]`, so a partial JSON document only
//! overrides the fields it names. Defaults come from [`crate::constants`].

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{EnemyKind, KillOverflowPolicy};
use crate::error::ConfigError;
use crate::layers::DamageChannel;
use crate::types::Position;

/// Complete set of gameplay tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player: PlayerConfig,
    pub weapons: WeaponsConfig,
    pub melee: EnemyConfig,
    pub explosive: EnemyConfig,
    pub ranged: EnemyConfig,
    pub waves: WaveConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub move_speed: f64,
    pub sprint_multiplier: f64,
    pub velocity_lerp: f64,
    pub collider_radius: f64,
    pub base_xp_to_next: u32,
    pub xp_to_next_step: u32,
    pub stat_at_min_level: u32,
    pub stat_at_max_level: u32,
    pub stat_scaling_max_level: u32,
}

/// One weapon's ordnance template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponSpec {
    pub damage: u32,
    pub speed: f64,
    pub lifetime: f64,
    pub cooldown: f64,
    pub resource_cost: u32,
    /// Collider radius of the spawned projectile.
    pub radius: f64,
    pub muzzle_offset: f64,
    /// Area class only.
    pub explosion_radius: f64,
    /// Guided ordnance only.
    pub homing_radius: f64,
    /// Guided ordnance only (degrees per second).
    pub turn_rate_deg: f64,
}

/// Player weapon loadout. A `None` slot never fires.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponsConfig {
    pub gun: Option<WeaponSpec>,
    pub fireball: Option<WeaponSpec>,
    pub missile: Option<WeaponSpec>,
    pub blast: Option<WeaponSpec>,
}

/// Per-kind enemy tunables. Fields that do not apply to a kind are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub max_health: u32,
    pub move_speed: f64,
    pub chase_radius: f64,
    pub collider_radius: f64,
    pub xp_reward: u32,
    pub accepts: DamageChannel,

    pub wander_enabled: bool,
    pub wander_radius: f64,
    pub wander_speed_multiplier: f64,
    pub wander_interval_min: f64,
    pub wander_interval_max: f64,

    pub avoidance_enabled: bool,
    pub avoid_while_chasing: bool,
    pub avoid_distance: f64,
    pub avoid_side_distance: f64,

    pub contact_damage: u32,
    pub contact_cooldown: f64,

    pub explosion_radius: f64,
    pub explosion_damage: u32,
    pub hits_to_explode: u32,

    pub desired_range: f64,
    pub range_slack: f64,
    pub back_away_boost: f64,
    pub fire_cooldown: f64,
    /// Ranged ordnance. `None` disables firing.
    pub projectile: Option<WeaponSpec>,

    pub drops: DropConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DropConfig {
    pub enabled: bool,
    pub chance: f64,
    pub health_share: f64,
    /// `None` means no health pickup template.
    pub health_amount: Option<u32>,
    /// `None` means no resource pickup template.
    pub resource_amount: Option<u32>,
    /// Pre-roll drop eligibility once at spawn.
    pub choose_eligible_at_spawn: bool,
    pub eligible_chance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    pub base_enemies_per_wave: u32,
    pub max_waves: u32,
    pub kill_overflow: KillOverflowPolicy,
    pub spawn_points: Vec<SpawnPointConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnPointConfig {
    pub position: Position,
    pub interval: f64,
    pub roster: Vec<EnemyKind>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: PLAYER_MOVE_SPEED,
            sprint_multiplier: PLAYER_SPRINT_MULTIPLIER,
            velocity_lerp: PLAYER_VELOCITY_LERP,
            collider_radius: PLAYER_COLLIDER_RADIUS,
            base_xp_to_next: BASE_XP_TO_NEXT,
            xp_to_next_step: XP_TO_NEXT_STEP,
            stat_at_min_level: STAT_AT_MIN_LEVEL,
            stat_at_max_level: STAT_AT_MAX_LEVEL,
            stat_scaling_max_level: STAT_SCALING_MAX_LEVEL,
        }
    }
}

impl Default for WeaponSpec {
    fn default() -> Self {
        Self {
            damage: GUN_DAMAGE,
            speed: GUN_PROJECTILE_SPEED,
            lifetime: GUN_PROJECTILE_LIFETIME,
            cooldown: 1.0 / GUN_FIRE_RATE,
            resource_cost: 0,
            radius: BULLET_RADIUS,
            muzzle_offset: PLAYER_MUZZLE_OFFSET,
            explosion_radius: 0.0,
            homing_radius: 0.0,
            turn_rate_deg: 0.0,
        }
    }
}

impl Default for WeaponsConfig {
    fn default() -> Self {
        Self {
            gun: Some(WeaponSpec::default()),
            fireball: Some(WeaponSpec {
                damage: FIREBALL_DAMAGE,
                cooldown: FIREBALL_COOLDOWN,
                resource_cost: FIREBALL_MP_COST,
                ..Default::default()
            }),
            missile: Some(WeaponSpec {
                damage: MISSILE_DAMAGE,
                speed: MISSILE_SPEED,
                lifetime: MISSILE_LIFETIME,
                cooldown: MISSILE_COOLDOWN,
                resource_cost: MISSILE_MP_COST,
                explosion_radius: MISSILE_EXPLOSION_RADIUS,
                homing_radius: MISSILE_HOMING_RADIUS,
                turn_rate_deg: MISSILE_TURN_RATE_DEG,
                ..Default::default()
            }),
            blast: Some(WeaponSpec {
                damage: BLAST_DAMAGE,
                speed: 0.0,
                lifetime: BLAST_LIFETIME,
                cooldown: BLAST_COOLDOWN,
                resource_cost: BLAST_MP_COST,
                radius: BLAST_RADIUS,
                muzzle_offset: 0.0,
                ..Default::default()
            }),
        }
    }
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self::for_kind(EnemyKind::Melee)
    }
}

impl EnemyConfig {
    /// Default tunables for an enemy kind.
    pub fn for_kind(kind: EnemyKind) -> Self {
        let base = Self {
            max_health: ENEMY_MAX_HEALTH,
            move_speed: ENEMY_MOVE_SPEED,
            chase_radius: ENEMY_CHASE_RADIUS,
            collider_radius: ENEMY_COLLIDER_RADIUS,
            xp_reward: MELEE_XP_REWARD,
            accepts: DamageChannel::all(),
            wander_enabled: true,
            wander_radius: WANDER_RADIUS,
            wander_speed_multiplier: WANDER_SPEED_MULTIPLIER,
            wander_interval_min: WANDER_INTERVAL_MIN,
            wander_interval_max: WANDER_INTERVAL_MAX,
            avoidance_enabled: true,
            avoid_while_chasing: true,
            avoid_distance: AVOID_DISTANCE,
            avoid_side_distance: AVOID_SIDE_DISTANCE,
            contact_damage: 0,
            contact_cooldown: MELEE_CONTACT_COOLDOWN,
            explosion_radius: 0.0,
            explosion_damage: 0,
            hits_to_explode: 0,
            desired_range: 0.0,
            range_slack: 0.0,
            back_away_boost: 1.0,
            fire_cooldown: 0.0,
            projectile: None,
            drops: DropConfig::default(),
        };

        match kind {
            EnemyKind::Melee => Self {
                contact_damage: MELEE_CONTACT_DAMAGE,
                ..base
            },
            EnemyKind::Explosive => Self {
                xp_reward: EXPLOSIVE_XP_REWARD,
                avoid_while_chasing: false,
                explosion_radius: EXPLOSION_RADIUS,
                explosion_damage: EXPLOSION_DAMAGE,
                hits_to_explode: HITS_TO_EXPLODE,
                ..base
            },
            EnemyKind::Ranged => Self {
                xp_reward: RANGED_XP_REWARD,
                accepts: DamageChannel::PROJECTILE | DamageChannel::BLAST,
                wander_enabled: false,
                desired_range: RANGED_DESIRED_RANGE,
                range_slack: RANGED_RANGE_SLACK,
                back_away_boost: RANGED_BACK_AWAY_BOOST,
                fire_cooldown: RANGED_FIRE_COOLDOWN,
                projectile: Some(WeaponSpec {
                    damage: RANGED_PROJECTILE_DAMAGE,
                    speed: RANGED_PROJECTILE_SPEED,
                    lifetime: RANGED_PROJECTILE_LIFETIME,
                    cooldown: RANGED_FIRE_COOLDOWN,
                    muzzle_offset: RANGED_MUZZLE_OFFSET,
                    ..Default::default()
                }),
                ..base
            },
        }
    }

    /// Whether this kind holds a standoff band instead of closing to contact.
    pub fn keeps_range(&self) -> bool {
        self.desired_range > 0.0
    }
}

impl Default for DropConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            chance: DROP_CHANCE,
            health_share: DROP_HEALTH_SHARE,
            health_amount: Some(PICKUP_AMOUNT),
            resource_amount: Some(PICKUP_AMOUNT),
            choose_eligible_at_spawn: false,
            eligible_chance: DROP_ELIGIBLE_CHANCE,
        }
    }
}

impl Default for WaveConfig {
    fn default() -> Self {
        let corner = ARENA_HALF_EXTENT - 4.0;
        let roster = vec![EnemyKind::Melee, EnemyKind::Explosive, EnemyKind::Ranged];
        let spawn_points = [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)]
            .into_iter()
            .map(|(sx, sy)| SpawnPointConfig {
                position: Position::new(sx * corner, sy * corner),
                interval: SPAWN_INTERVAL,
                roster: roster.clone(),
            })
            .collect();

        Self {
            base_enemies_per_wave: BASE_ENEMIES_PER_WAVE,
            max_waves: MAX_WAVES,
            kill_overflow: KillOverflowPolicy::default(),
            spawn_points,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player: PlayerConfig::default(),
            weapons: WeaponsConfig::default(),
            melee: EnemyConfig::for_kind(EnemyKind::Melee),
            explosive: EnemyConfig::for_kind(EnemyKind::Explosive),
            ranged: EnemyConfig::for_kind(EnemyKind::Ranged),
            waves: WaveConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) JSON document and validate it.
    ///
    /// Enemy sections left out of the document keep their per-kind defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let mut config = Self::new();
        if let Some(section) = value.get("player") {
            config.player = serde_json::from_value(section.clone())?;
        }
        if let Some(section) = value.get("weapons") {
            config.weapons = serde_json::from_value(section.clone())?;
        }
        if let Some(section) = value.get("waves") {
            config.waves = serde_json::from_value(section.clone())?;
        }
        for kind in [EnemyKind::Melee, EnemyKind::Explosive, EnemyKind::Ranged] {
            let key = kind_key(kind);
            if let Some(section) = value.get(key) {
                *config.enemy_mut(kind) = merge_enemy(kind, section)?;
            }
        }
        config.validate()?;
        Ok(config)
    }

    pub fn enemy(&self, kind: EnemyKind) -> &EnemyConfig {
        match kind {
            EnemyKind::Melee => &self.melee,
            EnemyKind::Explosive => &self.explosive,
            EnemyKind::Ranged => &self.ranged,
        }
    }

    pub fn enemy_mut(&mut self, kind: EnemyKind) -> &mut EnemyConfig {
        match kind {
            EnemyKind::Melee => &mut self.melee,
            EnemyKind::Explosive => &mut self.explosive,
            EnemyKind::Ranged => &mut self.ranged,
        }
    }

    /// Check every tunable the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let waves = &self.waves;
        if waves.max_waves == 0 {
            return Err(ConfigError::NoWaves);
        }
        if waves.base_enemies_per_wave == 0 {
            return Err(ConfigError::EmptyWave);
        }
        for (index, point) in waves.spawn_points.iter().enumerate() {
            if point.roster.is_empty() {
                return Err(ConfigError::EmptyRoster { index });
            }
            positive("spawn_points.interval", point.interval)?;
        }

        positive("player.move_speed", self.player.move_speed)?;
        positive("player.collider_radius", self.player.collider_radius)?;
        probability("player.velocity_lerp", self.player.velocity_lerp)?;

        for kind in [EnemyKind::Melee, EnemyKind::Explosive, EnemyKind::Ranged] {
            self.enemy(kind).validate(kind_key(kind))?;
        }
        Ok(())
    }
}

impl EnemyConfig {
    fn validate(&self, kind: &'static str) -> Result<(), ConfigError> {
        if self.max_health == 0 {
            return Err(ConfigError::ZeroHealth { kind });
        }
        positive("move_speed", self.move_speed)?;
        positive("chase_radius", self.chase_radius)?;
        positive("collider_radius", self.collider_radius)?;
        if self.wander_enabled {
            positive("wander_radius", self.wander_radius)?;
            if self.wander_interval_min > self.wander_interval_max {
                return Err(ConfigError::WanderInterval {
                    min: self.wander_interval_min,
                    max: self.wander_interval_max,
                });
            }
        }
        if self.keeps_range() && self.range_slack >= self.desired_range {
            return Err(ConfigError::KeepRangeBand {
                desired: self.desired_range,
                slack: self.range_slack,
            });
        }
        if self.explosion_damage > 0 {
            positive("explosion_radius", self.explosion_radius)?;
        }
        probability("drops.chance", self.drops.chance)?;
        probability("drops.health_share", self.drops.health_share)?;
        probability("drops.eligible_chance", self.drops.eligible_chance)?;
        Ok(())
    }
}

fn kind_key(kind: EnemyKind) -> &'static str {
    match kind {
        EnemyKind::Melee => "melee",
        EnemyKind::Explosive => "explosive",
        EnemyKind::Ranged => "ranged",
    }
}

/// Overlay a partial enemy section onto the kind's defaults.
fn merge_enemy(kind: EnemyKind, section: &serde_json::Value) -> Result<EnemyConfig, ConfigError> {
    let mut merged = serde_json::to_value(EnemyConfig::for_kind(kind))?;
    if let (Some(base), Some(overrides)) = (merged.as_object_mut(), section.as_object()) {
        for (key, value) in overrides {
            base.insert(key.clone(), value.clone());
        }
    }
    Ok(serde_json::from_value(merged)?)
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Probability { field, value })
    }
}
