//! Kind-specific steering profiles.
//!
//! Consolidates the per-kind parameters the steering engine reads.

use onslaught_core::config::EnemyConfig;
use onslaught_core::enums::EnemyKind;

/// Steering parameters for one enemy kind.
#[derive(Debug, Clone)]
pub struct BehaviorProfile {
    pub move_speed: f64,
    /// Targets farther than this are ignored.
    pub chase_radius: f64,
    /// `None` idles in place when no target is in range.
    pub wander: Option<WanderProfile>,
    /// `None` steers straight at the desired direction.
    pub avoidance: Option<AvoidanceProfile>,
    /// `Some` switches chase to keep-range.
    pub keep_range: Option<KeepRangeBand>,
}

#[derive(Debug, Clone, Copy)]
pub struct WanderProfile {
    pub radius: f64,
    pub speed_multiplier: f64,
    pub interval_min: f64,
    pub interval_max: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct AvoidanceProfile {
    pub distance: f64,
    pub side_distance: f64,
    /// The explosive kind charges straight and only avoids while wandering.
    pub while_chasing: bool,
}

/// Standoff band `[desired - slack, desired + slack]`.
#[derive(Debug, Clone, Copy)]
pub struct KeepRangeBand {
    pub desired: f64,
    pub slack: f64,
    /// Speed multiplier while backing away.
    pub back_away_boost: f64,
}

impl KeepRangeBand {
    pub fn inner(&self) -> f64 {
        self.desired - self.slack
    }

    pub fn outer(&self) -> f64 {
        self.desired + self.slack
    }
}

/// Default profile for a kind.
pub fn get_profile(kind: EnemyKind) -> BehaviorProfile {
    from_config(&EnemyConfig::for_kind(kind))
}

/// Build a profile from runtime tunables.
pub fn from_config(config: &EnemyConfig) -> BehaviorProfile {
    BehaviorProfile {
        move_speed: config.move_speed,
        chase_radius: config.chase_radius,
        wander: config.wander_enabled.then_some(WanderProfile {
            radius: config.wander_radius,
            speed_multiplier: config.wander_speed_multiplier,
            interval_min: config.wander_interval_min,
            interval_max: config.wander_interval_max,
        }),
        avoidance: config.avoidance_enabled.then_some(AvoidanceProfile {
            distance: config.avoid_distance,
            side_distance: config.avoid_side_distance,
            while_chasing: config.avoid_while_chasing,
        }),
        keep_range: config.keeps_range().then_some(KeepRangeBand {
            desired: config.desired_range,
            slack: config.range_slack,
            back_away_boost: config.back_away_boost,
        }),
    }
}
