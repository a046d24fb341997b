//! Enemy steering state machine.
//!
//! Pure functions that pick a steering mode and velocity for one enemy
//! from its position, its target, and its kind's profile. Chase beats
//! wander whenever a target is within the chase radius; the switch has
//! no hysteresis. Only the keep-range band has a dead zone.

use glam::DVec2;
use rand::Rng;

use onslaught_core::constants::WANDER_ARRIVAL_DISTANCE;
use onslaught_core::enums::SteeringMode;
use onslaught_core::types::{Position, Velocity};

use crate::avoidance::{avoid, ObstacleProbe};
use crate::profiles::{BehaviorProfile, KeepRangeBand, WanderProfile};

/// Input to the steering engine for a single enemy.
pub struct SteeringContext {
    pub mode: SteeringMode,
    pub position: Position,
    pub spawn_origin: Position,
    /// Living target, if any.
    pub target: Option<Position>,
    pub wander_target: Position,
    pub wander_timer: f64,
    pub dt: f64,
}

/// Output from the steering engine.
#[derive(Debug, Clone, Copy)]
pub struct SteeringUpdate {
    pub mode: SteeringMode,
    pub velocity: Velocity,
    pub wander_target: Position,
    pub wander_timer: f64,
    /// Direction to fire along this tick, if the kind wants to shoot.
    pub fire_direction: Option<DVec2>,
    pub mode_changed: bool,
}

/// Evaluate steering for one enemy.
pub fn evaluate<R, P>(ctx: &SteeringContext, profile: &BehaviorProfile, rng: &mut R, probe: &P) -> SteeringUpdate
where
    R: Rng + ?Sized,
    P: ObstacleProbe + ?Sized,
{
    let mut update = SteeringUpdate {
        mode: SteeringMode::Idle,
        velocity: Velocity::zero(),
        wander_target: ctx.wander_target,
        wander_timer: ctx.wander_timer - ctx.dt,
        fire_direction: None,
        mode_changed: false,
    };

    let target = ctx
        .target
        .filter(|t| ctx.position.distance_to(t) <= profile.chase_radius);

    match (target, profile.keep_range, profile.wander) {
        (Some(target), Some(band), _) => evaluate_keep_range(ctx, profile, &band, target, probe, &mut update),
        (Some(target), None, _) => evaluate_chase(ctx, profile, target, probe, &mut update),
        (None, _, Some(wander)) => evaluate_wander(ctx, profile, &wander, rng, probe, &mut update),
        (None, _, None) => {}
    }

    update.mode_changed = update.mode != ctx.mode;
    update
}

fn evaluate_chase<P: ObstacleProbe + ?Sized>(
    ctx: &SteeringContext,
    profile: &BehaviorProfile,
    target: Position,
    probe: &P,
    update: &mut SteeringUpdate,
) {
    let desired = ctx.position.direction_to(&target);
    let dir = match profile.avoidance {
        Some(a) if a.while_chasing => avoid(probe, ctx.position.to_vec(), desired, a.distance, a.side_distance),
        _ => desired,
    };
    update.mode = SteeringMode::Chase;
    update.velocity = Velocity::from(dir * profile.move_speed);
}

fn evaluate_keep_range<P: ObstacleProbe + ?Sized>(
    ctx: &SteeringContext,
    profile: &BehaviorProfile,
    band: &KeepRangeBand,
    target: Position,
    probe: &P,
    update: &mut SteeringUpdate,
) {
    let distance = ctx.position.distance_to(&target);
    let to_target = ctx.position.direction_to(&target);
    let steer = |desired: DVec2| match profile.avoidance {
        Some(a) => avoid(probe, ctx.position.to_vec(), desired, a.distance, a.side_distance),
        None => desired,
    };

    if distance > band.outer() {
        update.mode = SteeringMode::Approach;
        update.velocity = Velocity::from(steer(to_target) * profile.move_speed);
    } else if distance < band.inner() {
        update.mode = SteeringMode::Retreat;
        update.velocity = Velocity::from(steer(-to_target) * profile.move_speed * band.back_away_boost);
    } else {
        update.mode = SteeringMode::Hold;
        if to_target != DVec2::ZERO {
            update.fire_direction = Some(to_target);
        }
    }
}

fn evaluate_wander<R, P>(
    ctx: &SteeringContext,
    profile: &BehaviorProfile,
    wander: &WanderProfile,
    rng: &mut R,
    probe: &P,
    update: &mut SteeringUpdate,
) where
    R: Rng + ?Sized,
    P: ObstacleProbe + ?Sized,
{
    let reached = ctx.position.distance_to(&update.wander_target) < WANDER_ARRIVAL_DISTANCE;
    if update.wander_timer <= 0.0 || reached {
        update.wander_target = ctx.spawn_origin.offset(random_in_unit_circle(rng) * wander.radius);
        update.wander_timer = if wander.interval_max > wander.interval_min {
            rng.gen_range(wander.interval_min..wander.interval_max)
        } else {
            wander.interval_min
        };
    }

    let desired = ctx.position.direction_to(&update.wander_target);
    let dir = match profile.avoidance {
        Some(a) => avoid(probe, ctx.position.to_vec(), desired, a.distance, a.side_distance),
        None => desired,
    };
    update.mode = SteeringMode::Wander;
    update.velocity = Velocity::from(dir * profile.move_speed * wander.speed_multiplier);
}

/// Uniform sample inside the unit disc.
pub fn random_in_unit_circle<R: Rng + ?Sized>(rng: &mut R) -> DVec2 {
    let angle = rng.gen_range(0.0..std::f64::consts::TAU);
    let radius = rng.gen::<f64>().sqrt();
    DVec2::new(angle.cos(), angle.sin()) * radius
}
