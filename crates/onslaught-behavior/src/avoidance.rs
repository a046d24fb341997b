//! Three-probe obstacle avoidance.
//!
//! Probe ahead along the desired direction; if blocked, probe both
//! perpendiculars. Exactly one clear side wins outright. Both sides clear
//! means slide along the blocking surface. Everything blocked reverses.

use glam::DVec2;

/// Source of obstacle information for steering probes.
pub trait ObstacleProbe {
    /// Cast from `origin` along unit `dir` for `distance`. Returns the
    /// surface normal of the first blocking obstacle, if any.
    fn probe(&self, origin: DVec2, dir: DVec2, distance: f64) -> Option<DVec2>;
}

/// Probe that never reports an obstacle.
pub struct OpenField;

impl ObstacleProbe for OpenField {
    fn probe(&self, _origin: DVec2, _dir: DVec2, _distance: f64) -> Option<DVec2> {
        None
    }
}

/// Adjust a desired direction around obstacles. Returns a unit vector
/// (or zero if `desired` is zero).
pub fn avoid<P: ObstacleProbe + ?Sized>(
    probe: &P,
    origin: DVec2,
    desired: DVec2,
    avoid_distance: f64,
    side_distance: f64,
) -> DVec2 {
    let Some(desired) = desired.try_normalize() else {
        return DVec2::ZERO;
    };
    let Some(normal) = probe.probe(origin, desired, avoid_distance) else {
        return desired;
    };

    let left = desired.perp();
    let right = -left;
    let left_clear = probe.probe(origin, left, side_distance).is_none();
    let right_clear = probe.probe(origin, right, side_distance).is_none();

    match (left_clear, right_clear) {
        (true, false) => left,
        (false, true) => right,
        (true, true) => {
            let slide = normal.perp();
            let slide = if slide.dot(desired) < 0.0 { -slide } else { slide };
            slide.try_normalize().unwrap_or(left)
        }
        (false, false) => -desired,
    }
}
