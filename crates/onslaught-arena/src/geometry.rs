//! Analytic 2D collision primitives.
//!
//! Ray and circle casts against circles and axis-aligned boxes, circle
//! overlap tests, and minimum-translation push-out. A circle cast is a
//! ray cast against the shape inflated by the cast radius; for boxes the
//! inflated corners are square rather than rounded.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use onslaught_core::types::Position;

/// Result of a ray or circle cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Contact point on the (inflated) surface.
    pub point: DVec2,
    /// Unit surface normal at the contact, facing the caster.
    pub normal: DVec2,
    /// Distance travelled along the ray.
    pub distance: f64,
}

/// Obstacle footprint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape")]
pub enum Shape {
    Circle { center: Position, radius: f64 },
    Rect { min: Position, max: Position },
}

impl Shape {
    /// Cast a ray of unit direction `dir` against this shape grown by `inflate`.
    pub fn raycast(&self, origin: DVec2, dir: DVec2, max_distance: f64, inflate: f64) -> Option<RayHit> {
        match *self {
            Shape::Circle { center, radius } => {
                ray_circle(origin, dir, max_distance, center.to_vec(), radius + inflate)
            }
            Shape::Rect { min, max } => {
                let grow = DVec2::splat(inflate);
                ray_aabb(origin, dir, max_distance, min.to_vec() - grow, max.to_vec() + grow)
            }
        }
    }

    pub fn overlaps_circle(&self, center: DVec2, radius: f64) -> bool {
        self.push_out(center, radius).is_some()
    }

    /// Minimum translation that moves a circle out of this shape, if they overlap.
    pub fn push_out(&self, center: DVec2, radius: f64) -> Option<DVec2> {
        match *self {
            Shape::Circle { center: c, radius: r } => {
                let delta = center - c.to_vec();
                let reach = r + radius;
                let dist = delta.length();
                if dist >= reach {
                    return None;
                }
                let normal = if dist > f64::EPSILON { delta / dist } else { DVec2::X };
                Some(normal * (reach - dist))
            }
            Shape::Rect { min, max } => {
                let (min, max) = (min.to_vec(), max.to_vec());
                let closest = center.clamp(min, max);
                let delta = center - closest;
                let dist = delta.length();
                if dist > f64::EPSILON {
                    if dist >= radius {
                        return None;
                    }
                    return Some(delta / dist * (radius - dist));
                }
                // Center inside the box: leave through the nearest face.
                let exits = [
                    (center.x - min.x, DVec2::NEG_X),
                    (max.x - center.x, DVec2::X),
                    (center.y - min.y, DVec2::NEG_Y),
                    (max.y - center.y, DVec2::Y),
                ];
                let (depth, normal) = exits
                    .into_iter()
                    .min_by(|a, b| a.0.total_cmp(&b.0))
                    .unwrap_or((0.0, DVec2::X));
                Some(normal * (depth + radius))
            }
        }
    }

    /// Whether the shape has positive extent.
    pub fn is_valid(&self) -> bool {
        match *self {
            Shape::Circle { radius, .. } => radius > 0.0,
            Shape::Rect { min, max } => max.x > min.x && max.y > min.y,
        }
    }
}

/// Ray against a circle. A ray starting inside reports a hit at distance 0.
pub fn ray_circle(origin: DVec2, dir: DVec2, max_distance: f64, center: DVec2, radius: f64) -> Option<RayHit> {
    let to_origin = origin - center;
    let c = to_origin.length_squared() - radius * radius;
    if c <= 0.0 {
        return Some(RayHit {
            point: origin,
            normal: to_origin.try_normalize().unwrap_or(-dir),
            distance: 0.0,
        });
    }
    let b = to_origin.dot(dir);
    if b > 0.0 {
        return None;
    }
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    if t > max_distance {
        return None;
    }
    let point = origin + dir * t;
    Some(RayHit {
        point,
        normal: (point - center) / radius,
        distance: t,
    })
}

/// Ray against an axis-aligned box (slab method).
pub fn ray_aabb(origin: DVec2, dir: DVec2, max_distance: f64, min: DVec2, max: DVec2) -> Option<RayHit> {
    if origin.cmpge(min).all() && origin.cmple(max).all() {
        return Some(RayHit {
            point: origin,
            normal: -dir,
            distance: 0.0,
        });
    }

    let mut t_enter = f64::NEG_INFINITY;
    let mut t_exit = f64::INFINITY;
    let mut normal = DVec2::ZERO;

    for axis in 0..2 {
        let (o, d, lo, hi) = (origin[axis], dir[axis], min[axis], max[axis]);
        if d.abs() < f64::EPSILON {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }
        let mut t0 = (lo - o) / d;
        let mut t1 = (hi - o) / d;
        let mut face = -1.0;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
            face = 1.0;
        }
        if t0 > t_enter {
            t_enter = t0;
            normal = DVec2::ZERO;
            normal[axis] = face;
        }
        t_exit = t_exit.min(t1);
    }

    if t_enter > t_exit || t_enter < 0.0 || t_enter > max_distance {
        return None;
    }
    Some(RayHit {
        point: origin + dir * t_enter,
        normal,
        distance: t_enter,
    })
}

/// Ray from inside a box toward its boundary, treating the boundary as a wall.
pub fn ray_bounds_exit(origin: DVec2, dir: DVec2, max_distance: f64, half_extent: DVec2) -> Option<RayHit> {
    let mut best: Option<RayHit> = None;
    for axis in 0..2 {
        let d = dir[axis];
        if d.abs() < f64::EPSILON {
            continue;
        }
        let wall = half_extent[axis] * d.signum();
        let t = ((wall - origin[axis]) / d).max(0.0);
        if t <= max_distance && best.map_or(true, |hit| t < hit.distance) {
            let mut normal = DVec2::ZERO;
            normal[axis] = -d.signum();
            best = Some(RayHit {
                point: origin + dir * t,
                normal,
                distance: t,
            });
        }
    }
    best
}
