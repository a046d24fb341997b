//! Spatial query service.
//!
//! The combat systems only see the world through `SpatialQuery`:
//! layered overlap tests, ray and circle casts, and velocity-based
//! movement. `ArenaSpace` is the analytic reference implementation over
//! an `Arena` layout plus the circular colliders in the ECS world.

use glam::DVec2;
use hecs::{Entity, World};

use onslaught_arena::Arena;
use onslaught_behavior::avoidance::ObstacleProbe;
use onslaught_core::components::Collider;
use onslaught_core::constants::MUZZLE_SKIN;
use onslaught_core::layers::CollisionLayers;
use onslaught_core::types::{Position, Velocity};

/// Result of a cast through the spatial service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialHit {
    pub point: Position,
    /// Unit surface normal facing the caster.
    pub normal: DVec2,
    pub distance: f64,
    /// Collider entity that was hit, `None` for static geometry.
    pub entity: Option<Entity>,
}

/// Collision and movement services the simulation depends on.
pub trait SpatialQuery {
    /// Entities whose colliders on `mask` overlap the circle.
    fn overlap_circle(&self, world: &World, center: Position, radius: f64, mask: CollisionLayers) -> Vec<Entity>;

    /// Whether the circle overlaps static geometry on `mask`.
    fn overlaps_obstacle(&self, center: Position, radius: f64, mask: CollisionLayers) -> bool;

    fn raycast(
        &self,
        world: &World,
        origin: Position,
        dir: DVec2,
        max_distance: f64,
        mask: CollisionLayers,
    ) -> Option<SpatialHit>;

    fn circle_cast(
        &self,
        world: &World,
        origin: Position,
        radius: f64,
        dir: DVec2,
        max_distance: f64,
        mask: CollisionLayers,
    ) -> Option<SpatialHit>;

    /// Integrate one entity's velocity over `dt`, resolving actor bodies out of walls.
    fn move_actor(&self, world: &mut World, entity: Entity, dt: f64);

    fn in_bounds(&self, pos: &Position) -> bool;

    /// Player spawn location.
    fn player_start(&self) -> Position;
}

/// Reference spatial service over a static arena.
pub struct ArenaSpace {
    arena: Arena,
}

impl ArenaSpace {
    pub fn new(arena: Arena) -> Self {
        Self { arena }
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    fn cast(
        &self,
        world: &World,
        origin: Position,
        dir: DVec2,
        max_distance: f64,
        inflate: f64,
        mask: CollisionLayers,
    ) -> Option<SpatialHit> {
        let dir = dir.try_normalize()?;
        let origin_vec = origin.to_vec();
        let mut best = self
            .arena
            .circle_cast(origin_vec, inflate, dir, max_distance, mask)
            .map(|hit| SpatialHit {
                point: Position::from(hit.point),
                normal: hit.normal,
                distance: hit.distance,
                entity: None,
            });

        let mut query = world.query::<(&Position, &Collider)>();
        for (entity, (pos, collider)) in query.iter() {
            if !collider.layer.intersects(mask) {
                continue;
            }
            let hit = onslaught_arena::geometry::ray_circle(
                origin_vec,
                dir,
                max_distance,
                pos.to_vec(),
                collider.radius + inflate,
            );
            if let Some(hit) = hit {
                if best.map_or(true, |b| hit.distance < b.distance) {
                    best = Some(SpatialHit {
                        point: Position::from(hit.point),
                        normal: hit.normal,
                        distance: hit.distance,
                        entity: Some(entity),
                    });
                }
            }
        }
        best
    }
}

impl SpatialQuery for ArenaSpace {
    fn overlap_circle(&self, world: &World, center: Position, radius: f64, mask: CollisionLayers) -> Vec<Entity> {
        let mut query = world.query::<(&Position, &Collider)>();
        query
            .iter()
            .filter(|(_, (pos, collider))| {
                collider.layer.intersects(mask) && pos.distance_to(&center) <= radius + collider.radius
            })
            .map(|(entity, _)| entity)
            .collect()
    }

    fn overlaps_obstacle(&self, center: Position, radius: f64, mask: CollisionLayers) -> bool {
        self.arena.overlaps_circle(center.to_vec(), radius, mask)
    }

    fn raycast(
        &self,
        world: &World,
        origin: Position,
        dir: DVec2,
        max_distance: f64,
        mask: CollisionLayers,
    ) -> Option<SpatialHit> {
        self.cast(world, origin, dir, max_distance, 0.0, mask)
    }

    fn circle_cast(
        &self,
        world: &World,
        origin: Position,
        radius: f64,
        dir: DVec2,
        max_distance: f64,
        mask: CollisionLayers,
    ) -> Option<SpatialHit> {
        self.cast(world, origin, dir, max_distance, radius, mask)
    }

    fn move_actor(&self, world: &mut World, entity: Entity, dt: f64) {
        let Ok((pos, vel, collider)) = world.query_one_mut::<(&mut Position, &Velocity, Option<&Collider>)>(entity) else {
            return;
        };
        let mut next = pos.to_vec() + vel.to_vec() * dt;
        if let Some(collider) = collider {
            if collider.layer.intersects(CollisionLayers::ACTORS) {
                next = self.arena.resolve_circle(next, collider.radius, CollisionLayers::WALL);
            }
        }
        *pos = Position::from(next);
    }

    fn in_bounds(&self, pos: &Position) -> bool {
        self.arena.contains(pos)
    }

    fn player_start(&self) -> Position {
        self.arena.player_start
    }
}

/// Adapts a spatial service to the steering engine's obstacle probe.
/// Only walls are considered; other actors do not deflect steering.
pub struct WallProbe<'a, S: SpatialQuery + ?Sized> {
    pub spatial: &'a S,
    pub world: &'a World,
}

impl<S: SpatialQuery + ?Sized> ObstacleProbe for WallProbe<'_, S> {
    fn probe(&self, origin: DVec2, dir: DVec2, distance: f64) -> Option<DVec2> {
        self.spatial
            .raycast(self.world, Position::from(origin), dir, distance, CollisionLayers::WALL)
            .map(|hit| hit.normal)
    }
}

/// Spawn point for ordnance leaving `origin` along `dir`.
///
/// Circle-casts the projectile's body over the muzzle offset against solid
/// geometry; a blocked muzzle pulls the spawn back so the projectile never
/// starts inside a wall.
pub fn muzzle_point<S: SpatialQuery + ?Sized>(
    spatial: &S,
    world: &World,
    origin: Position,
    dir: DVec2,
    offset: f64,
    radius: f64,
) -> Position {
    let Some(dir) = dir.try_normalize() else {
        return origin;
    };
    if offset <= 0.0 {
        return origin;
    }
    match spatial.circle_cast(world, origin, radius, dir, offset, CollisionLayers::SOLID) {
        Some(hit) => {
            let back = (hit.distance - MUZZLE_SKIN).max(0.0);
            origin.offset(dir * back)
        }
        None => origin.offset(dir * offset),
    }
}
