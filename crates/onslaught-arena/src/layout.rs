//! Arena layout: bounds and static obstacles, with layered queries.

use std::path::Path;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use onslaught_core::constants::ARENA_HALF_EXTENT;
use onslaught_core::layers::CollisionLayers;
use onslaught_core::types::Position;

use crate::error::ArenaError;
use crate::geometry::{ray_bounds_exit, RayHit, Shape};

/// Static piece of arena geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    #[serde(flatten)]
    pub shape: Shape,
    #[serde(default = "default_obstacle_layers")]
    pub layers: CollisionLayers,
}

fn default_obstacle_layers() -> CollisionLayers {
    CollisionLayers::WALL
}

/// Rectangular arena centered on the origin. The boundary behaves as a wall.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena {
    pub half_width: f64,
    pub half_height: f64,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
    #[serde(default)]
    pub player_start: Position,
}

impl Default for Arena {
    fn default() -> Self {
        Self::default_layout()
    }
}

impl Arena {
    /// Empty arena with the given half extents.
    pub fn open(half_width: f64, half_height: f64) -> Self {
        Self {
            half_width,
            half_height,
            obstacles: Vec::new(),
            player_start: Position::default(),
        }
    }

    /// Square arena with four pillars and a low barrier that only blocks muzzles.
    pub fn default_layout() -> Self {
        let mut arena = Self::open(ARENA_HALF_EXTENT, ARENA_HALF_EXTENT);
        let offset = ARENA_HALF_EXTENT * 0.4;
        for (sx, sy) in [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)] {
            arena.obstacles.push(Obstacle {
                shape: Shape::Rect {
                    min: Position::new(sx * offset - 1.5, sy * offset - 1.5),
                    max: Position::new(sx * offset + 1.5, sy * offset + 1.5),
                },
                layers: CollisionLayers::WALL,
            });
        }
        arena.obstacles.push(Obstacle {
            shape: Shape::Circle {
                center: Position::new(0.0, ARENA_HALF_EXTENT * 0.6),
                radius: 1.0,
            },
            layers: CollisionLayers::SPAWN_BLOCKER,
        });
        arena
    }

    /// Load and validate a layout from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ArenaError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn from_json(json: &str) -> Result<Self, ArenaError> {
        let arena: Arena = serde_json::from_str(json)?;
        arena.validate()?;
        Ok(arena)
    }

    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.half_width <= 0.0 || self.half_height <= 0.0 {
            return Err(ArenaError::InvalidBounds {
                half_width: self.half_width,
                half_height: self.half_height,
            });
        }
        if let Some(index) = self.obstacles.iter().position(|o| !o.shape.is_valid()) {
            return Err(ArenaError::DegenerateObstacle { index });
        }
        let start = self.player_start.to_vec();
        if !self.contains(&self.player_start) || self.overlaps_circle(start, 0.0, CollisionLayers::WALL) {
            return Err(ArenaError::BlockedPlayerStart);
        }
        Ok(())
    }

    pub fn half_extent(&self) -> DVec2 {
        DVec2::new(self.half_width, self.half_height)
    }

    pub fn contains(&self, pos: &Position) -> bool {
        pos.x.abs() <= self.half_width && pos.y.abs() <= self.half_height
    }

    /// Nearest hit of a ray against obstacles on `mask` (and the boundary, if `mask` has WALL).
    pub fn raycast(&self, origin: DVec2, dir: DVec2, max_distance: f64, mask: CollisionLayers) -> Option<RayHit> {
        self.cast(origin, dir, max_distance, 0.0, mask)
    }

    /// Nearest hit of a circle of `radius` swept along `dir`.
    pub fn circle_cast(
        &self,
        origin: DVec2,
        radius: f64,
        dir: DVec2,
        max_distance: f64,
        mask: CollisionLayers,
    ) -> Option<RayHit> {
        self.cast(origin, dir, max_distance, radius, mask)
    }

    fn cast(&self, origin: DVec2, dir: DVec2, max_distance: f64, inflate: f64, mask: CollisionLayers) -> Option<RayHit> {
        let dir = dir.try_normalize()?;
        let mut best = if mask.contains(CollisionLayers::WALL) {
            let inner = self.half_extent() - DVec2::splat(inflate);
            ray_bounds_exit(origin, dir, max_distance, inner)
        } else {
            None
        };
        for obstacle in self.obstacles.iter().filter(|o| o.layers.intersects(mask)) {
            if let Some(hit) = obstacle.shape.raycast(origin, dir, max_distance, inflate) {
                if best.map_or(true, |b| hit.distance < b.distance) {
                    best = Some(hit);
                }
            }
        }
        best
    }

    /// Whether a circle overlaps any obstacle on `mask`.
    pub fn overlaps_circle(&self, center: DVec2, radius: f64, mask: CollisionLayers) -> bool {
        self.obstacles
            .iter()
            .filter(|o| o.layers.intersects(mask))
            .any(|o| o.shape.overlaps_circle(center, radius))
    }

    /// Push a circle out of obstacles on `mask` and keep it inside the boundary.
    pub fn resolve_circle(&self, center: DVec2, radius: f64, mask: CollisionLayers) -> DVec2 {
        let mut resolved = center;
        for obstacle in self.obstacles.iter().filter(|o| o.layers.intersects(mask)) {
            if let Some(push) = obstacle.shape.push_out(resolved, radius) {
                resolved += push;
            }
        }
        let limit = (self.half_extent() - DVec2::splat(radius)).max(DVec2::ZERO);
        resolved.clamp(-limit, limit)
    }
}
