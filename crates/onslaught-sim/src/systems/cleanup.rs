//! Cleanup system: removes stray projectiles and everything scheduled for removal.

use hecs::{Entity, World};

use onslaught_core::components::Projectile;
use onslaught_core::types::Position;

use crate::spatial::SpatialQuery;

/// Despawn projectiles that left the arena, then drain the despawn buffer.
pub fn run(world: &mut World, spatial: &dyn SpatialQuery, despawn_buffer: &mut Vec<Entity>) {
    for (entity, (pos, _projectile)) in world.query_mut::<(&Position, &Projectile)>() {
        if !spatial.in_bounds(pos) {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
