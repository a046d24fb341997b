//! Kinematic integration system.
//!
//! Moves everything with a velocity through the spatial service, which
//! keeps actor bodies out of walls and inside the arena.

use hecs::Entity;

use onslaught_core::types::{Position, Velocity};

use crate::context::CombatContext;

pub fn run(ctx: &mut CombatContext) {
    let movers: Vec<Entity> = {
        let mut query = ctx.world.query::<(&Position, &Velocity)>();
        query.iter().map(|(entity, _)| entity).collect()
    };
    for entity in movers {
        ctx.spatial.move_actor(ctx.world, entity, ctx.dt);
    }
}
