//! Collision layer and damage channel bitsets.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Collision categories used to filter overlap and cast queries.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct CollisionLayers: u32 {
        /// Solid arena geometry. Blocks movement and most projectiles.
        const WALL = 1 << 0;
        /// Geometry that only blocks projectile muzzle placement.
        const SPAWN_BLOCKER = 1 << 1;
        const PLAYER = 1 << 2;
        const ENEMY = 1 << 3;
        const PROJECTILE = 1 << 4;
        const PICKUP = 1 << 5;

        const ACTORS = Self::PLAYER.bits() | Self::ENEMY.bits();
        const SOLID = Self::WALL.bits() | Self::SPAWN_BLOCKER.bits();
    }
}

bitflags! {
    /// Routes through which damage can reach an actor.
    ///
    /// A single flag names the channel of one damage call; a set of flags
    /// describes which channels an actor accepts.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct DamageChannel: u8 {
        /// Direct projectile hit.
        const PROJECTILE = 1 << 0;
        /// Player blast pulse or missile detonation.
        const BLAST = 1 << 1;
        /// Enemy self-destruct explosion.
        const EXPLOSION = 1 << 2;
        /// Melee touch damage.
        const CONTACT = 1 << 3;
    }
}

impl Default for CollisionLayers {
    fn default() -> Self {
        Self::empty()
    }
}

impl Default for DamageChannel {
    fn default() -> Self {
        Self::all()
    }
}
