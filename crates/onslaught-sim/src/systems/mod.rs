//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over a `CombatContext` (or the bare world for
//! read-only passes). They do not own state; all state lives in components
//! and the wave orchestrator.

pub mod behavior;
pub mod cleanup;
pub mod collision;
pub mod contact;
pub mod damage;
pub mod death;
pub mod movement;
pub mod player;
pub mod progression;
pub mod projectiles;
pub mod snapshot;
pub mod spawner;
