//! Enemy steering for ONSLAUGHT.
//!
//! Implements the per-kind movement policies (wander, chase, keep-range)
//! and three-probe obstacle avoidance. No ECS dependency: the simulation
//! feeds plain data in and applies the returned update.

pub mod avoidance;
pub mod profiles;
pub mod steering;

pub use onslaught_core as core;

#[cfg(test)]
mod tests;
