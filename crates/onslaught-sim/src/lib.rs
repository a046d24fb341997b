//! Simulation engine for ONSLAUGHT.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate, and produces
//! GameStateSnapshots for whatever drives it.

pub mod context;
pub mod engine;
pub mod orchestrator;
pub mod spatial;
pub mod systems;
pub mod world_setup;

pub use onslaught_core as core;
pub use engine::{SimConfig, SimulationEngine};

#[cfg(test)]
mod tests;
