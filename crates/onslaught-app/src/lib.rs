//! ONSLAUGHT headless runner.
//!
//! Wires the simulation to a paced game-loop thread and a scripted
//! autopilot that stands in for a human at the controls.

pub mod autopilot;
pub mod control;
pub mod game_loop;
pub mod runner;
pub mod settings;
pub mod state;

pub use onslaught_core as core;
