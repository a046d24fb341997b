//! Core types and definitions for the ONSLAUGHT combat simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, state snapshots, events, constants, and the
//! runtime-tunable game configuration. It has no dependency on the ECS
//! or any runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod layers;
pub mod state;
pub mod types;

pub use error::ConfigError;
