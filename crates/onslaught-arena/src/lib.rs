//! Arena geometry for ONSLAUGHT.
//!
//! Static obstacle layout, collision layers, and the analytic
//! ray / circle-cast / overlap primitives the simulation's spatial
//! service is built on.

pub use onslaught_core as core;

pub mod error;
pub mod geometry;
pub mod layout;

// Re-export key types for convenience.
pub use error::ArenaError;
pub use geometry::{RayHit, Shape};
pub use layout::{Arena, Obstacle};
