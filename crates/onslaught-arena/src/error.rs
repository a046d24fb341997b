//! Arena layout errors.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("failed to read arena layout: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse arena layout: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("arena bounds must be positive, got {half_width} x {half_height}")]
    InvalidBounds { half_width: f64, half_height: f64 },

    #[error("obstacle {index} has zero or negative extent")]
    DegenerateObstacle { index: usize },

    #[error("player start lies outside the arena or inside an obstacle")]
    BlockedPlayerStart,
}
