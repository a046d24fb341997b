//! Configuration errors.

use thiserror::Error;

/// Invalid or unreadable game configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("limited runs need at least one wave")]
    NoWaves,

    #[error("base enemies per wave must be positive")]
    EmptyWave,

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must be a probability in [0, 1], got {value}")]
    Probability { field: &'static str, value: f64 },

    #[error("keep-range slack {slack} must be smaller than desired range {desired}")]
    KeepRangeBand { desired: f64, slack: f64 },

    #[error("wander interval min {min} exceeds max {max}")]
    WanderInterval { min: f64, max: f64 },

    #[error("spawn point {index} has an empty roster")]
    EmptyRoster { index: usize },

    #[error("max health of {kind} must be positive")]
    ZeroHealth { kind: &'static str },
}
