//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Movement and aim ---
    /// Set movement input. Each axis is clamped to [-1, 1].
    Move { x: f64, y: f64 },
    /// Set aim direction. Zero aims along the facing direction.
    Aim { x: f64, y: f64 },
    SetSprint { active: bool },

    // --- Weapons ---
    /// Hold or release the primary gun trigger.
    SetTrigger { held: bool },
    CastFireball,
    LaunchMissile,
    CastBlast,

    // --- Game control ---
    StartGame { mode: RunMode },
    Pause,
    Resume,
    /// Discard the current run and return to pre-start.
    Restart,
}
