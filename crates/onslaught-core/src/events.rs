//! Events emitted by the simulation for presentation and audio feedback.
//!
//! Events are the only channel from the core to the outside world; they
//! are drained into each snapshot.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{ActorId, Position};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    // --- Actor ledger ---
    /// Health changed (only raised when the value actually changed).
    HealthChanged {
        actor: ActorId,
        current: u32,
        max: u32,
    },
    /// Resource changed (only raised when the value actually changed).
    ResourceChanged {
        actor: ActorId,
        current: u32,
        max: u32,
    },
    XpChanged { xp: u32, xp_to_next: u32 },
    LevelUp { level: u32 },

    // --- Combat ---
    WeaponFired {
        weapon: WeaponKind,
        owner: ActorId,
        position: Position,
    },
    Explosion {
        source: ActorId,
        position: Position,
        radius: f64,
    },
    /// Enemy entered the dying state.
    Death { actor: ActorId, kind: EnemyKind },
    /// Kill credited to the player.
    Kill {
        actor: ActorId,
        kind: EnemyKind,
        xp: u32,
    },
    PickupSpawned {
        kind: PickupKind,
        amount: u32,
        position: Position,
    },
    PickupCollected { kind: PickupKind, amount: u32 },

    // --- Waves ---
    WaveStarted { wave: u32, required: u32 },
    WaveCompleted { wave: u32 },
    GameWon { total_kills: u32 },
    GameLost { total_kills: u32, wave_reached: u32 },
}
