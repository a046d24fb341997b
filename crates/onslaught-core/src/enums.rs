//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Behavior variant of a hostile actor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Closes to contact and deals touch damage.
    #[default]
    Melee,
    /// Charges the player and detonates.
    Explosive,
    /// Holds a standoff band and fires projectiles.
    Ranged,
}

/// Current movement policy of an enemy, as chosen by the steering engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SteeringMode {
    /// No target and wandering disabled.
    #[default]
    Idle,
    Wander,
    /// Direct pursuit of the target.
    Chase,
    /// Keep-range: outside the band, closing in.
    Approach,
    /// Keep-range: inside the band's inner edge, backing away.
    Retreat,
    /// Keep-range: within the band, holding and firing.
    Hold,
}

/// Lifecycle of an actor. `Dying` is a one-way latch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeState {
    #[default]
    Alive,
    Dying,
}

/// Top-level game phase, driven by the wave orchestrator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    PreStart,
    Running,
    Paused,
    Won,
    Lost,
}

impl GamePhase {
    /// Won and Lost can only be left through an explicit restart.
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

/// Run mode selected at game start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunMode {
    /// Fixed number of waves; clearing the last one wins.
    #[default]
    Limited,
    /// Waves continue until the player dies.
    Endless,
}

/// Side a projectile fights for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Faction {
    #[default]
    Friendly,
    Hostile,
}

/// How a projectile behaves once it reaches a valid target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PenetrationClass {
    /// Damages one target, then is destroyed.
    #[default]
    SingleTarget,
    /// Damages each distinct target at most once and keeps flying.
    Piercing,
    /// Detonates on first target contact and damages everything in radius.
    Area,
}

/// Pickup payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    #[default]
    Health,
    Resource,
}

/// Ordnance source, reported with fire events and snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Player primary gun (hold-trigger auto fire).
    #[default]
    Gun,
    Fireball,
    Missile,
    /// Player area blast pulse.
    Blast,
    /// Ranged enemy bullet.
    EnemyBolt,
}

/// What happens to kill credit for enemies spawned in an earlier wave.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KillOverflowPolicy {
    /// Only counts toward total kills.
    #[default]
    Discard,
    /// Counts toward the current wave as well.
    CarryOver,
}
