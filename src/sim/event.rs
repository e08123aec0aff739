//! Events emitted during a simulation tick.
//! The presentation layer consumes these for animation and sound.

use serde::{Deserialize, Serialize};

/// What killed the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Fell off the bottom of the level
    Fell,
    /// Ran out of breath in an impeding substance
    Drowned,
    Enemy,
    Hazard,
    Geyser,
    Projectile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayerKilled { cause: DeathCause },
    FragmentCollected { index: usize },
    /// A collected fragment reached the exit gem and left the level
    FragmentArrived,
    TileDestroyed { x: i32, y: i32 },
    TileRebuilt { x: i32, y: i32 },
    ProjectileFired { shooter: usize },
    ExitReached,
    LevelCompleted { score: u32 },
}
