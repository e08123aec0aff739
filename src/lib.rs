//! Realm Racer - tile-based platformer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tile grid, collisions, player, level entities)
//! - `tuning`: Data-driven physics and gameplay constants

pub mod sim;
pub mod tuning;

pub use sim::{GameEvent, Level, LevelError, LevelParams, TickInput, tick};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    use crate::sim::rect::{Hitbox, Rect};

    /// Fixed simulation timestep (60 Hz, one call per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Tile cell size in world units
    pub const TILE_WIDTH: i32 = 40;
    pub const TILE_HEIGHT: i32 = 32;

    /// Maximum breath
    pub const MAX_BREATH: f32 = 100.0;

    /// Player: 64x64 frame at half scale, 80% of the frame is solid
    pub const PLAYER_HITBOX: Hitbox = Hitbox::new(32, 64, Rect::new(19, 39, 25, 25));
    /// Patrolling enemy: 64x64 frame, narrow body
    pub const ENEMY_HITBOX: Hitbox = Hitbox::new(32, 64, Rect::new(21, 20, 22, 44));
    /// Vortex: 32x64 frame
    pub const VORTEX_HITBOX: Hitbox = Hitbox::new(16, 64, Rect::new(3, 36, 25, 28));
    /// Geyser: 40x64 frame
    pub const GEYSER_HITBOX: Hitbox = Hitbox::new(20, 64, Rect::new(13, 36, 14, 28));
    /// Projectile: 32x32 frame
    pub const PROJECTILE_HITBOX: Hitbox = Hitbox::new(16, 32, Rect::new(10, 10, 11, 22));

    /// Fragment bounding circle radius
    pub const FRAGMENT_RADIUS: f32 = TILE_WIDTH as f32 / 3.0;
    /// Side of the completed-gem marker box centered on the exit
    pub const EXIT_GEM_SIZE: i32 = 32;
}
