//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (cosmetic tile variants)
//! - Stable iteration order (load order of entities)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod enemy;
pub mod event;
pub mod fragment;
pub mod geyser;
pub mod hazard;
pub mod level;
pub mod player;
pub mod projectile;
pub mod rect;
pub mod state;
pub mod tick;
pub mod tile;
pub mod tile_timer;

pub use camera::Camera;
pub use collision::{Axis, first_blocking_tile, intersection_depth, resolution_axis};
pub use enemy::{Enemy, EnemyKind, FaceDirection};
pub use event::{DeathCause, GameEvent};
pub use fragment::Fragment;
pub use geyser::{Geyser, GeyserKind};
pub use hazard::{Hazard, HazardKind};
pub use level::{LevelError, LevelParams, Theme};
pub use player::Player;
pub use projectile::{Projectile, ProjectileShooter};
pub use rect::{Circle, Hitbox, Rect};
pub use state::Level;
pub use tick::{TickInput, tick};
pub use tile::{Tile, TileCollision, TileGrid, TileSpan};
pub use tile_timer::{TileTimer, advance_timers, register_timer};
