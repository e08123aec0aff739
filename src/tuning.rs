//! Data-driven physics and gameplay constants
//!
//! Defaults reproduce the shipped feel of the game. A JSON file may override
//! any subset of fields; missing keys keep their defaults.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Tunable constants for the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Horizontal movement ===
    /// Horizontal acceleration per unit of input (units/s²)
    pub move_acceleration: f32,
    /// Multiplier on acceleration for normal running
    pub run_factor: f32,
    /// Extra multiplier on acceleration while charging
    pub charge_factor: f32,
    /// Horizontal speed cap
    pub max_move_speed: f32,
    /// Velocity multiplier per tick on the ground
    pub ground_drag: f32,
    /// Velocity multiplier per tick in the air
    pub air_drag: f32,
    /// Ground and air multiplier on slippery surfaces
    pub slippery_drag: f32,
    /// Ground and air multiplier inside impeding substances
    pub impeding_drag: f32,

    // === Vertical movement ===
    pub gravity: f32,
    /// Upward speed cap applied by gravity integration
    pub max_rise_speed: f32,
    pub max_fall_speed: f32,
    pub impeding_max_fall_speed: f32,
    /// Seconds of powered ascent
    pub max_jump_time: f32,
    /// Vertical velocity at the start of a jump (negative is up)
    pub jump_launch_velocity: f32,
    /// Exponent of the jump power curve
    pub jump_control_power: f32,

    // === Input ===
    /// Horizontal intent below this magnitude is zeroed
    pub movement_dead_zone: f32,
    /// Per-tick decay of latched intent while airborne
    pub airborne_intent_decay: f32,
    /// Seconds a charge dash lasts
    pub charge_duration: f32,

    // === Breath ===
    /// Breath change per tick (drain in impeding substances, regain elsewhere)
    pub breath_rate: f32,

    // === Unstable tiles ===
    pub unstable_destroy_seconds: f32,
    pub unstable_rebuild_seconds: f32,

    // === Entities ===
    pub enemy_move_speed: f32,
    pub enemy_max_wait: f32,
    pub vortex_min_distance: f32,
    pub vortex_max_distance: f32,
    pub fragment_speed: f32,
    pub fragment_points: u32,
    pub geyser_push: f32,
    pub geyser_breath_drain: f32,
    pub projectile_gravity: f32,

    // === Scoring ===
    pub points_from_time: u32,
    pub exit_bonus: u32,

    // === Camera ===
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub view_margin: f32,
    /// Side of the square window in which vortices are active
    pub vortex_active_range: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            move_acceleration: 13000.0,
            run_factor: 1.1,
            charge_factor: 2.0,
            max_move_speed: 1750.0,
            ground_drag: 0.48,
            air_drag: 0.58,
            slippery_drag: 0.58,
            impeding_drag: 0.25,

            gravity: 3400.0,
            max_rise_speed: 550.0,
            max_fall_speed: 550.0,
            impeding_max_fall_speed: 150.0,
            max_jump_time: 0.35,
            jump_launch_velocity: -3500.0,
            jump_control_power: 0.14,

            movement_dead_zone: 0.1,
            airborne_intent_decay: 0.01,
            charge_duration: 0.25,

            breath_rate: 0.05,

            unstable_destroy_seconds: 0.5,
            unstable_rebuild_seconds: 1.0,

            enemy_move_speed: 64.0,
            enemy_max_wait: 0.5,
            vortex_min_distance: 20.0,
            vortex_max_distance: 120.0,
            fragment_speed: 1000.0,
            fragment_points: 30,
            geyser_push: -5.0,
            geyser_breath_drain: 5.0,
            projectile_gravity: 3400.0,

            points_from_time: 10000,
            exit_bonus: 1500,

            viewport_width: 800.0,
            viewport_height: 480.0,
            view_margin: 0.35,
            vortex_active_range: 800.0,
        }
    }
}

/// Failure to read or parse a tuning file
#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(e) => write!(f, "could not read tuning file: {e}"),
            TuningError::Parse(e) => write!(f, "invalid tuning JSON: {e}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io(e) => Some(e),
            TuningError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        TuningError::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

impl Tuning {
    /// Parse tuning from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&text)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Load tuning, falling back to defaults when the file is missing or invalid
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("{e}; using default tuning");
                Self::default()
            }
        }
    }

    /// Drag multipliers and fall cap for the current substance
    pub fn substance_physics(&self, impeding: bool, slippery: bool) -> SubstancePhysics {
        if impeding {
            SubstancePhysics {
                ground_drag: self.impeding_drag,
                air_drag: self.impeding_drag,
                max_fall_speed: self.impeding_max_fall_speed,
            }
        } else if slippery {
            SubstancePhysics {
                ground_drag: self.slippery_drag,
                air_drag: self.slippery_drag,
                max_fall_speed: self.max_fall_speed,
            }
        } else {
            SubstancePhysics {
                ground_drag: self.ground_drag,
                air_drag: self.air_drag,
                max_fall_speed: self.max_fall_speed,
            }
        }
    }
}

/// Per-tick drag/fall constants selected from substance flags
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubstancePhysics {
    pub ground_drag: f32,
    pub air_drag: f32,
    pub max_fall_speed: f32,
}
