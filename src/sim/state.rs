//! Level state
//!
//! Everything one attempt at a level needs lives in [`Level`]: the tile grid,
//! the player and every entity. The tick pipeline mutates it in place.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::enemy::Enemy;
use super::fragment::Fragment;
use super::geyser::Geyser;
use super::hazard::Hazard;
use super::level::Theme;
use super::player::Player;
use super::projectile::{Projectile, ProjectileShooter};
use super::rect::Rect;
use super::tile::TileGrid;
use super::tile_timer::TileTimer;
use crate::consts::EXIT_GEM_SIZE;
use crate::tuning::Tuning;

/// One loaded level and its running simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    /// Position of this level in the level sequence
    pub index: usize,
    pub theme: Theme,
    pub grid: TileGrid,
    pub player: Player,
    /// Where the player spawns (bottom-center of the start tile)
    pub start: Vec2,
    /// Center of the exit tile
    pub exit: IVec2,

    pub fragments: Vec<Fragment>,
    /// Fragments the level was loaded with
    pub num_gems: usize,
    /// Fragments still to collect before the exit opens
    pub gems_remaining: usize,
    pub enemies: Vec<Enemy>,
    pub hazards: Vec<Hazard>,
    pub geysers: Vec<Geyser>,
    pub shooters: Vec<ProjectileShooter>,
    /// Active unstable-tile timers
    pub timers: Vec<TileTimer>,

    pub camera: Camera,
    /// Running score, carried in from earlier levels
    pub score: u32,
    /// Seconds of live play
    pub time: f32,
    pub reached_exit: bool,
    pub complete: bool,
    pub paused: bool,
    /// Set by [`Level::dispose`]; a disposed level ignores ticks
    pub disposed: bool,

    pub tuning: Tuning,
}

impl Level {
    /// Bring the player back to the start after a death
    pub fn start_new_life(&mut self) {
        self.player.reset(self.start);
        log::info!(
            "Level {}: new life (lives counter {})",
            self.index,
            self.player.num_lives
        );
    }

    /// Release level-scoped state; later ticks do nothing
    pub fn dispose(&mut self) {
        self.fragments.clear();
        self.enemies.clear();
        self.hazards.clear();
        self.geysers.clear();
        self.shooters.clear();
        self.timers.clear();
        self.disposed = true;
        log::debug!("Level {} disposed", self.index);
    }

    /// Box of the gem marker collected fragments fly into
    pub fn exit_gem_bounds(&self) -> Rect {
        Rect::centered_on(self.exit, EXIT_GEM_SIZE, EXIT_GEM_SIZE)
    }

    /// Whole seconds of play, as used by the time bonus
    pub fn elapsed_seconds(&self) -> u32 {
        self.time as u32
    }

    /// Points awarded on completion: faster runs and fewer deaths score more
    pub fn completion_bonus(&self) -> u32 {
        let seconds = self.elapsed_seconds().max(1);
        self.tuning.points_from_time / seconds + self.tuning.exit_bonus / self.player.num_lives.max(1)
    }

    pub fn is_player_alive(&self) -> bool {
        self.player.is_alive
    }

    /// Live projectiles across every shooter
    pub fn projectiles(&self) -> impl Iterator<Item = &Projectile> + '_ {
        self.shooters.iter().flat_map(|s| s.projectiles.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::event::DeathCause;
    use crate::sim::level::LevelParams;

    const SMALL: &str = "\
.....
.1FX.
#####";

    fn load(text: &str) -> Level {
        Level::load(text, LevelParams::default(), Tuning::default()).unwrap()
    }

    #[test]
    fn test_completion_bonus_uses_whole_seconds() {
        let mut level = load(SMALL);
        level.time = 0.4;
        assert_eq!(level.completion_bonus(), 10000 + 1500);

        level.time = 9.9;
        level.player.num_lives = 3;
        assert_eq!(level.completion_bonus(), 10000 / 9 + 1500 / 3);
    }

    #[test]
    fn test_start_new_life_resets_player() {
        let mut level = load(SMALL);
        level.player.position = Vec2::new(500.0, 500.0);
        level.player.kill(DeathCause::Fell, &mut Vec::new());

        level.start_new_life();
        assert!(level.player.is_alive);
        assert_eq!(level.player.position, level.start);
        assert_eq!(level.player.num_lives, 2);
    }

    #[test]
    fn test_dispose_clears_entities() {
        let mut level = load(SMALL);
        assert_eq!(level.fragments.len(), 1);
        level.dispose();
        assert!(level.disposed);
        assert!(level.fragments.is_empty());
    }

    #[test]
    fn test_exit_gem_centered_on_exit() {
        let level = load(SMALL);
        assert_eq!(level.exit, IVec2::new(140, 48));
        assert_eq!(level.exit_gem_bounds(), Rect::new(124, 32, 32, 32));
    }

    #[test]
    fn test_projectiles_span_every_shooter() {
        let mut level = load("P...p\n.1.X.\n#####");
        assert_eq!(level.shooters.len(), 2);
        assert_eq!(level.projectiles().count(), 0);

        for shooter in &mut level.shooters {
            shooter.projectiles.push(Projectile {
                position: shooter.position,
                velocity: Vec2::ZERO,
                gravity_affected: false,
            });
        }
        assert_eq!(level.projectiles().count(), 2);
        assert!(level.is_player_alive());
    }
}
