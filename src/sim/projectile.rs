//! Projectile shooters and their projectiles
//!
//! A shooter fires on a fixed interval toward a fixed direction and owns
//! its live projectiles. Projectiles die on the first solid tile they touch
//! or on hitting the player.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::first_blocking_tile;
use super::event::{DeathCause, GameEvent};
use super::player::Player;
use super::rect::Rect;
use super::tile::TileGrid;
use crate::consts::PROJECTILE_HITBOX;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    /// Bottom-center of the sprite
    pub position: Vec2,
    pub velocity: Vec2,
    pub gravity_affected: bool,
}

impl Projectile {
    pub fn bounds(&self) -> Rect {
        PROJECTILE_HITBOX.bounds_at(self.position)
    }

    pub fn update(&mut self, tuning: &Tuning, dt: f32) {
        if self.gravity_affected {
            self.velocity.y += tuning.projectile_gravity * dt;
        }
        self.position += self.velocity * dt;
        self.position = Vec2::new(
            self.position.x.round_ties_even(),
            self.position.y.round_ties_even(),
        );
    }

    /// Overlapping any tile that is not passable
    fn hits_tile(&self, grid: &TileGrid) -> bool {
        first_blocking_tile(grid, &self.bounds()).is_some()
    }

    /// Left the level through the bottom, or through the top with nothing to bring it back
    fn out_of_level(&self, grid: &TileGrid) -> bool {
        let bounds = self.bounds();
        let (_, world_height) = grid.world_size();
        bounds.top() >= world_height || (!self.gravity_affected && bounds.bottom() <= 0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileShooter {
    pub position: Vec2,
    /// Drift of the shooter itself (units/s)
    pub velocity: Vec2,
    /// Unit firing direction
    pub target: Vec2,
    /// Speed per axis, multiplied component-wise by `target`
    pub launch_velocity: Vec2,
    /// Seconds between shots
    pub rate_of_fire: f32,
    /// Seconds until the next shot
    pub fire_time: f32,
    pub gravity_affected: bool,
    pub projectiles: Vec<Projectile>,
}

impl ProjectileShooter {
    pub fn new(
        position: Vec2,
        target: Vec2,
        launch_velocity: Vec2,
        rate_of_fire: f32,
        gravity_affected: bool,
    ) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            target: target.normalize_or_zero(),
            launch_velocity,
            rate_of_fire,
            fire_time: rate_of_fire,
            gravity_affected,
            projectiles: Vec::new(),
        }
    }

    /// Fire when due, move projectiles, then resolve hits against the
    /// player and the grid. `index` identifies this shooter in events.
    pub fn update(
        &mut self,
        index: usize,
        player: &mut Player,
        grid: &TileGrid,
        tuning: &Tuning,
        dt: f32,
        events: &mut Vec<GameEvent>,
    ) {
        self.position += self.velocity * dt;

        self.fire_time -= dt;
        if self.fire_time <= 0.0 {
            self.fire_time = self.rate_of_fire;
            self.projectiles.push(Projectile {
                position: self.position,
                velocity: self.launch_velocity * self.target,
                gravity_affected: self.gravity_affected,
            });
            log::debug!("Shooter {} fired ({} live)", index, self.projectiles.len());
            events.push(GameEvent::ProjectileFired { shooter: index });
        }

        let player_bounds = player.bounds();
        let mut hit_player = false;
        self.projectiles.retain_mut(|projectile| {
            projectile.update(tuning, dt);
            if projectile.bounds().intersects(&player_bounds) {
                hit_player = true;
                return false;
            }
            true
        });
        if hit_player {
            player.kill(DeathCause::Projectile, events);
        }

        self.projectiles
            .retain(|p| !p.hits_tile(grid) && !p.out_of_level(grid));
    }
}
