//! Patrolling enemies and vortices
//!
//! A patrolling enemy walks back and forth along a floor, pausing at walls
//! and ledges. A vortex never moves; it drags the player toward itself when
//! the player is close and nothing solid is in the way.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::player::Player;
use super::rect::Rect;
use super::tile::{TileCollision, TileGrid};
use crate::consts::{ENEMY_HITBOX, TILE_HEIGHT, TILE_WIDTH, VORTEX_HITBOX};
use crate::tuning::Tuning;

/// Facing direction of a patrolling enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaceDirection {
    Left,
    Right,
}

impl FaceDirection {
    /// -1 for left, 1 for right
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            FaceDirection::Left => -1,
            FaceDirection::Right => 1,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            FaceDirection::Left => FaceDirection::Right,
            FaceDirection::Right => FaceDirection::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Patrol,
    Vortex,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    /// Bottom-center of the sprite
    pub position: Vec2,
    pub direction: FaceDirection,
    /// Seconds left before turning around; zero while walking
    pub wait_time: f32,
    pub kind: EnemyKind,
}

impl Enemy {
    pub fn patrol(position: Vec2) -> Self {
        Self {
            position,
            direction: FaceDirection::Left,
            wait_time: 0.0,
            kind: EnemyKind::Patrol,
        }
    }

    pub fn vortex(position: Vec2) -> Self {
        Self {
            kind: EnemyKind::Vortex,
            ..Self::patrol(position)
        }
    }

    #[inline]
    pub fn is_vortex(&self) -> bool {
        self.kind == EnemyKind::Vortex
    }

    pub fn bounds(&self) -> Rect {
        match self.kind {
            EnemyKind::Patrol => ENEMY_HITBOX.bounds_at(self.position),
            EnemyKind::Vortex => VORTEX_HITBOX.bounds_at(self.position),
        }
    }

    /// Walk one tick, or count down the pause before turning around
    pub fn update(&mut self, grid: &TileGrid, tuning: &Tuning, dt: f32) {
        if self.is_vortex() {
            return;
        }

        if self.wait_time > 0.0 {
            self.wait_time = (self.wait_time - dt).max(0.0);
            if self.wait_time <= 0.0 {
                self.direction = self.direction.reversed();
            }
            return;
        }

        let dir = self.direction.sign();
        // Column under the leading edge of the body
        let half_width = (ENEMY_HITBOX.local.width / 2 * dir) as f32;
        let lead_x = self.position.x + half_width;
        let tile_x = (lead_x / TILE_WIDTH as f32).floor() as i32 - dir;
        let tile_y = (self.position.y / TILE_HEIGHT as f32).floor() as i32;
        let ahead = tile_x + dir;

        let blocked = grid.classify(ahead, tile_y - 1).is_solid_wall()
            || grid.classify(ahead, tile_y - 2).is_solid_wall()
            || grid.classify(ahead, tile_y) == TileCollision::Passable;

        if blocked {
            self.wait_time = tuning.enemy_max_wait;
        } else {
            self.position.x += dir as f32 * tuning.enemy_move_speed * dt;
        }
    }

    /// Drag the player toward a vortex.
    ///
    /// The pull is the player's displacement scaled by the distance, so it
    /// grows as the player gets further away inside the active band.
    /// Returns `true` if a force was applied.
    pub fn pull(&self, player: &mut Player, grid: &TileGrid, tuning: &Tuning) -> bool {
        if !self.is_vortex() {
            return false;
        }

        let delta = player.position - self.position;
        let distance = delta.length();
        if distance <= tuning.vortex_min_distance || distance > tuning.vortex_max_distance {
            return false;
        }
        if self.path_blocked(player.position, grid) {
            return false;
        }

        player.velocity -= delta * distance;
        true
    }

    /// Short line-of-sight probe between the vortex and the player.
    ///
    /// Above the vortex: the three tiles from the player's feet downward.
    /// Same row: the three tiles above the player's row, stepping toward
    /// the vortex. Below: never blocked.
    fn path_blocked(&self, target: Vec2, grid: &TileGrid) -> bool {
        let to_tile = |p: Vec2| {
            (
                (p.x / TILE_WIDTH as f32).floor() as i32,
                (p.y / TILE_HEIGHT as f32).floor() as i32,
            )
        };
        let (xp, yp) = to_tile(target);
        let (xv, yv) = to_tile(self.position);

        if xp == xv && yp == yv {
            return false;
        }

        let solid = |x: i32, y: i32| {
            grid.get(x, y)
                .is_some_and(|t| t.collision.is_solid_wall())
        };

        (0..3).any(|i| {
            if yp < yv {
                solid(xp, yp + i)
            } else if yp == yv {
                if xp < xv {
                    solid(xp + i, yp - 1)
                } else if xp > xv {
                    solid(xp - i, yp - 1)
                } else {
                    false
                }
            } else {
                false
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::tile::Tile;

    fn grid_from(rows: &[&str]) -> TileGrid {
        let width = rows[0].len();
        let cells = rows
            .iter()
            .flat_map(|row| row.chars())
            .map(|c| match c {
                '#' => Tile::new(TileCollision::Impassable),
                '%' => Tile::new(TileCollision::Breakable),
                _ => Tile::default(),
            })
            .collect();
        TileGrid::from_cells(width, rows.len(), cells)
    }

    fn run_until_turned(enemy: &mut Enemy, grid: &TileGrid) -> u32 {
        let tuning = Tuning::default();
        for tick in 1..=600 {
            enemy.update(grid, &tuning, SIM_DT);
            if enemy.direction == FaceDirection::Right {
                return tick;
            }
        }
        panic!("enemy never turned around");
    }

    #[test]
    fn test_enemy_waits_then_turns_at_wall() {
        let grid = grid_from(&["......", "#....#", "######"]);
        let mut enemy = Enemy::patrol(Vec2::new(100.0, 64.0));

        let ticks = run_until_turned(&mut enemy, &grid);
        // Stops once its leading edge reaches the wall column, then waits
        assert!(enemy.position.x > 50.0 && enemy.position.x < 51.0, "x = {}", enemy.position.x);
        assert!(ticks > 46 + 25, "turned too early at tick {ticks}");
        assert_eq!(enemy.wait_time, 0.0);
    }

    #[test]
    fn test_enemy_turns_at_breakable_wall() {
        let grid = grid_from(&["......", "%.....", "######"]);
        let mut enemy = Enemy::patrol(Vec2::new(100.0, 64.0));

        run_until_turned(&mut enemy, &grid);
        assert!(enemy.position.x > 50.0 && enemy.position.x < 51.0, "x = {}", enemy.position.x);
    }

    #[test]
    fn test_enemy_turns_at_ledge() {
        let grid = grid_from(&[".....", ".....", ".###."]);
        let mut enemy = Enemy::patrol(Vec2::new(100.0, 64.0));

        run_until_turned(&mut enemy, &grid);
        assert!(enemy.position.x > 50.0 && enemy.position.x < 51.0);

        // Walks right again after turning
        let tuning = Tuning::default();
        let x = enemy.position.x;
        for _ in 0..10 {
            enemy.update(&grid, &tuning, SIM_DT);
        }
        assert!(enemy.position.x > x);
    }

    #[test]
    fn test_vortex_never_moves() {
        let grid = grid_from(&[".....", ".....", "#####"]);
        let tuning = Tuning::default();
        let mut vortex = Enemy::vortex(Vec2::new(100.0, 64.0));
        for _ in 0..120 {
            vortex.update(&grid, &tuning, SIM_DT);
        }
        assert_eq!(vortex.position, Vec2::new(100.0, 64.0));
    }

    #[test]
    fn test_vortex_pull_in_band() {
        let grid = grid_from(&["......", "......", "######"]);
        let tuning = Tuning::default();
        let vortex = Enemy::vortex(Vec2::new(100.0, 64.0));

        let mut player = Player::new(Vec2::new(160.0, 64.0));
        assert!(vortex.pull(&mut player, &grid, &tuning));
        assert_eq!(player.velocity, Vec2::new(-3600.0, 0.0));

        // Too close
        let mut player = Player::new(Vec2::new(110.0, 64.0));
        assert!(!vortex.pull(&mut player, &grid, &tuning));
        assert_eq!(player.velocity, Vec2::ZERO);

        // Too far
        let mut player = Player::new(Vec2::new(230.0, 64.0));
        assert!(!vortex.pull(&mut player, &grid, &tuning));
    }

    #[test]
    fn test_vortex_band_excludes_inner_edge() {
        let grid = grid_from(&["......", "......", "######"]);
        let tuning = Tuning::default();
        let vortex = Enemy::vortex(Vec2::new(100.0, 64.0));

        let mut player = Player::new(Vec2::new(120.0, 64.0));
        assert!(!vortex.pull(&mut player, &grid, &tuning));
        assert_eq!(player.velocity, Vec2::ZERO);

        let mut player = Player::new(Vec2::new(121.0, 64.0));
        assert!(vortex.pull(&mut player, &grid, &tuning));
        assert_eq!(player.velocity, Vec2::new(-21.0 * 21.0, 0.0));

        // Outer edge is inside the band
        let mut player = Player::new(Vec2::new(220.0, 64.0));
        assert!(vortex.pull(&mut player, &grid, &tuning));
    }

    #[test]
    fn test_vortex_pull_blocked_by_wall() {
        let grid = grid_from(&["......", "...#..", "######"]);
        let tuning = Tuning::default();
        let vortex = Enemy::vortex(Vec2::new(100.0, 64.0));

        // Same row; the probe walks the row above the player's feet toward the vortex
        let mut player = Player::new(Vec2::new(180.0, 64.0));
        assert!(!vortex.pull(&mut player, &grid, &tuning));
        assert_eq!(player.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_patrol_enemy_does_not_pull() {
        let grid = grid_from(&["......", "......", "######"]);
        let enemy = Enemy::patrol(Vec2::new(100.0, 64.0));
        let mut player = Player::new(Vec2::new(160.0, 64.0));
        assert!(!enemy.pull(&mut player, &grid, &Tuning::default()));
    }
}
