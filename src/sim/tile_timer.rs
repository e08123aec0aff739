//! Timed tile state machine
//!
//! Unstable tiles break a short while after being stood on and, when
//! rebuildable, come back later. Each timer tracks one cell independently.

use serde::{Deserialize, Serialize};

use super::event::GameEvent;
use super::tile::TileGrid;

/// Countdown for one unstable cell: Destroying, then optionally Rebuilding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileTimer {
    pub x: i32,
    pub y: i32,
    /// Seconds left in the current phase
    pub timer: f32,
    pub destroy_on: bool,
    pub rebuild_on: bool,
    pub destroy_seconds: f32,
    pub rebuild_seconds: f32,
}

impl TileTimer {
    pub fn new(x: i32, y: i32, destroy_seconds: f32, rebuild_seconds: f32) -> Self {
        Self {
            x,
            y,
            timer: destroy_seconds,
            destroy_on: true,
            rebuild_on: false,
            destroy_seconds,
            rebuild_seconds,
        }
    }

    /// Both phases over; the owner drops the timer
    pub fn is_finished(&self) -> bool {
        !self.destroy_on && !self.rebuild_on
    }

    /// Advance the countdown, mutating the tracked cell on phase expiry
    pub fn update(&mut self, grid: &mut TileGrid, dt: f32) -> Option<GameEvent> {
        if self.rebuild_on {
            self.timer -= dt;
            if self.timer <= 0.0 {
                grid.restore(self.x, self.y);
                self.rebuild_on = false;
                self.destroy_on = false;
                return Some(GameEvent::TileRebuilt { x: self.x, y: self.y });
            }
        } else if self.destroy_on {
            self.timer -= dt;
            if self.timer <= 0.0 {
                grid.mark_destroyed(self.x, self.y);
                self.timer = self.rebuild_seconds;
                self.rebuild_on = grid.get(self.x, self.y).is_some_and(|t| t.rebuildable);
                self.destroy_on = false;
                return Some(GameEvent::TileDestroyed { x: self.x, y: self.y });
            }
        }
        None
    }
}

/// Start a timer for a cell unless one is already tracking it.
///
/// Returns `true` when a new timer was registered.
pub fn register_timer(timers: &mut Vec<TileTimer>, timer: TileTimer) -> bool {
    if timers.iter().any(|t| t.x == timer.x && t.y == timer.y) {
        return false;
    }
    log::debug!("Unstable tile ({}, {}) starts breaking", timer.x, timer.y);
    timers.push(timer);
    true
}

/// Advance every timer in order and drop those that finished this tick
pub fn advance_timers(
    timers: &mut Vec<TileTimer>,
    grid: &mut TileGrid,
    dt: f32,
    events: &mut Vec<GameEvent>,
) {
    timers.retain_mut(|timer| {
        if let Some(event) = timer.update(grid, dt) {
            events.push(event);
        }
        !timer.is_finished()
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::tile::{Tile, TileCollision};

    fn cloud_grid(rebuildable: bool) -> TileGrid {
        TileGrid::filled(
            3,
            3,
            Tile::new(TileCollision::Unstable).with_rebuildable(rebuildable),
        )
    }

    fn run_until<F: Fn(&TileGrid, &[TileTimer]) -> bool>(
        grid: &mut TileGrid,
        timers: &mut Vec<TileTimer>,
        done: F,
    ) -> u32 {
        let mut events = Vec::new();
        for tick in 1..=600 {
            advance_timers(timers, grid, SIM_DT, &mut events);
            if done(grid, timers) {
                return tick;
            }
        }
        panic!("condition never reached");
    }

    #[test]
    fn test_rebuildable_tile_breaks_then_returns() {
        let mut grid = cloud_grid(true);
        let mut timers = Vec::new();
        assert!(register_timer(&mut timers, TileTimer::new(1, 1, 0.5, 1.0)));

        let broke = run_until(&mut grid, &mut timers, |g, _| {
            g.get(1, 1).is_some_and(|t| t.is_destroyed())
        });
        assert!((29..=31).contains(&broke), "broke at tick {broke}");
        assert_eq!(timers.len(), 1);

        let rebuilt = broke
            + run_until(&mut grid, &mut timers, |g, _| {
                g.get(1, 1).is_some_and(|t| !t.is_destroyed())
            });
        assert!((89..=92).contains(&rebuilt), "rebuilt at tick {rebuilt}");
        assert!(timers.is_empty());
        assert!(grid.get(1, 1).is_some_and(|t| t.visible));
    }

    #[test]
    fn test_non_rebuildable_tile_stays_broken() {
        let mut grid = cloud_grid(false);
        let mut timers = vec![TileTimer::new(2, 0, 0.5, 1.0)];

        run_until(&mut grid, &mut timers, |_, t| t.is_empty());
        assert!(grid.get(2, 0).is_some_and(|t| t.is_destroyed()));

        let mut events = Vec::new();
        for _ in 0..200 {
            advance_timers(&mut timers, &mut grid, SIM_DT, &mut events);
        }
        assert!(grid.get(2, 0).is_some_and(|t| t.is_destroyed()));
        assert!(events.is_empty());
    }

    #[test]
    fn test_duplicate_registration_is_ignored() {
        let mut timers = Vec::new();
        assert!(register_timer(&mut timers, TileTimer::new(1, 1, 0.5, 1.0)));
        timers[0].timer = 0.1;
        assert!(!register_timer(&mut timers, TileTimer::new(1, 1, 0.5, 1.0)));
        assert_eq!(timers.len(), 1);
        assert_eq!(timers[0].timer, 0.1);
    }

    #[test]
    fn test_timers_are_independent() {
        let mut grid = cloud_grid(true);
        let mut timers = vec![TileTimer::new(0, 0, 0.5, 1.0), TileTimer::new(2, 2, 0.1, 1.0)];
        let mut events = Vec::new();
        for _ in 0..10 {
            advance_timers(&mut timers, &mut grid, SIM_DT, &mut events);
        }
        assert!(grid.get(2, 2).is_some_and(|t| t.is_destroyed()));
        assert!(grid.get(0, 0).is_some_and(|t| !t.is_destroyed()));
        assert_eq!(events, vec![GameEvent::TileDestroyed { x: 2, y: 2 }]);
    }
}
