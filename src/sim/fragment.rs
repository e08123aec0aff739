//! Collectible fragments
//!
//! A collected fragment flies toward the exit gem at constant speed and is
//! removed from the level when it gets there.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::rect::{Circle, Rect};
use crate::consts::FRAGMENT_RADIUS;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fragment {
    /// Stable identifier, the load order of the fragment
    pub id: usize,
    pub position: Vec2,
    pub velocity: Vec2,
    pub collected: bool,
}

impl Fragment {
    pub fn new(id: usize, position: Vec2) -> Self {
        Self {
            id,
            position,
            velocity: Vec2::ZERO,
            collected: false,
        }
    }

    pub fn bounding_circle(&self) -> Circle {
        Circle::new(self.position, FRAGMENT_RADIUS)
    }

    pub fn update(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }

    /// Mark collected and launch toward `exit`.
    ///
    /// Returns `false` if it had already been collected.
    pub fn collect(&mut self, exit: IVec2, speed: f32) -> bool {
        if self.collected {
            return false;
        }
        self.collected = true;
        self.velocity = (exit.as_vec2() - self.position).normalize_or_zero() * speed;
        true
    }

    /// A collected fragment touching the exit gem is done
    pub fn has_arrived(&self, exit_gem: &Rect) -> bool {
        self.collected && self.bounding_circle().intersects(exit_gem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{EXIT_GEM_SIZE, SIM_DT};

    #[test]
    fn test_collect_once() {
        let mut fragment = Fragment::new(0, Vec2::new(20.0, 16.0));
        assert!(fragment.collect(IVec2::new(220, 16), 1000.0));
        assert_eq!(fragment.velocity, Vec2::new(1000.0, 0.0));

        fragment.velocity = Vec2::ZERO;
        assert!(!fragment.collect(IVec2::new(220, 16), 1000.0));
        assert_eq!(fragment.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_collected_fragment_reaches_exit_gem() {
        let exit = IVec2::new(300, 48);
        let gem = Rect::centered_on(exit, EXIT_GEM_SIZE, EXIT_GEM_SIZE);
        let mut fragment = Fragment::new(0, Vec2::new(20.0, 48.0));
        assert!(!fragment.has_arrived(&gem));

        fragment.collect(exit, 1000.0);
        let mut ticks = 0;
        while !fragment.has_arrived(&gem) {
            fragment.update(SIM_DT);
            ticks += 1;
            assert!(ticks < 60, "fragment never arrived");
        }
        // 280 units at 1000/s, less the gem half-width and the fragment radius
        assert!((13..=17).contains(&ticks), "arrived after {ticks} ticks");
    }

    #[test]
    fn test_uncollected_fragment_at_exit_stays() {
        let exit = IVec2::new(60, 48);
        let gem = Rect::centered_on(exit, EXIT_GEM_SIZE, EXIT_GEM_SIZE);
        let fragment = Fragment::new(0, exit.as_vec2());
        assert!(!fragment.has_arrived(&gem));
    }

    #[test]
    fn test_fragment_on_exit_collects_without_nan() {
        let mut fragment = Fragment::new(0, Vec2::new(60.0, 48.0));
        assert!(fragment.collect(IVec2::new(60, 48), 1000.0));
        assert_eq!(fragment.velocity, Vec2::ZERO);
    }
}
