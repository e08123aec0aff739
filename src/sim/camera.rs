//! Scrolling camera
//!
//! The camera follows the player once they leave a central dead zone and
//! never shows anything past the level edges.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Top-left corner of the view in world units
    pub position: Vec2,
}

impl Camera {
    /// Scroll so that `focus` stays inside the margins of the viewport
    pub fn scroll(&mut self, focus: Vec2, world_size: (i32, i32), tuning: &Tuning) {
        let view = Vec2::new(tuning.viewport_width, tuning.viewport_height);
        let margin = view * tuning.view_margin;
        let low = self.position + margin;
        let high = self.position + view - margin;

        let mut movement = Vec2::ZERO;
        if focus.x < low.x {
            movement.x = focus.x - low.x;
        } else if focus.x > high.x {
            movement.x = focus.x - high.x;
        }
        if focus.y < low.y {
            movement.y = focus.y - low.y;
        } else if focus.y > high.y {
            movement.y = focus.y - high.y;
        }

        // A level smaller than the view pins the camera at the origin
        let max = Vec2::new(world_size.0 as f32, world_size.1 as f32) - view;
        let target = self.position + movement;
        self.position = target.min(max).max(Vec2::ZERO);
    }

    /// Whether `point` lies in the square window of side `range` anchored
    /// at the camera's top-left corner
    pub fn in_active_window(&self, point: Vec2, range: f32) -> bool {
        let left = self.position.x.floor();
        let top = self.position.y.floor();
        (left..=left + range).contains(&point.x) && (top..=top + range).contains(&point.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_in_dead_zone_does_not_scroll() {
        let mut camera = Camera::default();
        camera.scroll(Vec2::new(400.0, 240.0), (4000, 960), &Tuning::default());
        assert_eq!(camera.position, Vec2::ZERO);
    }

    #[test]
    fn test_scrolls_right_past_margin() {
        let tuning = Tuning::default();
        let mut camera = Camera::default();
        // Right margin sits at 800 - 280 = 520
        camera.scroll(Vec2::new(600.0, 240.0), (4000, 960), &tuning);
        assert_eq!(camera.position, Vec2::new(80.0, 0.0));
    }

    #[test]
    fn test_clamped_to_level() {
        let tuning = Tuning::default();
        let mut camera = Camera::default();
        camera.scroll(Vec2::new(3990.0, 950.0), (4000, 960), &tuning);
        assert_eq!(camera.position, Vec2::new(3200.0, 480.0));

        camera.scroll(Vec2::new(-500.0, -500.0), (4000, 960), &tuning);
        assert_eq!(camera.position, Vec2::ZERO);
    }

    #[test]
    fn test_small_level_pins_to_origin() {
        let mut camera = Camera::default();
        camera.scroll(Vec2::new(700.0, 400.0), (200, 96), &Tuning::default());
        assert_eq!(camera.position, Vec2::ZERO);
    }

    #[test]
    fn test_active_window() {
        let camera = Camera {
            position: Vec2::new(100.5, 40.0),
        };
        assert!(camera.in_active_window(Vec2::new(100.0, 40.0), 800.0));
        assert!(camera.in_active_window(Vec2::new(900.0, 840.0), 800.0));
        assert!(!camera.in_active_window(Vec2::new(901.0, 100.0), 800.0));
        assert!(!camera.in_active_window(Vec2::new(500.0, 39.0), 800.0));
    }
}
