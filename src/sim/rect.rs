//! Integer rectangles and bounding shapes
//!
//! World-space bounds are integer rectangles with exclusive right/bottom
//! edges, so adjacent tiles share an edge without overlapping.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Axis-aligned integer rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Integer center (truncating half extents)
    pub fn center(&self) -> IVec2 {
        IVec2::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Midpoint of the bottom edge, where standing entities are anchored
    pub fn bottom_center(&self) -> Vec2 {
        Vec2::new(self.x as f32 + self.width as f32 / 2.0, self.bottom() as f32)
    }

    /// Strict overlap test (touching edges do not intersect)
    pub fn intersects(&self, other: &Rect) -> bool {
        other.left() < self.right()
            && self.left() < other.right()
            && other.top() < self.bottom()
            && self.top() < other.bottom()
    }

    /// Point containment, inclusive of left/top and exclusive of right/bottom
    pub fn contains(&self, point: IVec2) -> bool {
        self.left() <= point.x
            && point.x < self.right()
            && self.top() <= point.y
            && point.y < self.bottom()
    }

    /// Rectangle of the given size centered on a point
    pub fn centered_on(center: IVec2, width: i32, height: i32) -> Self {
        Self::new(center.x - width / 2, center.y - height / 2, width, height)
    }
}

/// Bounding circle (used for collectibles)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Circle/rectangle overlap via the closest point on the rectangle
    pub fn intersects(&self, rect: &Rect) -> bool {
        let closest = Vec2::new(
            self.center.x.clamp(rect.left() as f32, rect.right() as f32),
            self.center.y.clamp(rect.top() as f32, rect.bottom() as f32),
        );
        self.center.distance_squared(closest) < self.radius * self.radius
    }
}

/// Solid region of a sprite frame, anchored at the frame origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hitbox {
    /// Frame origin relative to the frame's top-left corner
    pub origin_x: i32,
    pub origin_y: i32,
    /// Solid area relative to the frame's top-left corner
    pub local: Rect,
}

impl Hitbox {
    pub const fn new(origin_x: i32, origin_y: i32, local: Rect) -> Self {
        Self {
            origin_x,
            origin_y,
            local,
        }
    }

    /// World-space bounds for an entity whose origin sits at `position`
    pub fn bounds_at(&self, position: Vec2) -> Rect {
        let left = (position.x - self.origin_x as f32).round_ties_even() as i32 + self.local.x;
        let top = (position.y - self.origin_y as f32).round_ties_even() as i32 + self.local.y;
        Rect::new(left, top, self.local.width, self.local.height)
    }
}
