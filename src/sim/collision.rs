//! Collision detection against the tile grid
//!
//! Rectangles are separated along one axis at a time using the signed
//! intersection depth. Which axis wins is decided by the shallow-axis rule,
//! with platforms always treated as vertical contacts.

use glam::Vec2;

use super::rect::Rect;
use super::tile::{TileCollision, TileGrid, TileSpan};

/// Axis along which an overlap is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Signed minimum translation that separates `a` from `b` along each axis.
///
/// Zero on both axes when the rectangles do not overlap. The sign points
/// the direction `a` must move to get out of `b`.
pub fn intersection_depth(a: &Rect, b: &Rect) -> Vec2 {
    let half_a = Vec2::new(a.width as f32 / 2.0, a.height as f32 / 2.0);
    let half_b = Vec2::new(b.width as f32 / 2.0, b.height as f32 / 2.0);

    let center_a = Vec2::new(a.left() as f32, a.top() as f32) + half_a;
    let center_b = Vec2::new(b.left() as f32, b.top() as f32) + half_b;

    let distance = center_a - center_b;
    let min_distance = half_a + half_b;

    if distance.x.abs() >= min_distance.x || distance.y.abs() >= min_distance.y {
        return Vec2::ZERO;
    }

    let depth_x = if distance.x > 0.0 {
        min_distance.x - distance.x
    } else {
        -min_distance.x - distance.x
    };
    let depth_y = if distance.y > 0.0 {
        min_distance.y - distance.y
    } else {
        -min_distance.y - distance.y
    };
    Vec2::new(depth_x, depth_y)
}

/// Pick the resolution axis for an overlap.
///
/// The shallower axis wins; platforms are always resolved vertically so
/// they never block sideways movement.
pub fn resolution_axis(depth: Vec2, collision: TileCollision) -> Axis {
    if depth.y.abs() < depth.x.abs() || collision == TileCollision::Platform {
        Axis::Y
    } else {
        Axis::X
    }
}

/// First non-passable tile overlapped by `bounds`, scanning rows then columns
pub fn first_blocking_tile(grid: &TileGrid, bounds: &Rect) -> Option<(i32, i32)> {
    TileSpan::covering(bounds)
        .cells()
        .find(|&(x, y)| grid.classify(x, y) != TileCollision::Passable)
}
