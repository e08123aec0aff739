//! Tile grid
//!
//! The grid shape is fixed at load time; cell contents are mutated only by
//! the tile timers (unstable tiles breaking and rebuilding).

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::{TILE_HEIGHT, TILE_WIDTH};

/// Collision behavior of a tile (governs response, not appearance)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileCollision {
    /// Does not hinder motion at all
    #[default]
    Passable,
    /// Completely solid
    Impassable,
    /// Solid from above only; can be jumped through and walked past
    Platform,
    /// Solid, but destructible by special moves
    Breakable,
    /// Water, quicksand: passed through, slows movement, drains breath
    Impeding,
    /// Low friction surface such as ice
    Slippery,
    /// Breaks shortly after being stood upon
    Unstable,
}

impl TileCollision {
    /// Blocks from every side
    #[inline]
    pub fn is_solid_wall(self) -> bool {
        matches!(self, TileCollision::Impassable | TileCollision::Breakable)
    }
}

/// One grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub collision: TileCollision,
    /// Unstable tiles come back after breaking
    pub rebuildable: bool,
    /// Whether collision sees the tile; cleared while a broken unstable tile is gone
    pub solid: bool,
    /// Whether the draw collaborator shows the tile
    pub visible: bool,
    /// Cosmetic variant index for the draw collaborator
    pub variant: u8,
}

impl Tile {
    pub fn new(collision: TileCollision) -> Self {
        Self {
            collision,
            rebuildable: true,
            solid: true,
            visible: true,
            variant: 0,
        }
    }

    pub fn with_variant(mut self, variant: u8) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_rebuildable(mut self, rebuildable: bool) -> Self {
        self.rebuildable = rebuildable;
        self
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        !self.solid
    }
}

impl Default for Tile {
    fn default() -> Self {
        Tile::new(TileCollision::Passable)
    }
}

/// Inclusive range of tile coordinates covered by a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSpan {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl TileSpan {
    /// Tiles touched by `bounds` (exclusive right/bottom edges)
    pub fn covering(bounds: &Rect) -> Self {
        Self {
            left: bounds.left().div_euclid(TILE_WIDTH),
            right: (bounds.right() as f32 / TILE_WIDTH as f32).ceil() as i32 - 1,
            top: bounds.top().div_euclid(TILE_HEIGHT),
            bottom: (bounds.bottom() as f32 / TILE_HEIGHT as f32).ceil() as i32 - 1,
        }
    }

    /// Row-major iteration order: rows top to bottom, columns left to right
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (self.top..=self.bottom).flat_map(move |y| (self.left..=self.right).map(move |x| (x, y)))
    }
}

/// Fixed-shape 2D array of tiles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileGrid {
    width: usize,
    height: usize,
    /// Row-major cells
    cells: Vec<Tile>,
}

impl TileGrid {
    /// Build a grid from row-major cells; `cells.len()` must equal `width * height`
    pub fn from_cells(width: usize, height: usize, cells: Vec<Tile>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self {
            width,
            height,
            cells,
        }
    }

    /// Grid filled with one tile
    pub fn filled(width: usize, height: usize, tile: Tile) -> Self {
        Self::from_cells(width, height, vec![tile; width * height])
    }

    /// Width in tiles
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in tiles
    pub fn height(&self) -> usize {
        self.height
    }

    /// Level extent in world units
    pub fn world_size(&self) -> (i32, i32) {
        (self.width as i32 * TILE_WIDTH, self.height as i32 * TILE_HEIGHT)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    /// Tile at a grid position, if inside the grid
    pub fn get(&self, x: i32, y: i32) -> Option<&Tile> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        self.index(x, y).map(move |i| &mut self.cells[i])
    }

    /// Collision class at a grid position.
    ///
    /// Left/right of the level is solid so nothing escapes sideways; above
    /// and below is open so things can jump past the top and fall off the
    /// bottom.
    pub fn classify(&self, x: i32, y: i32) -> TileCollision {
        if x < 0 || x as usize >= self.width {
            return TileCollision::Impassable;
        }
        if y < 0 || y as usize >= self.height {
            return TileCollision::Passable;
        }
        self.get(x, y).map_or(TileCollision::Passable, |t| t.collision)
    }

    /// World-space bounds of a grid cell
    pub fn bounds(x: i32, y: i32) -> Rect {
        Rect::new(x * TILE_WIDTH, y * TILE_HEIGHT, TILE_WIDTH, TILE_HEIGHT)
    }

    /// Break a tile: it stops blocking and disappears
    pub fn mark_destroyed(&mut self, x: i32, y: i32) {
        if let Some(tile) = self.get_mut(x, y) {
            tile.solid = false;
            tile.visible = false;
        }
    }

    /// Bring a broken tile back
    pub fn restore(&mut self, x: i32, y: i32) {
        if let Some(tile) = self.get_mut(x, y) {
            tile.solid = true;
            tile.visible = true;
        }
    }

    /// Visible tiles with their grid coordinates, for the draw collaborator
    pub fn visible_tiles(&self) -> impl Iterator<Item = (i32, i32, &Tile)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(i, tile)| {
            let drawn = tile.visible && tile.collision != TileCollision::Passable;
            drawn.then(|| ((i % self.width) as i32, (i / self.width) as i32, tile))
        })
    }
}
