//! Static deadly obstacles
//!
//! A hazard fills exactly the tile it was placed in.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::event::{DeathCause, GameEvent};
use super::player::Player;
use super::rect::Rect;
use crate::consts::{TILE_HEIGHT, TILE_WIDTH};

/// Which sprite the draw collaborator picks for a hazard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardKind {
    Stalactite,
    Stalagmite,
    IcicleDown,
    IcicleUp,
    FireWall,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    /// Center of the tile the hazard occupies
    pub position: IVec2,
    pub kind: HazardKind,
    /// Cosmetic variant index
    pub variant: u8,
}

impl Hazard {
    pub fn new(position: IVec2, kind: HazardKind, variant: u8) -> Self {
        Self {
            position,
            kind,
            variant,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::centered_on(self.position, TILE_WIDTH, TILE_HEIGHT)
    }

    /// Kill the player on contact; returns `true` on a hit
    pub fn check_player(&self, player: &mut Player, events: &mut Vec<GameEvent>) -> bool {
        if self.bounds().intersects(&player.bounds()) {
            player.kill(DeathCause::Hazard, events);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tile::TileGrid;
    use glam::Vec2;

    #[test]
    fn test_hazard_covers_its_tile() {
        let center = TileGrid::bounds(3, 2).center();
        let hazard = Hazard::new(center, HazardKind::Stalagmite, 0);
        assert_eq!(hazard.bounds(), TileGrid::bounds(3, 2));
    }

    #[test]
    fn test_touching_hazard_kills_once() {
        let hazard = Hazard::new(TileGrid::bounds(1, 1).center(), HazardKind::FireWall, 0);
        let mut player = Player::new(TileGrid::bounds(1, 1).bottom_center());
        let mut events = Vec::new();

        assert!(hazard.check_player(&mut player, &mut events));
        assert!(hazard.check_player(&mut player, &mut events));
        assert!(!player.is_alive);
        assert_eq!(player.num_lives, 2);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_neighbouring_tile_is_safe() {
        let hazard = Hazard::new(TileGrid::bounds(1, 1).center(), HazardKind::Stalactite, 0);
        // Standing two tiles to the right
        let mut player = Player::new(Vec2::new(140.0, 64.0));
        assert!(!hazard.check_player(&mut player, &mut Vec::new()));
        assert!(player.is_alive);
    }
}
