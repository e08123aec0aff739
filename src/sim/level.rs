//! Level loader
//!
//! ## Format
//!   Rows of equal-length lines, one character per tile. Exactly one start
//!   and one exit are required.
//!
//! ## Tile legend:
//!   '.' = Empty                   '#' = Block
//!   '1' = Player start            'X' = Exit
//!   '-' = Platform                '%' = Breakable block
//!   'U' = Water                   'Q' = Quicksand
//!   'C' = Cloud (unstable)        'S' = Ice
//!   'F' = Fragment                'f'/'g' = Fragment in quicksand/water
//!   'E' = Patrolling enemy        'T' = Vortex
//!   'V'/'^' = Stalactite/stalagmite, 'v'/'6' in quicksand
//!   'I'/'i' = Icicle down/up,       'O'/'o' underwater
//!   'W' = Fire wall
//!   'G' = Water geyser            'R' = Fire geyser
//!   'J' = Wind jet
//!   'P'/'p'/'B'/'b' = Fireball shooter aimed left/right/up/down

use std::fmt;

use glam::{IVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::enemy::Enemy;
use super::fragment::Fragment;
use super::geyser::{Geyser, GeyserKind};
use super::hazard::{Hazard, HazardKind};
use super::player::Player;
use super::projectile::ProjectileShooter;
use super::state::Level;
use super::tile::{Tile, TileCollision, TileGrid};
use crate::tuning::Tuning;

/// Seed offset for the per-level cosmetic RNG
const LEVEL_SEED_OFFSET: u64 = 3_485_992;

/// Fireball shooters: launch speed per axis and seconds between shots
const FIREBALL_SPEED: f32 = 500.0;
const FIREBALL_RATE: f32 = 5.0;

/// Visual theme, chosen by how far through the level sequence we are
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    Earth,
    Wind,
    Water,
    Fire,
}

impl Theme {
    /// Quartile of `(index + 1) / num_levels`
    pub fn for_level(index: usize, num_levels: usize) -> Self {
        let progress = (index + 1) as f32 / num_levels.max(1) as f32;
        if progress <= 0.25 {
            Theme::Earth
        } else if progress <= 0.5 {
            Theme::Wind
        } else if progress <= 0.75 {
            Theme::Water
        } else {
            Theme::Fire
        }
    }
}

/// Where a level sits in the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelParams {
    pub index: usize,
    pub num_levels: usize,
    /// Score carried in from earlier levels
    pub score: u32,
}

impl Default for LevelParams {
    fn default() -> Self {
        Self {
            index: 0,
            num_levels: 1,
            score: 0,
        }
    }
}

/// Reasons a level file is rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelError {
    Empty,
    /// 1-based line number whose length differs from the first line
    RaggedLine {
        line: usize,
        expected: usize,
        found: usize,
    },
    UnknownTile {
        ch: char,
        x: usize,
        y: usize,
    },
    MissingStart,
    MissingExit,
    DuplicateStart {
        x: usize,
        y: usize,
    },
    DuplicateExit {
        x: usize,
        y: usize,
    },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::Empty => write!(f, "level has no tiles"),
            LevelError::RaggedLine {
                line,
                expected,
                found,
            } => write!(
                f,
                "line {line} is {found} tiles wide but earlier lines are {expected}"
            ),
            LevelError::UnknownTile { ch, x, y } => {
                write!(f, "unsupported tile character '{ch}' at {x}, {y}")
            }
            LevelError::MissingStart => write!(f, "level must have a starting point"),
            LevelError::MissingExit => write!(f, "level must have an exit"),
            LevelError::DuplicateStart { x, y } => {
                write!(f, "second starting point at {x}, {y}; only one is allowed")
            }
            LevelError::DuplicateExit { x, y } => {
                write!(f, "second exit at {x}, {y}; only one is allowed")
            }
        }
    }
}

impl std::error::Error for LevelError {}

/// Accumulates entities while the tile characters are read
struct LevelBuilder {
    rng: Pcg32,
    theme: Theme,
    start: Option<Vec2>,
    exit: Option<IVec2>,
    fragments: Vec<Fragment>,
    enemies: Vec<Enemy>,
    hazards: Vec<Hazard>,
    geysers: Vec<Geyser>,
    shooters: Vec<ProjectileShooter>,
}

impl LevelBuilder {
    fn new(params: &LevelParams) -> Self {
        let index = params.index as u64;
        let seed = index * index + params.score as u64 + LEVEL_SEED_OFFSET;
        Self {
            rng: Pcg32::seed_from_u64(seed),
            theme: Theme::for_level(params.index, params.num_levels),
            start: None,
            exit: None,
            fragments: Vec::new(),
            enemies: Vec::new(),
            hazards: Vec::new(),
            geysers: Vec::new(),
            shooters: Vec::new(),
        }
    }

    fn load_tile(&mut self, ch: char, x: usize, y: usize) -> Result<Tile, LevelError> {
        let (gx, gy) = (x as i32, y as i32);
        let bounds = TileGrid::bounds(gx, gy);
        let center = bounds.center();
        let bottom_center = bounds.bottom_center();

        let tile = match ch {
            '.' => Tile::default(),
            '1' => {
                if self.start.is_some() {
                    return Err(LevelError::DuplicateStart { x, y });
                }
                self.start = Some(bottom_center);
                Tile::default()
            }
            'X' => {
                if self.exit.is_some() {
                    return Err(LevelError::DuplicateExit { x, y });
                }
                self.exit = Some(center);
                Tile::default()
            }

            // Fragments
            'F' => self.fragment(center, TileCollision::Passable),
            'f' | 'g' => self.fragment(center, TileCollision::Impeding),

            // Terrain
            'U' | 'Q' => Tile::new(TileCollision::Impeding),
            'C' => Tile::new(TileCollision::Unstable).with_rebuildable(true),
            'S' => Tile::new(TileCollision::Slippery),
            '-' => self.variety(2, TileCollision::Platform),
            '#' => self.variety(5, TileCollision::Impassable),
            '%' => self.variety(5, TileCollision::Breakable),

            // Enemies
            'E' => {
                self.enemies.push(Enemy::patrol(bottom_center));
                Tile::default()
            }
            'T' => {
                self.enemies.push(Enemy::vortex(bottom_center));
                Tile::default()
            }

            // Hazards
            'V' => self.hazard(center, HazardKind::Stalactite, 5, TileCollision::Passable),
            'v' => self.hazard(center, HazardKind::Stalactite, 5, TileCollision::Impeding),
            '^' => self.hazard(center, HazardKind::Stalagmite, 5, TileCollision::Passable),
            '6' => self.hazard(center, HazardKind::Stalagmite, 5, TileCollision::Impeding),
            'I' => self.hazard(center, HazardKind::IcicleDown, 5, TileCollision::Passable),
            'i' => self.hazard(center, HazardKind::IcicleUp, 5, TileCollision::Passable),
            'O' => self.hazard(center, HazardKind::IcicleDown, 5, TileCollision::Impeding),
            'o' => self.hazard(center, HazardKind::IcicleUp, 5, TileCollision::Impeding),
            'W' => self.hazard(center, HazardKind::FireWall, 1, TileCollision::Passable),

            // Geysers
            'G' => self.geyser(bottom_center, GeyserKind::Water, 2.0, 2.0),
            'R' => self.geyser(bottom_center, GeyserKind::Fire, 2.0, 2.0),
            'J' => self.geyser(bottom_center, GeyserKind::Wind, 5.0, 10.0),

            // Fireball shooters
            'P' => self.shooter(bottom_center, Vec2::new(-1.0, 0.0)),
            'p' => self.shooter(bottom_center, Vec2::new(1.0, 0.0)),
            'B' => self.shooter(bottom_center, Vec2::new(0.0, -1.0)),
            'b' => self.shooter(bottom_center, Vec2::new(0.0, 1.0)),

            _ => return Err(LevelError::UnknownTile { ch, x, y }),
        };
        Ok(tile)
    }

    /// Tile with a random look out of `count`
    fn variety(&mut self, count: u8, collision: TileCollision) -> Tile {
        let variant = self.rng.random_range(0..count);
        Tile::new(collision).with_variant(variant)
    }

    fn fragment(&mut self, center: IVec2, collision: TileCollision) -> Tile {
        let id = self.fragments.len();
        self.fragments.push(Fragment::new(id, center.as_vec2()));
        Tile::new(collision)
    }

    fn hazard(&mut self, center: IVec2, kind: HazardKind, looks: u8, collision: TileCollision) -> Tile {
        let variant = self.rng.random_range(0..looks);
        self.hazards.push(Hazard::new(center, kind, variant));
        Tile::new(collision)
    }

    fn geyser(&mut self, position: Vec2, kind: GeyserKind, idle: f32, firing: f32) -> Tile {
        self.geysers.push(Geyser::new(position, kind, idle, firing));
        Tile::default()
    }

    fn shooter(&mut self, position: Vec2, target: Vec2) -> Tile {
        self.shooters.push(ProjectileShooter::new(
            position,
            target,
            Vec2::splat(FIREBALL_SPEED),
            FIREBALL_RATE,
            false,
        ));
        Tile::default()
    }
}

impl Level {
    /// Parse a level from its text form.
    ///
    /// Lines are checked for equal length first, then every character is
    /// loaded in row-major order, then start and exit are checked.
    pub fn load(text: &str, params: LevelParams, tuning: Tuning) -> Result<Level, LevelError> {
        let lines: Vec<Vec<char>> = text.lines().map(|line| line.chars().collect()).collect();

        let width = lines.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(LevelError::Empty);
        }
        if let Some((i, line)) = lines.iter().enumerate().find(|(_, l)| l.len() != width) {
            return Err(LevelError::RaggedLine {
                line: i + 1,
                expected: width,
                found: line.len(),
            });
        }

        let height = lines.len();
        let mut builder = LevelBuilder::new(&params);
        let mut cells = Vec::with_capacity(width * height);
        for (y, line) in lines.iter().enumerate() {
            for (x, &ch) in line.iter().enumerate() {
                cells.push(builder.load_tile(ch, x, y)?);
            }
        }

        let start = builder.start.ok_or(LevelError::MissingStart)?;
        let exit = builder.exit.ok_or(LevelError::MissingExit)?;
        let grid = TileGrid::from_cells(width, height, cells);
        let num_gems = builder.fragments.len();

        log::info!(
            "Loaded level {}: {}x{} tiles, {} fragments, {} enemies, theme {:?}",
            params.index,
            width,
            height,
            num_gems,
            builder.enemies.len(),
            builder.theme
        );

        let mut level = Level {
            index: params.index,
            theme: builder.theme,
            grid,
            player: Player::new(start),
            start,
            exit,
            fragments: builder.fragments,
            num_gems,
            gems_remaining: num_gems,
            enemies: builder.enemies,
            hazards: builder.hazards,
            geysers: builder.geysers,
            shooters: builder.shooters,
            timers: Vec::new(),
            camera: Camera::default(),
            score: params.score,
            time: 0.0,
            reached_exit: false,
            complete: false,
            paused: false,
            disposed: false,
            tuning,
        };
        let world_size = level.grid.world_size();
        level
            .camera
            .scroll(level.player.position, world_size, &level.tuning);
        Ok(level)
    }
}
