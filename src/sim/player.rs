//! Player kinematics and tile collision response
//!
//! Each tick the player integrates input, gravity and the jump curve, snaps
//! to whole units, then separates itself from overlapped tiles one tile at a
//! time. Substance flags (impeding, slippery) are re-derived from the tiles
//! actually touched during that pass.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Axis, intersection_depth, resolution_axis};
use super::event::{DeathCause, GameEvent};
use super::rect::Rect;
use super::tick::TickInput;
use super::tile::{TileCollision, TileGrid, TileSpan};
use super::tile_timer::{TileTimer, register_timer};
use crate::consts::{MAX_BREATH, PLAYER_HITBOX, TILE_HEIGHT, TILE_WIDTH};
use crate::tuning::Tuning;

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Bottom-center of the sprite in world space
    pub position: Vec2,
    pub velocity: Vec2,
    pub is_alive: bool,
    /// Total deaths plus one; used as a scoring handicap, not remaining lives
    pub num_lives: u32,
    pub breath: f32,
    pub is_on_ground: bool,
    pub is_jumping: bool,
    pub was_jumping: bool,
    /// Seconds into the powered ascent of the current jump
    pub jump_time: f32,
    pub in_impeding_substance: bool,
    pub on_slippery_substance: bool,
    /// Latched horizontal intent in [-1, 1]
    pub movement: f32,
    /// Requesting to drop through platforms this tick
    pub pass_through: bool,
    pub charging: bool,
    pub charge_timer: f32,
    prev_charge_pressed: bool,
    /// Bottom edge after last tick's collision pass
    previous_bottom: i32,
}

impl Player {
    pub fn new(start: Vec2) -> Self {
        let mut player = Self {
            position: start,
            velocity: Vec2::ZERO,
            is_alive: true,
            num_lives: 1,
            breath: MAX_BREATH,
            is_on_ground: false,
            is_jumping: false,
            was_jumping: false,
            jump_time: 0.0,
            in_impeding_substance: false,
            on_slippery_substance: false,
            movement: 0.0,
            pass_through: false,
            charging: false,
            charge_timer: 0.0,
            prev_charge_pressed: false,
            previous_bottom: 0,
        };
        player.reset(start);
        player
    }

    /// Bring the player back to life at `start`
    pub fn reset(&mut self, start: Vec2) {
        self.position = start;
        self.velocity = Vec2::ZERO;
        self.is_alive = true;
        self.breath = MAX_BREATH;
        self.charging = false;
        self.charge_timer = 0.0;
        self.previous_bottom = self.bounds().bottom();
    }

    /// Bounding rectangle in world space
    pub fn bounds(&self) -> Rect {
        PLAYER_HITBOX.bounds_at(self.position)
    }

    /// Kill the player. A second call while already dead does nothing.
    ///
    /// Returns `true` if this call killed the player.
    pub fn kill(&mut self, cause: DeathCause, events: &mut Vec<GameEvent>) -> bool {
        if !self.is_alive {
            return false;
        }
        self.is_alive = false;
        self.num_lives += 1;
        log::debug!("Player killed: {:?} (lives counter {})", cause, self.num_lives);
        events.push(GameEvent::PlayerKilled { cause });
        true
    }

    /// Full per-tick update: input, physics, breath
    pub fn update(
        &mut self,
        input: &TickInput,
        grid: &TileGrid,
        timers: &mut Vec<TileTimer>,
        tuning: &Tuning,
        dt: f32,
        events: &mut Vec<GameEvent>,
    ) {
        self.read_input(input, grid, tuning);

        self.charge_timer -= dt;
        if self.charge_timer <= 0.0 {
            self.charging = false;
        }

        self.apply_physics(grid, timers, tuning, dt);
        self.update_breath(tuning, events);

        // Jump must be requested again next tick
        self.is_jumping = false;
    }

    /// Latch this tick's input intent
    fn read_input(&mut self, input: &TickInput, grid: &TileGrid, tuning: &Tuning) {
        if input.movement != 0.0 {
            self.movement = input.movement.clamp(-1.0, 1.0);
        }
        if self.movement.abs() < tuning.movement_dead_zone {
            self.movement = 0.0;
        }

        self.is_jumping = input.jump;

        // Charge starts on the press edge and never from ice
        let tile_x = self.position.x as i32 / TILE_WIDTH;
        let tile_y = self.position.y as i32 / TILE_HEIGHT;
        if !self.charging
            && input.charge
            && !self.prev_charge_pressed
            && grid.classify(tile_x, tile_y) != TileCollision::Slippery
        {
            self.charging = true;
            self.charge_timer = tuning.charge_duration;
        }
        self.prev_charge_pressed = input.charge;

        self.pass_through = input.pass_through;
    }

    /// Breath drains in impeding substances and recovers elsewhere
    pub fn update_breath(&mut self, tuning: &Tuning, events: &mut Vec<GameEvent>) {
        if self.in_impeding_substance {
            self.breath -= tuning.breath_rate;
        } else {
            self.breath += tuning.breath_rate;
        }
        self.breath = self.breath.clamp(0.0, MAX_BREATH);

        if self.breath == 0.0 {
            self.kill(DeathCause::Drowned, events);
        }
    }

    /// Integrate velocity and position, then resolve tile collisions
    pub fn apply_physics(
        &mut self,
        grid: &TileGrid,
        timers: &mut Vec<TileTimer>,
        tuning: &Tuning,
        dt: f32,
    ) {
        let previous_position = self.position;
        let substance =
            tuning.substance_physics(self.in_impeding_substance, self.on_slippery_substance);

        self.velocity.x += self.movement * tuning.move_acceleration * tuning.run_factor * dt;
        self.velocity.y = (self.velocity.y + tuning.gravity * dt)
            .max(-tuning.max_rise_speed)
            .min(substance.max_fall_speed);

        if self.charging {
            self.velocity.x += self.movement * tuning.move_acceleration * tuning.charge_factor * dt;
        }

        self.velocity.y = self.do_jump(self.velocity.y, tuning, dt);

        // Pseudo-drag
        if self.is_on_ground {
            self.velocity.x *= substance.ground_drag;
        } else {
            self.velocity.x *= substance.air_drag;
        }
        self.velocity.x = self.velocity.x.clamp(-tuning.max_move_speed, tuning.max_move_speed);

        self.position += self.velocity * dt;
        self.position = Vec2::new(
            self.position.x.round_ties_even(),
            self.position.y.round_ties_even(),
        );

        self.handle_collisions(grid, timers, tuning);

        // A collision that stopped us zeroes that axis
        if self.position.x == previous_position.x {
            self.velocity.x = 0.0;
        }
        if self.position.y == previous_position.y {
            self.velocity.y = 0.0;
        }

        if !self.on_slippery_substance {
            if self.is_on_ground {
                self.movement = 0.0;
            } else if self.movement > 0.0 {
                self.movement = (self.movement - tuning.airborne_intent_decay).max(0.0);
            } else if self.movement < 0.0 {
                self.movement = (self.movement + tuning.airborne_intent_decay).min(0.0);
            }
        }
    }

    /// Vertical velocity accounting for jumping.
    ///
    /// During the ascent the velocity is fully overridden by a power curve;
    /// once `max_jump_time` is exceeded or the button is released, gravity
    /// takes over again.
    fn do_jump(&mut self, velocity_y: f32, tuning: &Tuning, dt: f32) -> f32 {
        let mut velocity_y = velocity_y;

        if self.is_jumping {
            // Impeding substances let the player swim up without footing
            let can_begin = !self.was_jumping && (self.is_on_ground || self.in_impeding_substance);
            if can_begin || self.jump_time > 0.0 {
                self.jump_time += dt;
            }

            if 0.0 < self.jump_time && self.jump_time <= tuning.max_jump_time {
                velocity_y = jump_velocity(self.jump_time, tuning);
            } else {
                // Apex reached
                self.jump_time = 0.0;
            }
        } else {
            self.jump_time = 0.0;
        }
        self.was_jumping = self.is_jumping;

        velocity_y
    }

    /// Separate the player from every overlapped tile, one tile at a time
    pub(crate) fn handle_collisions(
        &mut self,
        grid: &TileGrid,
        timers: &mut Vec<TileTimer>,
        tuning: &Tuning,
    ) {
        let mut bounds = self.bounds();
        let span = TileSpan::covering(&bounds);

        self.is_on_ground = false;
        self.on_slippery_substance = false;

        for (x, y) in span.cells() {
            let collision = grid.classify(x, y);
            if collision == TileCollision::Passable {
                self.in_impeding_substance = false;
                continue;
            }

            let tile_bounds = TileGrid::bounds(x, y);
            let depth = intersection_depth(&bounds, &tile_bounds);
            if depth == Vec2::ZERO {
                continue;
            }
            self.jump_time = 0.0;

            match resolution_axis(depth, collision) {
                Axis::Y => {
                    // Crossing the top of a tile puts us on the ground
                    if self.previous_bottom <= tile_bounds.top() {
                        self.is_on_ground = true;
                    }

                    match collision {
                        TileCollision::Platform if self.pass_through => {
                            self.is_on_ground = false;
                        }
                        TileCollision::Slippery => {
                            self.on_slippery_substance = true;
                            self.position.y += depth.y;
                            bounds = self.bounds();
                        }
                        TileCollision::Unstable => {
                            let intact = grid.get(x, y).is_some_and(|t| !t.is_destroyed());
                            if intact {
                                self.position.y += depth.y;
                                bounds = self.bounds();
                                register_timer(
                                    timers,
                                    TileTimer::new(
                                        x,
                                        y,
                                        tuning.unstable_destroy_seconds,
                                        tuning.unstable_rebuild_seconds,
                                    ),
                                );
                            }
                        }
                        TileCollision::Impeding => {
                            self.in_impeding_substance = true;
                        }
                        _ if collision.is_solid_wall() || self.is_on_ground => {
                            self.position.y += depth.y;
                            bounds = self.bounds();
                        }
                        _ => {}
                    }
                }
                Axis::X => {
                    if collision.is_solid_wall() || collision == TileCollision::Slippery {
                        self.movement = 0.0;

                        // Standing at a tile boundary inside water must not snag
                        if self.position.y >= (tile_bounds.top() + 2) as f32 {
                            self.position.x += depth.x;
                        }
                        bounds = self.bounds();
                    }
                }
            }
        }

        self.previous_bottom = bounds.bottom();
    }
}

/// Jump power curve: launch velocity decaying to zero at `max_jump_time`
pub fn jump_velocity(ascent_time: f32, tuning: &Tuning) -> f32 {
    tuning.jump_launch_velocity
        * (1.0 - (ascent_time / tuning.max_jump_time).powf(tuning.jump_control_power))
}
