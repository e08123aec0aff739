//! Geysers and wind jets
//!
//! Geysers alternate between an idle and a firing phase on a fixed cycle and
//! only affect the player while firing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::event::{DeathCause, GameEvent};
use super::player::Player;
use super::rect::Rect;
use crate::consts::GEYSER_HITBOX;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeyserKind {
    /// Pushes the player
    Wind,
    /// Pushes the player and knocks the breath out of them
    Water,
    /// Burns the player
    Fire,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geyser {
    /// Bottom-center of the sprite
    pub position: Vec2,
    pub kind: GeyserKind,
    /// Sprite rotation in radians; also shapes the push force
    pub rotation: f32,
    pub firing: bool,
    /// Seconds left in the current phase
    pub timer: f32,
    pub time_between_shots: f32,
    pub firing_time: f32,
}

impl Geyser {
    /// A geyser starts idle
    pub fn new(position: Vec2, kind: GeyserKind, time_between_shots: f32, firing_time: f32) -> Self {
        Self {
            position,
            kind,
            rotation: 0.0,
            firing: false,
            timer: time_between_shots,
            time_between_shots,
            firing_time,
        }
    }

    pub fn bounds(&self) -> Rect {
        GEYSER_HITBOX.bounds_at(self.position)
    }

    /// Advance the cycle; returns `true` when the phase flipped this tick
    pub fn update(&mut self, dt: f32) -> bool {
        self.timer -= dt;
        if self.timer > 0.0 {
            return false;
        }

        if self.firing {
            self.firing = false;
            self.timer = self.time_between_shots;
        } else {
            self.firing = true;
            self.timer = self.firing_time;
        }
        true
    }

    /// Component-wise velocity multiplier applied to a player caught in the blast
    pub fn push_force(&self, tuning: &Tuning) -> Vec2 {
        Vec2::splat(self.rotation.cos() * tuning.geyser_push)
    }

    /// Apply the blast to an overlapping player. Idle geysers are harmless.
    pub fn affect_player(&self, player: &mut Player, tuning: &Tuning, events: &mut Vec<GameEvent>) {
        if !self.firing || !self.bounds().intersects(&player.bounds()) {
            return;
        }

        match self.kind {
            GeyserKind::Fire => {
                player.kill(DeathCause::Geyser, events);
            }
            GeyserKind::Water => {
                player.velocity *= self.push_force(tuning);
                player.breath = (player.breath - tuning.geyser_breath_drain).max(0.0);
            }
            GeyserKind::Wind => {
                player.velocity *= self.push_force(tuning);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{MAX_BREATH, SIM_DT};

    fn ticks_until_flip(geyser: &mut Geyser) -> u32 {
        for tick in 1..=2000 {
            if geyser.update(SIM_DT) {
                return tick;
            }
        }
        panic!("geyser never changed phase");
    }

    #[test]
    fn test_cycle_alternates_idle_and_firing() {
        let mut jet = Geyser::new(Vec2::new(60.0, 64.0), GeyserKind::Wind, 5.0, 10.0);
        assert!(!jet.firing);

        let idle = ticks_until_flip(&mut jet);
        assert!(jet.firing);
        assert!((299..=301).contains(&idle), "idle for {idle} ticks");

        let firing = ticks_until_flip(&mut jet);
        assert!(!jet.firing);
        assert!((599..=601).contains(&firing), "fired for {firing} ticks");
    }

    #[test]
    fn test_idle_geyser_is_harmless() {
        let geyser = Geyser::new(Vec2::new(60.0, 64.0), GeyserKind::Fire, 2.0, 2.0);
        let mut player = Player::new(Vec2::new(60.0, 64.0));
        let mut events = Vec::new();
        geyser.affect_player(&mut player, &Tuning::default(), &mut events);
        assert!(player.is_alive);
        assert!(events.is_empty());
    }

    #[test]
    fn test_fire_geyser_kills() {
        let mut geyser = Geyser::new(Vec2::new(60.0, 64.0), GeyserKind::Fire, 2.0, 2.0);
        geyser.firing = true;
        let mut player = Player::new(Vec2::new(60.0, 64.0));
        let mut events = Vec::new();
        geyser.affect_player(&mut player, &Tuning::default(), &mut events);
        assert!(!player.is_alive);
        assert_eq!(
            events,
            vec![GameEvent::PlayerKilled {
                cause: DeathCause::Geyser
            }]
        );
    }

    #[test]
    fn test_water_geyser_pushes_and_drains_breath() {
        let mut geyser = Geyser::new(Vec2::new(60.0, 64.0), GeyserKind::Water, 2.0, 2.0);
        geyser.firing = true;
        let mut player = Player::new(Vec2::new(60.0, 64.0));
        player.velocity = Vec2::new(10.0, 20.0);
        let mut events = Vec::new();
        geyser.affect_player(&mut player, &Tuning::default(), &mut events);

        assert!(player.is_alive);
        assert_eq!(player.velocity, Vec2::new(-50.0, -100.0));
        assert_eq!(player.breath, MAX_BREATH - 5.0);
    }

    #[test]
    fn test_water_geyser_never_drains_below_zero() {
        let mut geyser = Geyser::new(Vec2::new(60.0, 64.0), GeyserKind::Water, 2.0, 2.0);
        geyser.firing = true;
        let mut player = Player::new(Vec2::new(60.0, 64.0));
        player.breath = 3.0;
        geyser.affect_player(&mut player, &Tuning::default(), &mut Vec::new());
        assert_eq!(player.breath, 0.0);
    }

    #[test]
    fn test_geyser_out_of_reach() {
        let mut geyser = Geyser::new(Vec2::new(60.0, 64.0), GeyserKind::Wind, 2.0, 2.0);
        geyser.firing = true;
        let mut player = Player::new(Vec2::new(200.0, 64.0));
        player.velocity = Vec2::new(10.0, 20.0);
        geyser.affect_player(&mut player, &Tuning::default(), &mut Vec::new());
        assert_eq!(player.velocity, Vec2::new(10.0, 20.0));
    }
}
