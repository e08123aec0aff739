//! Fixed timestep simulation tick
//!
//! Advances one level by one step. The order of the stages below is part of
//! the game's behavior: later stages observe what earlier ones did.

use super::event::{DeathCause, GameEvent};
use super::state::Level;
use super::tile_timer::advance_timers;

/// Input intent for a single tick, sampled once before the tick runs
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Horizontal axis in [-1, 1]; zero keeps the previous intent
    pub movement: f32,
    pub jump: bool,
    /// Charge dash (acts on the press edge)
    pub charge: bool,
    /// Drop through platforms
    pub pass_through: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the level by one fixed timestep and report what happened
pub fn tick(level: &mut Level, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if level.disposed {
        return events;
    }

    if input.pause {
        level.paused = !level.paused;
        log::debug!("Level {} paused: {}", level.index, level.paused);
    }
    if level.paused {
        return events;
    }

    if !level.player.is_alive || level.complete {
        // The world is frozen but the player still falls and lands
        level
            .player
            .apply_physics(&level.grid, &mut level.timers, &level.tuning, dt);
    } else if level.reached_exit {
        complete_level(level, &mut events);
    } else {
        level.time += dt;
        level.player.update(
            input,
            &level.grid,
            &mut level.timers,
            &level.tuning,
            dt,
            &mut events,
        );
        update_fragments(level, dt, &mut events);

        // Falling off the bottom of the level
        let (_, world_height) = level.grid.world_size();
        if level.player.bounds().top() >= world_height {
            level.player.kill(DeathCause::Fell, &mut events);
        }

        advance_timers(&mut level.timers, &mut level.grid, dt, &mut events);
        update_shooters(level, dt, &mut events);
        update_enemies(level, dt, &mut events);
        update_geysers(level, dt, &mut events);
        check_hazards(level, &mut events);
        check_exit(level, &mut events);
    }

    let world_size = level.grid.world_size();
    level
        .camera
        .scroll(level.player.position, world_size, &level.tuning);

    events
}

fn complete_level(level: &mut Level, events: &mut Vec<GameEvent>) {
    let bonus = level.completion_bonus();
    level.score += bonus;
    level.complete = true;
    log::info!(
        "Level {} complete in {:.2}s: +{} (score {})",
        level.index,
        level.time,
        bonus,
        level.score
    );
    events.push(GameEvent::LevelCompleted { score: level.score });
}

/// Move fragments, collect the ones the player touches, retire arrivals
fn update_fragments(level: &mut Level, dt: f32, events: &mut Vec<GameEvent>) {
    let player_bounds = level.player.bounds();
    let exit_gem = level.exit_gem_bounds();
    let exit = level.exit;
    let tuning = &level.tuning;

    let mut collected = 0;
    level.fragments.retain_mut(|fragment| {
        fragment.update(dt);

        if fragment.bounding_circle().intersects(&player_bounds)
            && fragment.collect(exit, tuning.fragment_speed)
        {
            collected += 1;
            events.push(GameEvent::FragmentCollected { index: fragment.id });
        }

        if fragment.has_arrived(&exit_gem) {
            events.push(GameEvent::FragmentArrived);
            return false;
        }
        true
    });

    if collected > 0 {
        level.score += collected * level.tuning.fragment_points;
        level.gems_remaining = level.gems_remaining.saturating_sub(collected as usize);
        log::debug!(
            "Collected {} fragment(s), {} remaining",
            collected,
            level.gems_remaining
        );
    }
}

fn update_shooters(level: &mut Level, dt: f32, events: &mut Vec<GameEvent>) {
    for (index, shooter) in level.shooters.iter_mut().enumerate() {
        shooter.update(
            index,
            &mut level.player,
            &level.grid,
            &level.tuning,
            dt,
            events,
        );
    }
}

fn update_enemies(level: &mut Level, dt: f32, events: &mut Vec<GameEvent>) {
    for enemy in &mut level.enemies {
        enemy.update(&level.grid, &level.tuning, dt);

        if enemy.is_vortex()
            && level
                .camera
                .in_active_window(enemy.position, level.tuning.vortex_active_range)
        {
            enemy.pull(&mut level.player, &level.grid, &level.tuning);
        }

        // Touching an enemy is always fatal
        if enemy.bounds().intersects(&level.player.bounds()) {
            level.player.kill(DeathCause::Enemy, events);
        }
    }
}

fn update_geysers(level: &mut Level, dt: f32, events: &mut Vec<GameEvent>) {
    for geyser in &mut level.geysers {
        geyser.update(dt);
        geyser.affect_player(&mut level.player, &level.tuning, events);
    }
}

fn check_hazards(level: &mut Level, events: &mut Vec<GameEvent>) {
    for hazard in &level.hazards {
        hazard.check_player(&mut level.player, events);
    }
}

/// The exit opens once every fragment is collected; the player has to be
/// standing with the exit point inside their bounds
fn check_exit(level: &mut Level, events: &mut Vec<GameEvent>) {
    let player = &level.player;
    if player.is_alive
        && player.is_on_ground
        && player.bounds().contains(level.exit)
        && level.gems_remaining == 0
    {
        level.reached_exit = true;
        log::info!("Level {}: exit reached", level.index);
        events.push(GameEvent::ExitReached);
    }
}
