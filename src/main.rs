//! Realm Racer - headless runner
//!
//! Loads a level file and drives it with a simple autopilot for a fixed
//! number of ticks, logging what happens.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use realm_racer::consts::SIM_DT;
use realm_racer::sim::{GameEvent, Level, LevelParams, TickInput, tick};
use realm_racer::tuning::Tuning;

/// Ticks to wait after a death before respawning
const RESPAWN_DELAY_TICKS: u32 = 60;

#[derive(Debug, Parser)]
#[command(name = "realm-racer")]
#[command(about = "Run a level headless with a simple autopilot")]
struct Cli {
    /// Level text file
    level: PathBuf,
    /// JSON file overriding the default tuning
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Number of fixed ticks to simulate
    #[arg(long, default_value_t = 3600)]
    ticks: u32,
}

/// Run right, jump whenever we stop dead on the ground
fn autopilot(level: &Level) -> TickInput {
    let player = &level.player;
    let stuck = player.is_on_ground && player.velocity.x.abs() < 1.0;
    TickInput {
        movement: 1.0,
        jump: stuck || player.jump_time > 0.0,
        ..Default::default()
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Cli::parse();

    let tuning = match &args.tuning {
        Some(path) => Tuning::load_or_default(path),
        None => Tuning::default(),
    };
    let text = std::fs::read_to_string(&args.level)
        .with_context(|| format!("failed to read level {}", args.level.display()))?;
    let mut level = Level::load(&text, LevelParams::default(), tuning)
        .with_context(|| format!("failed to load level {}", args.level.display()))?;

    log::info!("Realm Racer (headless) running {} ticks", args.ticks);

    let mut dead_for = 0;
    for _ in 0..args.ticks {
        let input = autopilot(&level);
        for event in tick(&mut level, &input, SIM_DT) {
            match event {
                GameEvent::PlayerKilled { cause } => log::info!("Player killed: {cause:?}"),
                GameEvent::LevelCompleted { score } => log::info!("Level complete, score {score}"),
                other => log::debug!("{other:?}"),
            }
        }

        if level.complete {
            break;
        }
        if !level.is_player_alive() {
            dead_for += 1;
            if dead_for >= RESPAWN_DELAY_TICKS {
                dead_for = 0;
                level.start_new_life();
            }
        }
    }

    log::debug!(
        "{} projectiles in flight, {} tile timers active",
        level.projectiles().count(),
        level.timers.len()
    );
    println!(
        "complete: {}  score: {}  fragments left: {}/{}  deaths: {}  time: {:.2}s",
        level.complete,
        level.score,
        level.gems_remaining,
        level.num_gems,
        level.player.num_lives - 1,
        level.time
    );
    level.dispose();
    Ok(())
}
