//! Asteroids headless host
//!
//! Drives the simulation from a fixed timer, builds a frame per tick and
//! records the final score in the high-score table.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use asteroids::renderer::build_frame;
use asteroids::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use asteroids::{HighScores, Settings};

#[derive(Parser, Debug)]
#[command(author, version, about = "Vector Asteroids (headless)", long_about = None)]
struct Args {
    /// Settings file (JSON); defaults apply when it does not exist
    #[arg(long, default_value = "asteroids.json")]
    config: PathBuf,
    /// High-score table (JSON)
    #[arg(long, default_value = "highscores.json")]
    scores: PathBuf,
    /// RNG seed, overrides the settings file
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many ticks if the game has not ended
    #[arg(long, default_value_t = 3000)]
    ticks: u64,
    /// Name recorded with a qualifying score
    #[arg(long, default_value = "player")]
    name: String,
    /// Pace ticks with the configured timer interval
    #[arg(long)]
    realtime: bool,
    /// Let the demo pilot fly the ship
    #[arg(long)]
    autopilot: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = Settings::load_or_default(&args.config)
        .with_context(|| format!("load settings {:?}", args.config))?;
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    let seed = settings.seed.unwrap_or_else(|| rand::rng().random());
    log::info!("Asteroids starting (seed {seed})");

    let mut scores =
        HighScores::load(&args.scores).with_context(|| format!("load high scores {:?}", args.scores))?;

    let final_score = run(settings, seed, &args);

    match scores.add_score(args.name.as_str(), final_score) {
        Some(rank) => {
            log::info!("{} placed #{rank} with {final_score}", args.name);
            scores
                .save(&args.scores)
                .with_context(|| format!("save high scores {:?}", args.scores))?;
        }
        None => log::info!("score {final_score} did not make the table"),
    }

    println!("Final score: {final_score:06}");
    println!("High scores:");
    for (i, entry) in scores.entries.iter().enumerate() {
        println!("{:>2}. {:06}  {}", i + 1, entry.score, entry.name);
    }
    Ok(())
}

/// Play one game and return its score
fn run(settings: Settings, seed: u64, args: &Args) -> u32 {
    let interval = Duration::from_millis(settings.tick_interval_ms);
    let bounds = settings.playfield;
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut state = GameState::new(settings);

    // Menu start signal
    state.start();

    let mut next_tick = Instant::now();
    for _ in 0..args.ticks {
        let input = TickInput {
            autopilot: args.autopilot,
            ..TickInput::new(bounds)
        };
        tick(&mut state, &input, &mut rng);

        let frame = build_frame(&state);
        log::trace!(
            "frame: {} line vertices, {} fill vertices",
            frame.line_vertices().len(),
            frame.fill_vertices().len()
        );

        for event in state.drain_events() {
            match event {
                GameEvent::BonusLife => log::info!("extra life! lives={}", state.lives),
                GameEvent::DifficultyRaised(level) => log::info!("difficulty {level}"),
                GameEvent::GameOver { score } => log::info!("game over with {score}"),
                other => log::debug!("{other:?}"),
            }
        }
        if state.phase == GamePhase::GameOver {
            break;
        }

        if args.realtime {
            next_tick += interval;
            if let Some(wait) = next_tick.checked_duration_since(Instant::now()) {
                std::thread::sleep(wait);
            }
        }
    }

    if state.phase == GamePhase::Running {
        log::info!("tick limit reached after {} ticks", state.time_ticks);
    }
    state.score
}
