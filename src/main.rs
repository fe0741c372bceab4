//! Flappy Sim headless entry point
//!
//! Runs the simulation against a fixed 60 Hz frame signal with the autopilot
//! flying, restarting after each crash, and logs how each run ended.
//!
//! Usage: `flappy-sim [settings.json] [frames]`

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use flappy_sim::audio::AudioManager;
use flappy_sim::consts::TARGET_FRAME_MS;
use flappy_sim::sim::{GameEvent, SpriteMetrics};
use flappy_sim::{Game, Settings};

/// One minute of play at 60 Hz
const DEFAULT_FRAMES: u64 = 60 * 60;

fn main() {
    env_logger::init();
    log::info!("Flappy Sim (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(&PathBuf::from(path)),
        None => Settings::default(),
    };
    let frames = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_FRAMES);

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    let mut game = Game::new(settings, seed, AudioManager::default());
    // Headless runs have no assets; use the stock sprite size
    game.load_sprite(SpriteMetrics::default());
    game.set_idle_mode(true);

    let mut crashes = 0u32;
    for _ in 0..frames {
        game.step(TARGET_FRAME_MS);

        let crashed = game
            .events()
            .iter()
            .any(|e| matches!(e, GameEvent::Crashed { .. }));
        if crashed {
            crashes += 1;
            game.press();
        }
    }

    if let Some(snapshot) = game.snapshot() {
        log::info!(
            "Finished {} frames with seed {}: {} crashes, current score {}, high score {}",
            frames,
            seed,
            crashes,
            snapshot.score,
            snapshot.high_score
        );
        println!(
            "seed={} frames={} crashes={} score={} high_score={}",
            seed, frames, crashes, snapshot.score, snapshot.high_score
        );
    }
}
