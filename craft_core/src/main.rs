//! Headless simulator for the core game loop.
//!
//! Drives a full session at the reference 60 Hz cadence with a scripted
//! finger that sweeps back and forth across the camera frame, printing every
//! game event and a final summary.  Useful for eyeballing pacing without a
//! window or a camera.

use craft_core::{Game, GameConfig, GameEvent, HandSample, Landmark, PoseSampleAdapter};
use rand::rngs::StdRng;
use rand::SeedableRng;

const TICK_MS: u64 = 16;

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        craft_sim — scripted run of the core game loop        ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let seconds = arg_value("--seconds").unwrap_or(30);
    let seed = arg_value("--seed").unwrap_or(1);
    let sweep_ms = arg_value("--sweep-ms").unwrap_or(4000).max(1);

    println!("  {} s at 60 Hz, rng seed {}, finger sweep period {} ms", seconds, seed, sweep_ms);
    println!();

    let config = GameConfig::default();
    let mut game = Game::new(config);
    let mut adapter = PoseSampleAdapter::new(config.screen_w, config.screen_h);
    let mut rng = StdRng::seed_from_u64(seed);

    // Perception "loads" instantly in simulation.
    game.start(0);

    let ticks = seconds * 1000 / TICK_MS;
    for frame in 0..ticks {
        let now = frame * TICK_MS;

        // Scripted finger: a triangle sweep across the 640-px camera frame.
        let phase = (now % sweep_ms) as f32 / sweep_ms as f32;
        let sweep = if phase < 0.5 { phase * 2.0 } else { 2.0 - phase * 2.0 };
        let sample = HandSample::Detected(scripted_hand(sweep * 640.0));

        if let Some(target) = adapter.map(&sample) {
            game.steer(target);
        }
        game.tick(now, &mut rng);

        for event in game.drain_events() {
            match event {
                GameEvent::Started => println!("  [{:>6} ms] ♪ session started", now),
                GameEvent::Collision => println!(
                    "  [{:>6} ms] ✶ impact at craft x = {:.0}",
                    now,
                    game.craft().pos.x
                ),
            }
        }

        if game.is_game_over() {
            break;
        }
    }

    println!();
    println!("  ┌─ summary ─────────────────────────────");
    println!("  │  outcome   : {}", game.message().unwrap_or("survived"));
    println!("  │  score     : {}", game.score());
    println!("  │  dodged    : {}", game.dodged());
    println!("  │  on screen : {}", game.obstacles().len());
    println!("  └───────────────────────────────────────");
    println!();
}

/// A plausible 21-landmark hand with the index tip at `tip_x`.
fn scripted_hand(tip_x: f32) -> Vec<Landmark> {
    (0..21)
        .map(|i| {
            let spread = (i as f32 - 8.0) * 3.0;
            Landmark::new(tip_x + spread, 240.0 + spread.abs(), 0.0)
        })
        .collect()
}

fn arg_value(name: &str) -> Option<u64> {
    let mut args = std::env::args();
    while let Some(a) = args.next() {
        if a == name {
            return args.next().and_then(|v| v.parse().ok());
        }
    }
    None
}
